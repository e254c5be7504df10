/*!
Targets for the [log] macros used throughout the library.

No log implementation is provided by the library; the binary installs
`env_logger` when built with the `log` feature, e.g.
`RUST_LOG=propagation=trace`.
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [propagation](crate::solver)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to the [trail](crate::solver::trail)
    pub const TRAIL: &str = "trail";

    /// Logs related to decisions and backtracking
    pub const SEARCH: &str = "search";

    /// Logs related to the [clause store](crate::solver::clauses)
    pub const CLAUSE_DB: &str = "clause_db";

    /// Logs related to [parsing](crate::parsing)
    pub const PARSE: &str = "parse";
}
