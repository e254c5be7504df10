use std::time::Duration;

use crate::solver::VerbosityLevel;

/// Number of decisions between two progress lines
pub const PROGRESS_INTERVAL: usize = 10_000;

/// Solver configuration
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SolverOptions {
    /// Whether to print statistics and progress
    pub verbosity: VerbosityLevel,
    /// Give up with `Unknown` after this many decisions
    pub decision_limit: Option<usize>,
    /// Give up with `Unknown` once a solve call has run this long
    pub time_limit: Option<Duration>,
}

impl SolverOptions {
    /// Options with the given verbosity and no limits
    #[must_use]
    pub fn with_verbosity(verbosity: VerbosityLevel) -> Self {
        Self {
            verbosity,
            ..Self::default()
        }
    }

    /// Sets the decision limit
    #[must_use]
    pub const fn decision_limit(mut self, limit: usize) -> Self {
        self.decision_limit = Some(limit);
        self
    }

    /// Sets the time limit
    #[must_use]
    pub const fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }
}
