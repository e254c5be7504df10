//! Error types used in the library.
//!
//! Conflicts found during search are not errors; see [`Conflict`](crate::solver::Conflict).

use thiserror::Error;

/// Errors while reading a DIMACS CNF file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to open file \"{filename}\" ({source})")]
    Open {
        filename: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read line ({filename}:{line_no})")]
    Read {
        filename: String,
        line_no: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("CNF header missing ({filename}:{line_no})")]
    MissingHeader { filename: String, line_no: usize },

    #[error("CNF header invalid ({filename}:{line_no})")]
    InvalidHeader { filename: String, line_no: usize },

    #[error("Could not parse literal ({filename}:{line_no})")]
    InvalidLiteral { filename: String, line_no: usize },

    #[error("Variable {variable} exceeds the {declared} declared in the header ({filename}:{line_no})")]
    VariableOutOfRange {
        filename: String,
        line_no: usize,
        variable: u64,
        declared: usize,
    },

    #[error("Number of clauses in cnf incorrect; expected {expected}, found {found} ({filename})")]
    ClauseCount {
        filename: String,
        expected: usize,
        found: usize,
    },
}

/// Malformed solver input
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    /// A clause without literals; the instance is unsatisfiable
    #[error("Clause {index} is empty")]
    EmptyClause { index: usize },
}
