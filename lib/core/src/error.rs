use std::fmt::{Display, Formatter};

use snafu::Snafu;

pub type Result<T, E = SolverError> = std::result::Result<T, E>;

/// Why a host value is not a valid literal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LitErrorKind {
    NotAnInteger,
    Zero,
    OutOfRange,
}

impl LitErrorKind {
    fn describe(self, value: &str) -> String {
        match self {
            LitErrorKind::NotAnInteger => "integer expected".to_string(),
            LitErrorKind::Zero => "non-zero integer expected".to_string(),
            LitErrorKind::OutOfRange => format!("integer '{}' is too small or too large", value),
        }
    }
}

impl Display for LitErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LitErrorKind::NotAnInteger => write!(f, "not an integer"),
            LitErrorKind::Zero => write!(f, "zero"),
            LitErrorKind::OutOfRange => write!(f, "out of range"),
        }
    }
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SolverError {
    #[snafu(display("{}", kind.describe(value)))]
    InvalidLiteral { value: String, kind: LitErrorKind },

    #[snafu(display("XOR clause must contain only positive variables (not inverted literals), got '{}'", value))]
    InvalidXorLiteral { value: i64 },

    #[snafu(display("{}", reason))]
    MalformedBuffer { reason: String },

    #[snafu(display("variable '{}' not used in clauses", var))]
    UnknownVariable { var: i64 },

    #[snafu(display("No active learnt clause traversal, call `start_getting_small_clauses` first"))]
    NoActiveCursor,

    #[snafu(display("Illegal engine state: {}", message))]
    IllegalEngineState { message: String },

    #[snafu(display("Nothing to do => sol undef (after {} solutions)", found))]
    Undetermined { found: usize },

    #[snafu(display("{}", message))]
    InvalidConfig { message: String },

    #[snafu(display("DIMACS line {}: {}", line, message))]
    Dimacs { line: usize, message: String },

    #[snafu(display("I/O error: {}", source))]
    Io { source: std::io::Error },
}

impl SolverError {
    /// `true` for errors that stem from a value of the wrong type rather than a wrong value.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            SolverError::InvalidLiteral {
                kind: LitErrorKind::NotAnInteger,
                ..
            }
        )
    }
}
