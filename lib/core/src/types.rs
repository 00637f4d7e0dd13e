use std::fmt::{Display, Formatter};

use crate::error::{IllegalEngineStateSnafu, Result, SolverError};

/// Raw three-valued byte answered by an engine: `0 = true`, `1 = false`, `2 = undef`.
/// Any other byte is an illegal engine answer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct LBool(u8);

impl LBool {
    pub const TRUE: LBool = LBool(0);
    pub const FALSE: LBool = LBool(1);
    pub const UNDEF: LBool = LBool(2);

    pub const fn from_raw(raw: u8) -> Self {
        LBool(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub fn to_option(self) -> Result<Option<bool>> {
        match self.0 {
            0 => Ok(Some(true)),
            1 => Ok(Some(false)),
            2 => Ok(None),
            raw => IllegalEngineStateSnafu {
                message: format!("invalid truth value {}", raw),
            }
            .fail(),
        }
    }
}

impl From<bool> for LBool {
    fn from(b: bool) -> Self {
        if b {
            LBool::TRUE
        } else {
            LBool::FALSE
        }
    }
}

impl From<Option<bool>> for LBool {
    fn from(value: Option<bool>) -> Self {
        value.map_or(LBool::UNDEF, LBool::from)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolveResponse {
    Sat,
    Unsat,
    Unknown,
}

impl SolveResponse {
    /// `Some(true)` for SAT, `Some(false)` for UNSAT, `None` when undetermined.
    pub const fn to_option(self) -> Option<bool> {
        match self {
            SolveResponse::Sat => Some(true),
            SolveResponse::Unsat => Some(false),
            SolveResponse::Unknown => None,
        }
    }
}

impl TryFrom<LBool> for SolveResponse {
    type Error = SolverError;

    fn try_from(value: LBool) -> Result<Self> {
        match value.raw() {
            0 => Ok(SolveResponse::Sat),
            1 => Ok(SolveResponse::Unsat),
            2 => Ok(SolveResponse::Unknown),
            raw => IllegalEngineStateSnafu {
                message: format!("invalid response from `solve()`: {}", raw),
            }
            .fail(),
        }
    }
}

impl Display for SolveResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use SolveResponse::*;
        match self {
            Sat => write!(f, "SAT"),
            Unsat => write!(f, "UNSAT"),
            Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_response_from_lbool() {
        assert_eq!(SolveResponse::try_from(LBool::TRUE).ok(), Some(SolveResponse::Sat));
        assert_eq!(SolveResponse::try_from(LBool::FALSE).ok(), Some(SolveResponse::Unsat));
        assert_eq!(SolveResponse::try_from(LBool::UNDEF).ok(), Some(SolveResponse::Unknown));
        assert!(matches!(
            SolveResponse::try_from(LBool::from_raw(3)),
            Err(SolverError::IllegalEngineState { .. })
        ));
    }

    #[test]
    fn test_lbool_to_option() {
        assert_eq!(LBool::from(true).to_option().ok(), Some(Some(true)));
        assert_eq!(LBool::from(false).to_option().ok(), Some(Some(false)));
        assert_eq!(LBool::from(None).to_option().ok(), Some(None));
        assert!(LBool::from_raw(42).to_option().is_err());
    }

    #[test]
    fn test_solve_response_display() {
        assert_eq!(SolveResponse::Sat.to_string(), "SAT");
        assert_eq!(SolveResponse::Unknown.to_option(), None);
        assert_eq!(SolveResponse::Unsat.to_option(), Some(false));
    }
}
