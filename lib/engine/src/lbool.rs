use std::ops::BitXor;

/// Three-valued truth value. Discriminants follow the CryptoMiniSat `lbool` byte.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum LBool {
    True = 0,
    False = 1,
    Undef = 2,
}

impl LBool {
    #[inline]
    pub const fn is_undef(self) -> bool {
        matches!(self, LBool::Undef)
    }

    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

impl From<bool> for LBool {
    fn from(b: bool) -> Self {
        if b {
            LBool::True
        } else {
            LBool::False
        }
    }
}

// LBool ^ bool
impl BitXor<bool> for LBool {
    type Output = LBool;

    fn bitxor(self, rhs: bool) -> Self::Output {
        match (self, rhs) {
            (LBool::Undef, _) => LBool::Undef,
            (value, false) => value,
            (LBool::True, true) => LBool::False,
            (LBool::False, true) => LBool::True,
        }
    }
}
