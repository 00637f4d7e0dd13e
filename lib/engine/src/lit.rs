use std::fmt::{Display, Formatter};
use std::ops;

use crate::var::Var;

/// Engine literal: `var << 1 | negated`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Lit(u32);

impl Lit {
    pub const fn new(var: Var, negated: bool) -> Self {
        Lit(var.0 << 1 | negated as u32)
    }

    pub const fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    pub const fn negated(self) -> bool {
        (self.0 & 1) != 0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn to_external(self) -> i64 {
        let magnitude = self.var().0 as i64 + 1;
        if self.negated() {
            -magnitude
        } else {
            magnitude
        }
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_external())
    }
}

// !Lit
impl ops::Not for Lit {
    type Output = Lit;

    fn not(self) -> Self::Output {
        Lit(self.0 ^ 1)
    }
}

// Lit ^ bool
impl ops::BitXor<bool> for Lit {
    type Output = Lit;

    fn bitxor(self, rhs: bool) -> Self::Output {
        Lit(self.0 ^ rhs as u32)
    }
}
