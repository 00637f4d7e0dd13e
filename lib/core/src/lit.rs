use std::fmt::{Display, Formatter};
use std::ops::Neg;

use snafu::ensure;

use crate::error::{InvalidLiteralSnafu, LitErrorKind, Result};

/// Largest accepted external literal, half of the native `int` range.
pub const MAX_EXTERNAL_LIT: i64 = (i32::MAX / 2) as i64;
/// Smallest accepted external literal.
pub const MIN_EXTERNAL_LIT: i64 = (i32::MIN / 2) as i64;

/// Decoded literal: 0-based variable index and polarity (`negated == true` for `-x`).
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Lit {
    var: u32,
    negated: bool,
}

impl Lit {
    pub const fn new(var: u32, negated: bool) -> Self {
        Lit { var, negated }
    }

    pub const fn var(self) -> u32 {
        self.var
    }

    pub const fn negated(self) -> bool {
        self.negated
    }

    /// Decodes a host literal.
    pub fn from_external<L: IntoRawLit>(raw: L) -> Result<Self> {
        decode(raw)
    }

    /// External signed encoding: variable `0` is `1`, negation flips the sign.
    pub const fn to_external(self) -> i64 {
        encode(self.var, self.negated)
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_external())
    }
}

// -Lit
impl Neg for Lit {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Lit::new(self.var, !self.negated)
    }
}

/// A literal as supplied by a loosely-typed host.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RawLit {
    Int(i128),
    /// Anything that is not an integer, kept as its printable representation.
    NotInteger(String),
}

impl Display for RawLit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RawLit::Int(x) => write!(f, "{}", x),
            RawLit::NotInteger(repr) => write!(f, "{}", repr),
        }
    }
}

pub trait IntoRawLit {
    fn into_raw_lit(self) -> RawLit;
}

impl IntoRawLit for RawLit {
    fn into_raw_lit(self) -> RawLit {
        self
    }
}

impl<L> IntoRawLit for &L
where
    L: IntoRawLit + Clone,
{
    fn into_raw_lit(self) -> RawLit {
        self.clone().into_raw_lit()
    }
}

macro_rules! impl_into_raw_lit {
    ($($t:ty),*) => {
        $(
            impl IntoRawLit for $t {
                fn into_raw_lit(self) -> RawLit {
                    RawLit::Int(self as i128)
                }
            }
        )*
    };
}

impl_into_raw_lit!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl IntoRawLit for u128 {
    fn into_raw_lit(self) -> RawLit {
        // Saturates, which is out of range anyway.
        RawLit::Int(i128::try_from(self).unwrap_or(i128::MAX))
    }
}

/// Decodes an external literal into a [`Lit`], validating it against the safe range.
pub fn decode<L: IntoRawLit>(raw: L) -> Result<Lit> {
    let value = match raw.into_raw_lit() {
        RawLit::Int(x) => x,
        RawLit::NotInteger(repr) => {
            return InvalidLiteralSnafu {
                value: repr,
                kind: LitErrorKind::NotAnInteger,
            }
            .fail()
        }
    };
    ensure!(
        value != 0,
        InvalidLiteralSnafu {
            value: "0",
            kind: LitErrorKind::Zero
        }
    );
    ensure!(
        (MIN_EXTERNAL_LIT as i128..=MAX_EXTERNAL_LIT as i128).contains(&value),
        InvalidLiteralSnafu {
            value: value.to_string(),
            kind: LitErrorKind::OutOfRange
        }
    );
    Ok(Lit::new((value.unsigned_abs() - 1) as u32, value < 0))
}

/// Inverse of [`decode`].
pub const fn encode(var: u32, negated: bool) -> i64 {
    let magnitude = var as i64 + 1;
    if negated {
        -magnitude
    } else {
        magnitude
    }
}
