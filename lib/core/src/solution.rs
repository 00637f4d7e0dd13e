use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::error::Result;
use crate::lit::encode;
use crate::types::LBool;

/// Dense model: slot `0` is an unused placeholder, slot `v` holds the value of variable `v`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DenseSolution(Vec<Option<bool>>);

impl DenseSolution {
    pub fn from_model(model: &[LBool]) -> Result<Self> {
        let mut slots = Vec::with_capacity(model.len() + 1);
        slots.push(None);
        for value in model {
            slots.push(value.to_option()?);
        }
        Ok(DenseSolution(slots))
    }

    /// Value of the 1-based variable `var`. The placeholder and unknown variables are `None`.
    pub fn get(&self, var: usize) -> Option<bool> {
        self.0.get(var).copied().flatten()
    }

    /// Number of slots, placeholder included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.len() <= 1
    }

    pub fn num_vars(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// All slots, placeholder included.
    pub fn as_slice(&self) -> &[Option<bool>] {
        &self.0
    }

    /// Values of variables `1..=num_vars`.
    pub fn values(&self) -> impl Iterator<Item = Option<bool>> + '_ {
        self.0.iter().skip(1).copied()
    }
}

impl Display for DenseSolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = self
            .values()
            .map(|v| match v {
                Some(true) => '1',
                Some(false) => '0',
                None => 'X',
            })
            .join("");
        write!(f, "{}", s)
    }
}

/// Sparse model: one signed literal per variable with a known value.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RawSolution(Vec<i64>);

impl RawSolution {
    pub fn from_model(model: &[LBool]) -> Result<Self> {
        let mut lits = Vec::with_capacity(model.len());
        for (var, value) in model.iter().enumerate() {
            if let Some(b) = value.to_option()? {
                lits.push(encode(var as u32, !b));
            }
        }
        Ok(RawSolution(lits))
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<i64> {
        self.0
    }
}

impl Display for RawSolution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolutionFormat {
    Dense,
    Raw,
}

impl SolutionFormat {
    /// Format selected by the host's `raw` flag.
    pub const fn from_raw_flag(raw: bool) -> Self {
        if raw {
            SolutionFormat::Raw
        } else {
            SolutionFormat::Dense
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Solution {
    Dense(DenseSolution),
    Raw(RawSolution),
}

impl Solution {
    pub fn from_model(model: &[LBool], format: SolutionFormat) -> Result<Self> {
        Ok(match format {
            SolutionFormat::Dense => Solution::Dense(DenseSolution::from_model(model)?),
            SolutionFormat::Raw => Solution::Raw(RawSolution::from_model(model)?),
        })
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Solution::Dense(s) => write!(f, "{}", s),
            Solution::Raw(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> Vec<LBool> {
        vec![LBool::TRUE, LBool::FALSE, LBool::UNDEF, LBool::TRUE]
    }

    #[test]
    fn test_dense() {
        let dense = DenseSolution::from_model(&model()).unwrap();
        assert_eq!(dense.as_slice(), &[None, Some(true), Some(false), None, Some(true)]);
        assert_eq!(dense.len(), 5);
        assert_eq!(dense.num_vars(), 4);
        assert_eq!(dense.get(0), None);
        assert_eq!(dense.get(1), Some(true));
        assert_eq!(dense.get(2), Some(false));
        assert_eq!(dense.get(9), None);
        assert_eq!(dense.to_string(), "10X1");
    }

    #[test]
    fn test_raw_omits_unknown() {
        let raw = RawSolution::from_model(&model()).unwrap();
        assert_eq!(raw.as_slice(), &[1, -2, 4]);
        assert_eq!(raw.to_string(), "1 -2 4");
    }

    #[test]
    fn test_empty_model() {
        let dense = DenseSolution::from_model(&[]).unwrap();
        assert_eq!(dense.as_slice(), &[None]);
        assert!(dense.is_empty());
        assert!(RawSolution::from_model(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_illegal_value() {
        assert!(DenseSolution::from_model(&[LBool::from_raw(7)]).is_err());
        assert!(Solution::from_model(&[LBool::from_raw(7)], SolutionFormat::Raw).is_err());
    }
}
