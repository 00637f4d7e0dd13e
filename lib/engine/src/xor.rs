use crate::lit::Lit;
use crate::var::Var;

/// Parity constraint `vars[0] ^ vars[1] ^ ... == rhs` over at least two distinct variables.
#[derive(Debug, Clone)]
pub struct XorConstraint {
    pub(crate) vars: Vec<Var>,
    pub(crate) rhs: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum XorStatus {
    Open,
    Unit(Lit),
    Conflict,
}

/// Sorts `vars` and cancels duplicated pairs, since `x ^ x == 0`.
pub fn normalize_xor_vars(mut vars: Vec<Var>) -> Vec<Var> {
    vars.sort_unstable();
    let mut reduced: Vec<Var> = Vec::with_capacity(vars.len());
    for var in vars {
        if reduced.last() == Some(&var) {
            reduced.pop();
        } else {
            reduced.push(var);
        }
    }
    reduced
}
