pub mod clause;
pub mod lbool;
pub mod lit;
pub mod options;
pub mod solver;
pub mod var;

mod utils;
mod var_order;
mod xor;

pub use lbool::LBool;
pub use lit::Lit;
pub use options::Options;
pub use solver::{SolveResult, Solver, Stats};
pub use var::Var;
