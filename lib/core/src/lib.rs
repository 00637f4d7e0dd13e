pub mod backend;
pub mod config;
pub mod dimacs;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod lit;
pub mod msolve;
pub mod solution;
pub mod solver;
pub mod types;
pub mod varspace;
pub mod xor;

mod cursor;

#[cfg(test)]
mod mock;

pub use cursor::DEFAULT_MAX_GLUE;
pub use error::{Result, SolverError};
pub use solver::Solver;
