//! Incremental SAT solving with native XOR constraints.
//!
//! [`core`] is the loosely-typed boundary layer (literal codec, clause ingestion,
//! solution decoding, enumeration), [`engine`] is the bundled CDCL engine behind it.

pub use cryptosat_core as core;
pub use cryptosat_engine as engine;

pub use cryptosat_core::{Result, Solver, SolverError};
