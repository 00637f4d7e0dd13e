use std::borrow::Cow;

use crate::lit::Lit;
use crate::types::LBool;

/// The incremental SAT engine behind a [`Solver`](crate::solver::Solver).
///
/// Variables are 0-based. Every method is infallible: an engine that cannot
/// make sense of its own state reports it through [`Engine::solve`] with a
/// byte outside of the three [`LBool`] values.
pub trait Engine {
    /// Return the signature of the engine as a `Cow<str>`.
    fn signature(&self) -> Cow<str>;

    fn set_verbosity(&mut self, verbosity: u32);

    /// Wall-clock budget of each `solve` call, in seconds.
    fn set_max_time(&mut self, seconds: f64);

    /// Conflict budget of each `solve` call.
    fn set_max_confl(&mut self, conflicts: u64);

    fn set_num_threads(&mut self, threads: usize);

    /// Declare `n` more variables.
    fn new_vars(&mut self, n: usize);

    fn num_vars(&self) -> usize;

    fn num_clauses(&self) -> usize;

    /// Add a clause. Returns `false` if the engine is known to be inconsistent.
    fn add_clause(&mut self, lits: &[Lit]) -> bool;

    /// Add the parity constraint `vars[0] ^ ... ^ vars[n-1] == rhs`.
    fn add_xor_clause(&mut self, vars: &[u32], rhs: bool) -> bool;

    /// Solve under temporary assumptions. Returns the raw three-valued answer.
    fn solve(&mut self, assumptions: &[Lit]) -> LBool;

    /// Model of the last satisfiable `solve`, indexed by variable.
    fn model(&self) -> &[LBool];

    fn start_getting_small_clauses(&mut self, max_len: u32, max_glue: u32);

    /// Fill `out` with the next learnt clause. Returns `false` when there are no more.
    fn get_next_small_clause(&mut self, out: &mut Vec<Lit>) -> bool;

    fn end_getting_small_clauses(&mut self);
}
