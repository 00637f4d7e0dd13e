use std::fmt::{Display, Formatter};
use std::time::Instant;

use log::{debug, info};

use crate::backend::NativeEngine;
use crate::config::SolverConfig;
use crate::cursor::LearntCursor;
use crate::engine::Engine;
use crate::error::Result;
use crate::ingest::{parse_assumptions, parse_clause, ClauseBatch, ClauseSource, ParsedClause};
use crate::lit::{IntoRawLit, Lit};
use crate::solution::{DenseSolution, Solution, SolutionFormat};
use crate::types::{LBool, SolveResponse};
use crate::varspace::VarSpace;
use crate::xor::parse_xor_clause;

/// Incremental SAT solver taking loosely-typed literals.
///
/// Owns its engine exclusively. Literals are validated and decoded before
/// anything reaches the engine, and the variable space grows on demand.
pub struct Solver<E = NativeEngine> {
    pub(crate) engine: E,
    pub(crate) cursor: LearntCursor,
}

impl Solver<NativeEngine> {
    pub fn new() -> Self {
        Self::from_config(&SolverConfig::default())
    }

    pub fn from_config(config: &SolverConfig) -> Self {
        Self::with_config(NativeEngine::new(), config)
    }
}

impl Default for Solver<NativeEngine> {
    fn default() -> Self {
        Solver::new()
    }
}

impl<E: Engine> Solver<E> {
    /// Wraps `engine` as is, without touching its limits.
    pub fn from_engine(engine: E) -> Self {
        Self {
            engine,
            cursor: LearntCursor::default(),
        }
    }

    pub fn with_config(mut engine: E, config: &SolverConfig) -> Self {
        debug!("Configuring {} with {:?}", engine.signature(), config);
        config.apply(&mut engine);
        Self::from_engine(engine)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn into_engine(self) -> E {
        self.engine
    }

    pub fn nb_vars(&self) -> usize {
        self.engine.num_vars()
    }

    pub fn nb_clauses(&self) -> usize {
        self.engine.num_clauses()
    }

    /// Declares variables up to `count` (1-based) if fewer exist.
    pub fn reserve_vars(&mut self, count: usize) {
        self.engine.reserve_vars(count);
    }

    /// Adds one clause. Nothing is submitted if any literal is invalid.
    /// An empty clause is submitted as is and makes the problem UNSAT.
    pub fn add_clause<I>(&mut self, lits: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoRawLit,
    {
        let parsed = parse_clause(lits)?;
        self.submit_clause(&parsed);
        Ok(())
    }

    /// Adds a batch of clauses after declaring at least `max_var` variables.
    ///
    /// Clauses are submitted one by one: on error, the clauses before the
    /// failing one stay in the solver. A buffer that does not end with zero
    /// is rejected before any clause is submitted.
    pub fn add_clauses<B>(&mut self, batch: ClauseBatch<'_, B>, max_var: usize) -> Result<()>
    where
        B: IntoIterator,
        B::Item: IntoIterator,
        <B::Item as IntoIterator>::Item: IntoRawLit,
    {
        self.reserve_vars(max_var);
        let mut count = 0;
        for parsed in ClauseSource::new(batch)? {
            self.submit_clause(&parsed?);
            count += 1;
        }
        debug!("Added a batch of {} clauses, {} vars", count, self.nb_vars());
        Ok(())
    }

    pub(crate) fn submit_clause(&mut self, parsed: &ParsedClause) {
        if !parsed.lits.is_empty() {
            self.engine.ensure_capacity(parsed.max_var);
        }
        self.engine.add_clause(&parsed.lits);
    }

    /// Adds the constraint "the XOR of the given variables equals `rhs`".
    /// Every entry must be a positive literal.
    pub fn add_xor_clause<I>(&mut self, lits: I, rhs: bool) -> Result<()>
    where
        I: IntoIterator,
        I::Item: IntoRawLit,
    {
        let parsed = parse_xor_clause(lits)?;
        if let Some(max_var) = parsed.max_var {
            self.engine.ensure_capacity(max_var);
        }
        self.engine.add_xor_clause(&parsed.vars, rhs);
        Ok(())
    }

    /// Solves under temporary assumptions, which must refer to existing variables.
    /// Returns the dense solution when satisfiable.
    pub fn solve<I>(&mut self, assumptions: I) -> Result<(SolveResponse, Option<DenseSolution>)>
    where
        I: IntoIterator,
        I::Item: IntoRawLit,
    {
        let assumptions = parse_assumptions(assumptions, self.nb_vars())?;
        let response = self.run(&assumptions)?;
        let solution = match response {
            SolveResponse::Sat => Some(DenseSolution::from_model(self.engine.model())?),
            _ => None,
        };
        Ok((response, solution))
    }

    /// Solves without assumptions: `Some(true)` if SAT, `Some(false)` if UNSAT, `None` if undetermined.
    pub fn is_satisfiable(&mut self) -> Result<Option<bool>> {
        Ok(self.run(&[])?.to_option())
    }

    /// Model of the last satisfiable solve in the requested format.
    pub fn solution(&self, format: SolutionFormat) -> Result<Solution> {
        Solution::from_model(self.engine.model(), format)
    }

    pub(crate) fn model(&self) -> &[LBool] {
        self.engine.model()
    }

    pub(crate) fn run(&mut self, assumptions: &[Lit]) -> Result<SolveResponse> {
        let start = Instant::now();
        let raw = self.engine.solve(assumptions);
        let response = SolveResponse::try_from(raw)?;
        info!(
            "{} in {:.3} s ({} vars, {} clauses, {} assumptions)",
            response,
            start.elapsed().as_secs_f64(),
            self.nb_vars(),
            self.nb_clauses(),
            assumptions.len()
        );
        Ok(response)
    }
}

impl<E: Engine> Display for Solver<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Solver({}, vars={}, clauses={})",
            self.engine.signature(),
            self.nb_vars(),
            self.nb_clauses()
        )
    }
}
