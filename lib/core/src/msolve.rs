//! Enumeration of several solutions by banning each model found.

use log::debug;

use crate::engine::Engine;
use crate::error::{Result, UndeterminedSnafu};
use crate::ingest::parse_clause;
use crate::lit::{IntoRawLit, Lit};
use crate::solution::{Solution, SolutionFormat};
use crate::solver::Solver;
use crate::types::{LBool, SolveResponse};
use crate::varspace::VarSpace;

/// Clause forbidding `model` on the positively selected variables.
///
/// Each literal takes the variable's current truth value as its sign, so the
/// clause is false under `model`. Negated entries of `selected` are ignored.
pub fn blocking_clause(selected: &[Lit], model: &[LBool]) -> Vec<Lit> {
    selected
        .iter()
        .filter(|lit| !lit.negated())
        .map(|lit| {
            let value = model.get(lit.var() as usize).copied().unwrap_or(LBool::UNDEF);
            Lit::new(lit.var(), value == LBool::TRUE)
        })
        .collect()
}

impl<E: Engine> Solver<E> {
    /// Finds up to `max_nr_of_solutions` solutions that differ on `var_selected`.
    ///
    /// After each solution except the last one, a blocking clause over the
    /// selected variables is added permanently, even when it is empty.
    /// Stops early on UNSAT. An undetermined answer fails the whole call.
    pub fn msolve_selected<I>(
        &mut self,
        max_nr_of_solutions: usize,
        var_selected: I,
        format: SolutionFormat,
    ) -> Result<Vec<Solution>>
    where
        I: IntoIterator,
        I::Item: IntoRawLit,
    {
        let selected = parse_clause(var_selected)?;
        if !selected.lits.is_empty() {
            self.engine.ensure_capacity(selected.max_var);
        }

        let mut solutions = Vec::new();
        for round in 1..=max_nr_of_solutions {
            match self.run(&[])? {
                SolveResponse::Sat => {
                    solutions.push(Solution::from_model(self.model(), format)?);
                    if round < max_nr_of_solutions {
                        let ban = blocking_clause(&selected.lits, self.model());
                        debug!("Banning solution {} with a clause of size {}", round, ban.len());
                        self.engine.add_clause(&ban);
                    }
                }
                SolveResponse::Unsat => break,
                SolveResponse::Unknown => {
                    return UndeterminedSnafu {
                        found: solutions.len(),
                    }
                    .fail()
                }
            }
        }
        debug!("Enumerated {} solutions", solutions.len());
        Ok(solutions)
    }
}

#[cfg(test)]
mod tests {
    use color_eyre::eyre::Result;

    use super::*;
    use crate::error::SolverError;
    use crate::mock::MockEngine;
    use crate::solution::RawSolution;

    #[test]
    fn test_blocking_clause() {
        let selected = [Lit::new(0, false), Lit::new(1, true), Lit::new(2, false)];
        let model = [LBool::TRUE, LBool::TRUE, LBool::FALSE];
        assert_eq!(
            blocking_clause(&selected, &model),
            vec![Lit::new(0, true), Lit::new(2, false)]
        );
        assert!(blocking_clause(&[Lit::new(0, true)], &model).is_empty());
    }

    #[test]
    fn test_msolve_zero_solutions_requested() -> Result<()> {
        let mut solver = Solver::from_engine(MockEngine::new());
        let solutions = solver.msolve_selected(0, [1, 2], SolutionFormat::Raw)?;
        assert!(solutions.is_empty());
        assert!(solver.engine().solve_calls.is_empty());
        // Selected variables are declared anyway:
        assert_eq!(solver.nb_vars(), 2);
        Ok(())
    }

    #[test]
    fn test_msolve_bans_between_rounds() -> Result<()> {
        let mut solver = Solver::from_engine(MockEngine::new());
        solver.engine_mut().push_sat(&[true, false, true]);
        solver.engine_mut().push_sat(&[false, false, true]);

        let solutions = solver.msolve_selected(2, [1, -2, 3], SolutionFormat::Raw)?;
        assert_eq!(solutions.len(), 2);
        assert_eq!(solutions[0], Solution::Raw(RawSolution::from_model(&[LBool::TRUE, LBool::FALSE, LBool::TRUE])?));

        // One ban only, after the first round, and the negated selection is skipped:
        assert_eq!(solver.engine().clauses, vec![vec![Lit::new(0, true), Lit::new(2, true)]]);
        Ok(())
    }

    #[test]
    fn test_msolve_empty_ban_is_submitted() -> Result<()> {
        let mut solver = Solver::from_engine(MockEngine::new());
        solver.engine_mut().new_vars(1);
        solver.engine_mut().push_sat(&[true]);
        solver.engine_mut().push_unsat();

        let solutions = solver.msolve_selected(5, [-1], SolutionFormat::Dense)?;
        assert_eq!(solutions.len(), 1);
        assert_eq!(solver.engine().clauses, vec![Vec::<Lit>::new()]);
        assert_eq!(solver.engine().solve_calls.len(), 2);
        Ok(())
    }

    #[test]
    fn test_msolve_undetermined() {
        let mut solver = Solver::from_engine(MockEngine::new());
        solver.engine_mut().push_sat(&[true]);
        // The next answer is UNDEF.
        assert!(matches!(
            solver.msolve_selected(3, [1], SolutionFormat::Raw),
            Err(SolverError::Undetermined { found: 1 })
        ));
    }

    #[test]
    fn test_msolve_illegal_answer() {
        let mut solver = Solver::from_engine(MockEngine::new());
        solver.engine_mut().push_answer(LBool::from_raw(9), Vec::new());
        assert!(matches!(
            solver.msolve_selected(3, [1], SolutionFormat::Raw),
            Err(SolverError::IllegalEngineState { .. })
        ));
    }

    #[test]
    fn test_msolve_native_enumerates_all() -> Result<()> {
        let mut solver = Solver::new();
        solver.add_clause([1, 2])?;

        let solutions = solver.msolve_selected(1000, [1, 2], SolutionFormat::Raw)?;
        assert_eq!(solutions.len(), 3);
        let mut seen: Vec<String> = solutions.iter().map(|s| s.to_string()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 3);
        assert!(!seen.contains(&"-1 -2".to_string()));
        Ok(())
    }
}
