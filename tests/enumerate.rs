use color_eyre::eyre::Result;
use itertools::Itertools;
use test_log::test;

use cryptosat::core::config::SolverConfig;
use cryptosat::core::solution::{Solution, SolutionFormat};
use cryptosat::core::DEFAULT_MAX_GLUE;
use cryptosat::{Solver, SolverError};

fn raw(solution: &Solution) -> Vec<i64> {
    match solution {
        Solution::Raw(s) => s.as_slice().to_vec(),
        Solution::Dense(_) => panic!("expected a raw solution, got {:?}", solution),
    }
}

#[test]
fn test_enumerate_all_solutions() -> Result<()> {
    let mut solver = Solver::new();
    solver.add_clause([1, 2])?;

    let solutions = solver.msolve_selected(10, [1, 2], SolutionFormat::Raw)?;
    let found = solutions.iter().map(raw).sorted().collect_vec();
    assert_eq!(found, vec![vec![-1, 2], vec![1, -2], vec![1, 2]]);

    // Banning clauses stay:
    assert_eq!(solver.is_satisfiable()?, Some(false));
    Ok(())
}

#[test]
fn test_enumerate_dense() -> Result<()> {
    let mut solver = Solver::new();
    solver.add_clause([-1])?;
    solver.add_clause([2, 3])?;
    solver.add_clause([-2, -3])?;

    let solutions = solver.msolve_selected(5, [2], SolutionFormat::Dense)?;
    assert_eq!(solutions.len(), 2);
    for solution in &solutions {
        match solution {
            Solution::Dense(s) => {
                assert_eq!(s.as_slice()[0], None);
                assert_eq!(s.get(1), Some(false));
                assert_ne!(s.get(2), s.get(3));
            }
            Solution::Raw(_) => panic!("expected a dense solution"),
        }
    }
    Ok(())
}

#[test]
fn test_enumerate_stops_at_max_count() -> Result<()> {
    let mut solver = Solver::new();
    solver.add_clause([1, 2, 3])?;

    let solutions = solver.msolve_selected(2, [1, 2, 3], SolutionFormat::Raw)?;
    assert_eq!(solutions.len(), 2);
    assert_ne!(raw(&solutions[0]), raw(&solutions[1]));
    // Only the first solution was banned:
    assert_eq!(solver.nb_clauses(), 2);
    Ok(())
}

#[test]
fn test_enumerate_grows_selected_variables() -> Result<()> {
    let mut solver = Solver::new();
    solver.add_clause([1])?;

    let solutions = solver.msolve_selected(10, [1, 3], SolutionFormat::Raw)?;
    assert_eq!(solver.nb_vars(), 3);
    // Variable 2 is free but not selected, so only variable 3 splits solutions:
    assert_eq!(solutions.len(), 2);
    Ok(())
}

#[test]
fn test_enumerate_undetermined() -> Result<()> {
    let config = SolverConfig::default().with_conflict_limit(1);
    let mut solver = Solver::from_config(&config);
    // Pigeons 1..=7 into holes 1..=6.
    let n = 6;
    let var = |p: i64, h: i64| p * n + h + 1;
    for p in 0..=n {
        solver.add_clause((0..n).map(|h| var(p, h)))?;
    }
    for h in 0..n {
        for p1 in 0..=n {
            for p2 in (p1 + 1)..=n {
                solver.add_clause([-var(p1, h), -var(p2, h)])?;
            }
        }
    }

    let result = solver.msolve_selected(3, [1, 2], SolutionFormat::Raw);
    assert!(matches!(result, Err(SolverError::Undetermined { found: 0 })));
    Ok(())
}

#[test]
fn test_learnt_clause_cursor() -> Result<()> {
    let mut solver = Solver::new();
    assert!(matches!(solver.get_next_small_clause(), Err(SolverError::NoActiveCursor)));

    // Pigeons 1..=5 into holes 1..=4.
    let n = 4;
    let var = |p: i64, h: i64| p * n + h + 1;
    for p in 0..=n {
        solver.add_clause((0..n).map(|h| var(p, h)))?;
    }
    for h in 0..n {
        for p1 in 0..=n {
            for p2 in (p1 + 1)..=n {
                solver.add_clause([-var(p1, h), -var(p2, h)])?;
            }
        }
    }
    assert_eq!(solver.is_satisfiable()?, Some(false));

    solver.start_getting_small_clauses(3, DEFAULT_MAX_GLUE);
    while let Some(clause) = solver.get_next_small_clause()? {
        assert!(!clause.is_empty());
        assert!(clause.len() <= 3);
        assert!(clause.iter().all(|lit| (lit.var() as usize) < solver.nb_vars()));
    }
    // Exhausted traversal keeps answering `None`:
    assert_eq!(solver.get_next_small_clause()?, None);

    solver.end_getting_small_clauses();
    solver.end_getting_small_clauses();
    assert!(matches!(solver.get_next_small_clause(), Err(SolverError::NoActiveCursor)));
    Ok(())
}
