use std::os::raw::c_int;

use color_eyre::eyre::Result;
use test_log::test;

use cryptosat::core::config::SolverConfig;
use cryptosat::core::error::LitErrorKind;
use cryptosat::core::ingest::ClauseBatch;
use cryptosat::core::lit::RawLit;
use cryptosat::core::types::SolveResponse;
use cryptosat::{Solver, SolverError};

fn load(solver: &mut Solver, clauses: &[Vec<i64>]) -> Result<()> {
    for clause in clauses {
        solver.add_clause(clause)?;
    }
    Ok(())
}

/// Pigeons `1..=n+1` into holes `1..=n`.
fn pigeonhole(n: i64) -> Vec<Vec<i64>> {
    let var = |p: i64, h: i64| p * n + h + 1;
    let mut clauses: Vec<Vec<i64>> = (0..=n).map(|p| (0..n).map(|h| var(p, h)).collect()).collect();
    for h in 0..n {
        for p1 in 0..=n {
            for p2 in (p1 + 1)..=n {
                clauses.push(vec![-var(p1, h), -var(p2, h)]);
            }
        }
    }
    clauses
}

#[test]
fn test_solve_and_assumptions() -> Result<()> {
    let mut solver = Solver::new();
    load(&mut solver, &[vec![1], vec![-2], vec![3], vec![-1, 2, 3]])?;
    assert_eq!(solver.nb_vars(), 3);
    assert_eq!(solver.nb_clauses(), 4);

    let (response, solution) = solver.solve(Vec::<i64>::new())?;
    assert_eq!(response, SolveResponse::Sat);
    let solution = solution.unwrap();
    assert_eq!(solution.as_slice(), &[None, Some(true), Some(false), Some(true)]);
    assert_eq!(solution.get(2), Some(false));

    let (response, solution) = solver.solve([-3])?;
    assert_eq!(response, SolveResponse::Unsat);
    assert!(solution.is_none());

    // Assumptions do not persist:
    assert_eq!(solver.is_satisfiable()?, Some(true));
    Ok(())
}

#[test]
fn test_assumption_on_unknown_variable() -> Result<()> {
    let mut solver = Solver::new();
    solver.add_clause([1, 2])?;
    assert!(matches!(
        solver.solve([-3]),
        Err(SolverError::UnknownVariable { var: 3 })
    ));
    assert_eq!(solver.nb_vars(), 2);
    Ok(())
}

#[test]
fn test_invalid_literals() {
    let mut solver = Solver::new();
    assert!(matches!(
        solver.add_clause([1, 0]),
        Err(SolverError::InvalidLiteral {
            kind: LitErrorKind::Zero,
            ..
        })
    ));
    let err = solver.add_clause([1_073_741_824i64]).unwrap_err();
    assert_eq!(err.to_string(), "integer '1073741824' is too small or too large");
    assert!(solver.add_clause([-1_073_741_825i64]).is_err());
    assert_eq!(solver.nb_vars(), 0);
    assert_eq!(solver.nb_clauses(), 0);
}

#[test]
fn test_buffer_and_list_agree() -> Result<()> {
    let mut from_list = Solver::new();
    let clauses = vec![vec![1, -2], vec![2, 3]];
    from_list.add_clauses(ClauseBatch::List(&clauses), 0)?;

    let mut from_buffer = Solver::new();
    let buffer: &[c_int] = &[1, -2, 0, 0, 2, 3, 0];
    from_buffer.add_clauses(ClauseBatch::buffer(buffer), 0)?;

    assert_eq!(from_list.nb_clauses(), 2);
    assert_eq!(from_buffer.nb_clauses(), 2);
    assert_eq!(from_list.nb_vars(), from_buffer.nb_vars());

    for solver in [&mut from_list, &mut from_buffer] {
        let (_, solution) = solver.solve([-1])?;
        let solution = solution.unwrap();
        assert_eq!(solution.get(2), Some(false));
        assert_eq!(solution.get(3), Some(true));
    }
    Ok(())
}

#[test]
fn test_empty_clause_in_list() -> Result<()> {
    let mut solver = Solver::new();
    let clauses = vec![vec![1], vec![]];
    solver.add_clauses(ClauseBatch::List(&clauses), 0)?;
    assert_eq!(solver.nb_clauses(), 2);
    assert_eq!(solver.is_satisfiable()?, Some(false));
    Ok(())
}

#[test]
fn test_unterminated_buffer() {
    let mut solver = Solver::new();
    let buffer: &[c_int] = &[1, 2, 0, 3];
    let err = solver.add_clauses(ClauseBatch::buffer(buffer), 5).unwrap_err();
    assert_eq!(err.to_string(), "last clause not terminated by zero");
    assert_eq!(solver.nb_clauses(), 0);
    // Variables are declared before the buffer is checked:
    assert_eq!(solver.nb_vars(), 5);
}

#[test]
fn test_batch_is_not_atomic() {
    let mut solver = Solver::new();
    let clauses = vec![vec![1, 2], vec![3], vec![0], vec![4]];
    assert!(solver.add_clauses(ClauseBatch::List(&clauses), 0).is_err());
    assert_eq!(solver.nb_clauses(), 2);
    assert_eq!(solver.nb_vars(), 3);
}

#[test]
fn test_xor_clauses() -> Result<()> {
    let mut solver = Solver::new();
    assert!(matches!(
        solver.add_xor_clause([1, -2, 3], true),
        Err(SolverError::InvalidXorLiteral { value: -2 })
    ));
    assert_eq!(solver.nb_vars(), 0);
    assert_eq!(solver.nb_clauses(), 0);

    solver.add_xor_clause([1, 2, 3], true)?;
    solver.add_clause([1])?;
    solver.add_clause([-2])?;
    assert_eq!(solver.nb_vars(), 3);
    assert_eq!(solver.nb_clauses(), 3);

    let (response, solution) = solver.solve(Vec::<i64>::new())?;
    assert_eq!(response, SolveResponse::Sat);
    assert_eq!(solution.unwrap().get(3), Some(false));
    assert_eq!(solver.solve([3])?.0, SolveResponse::Unsat);
    Ok(())
}

#[test]
fn test_conflict_limit() -> Result<()> {
    let config = SolverConfig::from_host(0, 0.0, 1, 1)?;
    let mut solver = Solver::from_config(&config);
    load(&mut solver, &pigeonhole(6))?;

    let (response, solution) = solver.solve(Vec::<i64>::new())?;
    assert_eq!(response, SolveResponse::Unknown);
    assert!(solution.is_none());
    assert_eq!(solver.is_satisfiable()?, None);
    Ok(())
}

#[test]
fn test_huge_time_limit() -> Result<()> {
    let config = SolverConfig::from_host(0, 1e19, 0, 1)?;
    let mut solver = Solver::from_config(&config);
    solver.add_clause([1, 2])?;
    assert_eq!(solver.is_satisfiable()?, Some(true));
    Ok(())
}

#[test]
fn test_huge_thread_count() -> Result<()> {
    let config = SolverConfig::from_host(0, 0.0, 0, 1_000_000)?;
    let mut solver = Solver::from_config(&config);
    solver.add_clause([1, -2])?;
    solver.add_clause([2])?;
    let (_, solution) = solver.solve(Vec::<i64>::new())?;
    assert_eq!(solution.unwrap().get(1), Some(true));
    Ok(())
}

#[test]
fn test_host_batch_stops_at_non_integer() {
    let mut solver = Solver::new();
    let clauses = vec![
        vec![RawLit::Int(1)],
        vec![RawLit::Int(2), RawLit::NotInteger("'a'".to_string())],
        vec![RawLit::Int(3)],
    ];
    let err = solver.add_clauses(ClauseBatch::List(clauses), 0).unwrap_err();
    assert!(err.is_type_error());
    assert_eq!(err.to_string(), "integer expected");
    assert_eq!(solver.nb_clauses(), 1);
    assert_eq!(solver.nb_vars(), 1);
}

#[test]
fn test_threads() -> Result<()> {
    let config = SolverConfig::default().with_threads(3);
    let mut solver = Solver::from_config(&config);
    load(&mut solver, &pigeonhole(4))?;
    assert_eq!(solver.is_satisfiable()?, Some(false));
    Ok(())
}

#[test]
fn test_invalid_config() {
    let err = SolverConfig::from_host(-1, 0.0, 0, 1).unwrap_err();
    assert_eq!(err.to_string(), "verbosity must be at least 0");
    let err = SolverConfig::from_host(0, -1.0, 0, 1).unwrap_err();
    assert_eq!(err.to_string(), "time_limit must be at least 0");
    let err = SolverConfig::from_host(0, 0.0, -1, 1).unwrap_err();
    assert_eq!(err.to_string(), "conflict limit must be at least 0");
    let err = SolverConfig::from_host(0, 0.0, 0, 0).unwrap_err();
    assert_eq!(err.to_string(), "number of threads must be at least 1");
}

#[test]
fn test_display() -> Result<()> {
    let mut solver = Solver::new();
    solver.add_clause([1, -4])?;
    assert_eq!(solver.to_string(), "Solver(cryptosat-engine, vars=4, clauses=1)");
    Ok(())
}

mod props {
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    use cryptosat::Solver;

    #[quickcheck]
    fn prop_unit_clause_holds_in_model(x: i8) -> TestResult {
        if x == 0 {
            return TestResult::discard();
        }
        let mut solver = Solver::new();
        if solver.add_clause([x]).is_err() {
            return TestResult::failed();
        }
        match solver.solve(Vec::<i64>::new()) {
            Ok((_, Some(solution))) => {
                let var = x.unsigned_abs() as usize;
                TestResult::from_bool(solver.nb_vars() == var && solution.get(var) == Some(x > 0))
            }
            _ => TestResult::failed(),
        }
    }
}
