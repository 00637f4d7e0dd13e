use std::path::PathBuf;

use clap::Parser;
use elapsed::measure_time;
use itertools::Itertools;
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use cryptosat_core::config::SolverConfig;
use cryptosat_core::dimacs::Dimacs;
use cryptosat_core::solution::{DenseSolution, Solution, SolutionFormat};
use cryptosat_core::types::SolveResponse;
use cryptosat_core::Solver;

#[derive(Parser, Debug)]
#[clap(author, version)]
struct Cli {
    /// DIMACS CNF file, may contain `x` XOR lines
    #[clap(parse(from_os_str), value_name = "FILE")]
    cnf: PathBuf,

    /// Verbosity of the engine, also raises the log level
    #[clap(short, long, default_value_t = 0)]
    verbose: i64,

    /// Time limit per solve call in seconds (0 = none)
    #[clap(long, default_value_t = 0.0)]
    time_limit: f64,

    /// Conflict limit per solve call (0 = none)
    #[clap(long, default_value_t = 0)]
    confl_limit: i64,

    /// Number of portfolio threads
    #[clap(short, long, default_value_t = 1)]
    threads: i64,

    /// Enumerate up to this many solutions
    #[clap(short = 'n', long, value_name = "INT")]
    max_solutions: Option<usize>,

    /// Variables the enumerated solutions must differ on (default: all)
    #[clap(long, value_name = "VARS", use_value_delimiter = true, allow_hyphen_values = true)]
    select: Vec<i64>,

    /// Print enumerated solutions as dense 0/1 strings
    #[clap(long)]
    dense: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let level = if args.verbose > 0 { LevelFilter::Debug } else { LevelFilter::Info };
    TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;
    info!("args = {:?}", args);

    let config = SolverConfig::from_host(args.verbose, args.time_limit, args.confl_limit, args.threads)?;
    let mut solver = Solver::from_config(&config);

    let (elapsed, dimacs) = measure_time(|| Dimacs::from_file(&args.cnf));
    let dimacs = dimacs?;
    info!(
        "Parsed {} clauses and {} XORs in {}",
        dimacs.clauses.len(),
        dimacs.xors.len(),
        elapsed
    );
    solver.add_dimacs(&dimacs)?;
    info!("solver = {}", solver);

    match args.max_solutions {
        Some(max_count) => enumerate(&args, &mut solver, max_count),
        None => solve_once(&mut solver),
    }
}

fn solve_once(solver: &mut Solver) -> color_eyre::Result<()> {
    let (elapsed, result) = measure_time(|| solver.solve(Vec::<i64>::new()));
    let (response, solution) = result?;
    info!("{} in {}", response, elapsed);

    match response {
        SolveResponse::Sat => {
            println!("s SATISFIABLE");
            if let Some(solution) = solution {
                print_values(&solution);
            }
        }
        SolveResponse::Unsat => println!("s UNSATISFIABLE"),
        SolveResponse::Unknown => println!("s INDETERMINATE"),
    }
    Ok(())
}

fn enumerate(args: &Cli, solver: &mut Solver, max_count: usize) -> color_eyre::Result<()> {
    let selected = if args.select.is_empty() {
        (1..=solver.nb_vars() as i64).collect_vec()
    } else {
        args.select.clone()
    };
    let format = SolutionFormat::from_raw_flag(!args.dense);

    let (elapsed, solutions) = measure_time(|| solver.msolve_selected(max_count, &selected, format));
    let solutions = solutions?;
    info!("Found {} solutions in {}", solutions.len(), elapsed);

    for solution in &solutions {
        match solution {
            Solution::Raw(s) => println!("v {} 0", s),
            Solution::Dense(s) => println!("v {}", s),
        }
    }
    println!("c solutions {}", solutions.len());
    Ok(())
}

fn print_values(solution: &DenseSolution) {
    let lits = solution
        .values()
        .enumerate()
        .filter_map(|(index, value)| {
            let var = index as i64 + 1;
            value.map(|v| if v { var } else { -var })
        })
        .collect_vec();
    for chunk in &lits.into_iter().chunks(10) {
        println!("v {}", chunk.map(|lit| lit.to_string()).join(" "));
    }
    println!("v 0");
}
