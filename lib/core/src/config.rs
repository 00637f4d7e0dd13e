use snafu::ensure;

use crate::engine::Engine;
use crate::error::{InvalidConfigSnafu, Result};

/// Construction parameters of a [`Solver`](crate::solver::Solver).
///
/// `0` disables the corresponding limit.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    pub verbosity: u32,
    /// Seconds of wall-clock time per solve call.
    pub time_limit: f64,
    /// Conflicts per solve call.
    pub conflict_limit: u64,
    pub threads: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            time_limit: 0.0,
            conflict_limit: 0,
            threads: 1,
        }
    }
}

impl SolverConfig {
    /// Validates loosely-typed host arguments.
    pub fn from_host(verbose: i64, time_limit: f64, confl_limit: i64, threads: i64) -> Result<Self> {
        ensure!(
            verbose >= 0,
            InvalidConfigSnafu {
                message: "verbosity must be at least 0"
            }
        );
        ensure!(
            time_limit >= 0.0,
            InvalidConfigSnafu {
                message: "time_limit must be at least 0"
            }
        );
        ensure!(
            confl_limit >= 0,
            InvalidConfigSnafu {
                message: "conflict limit must be at least 0"
            }
        );
        ensure!(
            threads > 0,
            InvalidConfigSnafu {
                message: "number of threads must be at least 1"
            }
        );
        Ok(Self {
            verbosity: u32::try_from(verbose).unwrap_or(u32::MAX),
            time_limit,
            conflict_limit: confl_limit as u64,
            threads: usize::try_from(threads).unwrap_or(usize::MAX),
        })
    }

    pub fn with_verbosity(mut self, verbosity: u32) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_time_limit(mut self, seconds: f64) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn with_conflict_limit(mut self, conflicts: u64) -> Self {
        self.conflict_limit = conflicts;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Pushes the non-default limits into `engine`. The thread count is always applied.
    pub fn apply<E: Engine>(&self, engine: &mut E) {
        if self.time_limit > 0.0 {
            engine.set_max_time(self.time_limit);
        }
        if self.conflict_limit > 0 {
            engine.set_max_confl(self.conflict_limit);
        }
        if self.verbosity > 0 {
            engine.set_verbosity(self.verbosity);
        }
        engine.set_num_threads(self.threads);
    }
}
