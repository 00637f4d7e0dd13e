use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Options {
    pub verbosity: u32,
    // Restart:
    pub restart_init: usize,
    pub restart_inc: f64,
    // Decisions:
    pub var_decay: f64,
    pub random_var_freq: f64,
    pub seed: u64,
    // ReduceDB:
    pub min_learnts_limit: usize,
    pub learntsize_factor: f64,
    pub learntsize_inc: f64,
    pub learntsize_adjust_start_confl: u64,
    pub learntsize_adjust_inc: f64,
    // Budgets, per `solve` call:
    pub max_time: Option<Duration>,
    pub max_conflicts: Option<u64>,
    // Portfolio:
    pub threads: usize,
}

pub const DEFAULT_OPTIONS: Options = Options {
    verbosity: 0,
    restart_init: 100,
    restart_inc: 2.0,
    var_decay: 0.95,
    random_var_freq: 0.0,
    seed: 91648253,
    min_learnts_limit: 1000,
    learntsize_factor: 1.0 / 3.0,
    learntsize_inc: 1.1,
    learntsize_adjust_start_confl: 100,
    learntsize_adjust_inc: 1.5,
    max_time: None,
    max_conflicts: None,
    threads: 1,
};

impl Default for Options {
    fn default() -> Self {
        DEFAULT_OPTIONS
    }
}
