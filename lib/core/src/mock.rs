use std::borrow::Cow;
use std::collections::VecDeque;

use crate::engine::Engine;
use crate::lit::Lit;
use crate::types::LBool;

/// Scripted engine: records every call and answers `solve` from a queue.
/// An exhausted queue answers UNDEF.
#[derive(Debug, Default)]
pub struct MockEngine {
    pub verbosity: Option<u32>,
    pub max_time: Option<f64>,
    pub max_confl: Option<u64>,
    pub threads: Option<usize>,
    pub num_vars: usize,
    pub clauses: Vec<Vec<Lit>>,
    pub xors: Vec<(Vec<u32>, bool)>,
    pub solve_calls: Vec<Vec<Lit>>,
    pub small_clauses: Vec<Vec<Lit>>,
    answers: VecDeque<(LBool, Vec<LBool>)>,
    model: Vec<LBool>,
    cursor: Option<VecDeque<Vec<Lit>>>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_answer(&mut self, answer: LBool, model: Vec<LBool>) {
        self.answers.push_back((answer, model));
    }

    pub fn push_sat(&mut self, model: &[bool]) {
        self.push_answer(LBool::TRUE, model.iter().map(|&b| LBool::from(b)).collect());
    }

    pub fn push_unsat(&mut self) {
        self.push_answer(LBool::FALSE, Vec::new());
    }
}

impl Engine for MockEngine {
    fn signature(&self) -> Cow<str> {
        "mock".into()
    }

    fn set_verbosity(&mut self, verbosity: u32) {
        self.verbosity = Some(verbosity);
    }

    fn set_max_time(&mut self, seconds: f64) {
        self.max_time = Some(seconds);
    }

    fn set_max_confl(&mut self, conflicts: u64) {
        self.max_confl = Some(conflicts);
    }

    fn set_num_threads(&mut self, threads: usize) {
        self.threads = Some(threads);
    }

    fn new_vars(&mut self, n: usize) {
        self.num_vars += n;
    }

    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn num_clauses(&self) -> usize {
        self.clauses.len() + self.xors.len()
    }

    fn add_clause(&mut self, lits: &[Lit]) -> bool {
        self.clauses.push(lits.to_vec());
        true
    }

    fn add_xor_clause(&mut self, vars: &[u32], rhs: bool) -> bool {
        self.xors.push((vars.to_vec(), rhs));
        true
    }

    fn solve(&mut self, assumptions: &[Lit]) -> LBool {
        self.solve_calls.push(assumptions.to_vec());
        let (answer, model) = self.answers.pop_front().unwrap_or((LBool::UNDEF, Vec::new()));
        self.model = model;
        answer
    }

    fn model(&self) -> &[LBool] {
        &self.model
    }

    fn start_getting_small_clauses(&mut self, max_len: u32, _max_glue: u32) {
        let clauses = self
            .small_clauses
            .iter()
            .filter(|c| c.len() <= max_len as usize)
            .cloned()
            .collect();
        self.cursor = Some(clauses);
    }

    fn get_next_small_clause(&mut self, out: &mut Vec<Lit>) -> bool {
        out.clear();
        match self.cursor.as_mut().and_then(|c| c.pop_front()) {
            Some(clause) => {
                out.extend(clause);
                true
            }
            None => false,
        }
    }

    fn end_getting_small_clauses(&mut self) {
        self.cursor = None;
    }
}
