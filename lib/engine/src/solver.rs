use std::cmp::Reverse;
use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::clause::{Clause, ClauseRef};
use crate::lbool::LBool;
use crate::lit::Lit;
use crate::options::Options;
use crate::utils::luby;
use crate::var::Var;
use crate::var_order::VarOrder;
use crate::xor::{normalize_xor_vars, XorConstraint, XorStatus};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolveResult {
    Sat,
    Unsat,
    Unknown,
}

#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub decisions: u64,
    pub propagations: u64,
    pub conflicts: u64,
    pub restarts: u64,
    pub learnts: u64,
    pub reductions: u64,
    pub solves: u64,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Reason {
    Clause(ClauseRef),
    Xor(usize),
}

#[derive(Debug, Copy, Clone)]
struct VarData {
    reason: Option<Reason>,
    level: usize,
}

enum SearchOutcome {
    Sat,
    Unsat,
    Restart,
    Interrupted,
}

/// Resource limits of one `solve` call.
struct Budget<'a> {
    deadline: Option<Instant>,
    conflict_limit: Option<u64>,
    stop: Option<&'a AtomicBool>,
}

impl<'a> Budget<'a> {
    fn new(opts: &Options, conflicts_so_far: u64, stop: Option<&'a AtomicBool>) -> Self {
        Self {
            // A deadline beyond the representable range is no deadline at all.
            deadline: opts.max_time.and_then(|d| Instant::now().checked_add(d)),
            conflict_limit: opts.max_conflicts.map(|c| conflicts_so_far.saturating_add(c)),
            stop,
        }
    }

    fn exhausted(&self, conflicts: u64) -> bool {
        if let Some(limit) = self.conflict_limit {
            if conflicts >= limit {
                return true;
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return true;
            }
        }
        self.stop.map_or(false, |s| s.load(Ordering::Relaxed))
    }
}

#[inline]
fn lit_value(assigns: &[LBool], lit: Lit) -> LBool {
    assigns[lit.var().index()] ^ lit.negated()
}

/// Incremental CDCL solver with native XOR constraints.
#[derive(Debug, Clone)]
pub struct Solver {
    opts: Options,
    clauses: Vec<Clause>,
    learnts: Vec<ClauseRef>,
    learnt_units: Vec<Lit>,
    num_added: usize,
    xors: Vec<XorConstraint>,
    xor_occurs: Vec<Vec<usize>>,
    watches: Vec<Vec<ClauseRef>>,
    assigns: Vec<LBool>,
    var_data: Vec<VarData>,
    polarity: Vec<bool>,
    seen: Vec<bool>,
    order: VarOrder,
    trail: Vec<Lit>,
    trail_lim: Vec<usize>,
    qhead: usize,
    ok: bool,
    model: Vec<LBool>,
    max_learnts: f64,
    learntsize_adjust_confl: f64,
    learntsize_adjust_cnt: u64,
    rng: StdRng,
    cursor: Option<VecDeque<Vec<Lit>>>,
    stats: Stats,
}

impl Solver {
    pub fn new(opts: Options) -> Self {
        let rng = StdRng::seed_from_u64(opts.seed);
        let order = VarOrder::new(opts.var_decay);
        Self {
            opts,
            clauses: Vec::new(),
            learnts: Vec::new(),
            learnt_units: Vec::new(),
            num_added: 0,
            xors: Vec::new(),
            xor_occurs: Vec::new(),
            watches: Vec::new(),
            assigns: Vec::new(),
            var_data: Vec::new(),
            polarity: Vec::new(),
            seen: Vec::new(),
            order,
            trail: Vec::new(),
            trail_lim: Vec::new(),
            qhead: 0,
            ok: true,
            model: Vec::new(),
            max_learnts: 0.0,
            learntsize_adjust_confl: 0.0,
            learntsize_adjust_cnt: 0,
            rng,
            cursor: None,
            stats: Stats::default(),
        }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.opts
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn num_vars(&self) -> usize {
        self.assigns.len()
    }

    /// Clauses and XOR constraints accepted through [`Solver::add_clause`] and [`Solver::add_xor_clause`].
    pub fn num_clauses(&self) -> usize {
        self.num_added
    }

    pub fn num_learnts(&self) -> usize {
        self.learnts.len() + self.learnt_units.len()
    }

    /// `false` once the clause database is known to be unsatisfiable.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Model of the last satisfiable `solve`, one entry per variable.
    pub fn model(&self) -> &[LBool] {
        &self.model
    }

    pub fn new_var(&mut self) -> Var {
        let var = Var::new(self.num_vars() as u32);
        self.assigns.push(LBool::Undef);
        self.var_data.push(VarData { reason: None, level: 0 });
        self.polarity.push(true);
        self.seen.push(false);
        self.watches.push(Vec::new());
        self.watches.push(Vec::new());
        self.xor_occurs.push(Vec::new());
        self.order.grow();
        self.order.insert(var);
        var
    }

    pub fn new_vars(&mut self, n: usize) {
        for _ in 0..n {
            self.new_var();
        }
    }

    fn ensure_var(&mut self, var: Var) {
        while self.num_vars() <= var.index() {
            self.new_var();
        }
    }

    fn decision_level(&self) -> usize {
        self.trail_lim.len()
    }

    fn value(&self, lit: Lit) -> LBool {
        lit_value(&self.assigns, lit)
    }

    fn level(&self, var: Var) -> usize {
        self.var_data[var.index()].level
    }

    fn enqueue(&mut self, lit: Lit, reason: Option<Reason>) {
        debug_assert!(self.value(lit).is_undef());
        let var = lit.var();
        self.assigns[var.index()] = LBool::from(!lit.negated());
        self.var_data[var.index()] = VarData {
            reason,
            level: self.decision_level(),
        };
        self.trail.push(lit);
    }

    fn new_decision_level(&mut self) {
        self.trail_lim.push(self.trail.len());
    }

    fn cancel_until(&mut self, level: usize) {
        if self.decision_level() > level {
            let lim = self.trail_lim[level];
            for lit in self.trail.drain(lim..).rev() {
                let v = lit.var().index();
                self.assigns[v] = LBool::Undef;
                self.var_data[v].reason = None;
                self.polarity[v] = lit.negated();
                self.order.insert(lit.var());
            }
            self.qhead = lim;
            self.trail_lim.truncate(level);
        }
    }

    /// Adds a clause at the root level. Returns `false` if the solver became inconsistent.
    pub fn add_clause(&mut self, lits: &[Lit]) -> bool {
        for lit in lits {
            self.ensure_var(lit.var());
        }
        self.num_added += 1;
        if !self.ok {
            return false;
        }
        debug_assert_eq!(self.decision_level(), 0);

        let mut clause = lits.to_vec();
        clause.sort_unstable();
        clause.dedup();

        // Tautologies (x and !x are adjacent after sorting) and satisfied clauses are dropped:
        if clause.windows(2).any(|w| w[0] == !w[1]) {
            return true;
        }
        if clause.iter().any(|&lit| self.value(lit) == LBool::True) {
            return true;
        }
        clause.retain(|&lit| lit_value(&self.assigns, lit) != LBool::False);

        match clause.len() {
            0 => self.ok = false,
            1 => {
                self.enqueue(clause[0], None);
                if self.propagate().is_some() {
                    self.ok = false;
                }
            }
            _ => {
                let cref = self.alloc_clause(clause, false, 0);
                self.attach(cref);
            }
        }
        self.ok
    }

    /// Adds the parity constraint `vars[0] ^ ... ^ vars[n-1] == rhs`.
    pub fn add_xor_clause(&mut self, vars: &[Var], rhs: bool) -> bool {
        for &var in vars {
            self.ensure_var(var);
        }
        self.num_added += 1;
        if !self.ok {
            return false;
        }

        let mut rhs = rhs;
        let mut free = Vec::new();
        for var in normalize_xor_vars(vars.to_vec()) {
            match self.assigns[var.index()] {
                LBool::Undef => free.push(var),
                value => rhs ^= value == LBool::True,
            }
        }

        match free.len() {
            0 => {
                if rhs {
                    self.ok = false;
                }
            }
            1 => {
                self.enqueue(Lit::new(free[0], !rhs), None);
                if self.propagate().is_some() {
                    self.ok = false;
                }
            }
            _ => {
                let index = self.xors.len();
                for var in &free {
                    self.xor_occurs[var.index()].push(index);
                }
                self.xors.push(XorConstraint { vars: free, rhs });
            }
        }
        self.ok
    }

    fn alloc_clause(&mut self, lits: Vec<Lit>, learnt: bool, glue: u32) -> ClauseRef {
        let cref = ClauseRef(self.clauses.len());
        self.clauses.push(Clause::new(lits, learnt, glue));
        cref
    }

    fn attach(&mut self, cref: ClauseRef) {
        let clause = &self.clauses[cref.0];
        debug_assert!(clause.len() >= 2);
        let (a, b) = (clause[0], clause[1]);
        self.watches[a.index()].push(cref);
        self.watches[b.index()].push(cref);
    }

    fn locked(&self, cref: ClauseRef) -> bool {
        let first = self.clauses[cref.0][0];
        self.value(first) == LBool::True
            && self.var_data[first.var().index()].reason == Some(Reason::Clause(cref))
    }

    /// Unit propagation over clauses and XOR constraints. Returns the conflicting constraint, if any.
    fn propagate(&mut self) -> Option<Reason> {
        while self.qhead < self.trail.len() {
            let p = self.trail[self.qhead];
            self.qhead += 1;
            self.stats.propagations += 1;

            if let Some(conflict) = self.propagate_clauses(!p) {
                self.qhead = self.trail.len();
                return Some(conflict);
            }
            if let Some(conflict) = self.propagate_xors(p.var()) {
                self.qhead = self.trail.len();
                return Some(conflict);
            }
        }
        None
    }

    fn propagate_clauses(&mut self, false_lit: Lit) -> Option<Reason> {
        let mut ws = mem::take(&mut self.watches[false_lit.index()]);
        let mut conflict = None;
        let mut i = 0;
        let mut j = 0;

        'watches: while i < ws.len() {
            let cref = ws[i];
            i += 1;

            let clause = &mut self.clauses[cref.0];
            if clause.is_deleted() {
                continue;
            }
            // Make sure the false literal is at position 1:
            if clause.lits[0] == false_lit {
                clause.lits.swap(0, 1);
            }
            let first = clause.lits[0];
            if lit_value(&self.assigns, first) == LBool::True {
                ws[j] = cref;
                j += 1;
                continue;
            }

            // Look for a new watch:
            for k in 2..clause.lits.len() {
                if lit_value(&self.assigns, clause.lits[k]) != LBool::False {
                    clause.lits.swap(1, k);
                    self.watches[clause.lits[1].index()].push(cref);
                    continue 'watches;
                }
            }

            // Clause is unit or conflicting under the current assignment:
            ws[j] = cref;
            j += 1;
            if lit_value(&self.assigns, first) == LBool::False {
                conflict = Some(Reason::Clause(cref));
                while i < ws.len() {
                    ws[j] = ws[i];
                    j += 1;
                    i += 1;
                }
            } else {
                self.enqueue(first, Some(Reason::Clause(cref)));
            }
        }

        ws.truncate(j);
        self.watches[false_lit.index()] = ws;
        conflict
    }

    fn propagate_xors(&mut self, var: Var) -> Option<Reason> {
        for k in 0..self.xor_occurs[var.index()].len() {
            let index = self.xor_occurs[var.index()][k];
            match self.check_xor(index) {
                XorStatus::Open => {}
                XorStatus::Unit(lit) => self.enqueue(lit, Some(Reason::Xor(index))),
                XorStatus::Conflict => return Some(Reason::Xor(index)),
            }
        }
        None
    }

    fn check_xor(&self, index: usize) -> XorStatus {
        let xor = &self.xors[index];
        let mut parity = false;
        let mut unassigned = None;
        for &var in &xor.vars {
            match self.assigns[var.index()] {
                LBool::Undef => {
                    if unassigned.is_some() {
                        return XorStatus::Open;
                    }
                    unassigned = Some(var);
                }
                LBool::True => parity = !parity,
                LBool::False => {}
            }
        }
        match unassigned {
            Some(var) => XorStatus::Unit(Lit::new(var, parity == xor.rhs)),
            None if parity != xor.rhs => XorStatus::Conflict,
            None => XorStatus::Open,
        }
    }

    /// False literals of `reason`, excluding the one it implied.
    /// XOR explanations are built on demand from the current assignment.
    fn explain(&self, reason: Reason, implied: Option<Var>) -> Vec<Lit> {
        match reason {
            Reason::Clause(cref) => self.clauses[cref.0]
                .lits()
                .iter()
                .copied()
                .filter(|lit| Some(lit.var()) != implied)
                .collect(),
            Reason::Xor(index) => self.xors[index]
                .vars
                .iter()
                .copied()
                .filter(|&var| Some(var) != implied)
                .map(|var| Lit::new(var, self.assigns[var.index()] == LBool::True))
                .collect(),
        }
    }

    /// First-UIP conflict analysis. Returns the learnt clause (asserting literal first),
    /// the backtrack level and the glue.
    fn analyze(&mut self, conflict: Reason) -> (Vec<Lit>, usize, u32) {
        let mut learnt = vec![Lit::new(Var::new(0), false)];
        let mut path_count = 0;
        let mut index = self.trail.len();
        let mut reason_lits = self.explain(conflict, None);
        let current_level = self.decision_level();

        let uip = loop {
            for &q in &reason_lits {
                let v = q.var();
                if !self.seen[v.index()] && self.level(v) > 0 {
                    self.seen[v.index()] = true;
                    self.order.bump(v);
                    if self.level(v) >= current_level {
                        path_count += 1;
                    } else {
                        learnt.push(q);
                    }
                }
            }

            // Select the next literal to look at:
            loop {
                index -= 1;
                if self.seen[self.trail[index].var().index()] {
                    break;
                }
            }
            let p = self.trail[index];
            self.seen[p.var().index()] = false;
            path_count -= 1;
            if path_count == 0 {
                break p;
            }
            let reason = self.var_data[p.var().index()]
                .reason
                .expect("implied literal must have a reason");
            reason_lits = self.explain(reason, Some(p.var()));
        };
        learnt[0] = !uip;

        for lit in &learnt[1..] {
            self.seen[lit.var().index()] = false;
        }

        // Find the backtrack level, moving its literal to position 1:
        let backtrack_level = if learnt.len() == 1 {
            0
        } else {
            let (max_i, _) = learnt
                .iter()
                .enumerate()
                .skip(1)
                .max_by_key(|(_, lit)| self.level(lit.var()))
                .expect("learnt clause has at least two literals");
            learnt.swap(1, max_i);
            self.level(learnt[1].var())
        };

        let glue = learnt.iter().map(|lit| self.level(lit.var())).unique().count() as u32;

        (learnt, backtrack_level, glue)
    }

    fn record_learnt(&mut self, learnt: Vec<Lit>, glue: u32) {
        self.stats.learnts += 1;
        if learnt.len() == 1 {
            self.learnt_units.push(learnt[0]);
            self.enqueue(learnt[0], None);
        } else {
            let asserting = learnt[0];
            let cref = self.alloc_clause(learnt, true, glue);
            self.attach(cref);
            self.learnts.push(cref);
            self.enqueue(asserting, Some(Reason::Clause(cref)));
        }
    }

    /// Drops the high-glue half of the learnt clauses. Clauses with glue at most 2,
    /// binary clauses and reasons are kept.
    fn reduce_db(&mut self) {
        let mut learnts = mem::take(&mut self.learnts);
        learnts.sort_by_key(|cref| {
            let c = &self.clauses[cref.0];
            Reverse((c.glue(), c.len()))
        });

        let half = learnts.len() / 2;
        let mut kept = Vec::with_capacity(learnts.len() - half);
        for (i, cref) in learnts.into_iter().enumerate() {
            let c = &self.clauses[cref.0];
            if i < half && c.glue() > 2 && c.len() > 2 && !self.locked(cref) {
                self.clauses[cref.0].mark_deleted();
            } else {
                kept.push(cref);
            }
        }
        trace!("reduce_db: {} learnts left", kept.len());
        self.learnts = kept;
        self.stats.reductions += 1;
        self.collect_garbage();
    }

    /// Drops deleted clauses from the store and relocates every reference to the survivors.
    fn collect_garbage(&mut self) {
        let old = mem::take(&mut self.clauses);
        let mut relocated = Vec::with_capacity(old.len());
        for clause in old {
            if clause.is_deleted() {
                relocated.push(None);
            } else {
                relocated.push(Some(ClauseRef(self.clauses.len())));
                self.clauses.push(clause);
            }
        }

        for ws in self.watches.iter_mut() {
            *ws = ws.iter().filter_map(|cref| relocated[cref.0]).collect();
        }
        self.learnts = self.learnts.iter().filter_map(|cref| relocated[cref.0]).collect();
        for data in self.var_data.iter_mut() {
            if let Some(Reason::Clause(cref)) = data.reason {
                data.reason = relocated[cref.0].map(Reason::Clause);
            }
        }
    }

    fn pick_branch_lit(&mut self) -> Option<Lit> {
        if self.opts.random_var_freq > 0.0
            && !self.order.is_empty()
            && self.rng.gen::<f64>() < self.opts.random_var_freq
        {
            let var = self.order.at(self.rng.gen_range(0..self.order.len()));
            if self.assigns[var.index()].is_undef() {
                return Some(Lit::new(var, self.polarity[var.index()]));
            }
        }

        while let Some(var) = self.order.pop() {
            if self.assigns[var.index()].is_undef() {
                return Some(Lit::new(var, self.polarity[var.index()]));
            }
        }
        None
    }

    fn search(&mut self, nof_conflicts: usize, assumptions: &[Lit], budget: &Budget) -> SearchOutcome {
        trace!("search(nof_conflicts = {})", nof_conflicts);
        let mut conflicts_here = 0;

        loop {
            if let Some(conflict) = self.propagate() {
                self.stats.conflicts += 1;
                conflicts_here += 1;
                if self.decision_level() == 0 {
                    self.ok = false;
                    return SearchOutcome::Unsat;
                }

                let (learnt, backtrack_level, glue) = self.analyze(conflict);
                self.cancel_until(backtrack_level);
                self.record_learnt(learnt, glue);
                self.order.decay();

                self.learntsize_adjust_cnt = self.learntsize_adjust_cnt.saturating_sub(1);
                if self.learntsize_adjust_cnt == 0 {
                    self.learntsize_adjust_confl *= self.opts.learntsize_adjust_inc;
                    self.learntsize_adjust_cnt = self.learntsize_adjust_confl as u64;
                    self.max_learnts *= self.opts.learntsize_inc;
                    trace!("max_learnts = {:.0}", self.max_learnts);
                }

                if budget.exhausted(self.stats.conflicts) {
                    return SearchOutcome::Interrupted;
                }
            } else {
                if conflicts_here >= nof_conflicts {
                    self.cancel_until(0);
                    return SearchOutcome::Restart;
                }
                if budget.exhausted(self.stats.conflicts) {
                    return SearchOutcome::Interrupted;
                }
                if self.learnts.len() as f64 - self.trail.len() as f64 >= self.max_learnts {
                    self.reduce_db();
                }

                let mut next = None;
                while self.decision_level() < assumptions.len() {
                    let p = assumptions[self.decision_level()];
                    match self.value(p) {
                        // Dummy decision level:
                        LBool::True => self.new_decision_level(),
                        LBool::False => return SearchOutcome::Unsat,
                        LBool::Undef => {
                            next = Some(p);
                            break;
                        }
                    }
                }

                let next = match next {
                    Some(p) => p,
                    None => {
                        self.stats.decisions += 1;
                        match self.pick_branch_lit() {
                            Some(p) => p,
                            None => return SearchOutcome::Sat,
                        }
                    }
                };
                self.new_decision_level();
                self.enqueue(next, None);
            }
        }
    }

    fn solve_with(&mut self, assumptions: &[Lit], budget: &Budget) -> SolveResult {
        let num_originals = self.clauses.iter().filter(|c| !c.is_learnt()).count();
        self.max_learnts = (num_originals as f64 * self.opts.learntsize_factor).max(self.opts.min_learnts_limit as f64);
        self.learntsize_adjust_confl = self.opts.learntsize_adjust_start_confl as f64;
        self.learntsize_adjust_cnt = self.opts.learntsize_adjust_start_confl;

        let mut curr_restarts = 0;
        let result = loop {
            let rest_base = luby(self.opts.restart_inc, curr_restarts);
            let nof_conflicts = (rest_base * self.opts.restart_init as f64) as usize;
            match self.search(nof_conflicts, assumptions, budget) {
                SearchOutcome::Sat => {
                    self.model = self.assigns.clone();
                    break SolveResult::Sat;
                }
                SearchOutcome::Unsat => break SolveResult::Unsat,
                SearchOutcome::Interrupted => break SolveResult::Unknown,
                SearchOutcome::Restart => {
                    curr_restarts += 1;
                    self.stats.restarts += 1;
                }
            }
        };

        self.cancel_until(0);
        result
    }

    /// Solves under the given assumptions. Assumptions only hold for this call.
    pub fn solve(&mut self, assumptions: &[Lit]) -> SolveResult {
        let start = Instant::now();
        self.stats.solves += 1;
        self.model.clear();
        for lit in assumptions {
            self.ensure_var(lit.var());
        }

        let result = if !self.ok {
            SolveResult::Unsat
        } else if self.opts.threads > 1 {
            self.solve_portfolio(assumptions)
        } else {
            let budget = Budget::new(&self.opts, self.stats.conflicts, None);
            self.solve_with(assumptions, &budget)
        };

        let time = start.elapsed();
        if self.opts.verbosity > 0 {
            info!(
                "{:?} in {:.3} s: conflicts={} decisions={} propagations={} restarts={} learnts={}",
                result,
                time.as_secs_f64(),
                self.stats.conflicts,
                self.stats.decisions,
                self.stats.propagations,
                self.stats.restarts,
                self.num_learnts()
            );
        } else {
            debug!("{:?} in {:.3} s", result, time.as_secs_f64());
        }
        result
    }

    fn solve_portfolio(&mut self, assumptions: &[Lit]) -> SolveResult {
        let threads = self.opts.threads.min(rayon::current_num_threads()).max(1);
        debug!("Running a portfolio of {} workers", threads);

        let cursor = self.cursor.take();
        let mut workers: Vec<Solver> = (0..threads)
            .map(|i| {
                let mut worker = self.clone();
                worker.opts.threads = 1;
                if i > 0 {
                    worker.rng = StdRng::seed_from_u64(self.opts.seed.wrapping_add(i as u64));
                    worker.opts.random_var_freq = worker.opts.random_var_freq.max(0.01 * i as f64);
                    if i % 2 == 1 {
                        worker.polarity.iter_mut().for_each(|p| *p = !*p);
                    }
                }
                worker
            })
            .collect();

        let stop = AtomicBool::new(false);
        let results: Vec<SolveResult> = workers
            .par_iter_mut()
            .map(|worker| {
                let budget = Budget::new(&worker.opts, worker.stats.conflicts, Some(&stop));
                let result = worker.solve_with(assumptions, &budget);
                if result != SolveResult::Unknown {
                    stop.store(true, Ordering::Relaxed);
                }
                result
            })
            .collect();

        let winner = results
            .iter()
            .position(|&r| r != SolveResult::Unknown)
            .unwrap_or(0);
        trace!("portfolio worker {} won with {:?}", winner, results[winner]);

        let opts = self.opts.clone();
        let solves = self.stats.solves;
        *self = workers.swap_remove(winner);
        self.opts = opts;
        self.stats.solves = solves;
        self.cursor = cursor;
        results[winner]
    }

    /// Opens a traversal over learnt clauses with at most `max_len` literals and glue at most `max_glue`.
    /// Learnt units come first. A previous traversal is discarded.
    pub fn start_getting_small_clauses(&mut self, max_len: u32, max_glue: u32) {
        let mut queue = VecDeque::new();
        if max_len >= 1 && max_glue >= 1 {
            queue.extend(self.learnt_units.iter().map(|&lit| vec![lit]));
        }
        for cref in &self.learnts {
            let c = &self.clauses[cref.0];
            if !c.is_deleted() && c.len() <= max_len as usize && c.glue() <= max_glue {
                queue.push_back(c.lits().to_vec());
            }
        }
        debug!("Learnt clause traversal opened with {} clauses", queue.len());
        self.cursor = Some(queue);
    }

    /// Moves the next learnt clause into `out`. Returns `false` when the traversal is exhausted or closed.
    pub fn get_next_small_clause(&mut self, out: &mut Vec<Lit>) -> bool {
        out.clear();
        match self.cursor.as_mut().and_then(|queue| queue.pop_front()) {
            Some(clause) => {
                out.extend(clause);
                true
            }
            None => false,
        }
    }

    pub fn end_getting_small_clauses(&mut self) {
        self.cursor = None;
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl Display for Solver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "cryptosat-engine")
    }
}
