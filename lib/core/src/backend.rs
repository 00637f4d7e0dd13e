use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};
use std::time::Duration;

use tap::Pipe;

use cryptosat_engine::LBool as NativeLBool;
use cryptosat_engine::Lit as NativeLit;
use cryptosat_engine::Options;
use cryptosat_engine::SolveResult;
use cryptosat_engine::Solver as Native;
use cryptosat_engine::Var as NativeVar;

use crate::engine::Engine;
use crate::lit::Lit;
use crate::types::LBool;

/// [`Engine`] backed by the bundled `cryptosat-engine` CDCL solver.
pub struct NativeEngine {
    inner: Native,
    model: Vec<LBool>,
    lits: Vec<NativeLit>,
}

impl NativeEngine {
    pub fn new() -> Self {
        Self::new_custom(Native::default())
    }

    pub fn new_custom(inner: Native) -> Self {
        Self {
            inner,
            model: Vec::new(),
            lits: Vec::new(),
        }
    }

    pub fn with_options(options: Options) -> Self {
        Self::new_custom(Native::new(options))
    }

    pub fn inner(&self) -> &Native {
        &self.inner
    }

    fn fill_lits(&mut self, lits: &[Lit]) {
        self.lits.clear();
        self.lits.extend(lits.iter().map(|&lit| lit.pipe(to_native)));
    }
}

impl Default for NativeEngine {
    fn default() -> Self {
        NativeEngine::new()
    }
}

impl From<Native> for NativeEngine {
    fn from(inner: Native) -> Self {
        NativeEngine::new_custom(inner)
    }
}

impl Debug for NativeEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeEngine").field("inner", &self.inner).finish()
    }
}

impl Display for NativeEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", tynm::type_name::<Self>(), self.inner)
    }
}

fn to_native(lit: Lit) -> NativeLit {
    NativeLit::new(NativeVar::new(lit.var()), lit.negated())
}

fn from_native(lit: NativeLit) -> Lit {
    Lit::new(lit.var().get(), lit.negated())
}

fn from_native_lbool(value: NativeLBool) -> LBool {
    LBool::from_raw(value.to_u8())
}

impl Engine for NativeEngine {
    fn signature(&self) -> Cow<str> {
        "cryptosat-engine".into()
    }

    fn set_verbosity(&mut self, verbosity: u32) {
        self.inner.options_mut().verbosity = verbosity;
    }

    fn set_max_time(&mut self, seconds: f64) {
        self.inner.options_mut().max_time = if seconds > 0.0 {
            // Too large to represent means unlimited.
            Duration::try_from_secs_f64(seconds).ok()
        } else {
            None
        };
    }

    fn set_max_confl(&mut self, conflicts: u64) {
        self.inner.options_mut().max_conflicts = (conflicts > 0).then_some(conflicts);
    }

    fn set_num_threads(&mut self, threads: usize) {
        self.inner.options_mut().threads = threads.max(1);
    }

    fn new_vars(&mut self, n: usize) {
        self.inner.new_vars(n);
    }

    fn num_vars(&self) -> usize {
        self.inner.num_vars()
    }

    fn num_clauses(&self) -> usize {
        self.inner.num_clauses()
    }

    fn add_clause(&mut self, lits: &[Lit]) -> bool {
        self.fill_lits(lits);
        self.inner.add_clause(&self.lits)
    }

    fn add_xor_clause(&mut self, vars: &[u32], rhs: bool) -> bool {
        let vars: Vec<NativeVar> = vars.iter().map(|&v| v.pipe(NativeVar::new)).collect();
        self.inner.add_xor_clause(&vars, rhs)
    }

    fn solve(&mut self, assumptions: &[Lit]) -> LBool {
        self.fill_lits(assumptions);
        let result = self.inner.solve(&self.lits);
        self.model = match result {
            SolveResult::Sat => self.inner.model().iter().copied().map(from_native_lbool).collect(),
            _ => Vec::new(),
        };
        match result {
            SolveResult::Sat => LBool::TRUE,
            SolveResult::Unsat => LBool::FALSE,
            SolveResult::Unknown => LBool::UNDEF,
        }
    }

    fn model(&self) -> &[LBool] {
        &self.model
    }

    fn start_getting_small_clauses(&mut self, max_len: u32, max_glue: u32) {
        self.inner.start_getting_small_clauses(max_len, max_glue);
    }

    fn get_next_small_clause(&mut self, out: &mut Vec<Lit>) -> bool {
        out.clear();
        if !self.inner.get_next_small_clause(&mut self.lits) {
            return false;
        }
        out.extend(self.lits.iter().map(|&lit| lit.pipe(from_native)));
        true
    }

    fn end_getting_small_clauses(&mut self) {
        self.inner.end_getting_small_clauses();
    }
}
