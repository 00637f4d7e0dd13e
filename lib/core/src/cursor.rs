use snafu::ensure;

use crate::engine::Engine;
use crate::error::{NoActiveCursorSnafu, Result};
use crate::lit::Lit;
use crate::solver::Solver;

/// Glue bound used when the caller gives none.
pub const DEFAULT_MAX_GLUE: u32 = 1000;

#[derive(Debug, Default)]
pub(crate) struct LearntCursor {
    active: bool,
    buf: Vec<Lit>,
}

impl<E: Engine> Solver<E> {
    /// Opens a traversal over learnt clauses of at most `max_len` literals and glue at most `max_glue`.
    /// Any unfinished traversal is discarded.
    pub fn start_getting_small_clauses(&mut self, max_len: u32, max_glue: u32) {
        self.engine.start_getting_small_clauses(max_len, max_glue);
        self.cursor.active = true;
    }

    /// Next learnt clause, or `None` once the traversal is exhausted.
    pub fn get_next_small_clause(&mut self) -> Result<Option<Vec<Lit>>> {
        ensure!(self.cursor.active, NoActiveCursorSnafu);
        if self.engine.get_next_small_clause(&mut self.cursor.buf) {
            Ok(Some(self.cursor.buf.clone()))
        } else {
            Ok(None)
        }
    }

    pub fn end_getting_small_clauses(&mut self) {
        if self.cursor.active {
            self.engine.end_getting_small_clauses();
            self.cursor.active = false;
        }
    }
}
