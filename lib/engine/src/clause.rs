use std::ops::Index;

use crate::lit::Lit;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ClauseRef(pub(crate) usize);

#[derive(Debug, Clone)]
pub struct Clause {
    pub(crate) lits: Vec<Lit>,
    learnt: bool,
    glue: u32,
    deleted: bool,
}

impl Clause {
    pub const fn new(lits: Vec<Lit>, learnt: bool, glue: u32) -> Self {
        Self {
            lits,
            learnt,
            glue,
            deleted: false,
        }
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub const fn is_learnt(&self) -> bool {
        self.learnt
    }

    /// Number of distinct decision levels among the literals when the clause was learnt.
    pub const fn glue(&self) -> u32 {
        self.glue
    }

    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }
}

impl Index<usize> for Clause {
    type Output = Lit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lits[index]
    }
}
