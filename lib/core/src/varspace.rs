use log::trace;

use crate::engine::Engine;

/// Lazy growth of an engine's variable space. Never shrinks.
pub trait VarSpace: Engine {
    /// Grow to `max_index + 1` variables if currently smaller.
    fn ensure_capacity(&mut self, max_index: u32) {
        let needed = max_index as usize + 1;
        let current = self.num_vars();
        if needed > current {
            trace!("Growing variable space from {} to {}", current, needed);
            self.new_vars(needed - current);
        }
    }

    /// Grow to at least `count` variables.
    fn reserve_vars(&mut self, count: usize) {
        let current = self.num_vars();
        if count > current {
            self.new_vars(count - current);
        }
    }
}

impl<E: Engine + ?Sized> VarSpace for E {}
