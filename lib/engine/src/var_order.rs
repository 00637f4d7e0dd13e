use crate::var::Var;

/// Binary max-heap of variables ordered by VSIDS activity.
#[derive(Debug, Clone)]
pub struct VarOrder {
    activity: Vec<f64>,
    heap: Vec<Var>,
    position: Vec<Option<usize>>,
    var_decay: f64,
    var_inc: f64,
}

impl VarOrder {
    pub fn new(var_decay: f64) -> Self {
        Self {
            activity: Vec::new(),
            heap: Vec::new(),
            position: Vec::new(),
            var_decay,
            var_inc: 1.0,
        }
    }

    /// Registers one more variable (not yet inserted into the heap).
    pub fn grow(&mut self) {
        self.activity.push(0.0);
        self.position.push(None);
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn at(&self, index: usize) -> Var {
        self.heap[index]
    }

    pub fn contains(&self, var: Var) -> bool {
        self.position[var.index()].is_some()
    }

    pub fn insert(&mut self, var: Var) {
        if self.contains(var) {
            return;
        }
        let i = self.heap.len();
        self.heap.push(var);
        self.position[var.index()] = Some(i);
        self.sift_up(i);
    }

    pub fn pop(&mut self) -> Option<Var> {
        if self.heap.is_empty() {
            return None;
        }
        let top = self.heap.swap_remove(0);
        self.position[top.index()] = None;
        if !self.heap.is_empty() {
            self.position[self.heap[0].index()] = Some(0);
            self.sift_down(0);
        }
        Some(top)
    }

    pub fn decay(&mut self) {
        self.var_inc /= self.var_decay;
    }

    pub fn bump(&mut self, var: Var) {
        let new = self.activity[var.index()] + self.var_inc;
        self.activity[var.index()] = new;

        // Rescale large activities, if necessary:
        if new > 1e100 {
            for a in self.activity.iter_mut() {
                *a *= 1e-100;
            }
            self.var_inc *= 1e-100;
        }

        if let Some(i) = self.position[var.index()] {
            self.sift_up(i);
        }
    }

    fn higher(&self, a: Var, b: Var) -> bool {
        let (x, y) = (self.activity[a.index()], self.activity[b.index()]);
        x > y || (x == y && a < b)
    }

    fn sift_up(&mut self, mut i: usize) {
        let var = self.heap[i];
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.higher(var, self.heap[parent]) {
                break;
            }
            self.heap[i] = self.heap[parent];
            self.position[self.heap[i].index()] = Some(i);
            i = parent;
        }
        self.heap[i] = var;
        self.position[var.index()] = Some(i);
    }

    fn sift_down(&mut self, mut i: usize) {
        let var = self.heap[i];
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let child = if right < len && self.higher(self.heap[right], self.heap[left]) {
                right
            } else {
                left
            };
            if !self.higher(self.heap[child], var) {
                break;
            }
            self.heap[i] = self.heap[child];
            self.position[self.heap[i].index()] = Some(i);
            i = child;
        }
        self.heap[i] = var;
        self.position[var.index()] = Some(i);
    }
}
