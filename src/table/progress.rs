//! Progress of one build pass.

/// What a progress indicator needs to draw itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Completed share of the pass in `[0, 1]`.
    pub fraction: f64,
    /// Whether an indicator should be shown.
    pub visible: bool,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            fraction: 1.0,
            visible: false,
        }
    }
}

/// Counts consumed instructions against the total fixed at pass start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressState {
    total: usize,
    completed: usize,
    active: bool,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a new pass of `total` instructions.
    pub fn start(&mut self, total: usize) {
        self.total = total;
        self.completed = 0;
        self.active = true;
    }

    /// One more instruction consumed. Never exceeds the total.
    pub fn advance(&mut self) {
        self.completed = (self.completed + 1).min(self.total);
    }

    /// Mark the pass done; the indicator hides.
    pub fn finish(&mut self) {
        self.completed = self.total;
        self.active = false;
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `completed / total`, clamped. An empty pass is complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.completed as f64 / self.total as f64).clamp(0.0, 1.0)
    }

    pub fn is_visible(&self) -> bool {
        self.active && self.fraction() < 1.0
    }

    pub fn snapshot(&self) -> Progress {
        Progress {
            fraction: self.fraction(),
            visible: self.is_visible(),
        }
    }
}
