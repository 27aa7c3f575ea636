use std::cell::Cell;
use std::rc::Rc;

/// Subscription to the external scene reset event.
///
/// The scheduler creates one at construction and keeps it; the scene loader
/// holds a clone and calls `raise`. The scheduler applies a pending reset
/// before its next operation; several raises in between count as one.
#[derive(Debug, Clone, Default)]
pub struct ResetSignal {
    pending: Rc<Cell<bool>>,
}

impl ResetSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.pending.set(true);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Clears the pending flag and reports whether it was set.
    pub(crate) fn take(&self) -> bool {
        self.pending.replace(false)
    }
}
