//! Counter of records accepted but not yet fully written

use parking_lot::{Condvar, Mutex};

/// Wait-group over in-flight records.
///
/// Producers `add` before enqueueing, the consumer calls `done` after a
/// record has been written to every handler, and `wait` blocks until the
/// count drops to zero.
#[derive(Debug, Default)]
pub(crate) struct InFlight {
    count: Mutex<usize>,
    drained: Condvar,
}

impl InFlight {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add(&self) {
        *self.count.lock() += 1;
    }

    pub(crate) fn done(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.drained.notify_all();
        }
    }

    pub(crate) fn wait(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.drained.wait(&mut count);
        }
    }

    pub(crate) fn pending(&self) -> usize {
        *self.count.lock()
    }
}
