//! Prepared statements statistics shared by clients
//! and servers of one pool.

use std::sync::Arc;

use parking_lot::Mutex;
pub use pgmux_stats::Counts;

/// Handle to pool stats. Cloning it is cheap and
/// all clones update the same counters.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    inner: Arc<Mutex<Counts>>,
}

impl Stats {
    /// New stats, all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the counters.
    pub fn counts(&self) -> Counts {
        *self.inner.lock()
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut Counts)) {
        f(&mut self.inner.lock())
    }
}
