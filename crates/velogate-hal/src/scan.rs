//! [`ScanBuffer`] – latest-value cell for inbound range sweeps.
//!
//! Sensor callbacks publish whole sweeps; the supervisor reads whichever
//! sweep is newest at tick time. Intermediate sweeps are dropped, never
//! queued: only the latest picture of the world matters, and the supervisor
//! must never wait on a sensor thread to take it.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use velogate_types::RangeScan;

/// Lock-free single-slot buffer holding the most recent scan, if any.
///
/// Cheap to clone; all clones share the slot.
#[derive(Debug, Default, Clone)]
pub struct ScanBuffer {
    slot: Arc<ArcSwapOption<RangeScan>>,
}

impl ScanBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current sweep wholesale.
    pub fn publish(&self, scan: RangeScan) {
        self.slot.store(Some(Arc::new(scan)));
    }

    /// The most recent sweep, or `None` if nothing has arrived yet.
    pub fn latest(&self) -> Option<Arc<RangeScan>> {
        self.slot.load_full()
    }
}
