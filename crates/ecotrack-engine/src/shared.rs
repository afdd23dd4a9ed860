//! Thread-safe tracker handle
//!
//! The registry, tree, graph and queue are only consistent as a unit, so a
//! [`SharedTracker`] guards the whole [`Tracker`] with a single lock.

use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use crate::config::TrackerConfig;
use crate::tracker::Tracker;

/// Cloneable handle to one tracker behind one mutex
#[derive(Debug, Clone, Default)]
pub struct SharedTracker {
    inner: Arc<Mutex<Tracker>>,
}

impl SharedTracker {
    /// Create a shared tracker with the given configuration
    pub fn new(config: TrackerConfig) -> Self {
        Self::from_tracker(Tracker::new(config))
    }

    /// Wrap an existing tracker
    pub fn from_tracker(tracker: Tracker) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    /// Run `f` with exclusive access to the tracker
    pub fn with<R>(&self, f: impl FnOnce(&mut Tracker) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Lock the tracker for several operations in a row
    pub fn lock(&self) -> MutexGuard<'_, Tracker> {
        self.inner.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_recoveries_are_serialised() {
        let shared = SharedTracker::new(TrackerConfig::default());
        shared.with(|t| {
            t.upsert_species("Panda", 2, 0, true, 0.0);
        });

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        shared.with(|t| t.record_recovery("Panda", 1)).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let tracker = shared.lock();
        assert_eq!(tracker.species("Panda").unwrap().population, 200);
        assert!(tracker.relocation_queue_snapshot().is_empty());
    }
}
