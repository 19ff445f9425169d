//! Deferred row removal.
//!
//! A faded row stays in the tracked list while its exit transition runs.
//! The scheduler remembers when each one is due; the host polls it with the
//! current time and the tracker applies the fired removals by handle.
//!
//! Pending removals are keyed by `TrackedId`, so a removal can be
//! cancelled when its row is revived, and a removal that fires after its
//! row is gone simply finds nothing to remove.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{TrackedId, Timestamp, DEFAULT_FADE_DELAY_MS};

/// A removal waiting for its deadline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingRemoval {
    /// Row to remove.
    pub tracked: TrackedId,

    /// When the removal fires.
    pub due: Timestamp,
}

/// One-shot deferred removals keyed by row handle.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LifecycleScheduler {
    /// Delay between scheduling and firing (ms).
    delay_ms: u64,

    /// Pending removals: handle -> deadline.
    pending: FxHashMap<TrackedId, Timestamp>,
}

impl Default for LifecycleScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_FADE_DELAY_MS)
    }
}

impl LifecycleScheduler {
    /// Create a scheduler with the given fade delay.
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: FxHashMap::default(),
        }
    }

    /// The fade delay in milliseconds.
    #[must_use]
    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Change the fade delay. Already scheduled removals keep their deadline.
    pub fn set_delay_ms(&mut self, delay_ms: u64) {
        self.delay_ms = delay_ms;
    }

    /// Schedule a removal `delay_ms` after `now` and return its deadline.
    ///
    /// Scheduling a handle that is already pending moves its deadline.
    pub fn schedule(&mut self, tracked: TrackedId, now: Timestamp) -> Timestamp {
        let due = now.saturating_add_millis(self.delay_ms);
        self.pending.insert(tracked, due);
        due
    }

    /// Cancel a pending removal. Returns false if none was pending.
    pub fn cancel(&mut self, tracked: TrackedId) -> bool {
        self.pending.remove(&tracked).is_some()
    }

    /// Is a removal pending for this handle?
    #[must_use]
    pub fn is_pending(&self, tracked: TrackedId) -> bool {
        self.pending.contains_key(&tracked)
    }

    /// Number of pending removals.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_due(&self) -> Option<Timestamp> {
        self.pending.values().copied().min()
    }

    /// Pending removals sorted by deadline.
    #[must_use]
    pub fn pending(&self) -> Vec<PendingRemoval> {
        let mut pending: Vec<_> = self
            .pending
            .iter()
            .map(|(&tracked, &due)| PendingRemoval { tracked, due })
            .collect();
        pending.sort_unstable_by_key(|p| (p.due, p.tracked));
        pending
    }

    /// Take every removal due at or before `now`.
    ///
    /// Fired handles are returned by deadline, ties by handle; callers must
    /// not rely on any particular order.
    pub fn poll(&mut self, now: Timestamp) -> SmallVec<[TrackedId; 4]> {
        let mut due: SmallVec<[(Timestamp, TrackedId); 4]> = self
            .pending
            .iter()
            .filter(|(_, &deadline)| deadline <= now)
            .map(|(&tracked, &deadline)| (deadline, tracked))
            .collect();
        due.sort_unstable();

        due.into_iter()
            .map(|(_, tracked)| {
                self.pending.remove(&tracked);
                tracked
            })
            .collect()
    }

    /// Drop every pending removal.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
