//! The tracker: one card list kept in step with the game.
//!
//! `Tracker` owns the tracked list and the lifecycle scheduler. The game
//! side pushes snapshots with `update`, the host advances time with
//! `tick`, and the renderer reads `rows` plus the returned lifecycle
//! events to pick transitions. Nothing else mutates the list.
//!
//! ## Example Usage
//!
//! ```
//! use ccg_tracker::core::{Entity, EntityId, Timestamp, TrackerConfig};
//! use ccg_tracker::tracker::Tracker;
//!
//! let mut tracker = Tracker::new(TrackerConfig::default());
//!
//! let first = vec![Entity::new(EntityId(1), "CS2_029")];
//! tracker.update(&first, true, Timestamp(0)).unwrap();
//!
//! // The card changes into a created copy: the old row fades out
//! let second = vec![Entity::new(EntityId(1), "CS2_029").created()];
//! tracker.update(&second, false, Timestamp(100)).unwrap();
//! assert_eq!(tracker.len(), 2);
//!
//! // 600 ms later the faded row is gone
//! tracker.tick(Timestamp(700));
//! assert_eq!(tracker.len(), 1);
//! assert_eq!(tracker.entity_ids(), vec![EntityId(1)]);
//! ```

mod snapshot;

pub use snapshot::{SnapshotRow, TrackerSnapshot};

use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::core::{
    Entity, EntityId, TrackedEntity, TrackedId, Timestamp, TrackerConfig, TrackerError,
    TrackerResult,
};
use crate::hover::{NoHover, RowHover};
use crate::lifecycle::LifecycleScheduler;
use crate::stats::{GameView, Stats};
use crate::tracking::{reconcile, LifecycleEvent, Reconciliation, TrackedList};

/// A card list tracker.
#[derive(Debug)]
pub struct Tracker<H: RowHover = NoHover> {
    config: TrackerConfig,
    list: TrackedList,
    scheduler: LifecycleScheduler,
    hover: H,
    last_stats: Option<Stats>,
}

impl Tracker<NoHover> {
    /// Create a tracker that ignores hover notifications.
    #[must_use]
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_hover(config, NoHover)
    }
}

impl<H: RowHover> Tracker<H> {
    /// Create a tracker that forwards hover notifications to `hover`.
    pub fn with_hover(config: TrackerConfig, hover: H) -> Self {
        let scheduler = LifecycleScheduler::new(config.fade_delay_ms);
        Self {
            config,
            list: TrackedList::new(),
            scheduler,
            hover,
            last_stats: None,
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Toggle discard highlighting. Used from the next `update` on.
    pub fn set_highlight_discarded(&mut self, enabled: bool) {
        self.config.highlight_discarded = enabled;
    }

    /// Change the fade delay for removals scheduled from now on.
    pub fn set_fade_delay_ms(&mut self, delay_ms: u64) {
        self.config.fade_delay_ms = delay_ms;
        self.scheduler.set_delay_ms(delay_ms);
    }

    /// The hover receiver.
    pub fn hover_receiver(&self) -> &H {
        &self.hover
    }

    /// Reconcile the list against a new snapshot.
    ///
    /// With `reset`, all rows and pending removals are dropped first (new
    /// game). Faded removals are scheduled relative to `now`.
    pub fn update(
        &mut self,
        incoming: &[Entity],
        reset: bool,
        now: Timestamp,
    ) -> TrackerResult<Reconciliation> {
        let outcome = match reconcile(
            &mut self.list,
            incoming,
            reset,
            self.config.highlight_discarded,
        ) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(%err, player = %self.config.player_type, "rejected snapshot");
                return Err(err);
            }
        };

        if outcome.reset {
            self.scheduler.clear();
        }
        for &tracked in &outcome.revived {
            self.scheduler.cancel(tracked);
        }
        for &tracked in &outcome.fade_outs {
            let due = self.scheduler.schedule(tracked, now);
            trace!(%tracked, %due, "fade-out scheduled");
        }

        debug!(
            player = %self.config.player_type,
            reset = outcome.reset,
            updated = outcome.updated(),
            inserted = outcome.inserted(),
            removed = outcome.removed(),
            fading = self.list.fading_len(),
            rows = self.list.len(),
            "reconciled"
        );

        Ok(outcome)
    }

    /// Fire every removal due at `now`.
    ///
    /// Returns an `Expired` event for each row that actually left the list.
    pub fn tick(&mut self, now: Timestamp) -> SmallVec<[LifecycleEvent; 4]> {
        let expired: SmallVec<[LifecycleEvent; 4]> = self
            .scheduler
            .poll(now)
            .into_iter()
            .filter(|&tracked| self.fire_removal(tracked))
            .map(|tracked| LifecycleEvent::Expired { tracked })
            .collect();

        if !expired.is_empty() {
            debug!(
                now_ms = now.as_millis(),
                expired = expired.len(),
                pending = self.scheduler.pending_count(),
                "faded rows expired"
            );
        }
        expired
    }

    /// Apply a deferred removal by handle.
    ///
    /// A handle that is no longer fading (already removed, revived, or
    /// cleared by a reset) is left alone and `false` is returned.
    pub fn fire_removal(&mut self, tracked: TrackedId) -> bool {
        match self.list.finish_fade(tracked) {
            Some(row) => {
                trace!(%tracked, entity = %row.entity_id(), "faded row removed");
                true
            }
            None => {
                trace!(%tracked, "deferred removal found no row");
                false
            }
        }
    }

    /// Earliest pending removal deadline.
    #[must_use]
    pub fn next_due(&self) -> Option<Timestamp> {
        self.scheduler.next_due()
    }

    /// Number of rows waiting for a deferred removal.
    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.scheduler.pending_count()
    }

    /// Total rows, including fading ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Is the tracker empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Rows in rendered order, fading rows included.
    #[must_use]
    pub fn rows(&self) -> Vec<&TrackedEntity> {
        self.list.rendered()
    }

    /// Entity ids of the live rows, in the last snapshot's order.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.list.entity_ids()
    }

    /// Get a row by handle.
    #[must_use]
    pub fn get(&self, tracked: TrackedId) -> Option<&TrackedEntity> {
        self.list.get(tracked)
    }

    /// The tracked list.
    #[must_use]
    pub fn list(&self) -> &TrackedList {
        &self.list
    }

    /// Refresh the counters from the game.
    pub fn stats(&mut self, view: &impl GameView) -> Stats {
        let stats = Stats::from_view(view, self.config.player_type);
        self.last_stats = Some(stats);
        stats
    }

    /// Counters from the last `stats` call.
    #[must_use]
    pub fn last_stats(&self) -> Option<Stats> {
        self.last_stats
    }

    /// Forward a pointer-enter on a row.
    pub fn hover(&mut self, tracked: TrackedId) -> TrackerResult<()> {
        let row = self
            .list
            .get(tracked)
            .ok_or(TrackerError::UnknownTracked(tracked))?;
        self.hover.hover(&row.entity);
        Ok(())
    }

    /// Forward a pointer-leave on a row.
    pub fn out(&mut self, tracked: TrackedId) -> TrackerResult<()> {
        let row = self
            .list
            .get(tracked)
            .ok_or(TrackerError::UnknownTracked(tracked))?;
        self.hover.out(&row.entity);
        Ok(())
    }

    /// Serializable view of the rendered rows and last counters.
    #[must_use]
    pub fn snapshot(&self) -> TrackerSnapshot {
        let rows = self
            .list
            .rendered()
            .into_iter()
            .map(|row| SnapshotRow {
                tracked_id: row.tracked_id,
                entity: row.entity.clone(),
                fading: self.list.is_fading(row.tracked_id),
            })
            .collect();

        TrackerSnapshot {
            player_type: self.config.player_type,
            rows,
            pending: self.scheduler.pending(),
            stats: self.last_stats,
        }
    }
}
