//! The tracked list: rows addressed by handle, plus their order.
//!
//! `TrackedList` keeps three things apart:
//! - an arena of rows keyed by `TrackedId`
//! - the canonical order, which at rest equals the last incoming snapshot
//! - the fading set, rows waiting for their deferred removal
//!
//! Fading rows are never part of the canonical order. Each one is anchored
//! to the row it renders in front of, normally its replacement, so it keeps
//! its neighbour through inserts and reorders until its exit transition
//! ends. When an anchor row leaves the list, rows anchored to it move on to
//! the row that followed it.
//!
//! ## Usage
//!
//! ```
//! use ccg_tracker::core::{Entity, EntityId};
//! use ccg_tracker::tracking::TrackedList;
//!
//! let mut list = TrackedList::new();
//! let a = list.allocate(Entity::new(EntityId(1), "CS2_029"));
//! let b = list.allocate(Entity::new(EntityId(2), "CS2_032"));
//! list.set_order([a, b].into_iter().collect());
//!
//! list.begin_fade(a, Some(b));
//! list.set_order([b].into_iter().collect());
//!
//! assert_eq!(list.len(), 2);
//! assert_eq!(list.live_len(), 1);
//! assert_eq!(list.rendered_ids(), vec![EntityId(1), EntityId(2)]);
//! ```

use im::Vector;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::{Entity, EntityId, TrackedEntity, TrackedId};

/// Rows of one tracker.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrackedList {
    /// Every row, live or fading.
    rows: FxHashMap<TrackedId, TrackedEntity>,

    /// Canonical order of live rows.
    order: Vector<TrackedId>,

    /// Fading rows -> row they render in front of (`None`: end of list).
    fading: FxHashMap<TrackedId, Option<TrackedId>>,

    /// Next handle to allocate. Handles are never reused.
    next_id: u64,
}

impl TrackedList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rows, live and fading.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Is the list empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in the canonical order.
    #[must_use]
    pub fn live_len(&self) -> usize {
        self.order.len()
    }

    /// Rows waiting for a deferred removal.
    #[must_use]
    pub fn fading_len(&self) -> usize {
        self.fading.len()
    }

    /// The canonical order.
    #[must_use]
    pub fn order(&self) -> &Vector<TrackedId> {
        &self.order
    }

    /// Get a row by handle.
    #[must_use]
    pub fn get(&self, tracked: TrackedId) -> Option<&TrackedEntity> {
        self.rows.get(&tracked)
    }

    /// Get a mutable row by handle.
    pub fn get_mut(&mut self, tracked: TrackedId) -> Option<&mut TrackedEntity> {
        self.rows.get_mut(&tracked)
    }

    /// Does the list hold this handle?
    #[must_use]
    pub fn contains(&self, tracked: TrackedId) -> bool {
        self.rows.contains_key(&tracked)
    }

    /// Is this row waiting for a deferred removal?
    #[must_use]
    pub fn is_fading(&self, tracked: TrackedId) -> bool {
        self.fading.contains_key(&tracked)
    }

    /// Fading handles, sorted by allocation order.
    #[must_use]
    pub fn fading_ids(&self) -> Vec<TrackedId> {
        let mut ids: Vec<_> = self.fading.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Live rows in canonical order.
    pub fn live(&self) -> impl Iterator<Item = &TrackedEntity> + '_ {
        self.order.iter().filter_map(move |id| self.rows.get(id))
    }

    /// Entity ids of the live rows, in canonical order.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.live().map(TrackedEntity::entity_id).collect()
    }

    /// Rows as they render: the canonical order with each fading row
    /// placed directly in front of its anchor.
    #[must_use]
    pub fn rendered(&self) -> Vec<&TrackedEntity> {
        let mut before: FxHashMap<TrackedId, Vec<TrackedId>> = FxHashMap::default();
        let mut tail: Vec<TrackedId> = Vec::new();
        for (&id, &anchor) in &self.fading {
            match anchor {
                Some(next) => before.entry(next).or_default().push(id),
                None => tail.push(id),
            }
        }
        for group in before.values_mut() {
            group.sort_unstable();
        }
        tail.sort_unstable();

        let mut rendered = Vec::with_capacity(self.rows.len());
        let mut placed = FxHashSet::default();
        for &id in &self.order {
            self.place(id, &before, &mut placed, &mut rendered);
        }
        for id in tail {
            self.place(id, &before, &mut placed, &mut rendered);
        }

        // Anchors pointing outside the list; kept visible at the end
        for id in self.fading_ids() {
            self.place(id, &before, &mut placed, &mut rendered);
        }

        rendered
    }

    /// Push `id` after every fading row anchored to it.
    fn place<'a>(
        &'a self,
        id: TrackedId,
        before: &FxHashMap<TrackedId, Vec<TrackedId>>,
        placed: &mut FxHashSet<TrackedId>,
        rendered: &mut Vec<&'a TrackedEntity>,
    ) {
        if !placed.insert(id) {
            return;
        }
        if let Some(group) = before.get(&id) {
            for &fading in group {
                self.place(fading, before, placed, rendered);
            }
        }
        if let Some(row) = self.rows.get(&id) {
            rendered.push(row);
        }
    }

    /// Entity ids in rendered order.
    #[must_use]
    pub fn rendered_ids(&self) -> Vec<EntityId> {
        self.rendered().into_iter().map(TrackedEntity::entity_id).collect()
    }

    /// Store a new row and return its handle.
    ///
    /// The row is not part of the canonical order until `set_order`
    /// includes it.
    pub fn allocate(&mut self, entity: Entity) -> TrackedId {
        let tracked = TrackedId(self.next_id);
        self.next_id += 1;
        self.rows.insert(tracked, TrackedEntity::new(tracked, entity));
        tracked
    }

    /// Replace the canonical order.
    pub fn set_order(&mut self, order: Vector<TrackedId>) {
        debug_assert!(order.iter().all(|id| self.rows.contains_key(id)));
        debug_assert!(order.iter().all(|id| !self.fading.contains_key(id)));
        self.order = order;
    }

    /// Move a row to the fading set.
    ///
    /// The row renders in front of `anchor` while it fades, or at the end
    /// of the list for `None`. The caller drops it from the canonical order
    /// via `set_order`.
    pub fn begin_fade(&mut self, tracked: TrackedId, anchor: Option<TrackedId>) {
        if self.rows.contains_key(&tracked) {
            self.fading.insert(tracked, anchor);
        }
    }

    /// Take a row out of the fading set. Returns false if it was not fading.
    pub fn revive(&mut self, tracked: TrackedId) -> bool {
        self.fading.remove(&tracked).is_some()
    }

    /// Complete a deferred removal.
    ///
    /// Only a row that is still fading is removed; a handle that was
    /// revived, already removed, or cleared by a reset is left alone.
    pub fn finish_fade(&mut self, tracked: TrackedId) -> Option<TrackedEntity> {
        let anchor = self.fading.remove(&tracked)?;
        self.reanchor(tracked, anchor);
        self.rows.remove(&tracked)
    }

    /// Remove a row immediately.
    pub fn remove(&mut self, tracked: TrackedId) -> Option<TrackedEntity> {
        let row = self.rows.remove(&tracked)?;
        let successor = match self.fading.remove(&tracked) {
            Some(anchor) => anchor,
            None => self.successor(tracked),
        };
        self.order.retain(|&id| id != tracked);
        self.reanchor(tracked, successor);
        Some(row)
    }

    /// Live row after `tracked` in the canonical order.
    fn successor(&self, tracked: TrackedId) -> Option<TrackedId> {
        let position = self.order.iter().position(|&id| id == tracked)?;
        self.order.get(position + 1).copied()
    }

    /// Point rows anchored to `gone` at `successor`.
    fn reanchor(&mut self, gone: TrackedId, successor: Option<TrackedId>) {
        for anchor in self.fading.values_mut() {
            if *anchor == Some(gone) {
                *anchor = successor;
            }
        }
    }

    /// Drop every row. Handles keep counting up.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.order.clear();
        self.fading.clear();
    }
}
