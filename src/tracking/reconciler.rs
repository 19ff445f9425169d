//! Reconciliation of the tracked list against an incoming snapshot.
//!
//! Three passes, in this order:
//!
//! 1. **Match**: every live row looks for an incoming entity showing the
//!    same row (`same_row`). A match is updated in place; no match makes the
//!    row stale. Fading rows that match again are revived.
//! 2. **Replace**: a stale row whose entity id still appears in the
//!    snapshot is swapped for a new row at the incoming position. The old
//!    row fades out when it still had copies (`count > 0`). A stale row
//!    with no same-id successor left the game state and is removed
//!    silently.
//! 3. **Insert**: every incoming entity not consumed above becomes a new
//!    row at its incoming position.
//!
//! The canonical order is rebuilt from the incoming snapshot, so after
//! every call it equals the snapshot's order exactly.

use im::Vector;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use tracing::trace;

use crate::core::{Entity, TrackedEntity, TrackerError, TrackedId, TrackerResult};

use super::equality::{same_identity, same_row};
use super::event::{Entrance, LifecycleEvent};
use super::list::TrackedList;

/// Outcome of one reconciliation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Row transitions, in the order they were decided.
    pub events: SmallVec<[LifecycleEvent; 8]>,

    /// Rows that started fading and need a deferred removal.
    pub fade_outs: SmallVec<[TrackedId; 4]>,

    /// Fading rows revived by this snapshot; their removals must be cancelled.
    pub revived: SmallVec<[TrackedId; 4]>,

    /// The list was cleared before reconciling.
    pub reset: bool,
}

impl Reconciliation {
    fn new(reset: bool) -> Self {
        Self {
            reset,
            ..Self::default()
        }
    }

    /// Did anything change?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && !self.reset
    }

    /// Number of in-place updates.
    #[must_use]
    pub fn updated(&self) -> usize {
        self.count(|e| matches!(e, LifecycleEvent::Updated { .. }))
    }

    /// Number of inserted rows.
    #[must_use]
    pub fn inserted(&self) -> usize {
        self.count(|e| matches!(e, LifecycleEvent::Inserted { .. }))
    }

    /// Number of removed rows, faded or not.
    #[must_use]
    pub fn removed(&self) -> usize {
        self.count(|e| matches!(e, LifecycleEvent::Removed { .. }))
    }

    fn count(&self, pred: impl Fn(&LifecycleEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

/// Reconcile `list` against `incoming`.
///
/// Fails with `DuplicateIdentity` before touching the list if `incoming`
/// repeats an entity id. With `reset`, every row is dropped first and new
/// rows enter without animation.
pub fn reconcile(
    list: &mut TrackedList,
    incoming: &[Entity],
    reset: bool,
    highlight_discarded: bool,
) -> TrackerResult<Reconciliation> {
    check_unique(incoming)?;

    let mut outcome = Reconciliation::new(reset);
    if reset {
        list.clear();
    }

    // assigned[i] = row that shows incoming[i]
    let mut assigned: Vec<Option<TrackedId>> = vec![None; incoming.len()];
    let mut stale: SmallVec<[TrackedId; 4]> = SmallVec::new();

    // Pass 1: match live rows
    let live: Vec<TrackedId> = list.order().iter().copied().collect();
    for tracked in live {
        let Some(row) = list.get(tracked) else {
            continue;
        };
        let found = find_unassigned(incoming, &assigned, |e| {
            same_row(&row.entity, e, highlight_discarded)
        });

        match found {
            Some(index) => {
                assigned[index] = Some(tracked);
                if let Some(row) = list.get_mut(tracked) {
                    if let Some(event) = apply_update(row, &incoming[index]) {
                        outcome.events.push(event);
                    }
                }
            }
            None => stale.push(tracked),
        }
    }

    // Pass 1b: revive fading rows that match again
    for tracked in list.fading_ids() {
        let Some(row) = list.get(tracked) else {
            continue;
        };
        let found = find_unassigned(incoming, &assigned, |e| {
            same_row(&row.entity, e, highlight_discarded)
        });

        if let Some(index) = found {
            list.revive(tracked);
            assigned[index] = Some(tracked);
            outcome.revived.push(tracked);
            outcome.events.push(LifecycleEvent::Revived { tracked });
            if let Some(row) = list.get_mut(tracked) {
                if let Some(event) = apply_update(row, &incoming[index]) {
                    outcome.events.push(event);
                }
            }
        }
    }

    // Pass 2: replace or drop stale rows
    for tracked in stale {
        let Some(row) = list.get(tracked) else {
            continue;
        };
        let had_copies = row.entity.count > 0;
        let found = find_unassigned(incoming, &assigned, |e| same_identity(&row.entity, e));

        // A faded row renders in front of its replacement
        let fade_anchor = match found {
            Some(index) => {
                let replacement = list.allocate(incoming[index].clone());
                assigned[index] = Some(replacement);
                outcome.events.push(LifecycleEvent::Inserted {
                    tracked: replacement,
                    index,
                    entrance: Entrance::Replace,
                });
                had_copies.then_some(replacement)
            }
            None => None,
        };

        let faded = fade_anchor.is_some();
        if faded {
            list.begin_fade(tracked, fade_anchor);
            outcome.fade_outs.push(tracked);
        } else {
            list.remove(tracked);
        }
        outcome.events.push(LifecycleEvent::Removed { tracked, faded });
    }

    // Pass 3: insert everything left
    let entrance = if reset { Entrance::Instant } else { Entrance::FadeIn };
    for (index, slot) in assigned.iter_mut().enumerate() {
        if slot.is_none() {
            let tracked = list.allocate(incoming[index].clone());
            *slot = Some(tracked);
            outcome.events.push(LifecycleEvent::Inserted {
                tracked,
                index,
                entrance,
            });
        }
    }

    let order: Vector<TrackedId> = assigned.into_iter().flatten().collect();
    list.set_order(order);

    for event in &outcome.events {
        trace!(?event, "row transition");
    }

    Ok(outcome)
}

/// Reject snapshots that repeat an entity id.
fn check_unique(incoming: &[Entity]) -> TrackerResult<()> {
    let mut seen = FxHashSet::default();
    for entity in incoming {
        if !seen.insert(entity.id) {
            return Err(TrackerError::DuplicateIdentity(entity.id));
        }
    }
    Ok(())
}

/// First incoming index not yet shown by a row that satisfies `pred`.
fn find_unassigned(
    incoming: &[Entity],
    assigned: &[Option<TrackedId>],
    pred: impl Fn(&Entity) -> bool,
) -> Option<usize> {
    incoming
        .iter()
        .zip(assigned)
        .position(|(entity, slot)| slot.is_none() && pred(entity))
}

/// Copy a matching snapshot onto its row.
///
/// Only a moved `count` is highlighted; a `highlight_in_hand` flip alone is
/// a plain update. Changes to fields outside the row predicate (such as
/// `was_discarded` with discard highlighting off) refresh the row without
/// a highlight.
fn apply_update(row: &mut TrackedEntity, incoming: &Entity) -> Option<LifecycleEvent> {
    let entity = &mut row.entity;
    let count_changed = entity.count != incoming.count;

    let event = if count_changed || entity.highlight_in_hand != incoming.highlight_in_hand {
        entity.count = incoming.count;
        entity.highlight_in_hand = incoming.highlight_in_hand;
        Some(LifecycleEvent::Updated {
            tracked: row.tracked_id,
            highlighted: count_changed,
        })
    } else if passive_fields_differ(entity, incoming) {
        Some(LifecycleEvent::Updated {
            tracked: row.tracked_id,
            highlighted: false,
        })
    } else {
        None
    };

    entity.is_created = incoming.is_created;
    entity.was_discarded = incoming.was_discarded;
    if entity.card_id != incoming.card_id {
        entity.card_id.clone_from(&incoming.card_id);
    }

    event
}

fn passive_fields_differ(current: &Entity, incoming: &Entity) -> bool {
    current.is_created != incoming.is_created
        || current.was_discarded != incoming.was_discarded
        || current.card_id != incoming.card_id
}
