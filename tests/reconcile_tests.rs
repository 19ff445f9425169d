//! Reconciliation integration tests.
//!
//! These tests drive the tracker through realistic snapshot sequences and
//! check row identity, ordering, and the transitions handed to the renderer.

use ccg_tracker::core::{Entity, EntityId, Timestamp, TrackerConfig};
use ccg_tracker::tracker::Tracker;
use ccg_tracker::tracking::{Entrance, LifecycleEvent};

fn card(id: u32) -> Entity {
    Entity::new(EntityId(id), format!("CARD_{id:03}"))
}

fn ids(values: &[u32]) -> Vec<EntityId> {
    values.iter().map(|&v| EntityId(v)).collect()
}

// =============================================================================
// Order and identity
// =============================================================================

/// After every non-reset update the live order equals the snapshot order.
#[test]
fn test_order_fidelity_across_updates() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    let snapshots: Vec<Vec<Entity>> = vec![
        vec![card(1), card(2), card(3)],
        vec![card(3), card(1)],
        vec![card(4), card(3), card(5), card(1)],
        vec![card(5).with_count(2), card(4)],
        vec![],
        vec![card(2), card(1)],
    ];

    for (step, snapshot) in snapshots.iter().enumerate() {
        tracker
            .update(snapshot, step == 0, Timestamp(step as u64 * 100))
            .unwrap();
        let expected: Vec<_> = snapshot.iter().map(|e| e.id).collect();
        assert_eq!(tracker.entity_ids(), expected, "order mismatch at step {}", step);
    }
}

/// A row whose predicate holds keeps its handle and is mutated in place.
#[test]
fn test_identity_stability() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(1).with_count(2), card(2)], true, Timestamp(0)).unwrap();
    let before: Vec<_> = tracker.list().order().iter().copied().collect();

    let outcome = tracker
        .update(&[card(2).highlighted(), card(1).with_count(1)], false, Timestamp(10))
        .unwrap();

    assert_eq!(outcome.inserted(), 0);
    assert_eq!(outcome.removed(), 0);
    assert_eq!(outcome.updated(), 2);

    let after: Vec<_> = tracker.list().order().iter().copied().collect();
    assert_eq!(after, vec![before[1], before[0]]);

    let row = tracker.get(before[0]).unwrap();
    assert_eq!(row.entity.count, 1);
    assert!(tracker.get(before[1]).unwrap().entity.highlight_in_hand);
}

/// Count changes are highlighted; highlight-only changes are not.
#[test]
fn test_update_highlight_classification() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(1), card(2)], true, Timestamp(0)).unwrap();
    let handles: Vec<_> = tracker.list().order().iter().copied().collect();

    let outcome = tracker
        .update(&[card(1).with_count(3), card(2).highlighted()], false, Timestamp(0))
        .unwrap();

    assert_eq!(
        outcome.events.as_slice(),
        &[
            LifecycleEvent::Updated { tracked: handles[0], highlighted: true },
            LifecycleEvent::Updated { tracked: handles[1], highlighted: false },
        ]
    );
}

// =============================================================================
// Replacement and removal
// =============================================================================

/// [A(created=false)] -> [A'(created=true)]: old row fades, new row at index 0.
#[test]
fn test_replacement_semantics() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(1)], true, Timestamp(0)).unwrap();
    let old = tracker.list().order()[0];

    let outcome = tracker.update(&[card(1).created()], false, Timestamp(50)).unwrap();
    let new = tracker.list().order()[0];

    assert!(outcome.events.contains(&LifecycleEvent::Inserted {
        tracked: new,
        index: 0,
        entrance: Entrance::Replace,
    }));
    assert!(outcome.events.contains(&LifecycleEvent::Removed { tracked: old, faded: true }));

    // Both rows render during the fade
    assert_eq!(tracker.rows().len(), 2);

    tracker.tick(Timestamp(650));

    let remaining: Vec<_> = tracker.rows().iter().map(|r| r.entity.id).collect();
    assert_eq!(remaining, ids(&[1]));
    assert!(tracker.rows()[0].entity.is_created);
}

/// Replacement lands at the snapshot index even with neighbours around it.
#[test]
fn test_replacement_index_in_middle() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(1), card(2), card(3)], true, Timestamp(0)).unwrap();

    let outcome = tracker
        .update(&[card(1), card(2).jousted(), card(3)], false, Timestamp(0))
        .unwrap();

    assert!(matches!(
        outcome.events[0],
        LifecycleEvent::Inserted { index: 1, entrance: Entrance::Replace, .. }
    ));
    assert_eq!(tracker.entity_ids(), ids(&[1, 2, 3]));

    // Rendered view keeps the fading row where it was
    let rendered: Vec<_> = tracker.rows().iter().map(|r| (r.entity.id, r.entity.jousted)).collect();
    assert_eq!(
        rendered,
        vec![
            (EntityId(1), false),
            (EntityId(2), false),
            (EntityId(2), true),
            (EntityId(3), false),
        ]
    );
}

/// (entity id, fading) pairs in rendered order.
fn rendered(tracker: &Tracker) -> Vec<(EntityId, bool)> {
    tracker
        .rows()
        .iter()
        .map(|r| (r.entity.id, tracker.list().is_fading(r.tracked_id)))
        .collect()
}

/// An insert ahead of a replacement keeps the fading row beside its successor.
#[test]
fn test_fading_row_survives_insert_ahead() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(1), card(2), card(3)], true, Timestamp(0)).unwrap();

    tracker
        .update(&[card(9), card(1), card(2).created(), card(3)], false, Timestamp(0))
        .unwrap();

    assert_eq!(
        rendered(&tracker),
        vec![
            (EntityId(9), false),
            (EntityId(1), false),
            (EntityId(2), true),
            (EntityId(2), false),
            (EntityId(3), false),
        ]
    );
}

/// Rows fading in the same update each stay in front of their own replacement.
#[test]
fn test_several_fades_in_one_update() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(1), card(2)], true, Timestamp(0)).unwrap();

    tracker
        .update(&[card(1).created(), card(2).created()], false, Timestamp(0))
        .unwrap();

    assert_eq!(
        rendered(&tracker),
        vec![
            (EntityId(1), true),
            (EntityId(1), false),
            (EntityId(2), true),
            (EntityId(2), false),
        ]
    );
}

/// A reorder while a row fades moves the fading row with its replacement.
#[test]
fn test_fading_row_follows_reorder() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(1), card(2), card(3)], true, Timestamp(0)).unwrap();
    tracker
        .update(&[card(1), card(2).jousted(), card(3)], false, Timestamp(0))
        .unwrap();

    tracker
        .update(&[card(3), card(2).jousted(), card(1)], false, Timestamp(100))
        .unwrap();

    assert_eq!(
        rendered(&tracker),
        vec![
            (EntityId(3), false),
            (EntityId(2), true),
            (EntityId(2), false),
            (EntityId(1), false),
        ]
    );

    tracker.tick(Timestamp(600));
    assert_eq!(tracker.rows().len(), 3);
}

/// When a fading row's replacement leaves, it moves on to the next live row.
#[test]
fn test_fading_row_outlives_its_replacement() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(1), card(2), card(3)], true, Timestamp(0)).unwrap();
    tracker
        .update(&[card(1), card(2).created(), card(3)], false, Timestamp(0))
        .unwrap();

    tracker.update(&[card(3), card(1)], false, Timestamp(100)).unwrap();

    assert_eq!(
        rendered(&tracker),
        vec![(EntityId(2), true), (EntityId(3), false), (EntityId(1), false)]
    );
}

/// [B] -> []: removed without a fade and without a timer.
#[test]
fn test_silent_removal() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(2)], true, Timestamp(0)).unwrap();
    let old = tracker.list().order()[0];

    let outcome = tracker.update(&[], false, Timestamp(0)).unwrap();

    assert_eq!(
        outcome.events.as_slice(),
        &[LifecycleEvent::Removed { tracked: old, faded: false }]
    );
    assert_eq!(tracker.pending_removals(), 0);
    assert!(tracker.is_empty());
}

/// A row with no copies left is replaced without a fade.
#[test]
fn test_replacement_without_copies_not_faded() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(1).with_count(0)], true, Timestamp(0)).unwrap();

    let outcome = tracker.update(&[card(1).with_count(0).created()], false, Timestamp(0)).unwrap();

    assert!(outcome.fade_outs.is_empty());
    assert_eq!(tracker.pending_removals(), 0);
    assert_eq!(tracker.len(), 1);
}

/// Length invariant: rows == snapshot + pending fades.
#[test]
fn test_length_invariant_during_fades() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(1), card(2), card(3)], true, Timestamp(0)).unwrap();

    let snapshot = vec![card(1).created(), card(2).jousted(), card(4)];
    tracker.update(&snapshot, false, Timestamp(0)).unwrap();

    assert_eq!(tracker.pending_removals(), 2);
    assert_eq!(tracker.len(), snapshot.len() + tracker.pending_removals());

    tracker.tick(Timestamp(600));
    assert_eq!(tracker.len(), snapshot.len());
}

// =============================================================================
// Discard highlighting
// =============================================================================

/// With discard highlighting off, a discard refreshes the row in place.
#[test]
fn test_discard_without_highlighting() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(7)], true, Timestamp(0)).unwrap();
    let handle = tracker.list().order()[0];

    let outcome = tracker.update(&[card(7).discarded()], false, Timestamp(0)).unwrap();

    assert_eq!(
        outcome.events.as_slice(),
        &[LifecycleEvent::Updated { tracked: handle, highlighted: false }]
    );
    assert!(tracker.get(handle).unwrap().entity.was_discarded);
}

/// With discard highlighting on, a discard is a new row.
#[test]
fn test_discard_with_highlighting() {
    let config = TrackerConfig::default().with_highlight_discarded(true);
    let mut tracker = Tracker::new(config);
    tracker.update(&[card(7)], true, Timestamp(0)).unwrap();
    let handle = tracker.list().order()[0];

    let outcome = tracker.update(&[card(7).discarded()], false, Timestamp(0)).unwrap();

    assert!(outcome.events.contains(&LifecycleEvent::Removed { tracked: handle, faded: true }));
    assert_ne!(tracker.list().order()[0], handle);
}

// =============================================================================
// Reset
// =============================================================================

/// A reset rebuilds every row without entrance animation.
#[test]
fn test_reset_suppresses_animation() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    tracker.update(&[card(1), card(2)], false, Timestamp(0)).unwrap();
    tracker.update(&[card(1).created()], false, Timestamp(10)).unwrap();

    let outcome = tracker.update(&[card(1), card(2), card(3)], true, Timestamp(20)).unwrap();

    assert_eq!(outcome.events.len(), 3);
    for event in &outcome.events {
        match event {
            LifecycleEvent::Inserted { entrance, .. } => {
                assert_eq!(*entrance, Entrance::Instant);
                assert!(!entrance.is_animated());
            }
            other => panic!("unexpected event after reset: {:?}", other),
        }
    }
    assert_eq!(tracker.pending_removals(), 0);
    assert_eq!(tracker.len(), 3);
}

/// The first non-reset snapshot fades its rows in.
#[test]
fn test_first_update_without_reset_animates() {
    let mut tracker = Tracker::new(TrackerConfig::default());
    let outcome = tracker.update(&[card(1)], false, Timestamp(0)).unwrap();

    assert!(matches!(
        outcome.events[0],
        LifecycleEvent::Inserted { entrance: Entrance::FadeIn, .. }
    ));
}
