//! Row equality.
//!
//! Two snapshots of an entity show "the same visible row" only when their
//! identity and every visually significant flag agree. Flipping `jousted`,
//! `is_created`, or (with discard highlighting on) `was_discarded` turns the
//! row into a different row: the old one is replaced with an animation
//! instead of being mutated in place.

use crate::core::Entity;

/// Check whether two entities represent the same visible row.
///
/// ```
/// use ccg_tracker::core::{Entity, EntityId};
/// use ccg_tracker::tracking::same_row;
///
/// let drawn = Entity::new(EntityId(5), "EX1_008");
/// let discarded = drawn.clone().discarded();
///
/// assert!(same_row(&drawn, &discarded, false));
/// assert!(!same_row(&drawn, &discarded, true));
/// ```
#[must_use]
pub fn same_row(a: &Entity, b: &Entity, highlight_discarded: bool) -> bool {
    a.id == b.id
        && a.jousted == b.jousted
        && a.is_created == b.is_created
        && (!highlight_discarded || a.was_discarded == b.was_discarded)
}

/// Check whether two entities share a game identity, ignoring row flags.
#[must_use]
pub fn same_identity(a: &Entity, b: &Entity) -> bool {
    a.id == b.id
}
