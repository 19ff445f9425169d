//! Entity identification and the card record tracked per row.
//!
//! ## Two kinds of identity
//!
//! - `EntityId`: assigned by the game, stable for the lifetime of one
//!   logical card instance.
//! - `TrackedId`: assigned by the tracker, one per row wrapper. During a
//!   replacement the outgoing row and its successor share an `EntityId`
//!   but never a `TrackedId`. Tracked ids are allocated monotonically and
//!   never reused, so a stale handle can never address a different row.
//!
//! ## Usage
//!
//! ```
//! use ccg_tracker::core::{Entity, EntityId};
//!
//! let card = Entity::new(EntityId(12), "EX1_066")
//!     .with_count(2)
//!     .created();
//!
//! assert_eq!(card.id, EntityId(12));
//! assert_eq!(card.count, 2);
//! assert!(card.is_created);
//! assert!(!card.jousted);
//! ```

use serde::{Deserialize, Serialize};

/// Game-assigned identifier of one card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Tracker-assigned handle of one row wrapper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackedId(pub u64);

impl TrackedId {
    /// Create a new tracked ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for TrackedId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tracked({})", self.0)
    }
}

/// One card instance relevant to a player's state.
///
/// `id` and `jousted` are fixed for the lifetime of the instance; the
/// remaining fields follow the game and are copied onto the tracked row
/// when a snapshot matches it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    /// Stable identity.
    pub id: EntityId,

    /// Card definition identifier (display only, never used for matching).
    pub card_id: String,

    /// Copies in hand/deck.
    pub count: i32,

    /// Generated during play rather than part of the starting deck.
    pub is_created: bool,

    /// Revealed by a joust.
    pub jousted: bool,

    /// Discarded from hand.
    pub was_discarded: bool,

    /// Currently highlighted because a copy sits in hand.
    pub highlight_in_hand: bool,
}

impl Entity {
    /// Create an entity with a count of 1 and every flag cleared.
    pub fn new(id: EntityId, card_id: impl Into<String>) -> Self {
        Self {
            id,
            card_id: card_id.into(),
            count: 1,
            is_created: false,
            jousted: false,
            was_discarded: false,
            highlight_in_hand: false,
        }
    }

    /// Set the copy count.
    #[must_use]
    pub fn with_count(mut self, count: i32) -> Self {
        self.count = count;
        self
    }

    /// Mark as generated during play.
    #[must_use]
    pub fn created(mut self) -> Self {
        self.is_created = true;
        self
    }

    /// Mark as revealed by a joust.
    #[must_use]
    pub fn jousted(mut self) -> Self {
        self.jousted = true;
        self
    }

    /// Mark as discarded.
    #[must_use]
    pub fn discarded(mut self) -> Self {
        self.was_discarded = true;
        self
    }

    /// Mark as highlighted in hand.
    #[must_use]
    pub fn highlighted(mut self) -> Self {
        self.highlight_in_hand = true;
        self
    }
}

/// A row of the tracked list: an entity plus the handle that owns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedEntity {
    /// Row handle.
    pub tracked_id: TrackedId,

    /// The wrapped entity, mutated in place on updates.
    pub entity: Entity,
}

impl TrackedEntity {
    /// Wrap an entity.
    #[must_use]
    pub fn new(tracked_id: TrackedId, entity: Entity) -> Self {
        Self { tracked_id, entity }
    }

    /// Game identity of the wrapped entity.
    #[must_use]
    pub fn entity_id(&self) -> EntityId {
        self.entity.id
    }
}
