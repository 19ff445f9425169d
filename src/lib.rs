//! # ccg-tracker
//!
//! Core of a deck tracker: keeps an ordered list of card rows in step with
//! the live game and decides how each row transitions.
//!
//! ## Design Principles
//!
//! 1. **Identity Stability**: A card that still shows the same row is
//!    mutated in place, never destroyed and recreated.
//!
//! 2. **Canonical Order**: At rest the tracked order equals the last
//!    snapshot's order exactly. Rows playing their exit transition live in
//!    a separate fading set.
//!
//! 3. **Explicit Time**: The host passes logical timestamps; deferred
//!    removals fire from `Tracker::tick`, re-checked by row handle.
//!
//! ## Modules
//!
//! - `core`: Entity ids, the card record, configuration, time, errors
//! - `tracking`: Row equality, the tracked list, reconciliation
//! - `lifecycle`: Deferred removal scheduling
//! - `stats`: Card counters and draw chances
//! - `tracker`: The facade tying it together
//! - `hover`: Hover notifications from the renderer

pub mod core;
pub mod tracking;
pub mod lifecycle;
pub mod stats;
pub mod tracker;
pub mod hover;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Entity, EntityId, TrackedEntity, TrackedId,
    PlayerType, TrackerConfig,
    Timestamp, TrackerError, TrackerResult,
};

pub use crate::tracking::{
    same_row, same_identity, reconcile,
    Entrance, LifecycleEvent, Reconciliation, TrackedList,
};

pub use crate::lifecycle::{LifecycleScheduler, PendingRemoval};

pub use crate::stats::{ChancePair, GameStatus, GameView, PlayerCounts, Stats};

pub use crate::tracker::{SnapshotRow, Tracker, TrackerSnapshot};

pub use crate::hover::{NoHover, RowHover};
