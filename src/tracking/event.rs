//! Lifecycle events reported to the rendering side.
//!
//! The tracker decides which transition applies to each row; it never
//! animates anything itself.

use serde::{Deserialize, Serialize};

use crate::core::TrackedId;

/// How a new row enters the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entrance {
    /// Replaces an outgoing row with the same entity id.
    Replace,
    /// A new row, faded in.
    FadeIn,
    /// A new row shown without animation (list rebuilt after a reset).
    Instant,
}

impl Entrance {
    /// Does this entrance animate?
    #[must_use]
    pub fn is_animated(self) -> bool {
        !matches!(self, Entrance::Instant)
    }
}

/// A row transition produced by reconciliation or by a fired removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Row mutated in place. `highlighted` is set when the count changed.
    Updated { tracked: TrackedId, highlighted: bool },

    /// Row inserted at `index` of the canonical order.
    Inserted {
        tracked: TrackedId,
        index: usize,
        entrance: Entrance,
    },

    /// Row removed. Faded rows stay visible until their removal fires.
    Removed { tracked: TrackedId, faded: bool },

    /// A fading row matched again; its pending removal was cancelled.
    Revived { tracked: TrackedId },

    /// A faded row's delay elapsed and it left the list.
    Expired { tracked: TrackedId },
}

impl LifecycleEvent {
    /// The row this event refers to.
    #[must_use]
    pub fn tracked(&self) -> TrackedId {
        match *self {
            LifecycleEvent::Updated { tracked, .. }
            | LifecycleEvent::Inserted { tracked, .. }
            | LifecycleEvent::Removed { tracked, .. }
            | LifecycleEvent::Revived { tracked }
            | LifecycleEvent::Expired { tracked } => tracked,
        }
    }
}
