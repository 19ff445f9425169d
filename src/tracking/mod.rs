//! Row tracking: equality, the tracked list, and reconciliation.
//!
//! ## Example Usage
//!
//! ```
//! use ccg_tracker::core::{Entity, EntityId};
//! use ccg_tracker::tracking::{reconcile, Entrance, LifecycleEvent, TrackedList};
//!
//! let mut list = TrackedList::new();
//! let snapshot = vec![Entity::new(EntityId(1), "CS2_029")];
//!
//! let outcome = reconcile(&mut list, &snapshot, false, false).unwrap();
//! assert!(matches!(
//!     outcome.events[0],
//!     LifecycleEvent::Inserted { index: 0, entrance: Entrance::FadeIn, .. }
//! ));
//! assert_eq!(list.entity_ids(), vec![EntityId(1)]);
//! ```

mod equality;
mod event;
mod list;
mod reconciler;

pub use equality::{same_identity, same_row};
pub use event::{Entrance, LifecycleEvent};
pub use list::TrackedList;
pub use reconciler::{reconcile, Reconciliation};
