//! Lifecycle scheduling for rows leaving the tracked list.
//!
//! Removals come in two kinds:
//! - **Immediate**: the reconciler drops the row in the same cycle.
//! - **Faded**: the row keeps rendering while it fades; the scheduler fires
//!   its removal after a fixed delay (600 ms by default).
//!
//! ## Example Usage
//!
//! ```
//! use ccg_tracker::core::{TrackedId, Timestamp};
//! use ccg_tracker::lifecycle::LifecycleScheduler;
//!
//! let mut scheduler = LifecycleScheduler::new(600);
//! scheduler.schedule(TrackedId(3), Timestamp(0));
//!
//! assert!(scheduler.poll(Timestamp(599)).is_empty());
//! assert_eq!(scheduler.poll(Timestamp(600)).as_slice(), &[TrackedId(3)]);
//! ```

mod scheduler;

pub use scheduler::{LifecycleScheduler, PendingRemoval};
