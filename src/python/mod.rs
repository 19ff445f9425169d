//! Python bindings for the ccg-tracker core.
//!
//! # Quick Start
//!
//! ```python
//! import ccg_tracker as ct
//!
//! tracker = ct.Tracker(opponent=True)
//!
//! # Push the game's current card list
//! events = tracker.update([ct.Entity(1, "CS2_029", count=2)], now_ms=0, reset=True)
//!
//! # Drive deferred removals from the host's clock
//! expired = tracker.tick(now_ms=600)
//!
//! stats = tracker.stats(in_menu=False, entity_count=80, deck_count=20, hand_count=4)
//! ```

use pyo3::prelude::*;

mod py_tracker;

pub use py_tracker::*;

/// ccg_tracker: deck tracker row reconciliation.
#[pymodule]
fn ccg_tracker(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyEntity>()?;
    m.add_class::<PyStats>()?;
    m.add_class::<PyTracker>()?;

    Ok(())
}
