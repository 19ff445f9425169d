//! Hover notifications from the rendering side.
//!
//! The renderer reports pointer enter/leave per row; the tracker forwards
//! them with the row's entity. Both hooks default to doing nothing.

use crate::core::Entity;

/// Receiver of row hover notifications.
pub trait RowHover {
    /// The pointer entered a row.
    fn hover(&mut self, _entity: &Entity) {}

    /// The pointer left a row.
    fn out(&mut self, _entity: &Entity) {}
}

/// Ignores every notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoHover;

impl RowHover for NoHover {}

impl<H: RowHover + ?Sized> RowHover for Box<H> {
    fn hover(&mut self, entity: &Entity) {
        (**self).hover(entity);
    }

    fn out(&mut self, entity: &Entity) {
        (**self).out(entity);
    }
}
