//! Error types for the tracker.

use thiserror::Error;

use super::entity::{EntityId, TrackedId};

/// Tracker errors.
///
/// Only contract violations are errors. A deferred removal that fires for
/// a row that is already gone is a normal outcome and is not reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    #[error("Duplicate identity in snapshot: {0}")]
    DuplicateIdentity(EntityId),

    #[error("Unknown tracked row: {0}")]
    UnknownTracked(TrackedId),

    #[error("Snapshot encoding failed: {0}")]
    Snapshot(String),
}

impl From<bincode::Error> for TrackerError {
    fn from(err: bincode::Error) -> Self {
        TrackerError::Snapshot(err.to_string())
    }
}

/// Result type for tracker operations.
pub type TrackerResult<T> = std::result::Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            TrackerError::DuplicateIdentity(EntityId(7)).to_string(),
            "Duplicate identity in snapshot: Entity(7)"
        );
        assert_eq!(
            TrackerError::UnknownTracked(TrackedId(3)).to_string(),
            "Unknown tracked row: Tracked(3)"
        );
    }
}
