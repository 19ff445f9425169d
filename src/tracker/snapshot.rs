//! Serializable tracker view for out-of-process renderers.

use serde::{Deserialize, Serialize};

use crate::core::{Entity, PlayerType, TrackedId, TrackerResult};
use crate::lifecycle::PendingRemoval;
use crate::stats::Stats;

/// One rendered row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRow {
    /// Row handle, stable across snapshots while the row lives.
    pub tracked_id: TrackedId,

    /// Row contents.
    pub entity: Entity,

    /// The row is playing its exit transition.
    pub fading: bool,
}

/// Rendered rows and counters of one tracker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackerSnapshot {
    /// Whose cards these are.
    pub player_type: PlayerType,

    /// Rows in rendered order.
    pub rows: Vec<SnapshotRow>,

    /// Deferred removals of the fading rows, by deadline.
    pub pending: Vec<PendingRemoval>,

    /// Last derived counters.
    pub stats: Option<Stats>,
}

impl TrackerSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> TrackerResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> TrackerResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityId, Timestamp, TrackerError};

    fn sample() -> TrackerSnapshot {
        TrackerSnapshot {
            player_type: PlayerType::Opponent,
            rows: vec![SnapshotRow {
                tracked_id: TrackedId(3),
                entity: Entity::new(EntityId(40), "AT_035").jousted(),
                fading: true,
            }],
            pending: vec![PendingRemoval {
                tracked: TrackedId(3),
                due: Timestamp(1_600),
            }],
            stats: Some(Stats::derive(true, 12, 3, PlayerType::Opponent)),
        }
    }

    #[test]
    fn test_bincode_round_trip() {
        let snapshot = sample();
        let bytes = snapshot.to_bytes().unwrap();
        assert_eq!(TrackerSnapshot::from_bytes(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn test_truncated_bytes_rejected() {
        let bytes = sample().to_bytes().unwrap();
        let err = TrackerSnapshot::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, TrackerError::Snapshot(_)));
    }
}
