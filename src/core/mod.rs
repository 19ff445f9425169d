//! Core tracker types: entities, configuration, logical time, errors.

pub mod entity;
pub mod config;
pub mod error;
pub mod time;

pub use entity::{Entity, EntityId, TrackedEntity, TrackedId};
pub use config::{PlayerType, TrackerConfig, DEFAULT_FADE_DELAY_MS};
pub use error::{TrackerError, TrackerResult};
pub use time::Timestamp;
