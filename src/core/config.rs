//! Tracker configuration.
//!
//! Configuration is passed explicitly to the tracker rather than read from
//! process-wide settings. Option changes take effect on the next
//! reconciliation.

use serde::{Deserialize, Serialize};

/// Default delay before a faded row leaves the tracked list.
pub const DEFAULT_FADE_DELAY_MS: u64 = 600;

/// Whose cards a tracker shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerType {
    /// The local player's own deck.
    #[default]
    Player,
    /// The opponent's revealed cards.
    Opponent,
}

impl std::fmt::Display for PlayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerType::Player => write!(f, "Player"),
            PlayerType::Opponent => write!(f, "Opponent"),
        }
    }
}

/// Tracker configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Whose cards this tracker shows.
    pub player_type: PlayerType,

    /// Treat a change of `was_discarded` as a different row.
    pub highlight_discarded: bool,

    /// Delay between a faded removal and the row leaving the list (ms).
    pub fade_delay_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            player_type: PlayerType::Player,
            highlight_discarded: false,
            fade_delay_ms: DEFAULT_FADE_DELAY_MS,
        }
    }
}

impl TrackerConfig {
    /// Config for an opponent tracker.
    #[must_use]
    pub fn opponent() -> Self {
        Self::default().with_player_type(PlayerType::Opponent)
    }

    /// Set the player type.
    #[must_use]
    pub fn with_player_type(mut self, player_type: PlayerType) -> Self {
        self.player_type = player_type;
        self
    }

    /// Enable or disable discard highlighting.
    #[must_use]
    pub fn with_highlight_discarded(mut self, enabled: bool) -> Self {
        self.highlight_discarded = enabled;
        self
    }

    /// Set the fade delay.
    #[must_use]
    pub fn with_fade_delay_ms(mut self, delay_ms: u64) -> Self {
        self.fade_delay_ms = delay_ms;
        self
    }
}
