//! Card counters and draw chances.
//!
//! Counters show deck and hand sizes. Chance figures use the tracker's
//! display approximation `k * 100 / denominator` for `k` in {1, 2}; this is
//! not a hypergeometric probability and is reproduced as is.
//!
//! Before a game has started (or when the player is not known yet) the
//! counters show a full 30-card deck and an empty hand.
//!
//! ## Example Usage
//!
//! ```
//! use ccg_tracker::core::PlayerType;
//! use ccg_tracker::stats::Stats;
//!
//! let stats = Stats::derive(true, 10, 4, PlayerType::Opponent);
//! assert_eq!(stats.draw_chance.one, 10.0);
//! assert_eq!(stats.draw_chance.two, 20.0);
//! assert_eq!(stats.hand_chance.map(|c| c.one), Some(25.0));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::PlayerType;

/// Deck size shown before the game starts.
pub const DEFAULT_DECK_COUNT: i32 = 30;

/// Hand size shown before the game starts.
pub const DEFAULT_HAND_COUNT: i32 = 0;

/// Entities the game must have created before it counts as started.
pub const GAME_STARTED_MIN_ENTITIES: usize = 67;

/// Player counters read from the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCounts {
    /// Cards left in the deck.
    pub deck_count: i32,

    /// Cards in hand.
    pub hand_count: i32,
}

impl PlayerCounts {
    /// Create player counters.
    #[must_use]
    pub const fn new(deck_count: i32, hand_count: i32) -> Self {
        Self {
            deck_count,
            hand_count,
        }
    }
}

/// Read access to the game state that statistics depend on.
pub trait GameView {
    /// Has a game started?
    fn is_game_started(&self) -> bool;

    /// Counters of the tracked player, if the player is known.
    fn player(&self) -> Option<PlayerCounts>;
}

/// Minimal `GameView` built from what the game log reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    /// The client sits in a menu.
    pub in_menu: bool,

    /// Entities created so far this game.
    pub entity_count: usize,

    /// Tracked player's counters, once known.
    pub player: Option<PlayerCounts>,
}

impl GameView for GameStatus {
    fn is_game_started(&self) -> bool {
        !self.in_menu && self.entity_count >= GAME_STARTED_MIN_ENTITIES
    }

    fn player(&self) -> Option<PlayerCounts> {
        self.player
    }
}

/// Chance of drawing a given card within one or two cards, in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChancePair {
    /// `1 * 100 / denominator`.
    pub one: f64,

    /// `2 * 100 / denominator`.
    pub two: f64,
}

impl ChancePair {
    /// Chances over `denominator` cards; zero when there are none.
    #[must_use]
    pub fn over(denominator: i32) -> Self {
        Self {
            one: chance(1, denominator),
            two: chance(2, denominator),
        }
    }
}

/// `k * 100 / denominator`, or 0 for a non-positive denominator.
#[must_use]
pub fn chance(k: u32, denominator: i32) -> f64 {
    if denominator <= 0 {
        0.0
    } else {
        f64::from(k) * 100.0 / f64::from(denominator)
    }
}

/// Counters shown next to a tracker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Whose cards these are.
    pub player_type: PlayerType,

    /// Cards left in the deck.
    pub deck_count: i32,

    /// Cards in hand.
    pub hand_count: i32,

    /// Deck-based chances.
    pub draw_chance: ChancePair,

    /// Hand-based chances; only computed for the opponent.
    pub hand_chance: Option<ChancePair>,
}

impl Stats {
    /// Derive counters and chances.
    ///
    /// Before the game starts the counts fall back to
    /// `DEFAULT_DECK_COUNT` and `DEFAULT_HAND_COUNT`.
    #[must_use]
    pub fn derive(
        game_started: bool,
        deck_count: i32,
        hand_count: i32,
        player_type: PlayerType,
    ) -> Self {
        let (deck_count, hand_count) = if game_started {
            (deck_count, hand_count)
        } else {
            (DEFAULT_DECK_COUNT, DEFAULT_HAND_COUNT)
        };

        let hand_chance = match player_type {
            PlayerType::Opponent => Some(ChancePair::over(hand_count)),
            PlayerType::Player => None,
        };

        Self {
            player_type,
            deck_count,
            hand_count,
            draw_chance: ChancePair::over(deck_count),
            hand_chance,
        }
    }

    /// Derive from a game view. An unknown player counts as not started.
    #[must_use]
    pub fn from_view(view: &impl GameView, player_type: PlayerType) -> Self {
        match view.player() {
            Some(counts) if view.is_game_started() => {
                Self::derive(true, counts.deck_count, counts.hand_count, player_type)
            }
            _ => Self::derive(false, 0, 0, player_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chance_formula() {
        assert_eq!(chance(1, 10), 10.0);
        assert_eq!(chance(2, 10), 20.0);
        assert_eq!(chance(1, 0), 0.0);
        assert_eq!(chance(2, -3), 0.0);
    }

    #[test]
    fn test_defaults_before_game() {
        let stats = Stats::derive(false, 12, 5, PlayerType::Player);

        assert_eq!(stats.deck_count, 30);
        assert_eq!(stats.hand_count, 0);
        assert!((stats.draw_chance.one - 100.0 / 30.0).abs() < 1e-9);
        assert!((stats.draw_chance.two - 200.0 / 30.0).abs() < 1e-9);
        assert!(stats.hand_chance.is_none());
    }

    #[test]
    fn test_opponent_hand_chance_with_empty_hand() {
        let stats = Stats::derive(false, 0, 0, PlayerType::Opponent);
        assert_eq!(stats.hand_chance, Some(ChancePair { one: 0.0, two: 0.0 }));
    }

    #[test]
    fn test_empty_deck() {
        let stats = Stats::derive(true, 0, 3, PlayerType::Player);
        assert_eq!(stats.draw_chance, ChancePair { one: 0.0, two: 0.0 });
    }

    #[test]
    fn test_game_status_threshold() {
        let mut status = GameStatus {
            in_menu: false,
            entity_count: 66,
            player: Some(PlayerCounts::new(20, 4)),
        };
        assert!(!status.is_game_started());

        status.entity_count = 67;
        assert!(status.is_game_started());

        status.in_menu = true;
        assert!(!status.is_game_started());
    }

    #[test]
    fn test_from_view_missing_player() {
        let status = GameStatus {
            in_menu: false,
            entity_count: 80,
            player: None,
        };

        let stats = Stats::from_view(&status, PlayerType::Opponent);
        assert_eq!(stats.deck_count, 30);
        assert_eq!(stats.hand_count, 0);
    }

    #[test]
    fn test_from_view_started() {
        let status = GameStatus {
            in_menu: false,
            entity_count: 80,
            player: Some(PlayerCounts::new(20, 4)),
        };

        let stats = Stats::from_view(&status, PlayerType::Opponent);
        assert_eq!(stats.deck_count, 20);
        assert_eq!(stats.draw_chance, ChancePair { one: 5.0, two: 10.0 });
        assert_eq!(stats.hand_chance, Some(ChancePair { one: 25.0, two: 50.0 }));
    }

    #[test]
    fn test_serialization() {
        let stats = Stats::derive(true, 10, 2, PlayerType::Opponent);
        let json = serde_json::to_string(&stats).unwrap();
        let deserialized: Stats = serde_json::from_str(&json).unwrap();
        assert_eq!(stats, deserialized);
    }
}
