//! Tracker bindings for Python.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::{Entity, EntityId, PlayerType, Timestamp, TrackerConfig, TrackerError};
use crate::stats::{GameStatus, PlayerCounts, Stats};
use crate::tracker::Tracker;
use crate::tracking::{Entrance, LifecycleEvent};

fn to_py_err(err: TrackerError) -> PyErr {
    PyErr::new::<PyValueError, _>(format!("{}", err))
}

fn player_type(opponent: bool) -> PlayerType {
    if opponent {
        PlayerType::Opponent
    } else {
        PlayerType::Player
    }
}

/// Python wrapper for Entity.
#[pyclass(name = "Entity")]
#[derive(Clone, Debug)]
pub struct PyEntity(pub Entity);

#[pymethods]
impl PyEntity {
    #[new]
    #[pyo3(signature = (id, card_id, count=1, is_created=false, jousted=false, was_discarded=false, highlight_in_hand=false))]
    fn new(
        id: u32,
        card_id: String,
        count: i32,
        is_created: bool,
        jousted: bool,
        was_discarded: bool,
        highlight_in_hand: bool,
    ) -> Self {
        let mut entity = Entity::new(EntityId(id), card_id).with_count(count);
        entity.is_created = is_created;
        entity.jousted = jousted;
        entity.was_discarded = was_discarded;
        entity.highlight_in_hand = highlight_in_hand;
        Self(entity)
    }

    #[getter]
    fn id(&self) -> u32 {
        self.0.id.raw()
    }

    #[getter]
    fn card_id(&self) -> String {
        self.0.card_id.clone()
    }

    #[getter]
    fn count(&self) -> i32 {
        self.0.count
    }

    fn __repr__(&self) -> String {
        format!("Entity(id={}, card_id={:?}, count={})", self.0.id.raw(), self.0.card_id, self.0.count)
    }
}

/// Python wrapper for Stats.
#[pyclass(name = "Stats")]
#[derive(Clone, Debug)]
pub struct PyStats(pub Stats);

#[pymethods]
impl PyStats {
    #[getter]
    fn deck_count(&self) -> i32 {
        self.0.deck_count
    }

    #[getter]
    fn hand_count(&self) -> i32 {
        self.0.hand_count
    }

    /// Deck-based chances as (one, two).
    #[getter]
    fn draw_chance(&self) -> (f64, f64) {
        (self.0.draw_chance.one, self.0.draw_chance.two)
    }

    /// Hand-based chances as (one, two); None for the player's own tracker.
    #[getter]
    fn hand_chance(&self) -> Option<(f64, f64)> {
        self.0.hand_chance.map(|c| (c.one, c.two))
    }
}

/// Python wrapper for Tracker.
///
/// Events are returned as `(kind, tracked_id, detail)` tuples where
/// `detail` is the highlight flag, entrance name, or fade flag.
#[pyclass(name = "Tracker")]
pub struct PyTracker {
    inner: Tracker,
}

#[pymethods]
impl PyTracker {
    #[new]
    #[pyo3(signature = (opponent=false, highlight_discarded=false, fade_delay_ms=600))]
    fn new(opponent: bool, highlight_discarded: bool, fade_delay_ms: u64) -> Self {
        let config = TrackerConfig::default()
            .with_player_type(player_type(opponent))
            .with_highlight_discarded(highlight_discarded)
            .with_fade_delay_ms(fade_delay_ms);
        Self {
            inner: Tracker::new(config),
        }
    }

    /// Reconcile against a snapshot at time `now_ms`.
    #[pyo3(signature = (entities, now_ms, reset=false))]
    fn update(
        &mut self,
        entities: Vec<PyEntity>,
        now_ms: u64,
        reset: bool,
    ) -> PyResult<Vec<(String, u64, String)>> {
        let incoming: Vec<Entity> = entities.into_iter().map(|e| e.0).collect();
        let outcome = self
            .inner
            .update(&incoming, reset, Timestamp(now_ms))
            .map_err(to_py_err)?;
        Ok(outcome.events.iter().map(describe).collect())
    }

    /// Fire removals due at `now_ms`; returns the expired row handles.
    fn tick(&mut self, now_ms: u64) -> Vec<u64> {
        self.inner
            .tick(Timestamp(now_ms))
            .iter()
            .map(|event| event.tracked().raw())
            .collect()
    }

    /// Rendered rows as (tracked_id, entity) pairs.
    fn rows(&self) -> Vec<(u64, PyEntity)> {
        self.inner
            .rows()
            .into_iter()
            .map(|row| (row.tracked_id.raw(), PyEntity(row.entity.clone())))
            .collect()
    }

    /// Derive counters from the game status.
    ///
    /// `deck_count` and `hand_count` describe the same player and must be
    /// given together; omit both when the player is unknown.
    #[pyo3(signature = (in_menu, entity_count, deck_count=None, hand_count=None))]
    fn stats(
        &mut self,
        in_menu: bool,
        entity_count: usize,
        deck_count: Option<i32>,
        hand_count: Option<i32>,
    ) -> PyResult<PyStats> {
        let status = GameStatus {
            in_menu,
            entity_count,
            player: player_counts(deck_count, hand_count)?,
        };
        Ok(PyStats(self.inner.stats(&status)))
    }

    /// Earliest pending removal deadline in milliseconds.
    fn next_due(&self) -> Option<u64> {
        self.inner.next_due().map(Timestamp::as_millis)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }
}

fn player_counts(
    deck_count: Option<i32>,
    hand_count: Option<i32>,
) -> PyResult<Option<PlayerCounts>> {
    match (deck_count, hand_count) {
        (Some(deck), Some(hand)) => Ok(Some(PlayerCounts::new(deck, hand))),
        (None, None) => Ok(None),
        _ => Err(PyValueError::new_err(
            "deck_count and hand_count must be given together",
        )),
    }
}

fn describe(event: &LifecycleEvent) -> (String, u64, String) {
    let (kind, detail) = match *event {
        LifecycleEvent::Updated { highlighted, .. } => ("updated", highlighted.to_string()),
        LifecycleEvent::Inserted { entrance, .. } => {
            let name = match entrance {
                Entrance::Replace => "replace",
                Entrance::FadeIn => "fade_in",
                Entrance::Instant => "instant",
            };
            ("inserted", name.to_string())
        }
        LifecycleEvent::Removed { faded, .. } => ("removed", faded.to_string()),
        LifecycleEvent::Revived { .. } => ("revived", String::new()),
        LifecycleEvent::Expired { .. } => ("expired", String::new()),
    };
    (kind.to_string(), event.tracked().raw(), detail)
}
