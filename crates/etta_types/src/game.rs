//! Interfaces to the live game the animations react to.
//!
//! The core never talks to a game engine directly. Each tick the caller hands
//! over a [`PlayerSnapshot`] with the numeric values expressions read as
//! variables, and a [`GameState`] implementation that answers named event
//! queries and the probe functions (`holding_item`, `has_effect`, ...).

use std::{cell::RefCell, collections::HashMap};

use serde::{Deserialize, Serialize};

/// Numeric player values sampled once per tick.
///
/// The defaults are the values used when no player is present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
	/// Current health
	pub health: f64,
	/// Maximum health
	pub max_health: f64,
	/// Food level
	pub hunger: i32,
}

impl Default for PlayerSnapshot {
	fn default() -> Self {
		Self {
			health: 20.0,
			max_health: 20.0,
			hunger: 20,
		}
	}
}

impl PlayerSnapshot {
	/// Creates a snapshot from explicit values.
	pub fn new(health: f64, max_health: f64, hunger: i32) -> Self {
		Self {
			health,
			max_health,
			hunger,
		}
	}
}

/// Game-side queries available to expressions and event triggers.
///
/// Implementations must not fail: anything that cannot be answered returns
/// the neutral value (`false` or `0.0`), which is also what the provided
/// methods do.
pub trait GameState {
	/// Whether the named event is active. Names are case-insensitive.
	fn is_event_active(&self, name: &str) -> bool;

	/// Whether the main-hand item name contains `item`.
	fn holding_item(&self, _item: &str) -> bool {
		false
	}

	/// Whether the player has an effect whose name contains `effect`.
	fn has_effect(&self, _effect: &str) -> bool {
		false
	}

	/// Whether the player stands in a biome whose name contains `biome`.
	fn in_biome(&self, _biome: &str) -> bool {
		false
	}

	/// Armor points.
	fn armor_value(&self) -> f64 {
		0.0
	}

	/// Light level at the player position.
	fn light_level(&self) -> f64 {
		0.0
	}
}

/// A game with nothing going on: no events, every probe neutral.
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl GameState for Idle {
	fn is_event_active(&self, _name: &str) -> bool {
		false
	}
}

/// Per-tick memo around a [`GameState`].
///
/// Every event name is looked up at most once for the lifetime of the cache,
/// so all segments of all textures in one tick see the same answer. Keys are
/// folded to lowercase. Probe functions are forwarded uncached.
pub struct EventCache<'a> {
	source: &'a dyn GameState,
	events: RefCell<HashMap<String, bool>>,
}

impl<'a> EventCache<'a> {
	/// Wraps `source` for one tick.
	pub fn new(source: &'a dyn GameState) -> Self {
		Self {
			source,
			events: RefCell::new(HashMap::new()),
		}
	}

	/// Number of distinct events looked up so far
	pub fn lookups(&self) -> usize {
		self.events.borrow().len()
	}
}

impl std::fmt::Debug for EventCache<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventCache").field("events", &self.events.borrow()).finish_non_exhaustive()
	}
}

impl GameState for EventCache<'_> {
	fn is_event_active(&self, name: &str) -> bool {
		let key = name.to_lowercase();
		if let Some(&active) = self.events.borrow().get(&key) {
			return active;
		}
		let active = self.source.is_event_active(&key);
		self.events.borrow_mut().insert(key, active);
		active
	}

	fn holding_item(&self, item: &str) -> bool {
		self.source.holding_item(item)
	}

	fn has_effect(&self, effect: &str) -> bool {
		self.source.has_effect(effect)
	}

	fn in_biome(&self, biome: &str) -> bool {
		self.source.in_biome(biome)
	}

	fn armor_value(&self) -> f64 {
		self.source.armor_value()
	}

	fn light_level(&self) -> f64 {
		self.source.light_level()
	}
}
