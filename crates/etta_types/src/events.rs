//! Registry of named boolean game events.
//!
//! The game registers one predicate per event name; [`EventTable::refresh`]
//! is called once per tick to sample every predicate, and all queries in that
//! tick are answered from the sampled set.

use std::collections::{BTreeSet, HashMap};

use log::debug;

use crate::game::GameState;

type Predicate = Box<dyn Fn() -> bool + Send + Sync>;

/// Named event predicates with a per-tick snapshot of which are active.
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, atomic::{AtomicBool, Ordering}};
/// use etta_types::{events::EventTable, game::GameState};
///
/// let sneaking = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&sneaking);
///
/// let mut events = EventTable::new();
/// events.register("Player_Sneaking", move || flag.load(Ordering::Relaxed));
///
/// events.refresh();
/// assert!(!events.is_event_active("player_sneaking"));
///
/// sneaking.store(true, Ordering::Relaxed);
/// assert!(!events.is_event_active("player_sneaking")); // not sampled yet
/// events.refresh();
/// assert!(events.is_event_active("PLAYER_SNEAKING"));
/// ```
#[derive(Default)]
pub struct EventTable {
	conditions: HashMap<String, Predicate>,
	active: BTreeSet<String>,
}

impl EventTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers (or replaces) the predicate for `name`.
	pub fn register<F>(&mut self, name: &str, condition: F)
	where
		F: Fn() -> bool + Send + Sync + 'static,
	{
		let key = name.to_lowercase();
		debug!("Registered event: {key}");
		self.conditions.insert(key, Box::new(condition));
	}

	/// Removes the predicate for `name`, returning whether one existed.
	pub fn unregister(&mut self, name: &str) -> bool {
		let key = name.to_lowercase();
		self.active.remove(&key);
		self.conditions.remove(&key).is_some()
	}

	/// Samples every predicate and replaces the active set.
	pub fn refresh(&mut self) {
		let active: BTreeSet<String> = self
			.conditions
			.iter()
			.filter(|(_, condition)| condition())
			.map(|(name, _)| name.clone())
			.collect();

		for event in active.difference(&self.active) {
			debug!("EVENT ACTIVATED: {event}");
		}
		for event in self.active.difference(&active) {
			debug!("EVENT DEACTIVATED: {event}");
		}

		self.active = active;
	}

	/// Events active as of the last refresh, sorted by name
	pub fn active_events(&self) -> impl Iterator<Item = &str> {
		self.active.iter().map(String::as_str)
	}

	/// Number of registered events
	pub fn len(&self) -> usize {
		self.conditions.len()
	}

	/// Returns true if no event is registered
	pub fn is_empty(&self) -> bool {
		self.conditions.is_empty()
	}
}

impl std::fmt::Debug for EventTable {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut names: Vec<&String> = self.conditions.keys().collect();
		names.sort();
		f.debug_struct("EventTable").field("events", &names).field("active", &self.active).finish()
	}
}

impl GameState for EventTable {
	fn is_event_active(&self, name: &str) -> bool {
		self.active.contains(&name.to_lowercase())
	}
}
