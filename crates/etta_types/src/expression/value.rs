//! Runtime values and the variable scope expressions read from.

use std::{collections::HashMap, fmt};

use crate::game::PlayerSnapshot;

/// A value produced while evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Floating-point number
	Number(f64),
	/// Boolean
	Bool(bool),
	/// Text, only meaningful to `==`, `!=` and name arguments
	Str(String),
}

impl Value {
	/// Truthiness: non-zero numbers and `true`. Strings are always false.
	pub fn truthy(&self) -> bool {
		match self {
			Self::Number(n) => *n != 0.0 && !n.is_nan(),
			Self::Bool(b) => *b,
			Self::Str(_) => false,
		}
	}

	/// Numeric view: booleans are 1.0/0.0, strings 0.0.
	pub fn as_number(&self) -> f64 {
		match self {
			Self::Number(n) => *n,
			Self::Bool(true) => 1.0,
			Self::Bool(false) => 0.0,
			Self::Str(_) => 0.0,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(n) => write!(f, "{n}"),
			Self::Bool(b) => write!(f, "{b}"),
			Self::Str(s) => write!(f, "{s}"),
		}
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Self::Number(f64::from(value))
	}
}

impl From<u32> for Value {
	fn from(value: u32) -> Self {
		Self::Number(f64::from(value))
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::Str(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::Str(value)
	}
}

/// Variables visible to one evaluation.
///
/// Besides named variables the scope carries the frame index and completed
/// cycle count of the segment being evaluated, read by `frame_index()` and
/// `cycle_count()`.
#[derive(Debug, Clone, Default)]
pub struct Scope {
	variables: HashMap<String, Value>,
	frame_index: u32,
	cycle_count: u32,
}

impl Scope {
	/// Creates an empty scope.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a scope holding `health`, `max_health` and `hunger`.
	pub fn from_player(player: &PlayerSnapshot) -> Self {
		let mut scope = Self::new();
		scope.set("health", player.health);
		scope.set("max_health", player.max_health);
		scope.set("hunger", player.hunger);
		scope
	}

	/// Sets a variable, replacing any previous value.
	pub fn set(&mut self, name: &str, value: impl Into<Value>) {
		self.variables.insert(name.to_string(), value.into());
	}

	/// Builder form of [`Scope::set`].
	pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
		self.set(name, value);
		self
	}

	/// Looks up a variable.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.variables.get(name)
	}

	/// Sets the per-segment values read by `frame_index()` and `cycle_count()`.
	pub fn set_segment(&mut self, frame_index: u32, cycle_count: u32) {
		self.frame_index = frame_index;
		self.cycle_count = cycle_count;
	}

	/// Current frame of the segment being evaluated
	pub fn frame_index(&self) -> u32 {
		self.frame_index
	}

	/// Completed cycles of the segment being evaluated
	pub fn cycle_count(&self) -> u32 {
		self.cycle_count
	}
}
