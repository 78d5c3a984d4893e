//! Animation segments and their per-texture runtime state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
	expression::{Expression, Scope},
	game::GameState,
};

/// Priority given to segments that do not declare one
pub const DEFAULT_PRIORITY: i32 = 10;

/// Priority of fallback segments
pub const FALLBACK_PRIORITY: i32 = -1000;

/// Inclusive range of frame indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRange {
	/// First frame
	pub first: u32,
	/// Last frame, inclusive
	pub last: u32,
}

impl FrameRange {
	/// Creates a range. Callers are expected to have checked `first <= last`.
	pub fn new(first: u32, last: u32) -> Self {
		Self {
			first,
			last,
		}
	}

	/// A range holding exactly one frame.
	pub fn single(frame: u32) -> Self {
		Self::new(frame, frame)
	}

	/// Range spanning the smallest and largest of `frames`, or frame 0 when empty.
	pub fn spanning(frames: &[u32]) -> Self {
		let first = frames.iter().copied().min().unwrap_or(0);
		let last = frames.iter().copied().max().unwrap_or(0);
		Self::new(first, last)
	}

	/// Number of frames in the range
	pub fn len(&self) -> u32 {
		self.last.saturating_sub(self.first) + 1
	}

	/// Always false; a range holds at least one frame.
	pub fn is_empty(&self) -> bool {
		false
	}

	/// Returns true if `frame` lies in the range
	pub fn contains(&self, frame: u32) -> bool {
		(self.first..=self.last).contains(&frame)
	}
}

impl fmt::Display for FrameRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.first, self.last)
	}
}

/// What decides whether a segment should be playing.
///
/// An expression wins over an event name when both are present.
#[derive(Debug, Clone, Default)]
pub struct Trigger {
	/// Named game event
	pub event: Option<String>,
	/// Condition expression
	pub expression: Option<Expression>,
}

impl Trigger {
	/// A trigger with no condition.
	pub fn none() -> Self {
		Self::default()
	}

	/// Triggered by a named event.
	pub fn event(name: &str) -> Self {
		Self {
			event: Some(name.to_string()),
			expression: None,
		}
	}

	/// Triggered by an expression.
	pub fn expression(expression: Expression) -> Self {
		Self {
			event: None,
			expression: Some(expression),
		}
	}

	/// Returns true if neither an event nor an expression is set
	pub fn is_none(&self) -> bool {
		self.event.is_none() && self.expression.is_none()
	}

	/// Evaluates the trigger, using `default` when no condition is set.
	pub fn should_play(&mut self, scope: &Scope, game: &dyn GameState, default: bool) -> bool {
		if let Some(expression) = self.expression.as_mut() {
			return expression.evaluate(scope, game);
		}
		match &self.event {
			Some(event) => game.is_event_active(event),
			None => default,
		}
	}
}

/// The four segment behaviours.
#[derive(Debug, Clone)]
pub enum SegmentKind {
	/// Shown whenever nothing of higher priority is active
	Fallback {
		/// Frame to show
		frame: u32,
	},
	/// Shows one frame while its trigger holds
	SingleFrame {
		/// Frame to show
		frame: u32,
		/// Activation condition, false when unset
		trigger: Trigger,
	},
	/// Steps through a range of frames
	Sequence {
		/// Frames to play
		range: FrameRange,
		/// Restart after the last frame
		looping: bool,
		/// Hold the last frame when the trigger drops
		pause_on_last_frame: bool,
		/// Activation condition, true when unset
		trigger: Trigger,
	},
	/// Plays its range once, then rests on the last frame
	OneShot {
		/// Frames to play
		range: FrameRange,
		/// Activation condition, false when unset
		trigger: Trigger,
	},
}

/// One named, prioritised segment of an animation.
#[derive(Debug, Clone)]
pub struct Segment {
	/// Segment name, unique by convention only
	pub name: String,
	/// Higher wins when several segments are active
	pub priority: i32,
	/// Ticks per frame, overriding the animation default
	pub frametime: Option<u32>,
	/// Behaviour and its parameters
	pub kind: SegmentKind,
}

impl Segment {
	/// Creates a segment with the default priority for its kind.
	pub fn new(name: &str, kind: SegmentKind) -> Self {
		let priority = match kind {
			SegmentKind::Fallback { .. } => FALLBACK_PRIORITY,
			_ => DEFAULT_PRIORITY,
		};
		Self {
			name: name.to_string(),
			priority,
			frametime: None,
			kind,
		}
	}

	/// Creates a fallback segment named `fallback`.
	pub fn fallback(frame: u32) -> Self {
		Self::new(
			"fallback",
			SegmentKind::Fallback {
				frame,
			},
		)
	}

	/// Sets the priority.
	pub fn with_priority(mut self, priority: i32) -> Self {
		self.priority = priority;
		self
	}

	/// Sets the frametime override.
	pub fn with_frametime(mut self, frametime: Option<u32>) -> Self {
		self.frametime = frametime;
		self
	}

	/// Keyword naming the kind, as used in logs and snapshots
	pub fn type_name(&self) -> &'static str {
		match self.kind {
			SegmentKind::Fallback { .. } => "fallback",
			SegmentKind::SingleFrame { .. } => "single_frame",
			SegmentKind::Sequence { .. } => "sequence",
			SegmentKind::OneShot { .. } => "oneshot",
		}
	}

	/// Returns true for fallback segments
	pub fn is_fallback(&self) -> bool {
		matches!(self.kind, SegmentKind::Fallback { .. })
	}

	/// Frame the segment starts on
	pub fn first_frame(&self) -> u32 {
		match &self.kind {
			SegmentKind::Fallback {
				frame,
			}
			| SegmentKind::SingleFrame {
				frame,
				..
			} => *frame,
			SegmentKind::Sequence {
				range,
				..
			}
			| SegmentKind::OneShot {
				range,
				..
			} => range.first,
		}
	}

	/// Last frame of a ranged segment, `None` for single-frame kinds
	pub fn last_frame(&self) -> Option<u32> {
		match &self.kind {
			SegmentKind::Sequence {
				range,
				..
			}
			| SegmentKind::OneShot {
				range,
				..
			} => Some(range.last),
			_ => None,
		}
	}

	/// The segment's trigger, if its kind has one
	pub fn trigger(&self) -> Option<&Trigger> {
		match &self.kind {
			SegmentKind::Fallback { .. } => None,
			SegmentKind::SingleFrame {
				trigger,
				..
			}
			| SegmentKind::Sequence {
				trigger,
				..
			}
			| SegmentKind::OneShot {
				trigger,
				..
			} => Some(trigger),
		}
	}
}

/// Runtime state of one segment of a registered texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentState {
	/// Frame the segment currently shows
	pub current_frame: u32,
	/// Whether the segment is currently playing
	pub active: bool,
	/// Ticks spent on the current frame
	pub tick_counter: u32,
	/// One-shot segments: the single play has finished
	pub has_played: bool,
	/// Sequences: completed loops since registration
	pub cycle_count: u32,
}

impl SegmentState {
	/// Initial state: first frame, active only for fallbacks.
	pub fn new(segment: &Segment) -> Self {
		Self {
			current_frame: segment.first_frame(),
			active: segment.is_fallback(),
			tick_counter: 0,
			has_played: false,
			cycle_count: 0,
		}
	}
}
