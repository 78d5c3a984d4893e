//! Prelude module for `etta_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```
//! use etta_types::prelude::*;
//!
//! let mut condition = Expression::parse("event(raining)").unwrap();
//! assert!(!condition.evaluate(&Scope::new(), &Idle));
//! ```

// Animation types
#[doc(inline)]
pub use crate::animation::{
	AnimationMetadata, AnimationRegistry, AnimationSource, FrameRange, Segment, SegmentKind, SegmentSnapshot,
	SegmentState, TextureSnapshot, Trigger,
};

// Errors
#[doc(inline)]
pub use crate::error::{ExpressionError, ParseError};

// Expressions
#[doc(inline)]
pub use crate::expression::{Expression, Scope, Value};

// Formats
#[doc(inline)]
pub use crate::format::ParseConfig;

// Game interfaces
#[doc(inline)]
pub use crate::{
	events::EventTable,
	game::{EventCache, GameState, Idle, PlayerSnapshot},
	texture::TextureId,
};

// Re-export the format module for advanced usage
#[doc(inline)]
pub use crate::format;
