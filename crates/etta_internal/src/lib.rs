//! This module is separated into its own crate so the facade stays a thin re-export, and should not be used directly.

/// `use etta_rs::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export etta_types for convenience
pub use etta_types;

// Re-export commonly used types at crate root
pub use etta_types::{
	animation::{AnimationMetadata, AnimationRegistry, AnimationSource},
	format::{ParseConfig, parse},
	game::{GameState, PlayerSnapshot},
	texture::TextureId,
};
