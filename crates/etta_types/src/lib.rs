//! This crate provides the core types and algorithms for the `etta-rs` project.
//!
//! # Modules
//!
//! - **`format`**: parsers for sectioned, block and vanilla JSON animation descriptions
//! - **`expression`**: the condition language segments use to decide when to play
//! - **`animation`**: segments, metadata and the per-tick [`AnimationRegistry`](animation::AnimationRegistry)
//! - **`game`** / **`events`**: the interfaces through which live game state flows in
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```
//! use etta_types::prelude::*;
//!
//! let registry = AnimationRegistry::new();
//! let texture = TextureId::from("item/totem_of_undying");
//! let content = "[fallback]\nframe: 0\n[segment:glow]\ntype: single\nframe: 3\nwhen: health < 6\n";
//! registry.load(content, &texture, &ParseConfig::default()).unwrap();
//!
//! registry.tick(&PlayerSnapshot::new(4.0, 20.0, 20), &Idle);
//! assert_eq!(registry.current_frame(&texture), 3);
//! ```
//!
//! Or use explicit paths:
//!
//! ```
//! use etta_types::format::frames::{Substitutions, resolve};
//!
//! assert_eq!(resolve("[0-5:2, 10]", &Substitutions::new(), 64).unwrap(), vec![0, 2, 4, 10]);
//! ```

pub mod animation;

pub mod error;

pub mod events;

pub mod expression;

pub mod format;

pub mod game;

/// `use etta_types::prelude::*;` to import commonly used items.
pub mod prelude;

pub mod texture;
