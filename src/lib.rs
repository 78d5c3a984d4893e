#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `etta-rs` drives texture animations from live game state.
//!
//! Animation descriptions come in three shapes: a sectioned text format, a
//! block format built from `segment!` declarations, and the vanilla JSON
//! `.mcmeta` file. Each is parsed into segments that carry a frame range, a
//! priority and an optional trigger; every game tick the highest-priority
//! playing segment decides which frame a texture shows.
//!
pub use etta_internal::*;
