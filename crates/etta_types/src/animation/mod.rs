//! Animation model and runtime.
//!
//! - [`segment`]: segment kinds, triggers and per-segment state
//! - [`metadata`]: one texture's parsed animation
//! - [`registry`]: the per-tick state machine over all registered textures

/// Parsed animation metadata
pub mod metadata;

/// Registry and tick logic
pub mod registry;

/// Segments and their state
pub mod segment;

pub use self::metadata::{AnimationMetadata, AnimationSource};
pub use self::registry::{AnimationRegistry, SegmentSnapshot, TextureSnapshot};
pub use self::segment::{FrameRange, Segment, SegmentKind, SegmentState, Trigger};
