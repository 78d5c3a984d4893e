//! Parse configuration for animation description documents.
//!
//! This module provides the knobs that decide how forgiving the parsers are
//! with questionable frame data.

/// Configuration for parsing animation descriptions.
///
/// # Frame limits
///
/// Frame specifications such as `0-100000` or `[0-9999:1, ...]` expand to
/// one entry per frame. `max_expanded_frames` bounds that expansion so a typo
/// cannot allocate an arbitrarily large list; a spec that would exceed it
/// fails with [`ParseError::FrameSpecTooLarge`](crate::error::ParseError).
///
/// # Inverted ranges
///
/// A segment whose first frame is after its last frame is collapsed to its
/// first frame (with a warning) unless `reject_inverted_ranges` is set, in
/// which case the segment is skipped.
///
/// # Presets
///
/// - `default()`: collapse inverted ranges, 4096 frames
/// - `lenient()`: collapse inverted ranges, 65536 frames
/// - `strict()`: reject inverted ranges, 1024 frames
///
/// # Examples
///
/// ```
/// use etta_types::format::ParseConfig;
///
/// // Use default configuration
/// let config = ParseConfig::default();
///
/// // Refuse anything suspicious
/// let config = ParseConfig::strict();
/// assert!(config.reject_inverted_ranges);
///
/// // Create custom configuration
/// let config = ParseConfig::new(true, 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
	/// Skip segments whose frame range is inverted instead of collapsing them
	pub reject_inverted_ranges: bool,
	/// Maximum number of frames a single frame specification may expand to
	pub max_expanded_frames: usize,
}

impl Default for ParseConfig {
	fn default() -> Self {
		Self {
			reject_inverted_ranges: false,
			max_expanded_frames: 4096,
		}
	}
}

impl ParseConfig {
	/// Create a new parse configuration.
	///
	/// # Arguments
	/// * `reject_inverted_ranges` - Skip segments with `first > last`
	/// * `max_expanded_frames` - Frame expansion limit
	pub fn new(reject_inverted_ranges: bool, max_expanded_frames: usize) -> Self {
		Self {
			reject_inverted_ranges,
			max_expanded_frames,
		}
	}

	/// Create a lenient configuration for very long strips.
	/// - `reject_inverted_ranges`: false
	/// - `max_expanded_frames`: 65536
	pub fn lenient() -> Self {
		Self {
			reject_inverted_ranges: false,
			max_expanded_frames: 65536,
		}
	}

	/// Create a strict configuration, useful when validating packs.
	/// - `reject_inverted_ranges`: true
	/// - `max_expanded_frames`: 1024
	pub fn strict() -> Self {
		Self {
			reject_inverted_ranges: true,
			max_expanded_frames: 1024,
		}
	}
}
