//! Parsed animation description for one texture.

use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::{error::ParseError, texture::TextureId};

use super::segment::Segment;

/// Where an animation description came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationSource {
	/// Vanilla `.mcmeta` JSON: one unconditional looping sequence
	Mcmeta,
	/// Sectioned `[section] key: value` document
	Sectioned,
	/// `segment!` block document
	Block,
}

impl fmt::Display for AnimationSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Mcmeta => write!(f, "MCMETA"),
			Self::Sectioned => write!(f, "SECTIONED"),
			Self::Block => write!(f, "BLOCK"),
		}
	}
}

/// Everything known about one texture's animation.
#[derive(Debug, Clone)]
pub struct AnimationMetadata {
	/// Texture the animation drives
	pub texture: TextureId,
	/// Default ticks per frame, at least 1
	pub frametime: u32,
	/// Frame interpolation flag, carried for renderers
	pub interpolate: bool,
	/// Frame rate cap, carried for renderers
	pub max_fps: Option<u32>,
	/// Frame width from vanilla metadata
	pub width: Option<u32>,
	/// Frame height from vanilla metadata
	pub height: Option<u32>,
	/// Segments in declaration order
	pub segments: Vec<Segment>,
	/// Document format
	pub source: AnimationSource,
}

impl AnimationMetadata {
	/// Creates metadata with a frametime of 1 and no optional fields.
	pub fn new(texture: TextureId, source: AnimationSource, segments: Vec<Segment>) -> Self {
		Self {
			texture,
			frametime: 1,
			interpolate: false,
			max_fps: None,
			width: None,
			height: None,
			segments,
			source,
		}
	}

	/// Sets the default frametime, clamping 0 to 1.
	pub fn with_frametime(mut self, frametime: u32) -> Self {
		if frametime == 0 {
			warn!("Frametime 0 for {} clamped to 1", self.texture);
		}
		self.frametime = frametime.max(1);
		self
	}

	/// Sets the interpolate flag.
	pub fn with_interpolate(mut self, interpolate: bool) -> Self {
		self.interpolate = interpolate;
		self
	}

	/// Checks the segment list: non-empty and at most one fallback.
	pub fn validated(self) -> Result<Self, ParseError> {
		if self.segments.is_empty() {
			return Err(ParseError::NoSegments {
				texture: self.texture,
			});
		}

		let count = self.segments.iter().filter(|segment| segment.is_fallback()).count();
		if count > 1 {
			return Err(ParseError::MultipleFallbacks {
				texture: self.texture,
				count,
			});
		}

		Ok(self)
	}

	/// Ticks per frame for the segment at `index`
	pub fn effective_frametime(&self, index: usize) -> u32 {
		self.segments
			.get(index)
			.and_then(|segment| segment.frametime)
			.unwrap_or(self.frametime)
			.max(1)
	}

	/// Largest terminal frame of any ranged segment, 0 when there is none
	pub fn last_frame(&self) -> u32 {
		self.segments.iter().filter_map(Segment::last_frame).max().unwrap_or(0)
	}

	/// Looks up a segment by name.
	pub fn segment(&self, name: &str) -> Option<&Segment> {
		self.segments.iter().find(|segment| segment.name == name)
	}
}
