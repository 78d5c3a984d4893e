//! Vanilla `.mcmeta` animation metadata.
//!
//! Only the `animation` object is read. The result is a single unconditional
//! looping sequence named `default` covering one frame per `frames` entry.

use serde::{Deserialize, de::IgnoredAny};

use crate::{
	animation::{AnimationMetadata, AnimationSource, FrameRange, Segment, SegmentKind, Trigger},
	error::ParseError,
	texture::TextureId,
};

#[derive(Debug, Deserialize)]
struct McmetaFile {
	animation: Option<AnimationSection>,
}

#[derive(Debug, Deserialize)]
struct AnimationSection {
	frametime: Option<u32>,
	#[serde(default)]
	interpolate: bool,
	frames: Option<Vec<IgnoredAny>>,
	width: Option<u32>,
	height: Option<u32>,
}

/// Parses vanilla metadata JSON.
pub fn parse(content: &str, texture: &TextureId) -> Result<AnimationMetadata, ParseError> {
	let file: McmetaFile = serde_json::from_str(content)?;
	let animation = file.animation.ok_or(ParseError::NotAnimated)?;

	let frame_count = animation.frames.as_ref().map_or(0, Vec::len);
	let last = u32::try_from(frame_count.saturating_sub(1)).unwrap_or(u32::MAX);

	let segment = Segment::new(
		"default",
		SegmentKind::Sequence {
			range: FrameRange::new(0, last),
			looping: true,
			pause_on_last_frame: false,
			trigger: Trigger::none(),
		},
	)
	.with_priority(0);

	let mut metadata = AnimationMetadata::new(texture.clone(), AnimationSource::Mcmeta, vec![segment])
		.with_frametime(animation.frametime.unwrap_or(1))
		.with_interpolate(animation.interpolate);
	metadata.width = animation.width;
	metadata.height = animation.height;
	metadata.validated()
}
