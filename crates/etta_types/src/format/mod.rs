//! Animation description formats.
//!
//! Three document formats describe a texture's animation:
//!
//! - **Sectioned** (`[section]` headers with `key: value` lines), see [`sectioned`]
//! - **Block** (`segment!TYPE @trigger(..) { key = value; }` declarations), see [`block`]
//! - **Vanilla** `.mcmeta` JSON, see [`mcmeta`]
//!
//! [`parse`] picks the format from the content: a document whose first
//! non-blank character is `{` is JSON, one containing `segment!` is a block
//! document, anything else is sectioned.
//!
//! # Examples
//!
//! ```
//! use etta_types::{animation::AnimationSource, format::{self, ParseConfig}, texture::TextureId};
//!
//! let content = "[fallback]\nframe: 0\n\n[segment:idle]\nframes: 1-4\n";
//! let metadata = format::parse(content, &TextureId::from("item/compass"), &ParseConfig::default()).unwrap();
//! assert_eq!(metadata.source, AnimationSource::Sectioned);
//! assert_eq!(metadata.segments.len(), 2);
//! ```

use log::{error, info, warn};

use crate::{
	animation::{AnimationMetadata, AnimationSource, FrameRange},
	error::ParseError,
	texture::TextureId,
};

mod parse_config;

/// Block documents
pub mod block;

/// Frame specifications
pub mod frames;

/// Vanilla JSON metadata
pub mod mcmeta;

/// Sectioned documents
pub mod sectioned;

pub use self::parse_config::ParseConfig;

/// Guesses the format of `content`.
///
/// `#` comments are ignored, and a document that opens with a `[section]`
/// header is sectioned even if a value mentions `segment!`.
pub fn detect(content: &str) -> AnimationSource {
	if content.trim_start().starts_with('{') {
		return AnimationSource::Mcmeta;
	}

	let mut code = content
		.lines()
		.map(|line| line.split('#').next().unwrap_or_default().trim())
		.filter(|line| !line.is_empty())
		.peekable();

	if code.peek().is_some_and(|line| line.starts_with('[')) {
		AnimationSource::Sectioned
	} else if code.any(|line| line.contains("segment!")) {
		AnimationSource::Block
	} else {
		AnimationSource::Sectioned
	}
}

/// Parses an animation description in any supported format.
///
/// Success and failure are both logged with the texture id.
pub fn parse(content: &str, texture: &TextureId, config: &ParseConfig) -> Result<AnimationMetadata, ParseError> {
	let format = detect(content);
	let result = match format {
		AnimationSource::Mcmeta => mcmeta::parse(content, texture),
		AnimationSource::Sectioned => sectioned::parse(content, texture, config),
		AnimationSource::Block => block::parse(content, texture, config),
	};

	match &result {
		Ok(metadata) => info!("Parsed {} segments for {texture} ({format})", metadata.segments.len()),
		Err(e) => error!("Failed to parse {format} animation for {texture}: {e}"),
	}
	result
}

/// Builds a frame range, applying the inverted-range policy of `config`.
pub(crate) fn checked_range(
	segment: &str,
	first: u32,
	last: u32,
	config: &ParseConfig,
) -> Result<FrameRange, ParseError> {
	if first <= last {
		return Ok(FrameRange::new(first, last));
	}
	if config.reject_inverted_ranges {
		return Err(ParseError::InvertedRange {
			segment: segment.to_string(),
			first,
			last,
		});
	}
	warn!("Segment `{segment}` has inverted range {first}-{last}, playing frame {first} only");
	Ok(FrameRange::single(first))
}
