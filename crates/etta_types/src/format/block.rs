//! Block animation descriptions built from `segment!` declarations.
//!
//! ```text
//! "animation" {
//!     frametime = 2;
//!     interpolate = false;
//!     segments: {
//!         segment!FALLBACK_FRAME { frame_index = 0; }
//!         segment!SEQUENCE @event("player_running") {
//!             name = "run"; first_frame_index = 1; last_frame_index = 4; priority = 20;
//!         }
//!         segment!ONESHOT @expression({ eval(event_start(player_hurt)) }) {
//!             first_frame_index = 5, last_frame_index = 7
//!         }
//!     }
//! }
//! ```
//!
//! The outer `"animation" { ... }` and `segments { ... }` wrappers are
//! optional; a document may be a bare list of `segment!` declarations.
//! Properties are `key = value` pairs separated by `;` or `,`. A segment that
//! fails to parse is logged and skipped.

use std::{collections::HashMap, str::FromStr};

use log::{debug, warn};

use crate::{
	animation::{AnimationMetadata, AnimationSource, Segment, SegmentKind, Trigger},
	error::ParseError,
	expression::Expression,
	texture::TextureId,
};

use super::{ParseConfig, checked_range};

const SEGMENT_MARKER: &str = "segment!";
const SEGMENTS_KEYWORD: &str = "segments";

/// Segment type keywords, case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
	/// `FALLBACK_FRAME`
	FallbackFrame,
	/// `SINGLE_FRAME`
	SingleFrame,
	/// `SEQUENCE`
	Sequence,
	/// `ONESHOT`
	OneShot,
}

impl FromStr for BlockType {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_uppercase().as_str() {
			"FALLBACK_FRAME" => Ok(Self::FallbackFrame),
			"SINGLE_FRAME" => Ok(Self::SingleFrame),
			"SEQUENCE" => Ok(Self::Sequence),
			"ONESHOT" => Ok(Self::OneShot),
			_ => Err(ParseError::UnknownSegmentType(s.to_string())),
		}
	}
}

/// Parses a block document.
pub fn parse(content: &str, texture: &TextureId, config: &ParseConfig) -> Result<AnimationMetadata, ParseError> {
	let layout = Layout::of(content)?;
	let header = properties(&layout.header);

	let segments = parse_segments(content, layout.body_start, layout.body_end, texture, config);

	AnimationMetadata::new(texture.clone(), AnimationSource::Block, segments)
		.with_frametime(parsed(&header, "frametime").unwrap_or(1))
		.with_interpolate(parsed(&header, "interpolate").unwrap_or(false))
		.validated()
}

/// Where the animation-level properties and the segment list live.
#[derive(Debug, PartialEq, Eq)]
struct Layout {
	header: String,
	body_start: usize,
	body_end: usize,
}

impl Layout {
	fn of(content: &str) -> Result<Self, ParseError> {
		let bare = Self {
			header: String::new(),
			body_start: 0,
			body_end: content.len(),
		};

		let first_marker = content.find(SEGMENT_MARKER).unwrap_or(content.len());
		let Some(open) = find_unquoted(content, 0, b'{').filter(|&open| open < first_marker) else {
			return Ok(bare);
		};

		let (_, close) =
			extract_balanced(content, open + 1, b'{', b'}').ok_or_else(|| syntax(open, "unterminated `{`"))?;
		let inner_start = open + 1;
		let inner_end = close - 1;
		let inner = &content[inner_start..inner_end];

		let Some(keyword) = inner.find(SEGMENTS_KEYWORD).filter(|&at| inner_start + at < first_marker) else {
			return Ok(Self {
				header: String::new(),
				body_start: inner_start,
				body_end: inner_end,
			});
		};

		let mut pos = skip_whitespace(content, inner_start + keyword + SEGMENTS_KEYWORD.len());
		if content[pos..].starts_with(':') {
			pos = skip_whitespace(content, pos + 1);
		}
		if !content[pos..].starts_with('{') {
			return Err(syntax(pos, "expected `{` after `segments`"));
		}
		let (_, segments_close) =
			extract_balanced(content, pos + 1, b'{', b'}').ok_or_else(|| syntax(pos, "unterminated `{`"))?;

		let mut header = content[inner_start..inner_start + keyword].to_string();
		header.push(';');
		header.push_str(&content[segments_close..inner_end]);

		Ok(Self {
			header,
			body_start: pos + 1,
			body_end: segments_close - 1,
		})
	}
}

fn parse_segments(
	content: &str,
	start: usize,
	end: usize,
	texture: &TextureId,
	config: &ParseConfig,
) -> Vec<Segment> {
	let mut segments = Vec::new();
	let mut pos = start;
	let mut index = 0;

	while let Some(found) = content[pos..end].find(SEGMENT_MARKER) {
		let at = pos + found;
		match parse_segment_at(content, at, end, index, config) {
			Ok((segment, next)) => {
				debug!("Parsed {} segment `{}` for {texture}", segment.type_name(), segment.name);
				segments.push(segment);
				pos = next;
			}
			Err(e) => {
				warn!("Skipping segment at byte {at} in {texture}: {e}");
				pos = at + SEGMENT_MARKER.len();
			}
		}
		index += 1;
	}

	segments
}

fn parse_segment_at(
	content: &str,
	at: usize,
	end: usize,
	index: usize,
	config: &ParseConfig,
) -> Result<(Segment, usize), ParseError> {
	let type_start = at + SEGMENT_MARKER.len();
	let type_end = content[type_start..end]
		.find(|c: char| c == '@' || c == '{' || c.is_whitespace())
		.map_or(end, |offset| type_start + offset);
	let block_type: BlockType = content[type_start..type_end].trim().parse()?;

	// Delimiters past the segment list belong to the enclosing document.
	let scoped = &content[..end];
	let mut pos = skip_whitespace(content, type_end);
	let mut corrector = None;
	if content[pos..].starts_with('@') {
		let name_start = pos + 1;
		let paren = content[name_start..end]
			.find('(')
			.map(|offset| name_start + offset)
			.ok_or_else(|| syntax(name_start, "expected `(` after corrector name"))?;
		let (argument, close) =
			extract_balanced(scoped, paren + 1, b'(', b')').ok_or_else(|| syntax(paren, "unterminated `(`"))?;
		corrector = Some((content[name_start..paren].trim(), argument));
		pos = skip_whitespace(content, close);
	}

	if !content[pos..].starts_with('{') {
		return Err(syntax(pos, "expected `{` to open segment properties"));
	}
	let (block, close) =
		extract_balanced(scoped, pos + 1, b'{', b'}').ok_or_else(|| syntax(pos, "unterminated `{`"))?;

	let segment = build_segment(block_type, &properties(block), corrector, index, config)?;
	Ok((segment, close))
}

fn build_segment(
	block_type: BlockType,
	properties: &HashMap<String, String>,
	corrector: Option<(&str, &str)>,
	index: usize,
	config: &ParseConfig,
) -> Result<Segment, ParseError> {
	let name = match properties.get("name") {
		Some(name) => unquote(name).to_string(),
		None => format!("segment_{index}"),
	};

	let trigger = match corrector {
		Some(("event", argument)) => Trigger::event(unquote(argument)),
		Some(("expression", argument)) => Trigger::expression(Expression::new(argument.trim())),
		Some((other, _)) => {
			warn!("Segment `{name}`: unknown corrector `@{other}` ignored");
			Trigger::none()
		}
		None => Trigger::none(),
	};

	let frame = parsed(properties, "frame_index").unwrap_or(0);
	let first = parsed(properties, "first_frame_index").unwrap_or(0);
	let last = parsed(properties, "last_frame_index").unwrap_or(0);

	let kind = match block_type {
		BlockType::FallbackFrame => SegmentKind::Fallback {
			frame,
		},
		BlockType::SingleFrame => SegmentKind::SingleFrame {
			frame,
			trigger,
		},
		BlockType::Sequence => SegmentKind::Sequence {
			range: checked_range(&name, first, last, config)?,
			looping: parsed(properties, "loop").unwrap_or(true),
			pause_on_last_frame: parsed(properties, "pause_on_last_frame").unwrap_or(false),
			trigger,
		},
		BlockType::OneShot => SegmentKind::OneShot {
			range: checked_range(&name, first, last, config)?,
			trigger,
		},
	};

	let mut segment = Segment::new(&name, kind).with_frametime(parsed(properties, "frametime"));
	let priority = parsed(properties, "priority").filter(|_| block_type != BlockType::FallbackFrame);
	if let Some(priority) = priority {
		segment.priority = priority;
	}
	Ok(segment)
}

fn properties(block: &str) -> HashMap<String, String> {
	split_unquoted(block)
		.into_iter()
		.filter_map(|entry| entry.split_once('='))
		.map(|(key, value)| (unquote(key).to_string(), value.trim().to_string()))
		.collect()
}

/// Splits on `;` and `,` that are not inside a `"` string.
fn split_unquoted(block: &str) -> Vec<&str> {
	let mut entries = Vec::new();
	let mut start = 0;
	let mut in_string = false;
	let mut escaped = false;

	for (offset, &byte) in block.as_bytes().iter().enumerate() {
		if escaped {
			escaped = false;
			continue;
		}
		match byte {
			b'\\' if in_string => escaped = true,
			b'"' => in_string = !in_string,
			b';' | b',' if !in_string => {
				entries.push(&block[start..offset]);
				start = offset + 1;
			}
			_ => {}
		}
	}
	entries.push(&block[start..]);
	entries
}

fn parsed<T: FromStr>(properties: &HashMap<String, String>, key: &str) -> Option<T> {
	properties.get(key).and_then(|value| unquote(value).parse().ok())
}

fn unquote(text: &str) -> &str {
	text.trim_matches(['"', '\'', ' ', '\t', '\n', '\r'])
}

fn skip_whitespace(content: &str, pos: usize) -> usize {
	content[pos..].find(|c: char| !c.is_whitespace()).map_or(content.len(), |offset| pos + offset)
}

/// First `needle` at or after `from` that is not inside a `"` string.
fn find_unquoted(content: &str, from: usize, needle: u8) -> Option<usize> {
	let mut in_string = false;
	let mut escaped = false;
	for (offset, &byte) in content.as_bytes().get(from..)?.iter().enumerate() {
		if escaped {
			escaped = false;
			continue;
		}
		match byte {
			b'\\' if in_string => escaped = true,
			b'"' => in_string = !in_string,
			_ if !in_string && byte == needle => return Some(from + offset),
			_ => {}
		}
	}
	None
}

/// Returns the text between `start` and the delimiter closing an already
/// opened one, plus the position just past that delimiter.
///
/// Delimiters inside `"` strings do not count; a backslash inside a string
/// escapes the next character.
pub fn extract_balanced(content: &str, start: usize, open: u8, close: u8) -> Option<(&str, usize)> {
	let mut depth = 1usize;
	let mut in_string = false;
	let mut escaped = false;

	for (offset, &byte) in content.as_bytes().get(start..)?.iter().enumerate() {
		if escaped {
			escaped = false;
			continue;
		}
		match byte {
			b'\\' if in_string => escaped = true,
			b'"' => in_string = !in_string,
			_ if in_string => {}
			_ if byte == open => depth += 1,
			_ if byte == close => {
				depth -= 1;
				if depth == 0 {
					let pos = start + offset;
					return Some((&content[start..pos], pos + 1));
				}
			}
			_ => {}
		}
	}
	None
}

fn syntax(position: usize, message: &str) -> ParseError {
	ParseError::Syntax {
		format: AnimationSource::Block,
		position,
		message: message.to_string(),
	}
}
