//! Sectioned animation descriptions.
//!
//! ```text
//! # comments run to the end of the line
//! [animation]
//! frametime: 2
//! interpolate: false
//!
//! [variables]
//! walk: 0-7
//!
//! [conditions]
//! hurt: health < 6
//!
//! [fallback]
//! frame: 0
//!
//! [segment:limp]
//! type: sequence
//! frames: $walk
//! when: $hurt
//!     && hunger > 2     # indented lines continue the previous one
//! priority: 20
//! ```
//!
//! Each section is processed when the next one starts. A section that fails is
//! logged and skipped.

use std::collections::HashMap;

use log::{debug, warn};

use crate::{
	animation::{AnimationMetadata, AnimationSource, FrameRange, Segment, SegmentKind, Trigger},
	error::ParseError,
	expression::Expression,
	texture::TextureId,
};

use super::{
	ParseConfig,
	frames::{Substitutions, resolve},
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Section {
	Animation,
	Variables,
	Conditions,
	Fallback,
	Segment(String),
	Unknown(String),
}

impl Section {
	fn from_header(header: &str) -> Self {
		let name = header.trim_start_matches('[').trim_end_matches(']').trim();
		match name {
			"animation" => Self::Animation,
			"variables" => Self::Variables,
			"conditions" => Self::Conditions,
			"fallback" => Self::Fallback,
			_ => match name.strip_prefix("segment:") {
				Some(segment) => Self::Segment(segment.trim().to_string()),
				None => Self::Unknown(name.to_string()),
			},
		}
	}
}

/// Keys of one section. Repeated keys are joined with a space.
#[derive(Debug, Default)]
struct Properties {
	entries: HashMap<String, String>,
	order: Vec<String>,
}

impl Properties {
	fn insert(&mut self, key: &str, value: &str) {
		match self.entries.get_mut(key) {
			Some(existing) => {
				existing.push(' ');
				existing.push_str(value);
			}
			None => {
				self.entries.insert(key.to_string(), value.to_string());
				self.order.push(key.to_string());
			}
		}
	}

	fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	fn parsed<T: std::str::FromStr>(&self, key: &str) -> Option<T> {
		self.get(key).and_then(|value| value.parse().ok())
	}

	fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.order.iter().filter_map(|key| self.get(key).map(|value| (key.as_str(), value)))
	}
}

struct Document<'a> {
	texture: &'a TextureId,
	config: &'a ParseConfig,
	frametime: u32,
	interpolate: bool,
	max_fps: Option<u32>,
	substitutions: Substitutions,
	segments: Vec<Segment>,
}

/// Parses a sectioned document.
pub fn parse(content: &str, texture: &TextureId, config: &ParseConfig) -> Result<AnimationMetadata, ParseError> {
	let mut document = Document {
		texture,
		config,
		frametime: 1,
		interpolate: false,
		max_fps: None,
		substitutions: Substitutions::new(),
		segments: Vec::new(),
	};
	let mut current: Option<(Section, Properties)> = None;

	for line in logical_lines(content) {
		if line.starts_with('[') && line.ends_with(']') {
			if let Some((section, properties)) = current.take() {
				document.process(&section, &properties);
			}
			current = Some((Section::from_header(&line), Properties::default()));
		} else if let Some((key, value)) = line.split_once(':') {
			match current.as_mut() {
				Some((_, properties)) => properties.insert(key.trim(), value.trim()),
				None => debug!("Ignoring `{line}` before the first section in {texture}"),
			}
		}
	}
	if let Some((section, properties)) = current.take() {
		document.process(&section, &properties);
	}

	let mut metadata = AnimationMetadata::new(texture.clone(), AnimationSource::Sectioned, document.segments)
		.with_frametime(document.frametime)
		.with_interpolate(document.interpolate);
	metadata.max_fps = document.max_fps;
	metadata.validated()
}

/// Strips comments and blank lines, joining indented lines onto the previous one.
fn logical_lines(content: &str) -> Vec<String> {
	let mut lines: Vec<String> = Vec::new();

	for raw in content.lines() {
		let line = raw.split('#').next().unwrap_or_default().trim_end();
		if line.is_empty() {
			continue;
		}

		let indented = line.starts_with([' ', '\t']);
		let trimmed = line.trim();
		match lines.last_mut() {
			Some(previous) if indented && !trimmed.starts_with('[') => {
				previous.push(' ');
				previous.push_str(trimmed);
			}
			_ => lines.push(trimmed.to_string()),
		}
	}

	lines
}

impl Document<'_> {
	fn process(&mut self, section: &Section, properties: &Properties) {
		if let Err(e) = self.try_process(section, properties) {
			warn!("Skipping section {section:?} in {}: {e}", self.texture);
		}
	}

	fn try_process(&mut self, section: &Section, properties: &Properties) -> Result<(), ParseError> {
		match section {
			Section::Animation => {
				self.frametime = properties.parsed("frametime").unwrap_or(1);
				self.interpolate = properties.parsed("interpolate").unwrap_or(false);
				if let Some(max_fps) = properties.parsed("max_fps") {
					self.max_fps = Some(max_fps);
				}
			}
			Section::Variables => {
				for (name, value) in properties.iter() {
					self.substitutions.define_variable(name, value);
				}
			}
			Section::Conditions => {
				for (name, value) in properties.iter() {
					self.substitutions.define_condition(name, value);
				}
			}
			Section::Fallback => {
				let frame = self.first_frame(properties.get("frame").unwrap_or("0"))?;
				let segment = Segment::fallback(frame).with_frametime(properties.parsed("frametime"));
				self.segments.push(segment);
			}
			Section::Segment(name) => {
				let segment = self.segment(name, properties)?;
				self.segments.push(segment);
			}
			Section::Unknown(name) => debug!("Ignoring unknown section [{name}] in {}", self.texture),
		}
		Ok(())
	}

	fn frames(&self, spec: &str) -> Result<Vec<u32>, ParseError> {
		resolve(spec, &self.substitutions, self.config.max_expanded_frames)
	}

	fn first_frame(&self, spec: &str) -> Result<u32, ParseError> {
		Ok(self.frames(spec)?.first().copied().unwrap_or(0))
	}

	fn range(&self, properties: &Properties, default: &str) -> Result<FrameRange, ParseError> {
		Ok(FrameRange::spanning(&self.frames(properties.get("frames").unwrap_or(default))?))
	}

	fn segment(&self, name: &str, properties: &Properties) -> Result<Segment, ParseError> {
		let kind_name = properties.get("type").unwrap_or("sequence").to_lowercase();
		let trigger = match self.substitutions.expand(properties.get("when").unwrap_or_default()).trim() {
			"" => Trigger::none(),
			source => Trigger::expression(Expression::new(source)),
		};

		let kind = match kind_name.as_str() {
			"single" => SegmentKind::SingleFrame {
				frame: self.first_frame(properties.get("frame").unwrap_or("0"))?,
				trigger,
			},
			"sequence" => SegmentKind::Sequence {
				range: self.range(properties, "0-0")?,
				looping: properties.parsed("loop").unwrap_or(true),
				pause_on_last_frame: properties.parsed("pause_on_last").unwrap_or(false),
				trigger,
			},
			"weighted" | "conditional" => {
				debug!("Segment `{name}`: `{kind_name}` plays as a looping sequence");
				let default = if kind_name == "weighted" {
					"[0]"
				} else {
					"0-0"
				};
				SegmentKind::Sequence {
					range: self.range(properties, default)?,
					looping: true,
					pause_on_last_frame: false,
					trigger,
				}
			}
			"transition" | "oneshot" => SegmentKind::OneShot {
				range: self.range(properties, "0-0")?,
				trigger,
			},
			_ => return Err(ParseError::UnknownSegmentType(kind_name)),
		};

		let mut segment = Segment::new(name, kind).with_frametime(properties.parsed("frametime"));
		if let Some(priority) = properties.parsed("priority") {
			segment.priority = priority;
		}
		Ok(segment)
	}
}
