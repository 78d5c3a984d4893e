//! Benchmark helper utilities for etta-rs
//!
//! This module generates synthetic animation descriptions of a chosen size so
//! the parsers and the tick loop can be measured without asset files.

use std::fmt::Write;

/// Generates a sectioned document with `segments` event-gated sequences.
///
/// Every segment uses a shared variable and condition so substitution is
/// exercised on each one.
pub fn sectioned_document(segments: usize) -> String {
	let mut doc = String::from("[animation]\nframetime: 2\n\n[variables]\nloop: 0-7\n\n");
	doc.push_str("[conditions]\nhurt: health < 6 && hunger > 2\n\n[fallback]\nframe: 0\n");

	for i in 0..segments {
		let _ = write!(
			doc,
			"\n[segment:s{i}]\ntype: sequence\nframes: $loop\nwhen: $hurt || event(event_{i})\npriority: {}\n",
			i % 50
		);
	}
	doc
}

/// Generates a block document with `segments` segments alternating between
/// event and block-expression triggers.
pub fn block_document(segments: usize) -> String {
	let mut doc = String::from("\"animation\" {\n\tframetime = 2;\n\tsegments: {\n");
	doc.push_str("\t\tsegment!FALLBACK_FRAME { frame_index = 0; }\n");

	for i in 0..segments {
		if i % 2 == 0 {
			let _ = writeln!(
				doc,
				"\t\tsegment!SEQUENCE @event(\"event_{i}\") {{ name = \"s{i}\"; first_frame_index = 1; last_frame_index = 8; }}"
			);
		} else {
			let _ = writeln!(
				doc,
				"\t\tsegment!ONESHOT @expression({{ const low = health < 6; if low {{ eval(event_start(event_{i})) }} }}) {{ name = \"s{i}\"; first_frame_index = 9; last_frame_index = 12; }}"
			);
		}
	}
	doc.push_str("\t}\n}\n");
	doc
}

/// Generates vanilla metadata JSON with `frames` frames.
pub fn mcmeta_document(frames: usize) -> String {
	let list: Vec<String> = (0..frames).map(|i| i.to_string()).collect();
	format!("{{\"animation\": {{\"frametime\": 2, \"frames\": [{}]}}}}", list.join(", "))
}

/// Common segment counts for benchmarking
pub mod sizes {
	/// A typical item texture
	pub const SMALL: usize = 4;
	/// A busy texture
	pub const MEDIUM: usize = 32;
	/// Stress test
	pub const LARGE: usize = 256;
}

#[cfg(test)]
mod tests {
	use etta_types::{animation::AnimationSource, format, format::ParseConfig, texture::TextureId};

	use super::*;

	#[test]
	fn test_generated_documents_parse() {
		let texture = TextureId::from("item/bench");
		let config = ParseConfig::default();

		let sectioned = format::parse(&sectioned_document(sizes::SMALL), &texture, &config).unwrap();
		assert_eq!(sectioned.source, AnimationSource::Sectioned);
		assert_eq!(sectioned.segments.len(), sizes::SMALL + 1);

		let block = format::parse(&block_document(sizes::SMALL), &texture, &config).unwrap();
		assert_eq!(block.source, AnimationSource::Block);
		assert_eq!(block.segments.len(), sizes::SMALL + 1);

		let vanilla = format::parse(&mcmeta_document(16), &texture, &config).unwrap();
		assert_eq!(vanilla.last_frame(), 15);
	}
}
