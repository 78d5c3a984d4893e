//! Frame specifications and `$name` substitution.
//!
//! A frame specification is one of:
//!
//! ```text
//! 5             single frame
//! 0-15          inclusive range
//! 0-20:2        every second element of the range, by position
//! [0, 4-6, 10]  list of any of the above
//! ```
//!
//! The result is always sorted with duplicates removed.

use std::{collections::HashMap, sync::LazyLock};

use log::{error, warn};
use regex::{Captures, Regex};

use crate::error::ParseError;

static TOKEN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").ok());

/// Named text fragments that `$name` tokens expand to.
///
/// Variables expand to their text, conditions to their text wrapped in
/// parentheses. A name defined as both expands as the variable.
#[derive(Debug, Clone, Default)]
pub struct Substitutions {
	variables: HashMap<String, String>,
	conditions: HashMap<String, String>,
}

impl Substitutions {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Defines a variable.
	pub fn define_variable(&mut self, name: &str, value: &str) {
		self.variables.insert(name.to_string(), value.to_string());
	}

	/// Defines a named condition.
	pub fn define_condition(&mut self, name: &str, value: &str) {
		self.conditions.insert(name.to_string(), value.to_string());
	}

	/// Returns true if nothing is defined
	pub fn is_empty(&self) -> bool {
		self.variables.is_empty() && self.conditions.is_empty()
	}

	/// Replaces every `$name` token in `text`.
	///
	/// Tokens are matched whole, so `$a` never rewrites part of `$ab`.
	/// Unknown tokens are left in place and logged.
	pub fn expand(&self, text: &str) -> String {
		if !text.contains('$') {
			return text.to_string();
		}
		let Some(token) = TOKEN.as_ref() else {
			error!("Substitution pattern failed to compile");
			return text.to_string();
		};

		token
			.replace_all(text, |caps: &Captures| {
				let name = &caps[1];
				if let Some(value) = self.variables.get(name) {
					value.clone()
				} else if let Some(condition) = self.conditions.get(name) {
					format!("({condition})")
				} else {
					warn!("Undefined substitution `${name}` in `{text}`");
					caps[0].to_string()
				}
			})
			.into_owned()
	}
}

/// Resolves `spec` to a sorted, de-duplicated list of frames.
///
/// An unparsable single number contributes nothing; an unparsable range bound
/// counts as 0. A step of 0 or one that does not parse is treated as 1. A
/// range whose start is after its end contributes nothing.
pub fn resolve(spec: &str, substitutions: &Substitutions, limit: usize) -> Result<Vec<u32>, ParseError> {
	let expanded = substitutions.expand(spec);
	let expanded = expanded.trim();

	let mut frames = Vec::new();
	match expanded.strip_prefix('[').and_then(|inner| inner.strip_suffix(']')) {
		Some(inner) => {
			for part in inner.split(',') {
				frames.extend(resolve_part(part.trim(), expanded, limit)?);
				if frames.len() > limit {
					return Err(too_large(expanded, limit));
				}
			}
		}
		None => frames = resolve_part(expanded, expanded, limit)?,
	}

	frames.sort_unstable();
	frames.dedup();
	Ok(frames)
}

fn resolve_part(part: &str, spec: &str, limit: usize) -> Result<Vec<u32>, ParseError> {
	if let Some((range, step)) = part.split_once(':') {
		let step = step.trim().parse::<usize>().ok().filter(|&step| step > 0).unwrap_or(1);
		return Ok(resolve_part(range, spec, limit)?.into_iter().step_by(step).collect());
	}

	if let Some((start, end)) = part.split_once('-') {
		let start = start.trim().parse::<u32>().unwrap_or(0);
		let end = end.trim().parse::<u32>().unwrap_or(0);
		if start > end {
			return Ok(Vec::new());
		}
		if (end - start) as usize >= limit {
			return Err(too_large(spec, limit));
		}
		return Ok((start..=end).collect());
	}

	Ok(part.trim().parse::<u32>().ok().into_iter().collect())
}

fn too_large(spec: &str, limit: usize) -> ParseError {
	ParseError::FrameSpecTooLarge {
		spec: spec.to_string(),
		limit,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn frames(spec: &str) -> Vec<u32> {
		resolve(spec, &Substitutions::new(), 4096).unwrap()
	}

	#[test]
	fn test_single_and_range() {
		assert_eq!(frames("5"), vec![5]);
		assert_eq!(frames("0-3"), vec![0, 1, 2, 3]);
		assert_eq!(frames(" 2 - 4 "), vec![2, 3, 4]);
	}

	#[test]
	fn test_list_is_sorted_and_distinct() {
		assert_eq!(frames("[10, 0-2, 2, 1]"), vec![0, 1, 2, 10]);
	}

	#[test]
	fn test_step_keeps_positions() {
		assert_eq!(frames("[0-5:2, 10]"), vec![0, 2, 4, 10]);
		assert_eq!(frames("1-9:3"), vec![1, 4, 7]);
		assert_eq!(frames("0-20:5"), vec![0, 5, 10, 15, 20]);
	}

	#[test]
	fn test_invalid_step_means_one() {
		assert_eq!(frames("0-3:0"), vec![0, 1, 2, 3]);
		assert_eq!(frames("0-3:x"), vec![0, 1, 2, 3]);
	}

	#[test]
	fn test_malformed_numbers() {
		assert_eq!(frames("abc"), Vec::<u32>::new());
		assert_eq!(frames("x-3"), vec![0, 1, 2, 3]);
		assert_eq!(frames("5-2"), Vec::<u32>::new());
		assert_eq!(frames(""), Vec::<u32>::new());
	}

	#[test]
	fn test_limit() {
		let subs = Substitutions::new();
		assert!(matches!(resolve("0-100000", &subs, 4096), Err(ParseError::FrameSpecTooLarge { .. })));
		assert!(resolve("0-4095", &subs, 4096).is_ok());
		assert!(matches!(resolve("[0-3, 4-7, 8-11]", &subs, 10), Err(ParseError::FrameSpecTooLarge { .. })));
	}

	#[test]
	fn test_substitution() {
		let mut subs = Substitutions::new();
		subs.define_variable("walk", "0-3");
		subs.define_variable("walk_fast", "4-5");
		subs.define_condition("low", "health < 5");

		assert_eq!(resolve("[$walk, $walk_fast]", &subs, 64).unwrap(), vec![0, 1, 2, 3, 4, 5]);
		assert_eq!(subs.expand("$low && !$missing"), "(health < 5) && !$missing");
	}

	#[test]
	fn test_variable_wins_over_condition() {
		let mut subs = Substitutions::new();
		subs.define_condition("x", "a > 1");
		subs.define_variable("x", "7");
		assert_eq!(subs.expand("$x"), "7");
		assert!(!subs.is_empty());
	}
}
