//! Error types for animation description parsing and expression handling.

use thiserror::Error;

use crate::{animation::AnimationSource, texture::TextureId};

/// Errors that can occur when parsing an animation description
#[derive(Debug, Error)]
pub enum ParseError {
	/// The document produced no usable segment
	#[error("No segments found for {texture}")]
	NoSegments {
		/// Texture the document was parsed for
		texture: TextureId,
	},

	/// More than one fallback segment was declared
	#[error("Multiple fallbacks ({count}) in {texture}")]
	MultipleFallbacks {
		/// Texture the document was parsed for
		texture: TextureId,
		/// Number of fallback segments found
		count: usize,
	},

	/// Segment type keyword is not recognised
	#[error("Unknown segment type: {0}")]
	UnknownSegmentType(String),

	/// A frame range ends before it starts
	#[error("Inverted frame range in segment `{segment}`: {first} > {last}")]
	InvertedRange {
		/// Segment name
		segment: String,
		/// First frame index
		first: u32,
		/// Last frame index
		last: u32,
	},

	/// A frame specification expands to more frames than allowed
	#[error("Frame spec `{spec}` expands past {limit} frames")]
	FrameSpecTooLarge {
		/// The offending specification, after substitution
		spec: String,
		/// Configured expansion limit
		limit: usize,
	},

	/// Structural syntax problem
	#[error("Invalid {format} syntax at byte {position}: {message}")]
	Syntax {
		/// Format being parsed
		format: AnimationSource,
		/// Byte offset into the document
		position: usize,
		/// Description of the problem
		message: String,
	},

	/// Vanilla metadata without an `animation` object
	#[error("Not an animated texture: missing `animation` object")]
	NotAnimated,

	/// Vanilla metadata is not valid JSON
	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

/// Errors produced while parsing or running an expression
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
	/// A character that starts no token
	#[error("Unexpected character `{ch}` at byte {position}")]
	UnexpectedChar {
		/// The character
		ch: char,
		/// Byte offset
		position: usize,
	},

	/// A string literal without its closing quote
	#[error("Unterminated string starting at byte {position}")]
	UnterminatedString {
		/// Byte offset of the opening quote
		position: usize,
	},

	/// Numeric literal that does not parse
	#[error("Invalid number `{text}` at byte {position}")]
	InvalidNumber {
		/// Literal text
		text: String,
		/// Byte offset
		position: usize,
	},

	/// A token in a place where something else was required
	#[error("Expected {expected}, found `{found}` at byte {position}")]
	UnexpectedToken {
		/// What the parser wanted
		expected: String,
		/// What it saw
		found: String,
		/// Byte offset
		position: usize,
	},

	/// Input ended early
	#[error("Unexpected end of expression, expected {expected}")]
	UnexpectedEnd {
		/// What the parser wanted
		expected: String,
	},

	/// Parentheses, operators or blocks nested past the parser's limit
	#[error("Expression nested too deeply at byte {position}")]
	TooDeep {
		/// Byte offset where the limit was hit
		position: usize,
	},

	/// Assignment to a `const` binding
	#[error("Cannot assign to constant `{0}`")]
	AssignToConst(String),

	/// Assignment to a name that was never declared with `mut`
	#[error("Cannot assign to undeclared variable `{0}`")]
	UndeclaredAssignment(String),
}
