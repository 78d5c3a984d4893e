//! Texture identifiers.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Namespace used when an identifier is written without one
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Namespaced texture key, written as `namespace:path`.
///
/// # Examples
///
/// ```
/// use etta_types::texture::TextureId;
///
/// let id: TextureId = "etta:textures/item/totem".parse().unwrap();
/// assert_eq!(id.namespace(), "etta");
/// assert_eq!(id.path(), "textures/item/totem");
///
/// let bare = TextureId::from("textures/item/compass");
/// assert_eq!(bare.to_string(), "minecraft:textures/item/compass");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextureId {
	namespace: String,
	path: String,
}

impl TextureId {
	/// Creates an identifier from its two halves.
	pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			path: path.into(),
		}
	}

	/// Namespace half
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// Path half
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Last path component, used for compact diagnostics
	pub fn file_name(&self) -> &str {
		self.path.rsplit('/').next().unwrap_or(&self.path)
	}
}

impl fmt::Display for TextureId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.namespace, self.path)
	}
}

impl FromStr for TextureId {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Self::from(s))
	}
}

impl From<&str> for TextureId {
	fn from(value: &str) -> Self {
		match value.split_once(':') {
			Some((namespace, path)) => Self::new(namespace, path),
			None => Self::new(DEFAULT_NAMESPACE, value),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_with_namespace() {
		let id = TextureId::from("etta:textures/item/clock");
		assert_eq!(id.namespace(), "etta");
		assert_eq!(id.path(), "textures/item/clock");
		assert_eq!(id.file_name(), "clock");
	}

	#[test]
	fn test_parse_without_namespace() {
		let id: TextureId = "textures/block/lava".parse().unwrap();
		assert_eq!(id.namespace(), DEFAULT_NAMESPACE);
		assert_eq!(id.to_string(), "minecraft:textures/block/lava");
	}
}
