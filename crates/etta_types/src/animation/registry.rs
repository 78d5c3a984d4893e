//! Per-texture animation state and the tick that advances it.
//!
//! An [`AnimationRegistry`] owns every registered texture's metadata together
//! with one [`SegmentState`] per segment. Each call to
//! [`AnimationRegistry::tick`] advances all textures by one step; queries such
//! as [`AnimationRegistry::current_frame`] read the result.
//!
//! # Tick rules
//!
//! Segments are visited in declaration order:
//!
//! - **Fallback** is active exactly when no segment of strictly higher
//!   priority is active, looking at the flags as already updated this tick.
//! - **SingleFrame** follows its trigger, jumping to its frame on activation.
//! - **Sequence** (unconditional when it has no trigger) starts on its first
//!   frame when its trigger rises and advances every `frametime` ticks. Past
//!   the last frame it wraps while looping and still wanted, otherwise it
//!   stops on the last frame.
//! - **OneShot** arms once, plays its range and rests on its last frame.
//!
//! The texture shows the frame of the active segment with the highest
//! priority; ties go to the segment declared first.

use std::{
	cmp::Reverse,
	collections::{HashMap, HashSet},
	fmt,
	panic::{self, AssertUnwindSafe},
	sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

use crate::{
	error::ParseError,
	expression::Scope,
	format::{self, ParseConfig},
	game::{EventCache, GameState, PlayerSnapshot},
	texture::TextureId,
};

use super::{
	metadata::{AnimationMetadata, AnimationSource},
	segment::{SegmentKind, SegmentState},
};

/// Serializable view of one segment and its state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSnapshot {
	/// Segment name
	pub name: String,
	/// Segment kind keyword
	pub kind: String,
	/// Segment priority
	pub priority: i32,
	/// Runtime state
	#[serde(flatten)]
	pub state: SegmentState,
}

/// Serializable view of one texture's animation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSnapshot {
	/// Texture id
	pub texture: TextureId,
	/// Document format
	pub source: AnimationSource,
	/// Default ticks per frame
	pub frametime: u32,
	/// Frame the texture shows
	pub current_frame: u32,
	/// Segments in declaration order
	pub segments: Vec<SegmentSnapshot>,
}

impl fmt::Display for TextureSnapshot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		writeln!(f, "Animation: {} ({})", self.texture, self.source)?;
		writeln!(f, "Frametime: {}", self.frametime)?;
		writeln!(f, "Current Frame: {}", self.current_frame)?;
		writeln!(f, "Segments:")?;
		for segment in &self.segments {
			let status = if segment.state.active {
				"ACTIVE"
			} else {
				"inactive"
			};
			writeln!(
				f,
				"  - {}: {status} (frame {}, priority {})",
				segment.name, segment.state.current_frame, segment.priority
			)?;
		}
		Ok(())
	}
}

/// One registered texture: metadata plus a state per segment, index-aligned.
#[derive(Debug, Clone)]
struct TextureAnimation {
	metadata: AnimationMetadata,
	states: Vec<SegmentState>,
}

impl TextureAnimation {
	fn new(metadata: AnimationMetadata) -> Self {
		let states = metadata.segments.iter().map(SegmentState::new).collect();
		Self {
			metadata,
			states,
		}
	}

	fn current_frame(&self) -> u32 {
		if self.metadata.source == AnimationSource::Mcmeta {
			return self.states.first().map_or(0, |state| state.current_frame);
		}

		self.metadata
			.segments
			.iter()
			.zip(&self.states)
			.filter(|(_, state)| state.active)
			.min_by_key(|(segment, _)| Reverse(segment.priority))
			.map_or(0, |(_, state)| state.current_frame)
	}

	fn tick(&mut self, player: &PlayerSnapshot, game: &dyn GameState) {
		if self.metadata.source == AnimationSource::Mcmeta {
			self.tick_vanilla();
			return;
		}

		let mut scope = Scope::from_player(player);
		scope.set("first_frame", 0u32);
		scope.set("last_frame", self.metadata.last_frame());

		for index in 0..self.states.len() {
			self.tick_segment(index, &mut scope, game);
		}
	}

	fn tick_vanilla(&mut self) {
		let frametime = self.metadata.effective_frametime(0);
		let (Some(segment), Some(state)) = (self.metadata.segments.first(), self.states.first_mut()) else {
			return;
		};
		let SegmentKind::Sequence {
			range,
			looping,
			..
		} = &segment.kind
		else {
			return;
		};

		state.active = true;
		state.tick_counter += 1;
		if state.tick_counter >= frametime {
			state.tick_counter = 0;
			state.current_frame += 1;
			if state.current_frame > range.last {
				if *looping {
					state.current_frame = range.first;
					state.cycle_count += 1;
				} else {
					state.current_frame = range.last;
				}
			}
		}
	}

	fn tick_segment(&mut self, index: usize, scope: &mut Scope, game: &dyn GameState) {
		let frametime = self.metadata.effective_frametime(index);
		let texture = &self.metadata.texture;

		if self.metadata.segments[index].is_fallback() {
			let priority = self.metadata.segments[index].priority;
			let outranked = self
				.metadata
				.segments
				.iter()
				.zip(&self.states)
				.any(|(other, state)| other.priority > priority && state.active);
			self.states[index].active = !outranked;
			return;
		}

		let segment = &mut self.metadata.segments[index];
		let state = &mut self.states[index];
		scope.set_segment(state.current_frame, state.cycle_count);

		match &mut segment.kind {
			SegmentKind::Fallback { .. } => {}

			SegmentKind::SingleFrame {
				frame,
				trigger,
			} => {
				let should = trigger.should_play(scope, game, false);
				if should != state.active {
					state.active = should;
					if should {
						state.current_frame = *frame;
						debug!("Activated single frame `{}` for {texture}", segment.name);
					}
				}
			}

			SegmentKind::Sequence {
				range,
				looping,
				pause_on_last_frame,
				trigger,
			} => {
				let should = trigger.should_play(scope, game, true);

				if should && !state.active {
					state.active = true;
					state.current_frame = range.first;
					state.tick_counter = 0;
					debug!("Activated sequence `{}` for {texture}", segment.name);
				} else if !should && state.active {
					if *pause_on_last_frame {
						state.current_frame = range.last;
					} else if !*looping {
						state.active = false;
					}
				}

				if state.active {
					state.tick_counter += 1;
					if state.tick_counter >= frametime {
						state.tick_counter = 0;
						state.current_frame += 1;
						if state.current_frame > range.last {
							if *looping && should {
								state.current_frame = range.first;
								state.cycle_count += 1;
							} else {
								state.current_frame = range.last;
								if !*pause_on_last_frame {
									state.active = false;
								}
							}
						}
					}
				}
			}

			SegmentKind::OneShot {
				range,
				trigger,
			} => {
				let should = trigger.should_play(scope, game, false);

				if should && !state.active && !state.has_played {
					state.active = true;
					state.current_frame = range.first;
					state.tick_counter = 0;
					debug!("Activated one-shot `{}` for {texture}", segment.name);
				}

				if state.active {
					state.tick_counter += 1;
					if state.tick_counter >= frametime {
						state.tick_counter = 0;
						state.current_frame += 1;
						if state.current_frame > range.last {
							state.current_frame = range.last;
							state.active = false;
							state.has_played = true;
						}
					}
				}
			}
		}
	}

	fn snapshot(&self) -> TextureSnapshot {
		TextureSnapshot {
			texture: self.metadata.texture.clone(),
			source: self.metadata.source,
			frametime: self.metadata.frametime,
			current_frame: self.current_frame(),
			segments: self
				.metadata
				.segments
				.iter()
				.zip(&self.states)
				.map(|(segment, state)| SegmentSnapshot {
					name: segment.name.clone(),
					kind: segment.type_name().to_string(),
					priority: segment.priority,
					state: *state,
				})
				.collect(),
		}
	}
}

/// Every registered texture animation.
///
/// The registry is `Send + Sync`. Registration and ticks take the write lock;
/// queries take the read lock, so a query never observes a half-built segment
/// list.
///
/// # Examples
///
/// ```
/// use etta_types::{
/// 	animation::AnimationRegistry,
/// 	format::ParseConfig,
/// 	game::{Idle, PlayerSnapshot},
/// 	texture::TextureId,
/// };
///
/// let registry = AnimationRegistry::new();
/// let texture = TextureId::from("item/clock");
/// registry
/// 	.load("[segment:spin]\nframes: 0-3\n", &texture, &ParseConfig::default())
/// 	.unwrap();
///
/// registry.tick(&PlayerSnapshot::default(), &Idle);
/// registry.tick(&PlayerSnapshot::default(), &Idle);
/// assert_eq!(registry.current_frame(&texture), 1);
/// ```
#[derive(Debug, Default)]
pub struct AnimationRegistry {
	animations: RwLock<HashMap<TextureId, TextureAnimation>>,
}

impl AnimationRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	fn read(&self) -> RwLockReadGuard<'_, HashMap<TextureId, TextureAnimation>> {
		self.animations.read().unwrap_or_else(PoisonError::into_inner)
	}

	fn write(&self) -> RwLockWriteGuard<'_, HashMap<TextureId, TextureAnimation>> {
		self.animations.write().unwrap_or_else(PoisonError::into_inner)
	}

	/// Registers `metadata`, replacing any animation of the same texture.
	///
	/// The replacement starts from fresh segment states.
	pub fn register(&self, metadata: AnimationMetadata) {
		let texture = metadata.texture.clone();
		let animation = TextureAnimation::new(metadata);
		info!(
			"Registered animation: {texture} ({}, {} segments)",
			animation.metadata.source,
			animation.metadata.segments.len()
		);
		self.write().insert(texture, animation);
	}

	/// Parses `content` in whatever format it is and registers the result.
	pub fn load(&self, content: &str, texture: &TextureId, config: &ParseConfig) -> Result<(), ParseError> {
		let metadata = format::parse(content, texture, config)?;
		self.register(metadata);
		Ok(())
	}

	/// Advances every registered texture by one tick.
	///
	/// Event lookups go through a cache shared by all textures for this tick.
	/// A panic while ticking one texture is logged and does not stop the
	/// others. This needs `panic = "unwind"`, the default; a binary built with
	/// `panic = "abort"` exits on the first panic instead.
	pub fn tick(&self, player: &PlayerSnapshot, game: &dyn GameState) {
		let cache = EventCache::new(game);
		let mut animations = self.write();

		for (texture, animation) in animations.iter_mut() {
			let outcome = panic::catch_unwind(AssertUnwindSafe(|| animation.tick(player, &cache)));
			if outcome.is_err() {
				error!("Animation tick for {texture} panicked; texture skipped this tick");
			}
		}
	}

	/// Frame to display for `texture`, 0 when nothing is active or the texture is unknown
	pub fn current_frame(&self, texture: &TextureId) -> u32 {
		self.read().get(texture).map_or(0, TextureAnimation::current_frame)
	}

	/// Returns true if `texture` has a registered animation
	pub fn is_animated(&self, texture: &TextureId) -> bool {
		self.read().contains_key(texture)
	}

	/// Ids of all registered textures
	pub fn animated_textures(&self) -> HashSet<TextureId> {
		self.read().keys().cloned().collect()
	}

	/// A copy of the metadata registered for `texture`.
	pub fn metadata(&self, texture: &TextureId) -> Option<AnimationMetadata> {
		self.read().get(texture).map(|animation| animation.metadata.clone())
	}

	/// State of `texture` and all its segments.
	pub fn snapshot(&self, texture: &TextureId) -> Option<TextureSnapshot> {
		self.read().get(texture).map(TextureAnimation::snapshot)
	}

	/// Multi-line human-readable state of `texture`.
	pub fn debug_info(&self, texture: &TextureId) -> String {
		match self.snapshot(texture) {
			Some(snapshot) => snapshot.to_string(),
			None => "No animation data".to_string(),
		}
	}

	/// Unregisters `texture`, returning whether it was registered.
	pub fn remove(&self, texture: &TextureId) -> bool {
		let removed = self.write().remove(texture).is_some();
		if removed {
			info!("Removed animation: {texture}");
		}
		removed
	}

	/// Unregisters everything.
	pub fn clear(&self) {
		self.write().clear();
		info!("Cleared all animations");
	}

	/// Number of registered textures
	pub fn len(&self) -> usize {
		self.read().len()
	}

	/// Returns true if nothing is registered
	pub fn is_empty(&self) -> bool {
		self.read().is_empty()
	}
}
