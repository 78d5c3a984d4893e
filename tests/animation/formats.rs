use etta_rs::prelude::*;

const SECTIONED: &str = "# compass needle
[animation]
frametime: 2

[variables]
spin: 1-3

[fallback]
frame: 7

[segment:hurt]
type: single
frame: 5
when: health < 6
priority: 30

[segment:run]
type: sequence
frames: $spin
when: event(player_running)
";

const BLOCK: &str = r#""animation" {
	frametime = 1;
	segments: {
		segment!FALLBACK_FRAME { frame_index = 0; }
		segment!ONESHOT @event("player_hurt") {
			name = "flinch"; first_frame_index = 4; last_frame_index = 6; priority = 50;
		}
		segment!SEQUENCE @expression(hunger < 6) { name = "starve"; first_frame_index = 1; last_frame_index = 2; }
	}
}"#;

#[test]
fn test_format_detection() {
	assert_eq!(format::detect(SECTIONED), AnimationSource::Sectioned);
	assert_eq!(format::detect(BLOCK), AnimationSource::Block);
	assert_eq!(format::detect("  {\"animation\": {}}"), AnimationSource::Mcmeta);
}

#[test_log::test]
fn test_sectioned_document_end_to_end() {
	let (registry, texture) = super::load(SECTIONED, "item/compass");
	let mut events = super::Switches::new(&["player_running"]);
	let healthy = PlayerSnapshot::new(20.0, 20.0, 20);

	assert_eq!(registry.current_frame(&texture), 7);

	events.set("player_running", true);
	registry.tick(&healthy, &events.table);
	assert_eq!(registry.current_frame(&texture), 1);
	registry.tick(&healthy, &events.table);
	assert_eq!(registry.current_frame(&texture), 2);

	// Low health outranks the running loop.
	registry.tick(&PlayerSnapshot::new(4.0, 20.0, 20), &events.table);
	assert_eq!(registry.current_frame(&texture), 5);

	// Once the loop has finished its cycle the fallback takes over again.
	events.set("player_running", false);
	for _ in 0..10 {
		registry.tick(&healthy, &events.table);
	}
	assert_eq!(registry.current_frame(&texture), 7);
	let snapshot = registry.snapshot(&texture).unwrap();
	assert!(snapshot.segments[0].state.active);
	assert!(!snapshot.segments[2].state.active);
}

#[test_log::test]
fn test_block_document_end_to_end() {
	let (registry, texture) = super::load(BLOCK, "item/totem_of_undying");
	let mut events = super::Switches::new(&["player_hurt"]);
	let fed = PlayerSnapshot::new(20.0, 20.0, 20);

	events.set("player_hurt", true);
	registry.tick(&fed, &events.table);
	assert_eq!(registry.current_frame(&texture), 5);
	registry.tick(&fed, &events.table);
	assert_eq!(registry.current_frame(&texture), 6);
	registry.tick(&fed, &events.table);

	let flinch = registry.snapshot(&texture).unwrap().segments[1].clone();
	assert_eq!(flinch.name, "flinch");
	assert_eq!(flinch.kind, "oneshot");
	assert!(flinch.state.has_played);
	assert!(!flinch.state.active);

	let starving = PlayerSnapshot::new(20.0, 20.0, 3);
	registry.tick(&starving, &events.table);
	assert_eq!(registry.current_frame(&texture), 2);
	registry.tick(&starving, &events.table);
	assert_eq!(registry.current_frame(&texture), 1);
}

#[test]
fn test_vanilla_document_end_to_end() {
	let (registry, texture) = super::load(r#"{"animation": {"frametime": 1, "frames": [0, 1, 2]}}"#, "block/lava");

	let mut frames = Vec::new();
	for _ in 0..4 {
		registry.tick(&PlayerSnapshot::default(), &Idle);
		frames.push(registry.current_frame(&texture));
	}
	assert_eq!(frames, vec![1, 2, 0, 1]);
	assert_eq!(registry.metadata(&texture).unwrap().source, AnimationSource::Mcmeta);
}

#[test_log::test]
fn test_two_fallbacks_are_rejected() {
	let texture = TextureId::from("item/broken");
	let config = ParseConfig::default();
	let registry = AnimationRegistry::new();

	let sectioned = "[fallback]\nframe: 0\n[fallback]\nframe: 1\n";
	let block = "segment!FALLBACK_FRAME { frame_index = 0 }\nsegment!FALLBACK_FRAME { frame_index = 1 }";

	for content in [sectioned, block] {
		assert!(matches!(
			registry.load(content, &texture, &config),
			Err(ParseError::MultipleFallbacks {
				count: 2,
				..
			})
		));
	}
	assert!(!registry.is_animated(&texture));
}

#[test]
fn test_not_animated_mcmeta() {
	let texture = TextureId::from("block/stone");
	let result = format::parse(r#"{"texture": {"blur": true}}"#, &texture, &ParseConfig::default());
	assert!(matches!(result, Err(ParseError::NotAnimated)));
}
