use std::collections::HashSet;

use etta_rs::prelude::*;

const CLOCK: &str = "[animation]\nframetime: 1\n[segment:spin]\nframes: 0-3\n";

#[test]
fn test_snapshot_serializes_to_json() {
	let (registry, texture) = super::load(CLOCK, "item/clock");
	registry.tick(&PlayerSnapshot::default(), &Idle);
	registry.tick(&PlayerSnapshot::default(), &Idle);

	let snapshot = registry.snapshot(&texture).unwrap();
	let json = serde_json::to_value(&snapshot).unwrap();

	assert_eq!(json["source"], "sectioned");
	assert_eq!(json["current_frame"], 2);
	assert_eq!(json["texture"]["path"], "item/clock");

	let spin = &json["segments"][0];
	assert_eq!(spin["name"], "spin");
	assert_eq!(spin["kind"], "sequence");
	assert_eq!(spin["active"], true);
	assert_eq!(spin["current_frame"], 2);

	let back: TextureSnapshot = serde_json::from_value(json).unwrap();
	assert_eq!(back, snapshot);
}

#[test]
fn test_reregistration_starts_fresh() {
	let (registry, texture) = super::load(CLOCK, "item/clock");
	for _ in 0..3 {
		registry.tick(&PlayerSnapshot::default(), &Idle);
	}
	assert_eq!(registry.current_frame(&texture), 3);

	registry.load(CLOCK, &texture, &ParseConfig::default()).unwrap();
	assert_eq!(registry.len(), 1);
	let spin = &registry.snapshot(&texture).unwrap().segments[0];
	assert!(!spin.state.active);
	assert_eq!(spin.state.current_frame, 0);
}

#[test]
fn test_textures_tick_together() {
	let (registry, clock) = super::load(CLOCK, "item/clock");
	let lava = TextureId::from("block/lava");
	registry.load(r#"{"animation": {"frames": [0, 1, 2, 3, 4]}}"#, &lava, &ParseConfig::default()).unwrap();

	for _ in 0..2 {
		registry.tick(&PlayerSnapshot::default(), &Idle);
	}

	assert_eq!(registry.current_frame(&clock), 2);
	assert_eq!(registry.current_frame(&lava), 2);
	assert_eq!(registry.animated_textures(), HashSet::from([clock.clone(), lava.clone()]));

	assert!(registry.remove(&lava));
	assert!(!registry.is_animated(&lava));
	assert_eq!(registry.current_frame(&lava), 0);

	registry.clear();
	assert!(registry.is_empty());
	assert_eq!(registry.debug_info(&clock), "No animation data");
}

#[test_log::test]
fn test_expression_sees_time_in_state() {
	let content = "[fallback]
frame: 0
[segment:glow]
type: single
frame: 4
when: {
    const calm = !event(player_hurt);
    eval(calm && time_in_state() >= 2)
  }
";
	let (registry, texture) = super::load(content, "item/totem_of_undying");

	let mut frames = Vec::new();
	for _ in 0..5 {
		registry.tick(&PlayerSnapshot::default(), &Idle);
		frames.push(registry.current_frame(&texture));
	}

	// The condition is false until it has been true-valued for two evaluations.
	assert_eq!(frames[0], 0);
	assert!(frames.contains(&4));
}

#[test]
fn test_debug_info_lists_segments() {
	let (registry, texture) = super::load(CLOCK, "item/clock");
	registry.tick(&PlayerSnapshot::default(), &Idle);

	let info = registry.debug_info(&texture);
	assert!(info.starts_with("Animation: minecraft:item/clock (SECTIONED)\n"));
	assert!(info.contains("  - spin: ACTIVE (frame 1, priority 10)"));
}

#[test]
fn test_failing_game_state_skips_only_its_texture() {
	struct Flaky;

	impl GameState for Flaky {
		fn is_event_active(&self, name: &str) -> bool {
			assert_ne!(name, "lightning", "weather source unavailable");
			false
		}
	}

	let (registry, clock) = super::load(CLOCK, "item/clock");
	let storm = TextureId::from("item/storm");
	registry
		.load("[segment:flash]\ntype: single\nframe: 3\nwhen: event(lightning)\n", &storm, &ParseConfig::default())
		.unwrap();

	registry.tick(&PlayerSnapshot::default(), &Flaky);
	registry.tick(&PlayerSnapshot::default(), &Flaky);

	assert_eq!(registry.current_frame(&clock), 2);
	assert_eq!(registry.current_frame(&storm), 0);
}
