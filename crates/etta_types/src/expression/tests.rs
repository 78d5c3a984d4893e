//! Unit tests for expression evaluation

use std::collections::HashSet;

use super::*;
use crate::{
	error::ExpressionError,
	game::{GameState, Idle},
};

struct Events(HashSet<&'static str>);

impl Events {
	fn none() -> Self {
		Self(HashSet::new())
	}

	fn with(names: &[&'static str]) -> Self {
		Self(names.iter().copied().collect())
	}
}

impl GameState for Events {
	fn is_event_active(&self, name: &str) -> bool {
		self.0.contains(name)
	}

	fn holding_item(&self, item: &str) -> bool {
		"minecraft:diamond_sword".contains(item)
	}

	fn light_level(&self) -> f64 {
		4.0
	}
}

fn check(source: &str, scope: &Scope) -> bool {
	Expression::parse(source).unwrap().evaluate(scope, &Idle)
}

#[test_log::test]
fn test_health_and_hunger() {
	let source = "health < 10 && hunger > 5";
	assert!(check(source, &Scope::new().with("health", 8.0).with("hunger", 6)));
	assert!(!check(source, &Scope::new().with("health", 12.0).with("hunger", 6)));
	assert!(!check(source, &Scope::new().with("health", 8.0).with("hunger", 5)));
}

#[test]
fn test_arithmetic_precedence() {
	let scope = Scope::new();
	assert!(check("1 + 2 * 3 == 7", &scope));
	assert!(check("(1 + 2) * 3 == 9", &scope));
	assert!(check("2 ^ 3 ^ 2 == 512", &scope));
	assert!(check("10 - 4 - 3 == 3", &scope));
	assert!(check("-2 * -3 == 6", &scope));
	assert!(check("!(1 > 2)", &scope));
}

#[test]
fn test_division_by_zero_is_zero() {
	assert!(check("5 / 0 == 0", &Scope::new()));
}

#[test]
fn test_functions() {
	let scope = Scope::new().with("health", 5.0);
	assert!(check("between(health, 5, 6)", &scope));
	assert!(!check("between(health, 6, 7)", &scope));
	assert!(check("abs(-3) == 3 && min(2, 9) == 2 && max(2, 9) == 9", &scope));
	assert!(check("min(1) == 0", &scope));
	assert!(!check("between(1, 2)", &scope));
}

#[test]
fn test_string_equality() {
	let scope = Scope::new().with("mode", "angry");
	assert!(check("mode == \"angry\"", &scope));
	assert!(check("mode != 'calm'", &scope));
	assert!(!check("mode", &scope));
}

#[test]
fn test_unknown_names() {
	assert!(check("nothing_here == 0", &Scope::new()));
	assert!(!check("no_such_function(1)", &Scope::new()));
}

#[test_log::test]
fn test_unparsable_expression_is_false() {
	assert!(Expression::parse("health <").is_err());

	let mut broken = Expression::new("health < < 3");
	assert!(!broken.is_valid());
	assert!(!broken.evaluate(&Scope::new().with("health", 1.0), &Idle));
}

#[test_log::test]
fn test_deeply_nested_expression_is_false() {
	let source = format!("{}health < 10{}", "(".repeat(3_000), ")".repeat(3_000));
	assert!(matches!(Expression::parse(&source), Err(ExpressionError::TooDeep { .. })));

	let mut nested = Expression::new(&source);
	assert!(!nested.is_valid());
	assert!(!nested.evaluate(&Scope::new().with("health", 1.0), &Idle));
}

#[test]
fn test_event_lookup() {
	let mut expression = Expression::parse("event(raining) || event(\"thundering\")").unwrap();
	let scope = Scope::new();
	assert!(!expression.evaluate(&scope, &Events::none()));
	assert!(expression.evaluate(&scope, &Events::with(&["thundering"])));
	assert!(expression.evaluate(&scope, &Events::with(&["raining"])));
}

#[test]
fn test_event_start_fires_on_rising_edge() {
	let mut expression = Expression::parse("event_start(attack)").unwrap();
	let scope = Scope::new();

	let inputs = [false, true, true, false, true];
	let outputs: Vec<bool> = inputs
		.iter()
		.map(|&active| {
			let game = if active {
				Events::with(&["attack"])
			} else {
				Events::none()
			};
			expression.evaluate(&scope, &game)
		})
		.collect();

	assert_eq!(outputs, vec![false, true, false, false, true]);
}

#[test]
fn test_event_end_fires_on_falling_edge() {
	let mut expression = Expression::parse("event_end(attack)").unwrap();
	let scope = Scope::new();

	let inputs = [true, true, false, false, true, false];
	let outputs: Vec<bool> = inputs
		.iter()
		.map(|&active| {
			let game = if active {
				Events::with(&["attack"])
			} else {
				Events::none()
			};
			expression.evaluate(&scope, &game)
		})
		.collect();

	assert_eq!(outputs, vec![false, false, true, false, false, true]);
}

#[test]
fn test_time_in_state() {
	let mut expression = Expression::parse("health < 5 && time_in_state() >= 2").unwrap();
	let hurt = Scope::new().with("health", 1.0);
	let healthy = Scope::new().with("health", 20.0);

	// The counter tracks this expression's own result.
	assert!(!expression.evaluate(&healthy, &Idle));
	assert_eq!(expression.time_in_state(), 1);
	assert!(!expression.evaluate(&hurt, &Idle));
	assert_eq!(expression.time_in_state(), 2);
	assert!(expression.evaluate(&hurt, &Idle));
	assert_eq!(expression.time_in_state(), 0);
}

#[test]
fn test_segment_functions() {
	let mut scope = Scope::new();
	scope.set_segment(3, 2);
	assert!(check("frame_index() == 3 && cycle_count() == 2", &scope));
}

#[test]
fn test_probes() {
	let mut expression =
		Expression::parse("holding_item(diamond_sword) && light_level() < 5 && armor_value() == 0").unwrap();
	assert!(expression.evaluate(&Scope::new(), &Events::none()));
	assert!(!check("holding_item(bow)", &Scope::new()));
}

#[test]
fn test_seeded_random_is_reproducible() {
	let mut a = Expression::parse("random() < 0.5").unwrap().with_seed(7);
	let mut b = Expression::parse("random() < 0.5").unwrap().with_seed(7);
	for _ in 0..16 {
		assert_eq!(a.evaluate(&Scope::new(), &Idle), b.evaluate(&Scope::new(), &Idle));
	}
	assert!(check("random() >= 0 && random() < 1", &Scope::new()));
}

#[test]
fn test_block_with_const_and_if() {
	let source = "{
		const low = health <= 6;
		mut speed = 1;
		if low { speed = 3; } else { speed = 1; }
		eval(low && speed > 1)
	}";
	assert!(check(source, &Scope::new().with("health", 4.0)));
	assert!(!check(source, &Scope::new().with("health", 10.0)));
}

#[test]
fn test_block_else_if_chain() {
	let source = "{
		mut tier = 0;
		if health < 5 { tier = 1; } else if health < 10 { tier = 2; } else { tier = 3; }
		tier == 2
	}";
	assert!(check(source, &Scope::new().with("health", 7.0)));
	assert!(!check(source, &Scope::new().with("health", 2.0)));
	assert!(!check(source, &Scope::new().with("health", 15.0)));
}

#[test]
fn test_block_when() {
	let source = r#"{
		when mode {
			1 => eval(true),
			"boss" => { eval(true) }
			rest__ => eval(false)
		}
	}"#;
	assert!(check(source, &Scope::new().with("mode", 1)));
	assert!(check(source, &Scope::new().with("mode", "boss")));
	assert!(!check(source, &Scope::new().with("mode", 2)));
	assert!(!check(source, &Scope::new().with("mode", "1")));
}

#[test]
fn test_block_without_value_is_false() {
	assert!(!check("{ const x = 1; }", &Scope::new()));
	assert!(!check("{ }", &Scope::new()));
}

#[test]
fn test_block_eval_stops_execution() {
	assert!(check("{ eval(true); undeclared = 1; }", &Scope::new()));
}

#[test_log::test]
fn test_assign_to_const_fails_evaluation() {
	let mut expression = Expression::parse("{ const x = 1; x = 2; eval(true) }").unwrap();
	assert!(!expression.evaluate(&Scope::new(), &Idle));
	assert!(!check("{ y = 2; eval(true) }", &Scope::new()));
}

#[test]
fn test_declarations_do_not_survive_evaluation() {
	let mut expression = Expression::parse("{ mut n = 0; n = n + 1; n == 1 }").unwrap();
	for _ in 0..3 {
		assert!(expression.evaluate(&Scope::new(), &Idle));
	}
}

#[test]
fn test_locals_shadow_scope() {
	assert!(check("{ const health = 1; health == 1 }", &Scope::new().with("health", 20.0)));
}

#[test]
fn test_reset_clears_edges() {
	let mut expression = Expression::parse("event_start(hit)").unwrap();
	let game = Events::with(&["hit"]);
	assert!(expression.evaluate(&Scope::new(), &game));
	assert!(!expression.evaluate(&Scope::new(), &game));
	expression.reset();
	assert!(expression.evaluate(&Scope::new(), &game));
}
