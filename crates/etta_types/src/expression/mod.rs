//! Condition expressions that decide whether a segment should play.
//!
//! Two dialects share one lexer and one [`Expression`] type.
//!
//! # Flat dialect
//!
//! A single boolean/arithmetic expression:
//!
//! ```text
//! health < 10 && hunger > 5
//! event_start(player_hurt) || between(light_level(), 0, 3)
//! ```
//!
//! Operators, lowest precedence first: `||`, `&&`, `== != < > <= >=`,
//! `+ -`, `* /`, `^` (right associative), prefix `- !`. Division by zero is
//! `0`. Unknown variables read as `0` and unknown functions return `false`,
//! each reported once per expression.
//!
//! # Block dialect
//!
//! A source starting with `{` is a statement block:
//!
//! ```text
//! {
//!     const low = health <= 6;
//!     mut speed = 1;
//!     if low { speed = 3; }
//!     when speed { 3 => eval(true), rest__ => eval(false) }
//! }
//! ```
//!
//! `eval(expr)` ends the program with a value; a trailing expression without
//! `;` does the same. A block that ends without a value is `false`.
//!
//! # Functions
//!
//! | Function | Result |
//! |----------|--------|
//! | `event(name)` | event active this tick |
//! | `event_start(name)` / `event_end(name)` | event turned on / off since the previous evaluation |
//! | `random()` | uniform in `[0, 1)` |
//! | `abs(x)`, `min(a, b)`, `max(a, b)` | arithmetic helpers |
//! | `between(v, lo, hi)` | `lo <= v <= hi` |
//! | `time_in_state()` | evaluations since the result last changed |
//! | `frame_index()`, `cycle_count()` | state of the segment being evaluated |
//! | `holding_item(n)`, `has_effect(n)`, `in_biome(n)` | game probes |
//! | `armor_value()`, `light_level()` | game probes |
//!
//! # Examples
//!
//! ```
//! use etta_types::{expression::{Expression, Scope}, game::Idle};
//!
//! let mut low_health = Expression::parse("health < 10 && hunger > 5").unwrap();
//! let scope = Scope::new().with("health", 8.0).with("hunger", 6);
//! assert!(low_health.evaluate(&scope, &Idle));
//! ```

mod eval;
mod evaluator;
mod value;

/// Syntax tree types
pub mod ast;

/// Tokenizer
pub mod lexer;

/// Parser producing [`ast::Program`]
pub mod parser;

pub use self::evaluator::Expression;
pub use self::value::{Scope, Value};

#[cfg(test)]
mod tests;
