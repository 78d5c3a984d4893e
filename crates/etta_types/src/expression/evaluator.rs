use std::{fmt, sync::Arc};

use log::error;
use rand::{SeedableRng, rngs::SmallRng};

use crate::{error::ExpressionError, game::GameState};

use super::{
	ast::Program,
	eval::{Interpreter, Memory},
	parser::parse_program,
	value::Scope,
};

/// A parsed condition together with the memory it keeps across ticks.
///
/// The parsed program is shared between clones; the memory (edge-trigger
/// history, `time_in_state` counter, random source, reported names) belongs
/// to each instance. One instance is meant to be evaluated once per tick.
#[derive(Clone)]
pub struct Expression {
	source: String,
	program: Option<Arc<Program>>,
	memory: Memory,
	ticks_in_state: u64,
	last_result: bool,
}

impl Expression {
	/// Parses `source`, failing on syntax errors.
	pub fn parse(source: &str) -> Result<Self, ExpressionError> {
		let program = parse_program(source)?;
		Ok(Self::build(source, Some(Arc::new(program))))
	}

	/// Parses `source`, logging a syntax error instead of returning it.
	///
	/// An expression that failed to parse evaluates to `false` forever.
	pub fn new(source: &str) -> Self {
		match Self::parse(source) {
			Ok(expression) => expression,
			Err(e) => {
				error!("Failed to parse expression `{source}`: {e}");
				Self::build(source, None)
			}
		}
	}

	fn build(source: &str, program: Option<Arc<Program>>) -> Self {
		Self {
			source: source.to_string(),
			program,
			memory: Memory::new(SmallRng::from_os_rng()),
			ticks_in_state: 0,
			last_result: false,
		}
	}

	/// Replaces the random source with a seeded one.
	pub fn with_seed(mut self, seed: u64) -> Self {
		self.memory.rng = SmallRng::seed_from_u64(seed);
		self
	}

	/// Source text as written
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Returns true if the source parsed
	pub fn is_valid(&self) -> bool {
		self.program.is_some()
	}

	/// Consecutive evaluations that returned the current result, minus one
	pub fn time_in_state(&self) -> u64 {
		self.ticks_in_state
	}

	/// Forgets edge history and the `time_in_state` counter.
	pub fn reset(&mut self) {
		self.memory.last_events.clear();
		self.ticks_in_state = 0;
		self.last_result = false;
	}

	/// Evaluates the condition.
	///
	/// Never fails: an unparsed program or a runtime error yields `false`.
	/// Runtime errors are logged once per distinct message.
	pub fn evaluate(&mut self, scope: &Scope, game: &dyn GameState) -> bool {
		let Some(program) = self.program.clone() else {
			return false;
		};

		let outcome = Interpreter::new(scope, game, &mut self.memory, self.ticks_in_state).run(&program);
		let result = match outcome {
			Ok(result) => result,
			Err(e) => {
				if self.memory.first_report(format!("err:{e}")) {
					error!("Expression `{}` failed: {e}", self.source);
				}
				return false;
			}
		};

		if result != self.last_result {
			self.ticks_in_state = 0;
			self.last_result = result;
		} else {
			self.ticks_in_state += 1;
		}
		result
	}
}

impl fmt::Debug for Expression {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Expression")
			.field("source", &self.source)
			.field("valid", &self.is_valid())
			.field("ticks_in_state", &self.ticks_in_state)
			.finish_non_exhaustive()
	}
}
