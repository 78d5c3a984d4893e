//! Tree-walking interpreter for parsed programs.

use std::collections::{HashMap, HashSet};

use log::warn;
use rand::{Rng, rngs::SmallRng};

use crate::{error::ExpressionError, game::GameState};

use super::{
	ast::{BinaryOp, Expr, Pattern, Program, Stmt, UnaryOp},
	value::{Scope, Value},
};

/// State an expression keeps between evaluations.
#[derive(Debug, Clone)]
pub(super) struct Memory {
	/// Last observed value per event name, for edge functions
	pub last_events: HashMap<String, bool>,
	/// Source of `random()`
	pub rng: SmallRng,
	/// Unknown names and runtime errors already logged
	pub reported: HashSet<String>,
}

impl Memory {
	pub fn new(rng: SmallRng) -> Self {
		Self {
			last_events: HashMap::new(),
			rng,
			reported: HashSet::new(),
		}
	}

	/// Returns true the first time `key` is seen.
	pub fn first_report(&mut self, key: String) -> bool {
		self.reported.insert(key)
	}
}

struct Binding {
	value: Value,
	mutable: bool,
}

enum Flow {
	Continue,
	Return(Value),
}

/// One evaluation of a program.
pub(super) struct Interpreter<'a> {
	scope: &'a Scope,
	game: &'a dyn GameState,
	memory: &'a mut Memory,
	ticks_in_state: u64,
	locals: HashMap<String, Binding>,
}

impl<'a> Interpreter<'a> {
	pub fn new(
		scope: &'a Scope,
		game: &'a dyn GameState,
		memory: &'a mut Memory,
		ticks_in_state: u64,
	) -> Self {
		Self {
			scope,
			game,
			memory,
			ticks_in_state,
			locals: HashMap::new(),
		}
	}

	/// Runs `program` to a boolean. A block with no `eval` is false.
	pub fn run(&mut self, program: &Program) -> Result<bool, ExpressionError> {
		match program {
			Program::Flat(expr) => Ok(self.eval(expr).truthy()),
			Program::Block(stmts) => match self.block(stmts)? {
				Flow::Return(value) => Ok(value.truthy()),
				Flow::Continue => Ok(false),
			},
		}
	}

	fn block(&mut self, stmts: &[Stmt]) -> Result<Flow, ExpressionError> {
		for stmt in stmts {
			if let Flow::Return(value) = self.statement(stmt)? {
				return Ok(Flow::Return(value));
			}
		}
		Ok(Flow::Continue)
	}

	fn statement(&mut self, stmt: &Stmt) -> Result<Flow, ExpressionError> {
		match stmt {
			Stmt::Const {
				name,
				value,
			} => self.declare(name, value, false),
			Stmt::Mut {
				name,
				value,
			} => self.declare(name, value, true),
			Stmt::Assign {
				name,
				value,
			} => {
				let value = self.eval(value);
				match self.locals.get_mut(name) {
					Some(binding) if binding.mutable => binding.value = value,
					Some(_) => return Err(ExpressionError::AssignToConst(name.clone())),
					None => return Err(ExpressionError::UndeclaredAssignment(name.clone())),
				}
			}
			Stmt::If {
				branches,
				otherwise,
			} => {
				for (condition, body) in branches {
					if self.eval(condition).truthy() {
						return self.block(body);
					}
				}
				if let Some(body) = otherwise {
					return self.block(body);
				}
			}
			Stmt::When {
				subject,
				arms,
			} => {
				let value = self.variable(subject);
				for arm in arms {
					let matched = match (&arm.pattern, &value) {
						(Pattern::Rest, _) => true,
						(Pattern::Str(expected), Value::Str(actual)) => expected == actual,
						(Pattern::Str(_), _) => false,
						(Pattern::Number(_), Value::Str(_)) => false,
						(Pattern::Number(expected), value) => value.as_number() == *expected,
					};
					if matched {
						return self.block(&arm.body);
					}
				}
			}
			Stmt::Eval(expr) => return Ok(Flow::Return(self.eval(expr))),
			Stmt::Expr(expr) => {
				self.eval(expr);
			}
		}
		Ok(Flow::Continue)
	}

	fn declare(&mut self, name: &str, value: &Expr, mutable: bool) {
		let value = self.eval(value);
		self.locals.insert(
			name.to_string(),
			Binding {
				value,
				mutable,
			},
		);
	}

	fn eval(&mut self, expr: &Expr) -> Value {
		match expr {
			Expr::Number(n) => Value::Number(*n),
			Expr::Str(s) => Value::Str(s.clone()),
			Expr::Bool(b) => Value::Bool(*b),
			Expr::Var(name) => self.variable(name),
			Expr::Unary {
				op,
				operand,
			} => {
				let value = self.eval(operand);
				match op {
					UnaryOp::Neg => Value::Number(-value.as_number()),
					UnaryOp::Not => Value::Bool(!value.truthy()),
				}
			}
			Expr::Binary {
				op,
				lhs,
				rhs,
			} => self.binary(*op, lhs, rhs),
			Expr::Call {
				name,
				args,
			} => self.call(name, args),
		}
	}

	fn binary(&mut self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Value {
		match op {
			BinaryOp::Or => return Value::Bool(self.eval(lhs).truthy() || self.eval(rhs).truthy()),
			BinaryOp::And => return Value::Bool(self.eval(lhs).truthy() && self.eval(rhs).truthy()),
			_ => {}
		}

		let left = self.eval(lhs);
		let right = self.eval(rhs);

		if let (Value::Str(a), Value::Str(b)) = (&left, &right) {
			match op {
				BinaryOp::Eq => return Value::Bool(a == b),
				BinaryOp::Ne => return Value::Bool(a != b),
				_ => {}
			}
		}

		let (a, b) = (left.as_number(), right.as_number());
		match op {
			BinaryOp::Eq => Value::Bool(a == b),
			BinaryOp::Ne => Value::Bool(a != b),
			BinaryOp::Lt => Value::Bool(a < b),
			BinaryOp::Gt => Value::Bool(a > b),
			BinaryOp::Le => Value::Bool(a <= b),
			BinaryOp::Ge => Value::Bool(a >= b),
			BinaryOp::Add => Value::Number(a + b),
			BinaryOp::Sub => Value::Number(a - b),
			BinaryOp::Mul => Value::Number(a * b),
			BinaryOp::Div => Value::Number(if b != 0.0 {
				a / b
			} else {
				0.0
			}),
			BinaryOp::Pow => Value::Number(a.powf(b)),
			BinaryOp::Or => Value::Bool(left.truthy() || right.truthy()),
			BinaryOp::And => Value::Bool(left.truthy() && right.truthy()),
		}
	}

	fn variable(&mut self, name: &str) -> Value {
		if let Some(binding) = self.locals.get(name) {
			return binding.value.clone();
		}
		if let Some(value) = self.scope.get(name) {
			return value.clone();
		}
		if self.memory.first_report(format!("var:{name}")) {
			warn!("Unknown variable `{name}`, using 0");
		}
		Value::Number(0.0)
	}

	/// Text of a name argument: bare identifiers and strings are taken as-is.
	fn name_arg(&mut self, args: &[Expr]) -> Option<String> {
		let text = match args.first()? {
			Expr::Var(name) => name.clone(),
			Expr::Str(text) => text.clone(),
			other => match self.eval(other) {
				Value::Str(text) => text,
				_ => return None,
			},
		};
		Some(text.trim().to_string())
	}

	fn number_arg(&mut self, args: &[Expr], index: usize) -> f64 {
		match args.get(index) {
			Some(arg) => self.eval(arg).as_number(),
			None => 0.0,
		}
	}

	fn edge(&mut self, args: &[Expr], rising: bool) -> Value {
		let Some(name) = self.name_arg(args) else {
			return Value::Bool(false);
		};
		let current = self.game.is_event_active(&name);
		let last = self.memory.last_events.insert(name, current).unwrap_or(false);
		Value::Bool(if rising {
			current && !last
		} else {
			!current && last
		})
	}

	fn probe(&mut self, args: &[Expr], probe: fn(&dyn GameState, &str) -> bool) -> Value {
		match self.name_arg(args) {
			Some(name) => Value::Bool(probe(self.game, &name)),
			None => Value::Bool(false),
		}
	}

	fn call(&mut self, name: &str, args: &[Expr]) -> Value {
		match name {
			"event" => match self.name_arg(args) {
				Some(event) => Value::Bool(self.game.is_event_active(&event)),
				None => Value::Bool(false),
			},
			"event_start" => self.edge(args, true),
			"event_end" => self.edge(args, false),
			"random" => Value::Number(self.memory.rng.random::<f64>()),
			"abs" => Value::Number(self.number_arg(args, 0).abs()),
			"min" | "max" if args.len() < 2 => Value::Number(0.0),
			"min" => Value::Number(self.number_arg(args, 0).min(self.number_arg(args, 1))),
			"max" => Value::Number(self.number_arg(args, 0).max(self.number_arg(args, 1))),
			"between" if args.len() < 3 => Value::Bool(false),
			"between" => {
				let value = self.number_arg(args, 0);
				let low = self.number_arg(args, 1);
				let high = self.number_arg(args, 2);
				Value::Bool(value >= low && value <= high)
			}
			"time_in_state" => Value::Number(self.ticks_in_state as f64),
			"frame_index" => Value::from(self.scope.frame_index()),
			"cycle_count" => Value::from(self.scope.cycle_count()),
			"holding_item" => self.probe(args, |game, item| game.holding_item(item)),
			"has_effect" => self.probe(args, |game, effect| game.has_effect(effect)),
			"in_biome" => self.probe(args, |game, biome| game.in_biome(biome)),
			"armor_value" => Value::Number(self.game.armor_value()),
			"light_level" => Value::Number(self.game.light_level()),
			_ => {
				if self.memory.first_report(format!("fn:{name}")) {
					warn!("Unknown function `{name}`, evaluating to false");
				}
				Value::Bool(false)
			}
		}
	}
}
