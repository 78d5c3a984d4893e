//! Recursive-descent parser for both expression dialects.
//!
//! Precedence, lowest first: `||`, `&&`, comparisons, `+ -`, `* /`, `^`
//! (right associative), prefix `- !`, primaries.

use crate::error::ExpressionError;

use super::{
	ast::{BinaryOp, Expr, Pattern, Program, Stmt, UnaryOp, WhenArm},
	lexer::{Token, tokenize},
};

/// Catch-all pattern keyword in `when` arms
pub const REST_PATTERN: &str = "rest__";

/// Deepest nesting of parentheses, prefix operators, `^` chains and blocks
/// the parser accepts.
pub const MAX_DEPTH: usize = 64;

/// Parses `source` into a program.
///
/// Sources whose first token is `{` are parsed as a statement block;
/// anything else is a single flat expression.
pub fn parse_program(source: &str) -> Result<Program, ExpressionError> {
	let tokens = tokenize(source)?;
	let mut parser = Parser {
		tokens,
		pos: 0,
		depth: 0,
	};

	let program = if parser.peek() == Some(&Token::LBrace) {
		Program::Block(parser.block()?)
	} else {
		Program::Flat(parser.expression()?)
	};

	if let Some((token, position)) = parser.tokens.get(parser.pos) {
		return Err(ExpressionError::UnexpectedToken {
			expected: "end of expression".to_string(),
			found: token.to_string(),
			position: *position,
		});
	}
	Ok(program)
}

struct Parser {
	tokens: Vec<(Token, usize)>,
	pos: usize,
	depth: usize,
}

impl Parser {
	fn peek(&self) -> Option<&Token> {
		self.tokens.get(self.pos).map(|(token, _)| token)
	}

	fn peek_at(&self, offset: usize) -> Option<&Token> {
		self.tokens.get(self.pos + offset).map(|(token, _)| token)
	}

	fn advance(&mut self) -> Option<Token> {
		let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
		if token.is_some() {
			self.pos += 1;
		}
		token
	}

	fn eat(&mut self, expected: &Token) -> bool {
		if self.peek() == Some(expected) {
			self.pos += 1;
			true
		} else {
			false
		}
	}

	fn error(&self, expected: &str) -> ExpressionError {
		match self.tokens.get(self.pos) {
			Some((token, position)) => ExpressionError::UnexpectedToken {
				expected: expected.to_string(),
				found: token.to_string(),
				position: *position,
			},
			None => ExpressionError::UnexpectedEnd {
				expected: expected.to_string(),
			},
		}
	}

	fn expect(&mut self, expected: &Token) -> Result<(), ExpressionError> {
		if self.eat(expected) {
			Ok(())
		} else {
			Err(self.error(&format!("`{expected}`")))
		}
	}

	fn ident(&mut self) -> Result<String, ExpressionError> {
		match self.peek() {
			Some(Token::Ident(name)) => {
				let name = name.clone();
				self.pos += 1;
				Ok(name)
			}
			_ => Err(self.error("identifier")),
		}
	}

	fn is_keyword(&self, keyword: &str) -> bool {
		matches!(self.peek(), Some(Token::Ident(name)) if name == keyword)
	}

	/// Runs `rule` one nesting level deeper, failing past [`MAX_DEPTH`].
	fn nested<T>(&mut self, rule: fn(&mut Self) -> Result<T, ExpressionError>) -> Result<T, ExpressionError> {
		if self.depth >= MAX_DEPTH {
			let position = self.tokens.get(self.pos).or(self.tokens.last()).map_or(0, |(_, position)| *position);
			return Err(ExpressionError::TooDeep {
				position,
			});
		}
		self.depth += 1;
		let result = rule(self);
		self.depth -= 1;
		result
	}

	// ---- statements ----

	fn block(&mut self) -> Result<Vec<Stmt>, ExpressionError> {
		self.nested(Self::block_body)
	}

	fn block_body(&mut self) -> Result<Vec<Stmt>, ExpressionError> {
		self.expect(&Token::LBrace)?;
		let mut stmts = Vec::new();

		loop {
			while self.eat(&Token::Semi) {}
			if self.eat(&Token::RBrace) {
				return Ok(stmts);
			}
			if self.peek().is_none() {
				return Err(self.error("`}`"));
			}

			let stmt = self.statement()?;
			let needs_separator = !matches!(stmt, Stmt::If { .. } | Stmt::When { .. });
			let stmt = match stmt {
				// A trailing bare expression is the block's value.
				Stmt::Expr(expr) if self.peek() == Some(&Token::RBrace) => Stmt::Eval(expr),
				other => other,
			};
			stmts.push(stmt);

			if needs_separator && !self.eat(&Token::Semi) && self.peek() != Some(&Token::RBrace) {
				return Err(self.error("`;` or `}`"));
			}
		}
	}

	fn statement(&mut self) -> Result<Stmt, ExpressionError> {
		if self.is_keyword("const") || self.is_keyword("mut") {
			let mutable = self.is_keyword("mut");
			self.pos += 1;
			let name = self.ident()?;
			self.expect(&Token::Assign)?;
			let value = self.expression()?;
			return Ok(if mutable {
				Stmt::Mut {
					name,
					value,
				}
			} else {
				Stmt::Const {
					name,
					value,
				}
			});
		}

		if self.is_keyword("if") {
			self.pos += 1;
			return self.if_chain();
		}

		if self.is_keyword("when") {
			self.pos += 1;
			return self.when();
		}

		if self.is_keyword("eval") && self.peek_at(1) == Some(&Token::LParen) {
			self.pos += 2;
			let value = self.expression()?;
			self.expect(&Token::RParen)?;
			return Ok(Stmt::Eval(value));
		}

		if matches!(self.peek(), Some(Token::Ident(_))) && self.peek_at(1) == Some(&Token::Assign) {
			let name = self.ident()?;
			self.pos += 1;
			let value = self.expression()?;
			return Ok(Stmt::Assign {
				name,
				value,
			});
		}

		Ok(Stmt::Expr(self.expression()?))
	}

	fn if_chain(&mut self) -> Result<Stmt, ExpressionError> {
		let mut branches = vec![(self.expression()?, self.block()?)];
		let mut otherwise = None;

		while self.is_keyword("else") {
			self.pos += 1;
			if self.is_keyword("if") {
				self.pos += 1;
				branches.push((self.expression()?, self.block()?));
			} else {
				otherwise = Some(self.block()?);
				break;
			}
		}

		Ok(Stmt::If {
			branches,
			otherwise,
		})
	}

	fn when(&mut self) -> Result<Stmt, ExpressionError> {
		let subject = self.ident()?;
		self.expect(&Token::LBrace)?;
		let mut arms = Vec::new();

		loop {
			while self.eat(&Token::Comma) {}
			if self.eat(&Token::RBrace) {
				break;
			}

			let pattern = match self.advance() {
				Some(Token::Number(n)) => Pattern::Number(n),
				Some(Token::Minus) => match self.advance() {
					Some(Token::Number(n)) => Pattern::Number(-n),
					_ => {
						self.pos -= 1;
						return Err(self.error("number after `-`"));
					}
				},
				Some(Token::Str(s)) => Pattern::Str(s),
				Some(Token::Ident(name)) if name == REST_PATTERN => Pattern::Rest,
				Some(_) => {
					self.pos -= 1;
					return Err(self.error("number, string or `rest__` pattern"));
				}
				None => return Err(self.error("`}`")),
			};
			self.expect(&Token::FatArrow)?;

			let braced = self.peek() == Some(&Token::LBrace);
			let body = if braced {
				self.block()?
			} else {
				match self.statement()? {
					Stmt::Expr(expr) => vec![Stmt::Eval(expr)],
					stmt => vec![stmt],
				}
			};
			arms.push(WhenArm {
				pattern,
				body,
			});

			if !self.eat(&Token::Comma) && !braced && self.peek() != Some(&Token::RBrace) {
				return Err(self.error("`,` or `}`"));
			}
		}

		Ok(Stmt::When {
			subject,
			arms,
		})
	}

	// ---- expressions ----

	fn expression(&mut self) -> Result<Expr, ExpressionError> {
		self.nested(Self::or)
	}

	fn binary_level(
		&mut self,
		next: fn(&mut Self) -> Result<Expr, ExpressionError>,
		ops: &[(Token, BinaryOp)],
	) -> Result<Expr, ExpressionError> {
		let mut lhs = next(self)?;
		loop {
			let Some(op) = self
				.peek()
				.and_then(|token| ops.iter().find(|(t, _)| t == token).map(|(_, op)| *op))
			else {
				return Ok(lhs);
			};
			self.pos += 1;
			let rhs = next(self)?;
			lhs = Expr::Binary {
				op,
				lhs: Box::new(lhs),
				rhs: Box::new(rhs),
			};
		}
	}

	fn or(&mut self) -> Result<Expr, ExpressionError> {
		self.binary_level(Self::and, &[(Token::OrOr, BinaryOp::Or)])
	}

	fn and(&mut self) -> Result<Expr, ExpressionError> {
		self.binary_level(Self::comparison, &[(Token::AndAnd, BinaryOp::And)])
	}

	fn comparison(&mut self) -> Result<Expr, ExpressionError> {
		self.binary_level(
			Self::additive,
			&[
				(Token::EqEq, BinaryOp::Eq),
				(Token::NotEq, BinaryOp::Ne),
				(Token::Le, BinaryOp::Le),
				(Token::Ge, BinaryOp::Ge),
				(Token::Lt, BinaryOp::Lt),
				(Token::Gt, BinaryOp::Gt),
			],
		)
	}

	fn additive(&mut self) -> Result<Expr, ExpressionError> {
		self.binary_level(
			Self::multiplicative,
			&[(Token::Plus, BinaryOp::Add), (Token::Minus, BinaryOp::Sub)],
		)
	}

	fn multiplicative(&mut self) -> Result<Expr, ExpressionError> {
		self.binary_level(Self::power, &[(Token::Star, BinaryOp::Mul), (Token::Slash, BinaryOp::Div)])
	}

	fn power(&mut self) -> Result<Expr, ExpressionError> {
		let base = self.unary()?;
		if self.eat(&Token::Caret) {
			let exponent = self.nested(Self::power)?;
			return Ok(Expr::Binary {
				op: BinaryOp::Pow,
				lhs: Box::new(base),
				rhs: Box::new(exponent),
			});
		}
		Ok(base)
	}

	fn unary(&mut self) -> Result<Expr, ExpressionError> {
		let op = match self.peek() {
			Some(Token::Minus) => UnaryOp::Neg,
			Some(Token::Bang) => UnaryOp::Not,
			_ => return self.primary(),
		};
		self.pos += 1;
		Ok(Expr::Unary {
			op,
			operand: Box::new(self.nested(Self::unary)?),
		})
	}

	fn primary(&mut self) -> Result<Expr, ExpressionError> {
		match self.advance() {
			Some(Token::Number(n)) => Ok(Expr::Number(n)),
			Some(Token::Str(s)) => Ok(Expr::Str(s)),
			Some(Token::LParen) => {
				let inner = self.expression()?;
				self.expect(&Token::RParen)?;
				Ok(inner)
			}
			Some(Token::Ident(name)) => {
				if self.eat(&Token::LParen) {
					let args = self.arguments()?;
					return Ok(Expr::Call {
						name,
						args,
					});
				}
				Ok(match name.as_str() {
					"true" => Expr::Bool(true),
					"false" => Expr::Bool(false),
					_ => Expr::Var(name),
				})
			}
			Some(_) => {
				self.pos -= 1;
				Err(self.error("value"))
			}
			None => Err(self.error("value")),
		}
	}

	fn arguments(&mut self) -> Result<Vec<Expr>, ExpressionError> {
		let mut args = Vec::new();
		if self.eat(&Token::RParen) {
			return Ok(args);
		}
		loop {
			args.push(self.expression()?);
			if self.eat(&Token::RParen) {
				return Ok(args);
			}
			self.expect(&Token::Comma)?;
		}
	}
}
