//! Tokenizer shared by both expression dialects.

use std::fmt;

use crate::error::ExpressionError;

/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
	/// Numeric literal
	Number(f64),
	/// Quoted string literal, quotes removed
	Str(String),
	/// Identifier or keyword
	Ident(String),
	/// `(`
	LParen,
	/// `)`
	RParen,
	/// `{`
	LBrace,
	/// `}`
	RBrace,
	/// `,`
	Comma,
	/// `;`
	Semi,
	/// `||`
	OrOr,
	/// `&&`
	AndAnd,
	/// `==`
	EqEq,
	/// `!=`
	NotEq,
	/// `<=`
	Le,
	/// `>=`
	Ge,
	/// `<`
	Lt,
	/// `>`
	Gt,
	/// `+`
	Plus,
	/// `-`
	Minus,
	/// `*`
	Star,
	/// `/`
	Slash,
	/// `^`
	Caret,
	/// `!`
	Bang,
	/// `=`
	Assign,
	/// `=>`
	FatArrow,
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Number(n) => write!(f, "{n}"),
			Self::Str(s) => write!(f, "\"{s}\""),
			Self::Ident(name) => write!(f, "{name}"),
			Self::LParen => write!(f, "("),
			Self::RParen => write!(f, ")"),
			Self::LBrace => write!(f, "{{"),
			Self::RBrace => write!(f, "}}"),
			Self::Comma => write!(f, ","),
			Self::Semi => write!(f, ";"),
			Self::OrOr => write!(f, "||"),
			Self::AndAnd => write!(f, "&&"),
			Self::EqEq => write!(f, "=="),
			Self::NotEq => write!(f, "!="),
			Self::Le => write!(f, "<="),
			Self::Ge => write!(f, ">="),
			Self::Lt => write!(f, "<"),
			Self::Gt => write!(f, ">"),
			Self::Plus => write!(f, "+"),
			Self::Minus => write!(f, "-"),
			Self::Star => write!(f, "*"),
			Self::Slash => write!(f, "/"),
			Self::Caret => write!(f, "^"),
			Self::Bang => write!(f, "!"),
			Self::Assign => write!(f, "="),
			Self::FatArrow => write!(f, "=>"),
		}
	}
}

/// Two-character operators, matched before any single character.
const DOUBLE_OPERATORS: [(&str, Token); 7] = [
	("||", Token::OrOr),
	("&&", Token::AndAnd),
	("==", Token::EqEq),
	("!=", Token::NotEq),
	("<=", Token::Le),
	(">=", Token::Ge),
	("=>", Token::FatArrow),
];

/// Splits `source` into tokens paired with their byte offsets.
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ExpressionError> {
	let mut tokens = Vec::new();
	let mut chars = source.char_indices().peekable();

	while let Some(&(pos, ch)) = chars.peek() {
		if ch.is_whitespace() {
			chars.next();
			continue;
		}

		let rest = &source[pos..];
		if let Some((text, token)) = DOUBLE_OPERATORS.iter().find(|(text, _)| rest.starts_with(text))
		{
			tokens.push((token.clone(), pos));
			chars.nth(text.len() - 1);
			continue;
		}

		let single = match ch {
			'(' => Some(Token::LParen),
			')' => Some(Token::RParen),
			'{' => Some(Token::LBrace),
			'}' => Some(Token::RBrace),
			',' => Some(Token::Comma),
			';' => Some(Token::Semi),
			'<' => Some(Token::Lt),
			'>' => Some(Token::Gt),
			'+' => Some(Token::Plus),
			'-' => Some(Token::Minus),
			'*' => Some(Token::Star),
			'/' => Some(Token::Slash),
			'^' => Some(Token::Caret),
			'!' => Some(Token::Bang),
			'=' => Some(Token::Assign),
			_ => None,
		};
		if let Some(token) = single {
			tokens.push((token, pos));
			chars.next();
			continue;
		}

		if ch == '"' || ch == '\'' {
			chars.next();
			let mut text = String::new();
			let mut closed = false;
			while let Some((_, c)) = chars.next() {
				match c {
					'\\' => {
						if let Some((_, escaped)) = chars.next() {
							text.push(escaped);
						}
					}
					c if c == ch => {
						closed = true;
						break;
					}
					c => text.push(c),
				}
			}
			if !closed {
				return Err(ExpressionError::UnterminatedString {
					position: pos,
				});
			}
			tokens.push((Token::Str(text), pos));
			continue;
		}

		if ch.is_ascii_digit() {
			let mut end = pos;
			while let Some(&(i, c)) = chars.peek() {
				if c.is_ascii_digit() || c == '.' {
					end = i + c.len_utf8();
					chars.next();
				} else {
					break;
				}
			}
			let text = &source[pos..end];
			let value = text.parse::<f64>().map_err(|_| ExpressionError::InvalidNumber {
				text: text.to_string(),
				position: pos,
			})?;
			tokens.push((Token::Number(value), pos));
			continue;
		}

		if ch.is_alphabetic() || ch == '_' {
			let mut end = pos;
			while let Some(&(i, c)) = chars.peek() {
				if c.is_alphanumeric() || matches!(c, '_' | '.' | ':') {
					end = i + c.len_utf8();
					chars.next();
				} else {
					break;
				}
			}
			tokens.push((Token::Ident(source[pos..end].to_string()), pos));
			continue;
		}

		return Err(ExpressionError::UnexpectedChar {
			ch,
			position: pos,
		});
	}

	Ok(tokens)
}
