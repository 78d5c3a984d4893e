//! Syntax tree shared by the flat and block dialects.

/// Binary operators, listed from lowest to highest precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
	/// `||`
	Or,
	/// `&&`
	And,
	/// `==`
	Eq,
	/// `!=`
	Ne,
	/// `<`
	Lt,
	/// `>`
	Gt,
	/// `<=`
	Le,
	/// `>=`
	Ge,
	/// `+`
	Add,
	/// `-`
	Sub,
	/// `*`
	Mul,
	/// `/`
	Div,
	/// `^`
	Pow,
}

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
	/// `-`
	Neg,
	/// `!`
	Not,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
	/// Numeric literal
	Number(f64),
	/// String literal
	Str(String),
	/// `true` / `false`
	Bool(bool),
	/// Variable reference
	Var(String),
	/// Prefix operation
	Unary {
		/// Operator
		op: UnaryOp,
		/// Operand
		operand: Box<Expr>,
	},
	/// Infix operation
	Binary {
		/// Operator
		op: BinaryOp,
		/// Left operand
		lhs: Box<Expr>,
		/// Right operand
		rhs: Box<Expr>,
	},
	/// Function call
	Call {
		/// Function name
		name: String,
		/// Arguments, unevaluated
		args: Vec<Expr>,
	},
}

/// A `when` arm pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
	/// Matches a numerically equal value
	Number(f64),
	/// Matches an equal string
	Str(String),
	/// `rest__`, matches anything
	Rest,
}

/// One `pattern => action` arm.
#[derive(Debug, Clone, PartialEq)]
pub struct WhenArm {
	/// Pattern to test
	pub pattern: Pattern,
	/// Statements run on a match
	pub body: Vec<Stmt>,
}

/// A block-dialect statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
	/// `const name = value`
	Const {
		/// Binding name
		name: String,
		/// Initial value
		value: Expr,
	},
	/// `mut name = value`
	Mut {
		/// Binding name
		name: String,
		/// Initial value
		value: Expr,
	},
	/// `name = value`
	Assign {
		/// Target binding
		name: String,
		/// New value
		value: Expr,
	},
	/// `if cond { .. } else if cond { .. } else { .. }`
	If {
		/// Condition/body pairs tried in order
		branches: Vec<(Expr, Vec<Stmt>)>,
		/// Body of the final `else`
		otherwise: Option<Vec<Stmt>>,
	},
	/// `when subject { arms }`
	When {
		/// Variable whose value is matched
		subject: String,
		/// Arms tried in order
		arms: Vec<WhenArm>,
	},
	/// `eval(expr)`, or a trailing expression: the program result
	Eval(Expr),
	/// Expression evaluated for its effects only
	Expr(Expr),
}

/// A parsed program in either dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum Program {
	/// A single condition expression
	Flat(Expr),
	/// A `{ ... }` statement block
	Block(Vec<Stmt>),
}
