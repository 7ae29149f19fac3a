use std::fmt;

/// A compiled source file: one or more named scripts.
#[derive(Debug, Clone)]
pub struct Program {
    pub scripts: Vec<Script>,
}

/// A single top-level script with its statement tree.
#[derive(Debug, Clone)]
pub struct Script {
    pub name: String,
    pub statements: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    /// A plain bytecode command with raw argument text
    Command { name: String, args: Vec<String> },
    /// if/elif chain with an optional trailing else block
    If {
        branches: Vec<ConditionalBranch>,
        else_body: Option<Vec<Stmt>>,
    },
    /// Top-tested loop
    While { condition: Condition, body: Vec<Stmt> },
    /// Bottom-tested loop: body runs once before the condition is checked
    DoWhile { condition: Condition, body: Vec<Stmt> },
    /// Multi-way dispatch on a single operand
    Switch {
        operand: String,
        cases: Vec<SwitchCase>,
        default_body: Option<Vec<Stmt>>,
    },
}

impl Stmt {
    /// Literal source text of the statement's leading token, for diagnostics.
    pub fn token_literal(&self) -> String {
        match self {
            Stmt::Command { name, .. } => name.clone(),
            Stmt::If { .. } => "if".to_string(),
            Stmt::While { .. } => "while".to_string(),
            Stmt::DoWhile { .. } => "do".to_string(),
            Stmt::Switch { .. } => "switch".to_string(),
        }
    }

    /// Whether lowering this statement requires splitting the enclosing chunk.
    pub fn is_branching(&self) -> bool {
        !matches!(self, Stmt::Command { .. })
    }
}

/// One `if`/`elif` arm: a condition and the block it guards.
#[derive(Debug, Clone)]
pub struct ConditionalBranch {
    pub condition: Condition,
    pub body: Vec<Stmt>,
}

/// One `case` arm of a switch: a constant operand value and its block.
#[derive(Debug, Clone)]
pub struct SwitchCase {
    pub value: String,
    pub body: Vec<Stmt>,
}

/// A comparison between two raw operand texts, e.g. `VAR_COUNT > 3`.
#[derive(Debug, Clone)]
pub struct Condition {
    pub left: String,
    pub op: CmpOp,
    pub right: String,
}

impl Condition {
    pub fn new(left: impl Into<String>, op: CmpOp, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            op,
            right: right.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for CmpOp {
    /// Displays as the `goto_if_*` instruction suffix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Eq => "eq",
            CmpOp::Ne => "ne",
            CmpOp::Lt => "lt",
            CmpOp::Le => "le",
            CmpOp::Gt => "gt",
            CmpOp::Ge => "ge",
        };
        write!(f, "{}", s)
    }
}

/// Shorthand for building command statements in drivers and tests.
pub fn command(name: impl Into<String>, args: &[&str]) -> Stmt {
    Stmt::Command {
        name: name.into(),
        args: args.iter().map(|a| a.to_string()).collect(),
    }
}
