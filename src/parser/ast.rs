// AST (Abstract Syntax Tree) definitions for the minic language

use std::fmt;
use std::mem;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The closed set of node kinds a tree can contain.
///
/// The label of each kind is what the tree dump prints in front of the
/// node's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Function,
    Type,
    Param,
    Declaration,
    Assignment,
    If,
    IfElse,
    IfBody,
    While,
    Return,
    BinaryOp,
    Number,
    Id,
}

impl NodeKind {
    pub const ALL: [NodeKind; 13] = [
        NodeKind::Function,
        NodeKind::Type,
        NodeKind::Param,
        NodeKind::Declaration,
        NodeKind::Assignment,
        NodeKind::If,
        NodeKind::IfElse,
        NodeKind::IfBody,
        NodeKind::While,
        NodeKind::Return,
        NodeKind::BinaryOp,
        NodeKind::Number,
        NodeKind::Id,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Function => "function",
            NodeKind::Type => "type",
            NodeKind::Param => "param",
            NodeKind::Declaration => "declaration",
            NodeKind::Assignment => "assignment",
            NodeKind::If => "if",
            NodeKind::IfElse => "if-else",
            NodeKind::IfBody => "if-body",
            NodeKind::While => "while",
            NodeKind::Return => "return",
            NodeKind::BinaryOp => "binary-op",
            NodeKind::Number => "number",
            NodeKind::Id => "id",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Base types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Int,
    Char,
    Void,
}

impl TypeName {
    /// The keyword spelling, also the payload of a `type` node
    pub fn keyword(self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::Char => "char",
            TypeName::Void => "void",
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

/// Expressions. Numeric literals keep the canonical decimal text of the
/// scanned value rather than a typed number.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number {
        text: String,
        location: SourceLocation,
    },
    Id {
        name: String,
        location: SourceLocation,
    },
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    pub fn number(value: i64, location: SourceLocation) -> Self {
        Expr::Number {
            text: value.to_string(),
            location,
        }
    }

    pub fn id(name: impl Into<String>, location: SourceLocation) -> Self {
        Expr::Id {
            name: name.into(),
            location,
        }
    }

    /// Combine two operands under `op`; `location` is the operator token.
    pub fn binary(op: BinOp, left: Expr, right: Expr, location: SourceLocation) -> Self {
        Expr::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
            location,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::Number { location, .. }
            | Expr::Id { location, .. }
            | Expr::BinaryOp { location, .. } => *location,
        }
    }

    /// Detach both operands of a binary operation, leaving empty leaves in
    /// their place. `None` for literals and identifiers.
    pub fn take_operands(&mut self) -> Option<(Expr, Expr)> {
        match self {
            Expr::BinaryOp { left, right, .. } => Some((
                mem::replace(&mut **left, Expr::vacant()),
                mem::replace(&mut **right, Expr::vacant()),
            )),
            _ => None,
        }
    }

    fn vacant() -> Self {
        Expr::Number {
            text: String::new(),
            location: SourceLocation::default(),
        }
    }

    fn is_binary(&self) -> bool {
        matches!(self, Expr::BinaryOp { .. })
    }
}

// `a + b + c + ...` nests to the left once per operator; dropping it
// through the default glue would take one stack frame per level.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        let mut current = self.take_nested();
        loop {
            pending.extend(current);
            let Some(mut expr) = pending.pop() else {
                break;
            };
            current = expr.take_nested();
        }
    }
}

impl Expr {
    /// Operands that are themselves binary operations, detached
    fn take_nested(&mut self) -> Vec<Expr> {
        let mut nested = Vec::new();
        if let Expr::BinaryOp { left, right, .. } = self {
            for operand in [left, right] {
                if operand.is_binary() {
                    nested.push(mem::replace(&mut **operand, Expr::vacant()));
                }
            }
        }
        nested
    }
}

/// Prefix rendering: `a + b * 2` displays as `+(a, *(b, 2))`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number { text, .. } => f.write_str(text),
            Expr::Id { name, .. } => f.write_str(name),
            Expr::BinaryOp {
                op, left, right, ..
            } => write!(f, "{}({}, {})", op.symbol(), left, right),
        }
    }
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub param_type: TypeName,
    pub location: SourceLocation,
}

/// The synthetic node holding both branches of an `if`/`else`
#[derive(Debug, Clone, PartialEq)]
pub struct IfBody {
    pub then_branch: Vec<Statement>,
    pub else_branch: Vec<Statement>,
    /// Location of the `else` keyword
    pub location: SourceLocation,
}

/// Statements. Every statement list in the tree is non-empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declaration {
        name: String,
        var_type: TypeName,
        initializer: Option<Expr>,
        location: SourceLocation,
    },
    Assignment {
        target: String,
        value: Expr,
        location: SourceLocation,
    },
    If {
        condition: Expr,
        then_branch: Vec<Statement>,
        location: SourceLocation,
    },
    IfElse {
        condition: Expr,
        body: IfBody,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Vec<Statement>,
        location: SourceLocation,
    },
    Return {
        value: Option<Expr>,
        location: SourceLocation,
    },
}

impl Statement {
    pub fn kind(&self) -> NodeKind {
        match self {
            Statement::Declaration { .. } => NodeKind::Declaration,
            Statement::Assignment { .. } => NodeKind::Assignment,
            Statement::If { .. } => NodeKind::If,
            Statement::IfElse { .. } => NodeKind::IfElse,
            Statement::While { .. } => NodeKind::While,
            Statement::Return { .. } => NodeKind::Return,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            Statement::Declaration { location, .. }
            | Statement::Assignment { location, .. }
            | Statement::If { location, .. }
            | Statement::IfElse { location, .. }
            | Statement::While { location, .. }
            | Statement::Return { location, .. } => *location,
        }
    }
}

/// Function definition
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub return_type: TypeName,
    pub params: Vec<Param>,
    pub body: Vec<Statement>,
    pub location: SourceLocation,
}

/// Top-level program structure: the root of a successfully parsed tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub functions: Vec<Function>, // Always non-empty once parsed
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
