//! Uniform link view over the typed AST, and the traversals built on it
//!
//! The typed tree in [`crate::parser::ast`] owns its children through
//! fields and `Vec`s. Traversals see it through [`NodeRef`], which exposes
//! every node with the same three link slots:
//!
//! | kind        | primary              | secondary                  | successor          |
//! |-------------|----------------------|----------------------------|--------------------|
//! | function    | return type          | parameters                 | body statements    |
//! | param       | type                 |                            |                    |
//! | declaration | type                 | initializer                |                    |
//! | assignment  |                      | value                      |                    |
//! | if          | condition            | then statements            |                    |
//! | if-else     | condition            | if-body                    |                    |
//! | if-body     | then statements      | else statements            |                    |
//! | while       | condition            | body statements            |                    |
//! | return      |                      | value                      |                    |
//! | binary-op   | left                 | right                      |                    |
//!
//! A slot yields a [`Chain`]: zero, one or several sibling nodes in source
//! order. Inside a chain the successor of an item is the next item.
//!
//! - [`printer`]: pre-order indented dump
//! - [`release`]: post-order, consuming release
//! - [`stats`]: per-kind node counts

pub mod printer;
pub mod release;
pub mod stats;

use crate::parser::ast::*;
use std::slice;

pub use printer::{render, render_with, write_tree, PrintOptions};
pub use release::{release, release_with, ReleaseReport};
pub use stats::NodeStats;

/// Borrowed view of one node
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Function(&'a Function),
    /// A type keyword together with the location of the node that owns it
    Type(TypeName, SourceLocation),
    Param(&'a Param),
    Statement(&'a Statement),
    IfBody(&'a IfBody),
    Expr(&'a Expr),
}

/// The three link slots of a node
#[derive(Debug, Clone)]
pub struct Links<'a> {
    pub primary: Chain<'a>,
    pub secondary: Chain<'a>,
    pub successor: Chain<'a>,
}

impl<'a> NodeRef<'a> {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Function(_) => NodeKind::Function,
            NodeRef::Type(..) => NodeKind::Type,
            NodeRef::Param(_) => NodeKind::Param,
            NodeRef::Statement(stmt) => stmt.kind(),
            NodeRef::IfBody(_) => NodeKind::IfBody,
            NodeRef::Expr(Expr::Number { .. }) => NodeKind::Number,
            NodeRef::Expr(Expr::Id { .. }) => NodeKind::Id,
            NodeRef::Expr(Expr::BinaryOp { .. }) => NodeKind::BinaryOp,
        }
    }

    /// Name, type keyword, operator symbol or literal text; `None` for
    /// purely structural nodes
    pub fn payload(&self) -> Option<&'a str> {
        match *self {
            NodeRef::Function(function) => Some(function.name.as_str()),
            NodeRef::Type(ty, _) => Some(ty.keyword()),
            NodeRef::Param(param) => Some(param.name.as_str()),
            NodeRef::Statement(Statement::Declaration { name, .. }) => Some(name.as_str()),
            NodeRef::Statement(Statement::Assignment { target, .. }) => Some(target.as_str()),
            NodeRef::Statement(_) | NodeRef::IfBody(_) => None,
            NodeRef::Expr(Expr::Number { text, .. }) => Some(text.as_str()),
            NodeRef::Expr(Expr::Id { name, .. }) => Some(name.as_str()),
            NodeRef::Expr(Expr::BinaryOp { op, .. }) => Some(op.symbol()),
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            NodeRef::Function(function) => function.location,
            NodeRef::Type(_, location) => *location,
            NodeRef::Param(param) => param.location,
            NodeRef::Statement(stmt) => stmt.location(),
            NodeRef::IfBody(body) => body.location,
            NodeRef::Expr(expr) => expr.location(),
        }
    }

    pub fn links(&self) -> Links<'a> {
        let none = Chain::Empty;
        let (primary, secondary, successor) = match *self {
            NodeRef::Function(function) => (
                Chain::one(NodeRef::Type(function.return_type, function.location)),
                Chain::Params(function.params.iter()),
                Chain::Statements(function.body.iter()),
            ),
            NodeRef::Type(..) => (none.clone(), none.clone(), none),
            NodeRef::Param(param) => (
                Chain::one(NodeRef::Type(param.param_type, param.location)),
                none.clone(),
                none,
            ),
            NodeRef::Statement(stmt) => {
                let (primary, secondary) = statement_links(stmt);
                (primary, secondary, none)
            }
            NodeRef::IfBody(body) => (
                Chain::Statements(body.then_branch.iter()),
                Chain::Statements(body.else_branch.iter()),
                none,
            ),
            NodeRef::Expr(Expr::BinaryOp { left, right, .. }) => (
                Chain::one(NodeRef::Expr(left)),
                Chain::one(NodeRef::Expr(right)),
                none,
            ),
            NodeRef::Expr(_) => (none.clone(), none.clone(), none),
        };

        Links {
            primary,
            secondary,
            successor,
        }
    }
}

fn statement_links(stmt: &Statement) -> (Chain<'_>, Chain<'_>) {
    match stmt {
        Statement::Declaration {
            var_type,
            initializer,
            location,
            ..
        } => (
            Chain::one(NodeRef::Type(*var_type, *location)),
            Chain::maybe(initializer.as_ref().map(NodeRef::Expr)),
        ),
        Statement::Assignment { value, .. } => (Chain::Empty, Chain::one(NodeRef::Expr(value))),
        Statement::If {
            condition,
            then_branch,
            ..
        } => (
            Chain::one(NodeRef::Expr(condition)),
            Chain::Statements(then_branch.iter()),
        ),
        Statement::IfElse {
            condition, body, ..
        } => (
            Chain::one(NodeRef::Expr(condition)),
            Chain::one(NodeRef::IfBody(body)),
        ),
        Statement::While {
            condition, body, ..
        } => (
            Chain::one(NodeRef::Expr(condition)),
            Chain::Statements(body.iter()),
        ),
        Statement::Return { value, .. } => (
            Chain::Empty,
            Chain::maybe(value.as_ref().map(NodeRef::Expr)),
        ),
    }
}

/// Sibling nodes in one link slot, in source order
#[derive(Debug, Clone)]
pub enum Chain<'a> {
    Empty,
    Single(Option<NodeRef<'a>>),
    Functions(slice::Iter<'a, Function>),
    Params(slice::Iter<'a, Param>),
    Statements(slice::Iter<'a, Statement>),
}

impl<'a> Chain<'a> {
    fn one(node: NodeRef<'a>) -> Self {
        Chain::Single(Some(node))
    }

    fn maybe(node: Option<NodeRef<'a>>) -> Self {
        Chain::Single(node)
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<NodeRef<'a>> {
        match self {
            Chain::Empty => None,
            Chain::Single(node) => node.take(),
            Chain::Functions(iter) => iter.next().map(NodeRef::Function),
            Chain::Params(iter) => iter.next().map(NodeRef::Param),
            Chain::Statements(iter) => iter.next().map(NodeRef::Statement),
        }
    }
}

impl Program {
    /// The top-level chain: one function node per definition
    pub fn top_level(&self) -> Chain<'_> {
        Chain::Functions(self.functions.iter())
    }
}

/// Visit every node in dump order, with the depth it prints at.
///
/// Primary and secondary children are one level deeper than their parent;
/// successors stay at the parent's depth. Pending chains live on a heap
/// stack, so the depth of the tree does not bound the walk.
pub fn visit_pre_order<'a, F>(program: &'a Program, mut visit: F)
where
    F: FnMut(NodeRef<'a>, usize),
{
    let mut pending = vec![(program.top_level(), 0)];

    while let Some((chain, depth)) = pending.last_mut() {
        let depth = *depth;
        let Some(node) = chain.next() else {
            pending.pop();
            continue;
        };

        visit(node, depth);

        // Popped in reverse: primary, secondary, successor, then the next sibling
        let links = node.links();
        pending.push((links.successor, depth));
        pending.push((links.secondary, depth + 1));
        pending.push((links.primary, depth + 1));
    }
}
