//! Consuming, post-order release of a whole tree
//!
//! Ownership already frees a [`Program`] when it is dropped. [`release`]
//! does the same work in a fixed, observable order, the one a recursive
//! `left, right, next, self` walk produces over the linked form of the
//! tree. For a chain `a -> b -> c` that means the subtrees of `a`, `b` and
//! `c` in order, then `c`, `b`, `a`.
//!
//! In the linked form the top level is a single chain: each function is
//! followed by its body statements and then by the next function. So the
//! second function is released before the first function's statements,
//! and every function last-to-first after that.
//!
//! The walk keeps its pending work on the heap, so long operator chains
//! release without deep recursion. The tree is taken by value, so
//! releasing the same tree twice does not compile.

use crate::parser::ast::*;
use std::mem;
use std::vec;
use tracing::debug;

/// Outcome of a release
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseReport {
    /// Number of nodes released
    pub released: usize,
}

/// Release a whole tree. `None` is a no-op.
pub fn release(tree: Option<Program>) -> ReleaseReport {
    release_with(tree, |_| {})
}

/// Release a whole tree, telling `observer` the kind of each node as it goes
pub fn release_with<F>(tree: Option<Program>, mut observer: F) -> ReleaseReport
where
    F: FnMut(NodeKind),
{
    let Some(program) = tree else {
        return ReleaseReport::default();
    };

    let mut released = 0;
    let mut work: Vec<Work> = chain(top_level(program), |node| node).into_iter().collect();

    while let Some(item) = work.pop() {
        let (node, rest) = match item {
            Work::Free(shell) => {
                observer(shell.kind);
                released += 1;
                drop(shell);
                continue;
            }
            Work::Node(node) => (node, None),
            Work::Chain(mut siblings) => match siblings.next() {
                Some(node) => (node, Some(siblings)),
                None => continue,
            },
        };

        // Popped in reverse: primary, secondary, rest of the chain, then the node
        let parts = take_apart(node);
        work.push(Work::Free(parts.shell));
        work.extend(rest.map(Work::Chain));
        work.extend(parts.secondary);
        work.extend(parts.primary);
    }

    debug!(released, "released tree");
    ReleaseReport { released }
}

/// An owned node waiting to be taken apart
enum Node {
    /// A function whose body has been spliced into the top-level chain
    Function(Function),
    Type(TypeName),
    Param(Param),
    Statement(Statement),
    IfBody(IfBody),
    Expr(Expr),
}

enum Work {
    Node(Node),
    Chain(vec::IntoIter<Node>),
    Free(Shell),
}

/// What is left of a node once its children are detached
struct Shell {
    kind: NodeKind,
    #[allow(dead_code)] // dropped with the shell
    payload: Option<String>,
}

impl Shell {
    fn new(kind: NodeKind, payload: Option<String>) -> Self {
        Self { kind, payload }
    }
}

struct Parts {
    shell: Shell,
    primary: Option<Work>,
    secondary: Option<Work>,
}

impl Parts {
    fn new(shell: Shell, primary: Option<Work>, secondary: Option<Work>) -> Self {
        Self {
            shell,
            primary,
            secondary,
        }
    }
}

fn top_level(program: Program) -> Vec<Node> {
    let mut nodes = Vec::new();
    for mut function in program.functions {
        let body = mem::take(&mut function.body);
        nodes.push(Node::Function(function));
        nodes.extend(body.into_iter().map(Node::Statement));
    }
    nodes
}

/// A sibling chain, or nothing when there are no siblings
fn chain<T>(items: Vec<T>, wrap: fn(T) -> Node) -> Option<Work> {
    if items.is_empty() {
        return None;
    }
    let nodes: Vec<Node> = items.into_iter().map(wrap).collect();
    Some(Work::Chain(nodes.into_iter()))
}

fn single(node: Node) -> Option<Work> {
    Some(Work::Node(node))
}

fn expr(expr: Expr) -> Option<Work> {
    single(Node::Expr(expr))
}

fn take_apart(node: Node) -> Parts {
    match node {
        Node::Function(function) => Parts::new(
            Shell::new(NodeKind::Function, Some(function.name)),
            single(Node::Type(function.return_type)),
            chain(function.params, Node::Param),
        ),
        Node::Type(ty) => Parts::new(
            Shell::new(NodeKind::Type, Some(ty.keyword().to_string())),
            None,
            None,
        ),
        Node::Param(param) => Parts::new(
            Shell::new(NodeKind::Param, Some(param.name)),
            single(Node::Type(param.param_type)),
            None,
        ),
        Node::Statement(statement) => take_apart_statement(statement),
        Node::IfBody(body) => Parts::new(
            Shell::new(NodeKind::IfBody, None),
            chain(body.then_branch, Node::Statement),
            chain(body.else_branch, Node::Statement),
        ),
        Node::Expr(mut node) => {
            let shell = match &mut node {
                Expr::Number { text, .. } => Shell::new(NodeKind::Number, Some(mem::take(text))),
                Expr::Id { name, .. } => Shell::new(NodeKind::Id, Some(mem::take(name))),
                Expr::BinaryOp { op, .. } => {
                    Shell::new(NodeKind::BinaryOp, Some(op.symbol().to_string()))
                }
            };
            match node.take_operands() {
                Some((left, right)) => Parts::new(shell, expr(left), expr(right)),
                None => Parts::new(shell, None, None),
            }
        }
    }
}

fn take_apart_statement(statement: Statement) -> Parts {
    match statement {
        Statement::Declaration {
            name,
            var_type,
            initializer,
            ..
        } => Parts::new(
            Shell::new(NodeKind::Declaration, Some(name)),
            single(Node::Type(var_type)),
            initializer.and_then(expr),
        ),
        Statement::Assignment { target, value, .. } => Parts::new(
            Shell::new(NodeKind::Assignment, Some(target)),
            None,
            expr(value),
        ),
        Statement::If {
            condition,
            then_branch,
            ..
        } => Parts::new(
            Shell::new(NodeKind::If, None),
            expr(condition),
            chain(then_branch, Node::Statement),
        ),
        Statement::IfElse {
            condition, body, ..
        } => Parts::new(
            Shell::new(NodeKind::IfElse, None),
            expr(condition),
            single(Node::IfBody(body)),
        ),
        Statement::While {
            condition, body, ..
        } => Parts::new(
            Shell::new(NodeKind::While, None),
            expr(condition),
            chain(body, Node::Statement),
        ),
        Statement::Return { value, .. } => {
            Parts::new(Shell::new(NodeKind::Return, None), None, value.and_then(expr))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::tree::NodeStats;
    use rustc_hash::FxHashMap;

    fn parse_source(source: &str) -> Program {
        Parser::from_source(source)
            .and_then(|mut p| p.parse_program())
            .expect("Parsing failed")
    }

    fn release_order(source: &str) -> Vec<NodeKind> {
        let mut order = Vec::new();
        release_with(Some(parse_source(source)), |kind| order.push(kind));
        order
    }

    #[test]
    fn test_absent_tree_is_a_no_op() {
        let mut calls = 0;
        let report = release_with(None, |_| calls += 1);

        assert_eq!(report, ReleaseReport::default());
        assert_eq!(report.released, 0);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_children_before_parent() {
        use NodeKind::*;
        assert_eq!(
            release_order("int f() { return 1; }"),
            [Type, Number, Return, Function]
        );
        assert_eq!(
            release_order("int f() { return a + b; }"),
            [Type, Id, Id, BinaryOp, Return, Function]
        );
    }

    #[test]
    fn test_chain_releases_tail_first() {
        use NodeKind::*;
        assert_eq!(
            release_order("int f(int a, char b) { x = 1; return; }"),
            [
                Type,       // f's return type
                Type,       // a's type
                Type,       // b's type
                Param,      // b
                Param,      // a
                Number,     // x = 1
                Return,     // second statement
                Assignment, // first statement
                Function,
            ]
        );
    }

    #[test]
    fn test_if_else_body_released_before_statement() {
        use NodeKind::*;
        assert_eq!(
            release_order("int f() { if (x) { y = 1; } else { return; } }"),
            [Type, Id, Number, Assignment, Return, IfBody, IfElse, Function]
        );
    }

    #[test]
    fn test_next_function_released_before_previous_body() {
        use NodeKind::*;
        assert_eq!(
            release_order("int a() { return 1; } int b() { return 2; }"),
            [Type, Number, Type, Number, Return, Function, Return, Function]
        );
    }

    #[test]
    fn test_long_operator_chain() {
        let terms = 100_000;
        let source = format!("int f() {{ return {}; }}", vec!["1"; terms].join(" + "));

        let mut operators = 0;
        let report = release_with(Some(parse_source(&source)), |kind| {
            if kind == NodeKind::BinaryOp {
                operators += 1;
            }
        });

        assert_eq!(operators, terms - 1);
        // function, type, return, the terms and the operators
        assert_eq!(report.released, 3 + terms + terms - 1);
    }

    #[test]
    fn test_every_node_released_exactly_once() {
        let source = "\
            int fib(int n) {
                int a = 0;
                int b = 1;
                while (n) {
                    int t = a + b;
                    a = b;
                    b = t;
                    n = n - 1;
                }
                if (a) { return a; } else { return (b * 2) / 2; }
            }
            void main() { fib = 3; return; }";

        let program = parse_source(source);
        let stats = NodeStats::collect(&program);

        let mut counts: FxHashMap<NodeKind, usize> = FxHashMap::default();
        let report = release_with(Some(program), |kind| *counts.entry(kind).or_default() += 1);

        assert_eq!(report.released, stats.total());
        for kind in NodeKind::ALL {
            assert_eq!(
                counts.get(&kind).copied().unwrap_or(0),
                stats.count(kind),
                "count mismatch for {kind}"
            );
        }
    }

    #[test]
    fn test_release_without_observer() {
        let report = release(Some(parse_source("void f() { return; }")));
        assert_eq!(report.released, 3);
    }
}
