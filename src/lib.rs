//! # Introduction
//!
//! minic is a syntax analyzer for a small C-like language. It reads one
//! source file, builds an abstract syntax tree, prints the tree as an
//! indented pre-order dump and releases it. A terminal explorer built with
//! [ratatui](https://docs.rs/ratatui) can browse the same tree next to the
//! source it came from.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → Dump → Release
//!                                 └→ Explorer (optional)
//! ```
//!
//! 1. [`parser`]: tokenises the source and builds the AST; a failed parse
//!    reports one diagnostic through [`diagnostics`].
//! 2. [`tree`]: the uniform link view over the AST, the dump printer, the
//!    ordered release and per-kind statistics.
//! 3. [`ui`]: ratatui-based explorer; not part of the stable library API.
//!
//! ## Language
//!
//! A program is one or more function definitions. Types are `int`, `char`
//! and `void`. Statements are declarations with an optional initializer,
//! assignments, `if` with an optional `else`, `while` and `return`.
//! Expressions are `+ - * /` over integer literals, identifiers and
//! parenthesized subexpressions, with the usual precedence and left
//! associativity.
//!
//! ```
//! use minic::parser::{lexer::Lexer, parse};
//!
//! let mut errors: Vec<String> = Vec::new();
//! let program = parse(Lexer::new("int one() { return 1; }"), &mut errors).unwrap();
//! assert_eq!(program.to_string(), "function: one\n  type: int\nreturn\n  number: 1\n");
//! assert!(errors.is_empty());
//! assert_eq!(minic::tree::release(Some(program)).released, 4);
//! ```

pub mod diagnostics;
pub mod parser;
pub mod tree;
pub mod ui;
