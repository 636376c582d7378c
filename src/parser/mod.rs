//! minic source code parser
//!
//! This module transforms minic source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`tokens`]: The token model and the pull-based [`TokenSource`] boundary
//! - [`parse`]: Parsing (tokens → AST), split across `declarations`,
//!   `statements` and `expressions`
//! - [`ast`]: AST node definitions
//!
//! # Language
//!
//! - Types: `int`, `char`, `void`
//! - Top level: one or more function definitions
//! - Statements: declarations, assignments, `if`/`else`, `while`, `return`
//! - Expressions: `+ - * /` over integer literals, identifiers and parentheses
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead.
//! No external parser generator dependencies.

pub mod ast;
pub mod lexer;
pub mod parse;
pub mod tokens;

mod declarations;
mod expressions;
mod statements;

pub use parse::{parse, ParseError, Parser, MAX_NESTING};
pub use tokens::{Token, TokenSource, TokenStream};
