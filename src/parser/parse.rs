//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: functions, parameters and types
//! - `statements`: statement lists and the five statement forms
//! - `expressions`: the expression/term/factor layers
//!
//! # Lookahead
//!
//! The parser holds exactly one lookahead token, pulled from its
//! [`TokenSource`] when the previous one is consumed. Every decision is made
//! on that single token, so the parse never backtracks.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::diagnostics::DiagnosticSink;
use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer};
use crate::parser::tokens::{Token, TokenSource};
use thiserror::Error;
use tracing::debug;

/// Deepest nesting of parenthesized expressions and statement bodies,
/// counted together. One level more is a syntax error, not a stack overflow.
pub const MAX_NESTING: usize = 128;

/// Parser error type. A parse stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("syntax error at {location}: {message}")]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for minic
pub struct Parser<S> {
    source: S,
    lookahead: Token,
    depth: usize,
}

impl Parser<Lexer> {
    /// Parser over source text, scanned lazily by a [`Lexer`]
    pub fn from_source(source: &str) -> Result<Self, ParseError> {
        Parser::new(Lexer::new(source))
    }
}

impl<S: TokenSource> Parser<S> {
    /// Create a parser, pulling the first lookahead token from `source`
    pub fn new(mut source: S) -> Result<Self, ParseError> {
        let lookahead = source.next_token()?;
        Ok(Self {
            source,
            lookahead,
            depth: 0,
        })
    }

    /// Parse the entire program (a non-empty function list)
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        loop {
            let function = self.parse_function_definition()?;
            program.functions.push(function);

            if self.is_at_end() {
                break;
            }
        }

        debug!(functions = program.functions.len(), "parsed program");
        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn is_type_keyword(&self) -> bool {
        matches!(
            self.peek(),
            Token::Int(_) | Token::Char(_) | Token::Void(_)
        )
    }

    /// Consume the lookahead if it is the same terminal as `token`
    pub(crate) fn match_token(&mut self, token: &Token) -> Result<bool, ParseError> {
        if self.check(token) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        self.lookahead.same_kind(token)
    }

    /// Consume the lookahead and pull the next one. `Eof` is never consumed.
    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        if self.is_at_end() {
            return Ok(self.lookahead.clone());
        }
        let next = self.source.next_token()?;
        Ok(std::mem::replace(&mut self.lookahead, next))
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.lookahead, Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.lookahead
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.lookahead.location()
    }

    /// Error for an unexpected lookahead token
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        ParseError {
            message: format!("unexpected {}, expected {}", self.peek(), expected),
            location: self.current_location(),
        }
    }

    /// Run `parse` one nesting level deeper, failing at the lookahead once
    /// [`MAX_NESTING`] levels are open
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError {
                message: format!("memory exhausted: more than {MAX_NESTING} nested levels"),
                location: self.current_location(),
            });
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn expect_token(
        &mut self,
        token: &Token,
        expected: &str,
    ) -> Result<Token, ParseError> {
        if self.check(token) {
            self.advance()
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub(crate) fn expect_lparen(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(
            &Token::LParen(self.current_location()),
            &format!("'(' {ctx}"),
        )
    }

    pub(crate) fn expect_rparen(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(
            &Token::RParen(self.current_location()),
            &format!("')' {ctx}"),
        )
    }

    pub(crate) fn expect_lbrace(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(
            &Token::LBrace(self.current_location()),
            &format!("'{{' {ctx}"),
        )
    }

    pub(crate) fn expect_rbrace(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(
            &Token::RBrace(self.current_location()),
            &format!("'}}' {ctx}"),
        )
    }

    pub(crate) fn expect_semicolon(&mut self, ctx: &str) -> Result<Token, ParseError> {
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            &format!("';' {ctx}"),
        )
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<(String, SourceLocation), ParseError> {
        if let Token::Ident(name, loc) = self.peek() {
            let ident = (name.clone(), *loc);
            self.advance()?;
            Ok(ident)
        } else {
            Err(self.unexpected("identifier"))
        }
    }
}

/// Parse a whole token stream, reporting failure through `sink`.
///
/// Returns the root on success. On the first syntax (or lexical) error the
/// sink receives exactly one diagnostic and no tree is returned; fragments
/// built before the error are dropped.
pub fn parse<S: TokenSource>(source: S, sink: &mut dyn DiagnosticSink) -> Option<Program> {
    let result = Parser::new(source).and_then(|mut parser| parser.parse_program());

    match result {
        Ok(program) => Some(program),
        Err(err) => {
            debug!(%err, "parse failed");
            sink.report(&err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokens::TokenStream;

    fn parse_source(source: &str) -> Result<Program, ParseError> {
        Parser::from_source(source)?.parse_program()
    }

    #[test]
    fn test_parse_simple_function() {
        let program = parse_source("int main() { return 0; }").unwrap();

        assert_eq!(program.functions.len(), 1);
        let function = &program.functions[0];
        assert_eq!(function.name, "main");
        assert_eq!(function.return_type, TypeName::Int);
        assert!(function.params.is_empty());
        assert_eq!(function.body.len(), 1);
    }

    #[test]
    fn test_functions_in_source_order() {
        let source = "void a() { return; } char b(int x) { return x; } int c() { return 3; }";
        let program = parse_source(source).unwrap();

        let names: Vec<&str> = program.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let err = parse_source("").unwrap_err();
        assert_eq!(err.message, "unexpected end of file, expected type");
        assert!(parse_source("  // nothing here\n").is_err());
    }

    #[test]
    fn test_trailing_garbage_is_an_error() {
        let err = parse_source("int f() { return; } ;").unwrap_err();
        assert_eq!(err.message, "unexpected ';', expected type");
    }

    #[test]
    fn test_lex_error_becomes_parse_error() {
        let err = parse_source("int f() { x = 1 $ 2; }").unwrap_err();
        assert!(err.message.contains("Unexpected character"));
        assert_eq!(err.location, SourceLocation::new(1, 17));
    }

    #[test]
    fn test_parse_reports_exactly_once() {
        let mut sink: Vec<String> = Vec::new();
        let result = parse(Lexer::new("int f() { x = 1 }"), &mut sink);

        assert!(result.is_none());
        assert_eq!(sink.len(), 1);
        assert_eq!(
            sink[0],
            "syntax error at line 1, column 17: unexpected '}', expected ';' after assignment"
        );
    }

    #[test]
    fn test_parse_from_token_stream() {
        let loc = SourceLocation::new(1, 1);
        let tokens = vec![
            Token::Void(loc),
            Token::Ident("f".to_string(), loc),
            Token::LParen(loc),
            Token::RParen(loc),
            Token::LBrace(loc),
            Token::Return(loc),
            Token::Semicolon(loc),
            Token::RBrace(loc),
        ];

        let mut sink: Vec<String> = Vec::new();
        let program = parse(TokenStream::new(tokens), &mut sink).unwrap();
        assert!(sink.is_empty());
        assert_eq!(program.functions[0].return_type, TypeName::Void);
    }

    fn nested_parens(depth: usize) -> String {
        format!("int f() {{ return {}1{}; }}", "(".repeat(depth), ")".repeat(depth))
    }

    fn nested_ifs(depth: usize) -> String {
        format!(
            "int f() {{ {}return; {}}}",
            "if (x) { ".repeat(depth),
            "} ".repeat(depth)
        )
    }

    #[test]
    fn test_nesting_up_to_the_limit() {
        assert!(parse_source(&nested_parens(MAX_NESTING)).is_ok());
        assert!(parse_source(&nested_ifs(MAX_NESTING)).is_ok());
    }

    #[test]
    fn test_nesting_past_the_limit() {
        let err = parse_source(&nested_parens(MAX_NESTING + 1)).unwrap_err();
        assert_eq!(err.message, "memory exhausted: more than 128 nested levels");
        // the first '(' is at column 18; the one past the limit opens level 129
        assert_eq!(err.location, SourceLocation::new(1, 18 + MAX_NESTING));

        let err = parse_source(&nested_ifs(MAX_NESTING + 1)).unwrap_err();
        assert_eq!(err.message, "memory exhausted: more than 128 nested levels");
    }

    #[test]
    fn test_deep_nesting_reports_once() {
        let mut sink: Vec<String> = Vec::new();
        let result = parse(Lexer::new(&nested_parens(10_000)), &mut sink);

        assert!(result.is_none());
        assert_eq!(sink.len(), 1);
        assert!(sink[0].contains("memory exhausted"));
    }
}
