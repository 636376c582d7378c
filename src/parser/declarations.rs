//! Declaration parsing implementation
//!
//! This module handles the top-level pieces of a program:
//!
//! - Function definitions: `type name(params) { ... }`
//! - Parameter lists, possibly empty
//! - Type keywords
//!
//! # Grammar
//!
//! ```text
//! function   ::= type ID "(" param_list ")" "{" statement_list "}"
//! param_list ::= ε | param ("," param)*
//! param      ::= type ID
//! type       ::= "int" | "char" | "void"
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::tokens::{Token, TokenSource};
use tracing::trace;

impl<S: TokenSource> Parser<S> {
    /// Parse function definition: type name(params) { body }
    pub(crate) fn parse_function_definition(&mut self) -> Result<Function, ParseError> {
        let loc = self.current_location();
        let return_type = self.parse_type()?;
        let (name, _) = self.expect_identifier()?;

        self.expect_lparen("after function name")?;
        let params = self.parse_parameter_list()?;
        self.expect_rparen("after parameters")?;

        self.expect_lbrace("before function body")?;
        let body = self.parse_statement_list()?;
        self.expect_rbrace("after function body")?;

        trace!(%name, params = params.len(), statements = body.len(), "function");
        Ok(Function {
            name,
            return_type,
            params,
            body,
            location: loc,
        })
    }

    /// Parse parameter list: (type name, type name, ...), possibly empty
    pub(crate) fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(params);
        }

        loop {
            params.push(self.parse_param()?);

            if !self.match_token(&Token::Comma(self.current_location()))? {
                break;
            }
        }

        Ok(params)
    }

    fn parse_param(&mut self) -> Result<Param, ParseError> {
        let loc = self.current_location();
        let param_type = self.parse_type()?;
        let (name, _) = self.expect_identifier()?;

        Ok(Param {
            name,
            param_type,
            location: loc,
        })
    }

    /// Parse a type keyword
    pub(crate) fn parse_type(&mut self) -> Result<TypeName, ParseError> {
        let ty = match self.peek() {
            Token::Int(_) => TypeName::Int,
            Token::Char(_) => TypeName::Char,
            Token::Void(_) => TypeName::Void,
            _ => return Err(self.unexpected("type")),
        };
        self.advance()?;
        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::Parser;

    fn parse_function(source: &str) -> Function {
        let mut program = Parser::from_source(source)
            .and_then(|mut p| p.parse_program())
            .expect("Parsing failed");
        program.functions.remove(0)
    }

    fn parse_error(source: &str) -> String {
        Parser::from_source(source)
            .and_then(|mut p| p.parse_program())
            .expect_err("Parsing should fail")
            .message
    }

    #[test]
    fn test_parameters() {
        let function = parse_function("int add(int a, char b, void c) { return a; }");

        assert_eq!(function.name, "add");
        let params: Vec<(&str, TypeName)> = function
            .params
            .iter()
            .map(|p| (p.name.as_str(), p.param_type))
            .collect();
        assert_eq!(
            params,
            [("a", TypeName::Int), ("b", TypeName::Char), ("c", TypeName::Void)]
        );
        assert_eq!(function.params[1].location, SourceLocation::new(1, 16));
    }

    #[test]
    fn test_empty_parameter_list() {
        let function = parse_function("char f() { return; }");
        assert!(function.params.is_empty());
        assert_eq!(function.return_type, TypeName::Char);
    }

    #[test]
    fn test_parameter_errors() {
        assert_eq!(
            parse_error("int f(int a,) { return; }"),
            "unexpected ')', expected type"
        );
        assert_eq!(
            parse_error("int f(void) { return; }"),
            "unexpected ')', expected identifier"
        );
        assert_eq!(
            parse_error("int f(int a { return; }"),
            "unexpected '{', expected ')' after parameters"
        );
    }

    #[test]
    fn test_function_header_errors() {
        assert_eq!(
            parse_error("main() { return; }"),
            "unexpected identifier 'main', expected type"
        );
        assert_eq!(
            parse_error("int 5() { return; }"),
            "unexpected number 5, expected identifier"
        );
        assert_eq!(
            parse_error("int f() return; }"),
            "unexpected 'return', expected '{' before function body"
        );
        assert_eq!(
            parse_error("int f() { return;"),
            "unexpected end of file, expected statement"
        );
    }
}
