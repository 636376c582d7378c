//! Expression parsing implementation
//!
//! Expressions are stratified into three layers, which fixes precedence
//! without any operator table:
//!
//! ```text
//! expression ::= term (("+" | "-") term)*
//! term       ::= factor (("*" | "/") factor)*
//! factor     ::= NUMBER | ID | "(" expression ")"
//! ```
//!
//! Both binary layers fold to the left, so `1 - 2 - 3` is `(1 - 2) - 3`.
//! Parentheses produce no node of their own.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::tokens::{Token, TokenSource};

impl<S: TokenSource> Parser<S> {
    /// Parse expression (additive layer)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.peek() {
                Token::Plus(_) => BinOp::Add,
                Token::Minus(_) => BinOp::Sub,
                _ => break,
            };
            let loc = self.advance()?.location();
            let right = self.parse_term()?;
            left = Expr::binary(op, left, right, loc);
        }

        Ok(left)
    }

    /// Parse term (multiplicative layer)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.peek() {
                Token::Star(_) => BinOp::Mul,
                Token::Slash(_) => BinOp::Div,
                _ => break,
            };
            let loc = self.advance()?.location();
            let right = self.parse_factor()?;
            left = Expr::binary(op, left, right, loc);
        }

        Ok(left)
    }

    /// Parse factor: number, identifier or parenthesized expression
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Token::Number(..) | Token::Ident(..) => match self.advance()? {
                Token::Number(value, loc) => Ok(Expr::number(value, loc)),
                Token::Ident(name, loc) => Ok(Expr::id(name, loc)),
                _ => Err(self.unexpected("expression")),
            },
            Token::LParen(_) => self.nested(|p| {
                p.advance()?;
                let expr = p.parse_expression()?;
                p.expect_rparen("to close parenthesized expression")?;
                Ok(expr)
            }),
            _ => Err(self.unexpected("expression")),
        }
    }
}
