//! Statement parsing implementation
//!
//! This module handles statement lists and the five statement forms:
//!
//! - Variable declarations: `int x;`, `int x = 42;`
//! - Assignments: `x = y + 1;`
//! - `if` with an optional `else`, both with braced bodies
//! - `while` with a braced body
//! - `return` with or without a value
//!
//! # Grammar
//!
//! ```text
//! statement_list ::= statement+
//! statement      ::= declaration | assignment | if_stmt | while_stmt | return_stmt
//! declaration    ::= type ID ("=" expression)? ";"
//! assignment     ::= ID "=" expression ";"
//! if_stmt        ::= "if" "(" expression ")" block ("else" block)?
//! while_stmt     ::= "while" "(" expression ")" block
//! return_stmt    ::= "return" expression? ";"
//! block          ::= "{" statement_list "}"
//! ```
//!
//! Blocks are never empty, and there are no unbraced bodies or `else if`
//! chains: `else` must be followed by `{`.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::parse::{ParseError, Parser};
use crate::parser::tokens::{Token, TokenSource};
use tracing::trace;

impl<S: TokenSource> Parser<S> {
    /// Parse a non-empty statement list, stopping before the closing `}`
    pub(crate) fn parse_statement_list(&mut self) -> Result<Vec<Statement>, ParseError> {
        let mut statements = vec![self.parse_statement()?];

        while !self.check(&Token::RBrace(self.current_location())) {
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let statement = match self.peek() {
            _ if self.is_type_keyword() => self.parse_declaration()?,
            Token::Ident(..) => self.parse_assignment()?,
            Token::If(_) => self.parse_if_statement()?,
            Token::While(_) => self.parse_while_statement()?,
            Token::Return(_) => self.parse_return_statement()?,
            _ => return Err(self.unexpected("statement")),
        };

        trace!(kind = %statement.kind(), line = statement.location().line, "statement");
        Ok(statement)
    }

    /// Parse variable declaration with optional initializer
    fn parse_declaration(&mut self) -> Result<Statement, ParseError> {
        let loc = self.current_location();
        let var_type = self.parse_type()?;
        let (name, _) = self.expect_identifier()?;

        let initializer = if self.match_token(&Token::Eq(self.current_location()))? {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect_semicolon("after declaration")?;

        Ok(Statement::Declaration {
            name,
            var_type,
            initializer,
            location: loc,
        })
    }

    /// Parse assignment: name = expression;
    fn parse_assignment(&mut self) -> Result<Statement, ParseError> {
        let (target, loc) = self.expect_identifier()?;

        self.expect_token(
            &Token::Eq(self.current_location()),
            "'=' after assignment target",
        )?;
        let value = self.parse_expression()?;
        self.expect_semicolon("after assignment")?;

        Ok(Statement::Assignment {
            target,
            value,
            location: loc,
        })
    }

    /// Parse if statement, with or without else
    fn parse_if_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.advance()?.location(); // 'if'

        self.expect_lparen("after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after if condition")?;

        let then_branch = self.parse_block("if")?;

        if !self.check(&Token::Else(self.current_location())) {
            return Ok(Statement::If {
                condition,
                then_branch,
                location: loc,
            });
        }

        let else_loc = self.advance()?.location();
        let else_branch = self.parse_block("else")?;

        Ok(Statement::IfElse {
            condition,
            body: IfBody {
                then_branch,
                else_branch,
                location: else_loc,
            },
            location: loc,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.advance()?.location(); // 'while'

        self.expect_lparen("after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_rparen("after while condition")?;

        let body = self.parse_block("while")?;

        Ok(Statement::While {
            condition,
            body,
            location: loc,
        })
    }

    /// Parse return statement
    fn parse_return_statement(&mut self) -> Result<Statement, ParseError> {
        let loc = self.advance()?.location(); // 'return'

        let value = if self.check(&Token::Semicolon(self.current_location())) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.expect_semicolon("after return")?;

        Ok(Statement::Return {
            value,
            location: loc,
        })
    }

    /// Parse a braced, non-empty statement list
    fn parse_block(&mut self, owner: &str) -> Result<Vec<Statement>, ParseError> {
        self.nested(|p| {
            p.expect_lbrace(&format!("to open '{owner}' body"))?;
            let statements = p.parse_statement_list()?;
            p.expect_rbrace(&format!("to close '{owner}' body"))?;
            Ok(statements)
        })
    }
}
