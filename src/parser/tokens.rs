//! Token model and the pull-based token source the parser reads from
//!
//! The parser never produces tokens; it only pulls them, one at a time,
//! through [`TokenSource`]. [`Lexer`](super::lexer::Lexer) scans source text
//! on demand, and [`TokenStream`] replays a token list built elsewhere.

use super::ast::SourceLocation;
use super::lexer::LexError;
use std::fmt;

/// All token variants of the language's terminal set.
///
/// Every variant carries a [`SourceLocation`] so that parse errors can report
/// an accurate line and column without a separate token→location table.
/// Only numbers, identifiers and string literals have a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Number(i64, SourceLocation),
    Ident(String, SourceLocation),
    StringLiteral(String, SourceLocation),

    // Keywords
    Int(SourceLocation),
    Char(SourceLocation),
    Void(SourceLocation),
    If(SourceLocation),
    Else(SourceLocation),
    While(SourceLocation),
    For(SourceLocation),
    Return(SourceLocation),

    // Arithmetic
    Plus(SourceLocation),    // +
    Minus(SourceLocation),   // -
    Star(SourceLocation),    // *
    Slash(SourceLocation),   // /
    Percent(SourceLocation), // %

    // Assignment and comparison
    Eq(SourceLocation),    // =
    EqEq(SourceLocation),  // ==
    NotEq(SourceLocation), // !=
    Lt(SourceLocation),    // <
    Gt(SourceLocation),    // >
    Le(SourceLocation),    // <=
    Ge(SourceLocation),    // >=

    // Logical and address-of
    AndAnd(SourceLocation), // &&
    OrOr(SourceLocation),   // ||
    Bang(SourceLocation),   // !
    Amp(SourceLocation),    // &

    // Punctuation
    LParen(SourceLocation),    // (
    RParen(SourceLocation),    // )
    LBrace(SourceLocation),    // {
    RBrace(SourceLocation),    // }
    Semicolon(SourceLocation), // ;
    Comma(SourceLocation),     // ,

    // End of input
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Number(_, loc)
            | Token::Ident(_, loc)
            | Token::StringLiteral(_, loc)
            | Token::Int(loc)
            | Token::Char(loc)
            | Token::Void(loc)
            | Token::If(loc)
            | Token::Else(loc)
            | Token::While(loc)
            | Token::For(loc)
            | Token::Return(loc)
            | Token::Plus(loc)
            | Token::Minus(loc)
            | Token::Star(loc)
            | Token::Slash(loc)
            | Token::Percent(loc)
            | Token::Eq(loc)
            | Token::EqEq(loc)
            | Token::NotEq(loc)
            | Token::Lt(loc)
            | Token::Gt(loc)
            | Token::Le(loc)
            | Token::Ge(loc)
            | Token::AndAnd(loc)
            | Token::OrOr(loc)
            | Token::Bang(loc)
            | Token::Amp(loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::LBrace(loc)
            | Token::RBrace(loc)
            | Token::Semicolon(loc)
            | Token::Comma(loc)
            | Token::Eof(loc) => *loc,
        }
    }

    /// Whether two tokens are the same terminal, ignoring payload and location.
    pub fn same_kind(&self, other: &Token) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n, _) => write!(f, "number {}", n),
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::StringLiteral(s, _) => write!(f, "string literal {:?}", s),
            Token::Int(_) => write!(f, "'int'"),
            Token::Char(_) => write!(f, "'char'"),
            Token::Void(_) => write!(f, "'void'"),
            Token::If(_) => write!(f, "'if'"),
            Token::Else(_) => write!(f, "'else'"),
            Token::While(_) => write!(f, "'while'"),
            Token::For(_) => write!(f, "'for'"),
            Token::Return(_) => write!(f, "'return'"),
            Token::Plus(_) => write!(f, "'+'"),
            Token::Minus(_) => write!(f, "'-'"),
            Token::Star(_) => write!(f, "'*'"),
            Token::Slash(_) => write!(f, "'/'"),
            Token::Percent(_) => write!(f, "'%'"),
            Token::Eq(_) => write!(f, "'='"),
            Token::EqEq(_) => write!(f, "'=='"),
            Token::NotEq(_) => write!(f, "'!='"),
            Token::Lt(_) => write!(f, "'<'"),
            Token::Gt(_) => write!(f, "'>'"),
            Token::Le(_) => write!(f, "'<='"),
            Token::Ge(_) => write!(f, "'>='"),
            Token::AndAnd(_) => write!(f, "'&&'"),
            Token::OrOr(_) => write!(f, "'||'"),
            Token::Bang(_) => write!(f, "'!'"),
            Token::Amp(_) => write!(f, "'&'"),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::LBrace(_) => write!(f, "'{{'"),
            Token::RBrace(_) => write!(f, "'}}'"),
            Token::Semicolon(_) => write!(f, "';'"),
            Token::Comma(_) => write!(f, "','"),
            Token::Eof(_) => write!(f, "end of file"),
        }
    }
}

/// A pull-based supplier of tokens.
///
/// Each call yields the next token. Once the input is exhausted a source
/// must keep returning [`Token::Eof`].
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Token, LexError>;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Result<Token, LexError> {
        (**self).next_token()
    }
}

/// Replays a pre-built token list.
///
/// A trailing [`Token::Eof`] is optional: a drained stream keeps yielding
/// `Eof` at the location of the last token it handed out.
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: std::vec::IntoIter<Token>,
    last_location: SourceLocation,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter(),
            last_location: SourceLocation::new(1, 1),
        }
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        TokenStream::new(tokens)
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Result<Token, LexError> {
        match self.tokens.next() {
            Some(token) => {
                self.last_location = token.location();
                Ok(token)
            }
            None => Ok(Token::Eof(self.last_location)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drained_stream_yields_eof_forever() {
        let loc = SourceLocation::new(3, 7);
        let mut stream = TokenStream::new(vec![Token::Semicolon(loc)]);

        assert!(matches!(stream.next_token().unwrap(), Token::Semicolon(_)));
        for _ in 0..3 {
            assert_eq!(stream.next_token().unwrap(), Token::Eof(loc));
        }
    }

    #[test]
    fn test_same_kind_ignores_payload() {
        let a = Token::Ident("a".to_string(), SourceLocation::new(1, 1));
        let b = Token::Ident("b".to_string(), SourceLocation::new(2, 5));
        assert!(a.same_kind(&b));
        assert!(!a.same_kind(&Token::Number(1, SourceLocation::new(1, 1))));
    }
}
