//! Lexer (tokenizer) for minic source code
//!
//! Converts raw source text into [`Token`]s, one per [`TokenSource::next_token`]
//! call. Whitespace, `//` line comments and `/* */` block comments are
//! skipped. There is no preprocessor: a `#` is an unexpected character.

use super::ast::SourceLocation;
use super::tokens::{Token, TokenSource};
use thiserror::Error;

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lexical error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl LexError {
    fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

/// Lexer for minic source code
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input, including the final [`Token::Eof`]
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan()?;
            let done = matches!(token, Token::Eof(_));
            tokens.push(token);
            if done {
                break;
            }
        }

        Ok(tokens)
    }

    /// Scan the next token
    fn scan(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace_and_comments()?;

        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            return Ok(Token::Eof(loc));
        };

        match ch {
            '"' => self.string_literal(loc),
            '0'..='9' => self.number_literal(ch, loc),
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier_or_keyword(ch, loc)),

            '+' => Ok(Token::Plus(loc)),
            '-' => Ok(Token::Minus(loc)),
            '*' => Ok(Token::Star(loc)),
            '/' => Ok(Token::Slash(loc)),
            '%' => Ok(Token::Percent(loc)),
            '=' => Ok(self.either('=', Token::EqEq(loc), Token::Eq(loc))),
            '!' => Ok(self.either('=', Token::NotEq(loc), Token::Bang(loc))),
            '<' => Ok(self.either('=', Token::Le(loc), Token::Lt(loc))),
            '>' => Ok(self.either('=', Token::Ge(loc), Token::Gt(loc))),
            '&' => Ok(self.either('&', Token::AndAnd(loc), Token::Amp(loc))),
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    Ok(Token::OrOr(loc))
                } else {
                    Err(LexError::new("Unexpected character: '|'", loc))
                }
            }
            '(' => Ok(Token::LParen(loc)),
            ')' => Ok(Token::RParen(loc)),
            '{' => Ok(Token::LBrace(loc)),
            '}' => Ok(Token::RBrace(loc)),
            ';' => Ok(Token::Semicolon(loc)),
            ',' => Ok(Token::Comma(loc)),

            _ => Err(LexError::new(format!("Unexpected character: '{}'", ch), loc)),
        }
    }

    /// Two-character operator if the next char is `second`, else the single one
    fn either(&mut self, second: char, double: Token, single: Token) -> Token {
        if self.peek() == Some(second) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Parse string literal; the opening quote is already consumed
    fn string_literal(&mut self, loc: SourceLocation) -> Result<Token, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.advance() {
            match ch {
                '"' => return Ok(Token::StringLiteral(string, loc)),
                '\\' => {
                    let escaped = self.advance().ok_or_else(|| {
                        LexError::new(
                            "Unexpected end of file in string literal",
                            self.current_location(),
                        )
                    })?;
                    let unescaped = match escaped {
                        'n' => '\n',
                        't' => '\t',
                        '\\' => '\\',
                        '"' => '"',
                        _ => {
                            return Err(LexError::new(
                                format!("Unknown escape sequence: \\{}", escaped),
                                self.current_location(),
                            ));
                        }
                    };
                    string.push(unescaped);
                }
                _ => string.push(ch),
            }
        }

        Err(LexError::new("Unterminated string literal", loc))
    }

    /// Parse a decimal integer literal
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut num_str = String::new();
        num_str.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let value = num_str.parse::<i64>().map_err(|_| {
            LexError::new(format!("Integer literal out of range: {}", num_str), loc)
        })?;

        Ok(Token::Number(value, loc))
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match ident.as_str() {
            "int" => Token::Int(loc),
            "char" => Token::Char(loc),
            "void" => Token::Void(loc),
            "if" => Token::If(loc),
            "else" => Token::Else(loc),
            "while" => Token::While(loc),
            "for" => Token::For(loc),
            "return" => Token::Return(loc),
            _ => Token::Ident(ident, loc),
        }
    }

    /// Skip whitespace and comments
    fn skip_whitespace_and_comments(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ') | Some('\t') | Some('\r') | Some('\n') => {
                    self.advance();
                }
                Some('/') => {
                    if self.peek_ahead(1) == Some('/') {
                        self.skip_line_comment();
                    } else if self.peek_ahead(1) == Some('*') {
                        self.skip_block_comment()?;
                    } else {
                        break;
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    /// Skip single-line comment (// ...)
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.advance() {
            if ch == '\n' {
                break;
            }
        }
    }

    /// Skip multi-line comment (/* ... */)
    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.current_location();
        self.advance(); // skip '/'
        self.advance(); // skip '*'

        while !self.is_at_end() {
            if self.peek() == Some('*') && self.peek_ahead(1) == Some('/') {
                self.advance();
                self.advance();
                return Ok(());
            }
            self.advance();
        }

        Err(LexError::new("Unterminated block comment", start_loc))
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character, tracking line and column
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Result<Token, LexError> {
        self.scan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokens() {
        let mut lexer = Lexer::new("int main() { return 0; }");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Int(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "main"));
        assert!(matches!(tokens[2], Token::LParen(_)));
        assert!(matches!(tokens[3], Token::RParen(_)));
        assert!(matches!(tokens[4], Token::LBrace(_)));
        assert!(matches!(tokens[5], Token::Return(_)));
        assert!(matches!(tokens[6], Token::Number(0, _)));
        assert!(matches!(tokens[7], Token::Semicolon(_)));
        assert!(matches!(tokens[8], Token::RBrace(_)));
        assert!(matches!(tokens[9], Token::Eof(_)));
        assert_eq!(tokens.len(), 10);
    }

    #[test]
    fn test_operators() {
        let mut lexer = Lexer::new("= == != < <= > >= && || ! & %");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Eq(_)));
        assert!(matches!(tokens[1], Token::EqEq(_)));
        assert!(matches!(tokens[2], Token::NotEq(_)));
        assert!(matches!(tokens[3], Token::Lt(_)));
        assert!(matches!(tokens[4], Token::Le(_)));
        assert!(matches!(tokens[5], Token::Gt(_)));
        assert!(matches!(tokens[6], Token::Ge(_)));
        assert!(matches!(tokens[7], Token::AndAnd(_)));
        assert!(matches!(tokens[8], Token::OrOr(_)));
        assert!(matches!(tokens[9], Token::Bang(_)));
        assert!(matches!(tokens[10], Token::Amp(_)));
        assert!(matches!(tokens[11], Token::Percent(_)));
    }

    #[test]
    fn test_comments() {
        let mut lexer = Lexer::new("int x; // comment\nint y; /* block\ncomment */ int z;");
        let tokens = lexer.tokenize().unwrap();

        assert!(matches!(tokens[0], Token::Int(_)));
        assert!(matches!(tokens[1], Token::Ident(ref s, _) if s == "x"));
        assert!(matches!(tokens[2], Token::Semicolon(_)));
        assert!(matches!(tokens[3], Token::Int(_)));
        assert!(matches!(tokens[4], Token::Ident(ref s, _) if s == "y"));
        assert!(matches!(tokens[5], Token::Semicolon(_)));
        assert!(matches!(tokens[6], Token::Int(_)));
        assert!(matches!(tokens[7], Token::Ident(ref s, _) if s == "z"));
    }

    #[test]
    fn test_string_literal() {
        let mut lexer = Lexer::new(r#""hello\nworld""#);
        let tokens = lexer.tokenize().unwrap();

        match &tokens[0] {
            Token::StringLiteral(s, _) => assert_eq!(s, "hello\nworld"),
            other => panic!("Expected string literal, got {other}"),
        }
    }

    #[test]
    fn test_locations() {
        let mut lexer = Lexer::new("int\n  x = 42;");
        let tokens = lexer.tokenize().unwrap();

        assert_eq!(tokens[0].location(), SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location(), SourceLocation::new(2, 3));
        assert_eq!(tokens[2].location(), SourceLocation::new(2, 5));
        assert_eq!(tokens[3].location(), SourceLocation::new(2, 7));
    }

    #[test]
    fn test_pull_past_end_keeps_returning_eof() {
        let mut lexer = Lexer::new("x");
        assert!(matches!(lexer.next_token().unwrap(), Token::Ident(..)));
        assert!(matches!(lexer.next_token().unwrap(), Token::Eof(_)));
        assert!(matches!(lexer.next_token().unwrap(), Token::Eof(_)));
    }

    #[test]
    fn test_errors() {
        let err = Lexer::new("int x = 1 @ 2;").tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 11));
        assert!(err.message.contains('@'));

        assert!(Lexer::new("\"open").tokenize().is_err());
        assert!(Lexer::new("/* open").tokenize().is_err());
        assert!(Lexer::new("a | b").tokenize().is_err());
        assert!(Lexer::new("99999999999999999999").tokenize().is_err());
    }
}
