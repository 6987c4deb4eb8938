//! Lexer for decimex expressions using the 'logos' crate
//! Classifies literals, identifiers, operators and parentheses

use crate::logos_token::LogosToken;
use crate::token::{Location, Token, TokenType};
use logos::Logos;

/// Expression lexer
pub struct Lexer<'source> {
    /// The logos lexer instance
    logos_lexer: logos::Lexer<'source, LogosToken>,
    /// The full source, needed to count columns across skipped whitespace
    source: &'source str,
    /// Byte offset up to which `column` has been computed
    counted: usize,
    /// Current column number (1-based)
    column: usize,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source text
    pub fn new(source: &'source str) -> Self {
        Self {
            logos_lexer: LogosToken::lexer(source),
            source,
            counted: 0,
            column: 1,
        }
    }

    /// Convert a LogosToken to our semantic Token type
    fn convert_token(logos_token: LogosToken) -> TokenType {
        match logos_token {
            LogosToken::Number => TokenType::Number,
            LogosToken::Dot => TokenType::Dot,
            LogosToken::Identifier => TokenType::Identifier,
            LogosToken::Plus => TokenType::Plus,
            LogosToken::Minus => TokenType::Minus,
            LogosToken::Star => TokenType::Star,
            LogosToken::Slash => TokenType::Slash,
            LogosToken::Caret => TokenType::Caret,
            LogosToken::LParen => TokenType::LeftParen,
            LogosToken::RParen => TokenType::RightParen,
        }
    }

    /// Advance the column counter to the given byte offset
    fn location_at(&mut self, offset: usize) -> Location {
        self.column += self.source[self.counted..offset].chars().count();
        self.counted = offset;
        Location {
            column: self.column,
            offset,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.logos_lexer.next()?;
        let span = self.logos_lexer.span();
        let lexeme = self.logos_lexer.slice();
        let location = self.location_at(span.start);
        let token_type = match logos_token {
            Ok(token) => Self::convert_token(token),
            Err(()) => {
                let ch = lexeme.chars().next().unwrap_or('\u{FFFD}');
                #[cfg(feature = "logging")]
                log::debug!("illegal character {ch:?} at column {}", location.column);
                TokenType::Error(ch)
            }
        };
        Some(Token::new(token_type, lexeme, location))
    }
}

/// Lex a whole expression into a token vector
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
