use std::fmt;

/// Represents a token's location in the expression text.
///
/// Expressions are single-line, so a column is enough for diagnostics; the
/// byte offset is kept for slicing the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// The 1-based column (counted in characters)
    pub column: usize,
    /// The 0-based byte offset from the start of the source
    pub offset: usize,
}

/// The class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    // Term classes
    /// Unsigned decimal literal text such as `13.73` or `.5`
    Number,
    /// A stray `.` outside a number
    Dot,
    /// Variable name
    Identifier,

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,

    // Punctuation
    /// `(`
    LeftParen,
    /// `)`
    RightParen,

    /// A character outside the expression grammar
    Error(char),
}

impl TokenType {
    /// Whether this token contributes text to a term (literal or variable name)
    pub fn is_term(&self) -> bool {
        matches!(self, TokenType::Number | TokenType::Dot | TokenType::Identifier)
    }

    /// Whether this token is one of the five binary operators
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenType::Plus | TokenType::Minus | TokenType::Star | TokenType::Slash | TokenType::Caret
        )
    }

    /// Whether this token can start a numeric literal
    pub fn is_numeric(&self) -> bool {
        matches!(self, TokenType::Number | TokenType::Dot)
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Number => f.write_str("number"),
            TokenType::Dot => f.write_str("'.'"),
            TokenType::Identifier => f.write_str("identifier"),
            TokenType::Plus => f.write_str("'+'"),
            TokenType::Minus => f.write_str("'-'"),
            TokenType::Star => f.write_str("'*'"),
            TokenType::Slash => f.write_str("'/'"),
            TokenType::Caret => f.write_str("'^'"),
            TokenType::LeftParen => f.write_str("'('"),
            TokenType::RightParen => f.write_str("')'"),
            TokenType::Error(c) => write!(f, "illegal character {c:?}"),
        }
    }
}

/// A classified slice of the expression text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The class of the token
    pub token_type: TokenType,
    /// The exact source text
    pub lexeme: String,
    /// Where the token starts
    pub location: Location,
}

impl Token {
    /// Create a new token
    pub fn new(token_type: TokenType, lexeme: impl Into<String>, location: Location) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at column {}", self.token_type, self.location.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_classes() {
        assert!(TokenType::Number.is_term());
        assert!(TokenType::Dot.is_term());
        assert!(TokenType::Identifier.is_term());
        assert!(!TokenType::Error(',').is_term());

        for op in [
            TokenType::Plus,
            TokenType::Minus,
            TokenType::Star,
            TokenType::Slash,
            TokenType::Caret,
        ] {
            assert!(op.is_operator(), "{op}");
            assert!(!op.is_term(), "{op}");
        }
        assert!(!TokenType::LeftParen.is_operator());

        assert!(TokenType::Dot.is_numeric());
        assert!(!TokenType::Identifier.is_numeric());
    }

    #[test]
    fn test_token_display() {
        let token = Token::new(TokenType::Error('%'), "%", Location { column: 4, offset: 3 });
        assert_eq!(token.to_string(), "illegal character '%' at column 4");
    }
}
