//! Raw token grammar recognized by `logos`.

use logos::Logos;

/// Raw token type produced by the logos state machine.
///
/// Only the characters that can legally appear in an expression have a
/// variant here; anything else surfaces as a lexing error.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
#[logos(skip r"[ \t]+")]
pub enum LogosToken {
    // --- Literals ---
    /// Unsigned decimal literal; the sign is handled by the evaluator
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    #[regex(r"\.[0-9]+")]
    Number,

    /// A lone '.' that is not part of a number
    #[token(".")]
    Dot,

    // --- Identifiers ---
    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Identifier,

    // --- Operators ---
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,

    // --- Delimiters ---
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
}
