//! decimex lexical analyzer
//!
//! This crate splits an arithmetic expression into classified tokens
//! (number literals, identifiers, operators, parentheses) for the evaluator.
//! Characters outside the grammar are reported as error tokens rather than
//! aborting the scan, so callers can point at the exact offending position.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod lexer;
pub mod logos_token;
pub mod token;

// Re-export the main types for convenience
pub use lexer::{tokenize, Lexer};
pub use logos_token::LogosToken;
pub use token::{Location, Token, TokenType};
