//! Structural checks that run before an expression is scanned.
//!
//! [`validate`] runs every check in a fixed order (parenthesis count,
//! characters, variable completeness) and stops at the first failure.
//! Evaluation itself only gates on the parenthesis count and the variables:
//! a character outside the grammar becomes part of its term and is reported
//! by the term resolver as a malformed number.
//!
//! None of the checks look at operator placement; duplicate operators and
//! missing operands only show up while scanning and reducing.

use decimex_lexer::{tokenize, Token, TokenType};

use crate::bindings::Bindings;
use crate::error::{EvalError, EvalResult};

/// Validate already lexed tokens
pub fn validate_tokens(tokens: &[Token], bindings: &Bindings) -> EvalResult<()> {
    check_parentheses(tokens)?;
    check_characters(tokens)?;
    check_variables(tokens, bindings)
}

/// The subset of checks evaluation runs before scanning
pub fn check_before_scan(tokens: &[Token], bindings: &Bindings) -> EvalResult<()> {
    check_parentheses(tokens)?;
    check_variables(tokens, bindings)
}

/// Lex and validate an expression
pub fn validate(expression: &str, bindings: &Bindings) -> EvalResult<()> {
    validate_tokens(&tokenize(expression), bindings)
}

/// Compare the number of '(' and ')'.
///
/// Only the totals are compared; `)(` passes here and is rejected by the
/// scanner instead.
pub fn check_parentheses(tokens: &[Token]) -> EvalResult<()> {
    let opening = count(tokens, TokenType::LeftParen);
    let closing = count(tokens, TokenType::RightParen);
    if opening == closing {
        Ok(())
    } else {
        Err(EvalError::ParenthesisMismatch { opening, closing })
    }
}

/// Reject the first character outside the grammar
pub fn check_characters(tokens: &[Token]) -> EvalResult<()> {
    match tokens.iter().find_map(|t| match t.token_type {
        TokenType::Error(ch) => Some((ch, t.location.column)),
        _ => None,
    }) {
        Some((ch, column)) => Err(EvalError::IllegalCharacter { ch, column }),
        None => Ok(()),
    }
}

/// Every variable name must have a binding
pub fn check_variables(tokens: &[Token], bindings: &Bindings) -> EvalResult<()> {
    match identifiers(tokens).find(|name| !bindings.contains(name)) {
        Some(name) => Err(EvalError::MissingVariable {
            name: name.to_string(),
        }),
        None => Ok(()),
    }
}

/// Distinct variable names in order of first appearance
pub fn extract_variables(expression: &str) -> Vec<String> {
    let tokens = tokenize(expression);
    let mut names: Vec<String> = Vec::new();
    for name in identifiers(&tokens) {
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Whether any character falls outside the expression grammar
pub fn contains_illegal_char(expression: &str) -> bool {
    check_characters(&tokenize(expression)).is_err()
}

fn identifiers(tokens: &[Token]) -> impl Iterator<Item = &str> {
    tokens
        .iter()
        .filter(|t| t.token_type == TokenType::Identifier)
        .map(|t| t.lexeme.as_str())
}

fn count(tokens: &[Token], token_type: TokenType) -> usize {
    tokens.iter().filter(|t| t.token_type == token_type).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parenthesis_count() {
        let empty = Bindings::new();
        assert_eq!(
            validate("(100/10", &empty),
            Err(EvalError::ParenthesisMismatch {
                opening: 1,
                closing: 0
            })
        );
        assert_eq!(validate("(100/10)*(3+2)", &empty), Ok(()));
        // count only: order is checked while scanning
        assert_eq!(validate(")1+2(", &empty), Ok(()));
    }

    #[test]
    fn test_illegal_characters() {
        assert!(!contains_illegal_char(
            "0.014000 ^ 2 *((13.73/10)+2*13.73+0.014000) - 1"
        ));
        for expression in [
            "0.014000 ^ 2: *((13.73/10)+2*13.73+0.014000)",
            "0,014000 ^ 2 *((13.73/10)+2*13.73+0.014000)",
            "0.014000 ^ 2 *([13.73/10]+2*13.73+0.014000)",
            "0.014000 ^ 2 *((13.73/10)+2*13.7>3+0.014000)<",
            "0.014000 ^ 2%1 *((13.73/10)+2*13.73+0.014000)",
            "{0.014000} ^ 2 *((13.73/10)+2*13.73+0.014000)",
            "{0.014000} ^ 2 *\\((13.73/10)+2*13.73+0.014000)",
            "0.014000 | 2",
            "(100/10) * (3+2)\n+2",
        ] {
            assert!(contains_illegal_char(expression), "{expression:?}");
        }
        assert_eq!(
            validate("0,5+1", &Bindings::new()),
            Err(EvalError::IllegalCharacter { ch: ',', column: 2 })
        );
    }

    #[test]
    fn test_extract_variables() {
        let names = extract_variables("a ^ 2 *myVar+SOMETHING_BIG((c/10)+b*c+a)");
        assert_eq!(names, vec!["a", "myVar", "SOMETHING_BIG", "c", "b"]);
        assert!(extract_variables("2*(100/10)").is_empty());
    }

    #[test]
    fn test_missing_variable() {
        let bindings = Bindings::new()
            .with("a", BigDecimal::from(1))
            .with("b", BigDecimal::from(2));
        assert_eq!(
            validate("a ^ 2 *((c/10)+b*c+a)", &bindings),
            Err(EvalError::MissingVariable {
                name: "c".to_string()
            })
        );
    }

    #[test]
    fn test_checks_run_in_order() {
        // unbalanced and illegal: the parenthesis count is reported first
        assert!(matches!(
            validate("(1,5", &Bindings::new()),
            Err(EvalError::ParenthesisMismatch { .. })
        ));
        // illegal character and missing variable: characters first
        assert!(matches!(
            validate("x;", &Bindings::new()),
            Err(EvalError::IllegalCharacter { ch: ';', .. })
        ));
    }

    #[test]
    fn test_scan_gate_skips_the_character_check() {
        let bindings = Bindings::new().with("a", BigDecimal::from(1));
        assert_eq!(check_before_scan(&tokenize("a,5+1"), &bindings), Ok(()));
        assert!(matches!(
            check_before_scan(&tokenize("(a,5+1"), &bindings),
            Err(EvalError::ParenthesisMismatch { .. })
        ));
        assert!(matches!(
            check_before_scan(&tokenize("a+b"), &bindings),
            Err(EvalError::MissingVariable { .. })
        ));
    }
}
