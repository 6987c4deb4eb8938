//! Error types for validation, evaluation and configuration loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::operator::Operator;

/// The specific reason an expression could not be validated or evaluated.
///
/// Every variant is terminal: evaluation stops at the first one and no partial
/// result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Different number of opening and closing parentheses
    #[error("different number of opening ({opening}) and closing ({closing}) parentheses")]
    ParenthesisMismatch { opening: usize, closing: usize },

    /// A ')' without an open sub-expression, or a '(' that is never closed
    #[error("parenthesis at column {column} has no matching partner")]
    MisplacedParenthesis { column: usize },

    /// A character outside the expression grammar
    #[error("illegal character {ch:?} at column {column}")]
    IllegalCharacter { ch: char, column: usize },

    /// A variable name without a binding
    #[error("no value bound for variable '{name}'")]
    MissingVariable { name: String },

    /// An expression or sub-expression starting with a binary operator
    #[error("an expression must not start with the operator '{op}' (column {column})")]
    LeadingOperator { op: Operator, column: usize },

    /// Two operators without a term between them
    #[error("operator '{op}' at column {column} follows another operator")]
    DuplicateOperator { op: Operator, column: usize },

    /// `()`
    #[error("empty parentheses at column {column}")]
    EmptySubexpression { column: usize },

    /// An operator with nothing on its right-hand side
    #[error("operator '{op}' is missing its right operand")]
    MissingOperand { op: Operator },

    /// A term that is neither a bound variable nor a decimal literal
    #[error("'{term}' is neither a bound variable nor a decimal number")]
    NumberFormat { term: String },

    /// Division by a zero value
    #[error("division by zero")]
    DivisionByZero,

    /// A power whose integer exponent is negative or too large
    #[error("invalid exponent {exponent}: must be a whole number between 0 and 999999999")]
    InvalidExponent { exponent: String },

    /// Parentheses nested deeper than the configured limit
    #[error("maximum nesting depth of {limit} exceeded")]
    NestingTooDeep { limit: usize },

    /// Input without a single term
    #[error("expression is empty")]
    EmptyExpression,
}

/// Result type for the internal evaluation stages
pub type EvalResult<T> = Result<T, EvalError>;

/// The single error surfaced by [`ParsedExpression::eval`](crate::ParsedExpression::eval).
///
/// Wraps the [`EvalError`] cause together with the expression text that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("an error occurred parsing or evaluating the expression `{expression}`: {cause}")]
pub struct ExpressionError {
    expression: String,
    #[source]
    cause: EvalError,
}

impl ExpressionError {
    /// Wrap a cause with the expression it came from
    pub fn new(expression: impl Into<String>, cause: EvalError) -> Self {
        Self {
            expression: expression.into(),
            cause,
        }
    }

    /// The original expression text
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The specific failure
    pub fn cause(&self) -> &EvalError {
        &self.cause
    }

    /// Unwrap into the specific failure
    pub fn into_cause(self) -> EvalError {
        self.cause
    }
}

/// Errors raised while loading an [`EvaluatorConfig`](crate::EvaluatorConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid evaluator config: {0}")]
    Parse(#[from] toml::de::Error),
}
