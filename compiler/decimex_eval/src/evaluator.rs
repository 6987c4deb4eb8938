//! Public entry points: an [`Evaluator`] carries the configuration, a
//! [`ParsedExpression`] binds an expression to its variables.

use bigdecimal::BigDecimal;
use decimex_lexer::tokenize;
use log::debug;

use crate::bindings::Bindings;
use crate::config::{EvaluatorConfig, RoundingMode};
use crate::error::{EvalError, EvalResult, ExpressionError};
use crate::scanner::{Cursor, Scanner};
use crate::trace::{LogTracer, Tracer};
use crate::validator;

/// Evaluates expressions with a fixed scale, rounding mode and depth limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// An evaluator with scale 5 and half-up rounding
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(scale: u32, rounding: RoundingMode) -> Self {
        Self::from_config(EvaluatorConfig::new(scale, rounding))
    }

    pub fn from_config(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Bind an expression to its variables without evaluating it yet.
    pub fn parse(&self, expression: impl Into<String>, bindings: Bindings) -> ParsedExpression {
        ParsedExpression {
            expression: expression.into(),
            bindings,
            config: self.config,
        }
    }

    /// One-shot evaluation that borrows the bindings.
    pub fn eval(&self, expression: &str, bindings: &Bindings) -> Result<BigDecimal, ExpressionError> {
        evaluate(expression, bindings, &self.config, &mut LogTracer)
            .map_err(|cause| report(expression, cause))
    }
}

/// An expression together with its bindings and the configuration of the
/// evaluator that created it.
///
/// Evaluating does not change the expression or its bindings, so
/// [`eval`](Self::eval) can be called any number of times with the same
/// result.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedExpression {
    expression: String,
    bindings: Bindings,
    config: EvaluatorConfig,
}

impl ParsedExpression {
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Run the structural checks (parenthesis counts, characters, variable
    /// coverage) without evaluating.
    pub fn validate(&self) -> Result<(), ExpressionError> {
        validator::validate(&self.expression, &self.bindings)
            .map_err(|cause| ExpressionError::new(&self.expression, cause))
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Evaluate, sending trace events to the `log` facade.
    pub fn eval(&self) -> Result<BigDecimal, ExpressionError> {
        self.eval_traced(&mut LogTracer)
    }

    /// Evaluate, sending trace events to `tracer`.
    pub fn eval_traced(&self, tracer: &mut dyn Tracer) -> Result<BigDecimal, ExpressionError> {
        evaluate(&self.expression, &self.bindings, &self.config, tracer)
            .map_err(|cause| report(&self.expression, cause))
    }
}

fn evaluate(
    expression: &str,
    bindings: &Bindings,
    config: &EvaluatorConfig,
    tracer: &mut dyn Tracer,
) -> EvalResult<BigDecimal> {
    debug!("evaluating {expression:?} (scale {}, {})", config.scale, config.rounding);
    let tokens = tokenize(expression);
    validator::check_before_scan(&tokens, bindings)?;
    let mut cursor = Cursor::new(&tokens);
    let value = Scanner::new(bindings, config, tracer).scan(&mut cursor)?;
    debug!("{expression:?} = {value}");
    Ok(value)
}

fn report(expression: &str, cause: EvalError) -> ExpressionError {
    debug!("evaluation of {expression:?} failed: {cause}");
    ExpressionError::new(expression, cause)
}
