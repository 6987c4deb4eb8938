//! Turns the text of a term into a decimal value.

use std::collections::HashMap;
use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::bindings::Bindings;
use crate::error::{EvalError, EvalResult};

/// Resolves terms for one evaluation.
///
/// Variables are looked up verbatim first; anything else is parsed as a
/// decimal literal. Parsed literals are memoized for the lifetime of the
/// resolver only, so repeated literals such as `0.014000` in one expression
/// are parsed once without touching the caller's bindings.
#[derive(Debug)]
pub struct TermResolver<'a> {
    bindings: &'a Bindings,
    literals: HashMap<String, BigDecimal>,
}

impl<'a> TermResolver<'a> {
    pub fn new(bindings: &'a Bindings) -> Self {
        Self {
            bindings,
            literals: HashMap::new(),
        }
    }

    pub fn resolve(&mut self, term: &str) -> EvalResult<BigDecimal> {
        if let Some(value) = self.bindings.get(term) {
            return Ok(value.clone());
        }
        if let Some(value) = self.literals.get(term) {
            return Ok(value.clone());
        }
        let value = parse_literal(term)?;
        self.literals.insert(term.to_string(), value.clone());
        Ok(value)
    }

    /// Number of distinct literals parsed so far
    pub fn memoized(&self) -> usize {
        self.literals.len()
    }
}

/// Parse a plain decimal literal such as `13.73`, `-5` or `.5`.
///
/// Only an optional leading '-', digits and at most one '.' are accepted.
fn parse_literal(term: &str) -> EvalResult<BigDecimal> {
    let invalid = || EvalError::NumberFormat {
        term: term.to_string(),
    };
    let unsigned = term.strip_prefix('-').unwrap_or(term);
    let mut digits = 0usize;
    let mut dots = 0usize;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return Err(invalid()),
        }
    }
    if digits == 0 || dots > 1 {
        return Err(invalid());
    }
    BigDecimal::from_str(term).map_err(|_| invalid())
}
