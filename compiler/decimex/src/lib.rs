use std::str::FromStr;

use bigdecimal::BigDecimal;
use decimex_eval::{Bindings, Evaluator};
use serde::Serialize;

/// Outcome of one evaluation, shaped for `--json` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvalReport {
    pub expression: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvalReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Evaluate `expression` and capture either the plain-notation result or the
/// error message.
pub fn evaluate_report(evaluator: &Evaluator, expression: &str, bindings: &Bindings) -> EvalReport {
    match evaluator.eval(expression, bindings) {
        Ok(value) => EvalReport {
            expression: expression.to_string(),
            result: Some(value.to_plain_string()),
            error: None,
        },
        Err(err) => EvalReport {
            expression: expression.to_string(),
            result: None,
            error: Some(err.to_string()),
        },
    }
}

/// Parse a `NAME=VALUE` command-line binding.
pub fn parse_binding(raw: &str) -> Result<(String, BigDecimal), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{raw}'"));
    }
    let value = BigDecimal::from_str(value.trim())
        .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use decimex_eval::RoundingMode;
    use pretty_assertions::assert_eq;

    #[test]
    fn report_carries_plain_result() {
        let evaluator = Evaluator::with(2, RoundingMode::HalfUp);
        let report = evaluate_report(&evaluator, "10/3", &Bindings::new());
        assert!(report.is_ok());
        assert_eq!(report.result.as_deref(), Some("3.33"));
    }

    #[test]
    fn report_carries_error_message() {
        let report = evaluate_report(&Evaluator::new(), "()", &Bindings::new());
        assert!(!report.is_ok());
        assert_eq!(report.result, None);
        assert!(report.error.unwrap().contains("empty parentheses"));
    }

    #[test]
    fn report_json_skips_missing_fields() {
        let report = evaluate_report(&Evaluator::new(), "1+1", &Bindings::new());
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"expression":"1+1","result":"2"}"#);
    }

    #[test]
    fn parses_bindings() {
        assert_eq!(
            parse_binding("rate = 0.014000"),
            Ok(("rate".to_string(), BigDecimal::from_str("0.014000").unwrap()))
        );
        assert!(parse_binding("rate").is_err());
        assert!(parse_binding("=1").is_err());
        assert!(parse_binding("a=1,5").is_err());
    }
}
