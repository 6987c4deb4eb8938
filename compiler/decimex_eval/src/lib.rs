//! Arithmetic expression evaluation over arbitrary-precision decimals.
//!
//! An expression such as `a ^ 2 *((c/10)+b*c+a)` is scanned once from left to
//! right. Every parenthesized sub-expression is evaluated by a recursive call
//! that shares the same [`Cursor`](scanner::Cursor), so by the time a nesting
//! level is reduced it only contains plain decimal values joined by operators.
//! Each level is then collapsed pass by pass in the fixed operator order
//! `^`, `*`, `/`, `+`, `-`.
//!
//! ```no_run
//! use bigdecimal::BigDecimal;
//! use decimex_eval::{Bindings, Evaluator, RoundingMode};
//! use std::str::FromStr;
//!
//! let bindings = Bindings::new()
//!     .with("a", BigDecimal::from_str("0.014000").unwrap())
//!     .with("b", BigDecimal::from(2))
//!     .with("c", BigDecimal::from_str("13.73").unwrap());
//! let result = Evaluator::with(30, RoundingMode::HalfUp)
//!     .parse("a ^ 2 *((c/10)+b*c+a)", bindings)
//!     .eval()
//!     .unwrap();
//! println!("{result}");
//! ```

pub mod bindings;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod node_list;
pub mod operator;
pub mod reducer;
pub mod resolver;
pub mod scanner;
pub mod trace;
pub mod validator;

pub use bindings::Bindings;
pub use config::{EvaluatorConfig, RoundingMode};
pub use error::{ConfigError, EvalError, ExpressionError};
pub use evaluator::{Evaluator, ParsedExpression};
pub use operator::Operator;
pub use trace::{LogTracer, NoopTracer, TraceEvent, Tracer};
pub use validator::{contains_illegal_char, extract_variables};

#[cfg(test)]
pub(crate) mod test_utils {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Initialize the logger for tests
    pub fn init_test_logger() {
        INIT.call_once(|| {
            let _ = Builder::new()
                .is_test(true)
                .filter_level(LevelFilter::Trace)
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "[{}] {}: {}",
                        record.level(),
                        record.target(),
                        record.args()
                    )
                })
                .try_init();
        });
    }
}
