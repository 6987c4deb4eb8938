//! Optional tracing of the scan and reduction steps.
//!
//! A [`Tracer`] is handed to a single evaluation; there is no process-wide
//! debug switch.

use std::fmt;

use bigdecimal::BigDecimal;

use crate::operator::Operator;

/// One observable step of an evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A nesting level was scanned into its terms
    LevelScanned {
        depth: usize,
        terms: Vec<(BigDecimal, Option<Operator>)>,
    },
    /// One operator occurrence was applied
    Reduced {
        depth: usize,
        op: Operator,
        left: BigDecimal,
        right: BigDecimal,
        result: BigDecimal,
    },
    /// A nesting level collapsed to its value
    LevelReduced { depth: usize, value: BigDecimal },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::LevelScanned { depth, terms } => {
                write!(f, "[{depth}] terms:")?;
                for (value, op) in terms {
                    write!(f, " {value}")?;
                    if let Some(op) = op {
                        write!(f, " {op}")?;
                    }
                }
                Ok(())
            }
            TraceEvent::Reduced {
                depth,
                op,
                left,
                right,
                result,
            } => write!(f, "[{depth}] {left} {op} {right} = {result}"),
            TraceEvent::LevelReduced { depth, value } => write!(f, "[{depth}] result: {value}"),
        }
    }
}

/// Receives [`TraceEvent`]s during an evaluation.
pub trait Tracer {
    fn trace(&mut self, event: &TraceEvent);

    /// Events are only built when this returns true
    fn enabled(&self) -> bool {
        true
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    fn trace(&mut self, _event: &TraceEvent) {}

    fn enabled(&self) -> bool {
        false
    }
}

/// Forwards events to the `log` facade at trace level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTracer;

impl Tracer for LogTracer {
    fn trace(&mut self, event: &TraceEvent) {
        log::trace!("{event}");
    }

    fn enabled(&self) -> bool {
        log::log_enabled!(log::Level::Trace)
    }
}

/// Collects events for later inspection
impl Tracer for Vec<TraceEvent> {
    fn trace(&mut self, event: &TraceEvent) {
        self.push(event.clone());
    }
}
