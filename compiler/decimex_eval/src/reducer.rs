//! Collapses one nesting level to a single value.

use bigdecimal::BigDecimal;

use crate::config::EvaluatorConfig;
use crate::error::{EvalError, EvalResult};
use crate::node_list::{NodeList, OccurrenceIndex};
use crate::operator::Operator;
use crate::trace::{TraceEvent, Tracer};

/// Apply every operator occurrence, one operator at a time in
/// [`Operator::PRECEDENCE`] order and left to right within an operator.
///
/// The right-hand node absorbs each result and the left-hand node is spliced
/// out. A later occurrence may already point at that right-hand node as its
/// own left operand, so each splice is committed before the next occurrence
/// is looked at; this is what makes `a+b+c+d` chain correctly.
pub fn reduce(
    nodes: &mut NodeList,
    index: &OccurrenceIndex,
    config: &EvaluatorConfig,
    depth: usize,
    tracer: &mut dyn Tracer,
) -> EvalResult<BigDecimal> {
    for op in Operator::PRECEDENCE {
        for &id in index.occurrences(op) {
            let right = nodes.next(id).ok_or(EvalError::MissingOperand { op })?;
            let result = op.apply(&nodes.get(id).value, &nodes.get(right).value, config)?;
            if tracer.enabled() {
                tracer.trace(&TraceEvent::Reduced {
                    depth,
                    op,
                    left: nodes.get(id).value.clone(),
                    right: nodes.get(right).value.clone(),
                    result: result.clone(),
                });
            }
            nodes.get_mut(right).value = result;
            nodes.unlink(id);
        }
    }

    let head = nodes.head().ok_or(EvalError::EmptyExpression)?;
    debug_assert_eq!(nodes.len(), 1, "every node but the last carries an operator");
    Ok(nodes.get(head).value.clone())
}
