use bigdecimal::BigDecimal;
use decimex_eval::{Bindings, Evaluator, EvaluatorConfig, Operator, RoundingMode};
use proptest::prelude::*;

const SCALE: u32 = 10;

fn operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Pow),
        Just(Operator::Multiply),
        Just(Operator::Divide),
        Just(Operator::Add),
        Just(Operator::Subtract),
    ]
}

/// A literal followed by (operator, literal) pairs
fn chain() -> impl Strategy<Value = (u32, Vec<(Operator, u32)>)> {
    (1u32..10, prop::collection::vec((operator(), 1u32..10), 0..6))
}

fn render(first: u32, rest: &[(Operator, u32)]) -> String {
    let mut expression = first.to_string();
    for (op, value) in rest {
        expression.push_str(&format!(" {op} {value}"));
    }
    expression
}

/// Collapse the chain one operator at a time, always taking the leftmost
/// remaining occurrence
fn reference(first: u32, rest: &[(Operator, u32)], config: &EvaluatorConfig) -> BigDecimal {
    let mut values: Vec<BigDecimal> = vec![BigDecimal::from(first)];
    let mut ops: Vec<Operator> = Vec::new();
    for (op, value) in rest {
        ops.push(*op);
        values.push(BigDecimal::from(*value));
    }
    for op in Operator::PRECEDENCE {
        while let Some(i) = ops.iter().position(|candidate| *candidate == op) {
            let combined = op.apply(&values[i], &values[i + 1], config).unwrap();
            values[i + 1] = combined;
            values.remove(i);
            ops.remove(i);
        }
    }
    values.remove(0)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn chains_follow_the_pass_order((first, rest) in chain()) {
        let evaluator = Evaluator::with(SCALE, RoundingMode::HalfUp);
        let expression = render(first, &rest);
        let expected = reference(first, &rest, evaluator.config());
        prop_assert_eq!(evaluator.eval(&expression, &Bindings::new()), Ok(expected));
    }

    #[test]
    fn evaluation_is_idempotent((first, rest) in chain(), x in 1u32..1000) {
        let expression = format!("x*({})", render(first, &rest));
        let parsed = Evaluator::with(SCALE, RoundingMode::HalfEven)
            .parse(expression, Bindings::new().with("x", BigDecimal::from(x)));
        let once = parsed.eval();
        let twice = parsed.eval();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn parentheses_around_a_chain_do_not_change_it((first, rest) in chain()) {
        let evaluator = Evaluator::with(SCALE, RoundingMode::HalfUp);
        let plain = render(first, &rest);
        let wrapped = format!("(({plain}))");
        prop_assert_eq!(
            evaluator.eval(&plain, &Bindings::new()).ok(),
            evaluator.eval(&wrapped, &Bindings::new()).ok()
        );
    }
}
