//! The five binary operators and the decimal primitives behind them.

use std::cmp::Ordering;
use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, Sign};
use num_traits::{Signed, ToPrimitive, Zero};

use crate::config::{EvaluatorConfig, RoundingMode};
use crate::error::{EvalError, EvalResult};

/// Largest exponent accepted by [`pow`]
pub const MAX_EXPONENT: u32 = 999_999_999;

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Pow,
    Multiply,
    Divide,
    Add,
    Subtract,
}

impl Operator {
    /// Reduction order. Multiply runs before divide and add before subtract,
    /// so `8/2*4` is `1` and `10-2+3` is `5`.
    pub const PRECEDENCE: [Operator; 5] = [
        Operator::Pow,
        Operator::Multiply,
        Operator::Divide,
        Operator::Add,
        Operator::Subtract,
    ];

    /// Position of this operator in [`Operator::PRECEDENCE`]
    pub fn rank(self) -> usize {
        match self {
            Operator::Pow => 0,
            Operator::Multiply => 1,
            Operator::Divide => 2,
            Operator::Add => 3,
            Operator::Subtract => 4,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Pow => '^',
            Operator::Multiply => '*',
            Operator::Divide => '/',
            Operator::Add => '+',
            Operator::Subtract => '-',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        Operator::PRECEDENCE
            .into_iter()
            .find(|op| op.symbol() == symbol)
    }

    /// Combine two operands. Only division looks at the config.
    pub fn apply(
        self,
        left: &BigDecimal,
        right: &BigDecimal,
        config: &EvaluatorConfig,
    ) -> EvalResult<BigDecimal> {
        match self {
            Operator::Pow => pow(left, right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => divide(left, right, config.scale, config.rounding),
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Divide with a fixed number of fractional digits.
///
/// The result always has exactly `scale` fractional digits, rounded from the
/// exact quotient with `rounding`.
pub fn divide(
    dividend: &BigDecimal,
    divisor: &BigDecimal,
    scale: u32,
    rounding: RoundingMode,
) -> EvalResult<BigDecimal> {
    if divisor.is_zero() {
        return Err(EvalError::DivisionByZero);
    }
    let (a, a_scale) = dividend.as_bigint_and_exponent();
    let (b, b_scale) = divisor.as_bigint_and_exponent();

    // dividend / divisor * 10^scale == a * 10^(b_scale - a_scale + scale) / b
    let shift = b_scale - a_scale + i64::from(scale);
    let (numerator, denominator) = if shift >= 0 {
        (a * ten_pow(shift.unsigned_abs()), b)
    } else {
        (a, b * ten_pow(shift.unsigned_abs()))
    };

    let quotient = &numerator / &denominator;
    let remainder = &numerator % &denominator;
    let digits = round_quotient(quotient, &remainder, &denominator, rounding);
    Ok(BigDecimal::new(digits, i64::from(scale)))
}

/// Raise `base` to the integer part of `exponent`.
///
/// The exponent is truncated towards zero; the result is exact.
pub fn pow(base: &BigDecimal, exponent: &BigDecimal) -> EvalResult<BigDecimal> {
    let invalid = || EvalError::InvalidExponent {
        exponent: exponent.to_string(),
    };
    let n = exponent
        .with_scale_round(0, bigdecimal::RoundingMode::Down)
        .to_u32()
        .filter(|n| *n <= MAX_EXPONENT)
        .ok_or_else(invalid)?;

    let (digits, scale) = base.as_bigint_and_exponent();
    let scale = scale.checked_mul(i64::from(n)).ok_or_else(invalid)?;
    Ok(BigDecimal::new(digits.pow(n), scale))
}

fn ten_pow(exponent: u64) -> BigInt {
    num_traits::pow(BigInt::from(10), exponent as usize)
}

/// Round a truncated quotient using the remainder of the division.
fn round_quotient(
    quotient: BigInt,
    remainder: &BigInt,
    divisor: &BigInt,
    rounding: RoundingMode,
) -> BigInt {
    if remainder.is_zero() {
        return quotient;
    }
    // remainder carries the dividend's sign
    let negative = (remainder.sign() == Sign::Minus) != (divisor.sign() == Sign::Minus);
    let half = (remainder.abs() * BigInt::from(2)).cmp(&divisor.abs());
    let away_from_zero = match rounding {
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => !negative,
        RoundingMode::Floor => negative,
        RoundingMode::HalfUp => half != Ordering::Less,
        RoundingMode::HalfDown => half == Ordering::Greater,
        RoundingMode::HalfEven => {
            half == Ordering::Greater
                || (half == Ordering::Equal && !(&quotient % BigInt::from(2)).is_zero())
        }
    };
    if !away_from_zero {
        quotient
    } else if negative {
        quotient - BigInt::from(1)
    } else {
        quotient + BigInt::from(1)
    }
}
