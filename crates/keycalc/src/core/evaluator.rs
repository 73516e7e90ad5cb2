//! Postfix stack machine

use serde::{Deserialize, Serialize};

use crate::core::operations::{
    apply_function, apply_operator, divides_by_zero_function, divides_by_zero_operator,
};
use crate::core::postfix::{finalize, to_postfix, PostfixItem};
use crate::core::{AngleUnit, CalcError, CalcResult, NumberFormat, Token};

/// A completed evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Raw computed value
    pub value: f64,
    /// Value as formatted for the display
    pub display: String,
}

/// Evaluates a postfix sequence
///
/// A function or operator that finds too few operands on the stack is
/// skipped and the stack is left as it was. Only the final value is
/// checked for finiteness.
pub fn evaluate(postfix: &[PostfixItem], unit: AngleUnit) -> CalcResult<f64> {
    let mut stack: Vec<f64> = Vec::with_capacity(postfix.len());
    let mut zero_divisor = false;

    for item in postfix {
        match *item {
            PostfixItem::Value(value) => stack.push(value),
            PostfixItem::Function(func) => {
                let Some(x) = stack.pop() else {
                    tracing::debug!(function = func.name(), "no operand, function skipped");
                    continue;
                };
                zero_divisor |= divides_by_zero_function(func, x);
                stack.push(apply_function(func, x, unit));
            }
            PostfixItem::Operator(op) => {
                if stack.len() < 2 {
                    tracing::debug!(operator = %op.ascii(), "missing operand, operator skipped");
                    continue;
                }
                let b = stack.pop().unwrap_or_default();
                let a = stack.pop().unwrap_or_default();
                zero_divisor |= divides_by_zero_operator(op, b);
                stack.push(apply_operator(op, a, b));
            }
        }
    }

    let value = stack
        .pop()
        .ok_or_else(|| CalcError::malformed("no value left on the stack"))?;

    if value.is_finite() {
        Ok(value)
    } else if zero_divisor {
        Err(CalcError::DivisionByZero)
    } else {
        Err(CalcError::DomainError)
    }
}

/// Runs the full pipeline on a committed token sequence
///
/// Finalizes the tokens, converts them to postfix, evaluates and formats
/// the result.
pub fn evaluate_tokens(
    tokens: Vec<Token>,
    unit: AngleUnit,
    format: &NumberFormat,
) -> CalcResult<Evaluation> {
    let tokens = finalize(tokens)?;
    let postfix = to_postfix(&tokens)?;
    let value = evaluate(&postfix, unit)?;
    let text = format.format(value)?;
    tracing::debug!(value, display = %text, "evaluated");
    Ok(Evaluation {
        value,
        display: text,
    })
}
