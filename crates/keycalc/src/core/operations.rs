//! Floating-point arithmetic behind operators and functions
//!
//! Operations never fail on their own. Non-finite intermediate values are
//! allowed to flow through (`1 / (1 / 0)` is `0`); only the final value is
//! checked, by the evaluator.

use crate::core::{AngleUnit, Function, Operator};

/// Applies a binary operator to `a` (left) and `b` (right)
pub(crate) fn apply_operator(op: Operator, a: f64, b: f64) -> f64 {
    match op {
        Operator::Add => a + b,
        Operator::Subtract => a - b,
        Operator::Multiply => a * b,
        Operator::Divide => a / b,
        Operator::Power => a.powf(b),
    }
}

/// Applies a unary function, converting trigonometric arguments from `unit`
pub(crate) fn apply_function(func: Function, x: f64, unit: AngleUnit) -> f64 {
    match func {
        Function::Sin => unit.to_radians(x).sin(),
        Function::Cos => unit.to_radians(x).cos(),
        Function::Tan => unit.to_radians(x).tan(),
        Function::Ln => x.ln(),
        Function::Log => x.log10(),
        Function::Sqrt => x.sqrt(),
        Function::Abs => x.abs(),
        Function::Inv => 1.0 / x,
    }
}

/// Returns true if applying this operation divides by zero
pub(crate) fn divides_by_zero_operator(op: Operator, b: f64) -> bool {
    op == Operator::Divide && b == 0.0
}

/// Returns true if applying this function divides by zero
pub(crate) fn divides_by_zero_function(func: Function, x: f64) -> bool {
    func == Function::Inv && x == 0.0
}
