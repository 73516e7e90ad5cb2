//! Expression core: tokens, postfix conversion, evaluation and formatting
//!
//! Nothing in here knows about input events. The [`crate::calculator`]
//! module feeds finished token sequences through this pipeline:
//!
//! ```text
//! tokens -> postfix::finalize -> postfix::to_postfix -> evaluator::evaluate -> format
//! ```

pub mod evaluator;
pub mod format;
mod operations;
pub mod postfix;
pub mod token;

pub use evaluator::{evaluate, evaluate_tokens, Evaluation};
pub use format::NumberFormat;
pub use postfix::{finalize, to_postfix, PostfixItem};
pub use token::{Constant, Function, Operator, Token};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
///
/// None of these are faults: the first two surface as the display string
/// `"Error"`, the last two leave the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalcError {
    /// Non-finite result after a zero divisor was used
    #[error("Division by zero")]
    DivisionByZero,
    /// Non-finite result outside any zero division (sqrt of a negative, ln 0, overflow)
    #[error("Math domain error")]
    DomainError,
    /// Nothing evaluable, or a literal that does not parse
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    /// Digit entry rejected because the entry buffer is full
    #[error("Maximum of {limit} digits reached")]
    DigitLimitExceeded {
        /// The active digit limit
        limit: usize,
    },
}

impl CalcError {
    /// Creates a malformed input error
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedInput(message.into())
    }

    /// Returns true for errors that end an evaluation with `"Error"` on screen
    #[must_use]
    pub const fn is_math_error(&self) -> bool {
        matches!(self, Self::DivisionByZero | Self::DomainError)
    }
}

/// Angle unit used by sin, cos and tan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Arguments are radians
    #[default]
    Radians,
    /// Arguments are degrees
    Degrees,
}

impl AngleUnit {
    /// Returns the other unit
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Radians => Self::Degrees,
            Self::Degrees => Self::Radians,
        }
    }

    /// Converts an angle in this unit to radians
    #[must_use]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Radians => angle,
            Self::Degrees => angle.to_radians(),
        }
    }

    /// Short label shown on the mode indicator
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Radians => "RAD",
            Self::Degrees => "DEG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_error_display() {
        assert_eq!(CalcError::DivisionByZero.to_string(), "Division by zero");
        assert_eq!(CalcError::DomainError.to_string(), "Math domain error");
        assert_eq!(
            CalcError::malformed("nothing to evaluate").to_string(),
            "Malformed input: nothing to evaluate"
        );
        assert_eq!(
            CalcError::DigitLimitExceeded { limit: 8 }.to_string(),
            "Maximum of 8 digits reached"
        );
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::DivisionByZero);
        assert!(err.to_string().contains("Division"));
    }

    #[test]
    fn test_math_error_classification() {
        assert!(CalcError::DivisionByZero.is_math_error());
        assert!(CalcError::DomainError.is_math_error());
        assert!(!CalcError::malformed("x").is_math_error());
        assert!(!CalcError::DigitLimitExceeded { limit: 12 }.is_math_error());
    }

    #[test]
    fn test_angle_unit_toggle() {
        assert_eq!(AngleUnit::default(), AngleUnit::Radians);
        assert_eq!(AngleUnit::Radians.toggled(), AngleUnit::Degrees);
        assert_eq!(AngleUnit::Degrees.toggled(), AngleUnit::Radians);
    }

    #[test]
    fn test_angle_unit_to_radians() {
        assert_eq!(AngleUnit::Radians.to_radians(1.5), 1.5);
        let half_pi = AngleUnit::Degrees.to_radians(90.0);
        assert!((half_pi - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    }

    #[test]
    fn test_angle_unit_serde() {
        let json = serde_json::to_string(&AngleUnit::Degrees).unwrap();
        assert_eq!(json, "\"degrees\"");
        let back: AngleUnit = serde_json::from_str("\"radians\"").unwrap();
        assert_eq!(back, AngleUnit::Radians);
    }
}
