//! Result formatting for a fixed-width calculator display
//!
//! Values are rounded to remove floating-point noise and rendered the way a
//! browser renders a number (`String(n)`), then fitted to the display width:
//! large magnitudes switch to exponential notation, everything else is cut.

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Magnitude from which over-wide results use exponential notation
pub const EXPONENT_THRESHOLD: f64 = 1e12;

/// Below this scaled magnitude rounding can still change a value
const EXACT_INTEGER_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Display formatting rules for computed results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Maximum characters before a result is shortened
    pub width: usize,
    /// Decimal places kept when rounding
    pub decimals: u32,
    /// Fractional digits in exponential notation
    pub exponent_digits: usize,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            width: 12,
            decimals: 9,
            exponent_digits: 5,
        }
    }
}

impl NumberFormat {
    /// Creates the default 12-character format
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display width
    #[must_use]
    pub const fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set rounding precision
    #[must_use]
    pub const fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    /// Formats a computed value for display
    ///
    /// Non-finite values are rejected; the caller decides how to show them.
    pub fn format(&self, value: f64) -> CalcResult<String> {
        if !value.is_finite() {
            return Err(CalcError::DomainError);
        }

        let rounded = self.round(value);
        let text = js_number_string(rounded);
        if text.chars().count() <= self.width {
            return Ok(text);
        }

        if rounded.abs() >= EXPONENT_THRESHOLD {
            return Ok(to_exponential(rounded, self.exponent_digits));
        }

        let cut: String = text.chars().take(self.width).collect();
        Ok(cut.trim_end_matches('.').to_string())
    }

    /// Rounds half-up to the configured number of decimals
    ///
    /// Negative zero comes back as zero.
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.decimals as i32);
        let scaled = value * scale;
        if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
            return value;
        }

        let rounded = (scaled + 0.5).floor() / scale;
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }
}

/// Renders a finite value with the browser's `Number.prototype.toString` rules
///
/// Shortest round-trip digits; plain notation for decimal exponents in
/// `[-7, 21)`, otherwise `d.ddde±x`.
#[must_use]
pub fn js_number_string(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();

    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{int_part}.{frac_part}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let sign = if e >= 0 { '+' } else { '-' };
        let (lead, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{lead}e{sign}{}", e.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", e.abs())
        }
    };

    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

/// Renders a value like the browser's `toExponential(digits)`
///
/// The shortest digit string is rounded half away from zero, so ties go to
/// the larger magnitude.
#[must_use]
pub fn to_exponential(value: f64, digits: usize) -> String {
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let mut kept: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    let wanted = digits + 1;
    if kept.len() > wanted {
        let round_up = kept[wanted] >= 5;
        kept.truncate(wanted);
        if round_up && carry(&mut kept) {
            kept.insert(0, 1);
            kept.truncate(wanted);
            exponent += 1;
        }
    } else {
        kept.resize(wanted, 0);
    }

    let text: String = kept.iter().map(|d| char::from(b'0' + d)).collect();
    let (lead, rest) = text.split_at(1);
    let sign = if value < 0.0 { "-" } else { "" };
    let exponent_sign = if exponent < 0 { '-' } else { '+' };
    if rest.is_empty() {
        format!("{sign}{lead}e{exponent_sign}{}", exponent.abs())
    } else {
        format!("{sign}{lead}.{rest}e{exponent_sign}{}", exponent.abs())
    }
}

/// Adds one to the last digit; returns true when the carry runs off the front
fn carry(digits: &mut [u8]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return false;
        }
    }
    true
}
