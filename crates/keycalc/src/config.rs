//! Calculator configuration

use serde::{Deserialize, Serialize};

use crate::core::{AngleUnit, NumberFormat};

/// Keypad mode
///
/// Both modes evaluate the same expressions. The mode only decides the
/// digit limit and whether the angle unit can be toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Four-function keypad
    Basic,
    /// Keypad with functions, constants and angle unit
    #[default]
    Scientific,
}

impl Mode {
    /// Digit limit of the entry buffer in this mode
    #[must_use]
    pub const fn default_max_digits(self) -> usize {
        match self {
            Self::Basic => 12,
            Self::Scientific => 8,
        }
    }

    /// Whether the angle unit can be toggled in this mode
    #[must_use]
    pub const fn has_angle_unit(self) -> bool {
        matches!(self, Self::Scientific)
    }

    /// Returns the lowercase mode name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Scientific => "scientific",
        }
    }
}

/// Calculator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Keypad mode
    pub mode: Mode,
    /// Initial angle unit
    pub angle_unit: AngleUnit,
    /// Override of the mode's digit limit
    pub max_digits: Option<usize>,
    /// Result formatting
    pub format: NumberFormat,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Scientific,
            angle_unit: AngleUnit::Radians,
            max_digits: None,
            format: NumberFormat::default(),
        }
    }
}

impl CalculatorConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Basic-mode configuration
    #[must_use]
    pub fn basic() -> Self {
        Self::default().with_mode(Mode::Basic)
    }

    /// Set mode
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set angle unit
    #[must_use]
    pub const fn with_angle_unit(mut self, angle_unit: AngleUnit) -> Self {
        self.angle_unit = angle_unit;
        self
    }

    /// Set digit limit
    #[must_use]
    pub const fn with_max_digits(mut self, max_digits: usize) -> Self {
        self.max_digits = Some(max_digits);
        self
    }

    /// Set result format
    #[must_use]
    pub const fn with_format(mut self, format: NumberFormat) -> Self {
        self.format = format;
        self
    }

    /// Effective digit limit
    #[must_use]
    pub fn digit_limit(&self) -> usize {
        self.max_digits
            .unwrap_or_else(|| self.mode.default_max_digits())
    }
}
