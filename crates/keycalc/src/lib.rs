//! Keycalc - keypad-driven calculator engine
//!
//! Turns a stream of button presses into an expression, evaluates it with
//! operator precedence, and formats the result for a fixed-width display.
//! The engine has no I/O of its own; a browser page, a TV remote handler or
//! the `keycalc` CLI feeds it [`InputEvent`](calculator::InputEvent)s and
//! draws the [`RenderModel`](render::RenderModel) it hands back.
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut calc = Calculator::new();
//! calc.apply(InputEvent::Function(Function::Sqrt));
//! calc.apply(InputEvent::Digit(1));
//! calc.apply(InputEvent::Digit(6));
//! calc.apply(InputEvent::OpenOrCloseParen);
//! calc.apply(InputEvent::Operator(Operator::Multiply));
//! calc.apply(InputEvent::Constant(Constant::Pi));
//! assert_eq!(calc.display(), "√(16) × π");
//!
//! assert_eq!(
//!     calc.apply(InputEvent::Equals),
//!     Outcome::Evaluated("12.566370614".into())
//! );
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod calculator;
pub mod config;
pub mod core;
pub mod keypad;
pub mod render;

/// Browser bindings
#[cfg(feature = "wasm")]
pub mod web;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::calculator::{Calculator, InputEvent, Outcome};
    pub use crate::config::{CalculatorConfig, Mode};
    pub use crate::core::{
        AngleUnit, CalcError, CalcResult, Constant, Function, NumberFormat, Operator, Token,
    };
    pub use crate::keypad::{KeyDef, Keypad};
    pub use crate::render::RenderModel;

    #[cfg(feature = "wasm")]
    pub use crate::web::WebCalculator;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let mut calc = Calculator::with_config(CalculatorConfig::basic());
        for key in ["1", "2", "/", "4", "Enter"] {
            if let Some(event) = Keypad::key_to_event(key) {
                calc.apply(event);
            }
        }
        assert_eq!(calc.display(), "3");
    }

    #[test]
    fn test_complex_expressions() {
        let mut calc = Calculator::new();
        let script = "4 2 * ( 3 + 7 ) =";
        for key in script.split_whitespace() {
            calc.apply(Keypad::key_to_event(key).unwrap());
        }
        assert_eq!(calc.display(), "420");
    }

    #[test]
    fn test_error_surfaces_as_display_text() {
        let mut calc = Calculator::new();
        calc.apply_all([
            InputEvent::Function(Function::Ln),
            InputEvent::Digit(0),
            InputEvent::Equals,
        ]);
        assert_eq!(calc.display(), "Error");
        assert!(calc.render().is_error);
    }
}
