//! Browser WASM bindings
//!
//! The JavaScript host owns the DOM. It forwards button clicks and key
//! presses here and redraws from the JSON render model after each event.

use wasm_bindgen::prelude::*;

use crate::calculator::{Calculator, InputEvent, Outcome};
use crate::config::{CalculatorConfig, Mode};
use crate::keypad::Keypad;

/// Browser calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct WebCalculator {
    calculator: Calculator,
    keypad: Keypad,
}

impl Default for WebCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WebCalculator {
    /// Create a scientific calculator
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new() -> Self {
        Self::with_mode(Mode::Scientific)
    }

    /// Create a basic calculator
    #[must_use]
    pub fn basic() -> Self {
        Self::with_mode(Mode::Basic)
    }

    /// Main display line
    #[wasm_bindgen(getter)]
    #[must_use]
    pub fn display(&self) -> String {
        self.calculator.display()
    }

    /// Render model as JSON
    #[must_use]
    pub fn render_json(&self) -> String {
        self.calculator.render().to_json().unwrap_or_default()
    }

    /// Keypad layout as JSON
    #[must_use]
    pub fn keypad_json(&self) -> String {
        serde_json::to_string(self.keypad.buttons()).unwrap_or_default()
    }

    /// Handle a keypad button click by element ID
    ///
    /// Returns a notice for the UI when the press was rejected.
    pub fn handle_button(&mut self, button_id: &str) -> Option<String> {
        let event = self.keypad.handle_click(button_id)?;
        self.dispatch(event)
    }

    /// Handle a keyboard key press
    pub fn handle_key(&mut self, key: &str) -> Option<String> {
        let event = Keypad::key_to_event(key)?;
        self.dispatch(event)
    }

    /// Toggle the angle unit
    pub fn toggle(&mut self) {
        self.calculator.toggle_angle_unit();
    }

    /// Clear the expression
    pub fn clear(&mut self) {
        self.calculator.clear();
    }
}

impl WebCalculator {
    fn with_mode(mode: Mode) -> Self {
        console_error_panic_hook::set_once();
        Self {
            calculator: Calculator::with_config(CalculatorConfig::new().with_mode(mode)),
            keypad: Keypad::for_mode(mode),
        }
    }

    fn dispatch(&mut self, event: InputEvent) -> Option<String> {
        match self.calculator.apply(event) {
            Outcome::Rejected(err) => Some(err.to_string()),
            Outcome::Updated | Outcome::Ignored | Outcome::Evaluated(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_key() {
        let mut calc = WebCalculator::new();
        calc.handle_key("7");
        calc.handle_key("*");
        calc.handle_key("6");
        calc.handle_key("Enter");
        assert_eq!(calc.display(), "42");
    }

    #[test]
    fn test_handle_button() {
        let mut calc = WebCalculator::new();
        calc.handle_button("btn-sqrt");
        calc.handle_button("btn-9");
        calc.handle_button("btn-equals");
        assert_eq!(calc.display(), "3");
    }

    #[test]
    fn test_digit_limit_notice() {
        let mut calc = WebCalculator::new();
        for _ in 0..8 {
            assert_eq!(calc.handle_key("1"), None);
        }
        assert_eq!(
            calc.handle_key("1").as_deref(),
            Some("Maximum of 8 digits reached")
        );
    }

    #[test]
    fn test_render_json() {
        let mut calc = WebCalculator::basic();
        calc.handle_key("5");
        let json = calc.render_json();
        assert!(json.contains(r#""pending":"5""#));
        assert!(json.contains(r#""mode":"basic""#));
    }

    #[test]
    fn test_keypad_json() {
        let calc = WebCalculator::basic();
        assert!(calc.keypad_json().contains(r#""id":"btn-equals""#));
    }

    #[test]
    fn test_toggle_and_clear() {
        let mut calc = WebCalculator::new();
        calc.toggle();
        assert!(calc.render_json().contains(r#""angle_unit":"degrees""#));
        calc.handle_key("4");
        calc.clear();
        assert_eq!(calc.display(), "0");
    }
}
