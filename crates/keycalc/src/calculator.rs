//! Evaluator state and input accumulator
//!
//! A [`Calculator`] owns everything one display needs: the committed token
//! sequence, the number being typed, the result flags and the angle unit.
//! Each [`InputEvent`] runs to completion and reports an [`Outcome`].
//!
//! # Example
//!
//! ```rust
//! use keycalc::prelude::*;
//!
//! let mut calc = Calculator::new();
//! for event in [
//!     InputEvent::Digit(2),
//!     InputEvent::Operator(Operator::Add),
//!     InputEvent::Digit(3),
//!     InputEvent::Operator(Operator::Multiply),
//!     InputEvent::Digit(4),
//! ] {
//!     calc.apply(event);
//! }
//! assert_eq!(calc.apply(InputEvent::Equals), Outcome::Evaluated("14".into()));
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{CalculatorConfig, Mode};
use crate::core::token::paren_balance;
use crate::core::{evaluate_tokens, AngleUnit, CalcError, Constant, Function, Operator, Token};
use crate::render::{expression_text, DisplayToken, RenderModel, ERROR_TEXT};

/// A discrete input delivered by the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum InputEvent {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    DecimalPoint,
    /// Binary operator
    Operator(Operator),
    /// Function; opens a group
    Function(Function),
    /// Symbolic constant
    Constant(Constant),
    /// Closes a group if one can be closed here, otherwise opens one
    OpenOrCloseParen,
    /// Always opens a group
    OpenParen,
    /// Closes a group if one can be closed here
    CloseParen,
    /// `^`
    Power,
    /// `^2` shortcut
    PowerOfTwo,
    /// `e^` shortcut
    Exponential,
    /// Removes the last character or token
    Backspace,
    /// Resets the expression
    Clear,
    /// Evaluates the expression
    Equals,
    /// Switches between radians and degrees
    ToggleAngleUnit,
}

/// What an input event did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Outcome {
    /// The state changed
    Updated,
    /// The event does not apply in the current state; nothing changed
    Ignored,
    /// The event was refused; the UI should show a transient notice
    Rejected(CalcError),
    /// Equals produced this display string (`"Error"` on failure)
    Evaluated(String),
}

impl Outcome {
    /// Returns true if the event changed the state
    #[must_use]
    pub const fn changed(&self) -> bool {
        matches!(self, Self::Updated | Self::Evaluated(_))
    }
}

/// Calculator state: one per display
#[derive(Debug, Clone)]
pub struct Calculator {
    config: CalculatorConfig,
    tokens: Vec<Token>,
    buffer: String,
    just_evaluated: bool,
    error: bool,
    angle_unit: AngleUnit,
    preview: Option<String>,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Creates a scientific-mode calculator
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a calculator from a configuration
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        let angle_unit = if config.mode.has_angle_unit() {
            config.angle_unit
        } else {
            AngleUnit::Radians
        };
        Self {
            config,
            tokens: Vec::new(),
            buffer: String::new(),
            just_evaluated: false,
            error: false,
            angle_unit,
            preview: None,
        }
    }

    /// Returns the configuration
    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Returns the keypad mode
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    /// Returns the committed tokens
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the number being typed
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Returns the active angle unit
    #[must_use]
    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    /// Returns true if the display holds a freshly computed result
    #[must_use]
    pub fn is_result(&self) -> bool {
        self.just_evaluated
    }

    /// Returns true if the last evaluation failed
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.error
    }

    /// Returns true when nothing has been entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.buffer.is_empty() && !self.error
    }

    /// Returns true while a zero divisor is being typed
    #[must_use]
    pub fn division_warning(&self) -> bool {
        matches!(self.tokens.last(), Some(Token::Operator(Operator::Divide)))
            && self.buffer.parse::<f64>().is_ok_and(|v| v == 0.0)
    }

    /// Dispatches one input event
    pub fn apply(&mut self, event: InputEvent) -> Outcome {
        let outcome = match event {
            InputEvent::Digit(d) => self.digit(d),
            InputEvent::DecimalPoint => self.decimal_point(),
            InputEvent::Operator(op) => self.operator(op),
            InputEvent::Function(func) => self.function(func),
            InputEvent::Constant(constant) => self.constant(constant),
            InputEvent::OpenOrCloseParen => self.open_or_close_paren(),
            InputEvent::OpenParen => self.open_paren(),
            InputEvent::CloseParen => self.close_paren(),
            InputEvent::Power => self.power(),
            InputEvent::PowerOfTwo => self.power_of_two(),
            InputEvent::Exponential => self.exponential(),
            InputEvent::Backspace => self.backspace(),
            InputEvent::Clear => self.clear(),
            InputEvent::Equals => self.equals(),
            InputEvent::ToggleAngleUnit => self.toggle_angle_unit(),
        };
        tracing::debug!(?event, ?outcome, "input event");
        outcome
    }

    /// Applies a sequence of events, returning the last outcome
    pub fn apply_all(&mut self, events: impl IntoIterator<Item = InputEvent>) -> Outcome {
        events
            .into_iter()
            .fold(Outcome::Ignored, |_, event| self.apply(event))
    }

    /// Appends a digit to the entry buffer
    pub fn digit(&mut self, digit: u8) -> Outcome {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            return Outcome::Ignored;
        };

        let limit = self.config.digit_limit();
        let current = if self.just_evaluated {
            ""
        } else {
            self.buffer.as_str()
        };
        if digit_count(current) >= limit {
            return Outcome::Rejected(CalcError::DigitLimitExceeded { limit });
        }

        self.start_fresh_after_result();
        self.begin_value();
        self.buffer.push(ch);
        Outcome::Updated
    }

    /// Appends a decimal point; an empty buffer becomes `0.`
    pub fn decimal_point(&mut self) -> Outcome {
        if !self.just_evaluated && self.buffer.contains(['.', 'e']) {
            return Outcome::Ignored;
        }

        self.start_fresh_after_result();
        if self.buffer.is_empty() {
            self.begin_value();
            self.buffer.push_str("0.");
        } else {
            self.buffer.push('.');
        }
        Outcome::Updated
    }

    /// Appends an operator, or replaces a trailing one
    pub fn operator(&mut self, op: Operator) -> Outcome {
        if op == Operator::Power {
            return self.power();
        }
        if self.buffer.is_empty()
            && self
                .tokens
                .last()
                .is_some_and(|t| t.is_open_paren() || t.is_function())
        {
            return Outcome::Ignored;
        }

        self.continue_after_result();
        self.commit_buffer();
        if let Some(Token::Operator(last)) = self.tokens.last_mut() {
            *last = op;
            return Outcome::Updated;
        }
        if self.tokens.is_empty() {
            self.tokens.push(Token::Number("0".to_string()));
        }
        self.tokens.push(Token::Operator(op));
        Outcome::Updated
    }

    /// Appends `^` after a completed value
    pub fn power(&mut self) -> Outcome {
        if !self.has_value() {
            return Outcome::Ignored;
        }
        self.continue_after_result();
        self.commit_buffer();
        self.tokens.push(Token::Operator(Operator::Power));
        Outcome::Updated
    }

    /// Appends `^2` after a completed value
    pub fn power_of_two(&mut self) -> Outcome {
        if !self.has_value() {
            return Outcome::Ignored;
        }
        self.continue_after_result();
        self.commit_buffer();
        self.tokens.push(Token::Operator(Operator::Power));
        self.tokens.push(Token::Number("2".to_string()));
        Outcome::Updated
    }

    /// Appends `e^`
    pub fn exponential(&mut self) -> Outcome {
        self.continue_after_result();
        self.commit_buffer();
        self.implicit_multiply();
        self.tokens.push(Token::Constant(Constant::E));
        self.tokens.push(Token::Operator(Operator::Power));
        Outcome::Updated
    }

    /// Appends a function and opens its group
    pub fn function(&mut self, func: Function) -> Outcome {
        self.continue_after_result();
        self.commit_buffer();
        self.implicit_multiply();
        self.tokens.push(Token::Function(func));
        self.tokens.push(Token::OpenParen);
        Outcome::Updated
    }

    /// Appends a constant
    pub fn constant(&mut self, constant: Constant) -> Outcome {
        self.continue_after_result();
        self.commit_buffer();
        self.implicit_multiply();
        self.tokens.push(Token::Constant(constant));
        Outcome::Updated
    }

    /// Closes the innermost group when a value ends here, otherwise opens one
    pub fn open_or_close_paren(&mut self) -> Outcome {
        if self.can_close() {
            self.close_paren()
        } else {
            self.open_paren()
        }
    }

    /// Opens a group
    pub fn open_paren(&mut self) -> Outcome {
        self.continue_after_result();
        self.commit_buffer();
        self.implicit_multiply();
        self.tokens.push(Token::OpenParen);
        Outcome::Updated
    }

    /// Closes the innermost group
    pub fn close_paren(&mut self) -> Outcome {
        if !self.can_close() {
            return Outcome::Ignored;
        }
        self.continue_after_result();
        self.commit_buffer();
        self.tokens.push(Token::CloseParen);
        Outcome::Updated
    }

    /// Removes the last typed character or committed token
    ///
    /// A function's open paren takes the function name with it. A popped
    /// number becomes editable again, minus its last character and cut to
    /// the digit limit. An exponent left without digits is removed.
    pub fn backspace(&mut self) -> Outcome {
        if self.just_evaluated {
            return Outcome::Ignored;
        }

        if !self.buffer.is_empty() {
            self.buffer.pop();
            drop_incomplete_tail(&mut self.buffer);
            return Outcome::Updated;
        }

        match self.tokens.pop() {
            None => return Outcome::Ignored,
            Some(Token::OpenParen) => {
                if self.tokens.last().is_some_and(Token::is_function) {
                    self.tokens.pop();
                }
            }
            Some(Token::Number(mut literal)) => {
                literal.pop();
                drop_incomplete_tail(&mut literal);
                let limit = self.config.digit_limit();
                while digit_count(&literal) > limit {
                    literal.pop();
                    drop_incomplete_tail(&mut literal);
                }
                self.buffer = literal;
            }
            Some(_) => {}
        }
        Outcome::Updated
    }

    /// Resets the expression, entry buffer and result flags
    pub fn clear(&mut self) -> Outcome {
        self.tokens.clear();
        self.buffer.clear();
        self.just_evaluated = false;
        self.error = false;
        self.preview = None;
        Outcome::Updated
    }

    /// Evaluates the expression
    ///
    /// A math error shows `Error` and the next digit starts over. With
    /// nothing to evaluate the state is left alone.
    pub fn equals(&mut self) -> Outcome {
        let mut expression = self.tokens.clone();
        if let Some(pending) = pending_number(&self.buffer) {
            expression.push(pending);
        }
        let preview = format!("{} =", expression_text(&expression, ""));

        match evaluate_tokens(expression, self.angle_unit, &self.config.format) {
            Ok(evaluation) => {
                self.tokens = vec![Token::Number(evaluation.display.clone())];
                self.buffer.clear();
                self.just_evaluated = true;
                self.error = false;
                self.preview = Some(preview);
                Outcome::Evaluated(evaluation.display)
            }
            Err(err) if err.is_math_error() => {
                tracing::debug!(error = %err, "evaluation failed");
                self.tokens.clear();
                self.buffer.clear();
                self.just_evaluated = true;
                self.error = true;
                self.preview = Some(preview);
                Outcome::Evaluated(ERROR_TEXT.to_string())
            }
            Err(err) => {
                tracing::debug!(error = %err, "nothing evaluated");
                Outcome::Ignored
            }
        }
    }

    /// Switches the angle unit; basic mode has none
    pub fn toggle_angle_unit(&mut self) -> Outcome {
        if !self.config.mode.has_angle_unit() {
            return Outcome::Ignored;
        }
        self.angle_unit = self.angle_unit.toggled();
        Outcome::Updated
    }

    /// Builds the render model for the current state
    #[must_use]
    pub fn render(&self) -> RenderModel {
        RenderModel {
            tokens: self.tokens.iter().map(DisplayToken::from).collect(),
            pending: self.buffer.clone(),
            is_result: self.just_evaluated,
            is_error: self.error,
            division_warning: self.division_warning(),
            preview: self.preview.clone(),
            angle_unit: self.angle_unit,
            mode: self.config.mode,
        }
    }

    /// Returns the main display line
    #[must_use]
    pub fn display(&self) -> String {
        self.render().text()
    }

    /// Digit entry after a result starts a new expression
    fn start_fresh_after_result(&mut self) {
        if self.just_evaluated {
            self.tokens.clear();
            self.buffer.clear();
            self.just_evaluated = false;
            self.error = false;
        }
    }

    /// Anything else after a result builds on it
    fn continue_after_result(&mut self) {
        if self.just_evaluated {
            self.just_evaluated = false;
            self.error = false;
        }
    }

    /// Inserts `×` before a new number that follows a completed value
    fn begin_value(&mut self) {
        if self.buffer.is_empty() {
            self.implicit_multiply();
        }
    }

    fn implicit_multiply(&mut self) {
        if self.tokens.last().is_some_and(Token::ends_value) {
            self.tokens.push(Token::Operator(Operator::Multiply));
        }
    }

    fn commit_buffer(&mut self) {
        if let Some(number) = pending_number(&self.buffer) {
            self.tokens.push(number);
        }
        self.buffer.clear();
    }

    fn has_value(&self) -> bool {
        !self.buffer.is_empty() || self.tokens.last().is_some_and(Token::ends_value)
    }

    /// A committed number or constant also ends a value, so `(π` closes
    /// rather than opening `(π × (`.
    fn can_close(&self) -> bool {
        paren_balance(&self.tokens) > 0 && self.has_value()
    }
}

/// Number of digits in an entry buffer
fn digit_count(buffer: &str) -> usize {
    buffer.chars().filter(char::is_ascii_digit).count()
}

/// Strips a dangling `e`, `e+` or `e-` and a lone sign from an edited literal
fn drop_incomplete_tail(literal: &mut String) {
    if literal.ends_with(['+', '-']) && literal[..literal.len() - 1].ends_with('e') {
        literal.pop();
    }
    if literal.ends_with('e') {
        literal.pop();
    }
    if literal == "-" {
        literal.clear();
    }
}

/// Turns the entry buffer into a number token, dropping a trailing point
fn pending_number(buffer: &str) -> Option<Token> {
    let literal = buffer.trim_end_matches('.');
    if literal.is_empty() || literal == "-" {
        None
    } else {
        Some(Token::Number(literal.to_string()))
    }
}
