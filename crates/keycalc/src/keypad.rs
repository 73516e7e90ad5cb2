//! Keypad layouts and keyboard mapping
//!
//! Buttons are addressed three ways: by element ID (click handlers), by
//! grid position (remote-control focus) and by keyboard key.

use serde::Serialize;

use crate::calculator::InputEvent;
use crate::config::Mode;
use crate::core::{Constant, Function, Operator};

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyDef {
    /// The event this button sends
    pub event: InputEvent,
    /// The DOM element ID for this button
    pub id: String,
    /// Text printed on the button
    pub label: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeyDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(event: InputEvent, row: usize, col: usize) -> Self {
        Self {
            event,
            id: format!("btn-{}", button_name(event)),
            label: event_label(event),
            row,
            col,
        }
    }
}

/// Returns the element ID suffix for an event
fn button_name(event: InputEvent) -> String {
    match event {
        InputEvent::Digit(d) => d.to_string(),
        InputEvent::DecimalPoint => "decimal".to_string(),
        InputEvent::Operator(op) => operator_name(op).to_string(),
        InputEvent::Function(func) => func.name().to_string(),
        InputEvent::Constant(Constant::Pi) => "pi".to_string(),
        InputEvent::Constant(Constant::E) => "e".to_string(),
        InputEvent::OpenOrCloseParen => "paren".to_string(),
        InputEvent::OpenParen => "open-paren".to_string(),
        InputEvent::CloseParen => "close-paren".to_string(),
        InputEvent::Power => "power".to_string(),
        InputEvent::PowerOfTwo => "square".to_string(),
        InputEvent::Exponential => "exp".to_string(),
        InputEvent::Backspace => "backspace".to_string(),
        InputEvent::Clear => "clear".to_string(),
        InputEvent::Equals => "equals".to_string(),
        InputEvent::ToggleAngleUnit => "angle".to_string(),
    }
}

const fn operator_name(op: Operator) -> &'static str {
    match op {
        Operator::Add => "plus",
        Operator::Subtract => "minus",
        Operator::Multiply => "times",
        Operator::Divide => "divide",
        Operator::Power => "power",
    }
}

/// Returns the button label for an event
#[must_use]
pub fn event_label(event: InputEvent) -> String {
    match event {
        InputEvent::Digit(d) => d.to_string(),
        InputEvent::DecimalPoint => ".".to_string(),
        InputEvent::Operator(op) => op.symbol().to_string(),
        InputEvent::Function(Function::Inv) => "1/x".to_string(),
        InputEvent::Function(Function::Abs) => "|x|".to_string(),
        InputEvent::Function(func) => func.symbol().to_string(),
        InputEvent::Constant(constant) => constant.symbol().to_string(),
        InputEvent::OpenOrCloseParen => "( )".to_string(),
        InputEvent::OpenParen => "(".to_string(),
        InputEvent::CloseParen => ")".to_string(),
        InputEvent::Power => "^".to_string(),
        InputEvent::PowerOfTwo => "x²".to_string(),
        InputEvent::Exponential => "eˣ".to_string(),
        InputEvent::Backspace => "⌫".to_string(),
        InputEvent::Clear => "C".to_string(),
        InputEvent::Equals => "=".to_string(),
        InputEvent::ToggleAngleUnit => "DEG/RAD".to_string(),
    }
}

/// Keypad layout definition
#[derive(Debug, Clone)]
pub struct Keypad {
    mode: Mode,
    buttons: Vec<KeyDef>,
    cols: usize,
    rows: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::scientific()
    }
}

impl Keypad {
    /// Creates the layout for a mode
    #[must_use]
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Basic => Self::basic(),
            Mode::Scientific => Self::scientific(),
        }
    }

    /// Creates the four-function keypad
    ///
    /// ```text
    /// [ C ] [ ⌫ ] [( )] [ ÷ ]
    /// [ 7 ] [ 8 ] [ 9 ] [ × ]
    /// [ 4 ] [ 5 ] [ 6 ] [ − ]
    /// [ 1 ] [ 2 ] [ 3 ] [ + ]
    /// [ 0 ] [ . ] [ ^ ] [ = ]
    /// ```
    #[must_use]
    pub fn basic() -> Self {
        use InputEvent::{
            Backspace, Clear, DecimalPoint, Digit, Equals, OpenOrCloseParen, Operator as Op, Power,
        };
        let grid = [
            [Clear, Backspace, OpenOrCloseParen, Op(Operator::Divide)],
            [Digit(7), Digit(8), Digit(9), Op(Operator::Multiply)],
            [Digit(4), Digit(5), Digit(6), Op(Operator::Subtract)],
            [Digit(1), Digit(2), Digit(3), Op(Operator::Add)],
            [Digit(0), DecimalPoint, Power, Equals],
        ];
        Self::from_grid(Mode::Basic, &grid)
    }

    /// Creates the scientific keypad
    ///
    /// ```text
    /// [DEG] [sin] [cos] [tan] [ C ]
    /// [ln ] [log] [ √ ] [|x|] [ ⌫ ]
    /// [ π ] [ e ] [x² ] [eˣ ] [1/x]
    /// [ ( ] [ 7 ] [ 8 ] [ 9 ] [ ÷ ]
    /// [ ) ] [ 4 ] [ 5 ] [ 6 ] [ × ]
    /// [ ^ ] [ 1 ] [ 2 ] [ 3 ] [ − ]
    /// [( )] [ 0 ] [ . ] [ = ] [ + ]
    /// ```
    #[must_use]
    pub fn scientific() -> Self {
        use InputEvent::{
            Backspace, Clear, CloseParen, Constant as K, DecimalPoint, Digit, Equals, Exponential,
            Function as F, OpenOrCloseParen, OpenParen, Operator as Op, Power, PowerOfTwo,
            ToggleAngleUnit,
        };
        let grid = [
            [ToggleAngleUnit, F(Function::Sin), F(Function::Cos), F(Function::Tan), Clear],
            [F(Function::Ln), F(Function::Log), F(Function::Sqrt), F(Function::Abs), Backspace],
            [K(Constant::Pi), K(Constant::E), PowerOfTwo, Exponential, F(Function::Inv)],
            [OpenParen, Digit(7), Digit(8), Digit(9), Op(Operator::Divide)],
            [CloseParen, Digit(4), Digit(5), Digit(6), Op(Operator::Multiply)],
            [Power, Digit(1), Digit(2), Digit(3), Op(Operator::Subtract)],
            [OpenOrCloseParen, Digit(0), DecimalPoint, Equals, Op(Operator::Add)],
        ];
        Self::from_grid(Mode::Scientific, &grid)
    }

    fn from_grid<const R: usize, const C: usize>(mode: Mode, grid: &[[InputEvent; C]; R]) -> Self {
        let buttons = grid
            .iter()
            .enumerate()
            .flat_map(|(row, events)| {
                events
                    .iter()
                    .enumerate()
                    .map(move |(col, event)| KeyDef::new(*event, row, col))
            })
            .collect();
        Self {
            mode,
            buttons,
            cols: C,
            rows: R,
        }
    }

    /// Returns the mode this layout belongs to
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeyDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeyDef> {
        if row < self.rows && col < self.cols {
            self.buttons.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeyDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Finds the button that sends an event
    #[must_use]
    pub fn find_button_by_event(&self, event: InputEvent) -> Option<&KeyDef> {
        self.buttons.iter().find(|b| b.event == event)
    }

    /// Processes a button click and returns its event
    #[must_use]
    pub fn handle_click(&self, element_id: &str) -> Option<InputEvent> {
        self.find_button_by_id(element_id).map(|b| b.event)
    }

    /// Maps a keyboard key or key-script word to an input event
    ///
    /// Accepts DOM `KeyboardEvent.key` values (`"7"`, `"Enter"`,
    /// `"Backspace"`) as well as function and constant names.
    #[must_use]
    pub fn key_to_event(key: &str) -> Option<InputEvent> {
        let event = match key {
            "." | "," => InputEvent::DecimalPoint,
            "^" => InputEvent::Power,
            "(" => InputEvent::OpenParen,
            ")" => InputEvent::CloseParen,
            "()" => InputEvent::OpenOrCloseParen,
            "Enter" | "=" => InputEvent::Equals,
            "Escape" | "Delete" | "c" | "C" => InputEvent::Clear,
            "Backspace" => InputEvent::Backspace,
            "sq" | "x²" => InputEvent::PowerOfTwo,
            "exp" => InputEvent::Exponential,
            "deg" | "rad" | "angle" => InputEvent::ToggleAngleUnit,
            _ => return Self::value_key(key),
        };
        Some(event)
    }

    fn value_key(key: &str) -> Option<InputEvent> {
        let mut chars = key.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if let Some(d) = ch.to_digit(10) {
                return u8::try_from(d).ok().map(InputEvent::Digit);
            }
            if let Some(op) = Operator::from_char(ch) {
                return Some(InputEvent::Operator(op));
            }
        }
        Function::from_name(key)
            .map(InputEvent::Function)
            .or_else(|| Constant::from_name(key).map(InputEvent::Constant))
    }
}
