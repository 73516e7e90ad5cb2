//! Terminal output: styled display lines, keypad tables and notices

use console::{style, Style, Term};
use keycalc::keypad::Keypad;
use keycalc::render::{RenderModel, TokenKind, ERROR_TEXT};

use crate::error::CliResult;

/// Formats render models and keypads for the terminal
#[derive(Debug)]
pub struct Printer {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Print render models as JSON
    pub json: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Printer {
    /// Create a new printer
    #[must_use]
    pub fn new(use_color: bool, json: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            json,
        }
    }

    /// Renders a display line, or the whole model as JSON
    pub fn render(&self, model: &RenderModel) -> CliResult<String> {
        if self.json {
            return Ok(model.to_json()?);
        }
        if !self.use_color {
            return Ok(model.text());
        }
        Ok(self.styled_line(model))
    }

    fn styled_line(&self, model: &RenderModel) -> String {
        if model.is_error {
            return self.paint(ERROR_TEXT, &Style::new().red().bold());
        }
        if model.is_result {
            return self.paint(&model.text(), &Style::new().green().bold());
        }
        if model.tokens.is_empty() && model.pending.is_empty() {
            return self.paint("0", &Style::new().dim());
        }

        let mut line = String::new();
        for token in &model.tokens {
            let text = if token.kind == TokenKind::Operator {
                format!(" {} ", token.text)
            } else {
                token.text.clone()
            };
            line.push_str(&self.paint(&text, &token_style(token.kind)));
        }
        let pending = if model.division_warning {
            Style::new().yellow().underlined()
        } else {
            Style::new().bold()
        };
        line.push_str(&self.paint(&model.pending, &pending));
        line
    }

    /// Renders a status line with the mode, angle unit and last expression
    #[must_use]
    pub fn status(&self, model: &RenderModel) -> String {
        let mut status = model.mode.name().to_string();
        if model.mode.has_angle_unit() {
            status.push(' ');
            status.push_str(model.angle_unit.label());
        }
        if let Some(preview) = &model.preview {
            status.push_str("  ");
            status.push_str(preview);
        }
        self.paint(&status, &Style::new().dim())
    }

    /// Renders a keypad as a grid of labelled buttons
    #[must_use]
    pub fn keypad(&self, keypad: &Keypad) -> String {
        let width = keypad
            .buttons()
            .iter()
            .map(|b| b.label.chars().count())
            .max()
            .unwrap_or(1);
        let (rows, cols) = keypad.dimensions();

        let mut table = String::new();
        for row in 0..rows {
            let cells: Vec<String> = (0..cols)
                .filter_map(|col| keypad.get_button_at(row, col))
                .map(|button| {
                    let pad = width - button.label.chars().count();
                    let cell = format!("[{}{}]", button.label, " ".repeat(pad));
                    self.paint(&cell, &button_style(&button.id))
                })
                .collect();
            table.push_str(&cells.join(" "));
            table.push('\n');
        }
        table
    }

    /// Prints a transient notice to stderr
    pub fn notice(&self, message: &str) {
        let prefix = if self.use_color {
            style("⚠").yellow().bold().force_styling(true).to_string()
        } else {
            "WARN".to_string()
        };
        let _ = self.term.write_line(&format!("{prefix} {message}"));
    }

    fn paint(&self, text: &str, style: &Style) -> String {
        if self.use_color {
            style.apply_to(text).force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }
}

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Number => Style::new(),
        TokenKind::Operator => Style::new().cyan(),
        TokenKind::Function => Style::new().magenta(),
        TokenKind::Constant => Style::new().yellow(),
        TokenKind::Paren => Style::new().dim(),
    }
}

fn button_style(id: &str) -> Style {
    match id {
        "btn-equals" => Style::new().green().bold(),
        "btn-clear" | "btn-backspace" => Style::new().red(),
        _ if id.len() == 5 && id.ends_with(|c: char| c.is_ascii_digit()) => Style::new().bold(),
        _ => Style::new().cyan(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use keycalc::calculator::{Calculator, InputEvent};
    use keycalc::config::Mode;
    use keycalc::core::{Function, Operator};

    fn model(events: &[InputEvent]) -> RenderModel {
        let mut calc = Calculator::new();
        calc.apply_all(events.iter().copied());
        calc.render()
    }

    #[test]
    fn test_plain_render() {
        let printer = Printer::new(false, false);
        let m = model(&[
            InputEvent::Digit(2),
            InputEvent::Operator(Operator::Add),
            InputEvent::Function(Function::Cos),
        ]);
        assert_eq!(printer.render(&m).unwrap(), "2 + cos(");
    }

    #[test]
    fn test_colored_render_keeps_text() {
        let printer = Printer::new(true, false);
        let m = model(&[InputEvent::Digit(9), InputEvent::Operator(Operator::Divide)]);
        let line = printer.render(&m).unwrap();
        assert!(line.contains('\u{1b}'));
        assert_eq!(console::strip_ansi_codes(&line), "9 ÷ ");
    }

    #[test]
    fn test_colored_error() {
        let printer = Printer::new(true, false);
        let m = model(&[
            InputEvent::Digit(1),
            InputEvent::Operator(Operator::Divide),
            InputEvent::Digit(0),
            InputEvent::Equals,
        ]);
        assert_eq!(
            console::strip_ansi_codes(&printer.render(&m).unwrap()),
            "Error"
        );
    }

    #[test]
    fn test_json_render() {
        let printer = Printer::new(true, true);
        let json = printer.render(&model(&[InputEvent::Digit(3)])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["pending"], "3");
        assert_eq!(value["is_result"], false);
    }

    #[test]
    fn test_status_line() {
        let printer = Printer::new(false, false);
        let m = model(&[
            InputEvent::ToggleAngleUnit,
            InputEvent::Digit(1),
            InputEvent::Operator(Operator::Add),
            InputEvent::Digit(1),
            InputEvent::Equals,
        ]);
        assert_eq!(printer.status(&m), "scientific DEG  1 + 1 =");
        assert_eq!(m.mode, Mode::Scientific);
    }

    #[test]
    fn test_keypad_table() {
        let printer = Printer::new(false, false);
        let table = printer.keypad(&Keypad::basic());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("[7 "));
        assert!(lines[4].contains("[= "));
    }

    #[test]
    fn test_button_styles() {
        assert_eq!(button_style("btn-7"), Style::new().bold());
        assert_eq!(button_style("btn-equals"), Style::new().green().bold());
        assert_eq!(button_style("btn-sin"), Style::new().cyan());
    }
}
