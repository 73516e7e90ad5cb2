//! Key script replay
//!
//! A key script is a whitespace-separated list of keys, the same names the
//! browser keyboard handler accepts (`7`, `+`, `Enter`, `sin`, `pi`, ...).
//! Multi-digit literals such as `42` or `3.5` are typed one key at a time.

use std::io::{BufRead, Write};

use keycalc::calculator::{Calculator, InputEvent, Outcome};
use keycalc::config::CalculatorConfig;
use keycalc::keypad::Keypad;

use crate::error::{CliError, CliResult};
use crate::output::Printer;

/// Parses one key script word into events
pub fn word_events(word: &str) -> CliResult<Vec<InputEvent>> {
    if let Some(event) = Keypad::key_to_event(word) {
        return Ok(vec![event]);
    }
    if word.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return word
            .chars()
            .map(|c| {
                Keypad::key_to_event(c.encode_utf8(&mut [0; 4]))
                    .ok_or_else(|| CliError::unknown_key(word))
            })
            .collect();
    }
    Err(CliError::unknown_key(word))
}

/// Parses a whole key script
pub fn script_events<'a>(words: impl IntoIterator<Item = &'a str>) -> CliResult<Vec<InputEvent>> {
    let mut events = Vec::new();
    for word in words {
        events.extend(word_events(word)?);
    }
    Ok(events)
}

/// One pressed key and what it did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The event sent
    pub event: InputEvent,
    /// What the calculator reported
    pub outcome: Outcome,
    /// Display line afterwards
    pub display: String,
}

/// A calculator session fed from key scripts
#[derive(Debug)]
pub struct Session {
    calculator: Calculator,
}

impl Session {
    /// Creates a session
    #[must_use]
    pub fn new(config: CalculatorConfig) -> Self {
        Self {
            calculator: Calculator::with_config(config),
        }
    }

    /// Returns the calculator
    #[must_use]
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Presses every key of a script
    ///
    /// The script is parsed before any key is pressed, so an unknown key
    /// leaves the calculator untouched.
    pub fn press<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) -> CliResult<Vec<Step>> {
        let events = script_events(words)?;
        tracing::info!(keys = events.len(), "replaying key script");
        Ok(events
            .into_iter()
            .map(|event| {
                let outcome = self.calculator.apply(event);
                Step {
                    event,
                    outcome,
                    display: self.calculator.display(),
                }
            })
            .collect())
    }
}

/// Reads key scripts line by line and prints the display after each
///
/// `quit` or `exit` ends the loop. A line with an unknown key is reported
/// and skipped.
pub fn repl(
    session: &mut Session,
    printer: &Printer,
    input: impl BufRead,
    mut out: impl Write,
) -> CliResult<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit") {
            break;
        }
        match session.press(line.split_whitespace()) {
            Ok(steps) => {
                for step in &steps {
                    if let Outcome::Rejected(err) = &step.outcome {
                        printer.notice(&err.to_string());
                    }
                }
                writeln!(out, "{}", printer.render(&session.calculator().render())?)?;
            }
            Err(err @ CliError::UnknownKey { .. }) => printer.notice(&err.to_string()),
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use keycalc::core::{Function, Operator};

    fn run(script: &str) -> String {
        let mut session = Session::new(CalculatorConfig::default());
        let steps = session.press(script.split_whitespace()).unwrap();
        steps.last().map(|s| s.display.clone()).unwrap_or_default()
    }

    #[test]
    fn test_word_events_single_key() {
        assert_eq!(word_events("+").unwrap(), [InputEvent::Operator(Operator::Add)]);
        assert_eq!(
            word_events("sin").unwrap(),
            [InputEvent::Function(Function::Sin)]
        );
    }

    #[test]
    fn test_word_events_splits_literals() {
        assert_eq!(
            word_events("4.5").unwrap(),
            [
                InputEvent::Digit(4),
                InputEvent::DecimalPoint,
                InputEvent::Digit(5)
            ]
        );
    }

    #[test]
    fn test_word_events_unknown() {
        assert!(matches!(
            word_events("banana"),
            Err(CliError::UnknownKey { key }) if key == "banana"
        ));
    }

    #[test]
    fn test_session_precedence() {
        assert_eq!(run("2 + 3 * 4 ="), "14");
    }

    #[test]
    fn test_session_multi_digit() {
        assert_eq!(run("42 * ( 3 + 7 ) ="), "420");
    }

    #[test]
    fn test_session_functions() {
        assert_eq!(run("sqrt 144 ) ="), "12");
        assert_eq!(run("deg sin 30 ="), "0.5");
    }

    #[test]
    fn test_session_division_by_zero() {
        assert_eq!(run("1 / 0 ="), "Error");
    }

    #[test]
    fn test_unknown_key_leaves_state() {
        let mut session = Session::new(CalculatorConfig::default());
        session.press(["7"]).unwrap();
        assert!(session.press(["+", "what"]).is_err());
        assert_eq!(session.calculator().display(), "7");
    }

    #[test]
    fn test_steps_report_outcomes() {
        let mut session = Session::new(CalculatorConfig::default());
        let steps = session.press(["Backspace", "5"]).unwrap();
        assert_eq!(steps[0].outcome, Outcome::Ignored);
        assert_eq!(steps[1].outcome, Outcome::Updated);
        assert_eq!(steps[1].display, "5");
    }

    #[test]
    fn test_repl_prints_each_line() {
        let mut session = Session::new(CalculatorConfig::default());
        let printer = Printer::new(false, false);
        let input = "2 + 2 =\n\n* 10 =\nquit\n9 =\n".as_bytes();
        let mut out = Vec::new();
        repl(&mut session, &printer, input, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "4\n40\n");
    }

    #[test]
    fn test_repl_skips_unknown_keys() {
        let mut session = Session::new(CalculatorConfig::default());
        let printer = Printer::new(false, false);
        let input = "3 +\nnope\n4 =\n".as_bytes();
        let mut out = Vec::new();
        repl(&mut session, &printer, input, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "3 + \n7\n");
    }
}
