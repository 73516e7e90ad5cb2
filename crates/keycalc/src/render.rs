//! Render model handed to the UI layer
//!
//! The UI never looks at calculator internals. It receives the committed
//! tokens already classified for styling, the entry buffer, and a handful
//! of flags for emphasis and warnings.

use serde::{Deserialize, Serialize};

use crate::config::Mode;
use crate::core::{AngleUnit, Token};

/// Display string shown after a failed evaluation
pub const ERROR_TEXT: &str = "Error";

/// Styling class of a display token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Committed number
    Number,
    /// Binary operator
    Operator,
    /// Function name
    Function,
    /// Symbolic constant
    Constant,
    /// Parenthesis
    Paren,
}

/// A token prepared for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayToken {
    /// Text to draw
    pub text: String,
    /// Styling class
    pub kind: TokenKind,
}

impl From<&Token> for DisplayToken {
    fn from(token: &Token) -> Self {
        let kind = match token {
            Token::Number(_) => TokenKind::Number,
            Token::Operator(_) => TokenKind::Operator,
            Token::Function(_) => TokenKind::Function,
            Token::Constant(_) => TokenKind::Constant,
            Token::OpenParen | Token::CloseParen => TokenKind::Paren,
        };
        Self {
            text: token.to_string(),
            kind,
        }
    }
}

/// Everything the UI needs to draw the display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderModel {
    /// Committed tokens in order
    pub tokens: Vec<DisplayToken>,
    /// Partially typed number
    pub pending: String,
    /// The display holds a freshly computed result
    pub is_result: bool,
    /// The last evaluation failed
    pub is_error: bool,
    /// A zero divisor is being typed
    pub division_warning: bool,
    /// Last evaluated expression, ending in `=`
    pub preview: Option<String>,
    /// Active angle unit
    pub angle_unit: AngleUnit,
    /// Keypad mode
    pub mode: Mode,
}

impl RenderModel {
    /// Returns the main display line
    ///
    /// An empty calculator shows `0`, a failed evaluation shows `Error`.
    #[must_use]
    pub fn text(&self) -> String {
        if self.is_error {
            return ERROR_TEXT.to_string();
        }
        let text = join_display(
            self.tokens.iter().map(|t| (t.text.as_str(), t.kind)),
            &self.pending,
        );
        if text.is_empty() {
            "0".to_string()
        } else {
            text
        }
    }

    /// Serializes the model for a JavaScript host
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Renders committed tokens plus the entry buffer as one line
#[must_use]
pub fn expression_text(tokens: &[Token], pending: &str) -> String {
    let display: Vec<DisplayToken> = tokens.iter().map(DisplayToken::from).collect();
    join_display(display.iter().map(|t| (t.text.as_str(), t.kind)), pending)
}

fn join_display<'a>(parts: impl Iterator<Item = (&'a str, TokenKind)>, pending: &str) -> String {
    let mut line = String::new();
    for (text, kind) in parts {
        if kind == TokenKind::Operator {
            line.push(' ');
            line.push_str(text);
            line.push(' ');
        } else {
            line.push_str(text);
        }
    }
    line.push_str(pending);
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Constant, Function, Operator};

    fn model(tokens: &[Token], pending: &str) -> RenderModel {
        RenderModel {
            tokens: tokens.iter().map(DisplayToken::from).collect(),
            pending: pending.to_string(),
            is_result: false,
            is_error: false,
            division_warning: false,
            preview: None,
            angle_unit: AngleUnit::Radians,
            mode: Mode::Scientific,
        }
    }

    #[test]
    fn test_display_token_kinds() {
        assert_eq!(
            DisplayToken::from(&Token::Number("4".into())).kind,
            TokenKind::Number
        );
        assert_eq!(
            DisplayToken::from(&Token::Operator(Operator::Add)).kind,
            TokenKind::Operator
        );
        assert_eq!(
            DisplayToken::from(&Token::Function(Function::Cos)).kind,
            TokenKind::Function
        );
        assert_eq!(
            DisplayToken::from(&Token::Constant(Constant::Pi)).kind,
            TokenKind::Constant
        );
        assert_eq!(DisplayToken::from(&Token::CloseParen).kind, TokenKind::Paren);
    }

    #[test]
    fn test_empty_model_shows_zero() {
        assert_eq!(model(&[], "").text(), "0");
    }

    #[test]
    fn test_error_model_shows_error() {
        let mut m = model(&[], "");
        m.is_error = true;
        assert_eq!(m.text(), "Error");
    }

    #[test]
    fn test_text_spaces_operators_only() {
        let tokens = [
            Token::Number("2".into()),
            Token::Operator(Operator::Multiply),
            Token::Function(Function::Sin),
            Token::OpenParen,
        ];
        assert_eq!(model(&tokens, "90").text(), "2 × sin(90");
    }

    #[test]
    fn test_expression_text() {
        let tokens = [
            Token::OpenParen,
            Token::Number("1".into()),
            Token::Operator(Operator::Subtract),
            Token::Constant(Constant::E),
            Token::CloseParen,
        ];
        assert_eq!(expression_text(&tokens, ""), "(1 − e)");
        assert_eq!(expression_text(&[], "3."), "3.");
    }

    #[test]
    fn test_to_json() {
        let json = model(&[Token::Constant(Constant::Pi)], "").to_json().unwrap();
        assert!(json.contains(r#""kind":"constant""#));
        assert!(json.contains(r#""angle_unit":"radians""#));
        assert!(json.contains(r#""mode":"scientific""#));
    }
}
