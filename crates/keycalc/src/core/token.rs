//! Token model shared by the input accumulator, converter and evaluator

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    /// Addition (+)
    Add,
    /// Subtraction (−)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
    /// Power (^)
    Power,
}

impl Operator {
    /// All operators in keypad order
    pub const ALL: [Self; 5] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
    ];

    /// Returns the symbol shown on the display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Power => "^",
        }
    }

    /// Returns the ASCII spelling used by keyboards and key scripts
    #[must_use]
    pub const fn ascii(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
            Self::Power => '^',
        }
    }

    /// Parses an operator from either its ASCII or display spelling
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' | 'x' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            '^' => Some(Self::Power),
            _ => None,
        }
    }

    /// Returns the precedence level (higher binds tighter)
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
            Self::Power => 3,
        }
    }

    /// Returns true if this operator groups right-to-left
    #[must_use]
    pub const fn is_right_associative(&self) -> bool {
        matches!(self, Self::Power)
    }
}

/// Unary scientific function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Function {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
    /// Natural logarithm
    Ln,
    /// Base-10 logarithm
    Log,
    /// Square root
    Sqrt,
    /// Absolute value
    Abs,
    /// Reciprocal (1/x)
    Inv,
}

impl Function {
    /// All functions in keypad order
    pub const ALL: [Self; 8] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Ln,
        Self::Log,
        Self::Sqrt,
        Self::Abs,
        Self::Inv,
    ];

    /// Returns the canonical function name
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Inv => "inv",
        }
    }

    /// Returns the label shown on the display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Sqrt => "√",
            _ => self.name(),
        }
    }

    /// Parses a function from its name (case-insensitive) or the √ sign
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "√" {
            return Some(Self::Sqrt);
        }
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    /// Returns true for sin, cos and tan
    #[must_use]
    pub const fn is_trigonometric(&self) -> bool {
        matches!(self, Self::Sin | Self::Cos | Self::Tan)
    }
}

/// Symbolic constant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Constant {
    /// π
    Pi,
    /// Euler's number
    E,
}

impl Constant {
    /// Returns the numeric value substituted during conversion
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }

    /// Returns the symbol shown on the display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::E => "e",
        }
    }

    /// Parses a constant from `pi`, `π` or `e`
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "π" => Some(Self::Pi),
            "e" | "E" => Some(Self::E),
            _ if name.eq_ignore_ascii_case("pi") => Some(Self::Pi),
            _ => None,
        }
    }
}

/// One committed unit of an expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// Decimal literal as typed (or as formatted from a previous result)
    Number(String),
    /// Binary operator
    Operator(Operator),
    /// Function name; always followed by an open paren
    Function(Function),
    /// Symbolic constant
    Constant(Constant),
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
}

impl Token {
    /// Returns true if the token ends a value (number, constant or `)`)
    ///
    /// A value-ending token followed by a value-starting entry gets an
    /// implicit multiplication in between.
    #[must_use]
    pub const fn ends_value(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Constant(_) | Self::CloseParen)
    }

    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a function name
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Returns true if this token is `(`
    #[must_use]
    pub const fn is_open_paren(&self) -> bool {
        matches!(self, Self::OpenParen)
    }

    /// Returns true if an expression may not end on this token
    #[must_use]
    pub const fn is_dangling(&self) -> bool {
        matches!(self, Self::Operator(_) | Self::Function(_) | Self::OpenParen)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(n),
            Self::Operator(op) => f.write_str(op.symbol()),
            Self::Function(func) => f.write_str(func.symbol()),
            Self::Constant(c) => f.write_str(c.symbol()),
            Self::OpenParen => f.write_str("("),
            Self::CloseParen => f.write_str(")"),
        }
    }
}

/// Returns the nesting balance (opens minus closes) of a token sequence
#[must_use]
pub fn paren_balance(tokens: &[Token]) -> usize {
    tokens.iter().fold(0usize, |depth, token| match token {
        Token::OpenParen => depth + 1,
        Token::CloseParen => depth.saturating_sub(1),
        _ => depth,
    })
}
