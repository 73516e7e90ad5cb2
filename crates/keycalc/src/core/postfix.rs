//! Infix to postfix conversion (shunting-yard)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::token::paren_balance;
use crate::core::{CalcError, CalcResult, Function, Operator, Token};

/// One entry of a postfix sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PostfixItem {
    /// Literal or substituted constant
    Value(f64),
    /// Binary operator
    Operator(Operator),
    /// Unary function
    Function(Function),
}

impl fmt::Display for PostfixItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Operator(op) => write!(f, "{}", op.ascii()),
            Self::Function(func) => f.write_str(func.name()),
        }
    }
}

/// Operator stack entry
#[derive(Debug, Clone, Copy)]
enum StackEntry {
    Operator(Operator),
    Function(Function),
    OpenParen,
}

impl StackEntry {
    const fn into_item(self) -> Option<PostfixItem> {
        match self {
            Self::Operator(op) => Some(PostfixItem::Operator(op)),
            Self::Function(func) => Some(PostfixItem::Function(func)),
            Self::OpenParen => None,
        }
    }

    /// Whether this entry leaves the stack before `incoming` is pushed
    fn yields_to(self, incoming: Operator) -> bool {
        match self {
            Self::OpenParen => false,
            Self::Function(_) => true,
            Self::Operator(top) if incoming.is_right_associative() => {
                top.precedence() > incoming.precedence()
            }
            Self::Operator(top) => top.precedence() >= incoming.precedence(),
        }
    }
}

/// Prepares a token sequence for conversion
///
/// Trailing operators, functions and open parens are stripped, then every
/// still-open group is closed. Fails when nothing evaluable remains.
pub fn finalize(mut tokens: Vec<Token>) -> CalcResult<Vec<Token>> {
    while tokens.last().is_some_and(Token::is_dangling) {
        tokens.pop();
    }
    if tokens.is_empty() {
        return Err(CalcError::malformed("nothing to evaluate"));
    }

    let unclosed = paren_balance(&tokens);
    tokens.extend(std::iter::repeat(Token::CloseParen).take(unclosed));
    Ok(tokens)
}

/// Converts an infix token sequence to postfix
///
/// Constants are replaced by their value. A function is emitted right
/// after the group it opened is closed.
pub fn to_postfix(tokens: &[Token]) -> CalcResult<Vec<PostfixItem>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<StackEntry> = Vec::new();

    for token in tokens {
        match token {
            Token::Number(literal) => output.push(PostfixItem::Value(parse_literal(literal)?)),
            Token::Constant(constant) => output.push(PostfixItem::Value(constant.value())),
            Token::Function(func) => stack.push(StackEntry::Function(*func)),
            Token::OpenParen => stack.push(StackEntry::OpenParen),
            Token::Operator(op) => {
                while stack.last().is_some_and(|top| top.yields_to(*op)) {
                    if let Some(item) = stack.pop().and_then(StackEntry::into_item) {
                        output.push(item);
                    }
                }
                stack.push(StackEntry::Operator(*op));
            }
            Token::CloseParen => {
                while let Some(entry) = stack.pop() {
                    match entry.into_item() {
                        Some(item) => output.push(item),
                        None => break,
                    }
                }
                if let Some(StackEntry::Function(func)) = stack.last().copied() {
                    stack.pop();
                    output.push(PostfixItem::Function(func));
                }
            }
        }
    }

    // Unmatched open parens are dropped here.
    output.extend(stack.into_iter().rev().filter_map(StackEntry::into_item));

    tracing::trace!(postfix = %describe(&output), "converted to postfix");
    Ok(output)
}

/// Renders a postfix sequence as space-separated text
#[must_use]
pub fn describe(items: &[PostfixItem]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_literal(literal: &str) -> CalcResult<f64> {
    literal
        .parse::<f64>()
        .map_err(|_| CalcError::malformed(format!("invalid number literal '{literal}'")))
}
