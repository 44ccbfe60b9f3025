//! Positioned parse errors.
//!
//! A [`ParseError`] is the only failure representation that crosses the
//! parser component boundary. It carries the error category, a
//! human-readable message, and the exact source position of the offending
//! construct.

use crate::Position;
use serde::Serialize;
use thiserror::Error;

/// Category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// Invalid character sequence at the lexical level
    /// (unterminated literal, bad escape, unexpected character)
    Lexical,
    /// Token stream violates the grammar
    /// (unexpected token, missing required clause)
    Syntax,
    /// Illegal binding (duplicate declaration, reserved word misuse)
    Binding,
    /// Grammar violation inside a regular-expression literal body
    Regex,
}

/// A parse error with its exact source position.
///
/// # Examples
///
/// ```
/// use syntax_core::{ErrorKind, ParseError, Position};
///
/// let err = ParseError {
///     kind: ErrorKind::Syntax,
///     message: "Unexpected token".to_string(),
///     pos: Position { offset: 4, line: 1, column: 4 },
/// };
/// assert_eq!(err.to_string(), "Unexpected token (1:4)");
/// ```
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{message} ({}:{})", pos.line, pos.column)]
pub struct ParseError {
    /// Error category
    pub kind: ErrorKind,
    /// Human-readable message
    pub message: String,
    /// Where the error occurred
    pub pos: Position,
}

impl ParseError {
    /// Create a new error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>, pos: Position) -> Self {
        ParseError {
            kind,
            message: message.into(),
            pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_location() {
        let err = ParseError::new(
            ErrorKind::Lexical,
            "Unterminated string",
            Position { offset: 10, line: 3, column: 2 },
        );
        assert_eq!(err.to_string(), "Unterminated string (3:2)");
    }

    #[test]
    fn test_error_kind_comparison() {
        let err = ParseError::new(ErrorKind::Binding, "dup", Position::start());
        assert_eq!(err.kind, ErrorKind::Binding);
        assert_ne!(err.kind, ErrorKind::Syntax);
    }
}
