//! Source positions and spans.

use serde::Serialize;

/// A position in source text.
///
/// Lines are 1-based and columns 0-based, matching the convention of the
/// reference tooling this parser feeds into. The offset is a byte offset
/// into the source string and always lands on a UTF-8 character boundary.
///
/// # Examples
///
/// ```
/// use syntax_core::Position;
///
/// let pos = Position { offset: 6, line: 2, column: 1 };
/// assert_eq!(pos.line, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// Byte offset from the start of the source
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (0-based, counted in characters)
    pub column: u32,
}

impl Position {
    /// The position of the first character of a source file.
    pub fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 0,
        }
    }
}

/// A half-open source range: `start` is the first character of the
/// construct, `end` is one past its last character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Start of the range
    pub start: Position,
    /// One past the end of the range
    pub end: Position,
}

impl Span {
    /// Span covering a single position (used for empty constructs).
    pub fn empty(at: Position) -> Self {
        Span { start: at, end: at }
    }

    /// True if `other` is fully contained within this span.
    pub fn contains(&self, other: &Span) -> bool {
        self.start.offset <= other.start.offset && other.end.offset <= self.end.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_start() {
        let pos = Position::start();
        assert_eq!(pos.offset, 0);
        assert_eq!(pos.line, 1);
        assert_eq!(pos.column, 0);
    }

    #[test]
    fn test_span_contains() {
        let outer = Span {
            start: Position { offset: 0, line: 1, column: 0 },
            end: Position { offset: 10, line: 1, column: 10 },
        };
        let inner = Span {
            start: Position { offset: 2, line: 1, column: 2 },
            end: Position { offset: 8, line: 1, column: 8 },
        };
        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
    }

    #[test]
    fn test_span_serializes() {
        let span = Span::empty(Position::start());
        let json = serde_json::to_string(&span).unwrap();
        assert!(json.contains("\"offset\":0"));
    }
}
