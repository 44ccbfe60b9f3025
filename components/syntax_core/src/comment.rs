//! Comment records reported through the scanner's comment callback.

use crate::Span;
use serde::Serialize;

/// A comment skipped by the scanner.
///
/// The text excludes the comment delimiters (`//`, `/*`, `*/`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    /// Comment text without delimiters
    pub text: String,
    /// True for `/* ... */`, false for `// ...`
    pub block: bool,
    /// Source range including the delimiters
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Position;

    #[test]
    fn test_comment_creation() {
        let comment = Comment {
            text: " note".to_string(),
            block: false,
            span: Span::empty(Position::start()),
        };
        assert!(!comment.block);
        assert_eq!(comment.text, " note");
    }
}
