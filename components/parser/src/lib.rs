//! A JavaScript tokenizer and recursive-descent parser.
//!
//! The scanner produces one token of lookahead; speculative lookahead is
//! taken by cloning the scanner. The parser builds the AST in a single
//! pass, tracking scopes as it goes so redeclaration and reserved-word
//! errors are raised at the offending position.
//!
//! Entry points:
//! - [`parse`] - a whole script or module
//! - [`parse_expression_at`] - a single expression starting at a byte
//!   offset
//! - [`tokenize`] - a lazy iterator over tokens

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::collections::HashMap;
use std::mem;

use tracing::debug;

mod charset;
mod expression;
mod lval;
pub mod node;
pub mod options;
mod regex;
pub mod scanner;
mod scope;
mod statement;
pub mod token;

pub use node::{Expression, Pattern, Program, Statement};
pub use options::{AllowReserved, EcmaVersion, Options, SourceType};
pub use scanner::Scanner;
pub use syntax_core::{Comment, ErrorKind, ParseError, Position, Span};
pub use token::{Keyword, Punct, Token, TokenKind, TokenValue};

use scope::ScopeTracker;

/// Parse a complete program.
///
/// The source type and language version come from `options`. Errors carry
/// the position of the offending token, which for deferred module checks
/// (an exported name never declared) is the first reference.
pub fn parse(source: &str, options: Options) -> Result<Program, ParseError> {
    debug!(len = source.len(), source_type = ?options.source_type, "parse");
    let mut parser = Parser::new(source, options)?;
    parser.parse_top_level()
}

/// Parse a single expression starting at byte `offset`.
///
/// Input after the expression is left unconsumed and not validated.
pub fn parse_expression_at(
    source: &str,
    offset: usize,
    options: Options,
) -> Result<Expression, ParseError> {
    debug!(offset, "parse expression");
    let mut parser = Parser::new_at(source, options, offset)?;
    parser.parse_expression(false)
}

/// Tokenize the source lazily.
///
/// The iterator yields each token in order, ends with the EOF token, and
/// fuses after EOF or the first error.
pub fn tokenize(source: &str, options: Options) -> Tokenizer<'_> {
    Tokenizer {
        scanner: Scanner::new(source, options.ecma_version, options.source_type),
        options,
        done: false,
    }
}

/// Lazy token stream produced by [`tokenize`].
pub struct Tokenizer<'s> {
    scanner: Scanner<'s>,
    options: Options,
    done: bool,
}

impl<'s> Iterator for Tokenizer<'s> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.scanner.next_token() {
            Ok(token) => {
                if let Some(on_comment) = self.options.on_comment.as_mut() {
                    for comment in self.scanner.take_comments() {
                        on_comment(&comment);
                    }
                }
                if let Some(on_token) = self.options.on_token.as_mut() {
                    on_token(&token);
                }
                if token.kind == TokenKind::Eof {
                    self.done = true;
                }
                Some(Ok(token))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// An active label, named or synthesized for a loop or switch body.
#[derive(Debug, Clone)]
pub(crate) struct Label {
    pub(crate) name: Option<String>,
    pub(crate) kind: LabelKind,
}

/// What `break`/`continue` may target through a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LabelKind {
    None,
    Loop,
    Switch,
}

/// Private names of one class body: declarations with accessor pairing
/// bits, and uses not yet matched to a declaration.
#[derive(Debug, Default)]
pub(crate) struct ClassPrivates {
    pub(crate) declared: Vec<(String, u8)>,
    pub(crate) used: Vec<(String, Position)>,
}

/// The parser state. One token of lookahead is held in `cur`; `prev` is
/// kept only for its end position and newline flag.
pub(crate) struct Parser<'s> {
    pub(crate) source: &'s str,
    pub(crate) options: Options,
    pub(crate) scanner: Scanner<'s>,
    pub(crate) cur: Token,
    pub(crate) prev: Token,
    pub(crate) scopes: ScopeTracker,
    pub(crate) strict: bool,
    pub(crate) labels: Vec<Label>,
    pub(crate) private_names: Vec<ClassPrivates>,
    pub(crate) exports: HashMap<String, Position>,
    /// Offset where an expression began that may still turn out to be an
    /// arrow function's parameter list.
    pub(crate) potential_arrow_at: usize,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str, options: Options) -> Result<Self, ParseError> {
        Parser::new_at(source, options, 0)
    }

    fn new_at(source: &'s str, options: Options, offset: usize) -> Result<Self, ParseError> {
        let mut scanner = Scanner::new(source, options.ecma_version, options.source_type);
        if offset > 0 {
            scanner.advance_to(offset);
        }
        let in_module = options.source_type == SourceType::Module;
        let placeholder = Token {
            kind: TokenKind::Eof,
            value: TokenValue::None,
            span: Span::empty(scanner.position()),
            newline_before: false,
        };
        let mut parser = Parser {
            source,
            options,
            scanner,
            cur: placeholder.clone(),
            prev: placeholder,
            scopes: ScopeTracker::new(in_module),
            strict: in_module,
            labels: Vec::new(),
            private_names: Vec::new(),
            exports: HashMap::new(),
            potential_arrow_at: usize::MAX,
        };
        parser.scanner.strict = parser.strict;
        parser.next()?;
        Ok(parser)
    }

    /// Advance to the next token, reporting it and any skipped comments
    /// through the callbacks.
    pub(crate) fn next(&mut self) -> Result<(), ParseError> {
        let token = self.scanner.next_token()?;
        if let Some(on_comment) = self.options.on_comment.as_mut() {
            for comment in self.scanner.take_comments() {
                on_comment(&comment);
            }
        }
        if let Some(on_token) = self.options.on_token.as_mut() {
            on_token(&token);
        }
        self.prev = mem::replace(&mut self.cur, token);
        Ok(())
    }

    /// The token after `cur`, scanned on a throwaway clone of the
    /// scanner.
    pub(crate) fn peek_token(&self) -> Result<Token, ParseError> {
        let mut ahead = self.scanner.clone();
        ahead.next_token()
    }

    pub(crate) fn at_punct(&self, p: Punct) -> bool {
        self.cur.kind == TokenKind::Punct(p)
    }

    pub(crate) fn eat_punct(&mut self, p: Punct) -> Result<bool, ParseError> {
        if self.at_punct(p) {
            self.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(crate) fn expect_punct(&mut self, p: Punct) -> Result<(), ParseError> {
        if self.eat_punct(p)? {
            return Ok(());
        }
        Err(self.unexpected())
    }

    pub(crate) fn eat_keyword(&mut self, kw: Keyword) -> Result<bool, ParseError> {
        if self.cur.kind == TokenKind::Keyword(kw) {
            self.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub(crate) fn expect_keyword(&mut self, kw: Keyword) -> Result<(), ParseError> {
        if self.eat_keyword(kw)? {
            return Ok(());
        }
        Err(self.unexpected())
    }

    /// Consume an unescaped contextual keyword.
    pub(crate) fn eat_contextual(&mut self, word: &str) -> Result<bool, ParseError> {
        if self.cur.is_contextual(word) {
            self.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// True where automatic semicolon insertion applies.
    pub(crate) fn can_insert_semicolon(&self) -> bool {
        self.cur.newline_before
            || self.cur.kind == TokenKind::Eof
            || self.at_punct(Punct::RBrace)
    }

    /// Consume a statement terminator, inserting one where the grammar
    /// allows.
    pub(crate) fn semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat_punct(Punct::Semi)? || self.can_insert_semicolon() {
            return Ok(());
        }
        Err(self.unexpected())
    }

    /// True where `await` is an operator: async functions, and module top
    /// level from ES2022.
    pub(crate) fn can_await(&self) -> bool {
        if self.scopes.in_async() {
            return true;
        }
        self.options.ecma_version >= EcmaVersion::Es2022
            && self.options.source_type == SourceType::Module
            && !self.scopes.in_function()
    }

    /// Flip strict mode for the parser and the scanner together.
    pub(crate) fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
        self.scanner.strict = strict;
    }

    /// Span of a node that started at `start` and ended with the previous
    /// token.
    pub(crate) fn node_span(&self, start: Position) -> Span {
        self.maybe_zero_span(Span { start, end: self.prev.span.end })
    }

    /// Drop line/column info from node spans when positions are not
    /// tracked. Error positions always keep it.
    pub(crate) fn maybe_zero_span(&self, span: Span) -> Span {
        if self.options.track_positions {
            return span;
        }
        let strip = |p: Position| Position { offset: p.offset, line: 0, column: 0 };
        Span { start: strip(span.start), end: strip(span.end) }
    }

    pub(crate) fn err_at(
        &self,
        kind: ErrorKind,
        message: impl Into<String>,
        pos: Position,
    ) -> ParseError {
        ParseError::new(kind, message.into(), pos)
    }

    /// Error for the current token appearing where it cannot.
    pub(crate) fn unexpected(&self) -> ParseError {
        let message = if self.cur.kind == TokenKind::Eof {
            "Unexpected end of input".to_string()
        } else {
            format!("Unexpected token: {}", self.cur.kind.describe())
        };
        self.err_at(ErrorKind::Syntax, message, self.cur.span.start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(source: &str) -> Result<Program, ParseError> {
        parse(source, Options::default())
    }

    fn module(source: &str) -> Result<Program, ParseError> {
        let options = Options {
            source_type: SourceType::Module,
            ..Options::default()
        };
        parse(source, options)
    }

    #[test]
    fn test_parse_simple_script() {
        let program = script("var x = 1;").unwrap();
        assert_eq!(program.body.len(), 1);
        assert_eq!(program.source_type, SourceType::Script);
        assert_eq!(program.span.end.offset, 10);
    }

    #[test]
    fn test_parse_expression_at_offset() {
        let expr = parse_expression_at("let x = a + b", 8, Options::default()).unwrap();
        assert!(matches!(expr, Expression::BinaryExpression { .. }));
        assert_eq!(expr.span().start.offset, 8);
    }

    #[test]
    fn test_tokenize_ends_with_eof() {
        let tokens: Vec<_> = tokenize("a + b", Options::default())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[3].kind, TokenKind::Eof);
    }

    #[test]
    fn test_tokenize_fuses_after_error() {
        let mut stream = tokenize("'unterminated", Options::default());
        assert!(matches!(stream.next(), Some(Err(_))));
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_token_callback_sees_every_token() {
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = seen.clone();
        let options = Options {
            on_token: Some(Box::new(move |t: &Token| sink.borrow_mut().push(t.kind))),
            ..Options::default()
        };
        parse("a; b;", options).unwrap();
        // a ; b ; eof
        assert_eq!(seen.borrow().len(), 5);
    }

    #[test]
    fn test_comment_callback() {
        let count = std::rc::Rc::new(std::cell::RefCell::new(0));
        let sink = count.clone();
        let options = Options {
            on_comment: Some(Box::new(move |_c: &Comment| *sink.borrow_mut() += 1)),
            ..Options::default()
        };
        parse("// one\nvar x; /* two */", options).unwrap();
        assert_eq!(*count.borrow(), 2);
    }

    #[test]
    fn test_module_strict_by_default() {
        assert!(module("with (a) {}").is_err());
        assert!(script("with (a) {}").is_ok());
    }

    #[test]
    fn test_track_positions_off_zeroes_lines() {
        let options = Options {
            track_positions: false,
            ..Options::default()
        };
        let program = parse("x;\ny;", options).unwrap();
        let span = program.body[1].span();
        assert_eq!(span.start.offset, 3);
        assert_eq!(span.start.line, 0);
    }

    #[test]
    fn test_error_positions_always_tracked() {
        let options = Options {
            track_positions: false,
            ..Options::default()
        };
        let err = parse("x;\n)", options).unwrap_err();
        assert_eq!(err.pos.line, 2);
    }
}
