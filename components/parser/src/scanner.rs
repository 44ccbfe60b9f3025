//! Single-pass scanner.
//!
//! The scanner walks the source exactly once and hands out one token at a
//! time. It never looks at parser state; the ambiguities that depend on
//! grammatical position (regex vs. division, block vs. object literal,
//! template chunks) are resolved with a small stack of token contexts
//! that is updated after every token from the token kinds alone.
//!
//! The cursor is a byte offset into the source, so any token's raw text
//! can be recovered by slicing with its span.

use num_bigint::BigInt;
use syntax_core::{Comment, ErrorKind, ParseError, Position, Span};
use tracing::trace;

use crate::charset;
use crate::options::{EcmaVersion, SourceType};
use crate::regex::RegExpValidator;
use crate::token::{Keyword, Punct, Token, TokenKind, TokenValue};

/// One frame of the scanner's context stack.
///
/// The stack encodes just enough grammatical position for the scanner to
/// stay self-contained: which braces open blocks, which open object
/// literals, and where template text resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenContext {
    /// `{` opening a block
    StatementBlock,
    /// `{` opening an object literal
    ExpressionBlock,
    /// `${` inside a template
    TemplateBrace,
    /// `(` after `if`/`for`/`while`/`with`
    StatementParens,
    /// Any other `(`
    ExpressionParens,
    /// Inside a template literal; text is read verbatim
    Template,
    /// `function` in statement position
    FunctionStatement,
    /// `function` in expression position
    FunctionExpression,
    /// Generator `function*` in expression position
    FunctionExpressionGenerator,
    /// Generator `function*` in statement position
    FunctionGenerator,
}

impl TokenContext {
    fn is_expr(self) -> bool {
        matches!(
            self,
            TokenContext::ExpressionBlock
                | TokenContext::ExpressionParens
                | TokenContext::Template
                | TokenContext::FunctionExpression
                | TokenContext::FunctionExpressionGenerator
        )
    }

    fn is_function(self) -> bool {
        matches!(
            self,
            TokenContext::FunctionStatement
                | TokenContext::FunctionExpression
                | TokenContext::FunctionExpressionGenerator
                | TokenContext::FunctionGenerator
        )
    }
}

/// Result of decoding one escape sequence.
enum Escape {
    /// A decoded code point
    Char(char),
    /// Line continuation; contributes nothing
    Skip,
    /// Invalid sequence, tolerated only in template chunks
    Invalid,
}

/// The tokenizer. Cheap to clone, which is how the parser takes
/// speculative lookahead without disturbing the main cursor.
#[derive(Clone)]
pub struct Scanner<'s> {
    source: &'s str,
    ecma_version: EcmaVersion,
    in_module: bool,
    /// Strict mode affects legacy octal forms; flipped by the parser when
    /// it enters strict code.
    pub strict: bool,
    pos: usize,
    line: u32,
    col: u32,
    /// Whether the next `/` starts a regex rather than division.
    expr_allowed: bool,
    context: Vec<TokenContext>,
    prev_kind: Option<TokenKind>,
    saw_newline: bool,
    comments: Vec<Comment>,
}

impl<'s> Scanner<'s> {
    /// Create a scanner positioned at the start of `source`.
    pub fn new(source: &'s str, ecma_version: EcmaVersion, source_type: SourceType) -> Self {
        let in_module = source_type == SourceType::Module;
        Scanner {
            source,
            ecma_version,
            in_module,
            strict: in_module,
            pos: 0,
            line: 1,
            col: 0,
            expr_allowed: true,
            context: vec![TokenContext::StatementBlock],
            prev_kind: None,
            saw_newline: false,
            comments: Vec::new(),
        }
    }

    /// Current cursor position.
    pub fn position(&self) -> Position {
        Position { offset: self.pos, line: self.line, column: self.col }
    }

    /// Comments skipped since the last drain, in source order.
    pub fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    /// Move the cursor forward to a byte offset, counting lines on the
    /// way. The text skipped over is not tokenized.
    pub fn advance_to(&mut self, offset: usize) {
        while self.pos < offset {
            if self.next_char().is_none() {
                break;
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        match ch {
            '\n' | '\u{2028}' | '\u{2029}' => {
                self.line += 1;
                self.col = 0;
            }
            '\r' => {
                // CRLF counts as a single terminator
                if self.peek() == Some('\n') {
                    self.col += 1;
                } else {
                    self.line += 1;
                    self.col = 0;
                }
            }
            _ => self.col += 1,
        }
        Some(ch)
    }

    /// Advance over `n` bytes of known-ASCII text.
    fn advance_ascii(&mut self, n: usize) {
        self.pos += n;
        self.col += n as u32;
    }

    fn starts_with(&self, text: &str) -> bool {
        self.source[self.pos..].starts_with(text)
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>, pos: Position) -> ParseError {
        ParseError::new(kind, message.into(), pos)
    }

    fn lex_error(&self, message: impl Into<String>, pos: Position) -> ParseError {
        self.error(ErrorKind::Lexical, message, pos)
    }

    fn cur_context(&self) -> Option<TokenContext> {
        self.context.last().copied()
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        if self.cur_context() == Some(TokenContext::Template) {
            return self.read_template_token();
        }
        self.skip_space()?;
        let start = self.position();
        let Some(ch) = self.peek() else {
            return Ok(self.finish_token(TokenKind::Eof, TokenValue::None, start));
        };
        self.read_token(ch, start)
    }

    fn read_token(&mut self, ch: char, start: Position) -> Result<Token, ParseError> {
        match ch {
            '0'..='9' => self.read_number(start, false),
            '"' | '\'' => self.read_string(ch, start),
            '/' => {
                if self.expr_allowed {
                    self.read_regex(start)
                } else if self.peek_at(1) == Some('=') {
                    Ok(self.finish_punct(Punct::SlashEq, start))
                } else {
                    Ok(self.finish_punct(Punct::Slash, start))
                }
            }
            '`' => {
                if self.ecma_version < EcmaVersion::Es2015 {
                    return Err(self.lex_error("Unexpected character '`'", start));
                }
                Ok(self.finish_punct(Punct::BackQuote, start))
            }
            '#' => self.read_private_name(start),
            '.' => {
                if matches!(self.peek_at(1), Some(d) if d.is_ascii_digit()) {
                    self.read_number(start, true)
                } else if self.peek_at(1) == Some('.')
                    && self.peek_at(2) == Some('.')
                    && self.ecma_version >= EcmaVersion::Es2015
                {
                    Ok(self.finish_punct(Punct::Ellipsis, start))
                } else {
                    Ok(self.finish_punct(Punct::Dot, start))
                }
            }
            '(' => Ok(self.finish_punct(Punct::LParen, start)),
            ')' => Ok(self.finish_punct(Punct::RParen, start)),
            '[' => Ok(self.finish_punct(Punct::LBracket, start)),
            ']' => Ok(self.finish_punct(Punct::RBracket, start)),
            '{' => Ok(self.finish_punct(Punct::LBrace, start)),
            '}' => Ok(self.finish_punct(Punct::RBrace, start)),
            ';' => Ok(self.finish_punct(Punct::Semi, start)),
            ',' => Ok(self.finish_punct(Punct::Comma, start)),
            ':' => Ok(self.finish_punct(Punct::Colon, start)),
            '~' => Ok(self.finish_punct(Punct::Tilde, start)),
            '?' => Ok(self.read_question(start)),
            '=' => {
                let p = if self.starts_with("===") {
                    Punct::EqEqEq
                } else if self.starts_with("==") {
                    Punct::EqEq
                } else if self.starts_with("=>") && self.ecma_version >= EcmaVersion::Es2015 {
                    Punct::Arrow
                } else {
                    Punct::Eq
                };
                Ok(self.finish_punct(p, start))
            }
            '!' => {
                let p = if self.starts_with("!==") {
                    Punct::NotEqEq
                } else if self.starts_with("!=") {
                    Punct::NotEq
                } else {
                    Punct::Not
                };
                Ok(self.finish_punct(p, start))
            }
            '<' => {
                let p = if self.starts_with("<<=") {
                    Punct::LtLtEq
                } else if self.starts_with("<<") {
                    Punct::LtLt
                } else if self.starts_with("<=") {
                    Punct::LtEq
                } else {
                    Punct::Lt
                };
                Ok(self.finish_punct(p, start))
            }
            '>' => {
                let p = if self.starts_with(">>>=") {
                    Punct::GtGtGtEq
                } else if self.starts_with(">>>") {
                    Punct::GtGtGt
                } else if self.starts_with(">>=") {
                    Punct::GtGtEq
                } else if self.starts_with(">>") {
                    Punct::GtGt
                } else if self.starts_with(">=") {
                    Punct::GtEq
                } else {
                    Punct::Gt
                };
                Ok(self.finish_punct(p, start))
            }
            '&' => {
                let p = if self.starts_with("&&=") && self.ecma_version >= EcmaVersion::Es2021 {
                    Punct::AndAndEq
                } else if self.starts_with("&&") {
                    Punct::AndAnd
                } else if self.starts_with("&=") {
                    Punct::AndEq
                } else {
                    Punct::And
                };
                Ok(self.finish_punct(p, start))
            }
            '|' => {
                let p = if self.starts_with("||=") && self.ecma_version >= EcmaVersion::Es2021 {
                    Punct::OrOrEq
                } else if self.starts_with("||") {
                    Punct::OrOr
                } else if self.starts_with("|=") {
                    Punct::OrEq
                } else {
                    Punct::Or
                };
                Ok(self.finish_punct(p, start))
            }
            '^' => {
                let p = if self.starts_with("^=") { Punct::XorEq } else { Punct::Xor };
                Ok(self.finish_punct(p, start))
            }
            '+' => {
                let p = if self.starts_with("++") {
                    Punct::PlusPlus
                } else if self.starts_with("+=") {
                    Punct::PlusEq
                } else {
                    Punct::Plus
                };
                Ok(self.finish_punct(p, start))
            }
            '-' => {
                let p = if self.starts_with("--") {
                    Punct::MinusMinus
                } else if self.starts_with("-=") {
                    Punct::MinusEq
                } else {
                    Punct::Minus
                };
                Ok(self.finish_punct(p, start))
            }
            '*' => {
                let p = if self.starts_with("**=") && self.ecma_version >= EcmaVersion::Es2016 {
                    Punct::StarStarEq
                } else if self.starts_with("**") && self.ecma_version >= EcmaVersion::Es2016 {
                    Punct::StarStar
                } else if self.starts_with("*=") {
                    Punct::StarEq
                } else {
                    Punct::Star
                };
                Ok(self.finish_punct(p, start))
            }
            '%' => {
                let p = if self.starts_with("%=") { Punct::PercentEq } else { Punct::Percent };
                Ok(self.finish_punct(p, start))
            }
            _ if charset::is_id_start(ch) || ch == '\\' => self.read_word(start),
            _ => Err(self.lex_error(format!("Unexpected character '{ch}'"), start)),
        }
    }

    fn read_question(&mut self, start: Position) -> Token {
        if self.ecma_version >= EcmaVersion::Es2020 {
            if self.starts_with("?.")
                && !matches!(self.peek_at(2), Some(d) if d.is_ascii_digit())
            {
                // `x?.3:y` keeps `?.` out so the conditional still parses
                return self.finish_punct(Punct::QuestionDot, start);
            }
            if self.starts_with("??=") && self.ecma_version >= EcmaVersion::Es2021 {
                return self.finish_punct(Punct::CoalesceEq, start);
            }
            if self.starts_with("??") {
                return self.finish_punct(Punct::Coalesce, start);
            }
        }
        self.finish_punct(Punct::Question, start)
    }

    fn finish_punct(&mut self, p: Punct, start: Position) -> Token {
        self.advance_ascii(p.as_str().len());
        self.finish_token(TokenKind::Punct(p), TokenValue::None, start)
    }

    fn finish_token(&mut self, kind: TokenKind, value: TokenValue, start: Position) -> Token {
        let token = Token {
            kind,
            value,
            span: Span { start, end: self.position() },
            newline_before: std::mem::take(&mut self.saw_newline),
        };
        trace!(kind = ?token.kind, offset = start.offset, "token");
        let prev = self.prev_kind;
        self.update_context(prev, &token);
        self.prev_kind = Some(kind);
        token
    }

    // Whitespace and comments

    fn skip_space(&mut self) -> Result<(), ParseError> {
        loop {
            match self.peek() {
                Some(ch) if charset::is_whitespace(ch) => {
                    self.next_char();
                }
                Some(ch) if charset::is_line_terminator(ch) => {
                    self.saw_newline = true;
                    self.next_char();
                }
                Some('/') if self.peek_at(1) == Some('/') => self.skip_line_comment(2),
                Some('/') if self.peek_at(1) == Some('*') => self.skip_block_comment()?,
                Some('<') if !self.in_module && self.starts_with("<!--") => {
                    self.skip_line_comment(4);
                }
                Some('-')
                    if !self.in_module
                        && self.starts_with("-->")
                        && (self.saw_newline || self.prev_kind.is_none()) =>
                {
                    self.skip_line_comment(3);
                }
                Some('#') if self.pos == 0 && self.peek_at(1) == Some('!') => {
                    self.skip_line_comment(2);
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line_comment(&mut self, prefix: usize) {
        let start = self.position();
        self.advance_ascii(prefix);
        let text_start = self.pos;
        while let Some(ch) = self.peek() {
            if charset::is_line_terminator(ch) {
                break;
            }
            self.next_char();
        }
        let text = self.source[text_start..self.pos].to_string();
        self.comments.push(Comment {
            text,
            block: false,
            span: Span { start, end: self.position() },
        });
    }

    fn skip_block_comment(&mut self) -> Result<(), ParseError> {
        let start = self.position();
        self.advance_ascii(2);
        let text_start = self.pos;
        loop {
            match self.peek() {
                None => return Err(self.lex_error("Unterminated comment", start)),
                Some('*') if self.peek_at(1) == Some('/') => {
                    let text = self.source[text_start..self.pos].to_string();
                    self.advance_ascii(2);
                    self.comments.push(Comment {
                        text,
                        block: true,
                        span: Span { start, end: self.position() },
                    });
                    return Ok(());
                }
                Some(ch) => {
                    if charset::is_line_terminator(ch) {
                        self.saw_newline = true;
                    }
                    self.next_char();
                }
            }
        }
    }

    // Words and names

    fn read_word(&mut self, start: Position) -> Result<Token, ParseError> {
        let (word, escaped) = self.read_word_text(start)?;
        if !escaped {
            if let Some(kw) = Keyword::from_word(&word) {
                return Ok(self.finish_token(TokenKind::Keyword(kw), TokenValue::None, start));
            }
        }
        Ok(self.finish_token(
            TokenKind::Name,
            TokenValue::Name { name: word, escaped },
            start,
        ))
    }

    fn read_word_text(&mut self, start: Position) -> Result<(String, bool), ParseError> {
        let mut word = String::new();
        let mut escaped = false;
        let mut first = true;
        loop {
            match self.peek() {
                Some(ch)
                    if (first && charset::is_id_start(ch))
                        || (!first && charset::is_id_continue(ch)) =>
                {
                    word.push(ch);
                    self.next_char();
                }
                Some('\\') => {
                    escaped = true;
                    let esc_start = self.position();
                    self.next_char();
                    if self.peek() != Some('u') {
                        return Err(self.lex_error(
                            "Expecting Unicode escape sequence \\uXXXX",
                            esc_start,
                        ));
                    }
                    self.next_char();
                    let code = self.read_code_point(esc_start)?;
                    let ch = char::from_u32(code)
                        .ok_or_else(|| self.lex_error("Invalid Unicode escape", esc_start))?;
                    let valid = if first {
                        charset::is_id_start(ch)
                    } else {
                        charset::is_id_continue(ch)
                    };
                    if !valid {
                        return Err(self.lex_error("Invalid Unicode escape", esc_start));
                    }
                    word.push(ch);
                }
                _ => break,
            }
            first = false;
        }
        if word.is_empty() {
            return Err(self.lex_error("Unexpected character", start));
        }
        Ok((word, escaped))
    }

    /// `XXXX` or `{...}` after `\u`.
    fn read_code_point(&mut self, at: Position) -> Result<u32, ParseError> {
        if self.peek() == Some('{') {
            if self.ecma_version < EcmaVersion::Es2015 {
                return Err(self.lex_error("Invalid Unicode escape", at));
            }
            self.next_char();
            let mut value: u32 = 0;
            let mut any = false;
            while let Some(d) = self.peek().and_then(|c| c.to_digit(16)) {
                value = value.saturating_mul(16).saturating_add(d);
                any = true;
                self.next_char();
            }
            if !any || self.peek() != Some('}') || value > 0x10FFFF {
                return Err(self.lex_error("Invalid Unicode escape", at));
            }
            self.next_char();
            return Ok(value);
        }
        self.read_hex(4)
            .ok_or_else(|| self.lex_error("Invalid Unicode escape", at))
    }

    fn read_hex(&mut self, digits: usize) -> Option<u32> {
        let mut value = 0u32;
        for i in 0..digits {
            let d = self.peek_at(i)?.to_digit(16)?;
            value = value * 16 + d;
        }
        self.advance_ascii(digits);
        Some(value)
    }

    fn read_private_name(&mut self, start: Position) -> Result<Token, ParseError> {
        if self.ecma_version < EcmaVersion::Es2022 {
            return Err(self.lex_error("Unexpected character '#'", start));
        }
        self.next_char();
        match self.peek() {
            Some(ch) if charset::is_id_start(ch) || ch == '\\' => {}
            _ => return Err(self.lex_error("Invalid private name", start)),
        }
        let (word, escaped) = self.read_word_text(start)?;
        Ok(self.finish_token(
            TokenKind::PrivateName,
            TokenValue::Name { name: word, escaped },
            start,
        ))
    }

    // Numbers

    fn read_number(&mut self, start: Position, starts_with_dot: bool) -> Result<Token, ParseError> {
        if !starts_with_dot && self.peek() == Some('0') {
            match self.peek_at(1) {
                Some('x') | Some('X') => return self.read_radix_number(start, 16),
                Some('o') | Some('O') if self.ecma_version >= EcmaVersion::Es2015 => {
                    return self.read_radix_number(start, 8);
                }
                Some('b') | Some('B') if self.ecma_version >= EcmaVersion::Es2015 => {
                    return self.read_radix_number(start, 2);
                }
                Some(d) if d.is_ascii_digit() => return self.read_legacy_octal(start),
                _ => {}
            }
        }

        let mut digits = String::new();
        let mut is_integer = true;
        if starts_with_dot {
            digits.push('.');
            self.next_char();
            self.read_digits(10, &mut digits, start)?;
            is_integer = false;
        } else {
            self.read_digits(10, &mut digits, start)?;
            if self.peek() == Some('.') {
                digits.push('.');
                self.next_char();
                self.read_digits(10, &mut digits, start)?;
                is_integer = false;
            }
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            digits.push('e');
            self.next_char();
            if matches!(self.peek(), Some('+') | Some('-')) {
                digits.push(self.peek().unwrap_or('+'));
                self.next_char();
            }
            let before = digits.len();
            self.read_digits(10, &mut digits, start)?;
            if digits.len() == before {
                return Err(self.lex_error("Invalid number", start));
            }
            is_integer = false;
        }

        if self.peek() == Some('n') && self.ecma_version >= EcmaVersion::Es2020 {
            if !is_integer {
                return Err(self.lex_error("Invalid BigInt literal", start));
            }
            self.next_char();
            self.check_no_id_after_number(start)?;
            let value = BigInt::parse_bytes(digits.as_bytes(), 10)
                .ok_or_else(|| self.lex_error("Invalid BigInt literal", start))?;
            return Ok(self.finish_token(TokenKind::BigInt, TokenValue::BigInt(value), start));
        }

        self.check_no_id_after_number(start)?;
        let value: f64 = digits
            .parse()
            .map_err(|_| self.lex_error("Invalid number", start))?;
        Ok(self.finish_token(TokenKind::Number, TokenValue::Number(value), start))
    }

    fn read_radix_number(&mut self, start: Position, radix: u32) -> Result<Token, ParseError> {
        self.advance_ascii(2); // 0x / 0o / 0b
        let mut digits = String::new();
        self.read_digits(radix, &mut digits, start)?;
        if digits.is_empty() {
            return Err(self.lex_error("Invalid number", start));
        }
        if self.peek() == Some('n') && self.ecma_version >= EcmaVersion::Es2020 {
            self.next_char();
            self.check_no_id_after_number(start)?;
            let value = BigInt::parse_bytes(digits.as_bytes(), radix)
                .ok_or_else(|| self.lex_error("Invalid BigInt literal", start))?;
            return Ok(self.finish_token(TokenKind::BigInt, TokenValue::BigInt(value), start));
        }
        self.check_no_id_after_number(start)?;
        let mut value = 0f64;
        for ch in digits.chars() {
            // read_digits only accepts digits of this radix
            let d = ch.to_digit(radix).unwrap_or(0);
            value = value * f64::from(radix) + f64::from(d);
        }
        Ok(self.finish_token(TokenKind::Number, TokenValue::Number(value), start))
    }

    fn read_legacy_octal(&mut self, start: Position) -> Result<Token, ParseError> {
        if self.strict {
            return Err(self.lex_error("Invalid number", start));
        }
        let digit_start = self.pos;
        while matches!(self.peek(), Some(d) if d.is_ascii_digit()) {
            self.next_char();
        }
        let text = &self.source[digit_start..self.pos];
        if text.contains('8') || text.contains('9') || matches!(self.peek(), Some('.') | Some('e') | Some('E'))
        {
            // Not octal after all; reparse the tail as decimal
            let mut digits = text.to_string();
            if self.peek() == Some('.') {
                digits.push('.');
                self.next_char();
                self.read_digits(10, &mut digits, start)?;
            }
            if matches!(self.peek(), Some('e') | Some('E')) {
                digits.push('e');
                self.next_char();
                if matches!(self.peek(), Some('+') | Some('-')) {
                    digits.push(self.peek().unwrap_or('+'));
                    self.next_char();
                }
                let before = digits.len();
                self.read_digits(10, &mut digits, start)?;
                if digits.len() == before {
                    return Err(self.lex_error("Invalid number", start));
                }
            }
            self.check_no_id_after_number(start)?;
            let value: f64 = digits
                .parse()
                .map_err(|_| self.lex_error("Invalid number", start))?;
            return Ok(self.finish_token(TokenKind::Number, TokenValue::Number(value), start));
        }
        self.check_no_id_after_number(start)?;
        let mut value = 0f64;
        for ch in text.chars() {
            value = value * 8.0 + f64::from(ch.to_digit(8).unwrap_or(0));
        }
        Ok(self.finish_token(TokenKind::Number, TokenValue::Number(value), start))
    }

    /// Reads digits of `radix` into `buf`, enforcing separator placement.
    fn read_digits(
        &mut self,
        radix: u32,
        buf: &mut String,
        start: Position,
    ) -> Result<(), ParseError> {
        let mut any = buf.ends_with(|c: char| c.is_ascii_digit());
        let mut last_sep = false;
        loop {
            match self.peek() {
                Some('_') if self.ecma_version >= EcmaVersion::Es2021 => {
                    if !any || last_sep {
                        return Err(self.lex_error("Invalid numeric separator", start));
                    }
                    last_sep = true;
                    self.next_char();
                }
                Some(ch) if ch.to_digit(radix).is_some() => {
                    buf.push(ch);
                    any = true;
                    last_sep = false;
                    self.next_char();
                }
                _ => break,
            }
        }
        if last_sep {
            return Err(self.lex_error("Invalid numeric separator", start));
        }
        Ok(())
    }

    fn check_no_id_after_number(&self, start: Position) -> Result<(), ParseError> {
        if let Some(ch) = self.peek() {
            if charset::is_id_start(ch) || ch.is_ascii_digit() {
                return Err(self.lex_error("Identifier directly after number", start));
            }
        }
        Ok(())
    }

    // Strings and templates

    fn read_string(&mut self, quote: char, start: Position) -> Result<Token, ParseError> {
        self.next_char();
        let mut out = String::new();
        loop {
            let Some(ch) = self.peek() else {
                return Err(self.lex_error("Unterminated string constant", start));
            };
            if ch == quote {
                self.next_char();
                break;
            }
            if charset::is_line_terminator(ch) {
                return Err(self.lex_error("Unterminated string constant", start));
            }
            if ch == '\\' {
                match self.read_escape(false, start)? {
                    Escape::Char(c) => out.push(c),
                    Escape::Skip => {}
                    // read_escape raises in string mode
                    Escape::Invalid => {
                        return Err(self.lex_error("Invalid escape sequence", start));
                    }
                }
            } else {
                out.push(ch);
                self.next_char();
            }
        }
        Ok(self.finish_token(TokenKind::Str, TokenValue::Str(out), start))
    }

    /// Reads the token at the cursor inside a template literal: the
    /// closing backquote, a `${`, or a chunk of template text.
    fn read_template_token(&mut self) -> Result<Token, ParseError> {
        let start = self.position();
        match self.peek() {
            None => Err(self.lex_error("Unterminated template", start)),
            Some('`') => Ok(self.finish_punct(Punct::BackQuote, start)),
            Some('$') if self.peek_at(1) == Some('{') => {
                Ok(self.finish_punct(Punct::DollarBraceL, start))
            }
            Some(_) => {
                let mut cooked = Some(String::new());
                loop {
                    match self.peek() {
                        None => {
                            return Err(self.lex_error("Unterminated template", start));
                        }
                        Some('`') => break,
                        Some('$') if self.peek_at(1) == Some('{') => break,
                        Some('\\') => match self.read_escape(true, start)? {
                            Escape::Char(c) => {
                                if let Some(text) = cooked.as_mut() {
                                    text.push(c);
                                }
                            }
                            Escape::Skip => {}
                            Escape::Invalid => cooked = None,
                        },
                        Some('\r') => {
                            // Raw and cooked text both normalize CRLF
                            self.next_char();
                            if self.peek() == Some('\n') {
                                self.next_char();
                            }
                            if let Some(text) = cooked.as_mut() {
                                text.push('\n');
                            }
                        }
                        Some(ch) => {
                            self.next_char();
                            if let Some(text) = cooked.as_mut() {
                                text.push(ch);
                            }
                        }
                    }
                }
                Ok(self.finish_token(TokenKind::Template, TokenValue::Template { cooked }, start))
            }
        }
    }

    /// Decodes one escape sequence, cursor at the backslash. In template
    /// mode invalid sequences are reported as [`Escape::Invalid`] rather
    /// than raised, since they are legal in tagged templates.
    fn read_escape(&mut self, in_template: bool, start: Position) -> Result<Escape, ParseError> {
        let invalid = |this: &Self, msg: &str| -> Result<Escape, ParseError> {
            if in_template {
                Ok(Escape::Invalid)
            } else {
                Err(this.lex_error(msg.to_string(), start))
            }
        };

        self.next_char(); // backslash
        let Some(ch) = self.peek() else {
            return Err(self.lex_error(
                if in_template { "Unterminated template" } else { "Unterminated string constant" },
                start,
            ));
        };
        match ch {
            'n' => { self.next_char(); Ok(Escape::Char('\n')) }
            'r' => { self.next_char(); Ok(Escape::Char('\r')) }
            't' => { self.next_char(); Ok(Escape::Char('\t')) }
            'b' => { self.next_char(); Ok(Escape::Char('\u{8}')) }
            'v' => { self.next_char(); Ok(Escape::Char('\u{B}')) }
            'f' => { self.next_char(); Ok(Escape::Char('\u{C}')) }
            'x' => {
                self.next_char();
                match self.read_hex(2) {
                    Some(v) => Ok(Escape::Char(char::from_u32(v).unwrap_or('\u{FFFD}'))),
                    None => invalid(self, "Invalid hexadecimal escape sequence"),
                }
            }
            'u' => {
                self.next_char();
                let save = (self.pos, self.line, self.col);
                match self.read_unicode_escape_value() {
                    Some(code) => Ok(Escape::Char(decode_code_unit(code))),
                    None => {
                        (self.pos, self.line, self.col) = save;
                        invalid(self, "Invalid Unicode escape sequence")
                    }
                }
            }
            '0'..='7' => {
                if ch == '0' && !matches!(self.peek_at(1), Some(d) if d.is_ascii_digit()) {
                    self.next_char();
                    return Ok(Escape::Char('\0'));
                }
                if in_template || self.strict {
                    return invalid(self, "Octal literal in strict mode");
                }
                let mut value = 0u32;
                let mut count = 0;
                while count < 3 {
                    match self.peek() {
                        Some(d) if ('0'..='7').contains(&d) => {
                            let next = value * 8 + d.to_digit(8).unwrap_or(0);
                            if next > 0xFF {
                                break;
                            }
                            value = next;
                            count += 1;
                            self.next_char();
                        }
                        _ => break,
                    }
                }
                Ok(Escape::Char(char::from_u32(value).unwrap_or('\u{FFFD}')))
            }
            '8' | '9' => {
                if in_template || self.strict {
                    invalid(self, "Invalid escape sequence")
                } else {
                    self.next_char();
                    Ok(Escape::Char(ch))
                }
            }
            _ if charset::is_line_terminator(ch) => {
                self.next_char();
                if ch == '\r' && self.peek() == Some('\n') {
                    self.next_char();
                }
                Ok(Escape::Skip)
            }
            _ => {
                self.next_char();
                Ok(Escape::Char(ch))
            }
        }
    }

    /// `\uXXXX` (with surrogate pairing) or `\u{...}` value, cursor past
    /// the `u`. Returns `None` without a stable cursor on bad input.
    fn read_unicode_escape_value(&mut self) -> Option<u32> {
        if self.peek() == Some('{') && self.ecma_version >= EcmaVersion::Es2015 {
            self.next_char();
            let mut value: u32 = 0;
            let mut any = false;
            while let Some(d) = self.peek().and_then(|c| c.to_digit(16)) {
                value = value.saturating_mul(16).saturating_add(d);
                any = true;
                self.next_char();
            }
            if !any || self.peek() != Some('}') || value > 0x10FFFF {
                return None;
            }
            self.next_char();
            return Some(value);
        }
        let lead = self.read_hex(4)?;
        if (0xD800..0xDC00).contains(&lead) && self.starts_with("\\u") {
            let save = (self.pos, self.line, self.col);
            self.advance_ascii(2);
            match self.read_hex(4) {
                Some(trail) if (0xDC00..0xE000).contains(&trail) => {
                    return Some(0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00));
                }
                _ => (self.pos, self.line, self.col) = save,
            }
        }
        Some(lead)
    }

    // Regular expressions

    fn read_regex(&mut self, start: Position) -> Result<Token, ParseError> {
        self.next_char(); // opening slash
        let pattern_start = self.pos;
        let mut in_class = false;
        let mut escaped = false;
        loop {
            let Some(ch) = self.peek() else {
                return Err(self.lex_error("Unterminated regular expression", start));
            };
            if charset::is_line_terminator(ch) {
                return Err(self.lex_error("Unterminated regular expression", start));
            }
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '[' {
                in_class = true;
            } else if ch == ']' {
                in_class = false;
            } else if ch == '/' && !in_class {
                break;
            }
            self.next_char();
        }
        let pattern = self.source[pattern_start..self.pos].to_string();
        self.next_char(); // closing slash
        let flags_start = self.pos;
        while let Some(ch) = self.peek() {
            if ch == '\\' {
                return Err(self.lex_error("Invalid regular expression flag", self.position()));
            }
            if !charset::is_id_continue(ch) {
                break;
            }
            self.next_char();
        }
        let flags = self.source[flags_start..self.pos].to_string();
        RegExpValidator::new(self.ecma_version).validate(&pattern, &flags, start)?;
        Ok(self.finish_token(TokenKind::Regex, TokenValue::Regex { pattern, flags }, start))
    }

    // Context tracking

    fn in_generator_context(&self) -> bool {
        for ctx in self.context.iter().rev() {
            if ctx.is_function() {
                return matches!(
                    ctx,
                    TokenContext::FunctionGenerator | TokenContext::FunctionExpressionGenerator
                );
            }
        }
        false
    }

    /// Decide whether a `{` opens a block or an object literal.
    fn brace_is_block(&self, prev: Option<TokenKind>, newline_before: bool) -> bool {
        let parent = self.cur_context();
        if matches!(
            parent,
            Some(TokenContext::FunctionExpression) | Some(TokenContext::FunctionStatement)
        ) {
            return true;
        }
        let Some(prev) = prev else {
            // Start of input: statement position
            return true;
        };
        if prev == TokenKind::Punct(Punct::Colon)
            && matches!(
                parent,
                Some(TokenContext::StatementBlock) | Some(TokenContext::ExpressionBlock)
            )
        {
            return parent == Some(TokenContext::StatementBlock);
        }
        if prev == TokenKind::Keyword(Keyword::Return)
            || (prev == TokenKind::Name && self.expr_allowed)
        {
            return newline_before;
        }
        if matches!(
            prev,
            TokenKind::Keyword(Keyword::Else)
                | TokenKind::Punct(Punct::Semi)
                | TokenKind::Eof
                | TokenKind::Punct(Punct::RParen)
                | TokenKind::Punct(Punct::Arrow)
        ) {
            return true;
        }
        if prev == TokenKind::Punct(Punct::LBrace) {
            return parent == Some(TokenContext::StatementBlock);
        }
        if matches!(
            prev,
            TokenKind::Keyword(Keyword::Var) | TokenKind::Keyword(Keyword::Const) | TokenKind::Name
        ) {
            return false;
        }
        !self.expr_allowed
    }

    /// Update the context stack and `expr_allowed` after producing a token.
    fn update_context(&mut self, prev: Option<TokenKind>, token: &Token) {
        match token.kind {
            TokenKind::Punct(Punct::RParen) | TokenKind::Punct(Punct::RBrace) => {
                if self.context.len() == 1 {
                    self.expr_allowed = true;
                    return;
                }
                let mut out = self.context.pop().unwrap_or(TokenContext::StatementBlock);
                if out == TokenContext::StatementBlock
                    && matches!(self.cur_context(), Some(ctx) if ctx.is_function())
                {
                    out = self.context.pop().unwrap_or(TokenContext::StatementBlock);
                }
                self.expr_allowed = !out.is_expr();
            }
            TokenKind::Punct(Punct::LBrace) => {
                let block = self.brace_is_block(prev, token.newline_before);
                self.context.push(if block {
                    TokenContext::StatementBlock
                } else {
                    TokenContext::ExpressionBlock
                });
                self.expr_allowed = true;
            }
            TokenKind::Punct(Punct::DollarBraceL) => {
                self.context.push(TokenContext::TemplateBrace);
                self.expr_allowed = true;
            }
            TokenKind::Punct(Punct::LParen) => {
                let statement = matches!(
                    prev,
                    Some(TokenKind::Keyword(Keyword::If))
                        | Some(TokenKind::Keyword(Keyword::For))
                        | Some(TokenKind::Keyword(Keyword::With))
                        | Some(TokenKind::Keyword(Keyword::While))
                );
                self.context.push(if statement {
                    TokenContext::StatementParens
                } else {
                    TokenContext::ExpressionParens
                });
                self.expr_allowed = true;
            }
            TokenKind::Punct(Punct::PlusPlus) | TokenKind::Punct(Punct::MinusMinus) => {
                // Leaves expr_allowed untouched so `a++ / 2` divides
            }
            TokenKind::Keyword(Keyword::Function) | TokenKind::Keyword(Keyword::Class) => {
                let expression = match prev {
                    Some(p) if p.before_expr() => {
                        !(p == TokenKind::Keyword(Keyword::Else)
                            || (p == TokenKind::Punct(Punct::Semi)
                                && self.cur_context() != Some(TokenContext::StatementParens))
                            || (p == TokenKind::Keyword(Keyword::Return)
                                && token.newline_before)
                            || ((p == TokenKind::Punct(Punct::Colon)
                                || p == TokenKind::Punct(Punct::LBrace))
                                && self.cur_context() == Some(TokenContext::StatementBlock)))
                    }
                    _ => false,
                };
                self.context.push(if expression {
                    TokenContext::FunctionExpression
                } else {
                    TokenContext::FunctionStatement
                });
                self.expr_allowed = false;
            }
            TokenKind::Punct(Punct::BackQuote) => {
                if self.cur_context() == Some(TokenContext::Template) {
                    self.context.pop();
                } else {
                    self.context.push(TokenContext::Template);
                }
                self.expr_allowed = false;
            }
            TokenKind::Punct(Punct::Star)
                if prev == Some(TokenKind::Keyword(Keyword::Function)) =>
            {
                if let Some(top) = self.context.last_mut() {
                    *top = match *top {
                        TokenContext::FunctionExpression => {
                            TokenContext::FunctionExpressionGenerator
                        }
                        _ => TokenContext::FunctionGenerator,
                    };
                }
                self.expr_allowed = true;
            }
            TokenKind::Name => {
                let mut allowed = false;
                if self.ecma_version >= EcmaVersion::Es2015
                    && prev != Some(TokenKind::Punct(Punct::Dot))
                {
                    if (token.is_contextual("of") && !self.expr_allowed)
                        || (token.is_contextual("yield") && self.in_generator_context())
                    {
                        allowed = true;
                    }
                }
                self.expr_allowed = allowed;
            }
            kind => {
                if matches!(kind, TokenKind::Keyword(_))
                    && prev == Some(TokenKind::Punct(Punct::Dot))
                {
                    self.expr_allowed = false;
                } else {
                    self.expr_allowed = kind.before_expr();
                }
            }
        }
    }
}

/// Lone surrogate code units cannot live in a Rust string; they decode to
/// the replacement character.
fn decode_code_unit(code: u32) -> char {
    char::from_u32(code).unwrap_or('\u{FFFD}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<Token> {
        let mut scanner = Scanner::new(source, EcmaVersion::Es2022, SourceType::Script);
        let mut tokens = Vec::new();
        loop {
            let tok = scanner.next_token().expect("scan failure");
            let done = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if done {
                break;
            }
        }
        tokens
    }

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).into_iter().map(|t| t.kind).collect()
    }

    fn scan_err(source: &str) -> ParseError {
        let mut scanner = Scanner::new(source, EcmaVersion::Es2022, SourceType::Script);
        loop {
            match scanner.next_token() {
                Ok(tok) if tok.kind == TokenKind::Eof => panic!("expected an error"),
                Ok(_) => {}
                Err(err) => return err,
            }
        }
    }

    #[test]
    fn test_basic_statement() {
        let toks = kinds("var x = 42;");
        assert_eq!(
            toks,
            vec![
                TokenKind::Keyword(Keyword::Var),
                TokenKind::Name,
                TokenKind::Punct(Punct::Eq),
                TokenKind::Number,
                TokenKind::Punct(Punct::Semi),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_spans_and_raw() {
        let source = "let  total = 1;";
        let toks = scan(source);
        assert_eq!(toks[0].raw(source), "let");
        assert_eq!(toks[1].raw(source), "total");
        assert_eq!(toks[1].span.start.offset, 5);
        assert_eq!(toks[1].span.end.offset, 10);
    }

    #[test]
    fn test_line_and_column_tracking() {
        let toks = scan("a\nbb\r\n ccc");
        assert_eq!(toks[0].span.start.line, 1);
        assert_eq!(toks[1].span.start.line, 2);
        assert_eq!(toks[1].span.start.column, 0);
        assert_eq!(toks[2].span.start.line, 3);
        assert_eq!(toks[2].span.start.column, 1);
        assert!(toks[1].newline_before);
        assert!(toks[2].newline_before);
    }

    #[test]
    fn test_division_after_value() {
        let toks = scan("a / b");
        assert_eq!(toks[1].kind, TokenKind::Punct(Punct::Slash));
    }

    #[test]
    fn test_regex_after_operator() {
        let toks = scan("x = /ab+c/g");
        assert_eq!(toks[2].kind, TokenKind::Regex);
        assert!(matches!(
            &toks[2].value,
            TokenValue::Regex { pattern, flags } if pattern == "ab+c" && flags == "g"
        ));
    }

    #[test]
    fn test_regex_after_return_and_typeof() {
        assert_eq!(kinds("return /x/")[1], TokenKind::Regex);
        assert_eq!(kinds("typeof /x/")[1], TokenKind::Regex);
    }

    #[test]
    fn test_regex_after_block_division_after_object() {
        // Statement-position brace closes back into statement land
        let toks = scan("{} /re/g");
        assert_eq!(toks[2].kind, TokenKind::Regex);
        // Expression-position brace is an object literal
        let toks = scan("x = {} / 2");
        assert_eq!(toks[4].kind, TokenKind::Punct(Punct::Slash));
    }

    #[test]
    fn test_division_after_postfix() {
        let toks = scan("a++ / 2");
        assert_eq!(toks[2].kind, TokenKind::Punct(Punct::Slash));
    }

    #[test]
    fn test_regex_in_statement_parens() {
        let toks = scan("if (x) /re/.test(x)");
        assert_eq!(toks[4].kind, TokenKind::Regex);
    }

    #[test]
    fn test_regex_after_of() {
        let toks = scan("for (x of /re/) ;");
        assert_eq!(toks[4].kind, TokenKind::Regex);
    }

    #[test]
    fn test_regex_with_class_slash() {
        let toks = scan("x = /[/]/");
        assert!(matches!(
            &toks[2].value,
            TokenValue::Regex { pattern, .. } if pattern == "[/]"
        ));
    }

    #[test]
    fn test_unterminated_regex() {
        let err = scan_err("x = /unterminated");
        assert_eq!(err.kind, ErrorKind::Lexical);
        assert!(err.message.contains("Unterminated regular expression"));
        assert_eq!(err.pos.offset, 4);
    }

    #[test]
    fn test_template_token_sequence() {
        let toks = kinds("`a${b}c`");
        assert_eq!(
            toks,
            vec![
                TokenKind::Punct(Punct::BackQuote),
                TokenKind::Template,
                TokenKind::Punct(Punct::DollarBraceL),
                TokenKind::Name,
                TokenKind::Punct(Punct::RBrace),
                TokenKind::Template,
                TokenKind::Punct(Punct::BackQuote),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_empty_template_chunks() {
        // No empty chunk tokens between adjacent markers
        let toks = kinds("`${a}${b}`");
        assert_eq!(
            toks,
            vec![
                TokenKind::Punct(Punct::BackQuote),
                TokenKind::Punct(Punct::DollarBraceL),
                TokenKind::Name,
                TokenKind::Punct(Punct::RBrace),
                TokenKind::Punct(Punct::DollarBraceL),
                TokenKind::Name,
                TokenKind::Punct(Punct::RBrace),
                TokenKind::Punct(Punct::BackQuote),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_template_invalid_escape_cooks_to_none() {
        let toks = scan("`\\u{FFFFFF}`");
        assert!(matches!(
            &toks[1].value,
            TokenValue::Template { cooked: None }
        ));
    }

    #[test]
    fn test_nested_template() {
        let toks = kinds("`a${`b${c}`}d`");
        assert_eq!(toks.iter().filter(|k| **k == TokenKind::Template).count(), 4);
    }

    #[test]
    fn test_string_escapes() {
        let toks = scan(r#"'a\n\t\x41B\u{1F600}b'"#);
        assert!(matches!(
            &toks[0].value,
            TokenValue::Str(s) if s == "a\n\tAB\u{1F600}b"
        ));
    }

    #[test]
    fn test_string_line_continuation() {
        let toks = scan("'a\\\nb'");
        assert!(matches!(&toks[0].value, TokenValue::Str(s) if s == "ab"));
    }

    #[test]
    fn test_unterminated_string() {
        let err = scan_err("'abc\ndef'");
        assert!(err.message.contains("Unterminated string constant"));
        assert_eq!(err.pos.offset, 0);
    }

    #[test]
    fn test_numbers() {
        let values: Vec<f64> = scan("1 2.5 .5 1e3 0x10 0b101 0o17 1_000")
            .into_iter()
            .filter_map(|t| match t.value {
                TokenValue::Number(n) => Some(n),
                _ => None,
            })
            .collect();
        assert_eq!(values, vec![1.0, 2.5, 0.5, 1000.0, 16.0, 5.0, 15.0, 1000.0]);
    }

    #[test]
    fn test_legacy_octal() {
        let toks = scan("010");
        assert!(matches!(toks[0].value, TokenValue::Number(n) if n == 8.0));
        // 8 makes it decimal
        let toks = scan("018");
        assert!(matches!(toks[0].value, TokenValue::Number(n) if n == 18.0));
    }

    #[test]
    fn test_legacy_octal_rejected_in_strict() {
        let mut scanner = Scanner::new("010", EcmaVersion::Es2022, SourceType::Script);
        scanner.strict = true;
        assert!(scanner.next_token().is_err());
    }

    #[test]
    fn test_bigint() {
        let toks = scan("123n");
        assert_eq!(toks[0].kind, TokenKind::BigInt);
        assert!(matches!(
            &toks[0].value,
            TokenValue::BigInt(v) if *v == BigInt::from(123)
        ));
        assert!(scan_err("1.5n").message.contains("Invalid BigInt"));
    }

    #[test]
    fn test_identifier_after_number_rejected() {
        let err = scan_err("3in");
        assert!(err.message.contains("Identifier directly after number"));
    }

    #[test]
    fn test_numeric_separator_gate() {
        let mut scanner = Scanner::new("1_000", EcmaVersion::Es2020, SourceType::Script);
        // Pre-2021 the underscore is not part of the number
        let err = scanner.next_token().unwrap_err();
        assert!(err.message.contains("Identifier directly after number"));
    }

    #[test]
    fn test_maximal_munch() {
        assert_eq!(kinds("a >>>= b")[1], TokenKind::Punct(Punct::GtGtGtEq));
        assert_eq!(kinds("a ??= b")[1], TokenKind::Punct(Punct::CoalesceEq));
        assert_eq!(kinds("a ** b")[1], TokenKind::Punct(Punct::StarStar));
        assert_eq!(kinds("...x")[0], TokenKind::Punct(Punct::Ellipsis));
    }

    #[test]
    fn test_optional_chain_digit_carveout() {
        assert_eq!(kinds("a?.b")[1], TokenKind::Punct(Punct::QuestionDot));
        // `?.` followed by a digit stays a plain `?` for the conditional
        let toks = kinds("a?.3:b");
        assert_eq!(toks[1], TokenKind::Punct(Punct::Question));
        assert_eq!(toks[2], TokenKind::Number);
    }

    #[test]
    fn test_escaped_identifier() {
        let toks = scan("\\u0061bc");
        assert!(matches!(
            &toks[0].value,
            TokenValue::Name { name, escaped: true } if name == "abc"
        ));
    }

    #[test]
    fn test_escaped_keyword_scans_as_name() {
        let toks = scan("\\u0077hile");
        assert_eq!(toks[0].kind, TokenKind::Name);
        assert!(matches!(
            &toks[0].value,
            TokenValue::Name { name, escaped: true } if name == "while"
        ));
    }

    #[test]
    fn test_private_name() {
        let toks = scan("this.#secret");
        assert_eq!(toks[2].kind, TokenKind::PrivateName);
        assert!(matches!(&toks[2].value, TokenValue::Name { name, .. } if name == "secret"));
    }

    #[test]
    fn test_comments_collected() {
        let mut scanner = Scanner::new(
            "// line\nx /* block */ y",
            EcmaVersion::Es2022,
            SourceType::Script,
        );
        scanner.next_token().expect("x");
        scanner.next_token().expect("y");
        let comments = scanner.take_comments();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].text, " line");
        assert!(!comments[0].block);
        assert_eq!(comments[1].text, " block ");
        assert!(comments[1].block);
    }

    #[test]
    fn test_unterminated_block_comment() {
        let err = scan_err("/* never closed");
        assert!(err.message.contains("Unterminated comment"));
    }

    #[test]
    fn test_hashbang_skipped() {
        let toks = kinds("#!/usr/bin/env node\nlet x");
        assert_eq!(toks[0], TokenKind::Name);
    }

    #[test]
    fn test_unicode_identifier() {
        let toks = scan("let café = 1");
        assert!(matches!(&toks[1].value, TokenValue::Name { name, .. } if name == "café"));
    }

    #[test]
    fn test_astral_identifier() {
        let toks = scan("𐐷x = 1");
        assert_eq!(toks[0].kind, TokenKind::Name);
    }

    #[test]
    fn test_unexpected_character() {
        let err = scan_err("let @x");
        assert!(err.message.contains("Unexpected character"));
        assert_eq!(err.pos.offset, 4);
    }

    #[test]
    fn test_clone_lookahead_is_independent() {
        let mut scanner = Scanner::new("let x = 1", EcmaVersion::Es2022, SourceType::Script);
        scanner.next_token().expect("let");
        let mut ahead = scanner.clone();
        let peeked = ahead.next_token().expect("x");
        assert_eq!(peeked.kind, TokenKind::Name);
        // Main scanner is unmoved
        let next = scanner.next_token().expect("x");
        assert_eq!(next.span, peeked.span);
    }
}
