//! Regular expression literal validation.
//!
//! The scanner hands the raw pattern and flag text here after finding the
//! closing slash. Validation is purely syntactic: patterns are checked
//! against the regular expression grammar for the configured language
//! version but never compiled or executed.
//!
//! Validation runs in two passes. The first walks the raw pattern to count
//! capturing groups and collect group names, since backreferences may
//! precede the groups they refer to. The second parses the full grammar
//! and checks references against what the first pass found.

use syntax_core::{ErrorKind, ParseError, Position};
use tracing::trace;

use crate::charset;
use crate::options::EcmaVersion;

/// Validates regular expression literals.
#[derive(Debug)]
pub struct RegExpValidator {
    ecma_version: EcmaVersion,
}

/// Parse state for a single pattern.
struct PatternState<'a> {
    ecma_version: EcmaVersion,
    pattern: &'a str,
    chars: Vec<char>,
    pos: usize,
    /// Error position for the whole literal (the opening slash).
    at: Position,
    /// `u` flag: exact grammar, no annex B fallbacks.
    unicode: bool,
    /// Named-group semantics: `u` flag set or any named group present.
    named_mode: bool,
    group_count: u32,
    group_names: Vec<String>,
}

impl RegExpValidator {
    /// Create a validator for the given language version.
    pub fn new(ecma_version: EcmaVersion) -> Self {
        RegExpValidator { ecma_version }
    }

    /// Validate a regex literal's pattern and flags.
    ///
    /// `at` is the position of the literal's opening slash, used for all
    /// reported errors.
    pub fn validate(&self, pattern: &str, flags: &str, at: Position) -> Result<(), ParseError> {
        trace!(pattern, flags, "validate regex");
        self.validate_flags(pattern, flags, at)?;
        let unicode = flags.contains('u');

        let mut state = PatternState {
            ecma_version: self.ecma_version,
            pattern,
            chars: pattern.chars().collect(),
            pos: 0,
            at,
            unicode,
            named_mode: unicode,
            group_count: 0,
            group_names: Vec::new(),
        };
        state.collect_groups()?;
        state.named_mode = unicode || !state.group_names.is_empty();
        state.pos = 0;
        state.parse_pattern()
    }

    fn validate_flags(&self, pattern: &str, flags: &str, at: Position) -> Result<(), ParseError> {
        let mut seen = Vec::new();
        for flag in flags.chars() {
            let min_version = match flag {
                'g' | 'i' | 'm' => EcmaVersion::Es5,
                'u' | 'y' => EcmaVersion::Es2015,
                's' => EcmaVersion::Es2018,
                'd' => EcmaVersion::Es2022,
                _ => {
                    return Err(regex_error(
                        pattern,
                        format!("Invalid regular expression flag '{flag}'"),
                        at,
                    ));
                }
            };
            if self.ecma_version < min_version {
                return Err(regex_error(
                    pattern,
                    format!("Invalid regular expression flag '{flag}'"),
                    at,
                ));
            }
            if seen.contains(&flag) {
                return Err(regex_error(pattern, format!("Duplicate flag '{flag}'"), at));
            }
            seen.push(flag);
        }
        Ok(())
    }
}

fn regex_error(pattern: &str, message: String, at: Position) -> ParseError {
    ParseError::new(
        ErrorKind::Regex,
        format!("Invalid regular expression: /{pattern}/: {message}"),
        at,
    )
}

impl PatternState<'_> {
    fn error(&self, message: impl Into<String>) -> ParseError {
        regex_error(self.pattern, message.into(), self.at)
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn nth(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.current() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// First pass: count capturing groups and record group names.
    fn collect_groups(&mut self) -> Result<(), ParseError> {
        let mut in_class = false;
        while let Some(ch) = self.current() {
            match ch {
                '\\' => {
                    self.advance();
                    self.advance();
                }
                '[' if !in_class => {
                    in_class = true;
                    self.advance();
                }
                ']' if in_class => {
                    in_class = false;
                    self.advance();
                }
                '(' if !in_class => {
                    self.advance();
                    if self.current() != Some('?') {
                        self.group_count += 1;
                    } else if self.nth(1) == Some('<')
                        && self.nth(2) != Some('=')
                        && self.nth(2) != Some('!')
                    {
                        self.group_count += 1;
                        self.advance();
                        self.advance();
                        let name = self.parse_group_name()?;
                        if self.group_names.contains(&name) {
                            return Err(self.error("Duplicate capture group name"));
                        }
                        self.group_names.push(name);
                    }
                }
                _ => self.advance(),
            }
        }
        Ok(())
    }

    /// `<name>` body after `(?<`, cursor left past the closing `>`.
    fn parse_group_name(&mut self) -> Result<String, ParseError> {
        let mut name = String::new();
        match self.current() {
            Some(ch) if charset::is_id_start(ch) => {
                name.push(ch);
                self.advance();
            }
            _ => return Err(self.error("Invalid capture group name")),
        }
        while let Some(ch) = self.current() {
            if ch == '>' {
                self.advance();
                return Ok(name);
            }
            if !charset::is_id_continue(ch) {
                break;
            }
            name.push(ch);
            self.advance();
        }
        Err(self.error("Invalid capture group name"))
    }

    fn parse_pattern(&mut self) -> Result<(), ParseError> {
        self.parse_disjunction()?;
        match self.current() {
            None => Ok(()),
            Some(')') => Err(self.error("Unmatched ')'")),
            Some(']') | Some('}') if self.unicode => Err(self.error("Lone quantifier brackets")),
            Some(ch) => Err(self.error(format!("Unexpected character '{ch}'"))),
        }
    }

    fn parse_disjunction(&mut self) -> Result<(), ParseError> {
        self.parse_alternative()?;
        while self.eat('|') {
            self.parse_alternative()?;
        }
        Ok(())
    }

    fn parse_alternative(&mut self) -> Result<(), ParseError> {
        while let Some(ch) = self.current() {
            if ch == '|' || ch == ')' {
                break;
            }
            self.parse_term()?;
        }
        Ok(())
    }

    fn parse_term(&mut self) -> Result<(), ParseError> {
        // Quantifier with nothing before it
        if matches!(self.current(), Some('*') | Some('+') | Some('?')) {
            return Err(self.error("Nothing to repeat"));
        }
        if self.current() == Some('{') && self.braced_quantifier_ahead() {
            return Err(self.error("Nothing to repeat"));
        }

        let quantifiable = self.parse_assertion_or_atom()?;
        if self.quantifier_follows() {
            if !quantifiable {
                return Err(self.error("Nothing to repeat"));
            }
            self.parse_quantifier()?;
        }
        Ok(())
    }

    fn quantifier_follows(&self) -> bool {
        match self.current() {
            Some('*') | Some('+') | Some('?') => true,
            Some('{') => self.braced_quantifier_ahead(),
            _ => false,
        }
    }

    /// Whether the cursor sits on a complete `{n}`, `{n,}` or `{n,m}`.
    fn braced_quantifier_ahead(&self) -> bool {
        let mut i = 1;
        let mut digits = 0;
        while let Some(ch) = self.nth(i) {
            if ch.is_ascii_digit() {
                digits += 1;
                i += 1;
            } else {
                break;
            }
        }
        if digits == 0 {
            return false;
        }
        if self.nth(i) == Some(',') {
            i += 1;
            while let Some(ch) = self.nth(i) {
                if ch.is_ascii_digit() {
                    i += 1;
                } else {
                    break;
                }
            }
        }
        self.nth(i) == Some('}')
    }

    fn parse_quantifier(&mut self) -> Result<(), ParseError> {
        match self.current() {
            Some('*') | Some('+') | Some('?') => self.advance(),
            Some('{') => {
                self.advance();
                let min = self.parse_decimal();
                let max = if self.eat(',') {
                    if self.current() == Some('}') { None } else { Some(self.parse_decimal()) }
                } else {
                    Some(min)
                };
                // braced_quantifier_ahead guarantees the closing brace
                self.eat('}');
                if let Some(max) = max {
                    if min > max {
                        return Err(self.error("numbers out of order in {} quantifier"));
                    }
                }
            }
            _ => {}
        }
        // Lazy marker
        self.eat('?');
        Ok(())
    }

    fn parse_decimal(&mut self) -> u64 {
        let mut value: u64 = 0;
        while let Some(ch) = self.current() {
            if let Some(d) = ch.to_digit(10) {
                value = value.saturating_mul(10).saturating_add(u64::from(d));
                self.advance();
            } else {
                break;
            }
        }
        value
    }

    /// Parses one assertion or atom; returns whether a quantifier may
    /// follow it.
    fn parse_assertion_or_atom(&mut self) -> Result<bool, ParseError> {
        match self.current() {
            Some('^') | Some('$') => {
                self.advance();
                Ok(false)
            }
            Some('\\') if matches!(self.nth(1), Some('b') | Some('B')) => {
                self.advance();
                self.advance();
                Ok(false)
            }
            Some('(') if self.nth(1) == Some('?') && self.lookaround_ahead() => {
                self.parse_lookaround()
            }
            _ => {
                self.parse_atom()?;
                Ok(true)
            }
        }
    }

    fn lookaround_ahead(&self) -> bool {
        match self.nth(2) {
            Some('=') | Some('!') => true,
            Some('<') => matches!(self.nth(3), Some('=') | Some('!')),
            _ => false,
        }
    }

    fn parse_lookaround(&mut self) -> Result<bool, ParseError> {
        self.advance(); // (
        self.advance(); // ?
        let behind = self.current() == Some('<');
        if behind {
            if self.ecma_version < EcmaVersion::Es2018 {
                return Err(self.error("Invalid group"));
            }
            self.advance();
        }
        self.advance(); // = or !
        self.parse_disjunction()?;
        if !self.eat(')') {
            return Err(self.error("Unterminated group"));
        }
        // Lookaheads tolerate a quantifier outside unicode mode;
        // lookbehinds never do.
        Ok(!behind && !self.unicode)
    }

    fn parse_atom(&mut self) -> Result<(), ParseError> {
        match self.current() {
            Some('.') => {
                self.advance();
                Ok(())
            }
            Some('(') => self.parse_group(),
            Some('[') => self.parse_character_class(),
            Some('\\') => self.parse_atom_escape(),
            Some(']') | Some('{') | Some('}') if self.unicode => {
                Err(self.error("Lone quantifier brackets"))
            }
            Some(ch) if ch != '*' && ch != '+' && ch != '?' && ch != ')' && ch != '|' => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error("Invalid atom")),
        }
    }

    fn parse_group(&mut self) -> Result<(), ParseError> {
        self.advance(); // (
        if self.eat('?') {
            if self.eat(':') {
                // non-capturing
            } else if self.eat('<') {
                if self.ecma_version < EcmaVersion::Es2018 {
                    return Err(self.error("Invalid group"));
                }
                // Names were validated and recorded in the first pass
                self.parse_group_name()?;
            } else {
                return Err(self.error("Invalid group"));
            }
        }
        self.parse_disjunction()?;
        if !self.eat(')') {
            return Err(self.error("Unterminated group"));
        }
        Ok(())
    }

    fn parse_atom_escape(&mut self) -> Result<(), ParseError> {
        self.advance(); // backslash
        let ch = match self.current() {
            Some(ch) => ch,
            None => return Err(self.error("\\ at end of pattern")),
        };
        match ch {
            '1'..='9' => {
                let n = self.parse_decimal();
                // Outside unicode mode an oversized backreference falls
                // back to a legacy octal escape.
                if self.unicode && n > u64::from(self.group_count) {
                    return Err(self.error("Invalid escape"));
                }
                Ok(())
            }
            'k' => {
                self.advance();
                if !self.named_mode {
                    // Plain identity escape when no named groups exist
                    return Ok(());
                }
                if !self.eat('<') {
                    return Err(self.error("Invalid named reference"));
                }
                let name = self.parse_group_name()?;
                if !self.group_names.contains(&name) {
                    return Err(self.error("Invalid named capture referenced"));
                }
                Ok(())
            }
            'p' | 'P' => {
                self.advance();
                if self.unicode {
                    if self.ecma_version < EcmaVersion::Es2018 {
                        return Err(self.error("Invalid escape"));
                    }
                    self.parse_unicode_property()
                } else {
                    // Identity escape outside unicode mode
                    Ok(())
                }
            }
            _ => self.parse_character_escape(false).map(|_| ()),
        }
    }

    /// `\p{Name}` or `\p{Name=Value}` body. Property names are checked
    /// for shape only, not against the Unicode property registry.
    fn parse_unicode_property(&mut self) -> Result<(), ParseError> {
        if !self.eat('{') {
            return Err(self.error("Invalid property name"));
        }
        let mut saw_name = false;
        while let Some(ch) = self.current() {
            if ch == '}' {
                break;
            }
            if ch.is_ascii_alphanumeric() || ch == '_' || ch == '=' {
                saw_name = true;
                self.advance();
            } else {
                return Err(self.error("Invalid property name"));
            }
        }
        if !saw_name || !self.eat('}') {
            return Err(self.error("Invalid property name"));
        }
        Ok(())
    }

    /// Single-character escapes valid both in atoms and inside character
    /// classes. Returns the escaped code point where one is known.
    fn parse_character_escape(&mut self, in_class: bool) -> Result<Option<u32>, ParseError> {
        let ch = match self.current() {
            Some(ch) => ch,
            None => return Err(self.error("\\ at end of pattern")),
        };
        match ch {
            'f' => { self.advance(); Ok(Some(0x0C)) }
            'n' => { self.advance(); Ok(Some(0x0A)) }
            'r' => { self.advance(); Ok(Some(0x0D)) }
            't' => { self.advance(); Ok(Some(0x09)) }
            'v' => { self.advance(); Ok(Some(0x0B)) }
            'b' if in_class => { self.advance(); Ok(Some(0x08)) }
            'c' => {
                self.advance();
                match self.current() {
                    Some(l) if l.is_ascii_alphabetic() => {
                        self.advance();
                        Ok(Some(l as u32 % 32))
                    }
                    _ if self.unicode => Err(self.error("Invalid escape")),
                    // Legacy: the backslash matches literally
                    _ => Ok(Some('\\' as u32)),
                }
            }
            '0' => {
                self.advance();
                if self.unicode && matches!(self.current(), Some(d) if d.is_ascii_digit()) {
                    return Err(self.error("Invalid decimal escape"));
                }
                // Legacy octal continues past the zero outside unicode mode
                while !self.unicode
                    && matches!(self.current(), Some(d) if ('0'..='7').contains(&d))
                {
                    self.advance();
                }
                Ok(Some(0))
            }
            '1'..='9' if in_class => {
                if self.unicode {
                    return Err(self.error("Invalid class escape"));
                }
                // Legacy octal escape
                self.parse_decimal();
                Ok(None)
            }
            'x' => {
                self.advance();
                match self.parse_hex(2) {
                    Some(v) => Ok(Some(v)),
                    None if self.unicode => Err(self.error("Invalid escape")),
                    None => Ok(Some('x' as u32)),
                }
            }
            'u' => {
                self.advance();
                self.parse_unicode_escape()
            }
            'd' | 'D' | 's' | 'S' | 'w' | 'W' => {
                self.advance();
                // Class escape, not a single code point
                Ok(None)
            }
            _ => {
                if self.unicode {
                    let syntax = matches!(
                        ch,
                        '^' | '$' | '\\' | '.' | '*' | '+' | '?' | '(' | ')' | '[' | ']'
                            | '{' | '}' | '|' | '/'
                    );
                    let class_extra = in_class && ch == '-';
                    if !syntax && !class_extra {
                        return Err(self.error("Invalid escape"));
                    }
                }
                self.advance();
                Ok(Some(ch as u32))
            }
        }
    }

    fn parse_hex(&mut self, digits: usize) -> Option<u32> {
        let mut value = 0u32;
        for i in 0..digits {
            let d = self.nth(i)?.to_digit(16)?;
            value = value * 16 + d;
        }
        self.pos += digits;
        Some(value)
    }

    /// Escape body after `\u`.
    fn parse_unicode_escape(&mut self) -> Result<Option<u32>, ParseError> {
        if self.unicode && self.eat('{') {
            let start = self.pos;
            let mut value = 0u32;
            while let Some(d) = self.current().and_then(|c| c.to_digit(16)) {
                value = value.saturating_mul(16).saturating_add(d);
                self.advance();
            }
            if self.pos == start || !self.eat('}') || value > 0x10FFFF {
                return Err(self.error("Invalid unicode escape"));
            }
            return Ok(Some(value));
        }
        match self.parse_hex(4) {
            Some(lead) => {
                // Combine surrogate pairs in unicode mode
                if self.unicode
                    && (0xD800..0xDC00).contains(&lead)
                    && self.current() == Some('\\')
                    && self.nth(1) == Some('u')
                {
                    let save = self.pos;
                    self.pos += 2;
                    match self.parse_hex(4) {
                        Some(trail) if (0xDC00..0xE000).contains(&trail) => {
                            let combined =
                                0x10000 + ((lead - 0xD800) << 10) + (trail - 0xDC00);
                            return Ok(Some(combined));
                        }
                        _ => self.pos = save,
                    }
                }
                Ok(Some(lead))
            }
            None if self.unicode => Err(self.error("Invalid unicode escape")),
            None => Ok(Some('u' as u32)),
        }
    }

    fn parse_character_class(&mut self) -> Result<(), ParseError> {
        self.advance(); // [
        self.eat('^');
        loop {
            match self.current() {
                None => return Err(self.error("Unterminated character class")),
                Some(']') => {
                    self.advance();
                    return Ok(());
                }
                _ => {
                    let left = self.parse_class_atom()?;
                    if self.current() == Some('-')
                        && self.nth(1).is_some()
                        && self.nth(1) != Some(']')
                    {
                        self.advance();
                        let right = self.parse_class_atom()?;
                        match (left, right) {
                            (Some(a), Some(b)) => {
                                if a > b {
                                    return Err(self.error(
                                        "Range out of order in character class",
                                    ));
                                }
                            }
                            // A class escape as a range bound is only an
                            // error in unicode mode
                            _ if self.unicode => {
                                return Err(self.error("Invalid character class"));
                            }
                            _ => {}
                        }
                    }
                }
            }
        }
    }

    /// One class atom; `None` for multi-character class escapes.
    fn parse_class_atom(&mut self) -> Result<Option<u32>, ParseError> {
        match self.current() {
            Some('\\') => {
                self.advance();
                match self.current() {
                    Some('p') | Some('P') if self.unicode => {
                        if self.ecma_version < EcmaVersion::Es2018 {
                            return Err(self.error("Invalid escape"));
                        }
                        self.advance();
                        self.parse_unicode_property()?;
                        Ok(None)
                    }
                    _ => self.parse_character_escape(true),
                }
            }
            Some(ch) => {
                self.advance();
                Ok(Some(ch as u32))
            }
            None => Err(self.error("Unterminated character class")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(pattern: &str, flags: &str) -> Result<(), ParseError> {
        RegExpValidator::new(EcmaVersion::Es2022).validate(
            pattern,
            flags,
            Position::start(),
        )
    }

    fn check_at(pattern: &str, flags: &str, version: EcmaVersion) -> Result<(), ParseError> {
        RegExpValidator::new(version).validate(pattern, flags, Position::start())
    }

    #[test]
    fn test_simple_patterns() {
        assert!(check("abc", "").is_ok());
        assert!(check("a|b|c", "gi").is_ok());
        assert!(check("^a.b$", "m").is_ok());
        assert!(check("a{2,4}?", "").is_ok());
        assert!(check("(a(b))\\2", "").is_ok());
        assert!(check("[a-z0-9_-]+", "u").is_ok());
    }

    #[test]
    fn test_flag_validation() {
        assert!(check("a", "gimsuyd").is_ok());
        assert!(check("a", "gg").is_err());
        assert!(check("a", "x").is_err());
        assert!(check_at("a", "s", EcmaVersion::Es2015).is_err());
        assert!(check_at("a", "d", EcmaVersion::Es2021).is_err());
        assert!(check_at("a", "y", EcmaVersion::Es5).is_err());
    }

    #[test]
    fn test_nothing_to_repeat() {
        assert!(check("*a", "").is_err());
        assert!(check("a|*", "").is_err());
        assert!(check("{2}", "").is_err());
        assert!(check("(?=a)*", "").is_ok());
        assert!(check("(?=a)*", "u").is_err());
        assert!(check("(?<=a)*", "").is_err());
    }

    #[test]
    fn test_group_errors() {
        assert!(check("(a", "").is_err());
        assert!(check("a)", "").is_err());
        assert!(check("(?a)", "").is_err());
        assert!(check("(?:a)", "").is_ok());
    }

    #[test]
    fn test_backreferences() {
        assert!(check("(a)\\1", "u").is_ok());
        assert!(check("\\1(a)", "u").is_ok());
        assert!(check("(a)\\2", "u").is_err());
        // Legacy octal fallback outside unicode mode
        assert!(check("(a)\\2", "").is_ok());
    }

    #[test]
    fn test_named_groups() {
        assert!(check("(?<word>\\w+)\\k<word>", "").is_ok());
        assert!(check("\\k<later>(?<later>a)", "").is_ok());
        assert!(check("(?<a>x)(?<a>y)", "").is_err());
        assert!(check("(?<a>x)\\k<b>", "").is_err());
        assert!(check("(?<1a>x)", "").is_err());
        assert!(check_at("(?<a>x)", "", EcmaVersion::Es2017).is_err());
        // Bare \k is an identity escape when no named groups exist
        assert!(check("\\k", "").is_ok());
    }

    #[test]
    fn test_character_classes() {
        assert!(check("[abc]", "u").is_ok());
        assert!(check("[^a-z]", "u").is_ok());
        assert!(check("[a-", "").is_err());
        assert!(check("[z-a]", "").is_err());
        assert!(check("[\\d-z]", "u").is_err());
        assert!(check("[\\d-z]", "").is_ok());
        assert!(check("[\\b]", "u").is_ok());
    }

    #[test]
    fn test_unicode_mode_strictness() {
        assert!(check("a{", "").is_ok());
        assert!(check("a{", "u").is_err());
        assert!(check("]", "").is_ok());
        assert!(check("]", "u").is_err());
        assert!(check("\\q", "").is_ok());
        assert!(check("\\q", "u").is_err());
        assert!(check("\\/", "u").is_ok());
    }

    #[test]
    fn test_unicode_escapes() {
        assert!(check("\\u0041", "u").is_ok());
        assert!(check("\\u{1F600}", "u").is_ok());
        assert!(check("\\u{110000}", "u").is_err());
        assert!(check("\\uD83D\\uDE00", "u").is_ok());
        assert!(check("\\u00", "u").is_err());
        assert!(check("\\u00", "").is_ok());
    }

    #[test]
    fn test_property_escapes() {
        assert!(check("\\p{Letter}", "u").is_ok());
        assert!(check("\\p{Script=Greek}", "u").is_ok());
        assert!(check("\\p{}", "u").is_err());
        assert!(check("\\p{Le tter}", "u").is_err());
        assert!(check_at("\\p{Letter}", "u", EcmaVersion::Es2017).is_err());
        // Identity escape outside unicode mode
        assert!(check("\\p{Letter}", "").is_ok());
    }

    #[test]
    fn test_lookbehind_gate() {
        assert!(check("(?<=a)b", "").is_ok());
        assert!(check("(?<!a)b", "").is_ok());
        assert!(check_at("(?<=a)b", "", EcmaVersion::Es2017).is_err());
    }

    #[test]
    fn test_quantifier_order() {
        assert!(check("a{4,2}", "").is_err());
        assert!(check("a{2,4}", "").is_ok());
        assert!(check("a{2,}", "").is_ok());
    }

    #[test]
    fn test_error_message_shape() {
        let err = check("(a", "").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Regex);
        assert!(err.message.starts_with("Invalid regular expression: /(a/:"));
    }
}
