//! Tokenizer-level tests through the public `tokenize` entry point
//!
//! Raw-text round trips, the regex-vs-division decision, and span
//! bookkeeping.

use parser::{tokenize, EcmaVersion, Options, ParseError, Punct, Token, TokenKind};

fn tokens(source: &str) -> Vec<Token> {
    tokenize(source, Options::default())
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    tokens(source).into_iter().map(|t| t.kind).collect()
}

fn tokenize_err(source: &str) -> ParseError {
    tokenize(source, Options::default())
        .collect::<Result<Vec<_>, _>>()
        .unwrap_err()
}

#[test]
fn test_raw_text_round_trip() {
    let source = "const answer = 40 + /* mid */ 2; // done";
    let toks = tokens(source);
    for tok in &toks {
        if tok.kind == TokenKind::Eof {
            continue;
        }
        let raw = tok.raw(source);
        assert!(!raw.is_empty());
        assert_eq!(&source[tok.span.start.offset..tok.span.end.offset], raw);
    }
    // Spans are ordered and non-overlapping
    for pair in toks.windows(2) {
        assert!(pair[0].span.end.offset <= pair[1].span.start.offset);
    }
}

#[test]
fn test_division_after_value_positions() {
    // After an identifier, a literal, a closing paren or bracket, and
    // a postfix update, `/` divides
    for src in ["a / b", "1 / 2", "(a) / b", "a[0] / b", "a++ / b"] {
        assert!(
            kinds(src).contains(&TokenKind::Punct(Punct::Slash)),
            "{src} should divide"
        );
    }
}

#[test]
fn test_regex_after_operator_positions() {
    // After operators, keywords, and at statement start, `/` begins a
    // regex
    for src in [
        "/re/",
        "x = /re/",
        "a + /re/",
        "typeof /re/",
        "a, /re/",
        "(/re/)",
        "x ? /a/ : /b/",
    ] {
        assert!(
            kinds(src).contains(&TokenKind::Regex),
            "{src} should scan a regex"
        );
    }
}

#[test]
fn test_regex_after_keyword_vs_after_value() {
    assert!(kinds("if (x) /re/.test(x)").contains(&TokenKind::Regex));
    // `this` is a value
    assert!(kinds("this / 2").contains(&TokenKind::Punct(Punct::Slash)));
}

#[test]
fn test_regex_value_and_flags() {
    let toks = tokens("x = /a+b/gi");
    let regex = toks.iter().find(|t| t.kind == TokenKind::Regex).unwrap();
    assert_eq!(regex.raw("x = /a+b/gi"), "/a+b/gi");
}

#[test]
fn test_unterminated_regex() {
    let err = tokenize_err("x = /unterminated");
    assert_eq!(err.message, "Unterminated regular expression");
    assert_eq!(err.pos.offset, 4);
}

#[test]
fn test_keywords_vs_contextual_names() {
    let toks = tokens("let async = await;");
    assert_eq!(toks[0].kind, TokenKind::Name);
    assert_eq!(toks[1].kind, TokenKind::Name);
    assert_eq!(toks[3].kind, TokenKind::Name);
    assert!(matches!(tokens("var x;")[0].kind, TokenKind::Keyword(_)));
}

#[test]
fn test_escaped_keyword_is_a_name() {
    // `var` decodes to `var` but cannot act as the keyword
    let toks = tokens("\\u0076ar x;");
    assert_eq!(toks[0].kind, TokenKind::Name);
    assert!(!toks[0].is_contextual("var"));
}

#[test]
fn test_punctuator_maximal_munch() {
    assert_eq!(kinds("a >>>= b")[1], TokenKind::Punct(Punct::GtGtGtEq));
    assert_eq!(kinds("a ** b")[1], TokenKind::Punct(Punct::StarStar));
    assert_eq!(kinds("a ?? b")[1], TokenKind::Punct(Punct::Coalesce));
    // `?.` before a digit is a ternary, not optional chaining
    assert_eq!(kinds("a ? .5 : b")[1], TokenKind::Punct(Punct::Question));
}

#[test]
fn test_numeric_literals() {
    for src in ["0", "42", ".5", "6.02e23", "0x1f", "0b101", "0o17", "1_000_000"] {
        assert_eq!(kinds(src)[0], TokenKind::Number, "{src}");
    }
    assert_eq!(kinds("123n")[0], TokenKind::BigInt);
}

#[test]
fn test_numeric_separator_gated() {
    let options = Options {
        ecma_version: EcmaVersion::Es2020,
        ..Options::default()
    };
    let result: Result<Vec<_>, _> = tokenize("1_000", options).collect();
    assert!(result.is_err());
}

#[test]
fn test_line_and_column_tracking() {
    let toks = tokens("a\n  b");
    assert_eq!(toks[0].span.start.line, 1);
    assert_eq!(toks[1].span.start.line, 2);
    assert_eq!(toks[1].span.start.column, 2);
    assert!(toks[1].newline_before);
    assert!(!toks[0].newline_before);
}

#[test]
fn test_hashbang_skipped() {
    let toks = tokens("#!/usr/bin/env node\nvar x;");
    assert!(matches!(toks[0].kind, TokenKind::Keyword(_)));
}

#[test]
fn test_string_values_decode_escapes() {
    use parser::TokenValue;
    let toks = tokens("'a\\n\\u0062'");
    let TokenValue::Str(value) = &toks[0].value else {
        panic!("expected string value");
    };
    assert_eq!(value, "a\nb");
}

#[test]
fn test_template_tokens() {
    let k = kinds("`a${b}c`");
    assert!(k.contains(&TokenKind::Template));
    assert!(k.contains(&TokenKind::Punct(Punct::DollarBraceL)));
}

#[test]
fn test_unterminated_string() {
    let err = tokenize_err("'open");
    assert_eq!(err.message, "Unterminated string constant");
}

#[test]
fn test_unterminated_block_comment() {
    let err = tokenize_err("/* open");
    assert_eq!(err.message, "Unterminated comment");
}
