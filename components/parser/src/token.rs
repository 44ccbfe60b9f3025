//! Token definitions produced by the scanner.

use num_bigint::BigInt;
use serde::Serialize;
use syntax_core::Span;

/// JavaScript reserved words that are always keywords.
///
/// Contextual words (`async`, `await`, `yield`, `let`, `static`, `of`,
/// `get`, `set`, `as`, `from`) are scanned as [`TokenKind::Name`] and
/// reinterpreted by the parser where the grammar gives them meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Keyword {
    /// break keyword
    Break,
    /// case keyword
    Case,
    /// catch keyword
    Catch,
    /// class keyword
    Class,
    /// const keyword
    Const,
    /// continue keyword
    Continue,
    /// debugger keyword
    Debugger,
    /// default keyword
    Default,
    /// delete keyword
    Delete,
    /// do keyword
    Do,
    /// else keyword
    Else,
    /// export keyword
    Export,
    /// extends keyword
    Extends,
    /// false literal
    False,
    /// finally keyword
    Finally,
    /// for keyword
    For,
    /// function keyword
    Function,
    /// if keyword
    If,
    /// import keyword
    Import,
    /// in keyword
    In,
    /// instanceof keyword
    Instanceof,
    /// new keyword
    New,
    /// null literal
    Null,
    /// return keyword
    Return,
    /// super keyword
    Super,
    /// switch keyword
    Switch,
    /// this keyword
    This,
    /// throw keyword
    Throw,
    /// true literal
    True,
    /// try keyword
    Try,
    /// typeof keyword
    Typeof,
    /// var keyword
    Var,
    /// void keyword
    Void,
    /// while keyword
    While,
    /// with keyword
    With,
}

impl Keyword {
    /// Look up a scanned word in the keyword set.
    pub fn from_word(word: &str) -> Option<Keyword> {
        Some(match word {
            "break" => Keyword::Break,
            "case" => Keyword::Case,
            "catch" => Keyword::Catch,
            "class" => Keyword::Class,
            "const" => Keyword::Const,
            "continue" => Keyword::Continue,
            "debugger" => Keyword::Debugger,
            "default" => Keyword::Default,
            "delete" => Keyword::Delete,
            "do" => Keyword::Do,
            "else" => Keyword::Else,
            "export" => Keyword::Export,
            "extends" => Keyword::Extends,
            "false" => Keyword::False,
            "finally" => Keyword::Finally,
            "for" => Keyword::For,
            "function" => Keyword::Function,
            "if" => Keyword::If,
            "import" => Keyword::Import,
            "in" => Keyword::In,
            "instanceof" => Keyword::Instanceof,
            "new" => Keyword::New,
            "null" => Keyword::Null,
            "return" => Keyword::Return,
            "super" => Keyword::Super,
            "switch" => Keyword::Switch,
            "this" => Keyword::This,
            "throw" => Keyword::Throw,
            "true" => Keyword::True,
            "try" => Keyword::Try,
            "typeof" => Keyword::Typeof,
            "var" => Keyword::Var,
            "void" => Keyword::Void,
            "while" => Keyword::While,
            "with" => Keyword::With,
            _ => return None,
        })
    }

    /// The keyword's source text.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Break => "break",
            Keyword::Case => "case",
            Keyword::Catch => "catch",
            Keyword::Class => "class",
            Keyword::Const => "const",
            Keyword::Continue => "continue",
            Keyword::Debugger => "debugger",
            Keyword::Default => "default",
            Keyword::Delete => "delete",
            Keyword::Do => "do",
            Keyword::Else => "else",
            Keyword::Export => "export",
            Keyword::Extends => "extends",
            Keyword::False => "false",
            Keyword::Finally => "finally",
            Keyword::For => "for",
            Keyword::Function => "function",
            Keyword::If => "if",
            Keyword::Import => "import",
            Keyword::In => "in",
            Keyword::Instanceof => "instanceof",
            Keyword::New => "new",
            Keyword::Null => "null",
            Keyword::Return => "return",
            Keyword::Super => "super",
            Keyword::Switch => "switch",
            Keyword::This => "this",
            Keyword::Throw => "throw",
            Keyword::True => "true",
            Keyword::Try => "try",
            Keyword::Typeof => "typeof",
            Keyword::Var => "var",
            Keyword::Void => "void",
            Keyword::While => "while",
            Keyword::With => "with",
        }
    }
}

/// Punctuators and operators, matched greedily against the longest valid
/// prefix by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Punct {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `;`
    Semi,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `...`
    Ellipsis,
    /// `?.`
    QuestionDot,
    /// `:`
    Colon,
    /// `?`
    Question,
    /// `=`
    Eq,
    /// `=>`
    Arrow,
    /// `` ` ``
    BackQuote,
    /// `${`
    DollarBraceL,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `**`
    StarStar,
    /// `==`
    EqEq,
    /// `===`
    EqEqEq,
    /// `!=`
    NotEq,
    /// `!==`
    NotEqEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `??`
    Coalesce,
    /// `!`
    Not,
    /// `&`
    And,
    /// `|`
    Or,
    /// `^`
    Xor,
    /// `~`
    Tilde,
    /// `<<`
    LtLt,
    /// `>>`
    GtGt,
    /// `>>>`
    GtGtGt,
    /// `+=`
    PlusEq,
    /// `-=`
    MinusEq,
    /// `*=`
    StarEq,
    /// `/=`
    SlashEq,
    /// `%=`
    PercentEq,
    /// `**=`
    StarStarEq,
    /// `&=`
    AndEq,
    /// `|=`
    OrEq,
    /// `^=`
    XorEq,
    /// `<<=`
    LtLtEq,
    /// `>>=`
    GtGtEq,
    /// `>>>=`
    GtGtGtEq,
    /// `&&=`
    AndAndEq,
    /// `||=`
    OrOrEq,
    /// `??=`
    CoalesceEq,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,
}

impl Punct {
    /// The punctuator's source text.
    pub fn as_str(self) -> &'static str {
        match self {
            Punct::LParen => "(",
            Punct::RParen => ")",
            Punct::LBrace => "{",
            Punct::RBrace => "}",
            Punct::LBracket => "[",
            Punct::RBracket => "]",
            Punct::Semi => ";",
            Punct::Comma => ",",
            Punct::Dot => ".",
            Punct::Ellipsis => "...",
            Punct::QuestionDot => "?.",
            Punct::Colon => ":",
            Punct::Question => "?",
            Punct::Eq => "=",
            Punct::Arrow => "=>",
            Punct::BackQuote => "`",
            Punct::DollarBraceL => "${",
            Punct::Plus => "+",
            Punct::Minus => "-",
            Punct::Star => "*",
            Punct::Slash => "/",
            Punct::Percent => "%",
            Punct::StarStar => "**",
            Punct::EqEq => "==",
            Punct::EqEqEq => "===",
            Punct::NotEq => "!=",
            Punct::NotEqEq => "!==",
            Punct::Lt => "<",
            Punct::LtEq => "<=",
            Punct::Gt => ">",
            Punct::GtEq => ">=",
            Punct::AndAnd => "&&",
            Punct::OrOr => "||",
            Punct::Coalesce => "??",
            Punct::Not => "!",
            Punct::And => "&",
            Punct::Or => "|",
            Punct::Xor => "^",
            Punct::Tilde => "~",
            Punct::LtLt => "<<",
            Punct::GtGt => ">>",
            Punct::GtGtGt => ">>>",
            Punct::PlusEq => "+=",
            Punct::MinusEq => "-=",
            Punct::StarEq => "*=",
            Punct::SlashEq => "/=",
            Punct::PercentEq => "%=",
            Punct::StarStarEq => "**=",
            Punct::AndEq => "&=",
            Punct::OrEq => "|=",
            Punct::XorEq => "^=",
            Punct::LtLtEq => "<<=",
            Punct::GtGtEq => ">>=",
            Punct::GtGtGtEq => ">>>=",
            Punct::AndAndEq => "&&=",
            Punct::OrOrEq => "||=",
            Punct::CoalesceEq => "??=",
            Punct::PlusPlus => "++",
            Punct::MinusMinus => "--",
        }
    }

    /// True for assignment operators (`=`, `+=`, ..., `??=`).
    pub fn is_assign(self) -> bool {
        matches!(
            self,
            Punct::Eq
                | Punct::PlusEq
                | Punct::MinusEq
                | Punct::StarEq
                | Punct::SlashEq
                | Punct::PercentEq
                | Punct::StarStarEq
                | Punct::AndEq
                | Punct::OrEq
                | Punct::XorEq
                | Punct::LtLtEq
                | Punct::GtGtEq
                | Punct::GtGtGtEq
                | Punct::AndAndEq
                | Punct::OrOrEq
                | Punct::CoalesceEq
        )
    }
}

/// Closed enumeration of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// End of input
    Eof,
    /// Identifier or contextual keyword
    Name,
    /// Private class name (`#x`)
    PrivateName,
    /// Numeric literal
    Number,
    /// BigInt literal (`123n`)
    BigInt,
    /// String literal
    Str,
    /// One text chunk of a template literal
    Template,
    /// Regular expression literal
    Regex,
    /// Reserved word
    Keyword(Keyword),
    /// Punctuator or operator
    Punct(Punct),
}

impl TokenKind {
    /// Whether an expression may start directly after this token kind.
    ///
    /// This single predicate drives the scanner's regex-vs-division
    /// decision and feeds the brace disambiguation in `update_context`.
    pub fn before_expr(self) -> bool {
        match self {
            TokenKind::Keyword(kw) => matches!(
                kw,
                Keyword::Case
                    | Keyword::Default
                    | Keyword::Do
                    | Keyword::Else
                    | Keyword::Return
                    | Keyword::Throw
                    | Keyword::New
                    | Keyword::In
                    | Keyword::Instanceof
                    | Keyword::Typeof
                    | Keyword::Void
                    | Keyword::Delete
                    | Keyword::Extends
            ),
            TokenKind::Punct(p) => {
                p.is_assign()
                    || matches!(
                        p,
                        Punct::LBracket
                            | Punct::LBrace
                            | Punct::LParen
                            | Punct::Comma
                            | Punct::Semi
                            | Punct::Colon
                            | Punct::DollarBraceL
                            | Punct::Question
                            | Punct::Arrow
                            | Punct::Ellipsis
                            | Punct::Plus
                            | Punct::Minus
                            | Punct::Star
                            | Punct::Slash
                            | Punct::Percent
                            | Punct::StarStar
                            | Punct::EqEq
                            | Punct::EqEqEq
                            | Punct::NotEq
                            | Punct::NotEqEq
                            | Punct::Lt
                            | Punct::LtEq
                            | Punct::Gt
                            | Punct::GtEq
                            | Punct::AndAnd
                            | Punct::OrOr
                            | Punct::Coalesce
                            | Punct::Not
                            | Punct::And
                            | Punct::Or
                            | Punct::Xor
                            | Punct::Tilde
                            | Punct::LtLt
                            | Punct::GtGt
                            | Punct::GtGtGt
                    )
            }
            _ => false,
        }
    }

    /// Short description used in "unexpected token" messages.
    pub fn describe(self) -> String {
        match self {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Name => "identifier".to_string(),
            TokenKind::PrivateName => "private name".to_string(),
            TokenKind::Number => "number".to_string(),
            TokenKind::BigInt => "bigint".to_string(),
            TokenKind::Str => "string".to_string(),
            TokenKind::Template => "template".to_string(),
            TokenKind::Regex => "regular expression".to_string(),
            TokenKind::Keyword(kw) => format!("'{}'", kw.as_str()),
            TokenKind::Punct(p) => format!("'{}'", p.as_str()),
        }
    }
}

/// Decoded token payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TokenValue {
    /// No payload (punctuators, keywords, EOF)
    None,
    /// Identifier text; `escaped` is set when the word contained `\u`
    /// escapes (escaped keywords are identifiers, never keywords)
    Name {
        /// Decoded identifier text
        name: String,
        /// Contained a Unicode escape sequence
        escaped: bool,
    },
    /// Decoded numeric value
    Number(f64),
    /// Decoded BigInt value
    BigInt(BigInt),
    /// Decoded string value (escapes resolved)
    Str(String),
    /// Template chunk; `cooked` is `None` when the chunk contains an
    /// invalid escape (fatal only in untagged templates)
    Template {
        /// Decoded chunk text, or `None` for an invalid escape
        cooked: Option<String>,
    },
    /// Regex literal, raw text preserved verbatim
    Regex {
        /// Pattern between the slashes
        pattern: String,
        /// Flag letters after the closing slash
        flags: String,
    },
}

/// A single token.
///
/// Only the current and previous tokens are ever retained by the parser;
/// the raw text is recovered by slicing the source with `span`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    /// Token kind
    pub kind: TokenKind,
    /// Decoded value
    pub value: TokenValue,
    /// Source range
    pub span: Span,
    /// A line terminator appeared between the previous token and this one
    pub newline_before: bool,
}

impl Token {
    /// The token's raw source text.
    pub fn raw<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.start.offset..self.span.end.offset]
    }

    /// The identifier text if this is a name token.
    pub fn name(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Name { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// True if this is a name token with the given unescaped text.
    /// Escaped contextual keywords never match.
    pub fn is_contextual(&self, word: &str) -> bool {
        matches!(&self.value, TokenValue::Name { name, escaped: false } if name == word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(Keyword::from_word("while"), Some(Keyword::While));
        assert_eq!(Keyword::from_word("async"), None);
        assert_eq!(Keyword::from_word("let"), None);
        assert_eq!(Keyword::from_word("yield"), None);
    }

    #[test]
    fn test_keyword_round_trip() {
        for word in ["break", "instanceof", "typeof", "null", "true"] {
            let kw = Keyword::from_word(word).unwrap();
            assert_eq!(kw.as_str(), word);
        }
    }

    #[test]
    fn test_assign_operators() {
        assert!(Punct::Eq.is_assign());
        assert!(Punct::CoalesceEq.is_assign());
        assert!(!Punct::EqEq.is_assign());
        assert!(!Punct::Arrow.is_assign());
    }

    #[test]
    fn test_before_expr() {
        assert!(TokenKind::Punct(Punct::LParen).before_expr());
        assert!(TokenKind::Punct(Punct::Comma).before_expr());
        assert!(TokenKind::Keyword(Keyword::Return).before_expr());
        assert!(TokenKind::Keyword(Keyword::Typeof).before_expr());
        assert!(!TokenKind::Punct(Punct::RParen).before_expr());
        assert!(!TokenKind::Name.before_expr());
        assert!(!TokenKind::Number.before_expr());
        assert!(!TokenKind::Punct(Punct::PlusPlus).before_expr());
    }

    #[test]
    fn test_contextual_match_rejects_escaped() {
        use syntax_core::{Position, Span};
        let tok = Token {
            kind: TokenKind::Name,
            value: TokenValue::Name { name: "async".to_string(), escaped: true },
            span: Span::empty(Position::start()),
            newline_before: false,
        };
        assert!(!tok.is_contextual("async"));
    }
}
