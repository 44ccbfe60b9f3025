//! Parse options.

use serde::Serialize;
use syntax_core::Comment;

use crate::token::Token;

/// Language version selecting keyword sets, reserved words, and which
/// syntax forms are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum EcmaVersion {
    /// ECMAScript 5.1
    Es5,
    /// ES2015 (classes, arrow functions, template literals, let/const)
    Es2015,
    /// ES2016 (exponentiation operator)
    Es2016,
    /// ES2017 (async/await)
    Es2017,
    /// ES2018 (object spread/rest, named groups, lookbehind, `s` flag)
    Es2018,
    /// ES2019 (optional catch binding)
    Es2019,
    /// ES2020 (BigInt, optional chaining, nullish coalescing, import.meta)
    Es2020,
    /// ES2021 (logical assignment, numeric separators)
    Es2021,
    /// ES2022 (class fields, private names, `d` regex flag)
    Es2022,
}

/// Whether the input is parsed as a classic script or a module.
///
/// Modules imply strict mode and enable `import`/`export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SourceType {
    /// Classic script
    Script,
    /// ECMAScript module
    Module,
}

/// Policy for non-keyword reserved words (`enum`, and the strict-mode set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AllowReserved {
    /// Reserved words are accepted as identifiers
    Yes,
    /// Reserved words are rejected as identifiers
    No,
    /// Rejected everywhere, including as property names
    Never,
}

/// Callback invoked for each token produced during a parse.
pub type TokenCallback = Box<dyn FnMut(&Token)>;
/// Callback invoked for each comment skipped during a parse.
pub type CommentCallback = Box<dyn FnMut(&Comment)>;

/// Configuration for a parse invocation.
///
/// `Default` gives the newest supported language version, script source
/// type, and position tracking enabled.
pub struct Options {
    /// Language version
    pub ecma_version: EcmaVersion,
    /// Script or module
    pub source_type: SourceType,
    /// Permit `return` at the top level
    pub allow_return_outside_function: bool,
    /// Reserved word policy
    pub allow_reserved: AllowReserved,
    /// Attach line/column info to node spans (offsets are always attached)
    pub track_positions: bool,
    /// Keep explicit parenthesized-expression wrapper nodes
    pub preserve_parens: bool,
    /// Invoked synchronously for every token scanned
    pub on_token: Option<TokenCallback>,
    /// Invoked synchronously for every comment skipped
    pub on_comment: Option<CommentCallback>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            ecma_version: EcmaVersion::Es2022,
            source_type: SourceType::Script,
            allow_return_outside_function: false,
            allow_reserved: AllowReserved::No,
            track_positions: true,
            preserve_parens: false,
            on_token: None,
            on_comment: None,
        }
    }
}

impl std::fmt::Debug for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("ecma_version", &self.ecma_version)
            .field("source_type", &self.source_type)
            .field(
                "allow_return_outside_function",
                &self.allow_return_outside_function,
            )
            .field("allow_reserved", &self.allow_reserved)
            .field("track_positions", &self.track_positions)
            .field("preserve_parens", &self.preserve_parens)
            .field("on_token", &self.on_token.is_some())
            .field("on_comment", &self.on_comment.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_ordering() {
        assert!(EcmaVersion::Es2015 < EcmaVersion::Es2018);
        assert!(EcmaVersion::Es2022 >= EcmaVersion::Es2020);
        assert!(EcmaVersion::Es5 < EcmaVersion::Es2015);
    }

    #[test]
    fn test_default_options() {
        let opts = Options::default();
        assert_eq!(opts.ecma_version, EcmaVersion::Es2022);
        assert_eq!(opts.source_type, SourceType::Script);
        assert!(opts.track_positions);
        assert!(!opts.preserve_parens);
    }
}
