//! Configuration errors.
//!
//! Scanning itself cannot fail: malformed templates degrade into the token
//! stream. The only failure is building a [`SymbolTable`](crate::SymbolTable)
//! from an inconsistent [`SyntaxConfig`](crate::SyntaxConfig).

use std::fmt;

use thiserror::Error;

use crate::token::TokenKind;

/// Which end of a delimiter pair.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum DelimiterSide {
    Open,
    Close,
}

impl DelimiterSide {
    pub const fn name(self) -> &'static str {
        match self {
            DelimiterSide::Open => "opening",
            DelimiterSide::Close => "closing",
        }
    }
}

impl fmt::Display for DelimiterSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Invalid scanner configuration. Fatal; fix the configuration and rebuild.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{side} delimiter for {kind} must not be empty")]
    EmptyDelimiter {
        kind: TokenKind,
        side: DelimiterSide,
    },

    #[error("{first} and {second} share the opening delimiter `{delimiter}`")]
    DuplicateOpener {
        first: TokenKind,
        second: TokenKind,
        delimiter: String,
    },

    #[error("opening delimiter `{prefix}` ({prefix_kind}) is a prefix of `{opener}` ({opener_kind})")]
    AmbiguousOpener {
        prefix_kind: TokenKind,
        prefix: String,
        opener_kind: TokenKind,
        opener: String,
    },

    /// Two delimiters that are not both openers are the same string.
    #[error("{first_side} delimiter for {first} and {second_side} delimiter for {second} are both `{delimiter}`")]
    DuplicateDelimiter {
        first: TokenKind,
        first_side: DelimiterSide,
        second: TokenKind,
        second_side: DelimiterSide,
        delimiter: String,
    },

    /// A delimiter is a prefix of another, and they are not both openers.
    #[error("{prefix_side} delimiter `{prefix}` ({prefix_kind}) is a prefix of {delimiter_side} delimiter `{delimiter}` ({delimiter_kind})")]
    AmbiguousDelimiter {
        prefix_kind: TokenKind,
        prefix_side: DelimiterSide,
        prefix: String,
        delimiter_kind: TokenKind,
        delimiter_side: DelimiterSide,
        delimiter: String,
    },

    #[error("{side} delimiter `{delimiter}` for {kind} starts with the escape character `{escape}`")]
    EscapeInDelimiter {
        kind: TokenKind,
        side: DelimiterSide,
        delimiter: String,
        escape: char,
    },
}
