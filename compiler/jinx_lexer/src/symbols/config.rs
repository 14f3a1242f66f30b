//! User-facing syntax configuration.
//!
//! `SyntaxConfig` is plain data: it can be built in code or deserialized
//! from whatever format the embedding engine uses for its settings. It is
//! checked and frozen by [`SymbolTable::new`](crate::SymbolTable::new).

use serde::{Deserialize, Serialize};

use crate::token::TokenKind;

/// Opening and closing strings of one delimited token kind.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelimiterPair {
    pub open: String,
    pub close: String,
}

impl DelimiterPair {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }
}

/// The three delimiter pairs.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Delimiters {
    pub expression: DelimiterPair,
    pub tag: DelimiterPair,
    pub note: DelimiterPair,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            expression: DelimiterPair::new("{{", "}}"),
            tag: DelimiterPair::new("{%", "%}"),
            note: DelimiterPair::new("{#", "#}"),
        }
    }
}

impl Delimiters {
    /// The three pairs in the order openers are tried at a position.
    pub fn by_priority(&self) -> [(TokenKind, &DelimiterPair); 3] {
        [
            (TokenKind::Note, &self.note),
            (TokenKind::Tag, &self.tag),
            (TokenKind::Expression, &self.expression),
        ]
    }
}

/// Whitespace control around tags.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WhitespaceConfig {
    /// Strip spaces and tabs from the start of a line up to a tag opener.
    pub lstrip_blocks: bool,
    /// Drop the first newline after a tag closer.
    pub trim_blocks: bool,
}

/// Compatibility switches for templates written against older engines.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LegacyOverrides {
    /// Only recognize an opener when the character after it is a boundary.
    ///
    /// Keeps text such as shell `${#array[@]}` from opening a comment.
    pub whitespace_required_within_tokens: bool,
}

/// Everything that changes how a template is split into tokens.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntaxConfig {
    pub delimiters: Delimiters,
    pub escape_char: char,
    pub whitespace: WhitespaceConfig,
    pub legacy: LegacyOverrides,
    /// Emit `{% raw %}...{% endraw %}` bodies verbatim as text.
    pub raw_blocks: bool,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            delimiters: Delimiters::default(),
            escape_char: '\\',
            whitespace: WhitespaceConfig::default(),
            legacy: LegacyOverrides::default(),
            raw_blocks: true,
        }
    }
}

impl SyntaxConfig {
    #[must_use]
    pub fn with_lstrip_blocks(mut self, enabled: bool) -> Self {
        self.whitespace.lstrip_blocks = enabled;
        self
    }

    #[must_use]
    pub fn with_trim_blocks(mut self, enabled: bool) -> Self {
        self.whitespace.trim_blocks = enabled;
        self
    }

    #[must_use]
    pub fn with_whitespace_required_within_tokens(mut self, enabled: bool) -> Self {
        self.legacy.whitespace_required_within_tokens = enabled;
        self
    }

    #[must_use]
    pub fn with_raw_blocks(mut self, enabled: bool) -> Self {
        self.raw_blocks = enabled;
        self
    }

    #[must_use]
    pub fn with_escape_char(mut self, escape: char) -> Self {
        self.escape_char = escape;
        self
    }

    #[must_use]
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }
}
