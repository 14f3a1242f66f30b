//! Token kind discriminants.

use std::fmt;

/// The four kinds of token a template decomposes into.
///
/// `Fixed` is literal text and has no delimiters; the other three are each
/// bound to one delimiter pair of the [`SymbolTable`](crate::SymbolTable).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    /// Literal template text.
    Fixed = 0,
    /// Output expression, `{{ ... }}` by default.
    Expression = 1,
    /// Control tag, `{% ... %}` by default.
    Tag = 2,
    /// Comment, `{# ... #}` by default.
    Note = 3,
}

impl TokenKind {
    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Fixed => "fixed",
            TokenKind::Expression => "expression",
            TokenKind::Tag => "tag",
            TokenKind::Note => "note",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
