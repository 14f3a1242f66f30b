//! Token model: the envelope shared by all kinds and the kind variants.
//!
//! Tokens borrow their text from the scanned source and are immutable once
//! the scanner hands them out.

mod flags;
mod kind;

pub use flags::TokenFlags;
pub use kind::TokenKind;

use std::fmt;

use crate::position::Position;
use crate::span::Span;

/// Maximum number of content characters shown by `Display`.
const DISPLAY_CAP: usize = 32;

/// Fields common to every token.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Lexeme<'a> {
    image: &'a str,
    content: &'a str,
    span: Span,
    position: Position,
    flags: TokenFlags,
}

impl<'a> Lexeme<'a> {
    pub(crate) fn new(
        image: &'a str,
        content: &'a str,
        span: Span,
        position: Position,
        flags: TokenFlags,
    ) -> Self {
        debug_assert_eq!(image.len(), span.len(), "image does not match span {span}");
        Self {
            image,
            content,
            span,
            position,
            flags,
        }
    }

    /// Exact source text covered, delimiters included.
    pub fn image(&self) -> &'a str {
        self.image
    }

    /// Text strictly between the delimiters; the whole image for Fixed.
    pub fn content(&self) -> &'a str {
        self.content
    }

    /// Byte range of the image in the source.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Line and column of the first character.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Whitespace-control and scan-outcome flags.
    pub fn flags(&self) -> TokenFlags {
        self.flags
    }
}

/// A `{% ... %}` token with its name split from its arguments.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TagToken<'a> {
    lexeme: Lexeme<'a>,
    name: &'a str,
    helpers: &'a str,
}

impl<'a> TagToken<'a> {
    fn new(lexeme: Lexeme<'a>) -> Self {
        let (inner, _) = TokenFlags::from_markers(lexeme.content);
        let (name, helpers) = split_tag(inner);
        Self {
            lexeme,
            name,
            helpers,
        }
    }

    /// First whitespace-delimited word of the content, e.g. `if`.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Remaining argument text, trimmed, e.g. `x > 1`.
    pub fn helpers(&self) -> &'a str {
        self.helpers
    }

    /// The shared token envelope.
    pub fn lexeme(&self) -> &Lexeme<'a> {
        &self.lexeme
    }
}

/// Split trimmed tag content into its name and the trimmed remainder.
pub(crate) fn split_tag(content: &str) -> (&str, &str) {
    let content = content.trim();
    match content.find(char::is_whitespace) {
        Some(at) => (&content[..at], content[at..].trim()),
        None => (content, ""),
    }
}

/// One token of a scanned template.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Token<'a> {
    /// Literal text.
    Fixed(Lexeme<'a>),
    /// Output expression.
    Expression(Lexeme<'a>),
    /// Control tag.
    Tag(TagToken<'a>),
    /// Comment.
    Note(Lexeme<'a>),
}

impl<'a> Token<'a> {
    /// Build the variant for `kind` around an envelope.
    pub(crate) fn new(kind: TokenKind, lexeme: Lexeme<'a>) -> Self {
        match kind {
            TokenKind::Fixed => Token::Fixed(lexeme),
            TokenKind::Expression => Token::Expression(lexeme),
            TokenKind::Tag => Token::Tag(TagToken::new(lexeme)),
            TokenKind::Note => Token::Note(lexeme),
        }
    }

    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Fixed(_) => TokenKind::Fixed,
            Token::Expression(_) => TokenKind::Expression,
            Token::Tag(_) => TokenKind::Tag,
            Token::Note(_) => TokenKind::Note,
        }
    }

    /// The shared token envelope.
    pub fn lexeme(&self) -> &Lexeme<'a> {
        match self {
            Token::Fixed(lexeme) | Token::Expression(lexeme) | Token::Note(lexeme) => lexeme,
            Token::Tag(tag) => &tag.lexeme,
        }
    }

    pub fn image(&self) -> &'a str {
        self.lexeme().image
    }

    pub fn content(&self) -> &'a str {
        self.lexeme().content
    }

    pub fn span(&self) -> Span {
        self.lexeme().span
    }

    pub fn position(&self) -> Position {
        self.lexeme().position
    }

    /// 1-based line of the first character.
    pub fn start_line(&self) -> u32 {
        self.lexeme().position.line
    }

    /// 0-based column of the first character.
    pub fn start_column(&self) -> u32 {
        self.lexeme().position.column
    }

    pub fn flags(&self) -> TokenFlags {
        self.lexeme().flags
    }

    pub fn as_tag(&self) -> Option<&TagToken<'a>> {
        match self {
            Token::Tag(tag) => Some(tag),
            _ => None,
        }
    }

    /// Tag name, for Tag tokens.
    pub fn tag_name(&self) -> Option<&'a str> {
        self.as_tag().map(TagToken::name)
    }

    /// Tag arguments, for Tag tokens.
    pub fn helpers(&self) -> Option<&'a str> {
        self.as_tag().map(TagToken::helpers)
    }

    /// `true` if the construct ran into end of input without its closer.
    pub fn is_unterminated(&self) -> bool {
        self.flags().contains(TokenFlags::UNTERMINATED)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content = self.content();
        write!(f, "{}@{} ", self.kind(), self.position())?;
        match content.char_indices().nth(DISPLAY_CAP) {
            Some((cut, _)) => write!(f, "{:?}...", &content[..cut]),
            None => write!(f, "{content:?}"),
        }
    }
}

#[cfg(test)]
mod tests;
