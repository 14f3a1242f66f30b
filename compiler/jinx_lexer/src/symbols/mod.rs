//! Immutable scanner configuration.
//!
//! A [`SymbolTable`] is built once per syntax configuration and then shared
//! by reference across any number of scans, including concurrent ones. It
//! holds the delimiter strings and flags plus a few lookup structures the
//! scanner's hot loop reads, precomputed at construction.

mod config;

pub use config::{DelimiterPair, Delimiters, LegacyOverrides, SyntaxConfig, WhitespaceConfig};

use tracing::debug;

use crate::error::{ConfigurationError, DelimiterSide};
use crate::token::TokenKind;

/// Predicate over the character after an opener, consulted only in
/// whitespace-required mode. `None` means the opener ends the input.
pub type OpenerBoundary = fn(Option<char>) -> bool;

/// Default whitespace-required boundary: anything but an identifier
/// character.
///
/// `{# note #}`, `{#- note #}` and `{{"a"}}` pass; `{#array}` and `{{x}}`
/// do not.
pub fn is_opener_boundary(next: Option<char>) -> bool {
    next.is_none_or(|c| !(c.is_alphanumeric() || c == '_'))
}

/// 256-entry byte classification table.
type ByteTable = [bool; 256];

/// Validated, immutable delimiter set and scanning flags.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    delimiters: Delimiters,
    escape_char: char,
    lstrip_blocks: bool,
    trim_blocks: bool,
    whitespace_required: bool,
    raw_blocks: bool,
    opener_boundary: OpenerBoundary,
    /// Distinct first bytes of the three openers, for `memchr` in text mode.
    opener_bytes: Vec<u8>,
    /// Bytes that need a closer look inside an Expression body.
    expression_stops: ByteTable,
    /// Bytes that need a closer look inside a Tag body.
    tag_stops: ByteTable,
}

impl SymbolTable {
    /// Validate `config` and freeze it.
    ///
    /// Fails if any of the six delimiters is empty or starts with the
    /// escape character, or if two of them are equal or one is a prefix of
    /// another.
    pub fn new(config: SyntaxConfig) -> Result<Self, ConfigurationError> {
        validate(&config)?;
        let table = Self::from_validated(config);
        debug!(
            expression = ?table.delimiters.expression,
            tag = ?table.delimiters.tag,
            note = ?table.delimiters.note,
            lstrip_blocks = table.lstrip_blocks,
            trim_blocks = table.trim_blocks,
            whitespace_required = table.whitespace_required,
            "symbol table built"
        );
        Ok(table)
    }

    fn from_validated(config: SyntaxConfig) -> Self {
        let SyntaxConfig {
            delimiters,
            escape_char,
            whitespace,
            legacy,
            raw_blocks,
        } = config;
        let mut opener_bytes = Vec::with_capacity(3);
        for (_, pair) in delimiters.by_priority() {
            // `memchr` only needs the lead byte; full matches are checked after.
            if let Some(&first) = pair.open.as_bytes().first() {
                if !opener_bytes.contains(&first) {
                    opener_bytes.push(first);
                }
            }
        }

        let note_open = &delimiters.note.open;
        let expression_stops = body_stops(&delimiters.expression.close, note_open, escape_char);
        let tag_stops = body_stops(&delimiters.tag.close, note_open, escape_char);

        Self {
            delimiters,
            escape_char,
            lstrip_blocks: whitespace.lstrip_blocks,
            trim_blocks: whitespace.trim_blocks,
            whitespace_required: legacy.whitespace_required_within_tokens,
            raw_blocks,
            opener_boundary: is_opener_boundary,
            opener_bytes,
            expression_stops,
            tag_stops,
        }
    }

    /// Replace the whitespace-required boundary predicate.
    #[must_use]
    pub fn with_opener_boundary(mut self, boundary: OpenerBoundary) -> Self {
        self.opener_boundary = boundary;
        self
    }

    /// Opening and closing strings for a delimited kind; `None` for Fixed.
    pub fn delimiters(&self, kind: TokenKind) -> Option<&DelimiterPair> {
        match kind {
            TokenKind::Fixed => None,
            TokenKind::Expression => Some(&self.delimiters.expression),
            TokenKind::Tag => Some(&self.delimiters.tag),
            TokenKind::Note => Some(&self.delimiters.note),
        }
    }

    /// Opening delimiter of `kind`; empty for Fixed.
    pub fn opener(&self, kind: TokenKind) -> &str {
        self.delimiters(kind).map_or("", |pair| pair.open.as_str())
    }

    /// Closing delimiter of `kind`; empty for Fixed.
    pub fn closer(&self, kind: TokenKind) -> &str {
        self.delimiters(kind).map_or("", |pair| pair.close.as_str())
    }

    /// The three delimited kinds with their pairs, in opener priority order.
    pub fn delimiter_pairs(&self) -> [(TokenKind, &DelimiterPair); 3] {
        self.delimiters.by_priority()
    }

    pub fn expr_start(&self) -> &str {
        &self.delimiters.expression.open
    }

    pub fn expr_end(&self) -> &str {
        &self.delimiters.expression.close
    }

    pub fn tag_start(&self) -> &str {
        &self.delimiters.tag.open
    }

    pub fn tag_end(&self) -> &str {
        &self.delimiters.tag.close
    }

    pub fn note_start(&self) -> &str {
        &self.delimiters.note.open
    }

    pub fn note_end(&self) -> &str {
        &self.delimiters.note.close
    }

    pub fn escape_char(&self) -> char {
        self.escape_char
    }

    pub fn lstrip_blocks(&self) -> bool {
        self.lstrip_blocks
    }

    pub fn trim_blocks(&self) -> bool {
        self.trim_blocks
    }

    pub fn whitespace_required_within_tokens(&self) -> bool {
        self.whitespace_required
    }

    pub fn raw_blocks(&self) -> bool {
        self.raw_blocks
    }

    /// Whether an opener followed by `next` counts as an opener.
    ///
    /// Always `true` unless whitespace-required mode is on.
    #[inline]
    pub fn accepts_opener_before(&self, next: Option<char>) -> bool {
        !self.whitespace_required || (self.opener_boundary)(next)
    }

    /// Distinct first bytes of the openers.
    #[inline]
    pub fn opener_bytes(&self) -> &[u8] {
        &self.opener_bytes
    }

    /// Whether `byte` may start an escape, a quote, the closer of `kind` or
    /// a note opener. Bytes for which this is `false` are plain body content.
    #[inline]
    pub fn is_body_stop(&self, kind: TokenKind, byte: u8) -> bool {
        match kind {
            TokenKind::Expression => self.expression_stops[byte as usize],
            TokenKind::Tag => self.tag_stops[byte as usize],
            TokenKind::Fixed | TokenKind::Note => false,
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::from_validated(SyntaxConfig::default())
    }
}

fn body_stops(closer: &str, note_open: &str, escape: char) -> ByteTable {
    let mut table = [false; 256];
    let mut escape_buf = [0u8; 4];
    let escape_first = escape.encode_utf8(&mut escape_buf).as_bytes()[0];
    for byte in [b'\'', b'"', escape_first] {
        table[byte as usize] = true;
    }
    for delimiter in [closer, note_open] {
        if let Some(&first) = delimiter.as_bytes().first() {
            table[first as usize] = true;
        }
    }
    table
}

/// One delimiter string with its owner, for pairwise checks.
struct Labelled<'c> {
    kind: TokenKind,
    side: DelimiterSide,
    text: &'c str,
}

fn validate(config: &SyntaxConfig) -> Result<(), ConfigurationError> {
    let escape = config.escape_char;
    let mut all = Vec::with_capacity(6);
    for (kind, pair) in config.delimiters.by_priority() {
        all.push(Labelled {
            kind,
            side: DelimiterSide::Open,
            text: &pair.open,
        });
        all.push(Labelled {
            kind,
            side: DelimiterSide::Close,
            text: &pair.close,
        });
    }

    for delimiter in &all {
        if delimiter.text.is_empty() {
            return Err(ConfigurationError::EmptyDelimiter {
                kind: delimiter.kind,
                side: delimiter.side,
            });
        }
    }

    for delimiter in &all {
        if delimiter.text.starts_with(escape) {
            return Err(ConfigurationError::EscapeInDelimiter {
                kind: delimiter.kind,
                side: delimiter.side,
                delimiter: delimiter.text.to_owned(),
                escape,
            });
        }
    }

    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            if a.text == b.text {
                return Err(duplicate(a, b));
            }
            if b.text.starts_with(a.text) {
                return Err(ambiguous(a, b));
            }
            if a.text.starts_with(b.text) {
                return Err(ambiguous(b, a));
            }
        }
    }

    Ok(())
}

fn both_openers(a: &Labelled<'_>, b: &Labelled<'_>) -> bool {
    a.side == DelimiterSide::Open && b.side == DelimiterSide::Open
}

fn duplicate(a: &Labelled<'_>, b: &Labelled<'_>) -> ConfigurationError {
    if both_openers(a, b) {
        return ConfigurationError::DuplicateOpener {
            first: a.kind,
            second: b.kind,
            delimiter: a.text.to_owned(),
        };
    }
    ConfigurationError::DuplicateDelimiter {
        first: a.kind,
        first_side: a.side,
        second: b.kind,
        second_side: b.side,
        delimiter: a.text.to_owned(),
    }
}

/// `prefix` is a strict prefix of `delimiter`.
fn ambiguous(prefix: &Labelled<'_>, delimiter: &Labelled<'_>) -> ConfigurationError {
    if both_openers(prefix, delimiter) {
        return ConfigurationError::AmbiguousOpener {
            prefix_kind: prefix.kind,
            prefix: prefix.text.to_owned(),
            opener_kind: delimiter.kind,
            opener: delimiter.text.to_owned(),
        };
    }
    ConfigurationError::AmbiguousDelimiter {
        prefix_kind: prefix.kind,
        prefix_side: prefix.side,
        prefix: prefix.text.to_owned(),
        delimiter_kind: delimiter.kind,
        delimiter_side: delimiter.side,
        delimiter: delimiter.text.to_owned(),
    }
}
