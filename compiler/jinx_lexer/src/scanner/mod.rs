//! Single-pass template scanner.
//!
//! [`TokenScanner`] walks the source once, left to right, and yields one
//! [`Token`] per `next()`. It never fails: a construct without its closer
//! becomes text (or, for a note, a note running to end of input).
//!
//! # Design
//!
//! Text is skipped with `memchr` over the opener lead bytes. Delimited
//! bodies are walked over a per-kind stop-byte table, so only quotes, the
//! escape character, the closer and a note opener are examined closely.
//!
//! When an opener is found the construct is located first and the text in
//! front of it emitted second, because whitespace control on the construct
//! decides where that text ends. The construct is then held for the next
//! call. Every consumed character, stripped whitespace included, passes
//! through the [`PositionTracker`].

use std::iter::FusedIterator;
use std::mem;

use tracing::{debug, trace};

use crate::cursor::Cursor;
use crate::position::PositionTracker;
use crate::span::Span;
use crate::symbols::SymbolTable;
use crate::token::{Lexeme, Token, TokenFlags, TokenKind};

/// Tag name that switches the scanner into raw mode.
const RAW_TAG: &str = "raw";
/// Tag name that ends a raw block.
const END_RAW_TAG: &str = "endraw";

/// What the scanner is looking for between tokens.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Mode {
    /// Literal text; looking for the next opener.
    InText,
    /// Inside `{% raw %}`; looking for `{% endraw %}`.
    InRaw,
    /// Source exhausted.
    Finished,
}

/// Open string literal inside an Expression or Tag body.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Quote {
    None,
    Single,
    Double,
}

impl Quote {
    fn opened_by(byte: u8) -> Quote {
        match byte {
            b'\'' => Quote::Single,
            b'"' => Quote::Double,
            _ => Quote::None,
        }
    }

    fn is_closed_by(self, byte: u8) -> bool {
        matches!((self, byte), (Quote::Single, b'\'') | (Quote::Double, b'"'))
    }
}

/// Lexical state while walking one Expression or Tag body.
#[derive(Copy, Clone, Debug)]
struct BodyState {
    quote: Quote,
    /// The next character is taken literally.
    pending_escape: bool,
}

/// How an Expression or Tag body ended.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum BodyEnd {
    /// Closer starting at `at`.
    Closed { at: usize },
    /// A note opener at `at` broke into the body.
    Interrupted { at: usize },
    /// End of input without a closer.
    Unterminated,
}

/// Whitespace to drop at the start of the next text run.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum LeadingTrim {
    None,
    /// `-` before the previous closer: all whitespace.
    All,
    /// `trim_blocks`: spaces and tabs up to and including one newline.
    Line,
}

/// A construct found in the source but not yet consumed.
#[derive(Copy, Clone, Debug)]
struct Located {
    /// Kind to emit; `Fixed` if the construct degraded.
    kind: TokenKind,
    span: Span,
    content: Span,
    flags: TokenFlags,
}

impl Located {
    /// Whitespace control only applies around constructs that closed.
    fn is_recognized(&self) -> bool {
        self.kind != TokenKind::Fixed && !self.flags.contains(TokenFlags::UNTERMINATED)
    }
}

/// Lazy, fused token stream over one template source.
///
/// Created by [`scan`]. The tokens it yields borrow the source `'a`, not
/// the symbol table `'s`.
pub struct TokenScanner<'a, 's> {
    cursor: Cursor<'a>,
    symbols: &'s SymbolTable,
    tracker: PositionTracker,
    mode: Mode,
    leading: LeadingTrim,
    /// Construct located together with the text before it.
    pending: Option<Token<'a>>,
}

/// Scan `source` with the given symbols.
pub fn scan<'a, 's>(source: &'a str, symbols: &'s SymbolTable) -> TokenScanner<'a, 's> {
    TokenScanner::new(source, symbols)
}

/// Scan `source` eagerly into a vector.
pub fn tokenize<'a>(source: &'a str, symbols: &SymbolTable) -> Vec<Token<'a>> {
    scan(source, symbols).collect()
}

impl<'a, 's> TokenScanner<'a, 's> {
    pub fn new(source: &'a str, symbols: &'s SymbolTable) -> Self {
        Self {
            cursor: Cursor::new(source),
            symbols,
            tracker: PositionTracker::new(),
            mode: Mode::InText,
            leading: LeadingTrim::None,
            pending: None,
        }
    }

    /// Byte offset of the first unconsumed character.
    pub fn offset(&self) -> usize {
        self.cursor.pos()
    }

    fn produce(&mut self) -> Option<Token<'a>> {
        loop {
            let token = match self.mode {
                Mode::Finished => return None,
                Mode::InText => self.scan_text(),
                Mode::InRaw => self.scan_raw(),
            };
            if token.is_some() {
                return token;
            }
        }
    }

    // ─── Text ───────────────────────────────────────────────────────────

    fn scan_text(&mut self) -> Option<Token<'a>> {
        let text_start = self.skip_leading_trim();
        match self.find_opener(text_start) {
            Some((kind, at)) => {
                let located = self.locate(kind, at);
                Some(self.emit_around(text_start, located, TokenFlags::empty()))
            }
            None => {
                self.mode = Mode::Finished;
                self.text_token(self.cursor.source_len(), TokenFlags::empty())
            }
        }
    }

    /// First recognized opener at or after `from`.
    fn find_opener(&self, from: usize) -> Option<(TokenKind, usize)> {
        let mut at = from;
        while let Some(hit) = self.cursor.find_any_from(at, self.symbols.opener_bytes()) {
            for (kind, pair) in self.symbols.delimiter_pairs() {
                if self.is_opener_at(hit, &pair.open) {
                    return Some((kind, hit));
                }
            }
            at = hit + 1;
        }
        None
    }

    fn is_opener_at(&self, at: usize, open: &str) -> bool {
        self.cursor.matches_at(at, open)
            && self
                .symbols
                .accepts_opener_before(self.cursor.char_at(at + open.len()))
    }

    // ─── Raw blocks ─────────────────────────────────────────────────────

    fn scan_raw(&mut self) -> Option<Token<'a>> {
        let body_start = self.skip_leading_trim();
        match self.find_end_raw(body_start) {
            Some(at) => {
                let located = self.locate(TokenKind::Tag, at);
                Some(self.emit_around(body_start, located, TokenFlags::RAW))
            }
            None => {
                debug!(offset = body_start, "raw block runs to end of input");
                self.mode = Mode::Finished;
                self.text_token(
                    self.cursor.source_len(),
                    TokenFlags::RAW | TokenFlags::UNTERMINATED,
                )
            }
        }
    }

    /// Offset of the next `{% endraw %}` opener at or after `from`.
    fn find_end_raw(&self, from: usize) -> Option<usize> {
        let open = self.symbols.tag_start();
        let mut at = from;
        while let Some(hit) = self.cursor.find_from(at, open) {
            if self.is_end_raw_at(hit + open.len()) {
                return Some(hit);
            }
            at = hit + 1;
        }
        None
    }

    /// Whether the tag body starting at `at` is exactly `endraw`, with
    /// optional markers and surrounding whitespace, followed by the closer.
    fn is_end_raw_at(&self, mut at: usize) -> bool {
        let is_marker = |b: u8| b == b'-' || b == b'+';
        if is_marker(self.cursor.byte_at(at)) {
            at += 1;
        }
        at = self.skip_ascii_whitespace(at);
        if !self.cursor.matches_at(at, END_RAW_TAG) {
            return false;
        }
        at = self.skip_ascii_whitespace(at + END_RAW_TAG.len());
        if is_marker(self.cursor.byte_at(at)) {
            at += 1;
        }
        self.cursor.matches_at(at, self.symbols.tag_end())
    }

    fn skip_ascii_whitespace(&self, mut at: usize) -> usize {
        while self.cursor.byte_at(at).is_ascii_whitespace() {
            at += 1;
        }
        at
    }

    // ─── Delimited bodies ───────────────────────────────────────────────

    /// Find where the construct opened at `start` ends.
    fn locate(&self, kind: TokenKind, start: usize) -> Located {
        let close = self.symbols.closer(kind);
        let body_start = start + self.symbols.opener(kind).len();
        let len = self.cursor.source_len();

        if kind == TokenKind::Note {
            return match self.cursor.find_from(body_start, close) {
                Some(at) => self.closed(kind, start, body_start, at, close.len()),
                None => {
                    debug!(offset = start, "note runs to end of input");
                    Located {
                        kind,
                        span: Span::new(start, len),
                        content: Span::new(body_start, len),
                        flags: TokenFlags::UNTERMINATED,
                    }
                }
            };
        }

        let end = match self.scan_body(kind, body_start, close) {
            BodyEnd::Closed { at } => {
                return self.closed(kind, start, body_start, at, close.len());
            }
            BodyEnd::Interrupted { at } => {
                debug!(%kind, offset = start, note = at, "note opener interrupts body");
                at
            }
            BodyEnd::Unterminated => {
                debug!(%kind, offset = start, "unterminated construct degrades to text");
                len
            }
        };
        Located {
            kind: TokenKind::Fixed,
            span: Span::new(start, end),
            content: Span::new(start, end),
            flags: TokenFlags::UNTERMINATED,
        }
    }

    fn closed(
        &self,
        kind: TokenKind,
        start: usize,
        body_start: usize,
        close_at: usize,
        close_len: usize,
    ) -> Located {
        let content = Span::new(body_start, close_at);
        let (_, markers) = TokenFlags::from_markers(self.cursor.slice(body_start, close_at));
        Located {
            kind,
            span: Span::new(start, close_at + close_len),
            content,
            flags: markers,
        }
    }

    /// Walk an Expression or Tag body from `from` up to its closer.
    fn scan_body(&self, kind: TokenKind, from: usize, close: &str) -> BodyEnd {
        let bytes = self.cursor.slice(from, self.cursor.source_len()).as_bytes();
        let escape = self.symbols.escape_char();
        let note_open = self.symbols.note_start();
        let mut state = BodyState {
            quote: Quote::None,
            pending_escape: false,
        };
        let mut rel = 0;

        while rel < bytes.len() {
            let at = from + rel;
            if state.pending_escape {
                state.pending_escape = false;
                rel += self.cursor.char_at(at).map_or(1, char::len_utf8);
                continue;
            }
            let byte = bytes[rel];
            if !self.symbols.is_body_stop(kind, byte) {
                rel += 1;
                continue;
            }
            if self.cursor.char_at(at) == Some(escape) {
                state.pending_escape = true;
                rel += escape.len_utf8();
                continue;
            }
            if state.quote != Quote::None {
                if state.quote.is_closed_by(byte) {
                    state.quote = Quote::None;
                }
                rel += 1;
                continue;
            }
            state.quote = Quote::opened_by(byte);
            if state.quote == Quote::None {
                if self.cursor.matches_at(at, close) {
                    return BodyEnd::Closed { at };
                }
                if self.is_opener_at(at, note_open) {
                    return BodyEnd::Interrupted { at };
                }
            }
            rel += 1;
        }
        BodyEnd::Unterminated
    }

    // ─── Emission ───────────────────────────────────────────────────────

    /// Emit the text from `text_start` up to `located`, then the construct.
    ///
    /// Returns the first of the two and parks the other in `pending`.
    fn emit_around(
        &mut self,
        text_start: usize,
        located: Located,
        text_flags: TokenFlags,
    ) -> Token<'a> {
        let text_end = self.text_end(text_start, &located);
        let text = self.text_token(text_end, text_flags);
        self.consume_to(located.span.start);
        let construct = self.construct_token(located);
        match text {
            Some(text) => {
                self.pending = Some(construct);
                text
            }
            None => construct,
        }
    }

    /// End of the text before `located` once whitespace control is applied.
    fn text_end(&self, text_start: usize, located: &Located) -> usize {
        let end = located.span.start;
        if !located.is_recognized() {
            return end;
        }
        let text = self.cursor.slice(text_start, end);
        if located.flags.contains(TokenFlags::TRIM_BEFORE) {
            return text_start + text.trim_end().len();
        }
        if located.kind == TokenKind::Tag
            && self.symbols.lstrip_blocks()
            && !located.flags.contains(TokenFlags::KEEP_BEFORE)
        {
            let cut = text_start + text.trim_end_matches([' ', '\t']).len();
            if cut == 0 || self.cursor.byte_at(cut - 1) == b'\n' {
                return cut;
            }
        }
        end
    }

    /// Consume whitespace owed to the previous closer; returns the new
    /// position.
    fn skip_leading_trim(&mut self) -> usize {
        let start = self.cursor.pos();
        let rest = self.cursor.rest();
        let end = match mem::replace(&mut self.leading, LeadingTrim::None) {
            LeadingTrim::None => start,
            LeadingTrim::All => start + (rest.len() - rest.trim_start().len()),
            LeadingTrim::Line => {
                let blank = self.cursor.scan_while(|b| b == b' ' || b == b'\t');
                if self.cursor.matches_at(blank, "\n") {
                    blank + 1
                } else if self.cursor.matches_at(blank, "\r\n") {
                    blank + 2
                } else {
                    start
                }
            }
        };
        self.consume_to(end);
        end
    }

    /// Fixed token from the cursor up to `end`, or `None` if that is empty.
    fn text_token(&mut self, end: usize, flags: TokenFlags) -> Option<Token<'a>> {
        let start = self.cursor.pos();
        if start == end {
            return None;
        }
        let position = self.tracker.position();
        self.consume_to(end);
        let image = self.cursor.slice(start, end);
        let lexeme = Lexeme::new(image, image, Span::new(start, end), position, flags);
        Some(Token::new(TokenKind::Fixed, lexeme))
    }

    fn construct_token(&mut self, located: Located) -> Token<'a> {
        debug_assert_eq!(self.cursor.pos(), located.span.start);
        let position = self.tracker.position();
        self.consume_to(located.span.end);
        let lexeme = Lexeme::new(
            self.cursor.slice(located.span.start, located.span.end),
            self.cursor.slice(located.content.start, located.content.end),
            located.span,
            position,
            located.flags,
        );
        let token = Token::new(located.kind, lexeme);

        self.mode = Mode::InText;
        if located.is_recognized() {
            if located.flags.contains(TokenFlags::TRIM_AFTER) {
                self.leading = LeadingTrim::All;
            } else if located.kind == TokenKind::Tag
                && self.symbols.trim_blocks()
                && !located.flags.contains(TokenFlags::KEEP_AFTER)
            {
                self.leading = LeadingTrim::Line;
            }
            if self.symbols.raw_blocks() && token.tag_name() == Some(RAW_TAG) {
                self.mode = Mode::InRaw;
            }
        }
        token
    }

    /// Move the cursor to `end`, feeding every character to the tracker.
    fn consume_to(&mut self, end: usize) {
        for c in self.cursor.slice(self.cursor.pos(), end).chars() {
            self.tracker.advance(c);
        }
        self.cursor.advance_to(end);
    }
}

impl<'a> Iterator for TokenScanner<'a, '_> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let token = match self.pending.take() {
            Some(token) => token,
            None => self.produce()?,
        };
        trace!(
            kind = %token.kind(),
            span_start = token.span().start,
            span_end = token.span().end,
            line = token.start_line(),
            column = token.start_column(),
            "token"
        );
        Some(token)
    }
}

impl FusedIterator for TokenScanner<'_, '_> {}
