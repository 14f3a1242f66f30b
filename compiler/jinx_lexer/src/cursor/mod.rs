//! Forward-only byte cursor over borrowed template source.
//!
//! The scanner owns one cursor and only ever moves it forward. Lookahead
//! reads go through absolute offsets (`byte_at`, `char_at`, `matches_at`)
//! and return a neutral value past the end of the source instead of
//! panicking.
//!
//! Searches for openers and closers go through `memchr`, so literal text
//! between delimiters is skipped without visiting each byte in the scanner
//! loop.

use memchr::memmem;

/// Forward-only cursor over a `&str`.
///
/// # Invariant
///
/// `pos` is always on a UTF-8 character boundary of `src` and never
/// exceeds `src.len()`.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at position 0.
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// Returns the byte at absolute offset `at`, or `0x00` past EOF.
    #[inline]
    pub fn byte_at(&self, at: usize) -> u8 {
        self.src.as_bytes().get(at).copied().unwrap_or(0)
    }

    /// Returns the character starting at absolute offset `at`.
    ///
    /// `at` must be a character boundary; `None` past EOF.
    pub fn char_at(&self, at: usize) -> Option<char> {
        self.src.get(at..).and_then(|rest| rest.chars().next())
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Length of the source in bytes.
    #[inline]
    pub fn source_len(&self) -> usize {
        self.src.len()
    }

    /// The unconsumed remainder of the source.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    /// Returns `true` if the source at absolute offset `at` starts with
    /// `needle`.
    #[inline]
    pub fn matches_at(&self, at: usize, needle: &str) -> bool {
        self.src
            .as_bytes()
            .get(at..)
            .is_some_and(|rest| rest.starts_with(needle.as_bytes()))
    }

    /// Extract a source substring as `&str`.
    ///
    /// # Contract
    ///
    /// `start..end` must fall within the source and on character
    /// boundaries. Offsets produced by the scanner always do.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        &self.src[start..end]
    }

    /// Move the cursor forward to absolute offset `to`.
    ///
    /// The cursor is forward-only: `to` must not precede the current
    /// position and must lie on a character boundary.
    #[inline]
    pub fn advance_to(&mut self, to: usize) {
        debug_assert!(to >= self.pos, "cursor moved backwards: {} -> {to}", self.pos);
        debug_assert!(to <= self.src.len(), "cursor moved past EOF: {to}");
        debug_assert!(self.src.is_char_boundary(to), "not a char boundary: {to}");
        self.pos = to;
    }

    /// Absolute offset of the first occurrence of `needle` at or after
    /// `from`, using `memmem`.
    pub fn find_from(&self, from: usize, needle: &str) -> Option<usize> {
        let haystack = self.src.as_bytes().get(from..)?;
        memmem::find(haystack, needle.as_bytes()).map(|offset| from + offset)
    }

    /// Absolute offset of the first byte at or after `from` that is one of
    /// `needles`.
    ///
    /// Takes at most three needles, one per opener lead byte, and
    /// dispatches to `memchr`, `memchr2` or `memchr3`.
    pub fn find_any_from(&self, from: usize, needles: &[u8]) -> Option<usize> {
        debug_assert!(needles.len() <= 3, "too many needles: {needles:?}");
        let haystack = self.src.as_bytes().get(from..)?;
        let hit = match *needles {
            [a] => memchr::memchr(a, haystack),
            [a, b] => memchr::memchr2(a, b, haystack),
            [a, b, c] => memchr::memchr3(a, b, c, haystack),
            _ => None,
        };
        hit.map(|offset| from + offset)
    }

    /// Offset of the first byte at or after the current position for which
    /// `pred` returns `false`, or the source length.
    ///
    /// Does not move the cursor.
    #[inline]
    pub fn scan_while(&self, pred: impl Fn(u8) -> bool) -> usize {
        let bytes = self.src.as_bytes();
        let mut at = self.pos;
        while at < bytes.len() && pred(bytes[at]) {
            at += 1;
        }
        at
    }
}

#[cfg(test)]
mod tests;
