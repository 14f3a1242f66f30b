//! Per-token whitespace-control and scan-outcome flags.

use bitflags::bitflags;

bitflags! {
    /// Metadata the scanner attaches to each token.
    ///
    /// The `*_BEFORE`/`*_AFTER` bits record whitespace-control markers read
    /// from a delimited token's content (`{%-`, `+%}`, ...). Downstream
    /// layers consult them; the scanner has already applied them to the
    /// neighbouring Fixed tokens.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TokenFlags: u8 {
        /// `-` after the opener: whitespace before the token was stripped.
        const TRIM_BEFORE = 1 << 0;
        /// `-` before the closer: whitespace after the token was stripped.
        const TRIM_AFTER = 1 << 1;
        /// `+` after the opener: `lstrip_blocks` was suppressed.
        const KEEP_BEFORE = 1 << 2;
        /// `+` before the closer: `trim_blocks` was suppressed.
        const KEEP_AFTER = 1 << 3;
        /// The construct reached end of input without its closer.
        ///
        /// Set on trailing Notes, on Fixed tokens that began with an
        /// opener and degraded to text, and on a raw body with no
        /// `endraw`.
        const UNTERMINATED = 1 << 4;
        /// Verbatim body of a `{% raw %}` block.
        const RAW = 1 << 5;
    }
}

impl TokenFlags {
    /// Read whitespace-control markers off the edges of delimited content.
    ///
    /// Returns the content with the markers removed plus the marker flags.
    /// A lone marker character counts as a leading marker only.
    pub fn from_markers(content: &str) -> (&str, TokenFlags) {
        let mut flags = TokenFlags::empty();
        let mut inner = content;
        if let Some(rest) = inner.strip_prefix('-') {
            flags |= TokenFlags::TRIM_BEFORE;
            inner = rest;
        } else if let Some(rest) = inner.strip_prefix('+') {
            flags |= TokenFlags::KEEP_BEFORE;
            inner = rest;
        }
        if let Some(rest) = inner.strip_suffix('-') {
            flags |= TokenFlags::TRIM_AFTER;
            inner = rest;
        } else if let Some(rest) = inner.strip_suffix('+') {
            flags |= TokenFlags::KEEP_AFTER;
            inner = rest;
        }
        (inner, flags)
    }
}
