//! Line/column tracking for the scanner.
//!
//! Lines are 1-based. Columns are 0-based and count Unicode scalar values,
//! not bytes, so a line starting with `λ{{` puts the opener at column 1.
//! Only `\n` starts a new line; a `\r` in a CRLF pair occupies a column on
//! the line it ends.

use std::fmt;

/// A line/column pair as stamped on tokens.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Position {
    /// 1-based line number.
    pub line: u32,
    /// 0-based column, in characters.
    pub column: u32,
}

impl Position {
    /// Position of the first character of a source.
    pub const START: Position = Position { line: 1, column: 0 };
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Running line/column counter.
///
/// The scanner advances it exactly once per consumed character, including
/// whitespace that whitespace control strips from the token stream, so
/// positions always describe the original source. Counters saturate rather
/// than wrap on absurdly large inputs.
#[derive(Clone, Debug, Default)]
pub struct PositionTracker {
    current: Position,
}

impl PositionTracker {
    /// Create a tracker at line 1, column 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the next character to be consumed.
    #[inline]
    pub fn position(&self) -> Position {
        self.current
    }

    /// Current 1-based line.
    #[inline]
    pub fn line(&self) -> u32 {
        self.current.line
    }

    /// Current 0-based column.
    #[inline]
    pub fn column(&self) -> u32 {
        self.current.column
    }

    /// Account for one consumed character.
    #[inline]
    pub fn advance(&mut self, c: char) {
        if c == '\n' {
            self.current.line = self.current.line.saturating_add(1);
            self.current.column = 0;
        } else {
            self.current.column = self.current.column.saturating_add(1);
        }
    }
}
