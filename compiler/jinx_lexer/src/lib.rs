//! Tokenizer for Jinja-family templates.
//!
//! Splits template source into literal text and the three delimited
//! constructs: expressions (`{{ }}`), tags (`{% %}`) and notes (`{# #}`).
//! Delimiters, the escape character and whitespace control come from a
//! [`SymbolTable`], which is validated once and shared by any number of
//! scans.
//!
//! ```
//! use jinx_lexer::{scan, SymbolTable, TokenKind};
//!
//! let symbols = SymbolTable::default();
//! let kinds: Vec<_> = scan("Hi {{ name }}!", &symbols).map(|t| t.kind()).collect();
//! assert_eq!(kinds, [TokenKind::Fixed, TokenKind::Expression, TokenKind::Fixed]);
//! ```
//!
//! Scanning never fails. Unclosed expressions and tags come back as text
//! flagged [`TokenFlags::UNTERMINATED`]; an unclosed note runs to the end of
//! the input. The only error is [`ConfigurationError`], from
//! [`SymbolTable::new`].

mod cursor;
mod error;
mod position;
mod scanner;
mod span;
mod symbols;
mod token;

pub use error::{ConfigurationError, DelimiterSide};
pub use position::{Position, PositionTracker};
pub use scanner::{scan, tokenize, TokenScanner};
pub use span::Span;
pub use symbols::{
    is_opener_boundary, DelimiterPair, Delimiters, LegacyOverrides, OpenerBoundary, SymbolTable,
    SyntaxConfig, WhitespaceConfig,
};
pub use token::{Lexeme, TagToken, Token, TokenFlags, TokenKind};
