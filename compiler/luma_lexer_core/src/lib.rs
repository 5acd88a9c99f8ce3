//! Low-level tokenizer for Luma.
//!
//! This crate turns source bytes into `(RawTag, len)` pairs. It knows nothing
//! about keywords, language versions, literal values or diagnostics; that is
//! the job of `luma_lexer`, which "cooks" raw tokens into green tokens.
//!
//! # Layers
//!
//! - [`SourceBuffer`]: owned copy of the source with a `0x00` sentinel.
//! - [`Cursor`]: `Copy` byte cursor over the sentinel buffer.
//! - [`RawScanner`]: full scanner, every byte sequence yields a token.
//! - [`quick_scan`]: table-driven automaton for the common simple case
//!   (whitespace, an identifier/number/single punctuator, whitespace, newline).

mod cursor;
pub mod quick_scan;
mod raw_scanner;
mod source_buffer;
mod tag;

pub use cursor::Cursor;
pub use quick_scan::{quick_scan, QuickScan};
pub use raw_scanner::{long_bracket_level, tokenize, RawScanner};
pub use source_buffer::SourceBuffer;
pub use tag::{RawTag, RawToken};
