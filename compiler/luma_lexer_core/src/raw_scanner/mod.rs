//! Hand-written raw scanner producing `(RawTag, len)` pairs.
//!
//! The scanner runs on a sentinel-terminated [`Cursor`] and never allocates.
//! It does not resolve keywords, validate escapes or compute numeric values;
//! those are deferred to the cooking layer in `luma_lexer`.
//!
//! # Design
//!
//! The main dispatch covers all 256 byte values. Each arm calls a focused
//! method that advances the cursor and returns `RawToken { tag, len }`. The
//! sentinel byte dispatches to `eof()`. Malformed input is encoded in the tag,
//! never as an error value, so every call makes progress until EOF.

use crate::cursor::{is_horizontal_space, Cursor};
use crate::tag::{RawTag, RawToken};

/// Allocation-free scanner.
pub struct RawScanner<'a> {
    cursor: Cursor<'a>,
    /// Set until the first token that is not a byte order mark. A shebang is
    /// only recognised while this is set.
    at_file_start: bool,
    /// `\z` inside a short string skips following line breaks.
    whitespace_escape: bool,
}

impl<'a> RawScanner<'a> {
    pub fn new(cursor: Cursor<'a>) -> Self {
        Self {
            at_file_start: cursor.pos() == 0,
            cursor,
            whitespace_escape: true,
        }
    }

    /// Scanner continuing at `cursor`. `at_file_start` comes from
    /// [`at_file_start`](Self::at_file_start) of the scanner that stopped
    /// there, so a shebang after a byte order mark is still recognised.
    pub fn resume(cursor: Cursor<'a>, at_file_start: bool) -> Self {
        Self {
            cursor,
            at_file_start,
            whitespace_escape: true,
        }
    }

    /// Whether `\z` may carry a short string across line breaks. Without
    /// it the string ends at the next line break like any other.
    #[must_use]
    pub fn with_whitespace_escape(mut self, enabled: bool) -> Self {
        self.whitespace_escape = enabled;
        self
    }

    /// Whether a shebang may still start at the current position.
    #[inline]
    pub fn at_file_start(&self) -> bool {
        self.at_file_start
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.cursor.pos()
    }

    /// Produce the next raw token.
    ///
    /// Returns `RawTag::Eof` with `len == 0` once the source is exhausted,
    /// and keeps returning it.
    pub fn next_token(&mut self) -> RawToken {
        let start = self.cursor.pos();
        if self.at_file_start {
            if let Some(token) = self.file_start(start) {
                return token;
            }
            self.at_file_start = false;
        }
        match self.cursor.current() {
            0 => self.eof(start),
            b' ' | b'\t' | 0x0B | 0x0C => self.whitespace(start),
            b'\r' => self.carriage_return(start),
            b'\n' => self.newline(start),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.identifier(start),
            b'0'..=b'9' => self.number(start),
            b'"' | b'\'' => self.string(start),
            b'-' => self.minus_or_comment(start),
            b'[' => self.left_bracket(start),
            b'/' => self.pair(start, b'/', RawTag::SlashSlash, RawTag::Slash),
            b'~' => self.pair(start, b'=', RawTag::TildeEqual, RawTag::Tilde),
            b'=' => self.pair(start, b'=', RawTag::EqualEqual, RawTag::Equal),
            b':' => self.pair(start, b':', RawTag::ColonColon, RawTag::Colon),
            b'<' => self.angle(start, b'<', RawTag::ShiftLeft, RawTag::LessEqual, RawTag::Less),
            b'>' => self.angle(
                start,
                b'>',
                RawTag::ShiftRight,
                RawTag::GreaterEqual,
                RawTag::Greater,
            ),
            b'.' => self.dot(start),
            b'+' => self.single(start, RawTag::Plus),
            b'*' => self.single(start, RawTag::Star),
            b'%' => self.single(start, RawTag::Percent),
            b'^' => self.single(start, RawTag::Caret),
            b'#' => self.single(start, RawTag::Hash),
            b'&' => self.single(start, RawTag::Amp),
            b'|' => self.single(start, RawTag::Pipe),
            b'(' => self.single(start, RawTag::LeftParen),
            b')' => self.single(start, RawTag::RightParen),
            b'{' => self.single(start, RawTag::LeftBrace),
            b'}' => self.single(start, RawTag::RightBrace),
            b']' => self.single(start, RawTag::RightBracket),
            b';' => self.single(start, RawTag::Semicolon),
            b',' => self.single(start, RawTag::Comma),
            // Control characters, `!`, `$`, `?`, `@`, `\`, `` ` ``, DEL, non-ASCII.
            _ => self.invalid_char(start),
        }
    }

    #[inline]
    fn token(&self, start: u32, tag: RawTag) -> RawToken {
        RawToken {
            tag,
            len: self.cursor.pos() - start,
        }
    }

    // ─── File start ─────────────────────────────────────────────────

    fn file_start(&mut self, start: u32) -> Option<RawToken> {
        let (b0, b1, b2) = (
            self.cursor.current(),
            self.cursor.peek(),
            self.cursor.peek2(),
        );
        if (b0, b1, b2) == (0xEF, 0xBB, 0xBF) {
            // The mark stays whitespace; a shebang may still follow it.
            self.cursor.advance_n(3);
            return Some(self.token(start, RawTag::Whitespace));
        }
        if b0 == b'#' {
            self.at_file_start = false;
            self.cursor.eat_until_newline_or_eof();
            return Some(self.token(start, RawTag::Shebang));
        }
        None
    }

    // ─── EOF ────────────────────────────────────────────────────────

    fn eof(&mut self, start: u32) -> RawToken {
        if self.cursor.is_eof() {
            RawToken {
                tag: RawTag::Eof,
                len: 0,
            }
        } else {
            // NUL inside the source.
            self.cursor.advance();
            self.token(start, RawTag::InvalidByte)
        }
    }

    // ─── Whitespace & newlines ──────────────────────────────────────

    #[inline]
    fn whitespace(&mut self, start: u32) -> RawToken {
        self.cursor.eat_whitespace();
        self.token(start, RawTag::Whitespace)
    }

    fn carriage_return(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        if self.cursor.current() == b'\n' {
            self.cursor.advance();
        }
        self.token(start, RawTag::Newline)
    }

    fn newline(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        self.token(start, RawTag::Newline)
    }

    // ─── Comments ───────────────────────────────────────────────────

    fn minus_or_comment(&mut self, start: u32) -> RawToken {
        if self.cursor.peek() != b'-' {
            return self.single(start, RawTag::Minus);
        }
        self.cursor.advance_n(2);
        if let Some(level) = self.long_bracket_open() {
            self.cursor.advance_n(level + 2);
            let tag = if self.long_bracket_body(level) {
                RawTag::BlockComment
            } else {
                RawTag::UnterminatedBlockComment
            };
            return self.token(start, tag);
        }
        self.cursor.eat_until_newline_or_eof();
        self.token(start, RawTag::LineComment)
    }

    // ─── Identifiers ────────────────────────────────────────────────

    #[inline]
    fn identifier(&mut self, start: u32) -> RawToken {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        self.token(start, RawTag::Ident)
    }

    // ─── Operators & delimiters ─────────────────────────────────────

    #[inline]
    fn single(&mut self, start: u32, tag: RawTag) -> RawToken {
        self.cursor.advance();
        self.token(start, tag)
    }

    /// `ab` or `a`.
    fn pair(&mut self, start: u32, second: u8, double: RawTag, single: RawTag) -> RawToken {
        self.cursor.advance();
        if self.cursor.current() == second {
            self.cursor.advance();
            self.token(start, double)
        } else {
            self.token(start, single)
        }
    }

    /// `<<`, `<=`, `<` and the `>` family.
    fn angle(
        &mut self,
        start: u32,
        same: u8,
        shift: RawTag,
        or_equal: RawTag,
        plain: RawTag,
    ) -> RawToken {
        self.cursor.advance();
        match self.cursor.current() {
            b if b == same => {
                self.cursor.advance();
                self.token(start, shift)
            }
            b'=' => {
                self.cursor.advance();
                self.token(start, or_equal)
            }
            _ => self.token(start, plain),
        }
    }

    fn dot(&mut self, start: u32) -> RawToken {
        match (self.cursor.peek(), self.cursor.peek2()) {
            (b'0'..=b'9', _) => self.number(start),
            (b'.', b'.') => {
                self.cursor.advance_n(3);
                self.token(start, RawTag::DotDotDot)
            }
            (b'.', _) => {
                self.cursor.advance_n(2);
                self.token(start, RawTag::DotDot)
            }
            _ => self.single(start, RawTag::Dot),
        }
    }

    fn left_bracket(&mut self, start: u32) -> RawToken {
        if let Some(level) = self.long_bracket_open() {
            self.cursor.advance_n(level + 2);
            let tag = if self.long_bracket_body(level) {
                RawTag::LongString
            } else {
                RawTag::UnterminatedLongString
            };
            return self.token(start, tag);
        }
        self.cursor.advance();
        if self.cursor.current() == b'=' {
            let level = self.cursor.count_equals();
            self.cursor.advance_n(level);
            return self.token(start, RawTag::InvalidLongBracket);
        }
        self.token(start, RawTag::LeftBracket)
    }

    // ─── Long brackets ──────────────────────────────────────────────

    /// Level of a `[=*[` opener at the cursor, without consuming it.
    fn long_bracket_open(&self) -> Option<u32> {
        if self.cursor.current() != b'[' {
            return None;
        }
        let mut ahead = self.cursor;
        ahead.advance();
        let level = ahead.count_equals();
        (ahead.peek_at(level) == b'[').then_some(level)
    }

    /// Consume up to and including the `]=*]` closer of the given level.
    /// Returns `false` when EOF comes first.
    fn long_bracket_body(&mut self, level: u32) -> bool {
        loop {
            if !self.cursor.skip_to_close_bracket() {
                return false;
            }
            self.cursor.advance();
            let equals = self.cursor.count_equals();
            if equals == level && self.cursor.peek_at(equals) == b']' {
                self.cursor.advance_n(equals + 1);
                return true;
            }
        }
    }

    // ─── Numeric literals ───────────────────────────────────────────

    fn number(&mut self, start: u32) -> RawToken {
        let tag = if self.cursor.current() == b'0' && matches!(self.cursor.peek(), b'x' | b'X') {
            self.cursor.advance_n(2);
            self.hex_body()
        } else {
            self.decimal_body()
        };

        // A numeral runs through every trailing alphanumeric and `.`; anything
        // beyond the well-formed prefix makes the whole run malformed.
        let clean_end = self.cursor.pos();
        self.cursor.eat_while(is_numeral_continue);
        if self.cursor.pos() == clean_end {
            self.token(start, tag)
        } else {
            self.token(start, RawTag::MalformedNumber)
        }
    }

    fn decimal_body(&mut self) -> RawTag {
        self.cursor.eat_while(|b| b.is_ascii_digit());
        if self.cursor.current() == b'.' {
            self.cursor.advance();
            self.cursor.eat_while(|b| b.is_ascii_digit());
        }
        if self.eat_exponent(b'e') {
            RawTag::Number
        } else {
            RawTag::MalformedNumber
        }
    }

    fn hex_body(&mut self) -> RawTag {
        let digits_start = self.cursor.pos();
        self.cursor.eat_while(|b| b.is_ascii_hexdigit());
        let mut digits = self.cursor.pos() - digits_start;
        if self.cursor.current() == b'.' {
            self.cursor.advance();
            let fraction_start = self.cursor.pos();
            self.cursor.eat_while(|b| b.is_ascii_hexdigit());
            digits += self.cursor.pos() - fraction_start;
        }
        if digits == 0 {
            return RawTag::MalformedNumber;
        }
        if self.eat_exponent(b'p') {
            RawTag::HexNumber
        } else {
            RawTag::MalformedNumber
        }
    }

    /// Consume an optional exponent introduced by `marker` (either case).
    /// Returns `false` if the marker is not followed by digits.
    fn eat_exponent(&mut self, marker: u8) -> bool {
        if self.cursor.current().to_ascii_lowercase() != marker {
            return true;
        }
        self.cursor.advance();
        if matches!(self.cursor.current(), b'+' | b'-') {
            self.cursor.advance();
        }
        if !self.cursor.current().is_ascii_digit() {
            return false;
        }
        self.cursor.eat_while(|b| b.is_ascii_digit());
        true
    }

    // ─── Strings ────────────────────────────────────────────────────

    fn string(&mut self, start: u32) -> RawToken {
        let quote = self.cursor.current();
        self.cursor.advance();
        loop {
            match self.cursor.skip_to_string_delim(quote) {
                b'\\' => {
                    self.cursor.advance();
                    self.escape_tail();
                }
                // End of line or EOF before the closing quote. The newline is
                // left for the trivia scanner.
                b'\n' | b'\r' | 0 => return self.token(start, RawTag::UnterminatedString),
                _ => {
                    self.cursor.advance();
                    return self.token(start, RawTag::String);
                }
            }
        }
    }

    /// Consume what follows a backslash far enough to resume delimiter search.
    /// Escape validity is checked by the cooker.
    fn escape_tail(&mut self) {
        match self.cursor.current() {
            b'\r' => {
                self.cursor.advance();
                if self.cursor.current() == b'\n' {
                    self.cursor.advance();
                }
            }
            b'\n' => {
                self.cursor.advance();
                if self.cursor.current() == b'\r' {
                    self.cursor.advance();
                }
            }
            b'z' if self.whitespace_escape => {
                self.cursor.advance();
                self.cursor
                    .eat_while(|b| is_horizontal_space(b) || b == b'\n' || b == b'\r');
            }
            0 if self.cursor.is_eof() => {}
            _ => self.cursor.advance_char(),
        }
    }

    // ─── Error tokens ───────────────────────────────────────────────

    fn invalid_char(&mut self, start: u32) -> RawToken {
        self.cursor.advance_char();
        self.token(start, RawTag::InvalidByte)
    }
}

impl Iterator for RawScanner<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        let tok = self.next_token();
        (tok.tag != RawTag::Eof).then_some(tok)
    }
}

/// 256-entry table for identifier continuation bytes: `[A-Za-z0-9_]`.
/// The sentinel maps to `false`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "loop counter i is 0..=255, always fits in u8"
)]
static IS_IDENT_CONTINUE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let mut i = 0u16;
    while i < 256 {
        table[i as usize] = matches!(i as u8, b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_');
        i += 1;
    }
    table
};

#[inline]
fn is_ident_continue(b: u8) -> bool {
    IS_IDENT_CONTINUE_TABLE[b as usize]
}

#[inline]
fn is_numeral_continue(b: u8) -> bool {
    is_ident_continue(b) || b == b'.'
}

/// Level of the long bracket that opens `text` (`[==[` is 2).
///
/// `text` must start at the opening `[`; returns `None` if it is not a long
/// bracket opener.
pub fn long_bracket_level(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.first() != Some(&b'[') {
        return None;
    }
    let level = bytes[1..].iter().take_while(|&&b| b == b'=').count();
    (bytes.get(level + 1) == Some(&b'[')).then_some(level)
}

/// Scan `source` and collect every raw token except the final `Eof`.
pub fn tokenize(source: &str) -> Vec<RawToken> {
    let buf = crate::SourceBuffer::new(source);
    RawScanner::new(buf.cursor()).collect()
}
