//! Escape processing for string literals.
//!
//! String values are byte sequences, not text: `"\255"` is one byte and
//! `"\u{7FFFFFFF}"` encodes to six bytes of extended UTF-8. Problems are
//! pushed into the error accumulator and the raw escape bytes are kept in
//! the value, so a bad escape never hides the rest of the string.
//!
//! | escape                  | version | value                      |
//! |-------------------------|---------|----------------------------|
//! | `\a \b \f \n \r \t \v`  | all     | control byte               |
//! | `\\ \" \'`              | all     | the character              |
//! | `\` + line break        | all     | `\n`                       |
//! | `\ddd`                  | all     | byte, at most 255          |
//! | `\xXX`                  | 5.2+    | byte                       |
//! | `\z`                    | 5.2+    | skips following whitespace |
//! | `\u{XXX}`               | 5.3+    | extended UTF-8, < 2^31     |

use luma_ir::{Feature, LanguageVersion, Span};
use smallvec::SmallVec;

use crate::lex_error::{EscapeProblem, LexError};

/// Largest code point `\u{...}` accepts.
const MAX_UNICODE_ESCAPE: u32 = 0x7FFF_FFFF;

/// Cook the body of a quoted string (between the quotes).
///
/// `base_offset` is the absolute offset of `content`, used for error spans.
pub(crate) fn cook_short_string(
    content: &str,
    base_offset: u32,
    version: LanguageVersion,
    errors: &mut Vec<LexError>,
) -> Vec<u8> {
    let bytes = content.as_bytes();
    if !bytes.contains(&b'\\') {
        return bytes.to_vec();
    }

    let mut cooker = EscapeCooker {
        content,
        bytes,
        pos: 0,
        base_offset,
        version,
        out: Vec::with_capacity(bytes.len()),
        errors,
    };
    cooker.run();
    cooker.out
}

/// Cook the text of a long string, delimiters included.
///
/// One line break directly after the opener is dropped and every line break
/// inside becomes `\n`, as the reference interpreter reads them.
pub(crate) fn cook_long_string(text: &str, level: usize, terminated: bool) -> Vec<u8> {
    let delimiter = level + 2;
    let end = if terminated {
        text.len().saturating_sub(delimiter).max(delimiter)
    } else {
        text.len()
    };
    let body = text.as_bytes().get(delimiter..end).unwrap_or_default();

    let mut out = Vec::with_capacity(body.len());
    let mut i = skip_line_break(body, 0);
    while let Some(&b) = body.get(i) {
        if matches!(b, b'\n' | b'\r') {
            out.push(b'\n');
            i = skip_line_break(body, i);
        } else {
            out.push(b);
            i += 1;
        }
    }
    out
}

/// Position after the line break at `i` (`\n`, `\r`, `\r\n` or `\n\r`), or
/// `i` itself if there is none.
fn skip_line_break(bytes: &[u8], i: usize) -> usize {
    match (bytes.get(i), bytes.get(i + 1)) {
        (Some(b'\n'), Some(b'\r')) | (Some(b'\r'), Some(b'\n')) => i + 2,
        (Some(b'\n' | b'\r'), _) => i + 1,
        _ => i,
    }
}

struct EscapeCooker<'a, 'e> {
    content: &'a str,
    bytes: &'a [u8],
    pos: usize,
    base_offset: u32,
    version: LanguageVersion,
    out: Vec<u8>,
    errors: &'e mut Vec<LexError>,
}

impl EscapeCooker<'_, '_> {
    fn run(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'\\' {
                self.escape();
            } else {
                self.out.push(b);
                self.pos += 1;
            }
        }
    }

    #[inline]
    fn peek(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.pos + n).copied()
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "source offsets bounded by u32; the whole source is < u32::MAX bytes"
    )]
    fn span(&self, start: usize, end: usize) -> Span {
        Span::new(
            self.base_offset + start as u32,
            self.base_offset + end as u32,
        )
    }

    /// Keep `start..end` verbatim and move past it.
    fn keep_raw(&mut self, start: usize, end: usize) {
        self.out.extend_from_slice(&self.bytes[start..end]);
        self.pos = end;
    }

    fn reject(&mut self, start: usize, end: usize, problem: EscapeProblem) {
        self.errors
            .push(LexError::invalid_escape(self.span(start, end), problem));
        self.keep_raw(start, end);
    }

    /// `self.pos` is at the backslash.
    fn escape(&mut self) {
        let start = self.pos;
        let Some(marker) = self.peek(1) else {
            self.reject(start, start + 1, EscapeProblem::Trailing);
            return;
        };
        let simple = match marker {
            b'a' => Some(0x07),
            b'b' => Some(0x08),
            b'f' => Some(0x0C),
            b'n' => Some(b'\n'),
            b'r' => Some(b'\r'),
            b't' => Some(b'\t'),
            b'v' => Some(0x0B),
            b'\\' | b'"' | b'\'' => Some(marker),
            _ => None,
        };
        if let Some(byte) = simple {
            self.out.push(byte);
            self.pos += 2;
            return;
        }
        match marker {
            b'\n' | b'\r' => {
                self.out.push(b'\n');
                self.pos = skip_line_break(self.bytes, start + 1);
            }
            b'0'..=b'9' => self.decimal(start),
            b'x' => {
                if self.gate(start, Feature::HexEscape) {
                    self.hexadecimal(start);
                }
            }
            b'z' => {
                if self.gate(start, Feature::WhitespaceEscape) {
                    self.pos += 2;
                    while self
                        .peek(0)
                        .is_some_and(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C))
                    {
                        self.pos += 1;
                    }
                }
            }
            b'u' => {
                if self.gate(start, Feature::UnicodeEscape) {
                    self.unicode(start);
                }
            }
            _ => {
                let width = self.content[start + 1..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.reject(start, start + 1 + width, EscapeProblem::Unknown);
            }
        }
    }

    /// Returns `true` when `feature` is available. Otherwise reports it and
    /// keeps the backslash and marker verbatim.
    fn gate(&mut self, start: usize, feature: Feature) -> bool {
        if self.version.supports(feature) {
            return true;
        }
        self.errors
            .push(LexError::not_available(self.span(start, start + 2), feature));
        self.keep_raw(start, start + 2);
        false
    }

    fn decimal(&mut self, start: usize) {
        let digits_start = start + 1;
        let mut end = digits_start;
        let mut value: u32 = 0;
        while end < digits_start + 3 {
            match self.bytes.get(end) {
                Some(&b) if b.is_ascii_digit() => {
                    value = value * 10 + u32::from(b - b'0');
                    end += 1;
                }
                _ => break,
            }
        }
        match u8::try_from(value) {
            Ok(byte) => {
                self.out.push(byte);
                self.pos = end;
            }
            Err(_) => self.reject(start, end, EscapeProblem::DecimalTooLarge),
        }
    }

    fn hexadecimal(&mut self, start: usize) {
        let mut end = start + 2;
        let mut value: u8 = 0;
        while end < start + 4 {
            match self.bytes.get(end).and_then(|&b| hex_digit(b)) {
                Some(digit) => {
                    value = value * 16 + digit;
                    end += 1;
                }
                None => {
                    self.reject(start, end, EscapeProblem::MissingHexDigits);
                    return;
                }
            }
        }
        self.out.push(value);
        self.pos = end;
    }

    fn unicode(&mut self, start: usize) {
        let mut end = start + 2;
        if self.bytes.get(end) != Some(&b'{') {
            self.reject(start, end, EscapeProblem::MalformedUnicode);
            return;
        }
        end += 1;
        let digits_start = end;
        let mut value: u64 = 0;
        while let Some(digit) = self.bytes.get(end).and_then(|&b| hex_digit(b)) {
            value = (value * 16 + u64::from(digit)).min(u64::from(u32::MAX) + 1);
            end += 1;
        }
        if end == digits_start || self.bytes.get(end) != Some(&b'}') {
            self.reject(start, end, EscapeProblem::MalformedUnicode);
            return;
        }
        end += 1;
        match u32::try_from(value) {
            Ok(code) if code <= MAX_UNICODE_ESCAPE => {
                encode_utf8_extended(code, &mut self.out);
                self.pos = end;
            }
            _ => self.reject(start, end, EscapeProblem::UnicodeTooLarge),
        }
    }
}

#[inline]
fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// UTF-8 extended to 31-bit code points (up to six bytes), surrogates
/// included.
#[allow(
    clippy::cast_possible_truncation,
    reason = "every pushed value is masked to fit a byte"
)]
pub(crate) fn encode_utf8_extended(code: u32, out: &mut Vec<u8>) {
    if code < 0x80 {
        out.push(code as u8);
        return;
    }
    let mut rest = code;
    let mut max_first: u32 = 0x3F;
    let mut tail: SmallVec<[u8; 6]> = SmallVec::new();
    loop {
        tail.push(0x80 | (rest & 0x3F) as u8);
        rest >>= 6;
        max_first >>= 1;
        if rest <= max_first {
            break;
        }
    }
    out.push(((!max_first << 1) | rest) as u8);
    out.extend(tail.iter().rev());
}
