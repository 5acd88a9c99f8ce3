//! Cursor over a sentinel-terminated buffer.
//!
//! EOF is the sentinel byte (`0x00`) at a position at or past the source
//! length. A NUL inside the source is distinguished by comparing `pos`
//! against `source_len`.

/// Byte cursor over a sentinel-terminated buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// The cursor is [`Copy`], so saving and restoring it is a plain assignment.
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and every byte after it is `0x00`.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    buf: &'a [u8],
    pos: u32,
    source_len: u32,
}

const _: () = assert!(std::mem::size_of::<Cursor<'static>>() <= 24);

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            pos: 0,
            source_len,
        }
    }

    /// Byte at the current position (`0x00` at EOF).
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Byte one position ahead.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Byte two positions ahead.
    #[inline]
    pub fn peek2(&self) -> u8 {
        self.buf[self.pos as usize + 2]
    }

    /// Byte `n` positions ahead. `pos + n` must not pass the sentinel
    /// by more than the padding.
    #[inline]
    pub fn peek_at(&self, n: u32) -> u8 {
        self.buf[(self.pos + n) as usize]
    }

    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Returns `true` at the sentinel.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Source text between two byte offsets.
    ///
    /// # Contract
    ///
    /// `start..end` lies within the source and on character boundaries. The
    /// scanner only produces such boundaries because it always consumes whole
    /// UTF-8 characters.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(start <= end && end <= self.source_len);
        // The buffer was copied from a `&str`; a non-boundary slice is a
        // scanner bug, so fall back to the empty string instead of panicking.
        std::str::from_utf8(&self.buf[start as usize..end as usize]).unwrap_or_default()
    }

    /// Source text from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` holds for the current byte.
    ///
    /// `pred(0)` must be `false` so the sentinel terminates the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Number of bytes in the UTF-8 character led by `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past one full UTF-8 character.
    #[inline]
    pub fn advance_char(&mut self) {
        let width = Self::utf8_char_width(self.current());
        self.advance_n(width);
    }

    /// Advance horizontal whitespace: space, tab, vertical tab, form feed.
    #[inline]
    pub fn eat_whitespace(&mut self) {
        self.eat_while(is_horizontal_space);
    }

    /// Advance to the next `\n` or `\r`, or EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_newline_or_eof(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr2(b'\n', b'\r', remaining) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
    }

    /// Advance past ordinary short-string content. Returns the byte found
    /// (`quote`, `\`, `\n` or `\r`), or 0 at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_string_delim(&mut self, quote: u8) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        let primary = memchr::memchr3(quote, b'\\', b'\n', remaining);
        let cr = memchr::memchr(b'\r', remaining);
        match earliest_of(primary, cr) {
            Some(offset) => {
                self.pos += offset as u32;
                self.current()
            }
            None => {
                self.pos = self.source_len;
                0
            }
        }
    }

    /// Advance to the next `]`. Returns `false` (cursor at EOF) if none.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_close_bracket(&mut self) -> bool {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr(b']', remaining) {
            Some(offset) => {
                self.pos += offset as u32;
                true
            }
            None => {
                self.pos = self.source_len;
                false
            }
        }
    }

    /// Count `=` bytes starting at the current position without consuming.
    pub fn count_equals(&self) -> u32 {
        let mut n = 0;
        while self.buf[(self.pos + n) as usize] == b'=' {
            n += 1;
        }
        n
    }
}

/// Lua whitespace inside a line.
#[inline]
pub(crate) fn is_horizontal_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | 0x0B | 0x0C)
}

fn earliest_of(a: Option<usize>, b: Option<usize>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (Some(x), None) | (None, Some(x)) => Some(x),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests;
