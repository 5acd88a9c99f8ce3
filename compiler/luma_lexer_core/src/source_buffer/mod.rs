//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content so
//! the scanner can detect EOF without explicit bounds checks. At least two
//! more zero bytes follow the sentinel so `peek()` and `peek2()` stay in
//! bounds at the last source byte, and the total size is rounded up to the
//! next 64-byte boundary.

use crate::Cursor;

/// Cache line size in bytes, used for padding.
const CACHE_LINE: usize = 64;

/// Zero bytes guaranteed after the sentinel.
const LOOKAHEAD: usize = 2;

/// UTF-8 byte order mark.
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, 0x00, 0x00, padding_zeros...]
///  ^                ^     ^           ^
///  0                |     lookahead   rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the source content (excludes sentinel and padding).
    source_len: u32,
}

impl SourceBuffer {
    /// Copy `source` into a padded, sentinel-terminated buffer.
    ///
    /// Sources larger than `u32::MAX` bytes saturate `len()`; the scanner
    /// then stops at `u32::MAX` and reports EOF.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        // Round up to the next 64-byte boundary, keeping the sentinel plus
        // the two bytes `peek2()` may read from it.
        let padded_len = (source_len + 1 + LOOKAHEAD + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        Self {
            buf,
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
        }
    }

    /// Source bytes without sentinel or padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Full buffer, including the sentinel at [`len()`](Self::len).
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Cursor positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Cursor positioned at byte `pos`, clamped to the sentinel.
    pub fn cursor_at(&self, pos: u32) -> Cursor<'_> {
        let mut cursor = self.cursor();
        cursor.advance_n(pos.min(self.source_len));
        cursor
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Returns `true` if the source starts with a UTF-8 byte order mark.
    ///
    /// The scanner reports the mark as leading whitespace so a shebang line
    /// directly after it is still recognised.
    pub fn starts_with_bom(&self) -> bool {
        self.as_bytes().starts_with(&UTF8_BOM)
    }
}

const _: () = assert!(std::mem::size_of::<SourceBuffer>() <= 32);

#[cfg(test)]
mod tests;
