//! Text edits applied to a source between two parses.
//!
//! A [`TextChange`] replaces the byte range `[start, old_end)` of the old text
//! with `new_text`. The same shape as an editor's content-change event, so a
//! language server can forward edits unchanged.

use crate::Span;

/// A single text edit.
///
/// ```
/// use luma_ir::TextChange;
///
/// let change = TextChange::replace(6, 7, "yy");
/// assert_eq!(change.apply("local x = 1"), "local yy = 1");
/// assert_eq!(change.delta(), 1);
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TextChange {
    /// Start byte offset in the old text.
    pub start: u32,
    /// End byte offset in the old text (exclusive).
    pub old_end: u32,
    /// Replacement text.
    pub new_text: Box<str>,
}

impl TextChange {
    pub fn new(start: u32, old_end: u32, new_text: impl Into<Box<str>>) -> Self {
        debug_assert!(start <= old_end);
        TextChange {
            start,
            old_end,
            new_text: new_text.into(),
        }
    }

    pub fn insert(at: u32, text: impl Into<Box<str>>) -> Self {
        Self::new(at, at, text)
    }

    pub fn delete(start: u32, len: u32) -> Self {
        Self::new(start, start + len, "")
    }

    pub fn replace(start: u32, old_end: u32, text: impl Into<Box<str>>) -> Self {
        Self::new(start, old_end, text)
    }

    /// Replaced range in the old text.
    #[inline]
    pub fn old_span(&self) -> Span {
        Span::new(self.start, self.old_end)
    }

    /// Range the replacement occupies in the new text.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "edits are bounded by u32 source offsets"
    )]
    pub fn new_span(&self) -> Span {
        Span::at(self.start, self.new_text.len() as u32)
    }

    /// Change in text length.
    #[allow(
        clippy::cast_possible_wrap,
        clippy::cast_possible_truncation,
        reason = "edits are bounded by u32 source offsets"
    )]
    pub fn delta(&self) -> i64 {
        self.new_text.len() as i64 - i64::from(self.old_end - self.start)
    }

    /// Apply the edit to `old`. Offsets past the end are clamped, and offsets
    /// inside a UTF-8 sequence are moved back to the character start.
    pub fn apply(&self, old: &str) -> String {
        let start = floor_char_boundary(old, self.start as usize);
        let end = floor_char_boundary(old, self.old_end as usize).max(start);
        let mut out = String::with_capacity(old.len() - (end - start) + self.new_text.len());
        out.push_str(&old[..start]);
        out.push_str(&self.new_text);
        out.push_str(&old[end..]);
        out
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
