use crate::SourceBuffer;

use super::Cursor;

// === Navigation ===

#[test]
fn advance_and_peek() {
    let buf = SourceBuffer::new("abc");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.current(), b'a');
    assert_eq!(cursor.peek(), b'b');
    assert_eq!(cursor.peek2(), b'c');
    cursor.advance();
    assert_eq!(cursor.current(), b'b');
    assert_eq!(cursor.pos(), 1);
    cursor.advance_n(2);
    assert!(cursor.is_eof());
}

#[test]
fn peek_past_end_reads_padding() {
    let buf = SourceBuffer::new("a");
    let cursor = buf.cursor();
    assert_eq!(cursor.peek(), 0);
    assert_eq!(cursor.peek2(), 0);
}

#[test]
fn interior_nul_is_not_eof() {
    let buf = SourceBuffer::new("a\0b");
    let mut cursor = buf.cursor();
    cursor.advance();
    assert_eq!(cursor.current(), 0);
    assert!(!cursor.is_eof());
}

// === Slicing ===

#[test]
fn slice_and_slice_from() {
    let buf = SourceBuffer::new("local x");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.slice(0, 5), "local");
    cursor.advance_n(5);
    assert_eq!(cursor.slice_from(0), "local");
}

// === Scanning helpers ===

#[test]
fn eat_whitespace_includes_vt_and_ff() {
    let buf = SourceBuffer::new(" \t\x0B\x0Cx");
    let mut cursor = buf.cursor();
    cursor.eat_whitespace();
    assert_eq!(cursor.current(), b'x');
}

#[test]
fn eat_whitespace_stops_at_newline() {
    let buf = SourceBuffer::new("  \nx");
    let mut cursor = buf.cursor();
    cursor.eat_whitespace();
    assert_eq!(cursor.current(), b'\n');
}

#[test]
fn eat_until_newline_finds_lf_and_cr() {
    let buf = SourceBuffer::new("-- hi\nx");
    let mut cursor = buf.cursor();
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.pos(), 5);

    let buf = SourceBuffer::new("-- hi\r\nx");
    let mut cursor = buf.cursor();
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.current(), b'\r');
}

#[test]
fn eat_until_newline_hits_eof() {
    let buf = SourceBuffer::new("-- trailing");
    let mut cursor = buf.cursor();
    cursor.eat_until_newline_or_eof();
    assert!(cursor.is_eof());
}

#[test]
fn skip_to_string_delim_respects_quote() {
    let buf = SourceBuffer::new("ab\"c'd");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_string_delim(b'\''), b'\'');
    assert_eq!(cursor.pos(), 4);

    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_string_delim(b'"'), b'"');
    assert_eq!(cursor.pos(), 2);
}

#[test]
fn skip_to_string_delim_eof() {
    let buf = SourceBuffer::new("abc");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.skip_to_string_delim(b'"'), 0);
    assert!(cursor.is_eof());
}

#[test]
fn close_bracket_and_equals() {
    let buf = SourceBuffer::new("text]==]");
    let mut cursor = buf.cursor();
    assert!(cursor.skip_to_close_bracket());
    assert_eq!(cursor.pos(), 4);
    cursor.advance();
    assert_eq!(cursor.count_equals(), 2);
    assert_eq!(cursor.pos(), 5, "count_equals does not consume");
}

#[test]
fn close_bracket_missing() {
    let buf = SourceBuffer::new("no closer");
    let mut cursor = buf.cursor();
    assert!(!cursor.skip_to_close_bracket());
    assert!(cursor.is_eof());
}

#[test]
fn utf8_widths() {
    assert_eq!(Cursor::utf8_char_width(b'a'), 1);
    assert_eq!(Cursor::utf8_char_width(0xC3), 2);
    assert_eq!(Cursor::utf8_char_width(0xE2), 3);
    assert_eq!(Cursor::utf8_char_width(0xF0), 4);

    let buf = SourceBuffer::new("€x");
    let mut cursor = buf.cursor();
    cursor.advance_char();
    assert_eq!(cursor.current(), b'x');
}
