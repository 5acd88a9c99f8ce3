use super::*;

#[test]
fn empty_source_has_sentinel() {
    let buf = SourceBuffer::new("");
    assert!(buf.is_empty());
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.as_sentinel_bytes()[0], 0);
}

#[test]
fn content_is_copied() {
    let buf = SourceBuffer::new("local x = 1");
    assert_eq!(buf.as_bytes(), b"local x = 1");
    assert_eq!(buf.len(), 11);
}

#[test]
fn padded_to_cache_line() {
    for len in [0, 1, 61, 62, 63, 64, 65, 127, 200] {
        let source = "a".repeat(len);
        let buf = SourceBuffer::new(&source);
        let total = buf.as_sentinel_bytes().len();
        assert_eq!(total % CACHE_LINE, 0, "len {len}");
        assert!(total >= len + 3, "sentinel and lookahead must fit for len {len}");
        assert!(buf.as_sentinel_bytes()[len..].iter().all(|&b| b == 0));
    }
}

#[test]
fn bom_detection() {
    assert!(SourceBuffer::new("\u{FEFF}print(1)").starts_with_bom());
    assert!(!SourceBuffer::new("print(1)").starts_with_bom());
    assert!(!SourceBuffer::new("").starts_with_bom());
}

#[test]
fn cursor_starts_at_zero() {
    let buf = SourceBuffer::new("x");
    let cursor = buf.cursor();
    assert_eq!(cursor.pos(), 0);
    assert_eq!(cursor.current(), b'x');
}

#[test]
fn cursor_at_clamps_to_sentinel() {
    let buf = SourceBuffer::new("abc");
    assert_eq!(buf.cursor_at(1).current(), b'b');
    assert_eq!(buf.cursor_at(3).pos(), 3);
    assert!(buf.cursor_at(10).is_eof());
}

#[test]
fn peek2_at_last_byte_reads_padding() {
    for len in [61, 62, 63, 125, 126, 127] {
        let source = format!("{}.", " ".repeat(len - 1));
        let buf = SourceBuffer::new(&source);
        let last = buf.cursor_at(buf.len() - 1);
        assert_eq!(last.current(), b'.');
        assert_eq!((last.peek(), last.peek2()), (0, 0), "len {len}");
    }
}
