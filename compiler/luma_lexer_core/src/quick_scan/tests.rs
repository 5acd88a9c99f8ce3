use super::*;
use crate::{RawScanner, RawTag, SourceBuffer};
use pretty_assertions::assert_eq;

fn done(full_len: u32, token_start: u32, token_len: u32) -> QuickScan {
    QuickScan::Done {
        full_len,
        token_start,
        token_len,
    }
}

// ─── Classification ───────────────────────────────────────────────

#[test]
fn char_flags() {
    assert_eq!(char_flag(b' '), CharFlag::White);
    assert_eq!(char_flag(b'\r'), CharFlag::Cr);
    assert_eq!(char_flag(b'\n'), CharFlag::Lf);
    assert_eq!(char_flag(b'_'), CharFlag::Letter);
    assert_eq!(char_flag(b'7'), CharFlag::Digit);
    assert_eq!(char_flag(b'#'), CharFlag::Punct);
    assert_eq!(char_flag(b'.'), CharFlag::Dot);
    assert_eq!(char_flag(b'-'), CharFlag::Minus);
    assert_eq!(char_flag(b'['), CharFlag::Compound);
    assert_eq!(char_flag(b'"'), CharFlag::Complex);
    assert_eq!(char_flag(0xE9), CharFlag::Complex);
    assert_eq!(char_flag(0), CharFlag::Complex);
}

// ─── Accepted shapes ──────────────────────────────────────────────

#[test]
fn identifier_then_newline() {
    assert_eq!(quick_scan(b"  local x"), done(8, 2, 5));
    assert_eq!(quick_scan(b"foo\nbar"), done(4, 0, 3));
    assert_eq!(quick_scan(b"foo  \n  bar"), done(6, 0, 3));
}

#[test]
fn token_ends_at_punctuation() {
    assert_eq!(quick_scan(b"print(x)"), done(5, 0, 5));
    assert_eq!(quick_scan(b"a.b"), done(1, 0, 1));
    assert_eq!(quick_scan(b"a=1"), done(1, 0, 1));
    assert_eq!(quick_scan(b"(x"), done(1, 0, 1));
    assert_eq!(quick_scan(b")) "), done(1, 0, 1));
}

#[test]
fn numbers() {
    assert_eq!(quick_scan(b"42)"), done(2, 0, 2));
    assert_eq!(quick_scan(b"42 "), done(3, 0, 2));
    assert_eq!(quick_scan(b"7"), done(1, 0, 1));
}

#[test]
fn leading_blank_lines() {
    assert_eq!(quick_scan(b"\n\n  x\n"), done(6, 4, 1));
}

// ─── Rejected shapes ──────────────────────────────────────────────

#[test]
fn rejects_complex_starts() {
    for input in [
        &b""[..],
        b"   ",
        b"\"s\"",
        b"'s'",
        b"[[x]]",
        b"..",
        b".5",
        b"-1",
        b"--c",
        b"==",
        b"\r\nx",
        "é".as_bytes(),
    ] {
        assert_eq!(quick_scan(input), QuickScan::Bad, "{input:?}");
    }
}

#[test]
fn rejects_numbers_that_continue() {
    for input in [&b"0x1F"[..], b"1e5", b"3.14", b"1..2", b"12ab", b"1_000"] {
        assert_eq!(quick_scan(input), QuickScan::Bad, "{input:?}");
    }
}

#[test]
fn rejects_trailing_comment_or_cr() {
    assert_eq!(quick_scan(b"x -- note\n"), QuickScan::Bad);
    assert_eq!(quick_scan(b"x--note\n"), QuickScan::Bad);
    assert_eq!(quick_scan(b"x\r\n"), QuickScan::Bad);
    assert_eq!(quick_scan(b"x  \r\n"), QuickScan::Bad);
}

#[test]
fn rejects_overlong_input() {
    let long = "a".repeat(MAX_QUICK_LEN + 5);
    assert_eq!(quick_scan(long.as_bytes()), QuickScan::Bad);
}

// ─── Agreement with the full scanner ──────────────────────────────

/// Scan `input` as if it were not at the start of a file and check that
/// the full scanner sees the same trivia/token/trivia split.
fn agrees_with_full_scanner(input: &str, full_len: u32, token_start: u32, token_len: u32) {
    let padded = format!("\n{input}");
    let buf = SourceBuffer::new(&padded);
    let mut cursor = buf.cursor();
    cursor.advance();
    let mut scanner = RawScanner::new(cursor);

    let mut pos = 0u32;
    let mut tok = scanner.next_token();
    while matches!(tok.tag, RawTag::Whitespace | RawTag::Newline) {
        pos += tok.len;
        tok = scanner.next_token();
    }
    assert_eq!(pos, token_start, "leading trivia of {input:?}");
    assert_eq!(tok.len, token_len, "token width of {input:?}");
    assert!(!tok.tag.is_error(), "{input:?} scanned as {:?}", tok.tag);
    assert_ne!(tok.tag, RawTag::MalformedNumber);
    pos += tok.len;

    let mut tok = scanner.next_token();
    if tok.tag == RawTag::Whitespace {
        pos += tok.len;
        tok = scanner.next_token();
    }
    if tok.tag == RawTag::Newline {
        pos += tok.len;
    }
    assert_eq!(pos, full_len, "trailing trivia of {input:?}");
}

#[test]
fn accepted_inputs_agree_with_full_scanner() {
    for input in ["  local x", "foo  \n  bar", "print(x)", "42 ", "\n\n  x\n", "# t", "a.b"] {
        match quick_scan(input.as_bytes()) {
            QuickScan::Done {
                full_len,
                token_start,
                token_len,
            } => agrees_with_full_scanner(input, full_len, token_start, token_len),
            QuickScan::Bad => panic!("{input:?} should be accepted"),
        }
    }
}

#[allow(clippy::disallowed_types, reason = "proptest macros internally use Arc")]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn quick_scan_is_subset_of_full_scanner(input in "[ \\t\\n\\ra-z_0-9().,;+*%^#&|=<>~/:\\[\\]\"'-]{0,20}") {
            if let QuickScan::Done { full_len, token_start, token_len } = quick_scan(input.as_bytes()) {
                prop_assert!(full_len as usize <= input.len());
                prop_assert!(token_len > 0);
                agrees_with_full_scanner(&input, full_len, token_start, token_len);
            }
        }
    }
}
