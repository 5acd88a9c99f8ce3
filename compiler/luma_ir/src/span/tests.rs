use super::*;

#[test]
fn span_basics() {
    let span = Span::new(4, 9);
    assert_eq!(span.len(), 5);
    assert!(!span.is_empty());
    assert!(span.contains(4));
    assert!(!span.contains(9));
    assert!(span.contains_span(Span::new(5, 9)));
    assert_eq!(span.merge(Span::new(1, 2)), Span::new(1, 9));
    assert_eq!(Span::at(3, 2), Span::new(3, 5));
    assert_eq!(format!("{span:?}"), "4..9");
}

#[test]
fn intersects_includes_touching_empty_span() {
    let span = Span::new(4, 9);
    assert!(span.intersects(Span::new(8, 12)));
    assert!(span.intersects(Span::point(9)));
    assert!(!span.intersects(Span::new(10, 12)));
}

#[test]
fn line_index_mixed_newlines() {
    let index = LineIndex::new("a\nbc\r\nd\re");
    assert_eq!(index.line_count(), 4);
    assert_eq!(index.line_col(0), LineCol { line: 1, col: 1 });
    assert_eq!(index.line_col(3), LineCol { line: 2, col: 2 });
    assert_eq!(index.line_col(6), LineCol { line: 3, col: 1 });
    assert_eq!(index.line_col(8), LineCol { line: 4, col: 1 });
    assert_eq!(index.line_start(2), Some(2));
    assert_eq!(index.line_start(0), None);
    assert_eq!(index.line_start(9), None);
}

#[test]
fn line_col_clamps_past_end() {
    let index = LineIndex::new("ab");
    assert_eq!(index.line_col(100), LineCol { line: 1, col: 3 });
    assert_eq!(index.line_col(100).to_string(), "1:3");
}

#[test]
fn empty_text_has_one_line() {
    let index = LineIndex::new("");
    assert_eq!(index.line_count(), 1);
    assert_eq!(index.line_col(0), LineCol { line: 1, col: 1 });
}
