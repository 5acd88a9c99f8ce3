use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E1004)
        .with_message("expected `end`")
        .with_label(Span::new(10, 12), "block opened here")
        .with_note("every `do` needs an `end`");

    assert_eq!(diag.code, ErrorCode::E1004);
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.span, Span::new(10, 12));
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.notes, ["every `do` needs an `end`"]);
    assert!(diag.is_error());
}

#[test]
fn test_secondary_label_keeps_primary_span() {
    let diag = Diagnostic::warning(ErrorCode::E0004)
        .with_span(Span::new(0, 4))
        .with_secondary_label(Span::new(8, 9), "context");
    assert_eq!(diag.span, Span::new(0, 4));
    assert!(!diag.labels[0].is_primary);
    assert!(!diag.is_error());
}

#[test]
fn test_display_falls_back_to_summary() {
    let diag = Diagnostic::error(ErrorCode::E0001).with_span(Span::new(3, 7));
    assert_eq!(diag.to_string(), "error[E0001]: unterminated string literal at 3..7");
    let diag = diag.with_message("custom");
    assert_eq!(diag.to_string(), "error[E0001]: custom at 3..7");
}

#[test]
fn test_vec_is_a_sink() {
    let mut sink: Vec<Diagnostic> = Vec::new();
    sink.report(Diagnostic::error(ErrorCode::E1001));
    sink.report_all([
        Diagnostic::error(ErrorCode::E1002),
        Diagnostic::warning(ErrorCode::E0004),
    ]);
    let codes: Vec<_> = sink.iter().map(|d| d.code).collect();
    assert_eq!(codes, [ErrorCode::E1001, ErrorCode::E1002, ErrorCode::E0004]);
}

#[test]
fn test_severity_display() {
    assert_eq!(Severity::Error.to_string(), "error");
    assert_eq!(Severity::Warning.to_string(), "warning");
}
