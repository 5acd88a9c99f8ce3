#![allow(clippy::unwrap_used, reason = "test assertions use unwrap for clarity")]

use pretty_assertions::assert_eq;

use super::*;
use crate::ErrorCode;

fn render(source: &str, diagnostics: &[Diagnostic]) -> String {
    let mut emitter = TerminalEmitter::new(Vec::new(), "main.lua", source);
    emitter.emit_all(diagnostics).unwrap();
    String::from_utf8(emitter.into_inner()).unwrap()
}

#[test]
fn test_renders_primary_snippet() {
    let source = "x = 1\nprint(\"abc\n";
    let diag = Diagnostic::error(ErrorCode::E0001).with_span(Span::new(12, 16));
    assert_eq!(
        render(source, &[diag]),
        "error[E0001]: unterminated string literal\n\
         \x20 --> main.lua:2:7\n\
         \x20 |\n\
         2 | print(\"abc\n\
         \x20 |       ^^^^\n\
         \n"
    );
}

#[test]
fn test_renders_notes_and_secondary_labels() {
    let source = "do\nx = 1\n";
    let diag = Diagnostic::error(ErrorCode::E1004)
        .with_message("expected `end`")
        .with_span(Span::point(9))
        .with_secondary_label(Span::new(0, 2), "block starts here")
        .with_note("blocks are closed with `end`");
    let out = render(source, &[diag]);
    assert!(out.starts_with("error[E1004]: expected `end`\n  --> main.lua:3:1\n"));
    assert!(out.contains("1 | do\n  | --\n   = block starts here\n"));
    assert!(out.contains("   = note: blocks are closed with `end`\n"));
}

#[test]
fn test_primary_label_follows_the_carets() {
    let source = "return 1\nx = 2\n";
    let diag = Diagnostic::error(ErrorCode::E1006)
        .with_message("`return` must be the last statement of its block")
        .with_label(Span::new(9, 10), "unreachable statement");
    let out = render(source, &[diag]);
    assert!(out.contains("2 | x = 2\n  | ^ unreachable statement\n"), "{out}");
}

#[test]
fn test_summary_pluralizes() {
    let mut emitter = TerminalEmitter::new(Vec::new(), "main.lua", "");
    emitter.emit_summary(1, 2).unwrap();
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert_eq!(out, "error: 1 error\nwarning: 2 warnings\n");
}

#[test]
fn test_colors_wrap_header() {
    let mut emitter = TerminalEmitter::new(Vec::new(), "main.lua", "x").with_colors(true);
    emitter
        .emit(&Diagnostic::warning(ErrorCode::E0004).with_span(Span::new(0, 1)))
        .unwrap();
    let out = String::from_utf8(emitter.into_inner()).unwrap();
    assert!(out.starts_with("\x1b[1;33mwarning[E0004]\x1b[0m: number literal out of range\n"));
}
