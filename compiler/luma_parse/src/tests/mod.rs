//! Crate-level parser tests and shared helpers.

#![allow(clippy::unwrap_used, reason = "test assertions use unwrap for clarity")]

use luma_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode, Severity, SeverityPolicy};
use luma_ir::{
    CancellationToken, Cancelled, GreenElement, GreenNode, LanguageVersion, ParseOptions,
    SyntaxKind,
};
use pretty_assertions::assert_eq;

use crate::{
    parse, parse_expression, parse_into, parse_with_cancellation, parse_with_policy, SyntaxTree,
};

/// S-expression of a green node: node kinds, token texts, `<Kind>` for
/// missing tokens and `EOF` for the end of file.
pub(crate) fn sexp(node: &GreenNode) -> String {
    let mut out = String::new();
    write_sexp(node, &mut out);
    out
}

fn write_sexp(node: &GreenNode, out: &mut String) {
    out.push_str(&format!("({:?}", node.kind()));
    for child in node.children() {
        out.push(' ');
        match child {
            GreenElement::Node(node) => write_sexp(node, out),
            GreenElement::Token(token) if token.is_missing() => {
                out.push_str(&format!("<{:?}>", token.kind()));
            }
            GreenElement::Token(token) if token.kind() == SyntaxKind::EndOfFileToken => {
                out.push_str("EOF");
            }
            GreenElement::Token(token) => out.push_str(token.text()),
        }
    }
    out.push(')');
}

/// S-expressions of the top-level statements of `source`.
pub(crate) fn statements_in(source: &str, options: &ParseOptions) -> Vec<String> {
    let tree = parse(source, options);
    tree.green()
        .children()
        .iter()
        .filter_map(GreenElement::as_node)
        .map(|node| sexp(node))
        .collect()
}

pub(crate) fn codes(tree: &SyntaxTree) -> Vec<ErrorCode> {
    tree.diagnostics().iter().map(|d| d.code).collect()
}

#[test]
fn sexp_marks_missing_tokens() {
    let tree = parse("if x then", &ParseOptions::default());
    assert_eq!(
        sexp(tree.green()),
        "(CompilationUnit (IfStatement if (NameExpression x) then (Block) <EndKeyword>) EOF)"
    );
}

#[test]
fn diagnostics_from_both_phases_are_ordered_by_position() {
    let tree = parse("x = 'abc\ny = = 2", &ParseOptions::default());
    let found: Vec<_> = tree.diagnostics().iter().map(|d| (d.code, d.span.start)).collect();
    assert_eq!(
        found,
        [
            (ErrorCode::E0001, 4),
            (ErrorCode::E1002, 13),
            (ErrorCode::E1001, 13),
            (ErrorCode::E1001, 15),
        ]
    );
}

#[test]
fn parse_into_appends_each_file_in_order() {
    let options = ParseOptions::default();
    let mut sink: Vec<Diagnostic> = Vec::new();
    let first = parse_into("x = 'abc\ny = = 2", &options, &mut sink);
    let second = parse_into("break", &options, &mut sink);
    let expected: Vec<_> = first
        .diagnostics()
        .iter()
        .chain(second.diagnostics().iter())
        .cloned()
        .collect();
    assert_eq!(sink, expected);
    assert_eq!(sink.last().map(|d| d.code), Some(ErrorCode::E1007));
}

#[test]
fn parse_into_accepts_any_sink() {
    #[derive(Default)]
    struct ErrorCount(usize);

    impl DiagnosticSink for ErrorCount {
        fn report(&mut self, diagnostic: Diagnostic) {
            self.0 += usize::from(diagnostic.is_error());
        }
    }

    let mut count = ErrorCount::default();
    parse_into("local x = 1", &ParseOptions::default(), &mut count);
    assert_eq!(count.0, 0);
    parse_into("x = 'abc\ny = = 2", &ParseOptions::default(), &mut count);
    assert_eq!(count.0, 4);
}

#[test]
fn policy_reaches_parser_diagnostics() {
    let policy = SeverityPolicy::new().with_override(ErrorCode::E1007, Severity::Warning);
    let tree = parse_with_policy("break", &ParseOptions::default(), &policy);
    assert_eq!(codes(&tree), [ErrorCode::E1007]);
    assert!(!tree.has_errors());
}

#[test]
fn policy_reaches_lexer_diagnostics() {
    let policy = SeverityPolicy::new()
        .with_version_override(ErrorCode::E0005, LanguageVersion::Lua54, Severity::Note);
    let tree = parse_with_policy("x = '\\q'", &ParseOptions::default(), &policy);
    assert_eq!(tree.diagnostics()[0].severity, Severity::Note);
}

#[test]
fn cancelled_token_stops_parse() {
    let token = CancellationToken::new();
    token.cancel();
    let result = parse_with_cancellation("local x = 1", &ParseOptions::default(), &token);
    assert_eq!(result.map(|tree| tree.id()), Err(Cancelled));
}

#[test]
fn live_token_parses_normally() {
    let token = CancellationToken::new();
    let tree = parse_with_cancellation("local x = 1", &ParseOptions::default(), &token).unwrap();
    assert!(tree.diagnostics().is_empty());
    assert_eq!(tree.root().full_text(), "local x = 1");
}

#[test]
fn expression_entry_skips_trailing_tokens() {
    let tree = parse_expression("a b", &ParseOptions::default());
    assert_eq!(
        sexp(tree.green()),
        "(CompilationUnit (NameExpression a) EOF)"
    );
    assert_eq!(codes(&tree), [ErrorCode::E1001]);
    let eof = tree.green().last_token().unwrap();
    assert_eq!(eof.leading()[0].kind(), SyntaxKind::SkippedTokensTrivia);
    assert_eq!(tree.root().full_text(), "a b");
}

#[test]
fn expression_entry_allows_varargs() {
    let tree = parse_expression("...", &ParseOptions::default());
    assert!(tree.diagnostics().is_empty());
}
