//! End-to-end parser tests: whole programs, the empty source, deep nesting
//! and the lossless property over generated input.
//!
//! Set `RUST_LOG=luma_parse=debug` to see recovery decisions.

#![allow(clippy::unwrap_used, reason = "test assertions use unwrap for clarity")]

use std::sync::Once;

use luma_ir::{CancellationToken, GreenElement, ParseOptions, SourceKind, SyntaxKind};
use luma_parse::{parse, parse_expression, parse_with_cancellation};
use pretty_assertions::assert_eq;

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer())
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

const PROGRAM: &str = r##"#!/usr/bin/env lua
-- Word frequencies.
local counts <const> = {}
local order = {}

local function add(word)
    if not counts[word] then
        counts[word] = 0
        order[#order + 1] = word
    end
    counts[word] = counts[word] + 1
end

function stats.report(limit, ...)
    table.sort(order, function(a, b) return counts[a] > counts[b] end)
    for i = 1, math.min(limit, #order) do
        local word = order[i]
        print(("%-12s %d"):format(word, counts[word]))
    end
    local extra = select("#", ...)
    return extra // 2, extra & 1
end

for line in io.lines() do
    for word in line:gmatch "%a+" do
        add(word:lower())
    end
end

local i = 0
repeat
    i = i + 1
    if i % 2 == 0 then goto continue end
    ::continue::
until i >= 10

stats.report(10)
"##;

#[test]
fn realistic_program_parses_cleanly() {
    init_tracing();
    let options = ParseOptions::default().with_kind(SourceKind::Script);
    let tree = parse(PROGRAM, &options);
    assert!(
        tree.diagnostics().is_empty(),
        "{:?}",
        tree.diagnostics()
    );
    assert_eq!(tree.root().full_text(), PROGRAM);

    let statements: Vec<_> = tree
        .green()
        .children()
        .iter()
        .filter_map(GreenElement::as_node)
        .map(|node| node.kind())
        .collect();
    assert_eq!(
        statements,
        [
            SyntaxKind::LocalDeclarationStatement,
            SyntaxKind::LocalDeclarationStatement,
            SyntaxKind::LocalFunctionStatement,
            SyntaxKind::FunctionDeclarationStatement,
            SyntaxKind::GenericForStatement,
            SyntaxKind::LocalDeclarationStatement,
            SyntaxKind::RepeatStatement,
            SyntaxKind::ExpressionStatement,
        ]
    );
}

#[test]
fn empty_source_has_only_end_of_file() {
    init_tracing();
    let tree = parse("", &ParseOptions::default());
    let root = tree.green();
    assert_eq!(root.kind(), SyntaxKind::CompilationUnit);
    assert_eq!(root.children().len(), 1);
    let eof = root.children()[0].as_token().unwrap();
    assert_eq!(eof.kind(), SyntaxKind::EndOfFileToken);
    assert!(tree.diagnostics().is_empty());
}

#[test]
fn cancellation_mid_parse() {
    let token = CancellationToken::new();
    let tree = parse_with_cancellation(PROGRAM, &ParseOptions::script(), &token).unwrap();
    assert_eq!(tree.root().full_text(), PROGRAM);

    token.cancel();
    assert!(parse_with_cancellation(PROGRAM, &ParseOptions::script(), &token).is_err());
}

mod deep_nesting {
    use super::*;
    use pretty_assertions::assert_eq;

    const DEPTH: usize = 1000;

    fn assert_lossless(source: &str) {
        init_tracing();
        let tree = parse(source, &ParseOptions::default());
        assert!(tree.diagnostics().is_empty(), "{:?}", tree.diagnostics());
        assert_eq!(tree.root().full_text(), source);
    }

    #[test]
    fn parentheses() {
        let source = format!("x = {}1{}", "(".repeat(DEPTH), ")".repeat(DEPTH));
        assert_lossless(&source);
    }

    #[test]
    fn blocks() {
        let source = format!("{}{}", "do ".repeat(DEPTH), "end ".repeat(DEPTH));
        assert_lossless(&source);
    }

    #[test]
    fn unary_chains() {
        let source = format!("x = {}y", "not ".repeat(DEPTH));
        assert_lossless(&source);
    }

    #[test]
    fn tables() {
        let source = format!("x = {}{}", "{".repeat(DEPTH), "}".repeat(DEPTH));
        assert_lossless(&source);
    }

    #[test]
    fn trees_deeper_than_the_native_stack() {
        const DEEP: usize = 100_000;
        let source = format!("x = {}1{}", "(".repeat(DEEP), ")".repeat(DEEP));
        assert_lossless(&source);
        let source = format!("{}{}", "do ".repeat(DEEP), "end ".repeat(DEEP));
        assert_lossless(&source);
    }

    #[test]
    fn unclosed_parentheses_recover() {
        let source = format!("x = {}1", "(".repeat(DEPTH));
        let tree = parse(&source, &ParseOptions::default());
        assert_eq!(tree.diagnostics().len(), DEPTH);
        assert_eq!(tree.root().full_text(), source);
    }
}

#[allow(clippy::disallowed_types, reason = "proptest macros internally use Arc")]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    /// Token soup biased towards Lua statements, including broken ones.
    fn lua_like() -> impl Strategy<Value = String> {
        let piece = prop_oneof![
            "[a-z_][a-z0-9_]{0,6}",
            "[0-9]{1,4}(\\.[0-9]{1,3})?",
            Just(" ".to_owned()),
            Just("\n".to_owned()),
            "--[a-z ]{0,8}\n",
            "\"[a-z ]{0,6}\"?",
            "(local|function|end|if|then|else|elseif|while|do|for|in|repeat|until|return|break|goto|not|and|or|nil|true|false) ",
            "[-+*/%^#&~|<>=(){}\\[\\];:,.]{1,3}",
            Just("...".to_owned()),
            Just("::".to_owned()),
        ];
        proptest::collection::vec(piece, 0..32).prop_map(|pieces| pieces.concat())
    }

    proptest! {
        #[test]
        fn parse_is_lossless(source in lua_like()) {
            let tree = parse(&source, &ParseOptions::default());
            prop_assert_eq!(tree.root().full_text(), source);
        }

        #[test]
        fn expression_parse_is_lossless(source in lua_like()) {
            let tree = parse_expression(&source, &ParseOptions::default());
            prop_assert_eq!(tree.root().full_text(), source);
        }

        #[test]
        fn arbitrary_text_is_lossless(source in "\\PC{0,64}") {
            let tree = parse(&source, &ParseOptions::script());
            prop_assert_eq!(tree.root().full_text(), source);
        }

        #[test]
        fn diagnostics_are_ordered(source in lua_like()) {
            let tree = parse(&source, &ParseOptions::default());
            let starts: Vec<u32> = tree.diagnostics().iter().map(|d| d.span.start).collect();
            let mut sorted = starts.clone();
            sorted.sort_unstable();
            prop_assert_eq!(starts, sorted);
        }
    }
}
