//! Lossless parser for Luma.
//!
//! Turns source text into an immutable [`SyntaxTree`]. Every byte of the
//! input is represented by a token or by trivia, whatever the errors:
//!
//! - unexpected tokens become `SkippedTokensTrivia` on the next token,
//! - expected but absent tokens become zero-width missing tokens,
//! - every problem is a diagnostic next to the tree, never an `Err`.
//!
//! The only failure is cooperative cancellation through
//! [`parse_with_cancellation`].

mod context;
mod grammar;
mod parser;
mod recovery;
mod series;
mod tree;

use luma_diagnostic::{DiagnosticSink, SeverityPolicy};
use luma_ir::{CancellationToken, Cancelled, ParseOptions};
use tracing::debug;

use crate::parser::{ParsedGreen, Parser};

pub use tree::{SyntaxTree, TreeId};

#[derive(Copy, Clone, Debug)]
enum Entry {
    Chunk,
    Expression,
}

/// Parse a whole source.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse(source: &str, options: &ParseOptions) -> SyntaxTree {
    parse_with_policy(source, options, &SeverityPolicy::default())
}

/// [`parse`] with diagnostic severities taken from `policy`.
pub fn parse_with_policy(
    source: &str,
    options: &ParseOptions,
    policy: &SeverityPolicy,
) -> SyntaxTree {
    let parsed = parse_green(source, options, policy, None, Entry::Chunk);
    debug_assert!(!parsed.cancelled);
    SyntaxTree::new(source.into(), parsed.root, options.clone(), parsed.diagnostics)
}

/// [`parse`] that gives up with [`Cancelled`] once `cancellation` fires.
///
/// The token is polled on every token the parser consumes.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn parse_with_cancellation(
    source: &str,
    options: &ParseOptions,
    cancellation: &CancellationToken,
) -> Result<SyntaxTree, Cancelled> {
    cancellation.check()?;
    let parsed = parse_green(
        source,
        options,
        &SeverityPolicy::default(),
        Some(cancellation),
        Entry::Chunk,
    );
    if parsed.cancelled {
        debug!("parse abandoned");
        return Err(Cancelled);
    }
    Ok(SyntaxTree::new(
        source.into(),
        parsed.root,
        options.clone(),
        parsed.diagnostics,
    ))
}

/// [`parse`], also appending the tree's diagnostics to `sink` in source
/// order. A driver parsing many files can collect every file's diagnostics
/// in one place this way.
pub fn parse_into(
    source: &str,
    options: &ParseOptions,
    sink: &mut impl DiagnosticSink,
) -> SyntaxTree {
    let tree = parse(source, options);
    sink.report_all(tree.diagnostics().iter().cloned());
    tree
}

/// Parse a source holding a single expression.
///
/// The root is a `CompilationUnit` with the expression node and the
/// end-of-file token; anything after the expression is skipped.
pub fn parse_expression(source: &str, options: &ParseOptions) -> SyntaxTree {
    let policy = SeverityPolicy::default();
    let parsed = parse_green(source, options, &policy, None, Entry::Expression);
    SyntaxTree::new(source.into(), parsed.root, options.clone(), parsed.diagnostics)
}

fn parse_green(
    source: &str,
    options: &ParseOptions,
    policy: &SeverityPolicy,
    cancellation: Option<&CancellationToken>,
    entry: Entry,
) -> ParsedGreen {
    let lexed = luma_lexer::lex_with_policy(source, options, policy.clone());
    let mut parser = Parser::new(lexed.tokens, options, cancellation).with_policy(policy.clone());
    match entry {
        Entry::Chunk => parser.chunk(),
        Entry::Expression => parser.expression_chunk(),
    }
    let mut parsed = parser.finish();

    let mut diagnostics = lexed.diagnostics;
    diagnostics.append(&mut parsed.diagnostics);
    diagnostics.sort_by_key(|d| d.span.start);
    debug!(
        ?entry,
        diagnostics = diagnostics.len(),
        cancelled = parsed.cancelled,
        "parsed"
    );
    parsed.diagnostics = diagnostics;
    parsed
}

#[cfg(test)]
mod tests;
