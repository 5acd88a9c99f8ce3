//! Grammar productions, one method per rule.
//!
//! ```text
//! chunk     ::= block EOF
//! block     ::= { stat } [ retstat ]
//! ```
//!
//! A chunk's statements are direct children of the `CompilationUnit`;
//! nested blocks get a `Block` node.

mod expr;
mod stmt;

use luma_diagnostic::ErrorCode;
use luma_ir::{Feature, Span, SyntaxKind};
use luma_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::parser::Parser;
use crate::recovery::{TokenSet, BLOCK_END, STATEMENT_START};

const CHUNK_END: TokenSet = TokenSet::EMPTY.with(SyntaxKind::EndOfFileToken);

impl Parser<'_> {
    /// `CompilationUnit` for a whole source.
    pub(crate) fn chunk(&mut self) {
        self.start_node(SyntaxKind::CompilationUnit);
        self.statements(CHUNK_END);
        self.bump();
        self.finish_node();
    }

    /// `CompilationUnit` holding one expression, for tooling.
    pub(crate) fn expression_chunk(&mut self) {
        self.start_node(SyntaxKind::CompilationUnit);
        self.expression();
        while !self.at_end() {
            self.skip();
        }
        self.bump();
        self.finish_node();
    }

    /// A nested `Block` ending at `end`, `else`, `elseif`, `until` or end of
    /// file.
    pub(crate) fn block(&mut self) {
        ensure_sufficient_stack(|| {
            self.start_node(SyntaxKind::Block);
            self.statements(BLOCK_END);
            self.finish_node();
        });
    }

    /// Statements up to (not including) a token in `end`. Tokens that can
    /// neither start a statement nor end the block are skipped.
    fn statements(&mut self, end: TokenSet) {
        // Span of the `return` keyword when the previous statement returned.
        let mut returned: Option<Span> = None;
        while !self.at_set(end) {
            if !self.at_set(STATEMENT_START) {
                debug!(found = ?self.current_kind(), "recovering at statement level");
                self.skip();
                continue;
            }
            let start = self.current_span();
            if let Some(return_span) = returned {
                let diagnostic = self
                    .diagnostic(ErrorCode::E1006)
                    .with_message("`return` must be the last statement of its block")
                    .with_label(start, "unreachable statement")
                    .with_secondary_label(return_span, "the block returns here");
                self.report(diagnostic);
            }
            returned = (self.statement() == SyntaxKind::ReturnStatement).then_some(start);
        }
    }

    /// Report `feature` at `span` when the language version lacks it.
    fn require_feature(&mut self, feature: Feature, span: Span) {
        let version = self.version();
        if !version.supports(feature) {
            let message = format!(
                "{} not available in {version} (introduced in {})",
                feature.description(),
                feature.introduced_in(),
            );
            let diagnostic = self
                .diagnostic(ErrorCode::E1009)
                .with_message(message)
                .with_span(span)
                .with_note(format!(
                    "select {} or later to use this",
                    feature.introduced_in()
                ));
            self.report(diagnostic);
        }
    }
}
