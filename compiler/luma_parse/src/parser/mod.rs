//! Parser state and the token cursor.
//!
//! The parser walks a token vector that always ends with one end-of-file
//! token and feeds a [`GreenNodeBuilder`]. Tokens are never dropped: a
//! consumed token goes into the tree, a skipped token is parked and becomes
//! `SkippedTokensTrivia` in front of the next token that goes into the tree.
//! Together with zero-width missing tokens this keeps the tree lossless no
//! matter how broken the input is.

use std::sync::Arc;

use luma_diagnostic::{Diagnostic, DiagnosticSink, ErrorCode, SeverityPolicy};
use luma_ir::{
    CancellationToken, GreenNode, GreenNodeBuilder, GreenToken, GreenTrivia, LanguageVersion,
    ParseOptions, Span, SyntaxKind,
};
use tracing::trace;

use crate::context::ParseContext;
use crate::recovery::TokenSet;

pub(crate) use luma_ir::green::Checkpoint;

/// Everything a finished parse hands back.
pub(crate) struct ParsedGreen {
    pub root: Arc<GreenNode>,
    pub diagnostics: Vec<Diagnostic>,
    pub cancelled: bool,
}

pub(crate) struct Parser<'a> {
    tokens: Vec<Arc<GreenToken>>,
    /// Full start offset (leading trivia included) of each token.
    starts: Vec<u32>,
    pos: usize,
    builder: GreenNodeBuilder,
    /// Tokens skipped since the last token that went into the tree.
    skipped: Vec<Arc<GreenToken>>,
    /// End of the text of the last consumed or skipped token.
    last_end: u32,
    version: LanguageVersion,
    context: ParseContext,
    policy: SeverityPolicy,
    diagnostics: Vec<Diagnostic>,
    cancellation: Option<&'a CancellationToken>,
    cancelled: bool,
}

impl<'a> Parser<'a> {
    pub fn new(
        tokens: Vec<Arc<GreenToken>>,
        options: &ParseOptions,
        cancellation: Option<&'a CancellationToken>,
    ) -> Self {
        debug_assert!(
            tokens.last().map(|t| t.kind()) == Some(SyntaxKind::EndOfFileToken),
            "token stream must end with end of file"
        );
        let mut starts = Vec::with_capacity(tokens.len());
        let mut offset = 0;
        for token in &tokens {
            starts.push(offset);
            offset += token.full_width();
        }
        Parser {
            tokens,
            starts,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            skipped: Vec::new(),
            last_end: 0,
            version: options.version,
            context: ParseContext::CHUNK,
            policy: SeverityPolicy::default(),
            diagnostics: Vec::new(),
            cancellation,
            cancelled: false,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SeverityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn finish(self) -> ParsedGreen {
        debug_assert!(self.skipped.is_empty(), "skipped tokens were never attached");
        ParsedGreen {
            root: self.builder.finish(),
            diagnostics: self.diagnostics,
            cancelled: self.cancelled,
        }
    }

    // ─── Lookahead ──────────────────────────────────────────────────

    #[inline]
    pub fn current(&self) -> &Arc<GreenToken> {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> SyntaxKind {
        self.current().kind()
    }

    /// Kind of the token `n` places ahead; end of file past the end.
    pub fn nth_kind(&self, n: usize) -> SyntaxKind {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + n).min(last)].kind()
    }

    #[inline]
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    #[inline]
    pub fn at_set(&self, set: TokenSet) -> bool {
        set.contains(self.current_kind())
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.at(SyntaxKind::EndOfFileToken)
    }

    /// Span of the current token's text.
    pub fn current_span(&self) -> Span {
        let token = self.current();
        Span::at(self.starts[self.pos] + token.leading_width(), token.width())
    }

    /// Empty span right after the previous token, where a missing token
    /// would go.
    #[inline]
    pub fn missing_span(&self) -> Span {
        Span::point(self.last_end)
    }

    /// Start of the current token's text.
    #[inline]
    pub fn current_start(&self) -> u32 {
        self.current_span().start
    }

    #[inline]
    pub fn last_end(&self) -> u32 {
        self.last_end
    }

    /// Whether a line break separates the current token from the previous one.
    pub fn line_break_before(&self) -> bool {
        let is_eol = |t: &GreenTrivia| t.kind() == SyntaxKind::EndOfLineTrivia;
        let before = self.pos.checked_sub(1).map(|p| &self.tokens[p]);
        before.is_some_and(|t| t.trailing().iter().any(is_eol))
            || self.current().leading().iter().any(is_eol)
    }

    #[inline]
    pub fn version(&self) -> LanguageVersion {
        self.version
    }

    #[inline]
    pub fn context(&self) -> ParseContext {
        self.context
    }

    // ─── Consumption ────────────────────────────────────────────────

    /// Move past the current token. End of file is never moved past.
    ///
    /// Every consumption polls the cancellation token; once cancelled the
    /// cursor jumps to end of file so every production unwinds.
    fn advance(&mut self) -> Arc<GreenToken> {
        let token = Arc::clone(self.current());
        self.last_end = self.current_span().end;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        if self.cancellation.is_some_and(CancellationToken::is_cancelled) && !self.cancelled {
            trace!(pos = self.pos, "parse cancelled");
            self.cancelled = true;
            self.pos = self.tokens.len() - 1;
        }
        token
    }

    /// Add the current token to the tree.
    pub fn bump(&mut self) {
        let token = self.advance();
        let token = if self.skipped.is_empty() {
            token
        } else {
            let skipped = GreenNode::new(
                SyntaxKind::SkippedTokens,
                self.skipped.drain(..).map(Into::into).collect(),
            );
            let trivia = GreenTrivia::structured(SyntaxKind::SkippedTokensTrivia, Arc::new(skipped));
            Arc::new(GreenToken::clone(&token).prepend_leading([trivia]))
        };
        self.builder.token(token);
    }

    /// Bump if the current token is `kind`.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Bump `kind`, or insert a missing `kind` and report it.
    pub fn expect(&mut self, kind: SyntaxKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        let message = format!("expected {}, found {}", describe_kind(kind), self.found());
        self.error(ErrorCode::E1004, self.missing_span(), message);
        self.missing(kind);
        false
    }

    /// Bump an identifier, or insert a missing one.
    ///
    /// A keyword where a name belongs is left in place for the enclosing
    /// production, which usually knows what to do with `end` or `then`.
    pub fn expect_identifier(&mut self) {
        if self.eat(SyntaxKind::IdentifierToken) {
            return;
        }
        if self.current_kind().is_keyword() {
            let message = format!("expected identifier, found keyword {}", self.found());
            self.error(ErrorCode::E1003, self.current_span(), message);
        } else {
            let message = format!("expected identifier, found {}", self.found());
            self.error(ErrorCode::E1004, self.missing_span(), message);
        }
        self.missing(SyntaxKind::IdentifierToken);
    }

    /// Insert a zero-width placeholder token.
    pub fn missing(&mut self, kind: SyntaxKind) {
        trace!(?kind, at = self.last_end, "inserting missing token");
        self.builder.token(Arc::new(GreenToken::missing(kind)));
    }

    /// Park the current token as skipped text and report it.
    pub fn skip(&mut self) {
        debug_assert!(!self.at_end(), "end of file cannot be skipped");
        if self.at_end() {
            return;
        }
        let message = format!("unexpected {}", self.found());
        self.error(ErrorCode::E1001, self.current_span(), message);
        trace!(kind = ?self.current_kind(), "skipping token");
        let token = self.advance();
        self.skipped.push(token);
    }

    /// Description of the current token for messages.
    pub fn found(&self) -> String {
        let token = self.current();
        if token.kind() == SyntaxKind::EndOfFileToken {
            "end of file".to_owned()
        } else {
            format!("`{}`", token.text())
        }
    }

    // ─── Tree building ──────────────────────────────────────────────

    #[inline]
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind);
    }

    #[inline]
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind);
    }

    #[inline]
    pub fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        self.builder.checkpoint()
    }

    /// Run `f` with `context` in place of the current context.
    pub fn with_context<R>(&mut self, context: ParseContext, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = std::mem::replace(&mut self.context, context);
        let result = f(self);
        self.context = saved;
        result
    }

    // ─── Diagnostics ────────────────────────────────────────────────

    #[cold]
    pub fn error(&mut self, code: ErrorCode, span: Span, message: impl Into<String>) {
        let diagnostic = self.diagnostic(code).with_message(message).with_span(span);
        self.report(diagnostic);
    }

    /// Diagnostic for `code` with the severity the policy gives it in the
    /// current language version.
    #[cold]
    pub fn diagnostic(&self, code: ErrorCode) -> Diagnostic {
        self.policy.diagnostic(code, self.version)
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.report(diagnostic);
    }
}

/// `` `then` `` for fixed tokens, `identifier` for the rest.
pub(crate) fn describe_kind(kind: SyntaxKind) -> String {
    match kind.fixed_text() {
        Some(text) => format!("`{text}`"),
        None => kind.describe().to_owned(),
    }
}
