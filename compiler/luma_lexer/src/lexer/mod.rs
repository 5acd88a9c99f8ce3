//! The lexer: raw tokens in, green tokens with trivia out.
//!
//! # Trivia attachment
//!
//! Leading trivia of a token is every trivia between the previous token and
//! this one. Trailing trivia runs from the end of the token up to and
//! including the first end of line, so a line's comment belongs to the last
//! token on that line and the next line starts with a fresh token.
//!
//! # Quick-token cache
//!
//! When the quick-scan automaton recognises the upcoming text as a simple
//! token with simple trivia, the text itself is the cache key for the cooked
//! green token. A hit skips the raw scanner and the cooker entirely. Only
//! tokens without diagnostics are cached, so diagnostics are never lost.

use std::sync::Arc;

use luma_diagnostic::{Diagnostic, DiagnosticSink, SeverityPolicy};
use luma_ir::{
    Feature, GreenNode, GreenToken, GreenTrivia, LanguageVersion, ParseOptions, SyntaxKind,
    TokenFlags,
};
use luma_lexer_core::{quick_scan, QuickScan, RawScanner, RawToken, SourceBuffer};
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::cooker::TokenCooker;

/// What the lexer produces next.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum LexerMode {
    /// Ordinary tokens with leading and trailing trivia.
    #[default]
    Syntax,
    /// The raw rest of the line as one `DirectiveTextToken`, without trivia.
    Directive,
}

/// Incremental lexer over one source text.
///
/// Each [`lex`](Self::lex) call returns one token; once the source is
/// exhausted every call returns a zero-width end-of-file token.
pub struct Lexer<'src> {
    source: &'src str,
    buffer: SourceBuffer,
    pos: u32,
    /// A byte order mark or shebang may still start at `pos`.
    at_file_start: bool,
    version: LanguageVersion,
    quick_scan: bool,
    cooker: TokenCooker<'src>,
    policy: SeverityPolicy,
    quick_cache: FxHashMap<Box<str>, Arc<GreenToken>>,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str, options: &ParseOptions) -> Self {
        Lexer {
            source,
            buffer: SourceBuffer::new(source),
            pos: 0,
            at_file_start: true,
            version: options.version,
            quick_scan: options.quick_scan,
            cooker: TokenCooker::new(source, options),
            policy: SeverityPolicy::default(),
            quick_cache: FxHashMap::default(),
        }
    }

    /// Severity policy used by [`into_diagnostics`](Self::into_diagnostics).
    #[must_use]
    pub fn with_policy(mut self, policy: SeverityPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Byte offset of the next unconsumed character.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Whether the whole source has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buffer.len()
    }

    /// Produce the next token in `mode`.
    pub fn lex(&mut self, mode: LexerMode) -> Arc<GreenToken> {
        match mode {
            LexerMode::Syntax => self.lex_syntax(),
            LexerMode::Directive => {
                trace!(pos = self.pos, "lexing directive text");
                self.lex_directive()
            }
        }
    }

    /// Append the diagnostics for everything lexed so far to `sink`, in
    /// order of discovery.
    pub fn report_diagnostics(self, sink: &mut impl DiagnosticSink) {
        let version = self.version;
        let policy = self.policy;
        sink.report_all(
            self.cooker
                .into_errors()
                .into_iter()
                .map(|error| error.into_diagnostic(&policy, version)),
        );
    }

    /// Diagnostics for everything lexed so far, in order of discovery.
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        self.report_diagnostics(&mut diagnostics);
        diagnostics
    }

    // ─── Raw token plumbing ─────────────────────────────────────────

    /// Scan the raw token at `pos` without consuming it. Also returns the
    /// file-start state the scanner is left in.
    fn peek_raw(&self) -> (RawToken, bool) {
        let mut scanner = RawScanner::resume(self.buffer.cursor_at(self.pos), self.at_file_start)
            .with_whitespace_escape(self.version.supports(Feature::WhitespaceEscape));
        let token = scanner.next_token();
        (token, scanner.at_file_start())
    }

    fn bump_raw(&mut self, (token, at_file_start): (RawToken, bool)) {
        self.pos += token.len;
        self.at_file_start = at_file_start;
    }

    fn text(&self, start: u32, len: u32) -> &'src str {
        let source = self.source;
        &source[start as usize..(start + len) as usize]
    }

    // ─── Syntax mode ────────────────────────────────────────────────

    fn lex_syntax(&mut self) -> Arc<GreenToken> {
        if self.quick_scan && !self.at_file_start {
            let rest = &self.buffer.as_bytes()[self.pos as usize..];
            if let QuickScan::Done { full_len, .. } = quick_scan(rest) {
                return self.lex_cached(full_len);
            }
        }
        Arc::new(self.lex_full())
    }

    fn lex_cached(&mut self, full_len: u32) -> Arc<GreenToken> {
        let key = self.text(self.pos, full_len);
        if let Some(token) = self.quick_cache.get(key) {
            self.pos += full_len;
            self.at_file_start = false;
            return Arc::clone(token);
        }

        trace!(pos = self.pos, key, "quick-scan cache miss");
        let token = Arc::new(self.lex_full());
        debug_assert_eq!(token.full_width(), full_len, "quick scan disagrees at {key:?}");
        if !token.flags().contains(TokenFlags::HAS_DIAGNOSTICS) {
            self.quick_cache.insert(key.into(), Arc::clone(&token));
        }
        token
    }

    fn lex_full(&mut self) -> GreenToken {
        let errors_before = self.cooker.error_count();

        let leading = self.lex_trivia(false);
        let start = self.pos;
        let raw = self.peek_raw();
        self.bump_raw(raw);
        let cooked = self.cooker.cook(raw.0.tag, start, raw.0.len);
        debug_assert!(!cooked.kind.is_trivia(), "trivia escaped the trivia loop");

        let trailing = if cooked.kind == SyntaxKind::EndOfFileToken {
            Vec::new()
        } else {
            self.lex_trivia(true)
        };

        let token = GreenToken::new(cooked.kind, self.text(start, raw.0.len))
            .with_value(cooked.value)
            .with_contextual_kind(cooked.contextual)
            .with_leading(leading)
            .with_trailing(trailing);
        if self.cooker.error_count() > errors_before {
            token.with_flags(TokenFlags::HAS_DIAGNOSTICS)
        } else {
            token
        }
    }

    /// Consume a trivia run. Trailing runs stop after the first end of line.
    fn lex_trivia(&mut self, trailing: bool) -> Vec<GreenTrivia> {
        let mut trivia = Vec::new();
        loop {
            let raw = self.peek_raw();
            if !raw.0.tag.is_trivia() {
                break;
            }
            let start = self.pos;
            let cooked = self.cooker.cook(raw.0.tag, start, raw.0.len);
            if cooked.kind == SyntaxKind::ShebangDirectiveTrivia {
                trivia.push(self.shebang_directive());
                continue;
            }
            self.bump_raw(raw);
            trivia.push(GreenTrivia::new(cooked.kind, self.text(start, raw.0.len)));
            if trailing && cooked.kind == SyntaxKind::EndOfLineTrivia {
                break;
            }
        }
        trivia
    }

    /// `#` plus the rest of the line as structured trivia. `pos` is at `#`.
    fn shebang_directive(&mut self) -> GreenTrivia {
        trace!("lexing shebang directive");
        let hash = Arc::new(GreenToken::new(SyntaxKind::HashToken, "#"));
        self.pos += 1;
        let text = self.lex_directive();
        let node = GreenNode::new(
            SyntaxKind::ShebangDirective,
            vec![hash.into(), text.into()],
        );
        GreenTrivia::structured(SyntaxKind::ShebangDirectiveTrivia, Arc::new(node))
    }

    // ─── Directive mode ─────────────────────────────────────────────

    #[allow(
        clippy::cast_possible_truncation,
        reason = "source offsets bounded by u32; the whole source is < u32::MAX bytes"
    )]
    fn lex_directive(&mut self) -> Arc<GreenToken> {
        let rest = &self.source[self.pos as usize..];
        let len = rest.find(['\n', '\r']).unwrap_or(rest.len()) as u32;
        let token = GreenToken::new(SyntaxKind::DirectiveTextToken, self.text(self.pos, len));
        self.pos += len;
        self.at_file_start = false;
        Arc::new(token)
    }
}
