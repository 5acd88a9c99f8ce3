//! Lexer for Luma.
//!
//! Cooks the raw tokens of `luma_lexer_core` into green tokens: keyword
//! resolution, literal values, escape processing, trivia attachment and
//! lexical diagnostics.
//!
//! ```text
//! source → RawScanner → TokenCooker → Lexer (trivia, quick cache) → GreenToken
//! ```

mod cook_escape;
mod cooker;
pub mod keywords;
mod lex_error;
mod lexer;
pub mod numeric;

use std::sync::Arc;

use luma_diagnostic::{Diagnostic, SeverityPolicy};
use luma_ir::{GreenToken, ParseOptions, SyntaxKind};
use tracing::debug;

pub use lex_error::{EscapeProblem, LexError, LexErrorKind};
pub use lexer::{Lexer, LexerMode};

/// Every token of a source, ending with exactly one end-of-file token.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: Vec<Arc<GreenToken>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl LexOutput {
    /// Concatenated full text of all tokens. Equal to the source.
    pub fn full_text(&self) -> String {
        let mut text = String::new();
        for token in &self.tokens {
            token.write_full_text(&mut text);
        }
        text
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// Lex a whole source in syntax mode.
pub fn lex(source: &str, options: &ParseOptions) -> LexOutput {
    lex_with_policy(source, options, SeverityPolicy::default())
}

/// [`lex`] with diagnostic severities taken from `policy`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex_with_policy(source: &str, options: &ParseOptions, policy: SeverityPolicy) -> LexOutput {
    let mut lexer = Lexer::new(source, options).with_policy(policy);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.lex(LexerMode::Syntax);
        let done = token.kind() == SyntaxKind::EndOfFileToken;
        tokens.push(token);
        if done {
            break;
        }
    }
    let diagnostics = lexer.into_diagnostics();
    debug!(tokens = tokens.len(), diagnostics = diagnostics.len(), "lexed");
    LexOutput {
        tokens,
        diagnostics,
    }
}
