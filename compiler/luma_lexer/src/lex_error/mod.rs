//! Lexer error types for the cooking layer.
//!
//! Cooking functions push [`LexError`]s into an accumulator instead of
//! building diagnostics directly. The lexer converts them once the severity
//! policy and language version are known.

use luma_diagnostic::{Diagnostic, ErrorCode, SeverityPolicy};
use luma_ir::{Feature, LanguageVersion, Span};

/// A lexer error: where it happened and what went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum LexErrorKind {
    // === Strings ===
    /// Missing closing quote before end of line.
    UnterminatedString,
    /// Backslash followed by something that is not an escape.
    InvalidEscape { detail: EscapeProblem },
    /// `[[` without a matching `]]`; `level` counts the `=` of the opener.
    UnterminatedLongString { level: u32 },
    /// `[=` not followed by `=*[`.
    InvalidLongBracket,

    // === Numbers ===
    /// Numeral followed by junk.
    MalformedNumber,
    /// Numeral whose value does not fit.
    NumberOverflow,

    // === Everything else ===
    /// Byte that cannot start any token.
    InvalidCharacter { ch: char },
    /// `--[[` without a matching `]]`.
    UnterminatedLongComment { level: u32 },
    /// `#` line at the start of a non-script unit.
    DirectiveNotAllowed,
    /// Lexical form that needs a newer language version.
    NotAvailable { feature: Feature },
}

/// Why an escape sequence was rejected.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EscapeProblem {
    /// `\q` and friends.
    Unknown,
    /// `\ddd` above 255.
    DecimalTooLarge,
    /// `\x` without two hex digits.
    MissingHexDigits,
    /// `\u{...}` not closed, empty, or not hexadecimal.
    MalformedUnicode,
    /// `\u{...}` above `7FFFFFFF`.
    UnicodeTooLarge,
    /// Backslash at end of input.
    Trailing,
}

impl LexError {
    #[cold]
    pub fn new(span: Span, kind: LexErrorKind) -> Self {
        LexError { span, kind }
    }

    #[cold]
    pub fn invalid_escape(span: Span, detail: EscapeProblem) -> Self {
        Self::new(span, LexErrorKind::InvalidEscape { detail })
    }

    #[cold]
    pub fn not_available(span: Span, feature: Feature) -> Self {
        Self::new(span, LexErrorKind::NotAvailable { feature })
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::InvalidCharacter { .. } => ErrorCode::E0002,
            LexErrorKind::MalformedNumber => ErrorCode::E0003,
            LexErrorKind::NumberOverflow => ErrorCode::E0004,
            LexErrorKind::InvalidEscape { .. } => ErrorCode::E0005,
            LexErrorKind::UnterminatedLongString { .. } => ErrorCode::E0006,
            LexErrorKind::UnterminatedLongComment { .. } => ErrorCode::E0007,
            LexErrorKind::DirectiveNotAllowed => ErrorCode::E0008,
            LexErrorKind::InvalidLongBracket => ErrorCode::E0009,
            LexErrorKind::NotAvailable { .. } => ErrorCode::E0010,
        }
    }

    /// User-facing message.
    pub fn message(&self, version: LanguageVersion) -> String {
        match &self.kind {
            LexErrorKind::UnterminatedString => "unterminated string literal".to_owned(),
            LexErrorKind::InvalidEscape { detail } => match detail {
                EscapeProblem::Unknown => "invalid escape sequence".to_owned(),
                EscapeProblem::DecimalTooLarge => "decimal escape too large".to_owned(),
                EscapeProblem::MissingHexDigits => {
                    "hexadecimal digit expected in escape".to_owned()
                }
                EscapeProblem::MalformedUnicode => "malformed unicode escape".to_owned(),
                EscapeProblem::UnicodeTooLarge => "unicode escape too large".to_owned(),
                EscapeProblem::Trailing => "escape sequence at end of input".to_owned(),
            },
            LexErrorKind::UnterminatedLongString { .. } => "unterminated long string".to_owned(),
            LexErrorKind::InvalidLongBracket => "invalid long string delimiter".to_owned(),
            LexErrorKind::MalformedNumber => "malformed number".to_owned(),
            LexErrorKind::NumberOverflow => "number literal out of range".to_owned(),
            LexErrorKind::InvalidCharacter { ch } => {
                format!("unexpected character {ch:?}")
            }
            LexErrorKind::UnterminatedLongComment { .. } => "unterminated long comment".to_owned(),
            LexErrorKind::DirectiveNotAllowed => {
                "`#` directive is only allowed at the start of a script".to_owned()
            }
            LexErrorKind::NotAvailable { feature } => format!(
                "{} are not available in {version} (introduced in {})",
                feature.description(),
                feature.introduced_in()
            ),
        }
    }

    /// Convert into a diagnostic with the severity `policy` assigns.
    ///
    /// Unterminated long brackets point back at their opener and name the
    /// closer that was expected.
    pub fn into_diagnostic(self, policy: &SeverityPolicy, version: LanguageVersion) -> Diagnostic {
        let message = self.message(version);
        let diagnostic = policy
            .diagnostic(self.code(), version)
            .with_message(message)
            .with_span(self.span);
        let (level, prefix) = match self.kind {
            LexErrorKind::UnterminatedLongString { level } => (level, 0),
            LexErrorKind::UnterminatedLongComment { level } => (level, 2),
            LexErrorKind::NotAvailable { feature } => {
                return diagnostic.with_note(format!(
                    "select {} or later to use this",
                    feature.introduced_in()
                ));
            }
            _ => return diagnostic,
        };
        let opener = Span::at(self.span.start, prefix + level + 2);
        let equals = "=".repeat(level as usize);
        diagnostic
            .with_secondary_label(opener, "long bracket opened here")
            .with_note(format!("expected `]{equals}]` before end of file"))
    }
}

#[cfg(test)]
mod tests;
