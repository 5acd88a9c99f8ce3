//! Token cooking layer.
//!
//! Transforms `(RawTag, len)` pairs from the raw scanner into syntax kinds
//! with values, keyword resolution, escape processing and numeric parsing.
//!
//! ```text
//! source → RawScanner → (RawTag, len) → TokenCooker → (SyntaxKind, TokenValue)
//! ```
//!
//! Each `RawTag` category has a dedicated cooking path:
//! - **Operators/delimiters**: direct 1:1 mapping
//! - **Identifiers**: reserved keyword lookup, then contextual classification
//! - **Numerals**: integer or real by shape and language version
//! - **Strings**: escape cooking into bytes
//! - **Trivia**: kind only; the lexer attaches it to tokens
//! - **Errors**: push a `LexError`, produce a best-effort token

use luma_ir::{
    ContextualKind, Feature, LanguageVersion, ParseOptions, SourceKind, Span, SyntaxKind,
    TokenValue,
};
use luma_lexer_core::{long_bracket_level, RawTag};

use crate::cook_escape::{cook_long_string, cook_short_string};
use crate::keywords;
use crate::lex_error::{LexError, LexErrorKind};
use crate::numeric;

/// Result of cooking one raw token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Cooked {
    /// A token kind, or a trivia kind for whitespace, comments and shebangs.
    pub kind: SyntaxKind,
    pub value: TokenValue,
    pub contextual: ContextualKind,
}

impl Cooked {
    #[inline]
    fn kind(kind: SyntaxKind) -> Self {
        Cooked {
            kind,
            value: TokenValue::None,
            contextual: ContextualKind::None,
        }
    }

    #[inline]
    fn with_value(kind: SyntaxKind, value: TokenValue) -> Self {
        Cooked {
            kind,
            value,
            contextual: ContextualKind::None,
        }
    }
}

/// Cooks raw tokens into syntax kinds and values.
///
/// Stateless with respect to individual tokens: each `cook()` call is
/// independent. Accumulates errors for the entire source.
pub(crate) struct TokenCooker<'src> {
    source: &'src str,
    version: LanguageVersion,
    source_kind: SourceKind,
    errors: Vec<LexError>,
}

impl<'src> TokenCooker<'src> {
    pub(crate) fn new(source: &'src str, options: &ParseOptions) -> Self {
        Self {
            source,
            version: options.version,
            source_kind: options.kind,
            errors: Vec::new(),
        }
    }

    /// Number of errors so far. The lexer compares counts around a token to
    /// decide whether it carries diagnostics.
    #[inline]
    pub(crate) fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub(crate) fn into_errors(self) -> Vec<LexError> {
        self.errors
    }

    #[cfg(test)]
    pub(crate) fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Cook the raw token at `offset..offset + len`.
    pub(crate) fn cook(&mut self, tag: RawTag, offset: u32, len: u32) -> Cooked {
        let span = Span::at(offset, len);
        let source = self.source;
        let text = &source[span.to_range()];
        match tag {
            // Operators
            RawTag::Plus => Cooked::kind(SyntaxKind::PlusToken),
            RawTag::Minus => Cooked::kind(SyntaxKind::MinusToken),
            RawTag::Star => Cooked::kind(SyntaxKind::AsteriskToken),
            RawTag::Slash => Cooked::kind(SyntaxKind::SlashToken),
            RawTag::SlashSlash => Cooked::kind(SyntaxKind::SlashSlashToken),
            RawTag::Percent => Cooked::kind(SyntaxKind::PercentToken),
            RawTag::Caret => Cooked::kind(SyntaxKind::CaretToken),
            RawTag::Hash => Cooked::kind(SyntaxKind::HashToken),
            RawTag::Amp => Cooked::kind(SyntaxKind::AmpersandToken),
            RawTag::Tilde => Cooked::kind(SyntaxKind::TildeToken),
            RawTag::Pipe => Cooked::kind(SyntaxKind::BarToken),
            RawTag::ShiftLeft => Cooked::kind(SyntaxKind::LessLessToken),
            RawTag::ShiftRight => Cooked::kind(SyntaxKind::GreaterGreaterToken),
            RawTag::EqualEqual => Cooked::kind(SyntaxKind::EqualsEqualsToken),
            RawTag::TildeEqual => Cooked::kind(SyntaxKind::TildeEqualsToken),
            RawTag::LessEqual => Cooked::kind(SyntaxKind::LessEqualsToken),
            RawTag::GreaterEqual => Cooked::kind(SyntaxKind::GreaterEqualsToken),
            RawTag::Less => Cooked::kind(SyntaxKind::LessToken),
            RawTag::Greater => Cooked::kind(SyntaxKind::GreaterToken),
            RawTag::Equal => Cooked::kind(SyntaxKind::EqualsToken),
            RawTag::DotDot => Cooked::kind(SyntaxKind::DotDotToken),
            RawTag::DotDotDot => Cooked::kind(SyntaxKind::DotDotDotToken),

            // Delimiters
            RawTag::LeftParen => Cooked::kind(SyntaxKind::OpenParenToken),
            RawTag::RightParen => Cooked::kind(SyntaxKind::CloseParenToken),
            RawTag::LeftBrace => Cooked::kind(SyntaxKind::OpenBraceToken),
            RawTag::RightBrace => Cooked::kind(SyntaxKind::CloseBraceToken),
            RawTag::LeftBracket => Cooked::kind(SyntaxKind::OpenBracketToken),
            RawTag::RightBracket => Cooked::kind(SyntaxKind::CloseBracketToken),
            RawTag::ColonColon => Cooked::kind(SyntaxKind::ColonColonToken),
            RawTag::Colon => Cooked::kind(SyntaxKind::ColonToken),
            RawTag::Semicolon => Cooked::kind(SyntaxKind::SemicolonToken),
            RawTag::Comma => Cooked::kind(SyntaxKind::CommaToken),
            RawTag::Dot => Cooked::kind(SyntaxKind::DotToken),

            RawTag::Ident => self.cook_ident(text),

            // Numerals
            RawTag::Number => self.cook_decimal(text, span),
            RawTag::HexNumber => self.cook_hexadecimal(text, span),
            RawTag::MalformedNumber => {
                self.error(span, LexErrorKind::MalformedNumber);
                if self.version.supports(Feature::Integers) {
                    Cooked::with_value(SyntaxKind::IntegerLiteralToken, TokenValue::Integer(0))
                } else {
                    Cooked::with_value(SyntaxKind::RealLiteralToken, TokenValue::float(0.0))
                }
            }

            // Strings
            RawTag::String => self.cook_string(text, offset, true),
            RawTag::UnterminatedString => {
                self.error(span, LexErrorKind::UnterminatedString);
                self.cook_string(text, offset, false)
            }
            RawTag::LongString => Self::cook_long(text, true),
            RawTag::UnterminatedLongString => {
                let level = opener_level(text);
                self.error(span, LexErrorKind::UnterminatedLongString { level });
                Self::cook_long(text, false)
            }
            RawTag::InvalidLongBracket => {
                self.error(span, LexErrorKind::InvalidLongBracket);
                Cooked::kind(SyntaxKind::BadToken)
            }

            // Trivia
            RawTag::Whitespace => Cooked::kind(SyntaxKind::WhitespaceTrivia),
            RawTag::Newline => Cooked::kind(SyntaxKind::EndOfLineTrivia),
            RawTag::LineComment => Cooked::kind(SyntaxKind::SingleLineCommentTrivia),
            RawTag::BlockComment => Cooked::kind(SyntaxKind::MultiLineCommentTrivia),
            RawTag::UnterminatedBlockComment => {
                let level = opener_level(&text[2..]);
                self.error(span, LexErrorKind::UnterminatedLongComment { level });
                Cooked::kind(SyntaxKind::MultiLineCommentTrivia)
            }
            RawTag::Shebang => match self.source_kind {
                SourceKind::Script => Cooked::kind(SyntaxKind::ShebangDirectiveTrivia),
                SourceKind::Regular => {
                    self.error(span, LexErrorKind::DirectiveNotAllowed);
                    Cooked::kind(SyntaxKind::BadDirectiveTrivia)
                }
            },

            RawTag::InvalidByte => {
                let ch = text.chars().next().unwrap_or('\0');
                self.error(span, LexErrorKind::InvalidCharacter { ch });
                Cooked::kind(SyntaxKind::BadToken)
            }
            RawTag::Eof => Cooked::kind(SyntaxKind::EndOfFileToken),
        }
    }

    #[cold]
    fn error(&mut self, span: Span, kind: LexErrorKind) {
        self.errors.push(LexError::new(span, kind));
    }

    fn cook_ident(&self, text: &str) -> Cooked {
        if let Some(kind) = keywords::lookup(text) {
            let value = match kind {
                SyntaxKind::NilKeyword => TokenValue::Nil,
                SyntaxKind::TrueKeyword => TokenValue::Boolean(true),
                SyntaxKind::FalseKeyword => TokenValue::Boolean(false),
                _ => TokenValue::None,
            };
            return Cooked::with_value(kind, value);
        }
        Cooked {
            kind: SyntaxKind::IdentifierToken,
            value: TokenValue::None,
            contextual: keywords::contextual(text, self.version),
        }
    }

    // ─── Numerals ───────────────────────────────────────────────────

    fn cook_decimal(&mut self, text: &str, span: Span) -> Cooked {
        let integral = !text.bytes().any(|b| matches!(b, b'.' | b'e' | b'E'));
        if integral && self.version.supports(Feature::Integers) {
            if let Some(value) = numeric::try_parse_decimal_i64(text) {
                return Cooked::with_value(SyntaxKind::IntegerLiteralToken, TokenValue::Integer(value));
            }
        }
        let value = numeric::try_parse_decimal_f64(text).unwrap_or_else(|| {
            self.error(span, LexErrorKind::NumberOverflow);
            f64::INFINITY
        });
        Cooked::with_value(SyntaxKind::RealLiteralToken, TokenValue::float(value))
    }

    fn cook_hexadecimal(&mut self, text: &str, span: Span) -> Cooked {
        let body = &text[2..];
        let (mantissa, exponent) = match body.find(['p', 'P']) {
            Some(at) => (&body[..at], Some(&body[at + 1..])),
            None => (body, None),
        };
        let fractional = mantissa.contains('.');

        if !fractional && exponent.is_none() && self.version.supports(Feature::Integers) {
            let value = numeric::try_parse_hexadecimal_i64(mantissa).unwrap_or_else(|| {
                self.error(span, LexErrorKind::NumberOverflow);
                numeric::wrapping_parse_hexadecimal_i64(mantissa).unwrap_or(0)
            });
            return Cooked::with_value(SyntaxKind::IntegerLiteralToken, TokenValue::Integer(value));
        }

        if (fractional || exponent.is_some()) && !self.version.supports(Feature::HexFloat) {
            self.errors
                .push(LexError::not_available(span, Feature::HexFloat));
        }
        let exponent = exponent.map_or(0, parse_binary_exponent);
        let value = numeric::parse_hexadecimal_f64(mantissa, exponent).unwrap_or_else(|| {
            self.error(span, LexErrorKind::NumberOverflow);
            f64::INFINITY
        });
        Cooked::with_value(SyntaxKind::RealLiteralToken, TokenValue::float(value))
    }

    // ─── Strings ────────────────────────────────────────────────────

    fn cook_string(&mut self, text: &str, offset: u32, terminated: bool) -> Cooked {
        let end = if terminated { text.len() - 1 } else { text.len() };
        let content = &text[1..end.max(1)];
        let bytes = cook_short_string(content, offset + 1, self.version, &mut self.errors);
        Cooked::with_value(SyntaxKind::StringLiteralToken, TokenValue::string(bytes))
    }

    fn cook_long(text: &str, terminated: bool) -> Cooked {
        let level = long_bracket_level(text).unwrap_or(0);
        let bytes = cook_long_string(text, level, terminated);
        Cooked::with_value(SyntaxKind::StringLiteralToken, TokenValue::string(bytes))
    }
}

/// Number of `=` in the long bracket opening `text`.
fn opener_level(text: &str) -> u32 {
    long_bracket_level(text).map_or(0, |level| u32::try_from(level).unwrap_or(u32::MAX))
}

/// Binary exponent `[+-]?[0-9]+`, saturated far beyond the range where
/// every value is zero or infinite.
fn parse_binary_exponent(text: &str) -> i32 {
    const LIMIT: i32 = 1 << 20;
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = digits
        .bytes()
        .fold(0i32, |acc, b| (acc * 10 + i32::from(b - b'0')).min(LIMIT));
    if negative {
        -magnitude
    } else {
        magnitude
    }
}
