//! Keyword resolution for the cooking layer.
//!
//! Two tables:
//! 1. **Reserved keywords**: length-bucketed lookup, resolved in every
//!    language version.
//! 2. **Contextual keywords**: `goto`, `const` and `close` stay identifiers.
//!    The token only records a [`ContextualKind`] so the parser can treat it
//!    as a keyword where the grammar expects one.
//!
//! Reserved keywords are 2 to 8 bytes long and start with a lowercase ASCII
//! letter; anything outside that range is rejected without a comparison.

use luma_ir::{ContextualKind, Feature, LanguageVersion, SyntaxKind};

/// Look up a reserved keyword by text.
#[inline]
pub fn lookup(text: &str) -> Option<SyntaxKind> {
    let bytes = text.as_bytes();
    if !(2..=8).contains(&bytes.len()) || !bytes[0].is_ascii_lowercase() {
        return None;
    }

    match bytes.len() {
        2 => match text {
            "do" => Some(SyntaxKind::DoKeyword),
            "if" => Some(SyntaxKind::IfKeyword),
            "in" => Some(SyntaxKind::InKeyword),
            "or" => Some(SyntaxKind::OrKeyword),
            _ => None,
        },
        3 => match text {
            "and" => Some(SyntaxKind::AndKeyword),
            "end" => Some(SyntaxKind::EndKeyword),
            "for" => Some(SyntaxKind::ForKeyword),
            "nil" => Some(SyntaxKind::NilKeyword),
            "not" => Some(SyntaxKind::NotKeyword),
            _ => None,
        },
        4 => match text {
            "else" => Some(SyntaxKind::ElseKeyword),
            "then" => Some(SyntaxKind::ThenKeyword),
            "true" => Some(SyntaxKind::TrueKeyword),
            _ => None,
        },
        5 => match text {
            "break" => Some(SyntaxKind::BreakKeyword),
            "false" => Some(SyntaxKind::FalseKeyword),
            "local" => Some(SyntaxKind::LocalKeyword),
            "until" => Some(SyntaxKind::UntilKeyword),
            "while" => Some(SyntaxKind::WhileKeyword),
            _ => None,
        },
        6 => match text {
            "elseif" => Some(SyntaxKind::ElseIfKeyword),
            "repeat" => Some(SyntaxKind::RepeatKeyword),
            "return" => Some(SyntaxKind::ReturnKeyword),
            _ => None,
        },
        8 => match text {
            "function" => Some(SyntaxKind::FunctionKeyword),
            _ => None,
        },
        _ => None,
    }
}

/// Contextual keyword classification of an identifier.
///
/// `goto` is only recognised in versions that have it; in 5.1 it is a plain
/// name. `const` and `close` are always classified and the parser gates
/// attributes separately, so that `local x <const>` in 5.3 reports the
/// feature rather than an unknown attribute.
#[inline]
pub fn contextual(text: &str, version: LanguageVersion) -> ContextualKind {
    match text {
        "goto" if version.supports(Feature::Goto) => ContextualKind::Goto,
        "const" => ContextualKind::Const,
        "close" => ContextualKind::Close,
        _ => ContextualKind::None,
    }
}

/// Every reserved keyword, for tests and tooling.
pub const RESERVED: [&str; 21] = [
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];
