use luma_diagnostic::Severity;
use pretty_assertions::assert_eq;

use super::*;

#[test]
fn codes_follow_kind() {
    let span = Span::new(0, 1);
    let cases = [
        (LexErrorKind::UnterminatedString, ErrorCode::E0001),
        (LexErrorKind::InvalidCharacter { ch: '$' }, ErrorCode::E0002),
        (LexErrorKind::MalformedNumber, ErrorCode::E0003),
        (LexErrorKind::NumberOverflow, ErrorCode::E0004),
        (
            LexErrorKind::InvalidEscape {
                detail: EscapeProblem::Unknown,
            },
            ErrorCode::E0005,
        ),
        (LexErrorKind::UnterminatedLongString { level: 0 }, ErrorCode::E0006),
        (LexErrorKind::UnterminatedLongComment { level: 1 }, ErrorCode::E0007),
        (LexErrorKind::DirectiveNotAllowed, ErrorCode::E0008),
        (LexErrorKind::InvalidLongBracket, ErrorCode::E0009),
        (
            LexErrorKind::NotAvailable {
                feature: Feature::HexEscape,
            },
            ErrorCode::E0010,
        ),
    ];
    for (kind, code) in cases {
        assert_eq!(LexError::new(span, kind).code(), code);
    }
}

#[test]
fn not_available_names_versions() {
    let err = LexError::not_available(Span::new(3, 7), Feature::HexEscape);
    assert_eq!(
        err.message(LanguageVersion::Lua51),
        "hexadecimal escape sequences are not available in Lua 5.1 (introduced in Lua 5.2)"
    );
}

#[test]
fn diagnostic_severity_depends_on_version() {
    let policy = SeverityPolicy::new();
    let err = LexError::invalid_escape(Span::new(1, 3), EscapeProblem::Unknown);

    let old = err.clone().into_diagnostic(&policy, LanguageVersion::Lua51);
    assert_eq!(old.severity, Severity::Warning);
    assert_eq!(old.span, Span::new(1, 3));

    let new = err.into_diagnostic(&policy, LanguageVersion::Lua54);
    assert_eq!(new.severity, Severity::Error);
    assert_eq!(new.message, "invalid escape sequence");
}

#[test]
fn unterminated_long_brackets_point_at_their_opener() {
    let policy = SeverityPolicy::new();
    let string = LexError::new(
        Span::new(4, 14),
        LexErrorKind::UnterminatedLongString { level: 2 },
    )
    .into_diagnostic(&policy, LanguageVersion::Lua54);
    assert_eq!(string.span, Span::new(4, 14));
    assert_eq!(string.labels.len(), 1);
    assert_eq!(string.labels[0].span, Span::new(4, 8));
    assert!(!string.labels[0].is_primary);
    assert_eq!(string.notes, ["expected `]==]` before end of file"]);

    let comment = LexError::new(
        Span::new(0, 9),
        LexErrorKind::UnterminatedLongComment { level: 0 },
    )
    .into_diagnostic(&policy, LanguageVersion::Lua54);
    assert_eq!(comment.labels[0].span, Span::new(0, 4));
    assert_eq!(comment.notes, ["expected `]]` before end of file"]);
}

#[test]
fn version_gated_forms_name_the_version_to_select() {
    let diagnostic = LexError::not_available(Span::new(3, 5), Feature::HexEscape)
        .into_diagnostic(&SeverityPolicy::new(), LanguageVersion::Lua51);
    assert_eq!(diagnostic.notes, ["select Lua 5.2 or later to use this"]);
    assert!(diagnostic.labels.is_empty());
}
