use super::*;

#[test]
fn defaults_by_version() {
    let policy = SeverityPolicy::new();
    for version in LanguageVersion::ALL {
        assert_eq!(policy.severity(ErrorCode::E0004, version), Severity::Warning);
        assert_eq!(policy.severity(ErrorCode::E1009, version), Severity::Error);
        assert_eq!(policy.severity(ErrorCode::E0001, version), Severity::Error);
    }
    assert_eq!(
        policy.severity(ErrorCode::E0005, LanguageVersion::Lua51),
        Severity::Warning
    );
    assert_eq!(
        policy.severity(ErrorCode::E0005, LanguageVersion::Lua52),
        Severity::Error
    );
}

#[test]
fn version_override_beats_global_override() {
    let policy = SeverityPolicy::new()
        .with_override(ErrorCode::E0004, Severity::Error)
        .with_version_override(ErrorCode::E0004, LanguageVersion::Lua53, Severity::Note);
    assert_eq!(
        policy.severity(ErrorCode::E0004, LanguageVersion::Lua53),
        Severity::Note
    );
    assert_eq!(
        policy.severity(ErrorCode::E0004, LanguageVersion::Lua54),
        Severity::Error
    );
}

#[test]
fn diagnostic_carries_policy_severity() {
    let policy = SeverityPolicy::new();
    let diag = policy.diagnostic(ErrorCode::E0004, LanguageVersion::Lua54);
    assert_eq!(diag.severity, Severity::Warning);
    assert!(!diag.is_error());
}
