use super::*;

#[test]
fn membership() {
    let set = TokenSet::EMPTY
        .with(SyntaxKind::CommaToken)
        .with(SyntaxKind::EndOfFileToken);
    assert!(set.contains(SyntaxKind::CommaToken));
    assert!(set.contains(SyntaxKind::EndOfFileToken));
    assert!(!set.contains(SyntaxKind::SemicolonToken));
}

#[test]
fn node_kinds_are_never_members() {
    assert!(!STATEMENT_START.contains(SyntaxKind::Block));
    assert!(!EXPRESSION_START.contains(SyntaxKind::CompilationUnit));
}

#[test]
fn union_keeps_both_sides() {
    assert!(LIST_RECOVERY.contains(SyntaxKind::UntilKeyword));
    assert!(LIST_RECOVERY.contains(SyntaxKind::LocalKeyword));
    assert!(!LIST_RECOVERY.contains(SyntaxKind::CommaToken));
}

#[test]
fn every_block_end_is_a_keyword_or_end_of_file() {
    for kind in [
        SyntaxKind::EndKeyword,
        SyntaxKind::ElseKeyword,
        SyntaxKind::ElseIfKeyword,
        SyntaxKind::UntilKeyword,
    ] {
        assert!(BLOCK_END.contains(kind));
        assert!(!STATEMENT_START.contains(kind));
    }
}
