//! Token sets for lookahead decisions and error recovery.
//!
//! Token kinds have discriminants below 128, so a set of them is a `u128`
//! bitset with O(1) membership.

use luma_ir::SyntaxKind;

const _: () = assert!(
    (SyntaxKind::EndOfFileToken as u16) < 128,
    "TokenSet uses a u128 bitset; token kinds must be < 128"
);

/// A set of token kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: Self = Self(0);

    /// Add a kind (builder for const contexts).
    #[inline]
    #[must_use]
    pub const fn with(self, kind: SyntaxKind) -> Self {
        debug_assert!(kind.is_token());
        Self(self.0 | (1u128 << kind as u16))
    }

    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[inline]
    pub const fn contains(self, kind: SyntaxKind) -> bool {
        kind.is_token() && (self.0 & (1u128 << kind as u16)) != 0
    }

    /// Build a set from a list of kinds.
    pub const fn of(kinds: &[SyntaxKind]) -> Self {
        let mut set = Self::EMPTY;
        let mut i = 0;
        while i < kinds.len() {
            set = set.with(kinds[i]);
            i += 1;
        }
        set
    }
}

/// Tokens that end a block: the closing keyword of the enclosing statement.
pub const BLOCK_END: TokenSet = TokenSet::of(&[
    SyntaxKind::EndKeyword,
    SyntaxKind::ElseKeyword,
    SyntaxKind::ElseIfKeyword,
    SyntaxKind::UntilKeyword,
    SyntaxKind::EndOfFileToken,
]);

/// Tokens that can begin a statement.
pub const STATEMENT_START: TokenSet = TokenSet::of(&[
    SyntaxKind::SemicolonToken,
    SyntaxKind::IfKeyword,
    SyntaxKind::WhileKeyword,
    SyntaxKind::DoKeyword,
    SyntaxKind::ForKeyword,
    SyntaxKind::RepeatKeyword,
    SyntaxKind::FunctionKeyword,
    SyntaxKind::LocalKeyword,
    SyntaxKind::ReturnKeyword,
    SyntaxKind::BreakKeyword,
    SyntaxKind::ColonColonToken,
    SyntaxKind::IdentifierToken,
    SyntaxKind::OpenParenToken,
]);

/// Tokens that can begin an expression.
pub const EXPRESSION_START: TokenSet = TokenSet::of(&[
    SyntaxKind::NilKeyword,
    SyntaxKind::TrueKeyword,
    SyntaxKind::FalseKeyword,
    SyntaxKind::IntegerLiteralToken,
    SyntaxKind::RealLiteralToken,
    SyntaxKind::StringLiteralToken,
    SyntaxKind::DotDotDotToken,
    SyntaxKind::FunctionKeyword,
    SyntaxKind::OpenBraceToken,
    SyntaxKind::IdentifierToken,
    SyntaxKind::OpenParenToken,
    SyntaxKind::NotKeyword,
    SyntaxKind::MinusToken,
    SyntaxKind::HashToken,
    SyntaxKind::TildeToken,
]);

/// Where list parsing gives up and returns to the enclosing production.
pub const LIST_RECOVERY: TokenSet = BLOCK_END.union(TokenSet::of(&[
    SyntaxKind::IfKeyword,
    SyntaxKind::WhileKeyword,
    SyntaxKind::DoKeyword,
    SyntaxKind::ForKeyword,
    SyntaxKind::RepeatKeyword,
    SyntaxKind::LocalKeyword,
    SyntaxKind::ReturnKeyword,
    SyntaxKind::BreakKeyword,
    SyntaxKind::ThenKeyword,
]));

#[cfg(test)]
mod tests;
