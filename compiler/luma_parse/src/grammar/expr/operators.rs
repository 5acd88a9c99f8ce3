//! Operator precedence table.
//!
//! Left and right binding powers as in the reference interpreter: an
//! operator binds when its left power exceeds the current limit, and its
//! right operand is parsed with the right power as the new limit. Right
//! associative operators have a right power below their left power.

use luma_ir::{Feature, SyntaxKind};

/// Binding power of unary operators.
pub(super) const UNARY_POWER: u8 = 12;

/// Binary operator facts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct BinaryOp {
    pub left: u8,
    pub right: u8,
    /// Feature that gates the operator, if any.
    pub feature: Option<Feature>,
}

impl BinaryOp {
    const fn new(left: u8, right: u8) -> Self {
        BinaryOp {
            left,
            right,
            feature: None,
        }
    }

    const fn gated(left: u8, right: u8, feature: Feature) -> Self {
        BinaryOp {
            left,
            right,
            feature: Some(feature),
        }
    }
}

/// `or < and < comparison < | < ~ < & < shift < .. < + - < * / // % < unary < ^`
pub(super) fn binary_op(kind: SyntaxKind) -> Option<BinaryOp> {
    Some(match kind {
        SyntaxKind::OrKeyword => BinaryOp::new(1, 1),
        SyntaxKind::AndKeyword => BinaryOp::new(2, 2),
        SyntaxKind::LessToken
        | SyntaxKind::GreaterToken
        | SyntaxKind::LessEqualsToken
        | SyntaxKind::GreaterEqualsToken
        | SyntaxKind::TildeEqualsToken
        | SyntaxKind::EqualsEqualsToken => BinaryOp::new(3, 3),
        SyntaxKind::BarToken => BinaryOp::gated(4, 4, Feature::BitwiseOperators),
        SyntaxKind::TildeToken => BinaryOp::gated(5, 5, Feature::BitwiseOperators),
        SyntaxKind::AmpersandToken => BinaryOp::gated(6, 6, Feature::BitwiseOperators),
        SyntaxKind::LessLessToken | SyntaxKind::GreaterGreaterToken => {
            BinaryOp::gated(7, 7, Feature::BitwiseOperators)
        }
        SyntaxKind::DotDotToken => BinaryOp::new(9, 8),
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => BinaryOp::new(10, 10),
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            BinaryOp::new(11, 11)
        }
        SyntaxKind::SlashSlashToken => BinaryOp::gated(11, 11, Feature::IntegerDivision),
        SyntaxKind::CaretToken => BinaryOp::new(14, 13),
        _ => return None,
    })
}

/// Unary operators and the feature gating them.
pub(super) fn unary_op(kind: SyntaxKind) -> Option<Option<Feature>> {
    match kind {
        SyntaxKind::NotKeyword | SyntaxKind::MinusToken | SyntaxKind::HashToken => Some(None),
        SyntaxKind::TildeToken => Some(Some(Feature::BitwiseOperators)),
        _ => None,
    }
}
