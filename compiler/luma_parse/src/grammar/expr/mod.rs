//! Expression productions.
//!
//! ```text
//! exp        ::= (simpleexp | unop exp) { binop exp }
//! simpleexp  ::= nil | false | true | Numeral | LiteralString | '...'
//!              | functiondef | tableconstructor | suffixedexp
//! suffixedexp::= primaryexp { '.' Name | '[' exp ']' | ':' Name args | args }
//! primaryexp ::= Name | '(' exp ')'
//! args       ::= '(' [explist] ')' | tableconstructor | LiteralString
//! ```
//!
//! Binary operators use precedence climbing over the table in
//! [`operators`]. Every production returns the kind of the node it built so
//! statements can tell calls and assignable expressions apart without
//! looking into the tree.

mod operators;

use luma_diagnostic::ErrorCode;
use luma_ir::{LanguageVersion, Span, SyntaxKind};
use luma_stack::ensure_sufficient_stack;

use crate::context::ParseContext;
use crate::parser::Parser;
use crate::recovery::{TokenSet, EXPRESSION_START};
use crate::series::{SeriesConfig, TrailingSeparator};

use operators::{binary_op, unary_op, UNARY_POWER};

const FIELD_START: TokenSet = EXPRESSION_START.with(SyntaxKind::OpenBracketToken);

const FIELD_SEPARATORS: TokenSet = TokenSet::of(&[SyntaxKind::CommaToken, SyntaxKind::SemicolonToken]);

const PARAMETER_START: TokenSet =
    TokenSet::of(&[SyntaxKind::IdentifierToken, SyntaxKind::DotDotDotToken]);

impl Parser<'_> {
    /// Parse one expression.
    pub(crate) fn expression(&mut self) -> SyntaxKind {
        ensure_sufficient_stack(|| self.sub_expression(0))
    }

    /// Operators with a left binding power above `limit`.
    fn sub_expression(&mut self, limit: u8) -> SyntaxKind {
        let checkpoint = self.checkpoint();
        let mut kind = if let Some(feature) = unary_op(self.current_kind()) {
            if let Some(feature) = feature {
                self.require_feature(feature, self.current_span());
            }
            self.start_node(SyntaxKind::UnaryExpression);
            self.bump();
            ensure_sufficient_stack(|| self.sub_expression(UNARY_POWER));
            self.finish_node();
            SyntaxKind::UnaryExpression
        } else {
            self.simple_expression()
        };

        while let Some(op) = binary_op(self.current_kind()) {
            if op.left <= limit {
                break;
            }
            if let Some(feature) = op.feature {
                self.require_feature(feature, self.current_span());
            }
            self.start_node_at(checkpoint, SyntaxKind::BinaryExpression);
            self.bump();
            ensure_sufficient_stack(|| self.sub_expression(op.right));
            self.finish_node();
            kind = SyntaxKind::BinaryExpression;
        }
        kind
    }

    fn simple_expression(&mut self) -> SyntaxKind {
        let kind = self.current_kind();
        if kind.is_literal() {
            self.start_node(SyntaxKind::LiteralExpression);
            self.bump();
            self.finish_node();
            return SyntaxKind::LiteralExpression;
        }
        match kind {
            SyntaxKind::DotDotDotToken => {
                if !self.context().in_vararg_function() {
                    self.error(
                        ErrorCode::E1008,
                        self.current_span(),
                        "cannot use `...` outside a vararg function",
                    );
                }
                self.start_node(SyntaxKind::VarArgExpression);
                self.bump();
                self.finish_node();
                SyntaxKind::VarArgExpression
            }
            SyntaxKind::OpenBraceToken => self.table_constructor(),
            SyntaxKind::FunctionKeyword => {
                self.start_node(SyntaxKind::FunctionExpression);
                self.bump();
                self.function_body();
                self.finish_node();
                SyntaxKind::FunctionExpression
            }
            _ => self.suffixed_expression(),
        }
    }

    /// A primary expression followed by member accesses, indexing and calls.
    pub(super) fn suffixed_expression(&mut self) -> SyntaxKind {
        let checkpoint = self.checkpoint();
        let mut kind = self.primary_expression();
        loop {
            kind = match self.current_kind() {
                SyntaxKind::DotToken => {
                    self.start_node_at(checkpoint, SyntaxKind::MemberAccessExpression);
                    self.bump();
                    self.expect_identifier();
                    self.finish_node();
                    SyntaxKind::MemberAccessExpression
                }
                SyntaxKind::OpenBracketToken => {
                    self.start_node_at(checkpoint, SyntaxKind::IndexExpression);
                    self.bump();
                    self.expression();
                    self.expect(SyntaxKind::CloseBracketToken);
                    self.finish_node();
                    SyntaxKind::IndexExpression
                }
                SyntaxKind::ColonToken => {
                    self.start_node_at(checkpoint, SyntaxKind::MethodCallExpression);
                    self.bump();
                    self.expect_identifier();
                    self.arguments();
                    self.finish_node();
                    SyntaxKind::MethodCallExpression
                }
                SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBraceToken
                | SyntaxKind::StringLiteralToken => {
                    if self.at(SyntaxKind::OpenParenToken)
                        && self.version() < LanguageVersion::Lua52
                        && self.line_break_before()
                    {
                        self.error(
                            ErrorCode::E1010,
                            self.current_span(),
                            "ambiguous syntax: function call or new statement",
                        );
                    }
                    self.start_node_at(checkpoint, SyntaxKind::CallExpression);
                    self.arguments();
                    self.finish_node();
                    SyntaxKind::CallExpression
                }
                _ => return kind,
            };
        }
    }

    fn primary_expression(&mut self) -> SyntaxKind {
        match self.current_kind() {
            SyntaxKind::IdentifierToken => {
                self.start_node(SyntaxKind::NameExpression);
                self.bump();
                self.finish_node();
                SyntaxKind::NameExpression
            }
            SyntaxKind::OpenParenToken => {
                self.start_node(SyntaxKind::ParenthesizedExpression);
                self.bump();
                self.expression();
                self.expect(SyntaxKind::CloseParenToken);
                self.finish_node();
                SyntaxKind::ParenthesizedExpression
            }
            _ => {
                let message = format!("expected expression, found {}", self.found());
                self.error(ErrorCode::E1002, self.current_span(), message);
                self.missing_name_expression();
                SyntaxKind::NameExpression
            }
        }
    }

    /// `NameExpression` around a missing identifier.
    fn missing_name_expression(&mut self) {
        self.start_node(SyntaxKind::NameExpression);
        self.missing(SyntaxKind::IdentifierToken);
        self.finish_node();
    }

    /// `ArgumentList`: parenthesized expressions, a table or a string.
    fn arguments(&mut self) {
        self.start_node(SyntaxKind::ArgumentList);
        match self.current_kind() {
            SyntaxKind::OpenBraceToken => {
                self.table_constructor();
            }
            SyntaxKind::StringLiteralToken => {
                self.start_node(SyntaxKind::LiteralExpression);
                self.bump();
                self.finish_node();
            }
            _ => {
                if self.expect(SyntaxKind::OpenParenToken) {
                    self.series(
                        SeriesConfig::comma(SyntaxKind::CloseParenToken, EXPRESSION_START),
                        |p| {
                            p.expression();
                        },
                        Self::missing_name_expression,
                    );
                    self.expect(SyntaxKind::CloseParenToken);
                } else {
                    self.missing(SyntaxKind::CloseParenToken);
                }
            }
        }
        self.finish_node();
    }

    /// `ExpressionList`: `exp {',' exp}`.
    pub(super) fn expression_list(&mut self) {
        self.start_node(SyntaxKind::ExpressionList);
        self.expression();
        while self.eat(SyntaxKind::CommaToken) {
            self.expression();
        }
        self.finish_node();
    }

    /// `{ field {sep field} [sep] }` with `,` or `;` as separators.
    fn table_constructor(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::TableConstructor);
        self.bump();
        let config = SeriesConfig::comma(SyntaxKind::CloseBraceToken, FIELD_START)
            .separators(FIELD_SEPARATORS)
            .trailing(TrailingSeparator::Allowed);
        self.series(config, Self::field, |p| {
            p.start_node(SyntaxKind::PositionalField);
            p.missing_name_expression();
            p.finish_node();
        });
        self.expect(SyntaxKind::CloseBraceToken);
        self.finish_node();
        SyntaxKind::TableConstructor
    }

    fn field(&mut self) {
        match self.current_kind() {
            SyntaxKind::OpenBracketToken => {
                self.start_node(SyntaxKind::IndexedField);
                self.bump();
                self.expression();
                self.expect(SyntaxKind::CloseBracketToken);
                self.expect(SyntaxKind::EqualsToken);
                self.expression();
            }
            SyntaxKind::IdentifierToken if self.nth_kind(1) == SyntaxKind::EqualsToken => {
                self.start_node(SyntaxKind::NamedField);
                self.bump();
                self.bump();
                self.expression();
            }
            _ => {
                self.start_node(SyntaxKind::PositionalField);
                self.expression();
            }
        }
        self.finish_node();
    }

    /// `FunctionBody`: parameters, body block and `end`.
    pub(super) fn function_body(&mut self) {
        self.start_node(SyntaxKind::FunctionBody);
        let is_vararg = self.parameter_list();
        self.with_context(ParseContext::function_body(is_vararg), Self::block);
        self.expect(SyntaxKind::EndKeyword);
        self.finish_node();
    }

    /// `ParameterList`; returns whether it ends with `...`.
    fn parameter_list(&mut self) -> bool {
        self.start_node(SyntaxKind::ParameterList);
        let mut is_vararg = false;
        if self.expect(SyntaxKind::OpenParenToken) {
            self.series(
                SeriesConfig::comma(SyntaxKind::CloseParenToken, PARAMETER_START),
                |p| {
                    if is_vararg {
                        p.error(
                            ErrorCode::E1001,
                            p.current_span(),
                            "`...` must be the last parameter",
                        );
                    }
                    is_vararg |= p.at(SyntaxKind::DotDotDotToken);
                    p.start_node(SyntaxKind::Parameter);
                    p.bump();
                    p.finish_node();
                },
                |p| {
                    p.start_node(SyntaxKind::Parameter);
                    p.missing(SyntaxKind::IdentifierToken);
                    p.finish_node();
                },
            );
            self.expect(SyntaxKind::CloseParenToken);
        } else {
            self.missing(SyntaxKind::CloseParenToken);
        }
        self.finish_node();
        is_vararg
    }

    /// Report `kind` expressions that cannot be assigned to.
    pub(super) fn check_assignment_target(&mut self, kind: SyntaxKind, span: Span) {
        if !matches!(
            kind,
            SyntaxKind::NameExpression
                | SyntaxKind::MemberAccessExpression
                | SyntaxKind::IndexExpression
        ) {
            self.error(
                ErrorCode::E1011,
                span,
                "cannot assign to this expression; expected a name, field or index",
            );
        }
    }
}

#[cfg(test)]
mod tests;
