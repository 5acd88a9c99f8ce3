//! Statement productions.
//!
//! ```text
//! stat ::= ';' | varlist '=' explist | functioncall | label | break
//!        | goto Name | do block end | while exp do block end
//!        | repeat block until exp
//!        | if exp then block {elseif exp then block} [else block] end
//!        | for Name '=' exp ',' exp [',' exp] do block end
//!        | for namelist in explist do block end
//!        | function funcname funcbody | local function Name funcbody
//!        | local attnamelist ['=' explist]
//! retstat ::= return [explist] [';']
//! ```

use luma_diagnostic::ErrorCode;
use luma_ir::{ContextualKind, Feature, Span, SyntaxKind};

use crate::context::ParseContext;
use crate::parser::Parser;
use crate::recovery::EXPRESSION_START;

impl Parser<'_> {
    /// Parse one statement; the current token is in `STATEMENT_START`.
    /// Returns the kind of the statement node.
    pub(super) fn statement(&mut self) -> SyntaxKind {
        match self.current_kind() {
            SyntaxKind::SemicolonToken => {
                self.start_node(SyntaxKind::EmptyStatement);
                self.bump();
                self.finish_node();
                SyntaxKind::EmptyStatement
            }
            SyntaxKind::IfKeyword => self.if_statement(),
            SyntaxKind::WhileKeyword => self.while_statement(),
            SyntaxKind::DoKeyword => {
                self.start_node(SyntaxKind::DoStatement);
                self.bump();
                self.block();
                self.expect(SyntaxKind::EndKeyword);
                self.finish_node();
                SyntaxKind::DoStatement
            }
            SyntaxKind::ForKeyword => self.for_statement(),
            SyntaxKind::RepeatKeyword => self.repeat_statement(),
            SyntaxKind::FunctionKeyword => {
                self.start_node(SyntaxKind::FunctionDeclarationStatement);
                self.bump();
                self.function_name();
                self.function_body();
                self.finish_node();
                SyntaxKind::FunctionDeclarationStatement
            }
            SyntaxKind::LocalKeyword => {
                if self.nth_kind(1) == SyntaxKind::FunctionKeyword {
                    self.local_function_statement()
                } else {
                    self.local_declaration_statement()
                }
            }
            SyntaxKind::ReturnKeyword => self.return_statement(),
            SyntaxKind::BreakKeyword => {
                self.start_node(SyntaxKind::BreakStatement);
                if !self.context().in_loop() {
                    self.error(
                        ErrorCode::E1007,
                        self.current_span(),
                        "`break` outside a loop",
                    );
                }
                self.bump();
                self.finish_node();
                SyntaxKind::BreakStatement
            }
            SyntaxKind::ColonColonToken => self.label_statement(),
            SyntaxKind::IdentifierToken if self.at_goto() => self.goto_statement(),
            _ => self.expression_statement(),
        }
    }

    /// `goto` followed by a name. In versions without `goto` the word is
    /// not tagged by the lexer; the pair is still read as a goto statement
    /// and reported as unavailable.
    fn at_goto(&self) -> bool {
        let token = self.current();
        let is_goto = token.contextual_kind() == ContextualKind::Goto || token.text() == "goto";
        is_goto && self.nth_kind(1) == SyntaxKind::IdentifierToken
    }

    fn goto_statement(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::GotoStatement);
        self.require_feature(Feature::Goto, self.current_span());
        self.bump();
        self.bump();
        self.finish_node();
        SyntaxKind::GotoStatement
    }

    fn label_statement(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::LabelStatement);
        self.require_feature(Feature::Goto, self.current_span());
        self.bump();
        self.expect_identifier();
        self.expect(SyntaxKind::ColonColonToken);
        self.finish_node();
        SyntaxKind::LabelStatement
    }

    fn if_statement(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::IfStatement);
        self.bump();
        self.expression();
        self.expect(SyntaxKind::ThenKeyword);
        self.block();
        while self.at(SyntaxKind::ElseIfKeyword) {
            self.start_node(SyntaxKind::ElseIfClause);
            self.bump();
            self.expression();
            self.expect(SyntaxKind::ThenKeyword);
            self.block();
            self.finish_node();
        }
        if self.at(SyntaxKind::ElseKeyword) {
            self.start_node(SyntaxKind::ElseClause);
            self.bump();
            self.block();
            self.finish_node();
        }
        self.expect(SyntaxKind::EndKeyword);
        self.finish_node();
        SyntaxKind::IfStatement
    }

    fn while_statement(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::WhileStatement);
        self.bump();
        self.expression();
        self.expect(SyntaxKind::DoKeyword);
        self.loop_block();
        self.expect(SyntaxKind::EndKeyword);
        self.finish_node();
        SyntaxKind::WhileStatement
    }

    fn repeat_statement(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::RepeatStatement);
        self.bump();
        self.loop_block();
        self.expect(SyntaxKind::UntilKeyword);
        self.expression();
        self.finish_node();
        SyntaxKind::RepeatStatement
    }

    /// Numeric `for` when the name is followed by `=`, generic otherwise.
    fn for_statement(&mut self) -> SyntaxKind {
        let numeric = self.nth_kind(1) == SyntaxKind::IdentifierToken
            && self.nth_kind(2) == SyntaxKind::EqualsToken;
        let kind = if numeric {
            SyntaxKind::NumericForStatement
        } else {
            SyntaxKind::GenericForStatement
        };
        self.start_node(kind);
        self.bump();
        if numeric {
            self.bump();
            self.bump();
            self.expression();
            self.expect(SyntaxKind::CommaToken);
            self.expression();
            if self.eat(SyntaxKind::CommaToken) {
                self.expression();
            }
        } else {
            self.name_list(false);
            self.expect(SyntaxKind::InKeyword);
            self.expression_list();
        }
        self.expect(SyntaxKind::DoKeyword);
        self.loop_block();
        self.expect(SyntaxKind::EndKeyword);
        self.finish_node();
        kind
    }

    fn loop_block(&mut self) {
        let context = self.context().with(ParseContext::IN_LOOP);
        self.with_context(context, Self::block);
    }

    /// `FunctionName`: `Name {'.' Name} [':' Name]`.
    fn function_name(&mut self) {
        self.start_node(SyntaxKind::FunctionName);
        self.expect_identifier();
        while self.eat(SyntaxKind::DotToken) {
            self.expect_identifier();
        }
        if self.eat(SyntaxKind::ColonToken) {
            self.expect_identifier();
        }
        self.finish_node();
    }

    fn local_function_statement(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::LocalFunctionStatement);
        self.bump();
        self.bump();
        self.expect_identifier();
        self.function_body();
        self.finish_node();
        SyntaxKind::LocalFunctionStatement
    }

    fn local_declaration_statement(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::LocalDeclarationStatement);
        self.bump();
        self.name_list(true);
        if self.eat(SyntaxKind::EqualsToken) {
            self.expression_list();
        }
        self.finish_node();
        SyntaxKind::LocalDeclarationStatement
    }

    /// `NameList` of `LocalName`s, with attributes after `local`.
    fn name_list(&mut self, attributes: bool) {
        self.start_node(SyntaxKind::NameList);
        loop {
            self.start_node(SyntaxKind::LocalName);
            self.expect_identifier();
            if attributes && self.at(SyntaxKind::LessToken) {
                self.attribute();
            }
            self.finish_node();
            if !self.eat(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.finish_node();
    }

    /// `Attribute`: `'<' Name '>'` where the name is `const` or `close`.
    fn attribute(&mut self) {
        self.start_node(SyntaxKind::Attribute);
        self.require_feature(Feature::LocalAttributes, self.current_span());
        self.bump();
        if self.at(SyntaxKind::IdentifierToken) {
            let token = self.current();
            if !matches!(
                token.contextual_kind(),
                ContextualKind::Const | ContextualKind::Close
            ) {
                let message = format!(
                    "unknown attribute `{}`; expected `const` or `close`",
                    token.text()
                );
                self.error(ErrorCode::E1012, self.current_span(), message);
            }
            self.bump();
        } else {
            self.expect_identifier();
        }
        self.expect(SyntaxKind::GreaterToken);
        self.finish_node();
    }

    fn return_statement(&mut self) -> SyntaxKind {
        self.start_node(SyntaxKind::ReturnStatement);
        self.bump();
        if self.at_set(EXPRESSION_START) {
            self.expression_list();
        }
        self.eat(SyntaxKind::SemicolonToken);
        self.finish_node();
        SyntaxKind::ReturnStatement
    }

    /// A call statement or an assignment, told apart after the first
    /// suffixed expression.
    fn expression_statement(&mut self) -> SyntaxKind {
        let checkpoint = self.checkpoint();
        let start = self.current_start();
        let kind = self.suffixed_expression();

        if self.at(SyntaxKind::EqualsToken) || self.at(SyntaxKind::CommaToken) {
            self.start_node_at(checkpoint, SyntaxKind::AssignmentStatement);
            self.start_node_at(checkpoint, SyntaxKind::ExpressionList);
            self.check_assignment_target(kind, Span::new(start, self.last_end().max(start)));
            while self.eat(SyntaxKind::CommaToken) {
                let start = self.current_start();
                let kind = self.suffixed_expression();
                self.check_assignment_target(kind, Span::new(start, self.last_end().max(start)));
            }
            self.finish_node();
            self.expect(SyntaxKind::EqualsToken);
            self.expression_list();
            self.finish_node();
            return SyntaxKind::AssignmentStatement;
        }

        if !matches!(
            kind,
            SyntaxKind::CallExpression | SyntaxKind::MethodCallExpression
        ) {
            self.error(
                ErrorCode::E1001,
                Span::new(start, self.last_end().max(start)),
                "syntax error: only calls and assignments can be statements",
            );
        }
        self.start_node_at(checkpoint, SyntaxKind::ExpressionStatement);
        self.finish_node();
        SyntaxKind::ExpressionStatement
    }
}

#[cfg(test)]
mod tests;
