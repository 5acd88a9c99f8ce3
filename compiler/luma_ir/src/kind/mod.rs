//! Syntax kinds for tokens, trivia and nodes.
//!
//! One `u16` enum covers everything in the tree. Discriminants are grouped
//! into ranges so classification is a range check:
//!
//! | range   | group                     |
//! |---------|---------------------------|
//! | 1-31    | reserved keywords         |
//! | 32-79   | punctuation               |
//! | 80-99   | other tokens              |
//! | 100-127 | trivia                    |
//! | 128-    | nodes                     |

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
#[repr(u16)]
pub enum SyntaxKind {
    // === Keywords ===
    AndKeyword = 1,
    BreakKeyword,
    DoKeyword,
    ElseKeyword,
    ElseIfKeyword,
    EndKeyword,
    FalseKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    InKeyword,
    LocalKeyword,
    NilKeyword,
    NotKeyword,
    OrKeyword,
    RepeatKeyword,
    ReturnKeyword,
    ThenKeyword,
    TrueKeyword,
    UntilKeyword,
    WhileKeyword,

    // === Punctuation ===
    PlusToken = 32,
    MinusToken,
    AsteriskToken,
    SlashToken,
    SlashSlashToken,
    PercentToken,
    CaretToken,
    HashToken,
    AmpersandToken,
    TildeToken,
    BarToken,
    LessLessToken,
    GreaterGreaterToken,
    EqualsEqualsToken,
    TildeEqualsToken,
    LessEqualsToken,
    GreaterEqualsToken,
    LessToken,
    GreaterToken,
    EqualsToken,
    OpenParenToken,
    CloseParenToken,
    OpenBraceToken,
    CloseBraceToken,
    OpenBracketToken,
    CloseBracketToken,
    ColonColonToken,
    ColonToken,
    SemicolonToken,
    CommaToken,
    DotToken,
    DotDotToken,
    DotDotDotToken,

    // === Other tokens ===
    IdentifierToken = 80,
    IntegerLiteralToken,
    RealLiteralToken,
    StringLiteralToken,
    /// Raw text of a directive line (the part of a shebang after `#`).
    DirectiveTextToken,
    BadToken,
    EndOfFileToken,

    // === Trivia ===
    WhitespaceTrivia = 100,
    EndOfLineTrivia,
    SingleLineCommentTrivia,
    MultiLineCommentTrivia,
    ShebangDirectiveTrivia,
    /// A `#` line where directives are not allowed.
    BadDirectiveTrivia,
    SkippedTokensTrivia,

    // === Nodes ===
    CompilationUnit = 128,
    Block,
    /// Structure of `SkippedTokensTrivia`.
    SkippedTokens,
    /// Structure of `ShebangDirectiveTrivia`: `#` and the directive text.
    ShebangDirective,

    // Statements
    EmptyStatement,
    ExpressionStatement,
    AssignmentStatement,
    LocalDeclarationStatement,
    LocalFunctionStatement,
    FunctionDeclarationStatement,
    DoStatement,
    WhileStatement,
    RepeatStatement,
    IfStatement,
    ElseIfClause,
    ElseClause,
    NumericForStatement,
    GenericForStatement,
    ReturnStatement,
    BreakStatement,
    GotoStatement,
    LabelStatement,

    // Statement parts
    FunctionName,
    FunctionBody,
    ParameterList,
    Parameter,
    NameList,
    LocalName,
    Attribute,
    ExpressionList,

    // Expressions
    LiteralExpression,
    VarArgExpression,
    NameExpression,
    ParenthesizedExpression,
    FunctionExpression,
    MemberAccessExpression,
    IndexExpression,
    CallExpression,
    MethodCallExpression,
    ArgumentList,
    TableConstructor,
    PositionalField,
    NamedField,
    IndexedField,
    BinaryExpression,
    UnaryExpression,
}

impl SyntaxKind {
    #[inline]
    pub const fn is_keyword(self) -> bool {
        matches!(self as u16, 1..=31)
    }

    #[inline]
    pub const fn is_punctuation(self) -> bool {
        matches!(self as u16, 32..=79)
    }

    #[inline]
    pub const fn is_token(self) -> bool {
        (self as u16) < 100
    }

    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self as u16, 100..=127)
    }

    #[inline]
    pub const fn is_node(self) -> bool {
        (self as u16) >= 128
    }

    #[inline]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::IntegerLiteralToken
                | Self::RealLiteralToken
                | Self::StringLiteralToken
                | Self::NilKeyword
                | Self::TrueKeyword
                | Self::FalseKeyword
        )
    }

    /// Comment trivia of either form.
    #[inline]
    pub const fn is_comment(self) -> bool {
        matches!(
            self,
            Self::SingleLineCommentTrivia | Self::MultiLineCommentTrivia
        )
    }

    /// Statement node kinds.
    #[inline]
    pub fn is_statement(self) -> bool {
        (Self::EmptyStatement..=Self::LabelStatement).contains(&self)
            && !matches!(self, Self::ElseIfClause | Self::ElseClause)
    }

    /// Source text of keywords and punctuation.
    pub const fn fixed_text(self) -> Option<&'static str> {
        Some(match self {
            Self::AndKeyword => "and",
            Self::BreakKeyword => "break",
            Self::DoKeyword => "do",
            Self::ElseKeyword => "else",
            Self::ElseIfKeyword => "elseif",
            Self::EndKeyword => "end",
            Self::FalseKeyword => "false",
            Self::ForKeyword => "for",
            Self::FunctionKeyword => "function",
            Self::IfKeyword => "if",
            Self::InKeyword => "in",
            Self::LocalKeyword => "local",
            Self::NilKeyword => "nil",
            Self::NotKeyword => "not",
            Self::OrKeyword => "or",
            Self::RepeatKeyword => "repeat",
            Self::ReturnKeyword => "return",
            Self::ThenKeyword => "then",
            Self::TrueKeyword => "true",
            Self::UntilKeyword => "until",
            Self::WhileKeyword => "while",
            Self::PlusToken => "+",
            Self::MinusToken => "-",
            Self::AsteriskToken => "*",
            Self::SlashToken => "/",
            Self::SlashSlashToken => "//",
            Self::PercentToken => "%",
            Self::CaretToken => "^",
            Self::HashToken => "#",
            Self::AmpersandToken => "&",
            Self::TildeToken => "~",
            Self::BarToken => "|",
            Self::LessLessToken => "<<",
            Self::GreaterGreaterToken => ">>",
            Self::EqualsEqualsToken => "==",
            Self::TildeEqualsToken => "~=",
            Self::LessEqualsToken => "<=",
            Self::GreaterEqualsToken => ">=",
            Self::LessToken => "<",
            Self::GreaterToken => ">",
            Self::EqualsToken => "=",
            Self::OpenParenToken => "(",
            Self::CloseParenToken => ")",
            Self::OpenBraceToken => "{",
            Self::CloseBraceToken => "}",
            Self::OpenBracketToken => "[",
            Self::CloseBracketToken => "]",
            Self::ColonColonToken => "::",
            Self::ColonToken => ":",
            Self::SemicolonToken => ";",
            Self::CommaToken => ",",
            Self::DotToken => ".",
            Self::DotDotToken => "..",
            Self::DotDotDotToken => "...",
            _ => return None,
        })
    }

    /// Short description for "expected X" messages.
    pub fn describe(self) -> &'static str {
        if let Some(text) = self.fixed_text() {
            return text;
        }
        match self {
            Self::IdentifierToken => "identifier",
            Self::IntegerLiteralToken => "integer literal",
            Self::RealLiteralToken => "number literal",
            Self::StringLiteralToken => "string literal",
            Self::EndOfFileToken => "end of file",
            Self::BadToken => "invalid token",
            _ => "syntax",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Secondary classification of identifier tokens.
///
/// A contextual keyword is an ordinary identifier everywhere except in the
/// one position where the grammar gives it meaning, so introducing one never
/// breaks code that uses the word as a name.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ContextualKind {
    #[default]
    None,
    /// `goto` before a label name.
    Goto,
    /// `const` inside a local attribute.
    Const,
    /// `close` inside a local attribute.
    Close,
}
