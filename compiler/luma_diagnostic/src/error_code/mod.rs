//! Error codes for all front-end diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E1001`) with the first digit
//! indicating the phase that reports it.

use std::fmt;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where the first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Malformed number
    E0003,
    /// Number literal out of range
    E0004,
    /// Invalid escape sequence
    E0005,
    /// Unterminated long string
    E0006,
    /// Unterminated long comment
    E0007,
    /// `#` line where no directive is allowed
    E0008,
    /// Invalid long bracket delimiter
    E0009,
    /// Lexical form not available in the language version
    E0010,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Expected identifier, found keyword
    E1003,
    /// Expected token
    E1004,
    /// Missing list element
    E1005,
    /// `return` must be the last statement of a block
    E1006,
    /// `break` outside a loop
    E1007,
    /// `...` outside a vararg function
    E1008,
    /// Feature not available in the language version
    E1009,
    /// Ambiguous syntax (function call or new statement)
    E1010,
    /// Cannot assign to this expression
    E1011,
    /// Unknown local attribute
    E1012,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        // Lexer
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E0006,
        ErrorCode::E0007,
        ErrorCode::E0008,
        ErrorCode::E0009,
        ErrorCode::E0010,
        // Parser
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E1006,
        ErrorCode::E1007,
        ErrorCode::E1008,
        ErrorCode::E1009,
        ErrorCode::E1010,
        ErrorCode::E1011,
        ErrorCode::E1012,
    ];

    /// Get the string representation (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E0009 => "E0009",
            ErrorCode::E0010 => "E0010",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
        }
    }

    /// One-line summary, used when a diagnostic has no message of its own.
    pub fn summary(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character",
            ErrorCode::E0003 => "malformed number",
            ErrorCode::E0004 => "number literal out of range",
            ErrorCode::E0005 => "invalid escape sequence",
            ErrorCode::E0006 => "unterminated long string",
            ErrorCode::E0007 => "unterminated long comment",
            ErrorCode::E0008 => "directive not allowed here",
            ErrorCode::E0009 => "invalid long bracket delimiter",
            ErrorCode::E0010 => "not available in this language version",
            ErrorCode::E1001 => "syntax error",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1003 => "expected identifier, found keyword",
            ErrorCode::E1004 => "expected token",
            ErrorCode::E1005 => "missing list element",
            ErrorCode::E1006 => "`return` must be the last statement",
            ErrorCode::E1007 => "`break` outside a loop",
            ErrorCode::E1008 => "`...` outside a vararg function",
            ErrorCode::E1009 => "feature not available",
            ErrorCode::E1010 => "ambiguous syntax",
            ErrorCode::E1011 => "cannot assign to this expression",
            ErrorCode::E1012 => "unknown attribute",
        }
    }

    /// Check if this is a lexer error (E0xxx range).
    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a parser error (E1xxx range).
    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
