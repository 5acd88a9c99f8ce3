//! Raw token tags.
//!
//! Tags are grouped into numeric ranges so range checks stay cheap:
//!
//! | range   | group                  |
//! |---------|------------------------|
//! | 0-15    | identifiers, literals  |
//! | 32-63   | operators              |
//! | 80-95   | delimiters             |
//! | 112-127 | trivia                 |
//! | 240-254 | errors                 |
//! | 255     | EOF                    |

/// Kind of a raw token. One byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RawTag {
    // === Identifiers & literals ===
    Ident = 0,
    /// Decimal numeral, integer or real.
    Number = 1,
    /// `0x` numeral, integer or real.
    HexNumber = 2,
    /// Numeral followed by junk (`1.2.3`, `3x`, `0x`, `1e`).
    MalformedNumber = 3,
    /// Quoted string with its closing quote.
    String = 4,
    /// `[=*[ ... ]=*]` with a matching closer.
    LongString = 5,

    // === Operators ===
    Plus = 32,
    Minus = 33,
    Star = 34,
    Slash = 35,
    SlashSlash = 36,
    Percent = 37,
    Caret = 38,
    Hash = 39,
    Amp = 40,
    Tilde = 41,
    Pipe = 42,
    ShiftLeft = 43,
    ShiftRight = 44,
    EqualEqual = 45,
    TildeEqual = 46,
    LessEqual = 47,
    GreaterEqual = 48,
    Less = 49,
    Greater = 50,
    Equal = 51,
    DotDot = 52,
    DotDotDot = 53,

    // === Delimiters ===
    LeftParen = 80,
    RightParen = 81,
    LeftBrace = 82,
    RightBrace = 83,
    LeftBracket = 84,
    RightBracket = 85,
    ColonColon = 86,
    Colon = 87,
    Semicolon = 88,
    Comma = 89,
    Dot = 90,

    // === Trivia ===
    Whitespace = 112,
    /// `\n`, `\r\n` or a lone `\r`.
    Newline = 113,
    /// `--` up to (not including) the end of line.
    LineComment = 114,
    /// `--[=*[ ... ]=*]` with a matching closer.
    BlockComment = 115,
    /// `#` line at the very start of the file.
    Shebang = 116,

    // === Errors ===
    /// Byte (or UTF-8 character) that starts no token.
    InvalidByte = 240,
    /// Quoted string cut off by end of line or EOF.
    UnterminatedString = 241,
    UnterminatedLongString = 242,
    UnterminatedBlockComment = 243,
    /// `[` followed by `=`s but no second `[`.
    InvalidLongBracket = 244,

    Eof = 255,
}

/// A raw token: tag plus byte length. Positions are implicit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RawToken {
    pub tag: RawTag,
    pub len: u32,
}

const _: () = assert!(std::mem::size_of::<RawToken>() == 8);

impl RawTag {
    /// Fixed source text of operator and delimiter tags.
    pub const fn lexeme(self) -> Option<&'static str> {
        Some(match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::SlashSlash => "//",
            Self::Percent => "%",
            Self::Caret => "^",
            Self::Hash => "#",
            Self::Amp => "&",
            Self::Tilde => "~",
            Self::Pipe => "|",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::EqualEqual => "==",
            Self::TildeEqual => "~=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equal => "=",
            Self::DotDot => "..",
            Self::DotDotDot => "...",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBrace => "{",
            Self::RightBrace => "}",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::ColonColon => "::",
            Self::Colon => ":",
            Self::Semicolon => ";",
            Self::Comma => ",",
            Self::Dot => ".",
            _ => return None,
        })
    }

    /// Human-readable name for debugging.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ident => "identifier",
            Self::Number => "number",
            Self::HexNumber => "hex number",
            Self::MalformedNumber => "malformed number",
            Self::String => "string",
            Self::LongString => "long string",
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::LineComment => "line comment",
            Self::BlockComment => "block comment",
            Self::Shebang => "shebang",
            Self::InvalidByte => "invalid byte",
            Self::UnterminatedString => "unterminated string",
            Self::UnterminatedLongString => "unterminated long string",
            Self::UnterminatedBlockComment => "unterminated block comment",
            Self::InvalidLongBracket => "invalid long bracket",
            Self::Eof => "end of file",
            _ => match self.lexeme() {
                Some(text) => text,
                None => "?",
            },
        }
    }

    /// Whitespace, newlines, comments and shebang lines.
    #[inline]
    pub const fn is_trivia(self) -> bool {
        matches!(self as u8, 112..=127) || matches!(self, Self::UnterminatedBlockComment)
    }

    /// Tags in the error range. The cooker reports a diagnostic for each.
    #[inline]
    pub const fn is_error(self) -> bool {
        matches!(self as u8, 240..=254)
    }
}
