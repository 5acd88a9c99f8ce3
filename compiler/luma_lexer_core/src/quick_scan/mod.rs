//! Quick-scan automaton for simple tokens.
//!
//! Most tokens in real code are a plain identifier, decimal integer or single
//! punctuator, surrounded by spaces and ended by a newline. The automaton
//! recognises exactly that shape in one pass over the bytes, driven by a
//! per-byte [`CharFlag`] table and a `state × flag` transition table. The
//! lexer uses a `Done` result as a cache key for an already-cooked token;
//! anything else goes through the full scanner.
//!
//! # Subset contract
//!
//! Every input that reaches [`QuickScan::Done`] is scanned by the full lexer
//! into the same token with the same leading and trailing trivia. The
//! automaton is deliberately conservative:
//!
//! - Leading trivia may only contain spaces, tabs and `\n`.
//! - Trailing trivia may only contain spaces and tabs, then at most one `\n`.
//! - `-` anywhere after the token rejects (it may open a comment).
//! - `\r` anywhere rejects (CRLF pairing is left to the full scanner).
//! - A number followed by a letter or `.` rejects (hex, exponent, fraction,
//!   concatenation or malformed numeral).
//! - Bytes that may start a multi-byte token (`< > = ~ / : [ .`) reject.
//! - EOF before any token rejects (the end-of-file token is never cached).

/// Longest input the automaton will look at.
pub const MAX_QUICK_LEN: usize = 42;

/// Byte classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum CharFlag {
    /// Space, tab, vertical tab, form feed.
    White,
    Cr,
    Lf,
    /// `A-Z a-z _`.
    Letter,
    Digit,
    /// Single-byte tokens that never extend: `( ) { } ] , ; + * % ^ # & |`.
    Punct,
    Dot,
    Minus,
    /// May start a multi-byte token: `< > = ~ / : [`.
    Compound,
    /// Quotes, control bytes, anything non-ASCII.
    Complex,
    Eof,
}

const FLAG_COUNT: usize = CharFlag::Eof as usize + 1;

/// Automaton states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum QuickScanState {
    Initial,
    LeadingWhite,
    Ident,
    Number,
    Punctuation,
    TrailingWhite,
    AfterNewline,
    /// Accept. The byte that caused this transition is not consumed.
    Done,
    /// Reject. Use the full scanner.
    Bad,
}

const STATE_COUNT: usize = QuickScanState::Bad as usize + 1;

/// Result of a quick scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuickScan {
    /// A simple token was recognised.
    Done {
        /// Width including leading and trailing trivia.
        full_len: u32,
        /// Offset of the token text from the start of the input.
        token_start: u32,
        /// Width of the token text.
        token_len: u32,
    },
    Bad,
}

/// Per-byte classification for the Latin-1 range.
pub static CHAR_FLAGS: [CharFlag; 256] = {
    let mut table = [CharFlag::Complex; 256];
    let mut i = 0usize;
    while i < 256 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "loop counter i is 0..=255, always fits in u8"
        )]
        let b = i as u8;
        table[i] = match b {
            b' ' | b'\t' | 0x0B | 0x0C => CharFlag::White,
            b'\r' => CharFlag::Cr,
            b'\n' => CharFlag::Lf,
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => CharFlag::Letter,
            b'0'..=b'9' => CharFlag::Digit,
            b'(' | b')' | b'{' | b'}' | b']' | b',' | b';' | b'+' | b'*' | b'%' | b'^'
            | b'#' | b'&' | b'|' => CharFlag::Punct,
            b'.' => CharFlag::Dot,
            b'-' => CharFlag::Minus,
            b'<' | b'>' | b'=' | b'~' | b'/' | b':' | b'[' => CharFlag::Compound,
            _ => CharFlag::Complex,
        };
        i += 1;
    }
    table
};

use QuickScanState::{
    AfterNewline as Nl, Bad, Done, Ident, Initial, LeadingWhite as Lw, Number as Num,
    Punctuation as Pun, TrailingWhite as Tw,
};

/// `TRANSITIONS[state][flag]`.
///
/// Columns: White, Cr, Lf, Letter, Digit, Punct, Dot, Minus, Compound, Complex, Eof.
#[rustfmt::skip]
static TRANSITIONS: [[QuickScanState; FLAG_COUNT]; STATE_COUNT] = [
    // Initial
    [Lw,   Bad, Lw,  Ident, Num,  Pun,  Bad,  Bad, Bad,  Bad, Bad ],
    // LeadingWhite
    [Lw,   Bad, Lw,  Ident, Num,  Pun,  Bad,  Bad, Bad,  Bad, Bad ],
    // Ident
    [Tw,   Bad, Nl,  Ident, Ident, Done, Done, Bad, Done, Bad, Done],
    // Number
    [Tw,   Bad, Nl,  Bad,   Num,  Done, Bad,  Bad, Done, Bad, Done],
    // Punctuation
    [Tw,   Bad, Nl,  Done,  Done, Done, Done, Bad, Done, Bad, Done],
    // TrailingWhite
    [Tw,   Bad, Nl,  Done,  Done, Done, Done, Bad, Done, Bad, Done],
    // AfterNewline
    [Done, Done, Done, Done, Done, Done, Done, Done, Done, Done, Done],
    // Done
    [Done, Done, Done, Done, Done, Done, Done, Done, Done, Done, Done],
    // Bad
    [Bad,  Bad, Bad, Bad,   Bad,  Bad,  Bad,  Bad, Bad,  Bad, Bad ],
];

#[inline]
pub fn char_flag(b: u8) -> CharFlag {
    CHAR_FLAGS[b as usize]
}

#[inline]
fn is_token_state(state: QuickScanState) -> bool {
    matches!(state, Ident | Num | Pun)
}

/// Run the automaton over `bytes`, starting at a token boundary.
///
/// Only the first [`MAX_QUICK_LEN`] bytes are examined; a longer token or
/// trivia run returns [`QuickScan::Bad`].
#[allow(
    clippy::cast_possible_truncation,
    reason = "offsets are bounded by MAX_QUICK_LEN"
)]
pub fn quick_scan(bytes: &[u8]) -> QuickScan {
    let mut state = Initial;
    let mut token_start = 0usize;
    let mut token_end = 0usize;

    for i in 0..=bytes.len().min(MAX_QUICK_LEN) {
        let flag = bytes.get(i).map_or(CharFlag::Eof, |&b| char_flag(b));
        let next = TRANSITIONS[state as usize][flag as usize];

        if !is_token_state(state) && is_token_state(next) {
            token_start = i;
        }
        if is_token_state(state) && !is_token_state(next) {
            token_end = i;
        }
        match next {
            Done => {
                return QuickScan::Done {
                    full_len: i as u32,
                    token_start: token_start as u32,
                    token_len: (token_end - token_start) as u32,
                };
            }
            Bad => return QuickScan::Bad,
            _ => state = next,
        }
    }
    QuickScan::Bad
}

#[cfg(test)]
mod tests;
