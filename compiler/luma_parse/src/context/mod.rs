//! Parse context flags for context-sensitive checks.
//!
//! Lua's grammar is context free, but a few rules depend on where a
//! construct appears: `break` needs an enclosing loop and `...` needs an
//! enclosing vararg function. The parser carries those facts as flags and
//! swaps them when entering a loop body or a function body.

/// Context flags for parsing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseContext(u8);

impl ParseContext {
    /// No special context.
    pub const NONE: Self = Self(0);

    /// Inside a loop body. Makes `break` valid.
    pub const IN_LOOP: Self = Self(1 << 0);

    /// Inside a function whose parameter list ends with `...`, or the main
    /// chunk. Makes `...` valid as an expression.
    pub const IN_VARARG_FUNCTION: Self = Self(1 << 1);

    /// Context of the main chunk.
    pub const CHUNK: Self = Self::IN_VARARG_FUNCTION;

    #[inline]
    pub const fn has(self, flag: Self) -> bool {
        (self.0 & flag.0) != 0
    }

    #[inline]
    #[must_use]
    pub const fn with(self, flag: Self) -> Self {
        Self(self.0 | flag.0)
    }

    #[inline]
    pub const fn in_loop(self) -> bool {
        self.has(Self::IN_LOOP)
    }

    #[inline]
    pub const fn in_vararg_function(self) -> bool {
        self.has(Self::IN_VARARG_FUNCTION)
    }

    /// Context of a function body. Loops do not reach into nested functions.
    #[inline]
    #[must_use]
    pub const fn function_body(is_vararg: bool) -> Self {
        if is_vararg {
            Self::IN_VARARG_FUNCTION
        } else {
            Self::NONE
        }
    }
}
