//! Stack growth for recursive descent over deeply nested source.
//!
//! Lua chunks are allowed to nest expressions, tables and blocks arbitrarily
//! (`((((x))))`, `{{{{}}}}`, `do do do end end end`). The parser and the
//! declaration builder recurse once per nesting level, so every recursive
//! production runs under [`ensure_sufficient_stack`], which grows the stack on
//! the heap once less than [`RED_ZONE`] bytes remain.
//!
//! On `wasm32` the call is a plain passthrough.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
pub const STACK_SEGMENT: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

/// Passthrough on targets that manage their own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
