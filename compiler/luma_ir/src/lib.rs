//! Shared vocabulary of the Luma front-end.
//!
//! - [`Span`] and [`LineIndex`] for source positions.
//! - [`ParseOptions`], [`LanguageVersion`], [`SourceKind`] for configuration.
//! - [`SyntaxKind`], [`ContextualKind`] and [`TokenValue`] for tokens.
//! - The immutable green tree ([`GreenNode`], [`GreenToken`], [`GreenTrivia`])
//!   and its positioned red facade ([`SyntaxNode`], [`SyntaxToken`]).
//! - [`CancellationToken`] for cooperative cancellation.

mod cancel;
pub mod green;
pub mod incremental;
mod kind;
mod options;
pub mod red;
mod span;
mod value;

pub use cancel::{CancellationToken, Cancelled};
pub use green::{GreenElement, GreenNode, GreenNodeBuilder, GreenToken, GreenTrivia, TokenFlags};
pub use incremental::TextChange;
pub use kind::{ContextualKind, SyntaxKind};
pub use options::{Feature, LanguageVersion, ParseOptions, SourceKind, UnknownLanguageVersion};
pub use red::{SyntaxElement, SyntaxNode, SyntaxToken};
pub use span::{LineCol, LineIndex, Span};
pub use value::TokenValue;

/// Compile-time size assertion.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}
