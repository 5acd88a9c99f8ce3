//! The result of a parse.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use luma_diagnostic::Diagnostic;
use luma_ir::{GreenNode, LineIndex, ParseOptions, SyntaxNode, TextChange};

/// Process-unique identity of a [`SyntaxTree`].
///
/// Two trees parsed from the same text still get different ids, so caches
/// keyed by `TreeId` never confuse an old tree with a reparsed one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TreeId(u64);

impl TreeId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        TreeId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TreeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tree#{}", self.0)
    }
}

/// An immutable parsed source: text, green root, options and diagnostics.
///
/// Cloning is cheap; clones share the text, the tree and the diagnostics
/// and keep the same [`TreeId`].
#[derive(Clone)]
pub struct SyntaxTree {
    id: TreeId,
    text: Arc<str>,
    green: Arc<GreenNode>,
    options: ParseOptions,
    diagnostics: Arc<[Diagnostic]>,
}

impl SyntaxTree {
    pub(crate) fn new(
        text: Arc<str>,
        green: Arc<GreenNode>,
        options: ParseOptions,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        debug_assert_eq!(
            green.full_width() as usize,
            text.len(),
            "tree does not cover its text"
        );
        SyntaxTree {
            id: TreeId::fresh(),
            text,
            green,
            options,
            diagnostics: diagnostics.into(),
        }
    }

    #[inline]
    pub fn id(&self) -> TreeId {
        self.id
    }

    #[inline]
    pub fn text(&self) -> &Arc<str> {
        &self.text
    }

    #[inline]
    pub fn green(&self) -> &Arc<GreenNode> {
        &self.green
    }

    /// Positioned root node.
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(Arc::clone(&self.green))
    }

    #[inline]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Lexical and syntax diagnostics, ordered by position.
    #[inline]
    pub fn diagnostics(&self) -> &Arc<[Diagnostic]> {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(&self.text)
    }

    /// Parse the text with `change` applied, under the same options.
    ///
    /// Green subtrees are not reused; the new tree gets a new id.
    pub fn with_changed_text(&self, change: &TextChange) -> SyntaxTree {
        let text = change.apply(&self.text);
        crate::parse(&text, &self.options)
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("id", &self.id)
            .field("len", &self.text.len())
            .field("diagnostics", &self.diagnostics.len())
            .finish_non_exhaustive()
    }
}
