//! Green tree: immutable, position-free syntax nodes.
//!
//! Green elements know their kind, their text and their width, nothing
//! else. They are shared through `Arc` and never mutated after
//! construction, so the same token or subtree can appear in many trees.
//! Absolute positions and parent links live in the red layer
//! ([`crate::red`]).

mod builder;

use std::fmt;
use std::sync::Arc;

use crate::{ContextualKind, SyntaxKind, TokenValue};

pub use builder::{Checkpoint, GreenNodeBuilder};

bitflags::bitflags! {
    /// Per-token state bits.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct TokenFlags: u8 {
        /// Zero-width placeholder synthesized by the parser.
        const MISSING = 1 << 0;
        /// The lexer reported at least one diagnostic for this token.
        const HAS_DIAGNOSTICS = 1 << 1;
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "sources are limited to u32 offsets"
)]
#[inline]
fn width_of(text: &str) -> u32 {
    text.len() as u32
}

/// A piece of trivia.
///
/// Structured trivia (skipped tokens, a shebang directive) also keep the
/// node they were built from; their text is that node's full text.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct GreenTrivia {
    kind: SyntaxKind,
    text: Box<str>,
    structure: Option<Arc<GreenNode>>,
}

impl GreenTrivia {
    pub fn new(kind: SyntaxKind, text: impl Into<Box<str>>) -> Self {
        debug_assert!(kind.is_trivia(), "{kind:?} is not a trivia kind");
        GreenTrivia {
            kind,
            text: text.into(),
            structure: None,
        }
    }

    pub fn structured(kind: SyntaxKind, node: Arc<GreenNode>) -> Self {
        debug_assert!(kind.is_trivia(), "{kind:?} is not a trivia kind");
        GreenTrivia {
            kind,
            text: node.full_text().into_boxed_str(),
            structure: Some(node),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn width(&self) -> u32 {
        width_of(&self.text)
    }

    pub fn structure(&self) -> Option<&Arc<GreenNode>> {
        self.structure.as_ref()
    }
}

impl fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind, self.text)
    }
}

/// A token with its trivia.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct GreenToken {
    kind: SyntaxKind,
    text: Box<str>,
    value: TokenValue,
    contextual: ContextualKind,
    flags: TokenFlags,
    leading: Box<[GreenTrivia]>,
    trailing: Box<[GreenTrivia]>,
    full_width: u32,
}

impl GreenToken {
    pub fn new(kind: SyntaxKind, text: impl Into<Box<str>>) -> Self {
        debug_assert!(kind.is_token(), "{kind:?} is not a token kind");
        let text = text.into();
        let full_width = width_of(&text);
        GreenToken {
            kind,
            text,
            value: TokenValue::None,
            contextual: ContextualKind::None,
            flags: TokenFlags::empty(),
            leading: Box::new([]),
            trailing: Box::new([]),
            full_width,
        }
    }

    /// Zero-width token standing in for one the parser expected.
    pub fn missing(kind: SyntaxKind) -> Self {
        let mut token = Self::new(kind, "");
        token.flags = TokenFlags::MISSING;
        token
    }

    #[must_use]
    pub fn with_value(mut self, value: TokenValue) -> Self {
        self.value = value;
        self
    }

    #[must_use]
    pub fn with_contextual_kind(mut self, contextual: ContextualKind) -> Self {
        self.contextual = contextual;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: TokenFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_leading(mut self, leading: Vec<GreenTrivia>) -> Self {
        self.leading = leading.into_boxed_slice();
        self.recompute_width();
        self
    }

    #[must_use]
    pub fn with_trailing(mut self, trailing: Vec<GreenTrivia>) -> Self {
        self.trailing = trailing.into_boxed_slice();
        self.recompute_width();
        self
    }

    /// Insert trivia in front of the existing leading trivia.
    #[must_use]
    pub fn prepend_leading(mut self, trivia: impl IntoIterator<Item = GreenTrivia>) -> Self {
        let mut leading: Vec<GreenTrivia> = trivia.into_iter().collect();
        if leading.is_empty() {
            return self;
        }
        leading.extend(self.leading.iter().cloned());
        self.leading = leading.into_boxed_slice();
        self.recompute_width();
        self
    }

    fn recompute_width(&mut self) {
        self.full_width = self.leading_width() + width_of(&self.text) + self.trailing_width();
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    #[inline]
    pub fn contextual_kind(&self) -> ContextualKind {
        self.contextual
    }

    #[inline]
    pub fn flags(&self) -> TokenFlags {
        self.flags
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.flags.contains(TokenFlags::MISSING)
    }

    #[inline]
    pub fn leading(&self) -> &[GreenTrivia] {
        &self.leading
    }

    #[inline]
    pub fn trailing(&self) -> &[GreenTrivia] {
        &self.trailing
    }

    /// Width of the token text alone.
    #[inline]
    pub fn width(&self) -> u32 {
        width_of(&self.text)
    }

    pub fn leading_width(&self) -> u32 {
        self.leading.iter().map(GreenTrivia::width).sum()
    }

    pub fn trailing_width(&self) -> u32 {
        self.trailing.iter().map(GreenTrivia::width).sum()
    }

    #[inline]
    pub fn full_width(&self) -> u32 {
        self.full_width
    }

    pub fn write_full_text(&self, out: &mut String) {
        for trivia in &*self.leading {
            out.push_str(trivia.text());
        }
        out.push_str(&self.text);
        for trivia in &*self.trailing {
            out.push_str(trivia.text());
        }
    }

    pub fn full_text(&self) -> String {
        let mut out = String::with_capacity(self.full_width as usize);
        self.write_full_text(&mut out);
        out
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind, self.text)?;
        if !self.value.is_none() {
            write!(f, " = {:?}", self.value)?;
        }
        if self.is_missing() {
            f.write_str(" (missing)")?;
        }
        Ok(())
    }
}

/// Child of a green node.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum GreenElement {
    Node(Arc<GreenNode>),
    Token(Arc<GreenToken>),
}

impl GreenElement {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            GreenElement::Node(node) => node.kind(),
            GreenElement::Token(token) => token.kind(),
        }
    }

    #[inline]
    pub fn full_width(&self) -> u32 {
        match self {
            GreenElement::Node(node) => node.full_width(),
            GreenElement::Token(token) => token.full_width(),
        }
    }

    pub fn as_node(&self) -> Option<&Arc<GreenNode>> {
        match self {
            GreenElement::Node(node) => Some(node),
            GreenElement::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Arc<GreenToken>> {
        match self {
            GreenElement::Token(token) => Some(token),
            GreenElement::Node(_) => None,
        }
    }
}

impl From<Arc<GreenNode>> for GreenElement {
    fn from(node: Arc<GreenNode>) -> Self {
        GreenElement::Node(node)
    }
}

impl From<Arc<GreenToken>> for GreenElement {
    fn from(token: Arc<GreenToken>) -> Self {
        GreenElement::Token(token)
    }
}

/// An interior node. Full width is computed once at construction.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct GreenNode {
    kind: SyntaxKind,
    full_width: u32,
    children: Box<[GreenElement]>,
}

impl GreenNode {
    pub fn new(kind: SyntaxKind, children: Vec<GreenElement>) -> Self {
        debug_assert!(kind.is_node(), "{kind:?} is not a node kind");
        let full_width = children.iter().map(GreenElement::full_width).sum();
        GreenNode {
            kind,
            full_width,
            children: children.into_boxed_slice(),
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    #[inline]
    pub fn full_width(&self) -> u32 {
        self.full_width
    }

    #[inline]
    pub fn children(&self) -> &[GreenElement] {
        &self.children
    }

    /// Leftmost token, missing tokens included.
    pub fn first_token(&self) -> Option<&Arc<GreenToken>> {
        let mut stack: Vec<&GreenElement> = self.children.iter().rev().collect();
        while let Some(element) = stack.pop() {
            match element {
                GreenElement::Token(token) => return Some(token),
                GreenElement::Node(node) => stack.extend(node.children.iter().rev()),
            }
        }
        None
    }

    /// Rightmost token, missing tokens included.
    pub fn last_token(&self) -> Option<&Arc<GreenToken>> {
        let mut stack: Vec<&GreenElement> = self.children.iter().collect();
        while let Some(element) = stack.pop() {
            match element {
                GreenElement::Token(token) => return Some(token),
                GreenElement::Node(node) => stack.extend(node.children.iter()),
            }
        }
        None
    }

    pub fn write_full_text(&self, out: &mut String) {
        // Explicit stack: deeply nested expressions would overflow recursion.
        let mut stack: Vec<&GreenElement> = self.children.iter().rev().collect();
        while let Some(element) = stack.pop() {
            match element {
                GreenElement::Token(token) => token.write_full_text(out),
                GreenElement::Node(node) => stack.extend(node.children.iter().rev()),
            }
        }
    }

    pub fn full_text(&self) -> String {
        let mut out = String::with_capacity(self.full_width as usize);
        self.write_full_text(&mut out);
        out
    }
}

impl Drop for GreenNode {
    /// Unlinks uniquely owned descendants one at a time, so dropping a
    /// deeply nested tree does not recurse once per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children).into_vec();
        while let Some(element) = pending.pop() {
            if let GreenElement::Node(node) = element {
                if let Some(mut node) = Arc::into_inner(node) {
                    pending.extend(std::mem::take(&mut node.children).into_vec());
                }
            }
        }
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind)
            .field("full_width", &self.full_width)
            .field("children", &self.children.len())
            .finish()
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_text())
    }
}
