//! Red tree: positioned, parent-aware views over the green tree.
//!
//! A red node is created on demand while navigating and records its
//! absolute offset, its index in the parent and the parent itself. Two red
//! nodes are equal when they wrap the same green node at the same offset,
//! so a red node identifies exactly one position in one tree.

use std::fmt;
use std::sync::Arc;

use crate::green::{GreenElement, GreenNode, GreenToken, GreenTrivia};
use crate::{ContextualKind, Span, SyntaxKind, TokenValue};

struct NodeData {
    green: Arc<GreenNode>,
    parent: Option<SyntaxNode>,
    index: u32,
    offset: u32,
}

impl Drop for NodeData {
    /// Releases the parent chain iteratively; a node held alone at the
    /// bottom of a deep tree would otherwise free one level per frame.
    fn drop(&mut self) {
        let mut parent = self.parent.take();
        while let Some(SyntaxNode(data)) = parent {
            parent = Arc::into_inner(data).and_then(|mut data| data.parent.take());
        }
    }
}

#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

#[derive(Clone)]
pub struct SyntaxToken {
    green: Arc<GreenToken>,
    parent: SyntaxNode,
    index: u32,
    offset: u32,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(SyntaxToken),
}

impl SyntaxNode {
    pub fn new_root(green: Arc<GreenNode>) -> Self {
        SyntaxNode(Arc::new(NodeData {
            green,
            parent: None,
            index: 0,
            offset: 0,
        }))
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    #[inline]
    pub fn green(&self) -> &Arc<GreenNode> {
        &self.0.green
    }

    #[inline]
    pub fn parent(&self) -> Option<&SyntaxNode> {
        self.0.parent.as_ref()
    }

    /// Index among the parent's children (nodes and tokens).
    #[inline]
    pub fn index(&self) -> u32 {
        self.0.index
    }

    /// Span including leading and trailing trivia.
    pub fn full_span(&self) -> Span {
        Span::at(self.0.offset, self.0.green.full_width())
    }

    /// Span from the first token's text to the last token's text.
    pub fn span(&self) -> Span {
        let full = self.full_span();
        let leading = self.0.green.first_token().map_or(0, |t| t.leading_width());
        let trailing = self.0.green.last_token().map_or(0, |t| t.trailing_width());
        if leading + trailing >= full.len() {
            return Span::point(full.start + leading.min(full.len()));
        }
        Span::new(full.start + leading, full.end - trailing)
    }

    pub fn children_with_tokens(&self) -> impl Iterator<Item = SyntaxElement> + '_ {
        let mut offset = self.0.offset;
        self.0
            .green
            .children()
            .iter()
            .zip(0u32..)
            .map(move |(child, index)| {
                let element = self.element_at(child, index, offset);
                offset += child.full_width();
                element
            })
    }

    pub fn children(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.children_with_tokens().filter_map(SyntaxElement::into_node)
    }

    /// Direct token children.
    pub fn child_tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.children_with_tokens().filter_map(SyntaxElement::into_token)
    }

    fn element_at(&self, child: &GreenElement, index: u32, offset: u32) -> SyntaxElement {
        match child {
            GreenElement::Node(green) => SyntaxElement::Node(SyntaxNode(Arc::new(NodeData {
                green: Arc::clone(green),
                parent: Some(self.clone()),
                index,
                offset,
            }))),
            GreenElement::Token(green) => SyntaxElement::Token(SyntaxToken {
                green: Arc::clone(green),
                parent: self.clone(),
                index,
                offset,
            }),
        }
    }

    /// All nodes below and including `self`, in preorder.
    pub fn descendants(&self) -> Vec<SyntaxNode> {
        let mut out = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            let mark = stack.len();
            stack.extend(node.children());
            stack[mark..].reverse();
            out.push(node);
        }
        out
    }

    /// All tokens below `self`, in source order. Missing tokens included.
    pub fn descendant_tokens(&self) -> Vec<SyntaxToken> {
        let mut out = Vec::new();
        let mut stack = vec![SyntaxElement::Node(self.clone())];
        while let Some(element) = stack.pop() {
            match element {
                SyntaxElement::Token(token) => out.push(token),
                SyntaxElement::Node(node) => {
                    let mark = stack.len();
                    stack.extend(node.children_with_tokens());
                    stack[mark..].reverse();
                }
            }
        }
        out
    }

    /// `self`, its parent, and so on up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = SyntaxNode> {
        std::iter::successors(Some(self.clone()), |node| node.parent().cloned())
    }

    /// Leftmost token, skipping empty child nodes.
    pub fn first_token(&self) -> Option<SyntaxToken> {
        let mut stack = vec![SyntaxElement::Node(self.clone())];
        while let Some(element) = stack.pop() {
            match element {
                SyntaxElement::Token(token) => return Some(token),
                SyntaxElement::Node(node) => {
                    let mark = stack.len();
                    stack.extend(node.children_with_tokens());
                    stack[mark..].reverse();
                }
            }
        }
        None
    }

    /// Rightmost token, skipping empty child nodes.
    pub fn last_token(&self) -> Option<SyntaxToken> {
        let mut stack = vec![SyntaxElement::Node(self.clone())];
        while let Some(element) = stack.pop() {
            match element {
                SyntaxElement::Token(token) => return Some(token),
                SyntaxElement::Node(node) => stack.extend(node.children_with_tokens()),
            }
        }
        None
    }

    /// Text including all trivia.
    pub fn full_text(&self) -> String {
        self.0.green.full_text()
    }

    /// Text without the outer leading and trailing trivia.
    pub fn text(&self) -> String {
        let full = self.full_text();
        let base = self.0.offset;
        let span = self.span();
        full[(span.start - base) as usize..(span.end - base) as usize].to_owned()
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0.green, &other.0.green) && self.0.offset == other.0.offset
    }
}

impl Eq for SyntaxNode {}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.full_span())
    }
}

impl SyntaxToken {
    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    #[inline]
    pub fn green(&self) -> &Arc<GreenToken> {
        &self.green
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.green.text()
    }

    #[inline]
    pub fn value(&self) -> &TokenValue {
        self.green.value()
    }

    #[inline]
    pub fn contextual_kind(&self) -> ContextualKind {
        self.green.contextual_kind()
    }

    #[inline]
    pub fn is_missing(&self) -> bool {
        self.green.is_missing()
    }

    pub fn leading_trivia(&self) -> &[GreenTrivia] {
        self.green.leading()
    }

    pub fn trailing_trivia(&self) -> &[GreenTrivia] {
        self.green.trailing()
    }

    #[inline]
    pub fn parent(&self) -> &SyntaxNode {
        &self.parent
    }

    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Span of the token text.
    pub fn span(&self) -> Span {
        Span::at(self.offset + self.green.leading_width(), self.green.width())
    }

    pub fn full_span(&self) -> Span {
        Span::at(self.offset, self.green.full_width())
    }

    pub fn full_text(&self) -> String {
        self.green.full_text()
    }
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.green, &other.green) && self.offset == other.offset
    }
}

impl Eq for SyntaxToken {}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?} {:?}", self.kind(), self.span(), self.text())
    }
}

impl SyntaxElement {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            SyntaxElement::Node(node) => node.kind(),
            SyntaxElement::Token(token) => token.kind(),
        }
    }

    pub fn full_span(&self) -> Span {
        match self {
            SyntaxElement::Node(node) => node.full_span(),
            SyntaxElement::Token(token) => token.full_span(),
        }
    }

    pub fn into_node(self) -> Option<SyntaxNode> {
        match self {
            SyntaxElement::Node(node) => Some(node),
            SyntaxElement::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<SyntaxToken> {
        match self {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(_) => None,
        }
    }
}
