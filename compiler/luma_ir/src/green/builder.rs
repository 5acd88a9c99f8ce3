//! Bottom-up construction of green nodes.

use std::sync::Arc;

use super::{GreenElement, GreenNode, GreenToken};
use crate::SyntaxKind;

/// Position in the builder's child list, used to wrap already-built children
/// in a node decided on later (binary expressions, call suffixes).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Checkpoint(usize);

/// Event-style builder: `start_node`, push tokens and nodes, `finish_node`.
#[derive(Debug, Default)]
pub struct GreenNodeBuilder {
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<GreenElement>,
}

impl GreenNodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.parents.push((kind, self.children.len()));
    }

    pub fn token(&mut self, token: Arc<GreenToken>) {
        self.children.push(GreenElement::Token(token));
    }

    /// Push an already built subtree.
    pub fn node(&mut self, node: Arc<GreenNode>) {
        self.children.push(GreenElement::Node(node));
    }

    pub fn finish_node(&mut self) {
        debug_assert!(!self.parents.is_empty(), "finish_node without start_node");
        let Some((kind, first_child)) = self.parents.pop() else {
            return;
        };
        let children = self.children.split_off(first_child);
        self.children
            .push(GreenElement::Node(Arc::new(GreenNode::new(kind, children))));
    }

    #[inline]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.children.len())
    }

    /// Start a node whose first child is the element at `checkpoint`.
    pub fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        let Checkpoint(at) = checkpoint;
        debug_assert!(at <= self.children.len(), "checkpoint past the end");
        debug_assert!(
            self.parents.last().map_or(true, |&(_, first)| first <= at),
            "checkpoint belongs to a finished node"
        );
        self.parents.push((kind, at));
    }

    /// Number of open nodes.
    #[inline]
    pub fn depth(&self) -> usize {
        self.parents.len()
    }

    /// Finish building. Expects every started node to be finished and
    /// exactly one root; anything else is wrapped in a `CompilationUnit`.
    pub fn finish(mut self) -> Arc<GreenNode> {
        debug_assert!(self.parents.is_empty(), "unfinished nodes");
        while !self.parents.is_empty() {
            self.finish_node();
        }
        if let [GreenElement::Node(root)] = self.children.as_slice() {
            return Arc::clone(root);
        }
        Arc::new(GreenNode::new(SyntaxKind::CompilationUnit, self.children))
    }
}
