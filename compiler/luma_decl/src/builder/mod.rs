//! Builds the declaration of a parsed file.
//!
//! Only the top-level statements of the chunk are visited. Function bodies
//! and nested blocks declare nothing at module level.

use std::convert::Infallible;
use std::sync::Arc;

use luma_ir::{CancellationToken, Cancelled, GreenElement, GreenNode, SourceKind, SyntaxKind};
use luma_parse::{SyntaxTree, TreeId};
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::declaration::{DeclarationKind, ModuleDeclaration, RootDeclaration, SyntaxReference};

type CacheKey = (TreeId, Box<str>, bool);

/// Memoizing declaration builder.
///
/// Building is deterministic, so a result is cached per tree identity, root
/// name and submission flag and handed out again as the same `Arc`.
#[derive(Debug, Default)]
pub struct DeclarationBuilder {
    cache: Mutex<FxHashMap<CacheKey, Arc<RootDeclaration>>>,
}

impl DeclarationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declaration of `tree`, named by the dotted `root_name`.
    pub fn build_for_tree(
        &self,
        tree: &SyntaxTree,
        root_name: &str,
        is_submission: bool,
    ) -> Arc<RootDeclaration> {
        match self.build(tree, root_name, is_submission, || Ok::<_, Infallible>(())) {
            Ok(root) => root,
            Err(never) => match never {},
        }
    }

    /// [`build_for_tree`](Self::build_for_tree) that stops with
    /// [`Cancelled`] once `cancellation` fires. Nothing is cached then.
    pub fn build_for_tree_with_cancellation(
        &self,
        tree: &SyntaxTree,
        root_name: &str,
        is_submission: bool,
        cancellation: &CancellationToken,
    ) -> Result<Arc<RootDeclaration>, Cancelled> {
        self.build(tree, root_name, is_submission, || cancellation.check())
    }

    /// Drop every cached declaration of `tree`.
    pub fn forget(&self, tree: TreeId) {
        self.cache.lock().retain(|(id, _, _), _| *id != tree);
    }

    /// Number of cached declarations.
    pub fn cached(&self) -> usize {
        self.cache.lock().len()
    }

    fn build<E>(
        &self,
        tree: &SyntaxTree,
        root_name: &str,
        is_submission: bool,
        check: impl FnMut() -> Result<(), E>,
    ) -> Result<Arc<RootDeclaration>, E> {
        let key: CacheKey = (tree.id(), root_name.into(), is_submission);
        if let Some(root) = self.cache.lock().get(&key) {
            trace!(tree = %tree.id(), root_name, "declaration cache hit");
            return Ok(Arc::clone(root));
        }

        // Built outside the lock; a racing build of the same key produces an
        // equal value and the first insert wins.
        let root = Arc::new(build_root(tree, root_name, is_submission, check)?);
        debug!(tree = %tree.id(), root_name, "declaration built");
        let mut cache = self.cache.lock();
        Ok(Arc::clone(cache.entry(key).or_insert(root)))
    }
}

fn build_root<E>(
    tree: &SyntaxTree,
    root_name: &str,
    is_submission: bool,
    check: impl FnMut() -> Result<(), E>,
) -> Result<RootDeclaration, E> {
    let kind = if is_submission {
        DeclarationKind::Submission
    } else if tree.options().kind == SourceKind::Script {
        DeclarationKind::Script
    } else {
        DeclarationKind::Module
    };

    let mut segments: Vec<&str> = root_name.split('.').collect();
    let name = segments.pop().unwrap_or_default();

    let module = ModuleDeclaration {
        name: name.into(),
        kind,
        syntax: SyntaxReference {
            tree: tree.id(),
            span: tree.root().full_span(),
        },
        member_names: member_names(tree.green(), check)?,
        diagnostics: Arc::clone(tree.diagnostics()),
    };
    Ok(RootDeclaration::new(&segments, module))
}

/// Global names assigned by the top-level statements of `chunk`.
///
/// A name counts unless a top-level `local` declared it earlier in the file;
/// `function t.f()` and `t.f = ...` count as `t`. `check` runs before each
/// statement.
fn member_names<E>(
    chunk: &GreenNode,
    mut check: impl FnMut() -> Result<(), E>,
) -> Result<Box<[Box<str>]>, E> {
    let mut locals: FxHashSet<&str> = FxHashSet::default();
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut names = Vec::new();

    for statement in chunk.children().iter().filter_map(GreenElement::as_node) {
        check()?;
        match statement.kind() {
            SyntaxKind::LocalDeclarationStatement => {
                let name_list = child_node(statement, SyntaxKind::NameList);
                let names = name_list
                    .into_iter()
                    .flat_map(|list| child_nodes(list, SyntaxKind::LocalName));
                for local in names {
                    if let Some(name) = identifier(local) {
                        locals.insert(name);
                    }
                }
            }
            SyntaxKind::LocalFunctionStatement => {
                if let Some(name) = identifier(statement) {
                    locals.insert(name);
                }
            }
            SyntaxKind::FunctionDeclarationStatement => {
                let name = child_node(statement, SyntaxKind::FunctionName).and_then(identifier);
                if let Some(name) = name.filter(|name| !locals.contains(name)) {
                    if seen.insert(name) {
                        names.push(name);
                    }
                }
            }
            SyntaxKind::AssignmentStatement => {
                let targets = child_node(statement, SyntaxKind::ExpressionList);
                for target in targets.into_iter().flat_map(|list| list.children()) {
                    let Some(name) = target.as_node().and_then(|t| base_name(t)) else {
                        continue;
                    };
                    if !locals.contains(name) && seen.insert(name) {
                        names.push(name);
                    }
                }
            }
            _ => {}
        }
    }
    Ok(names.into_iter().map(Box::from).collect())
}

fn child_node(node: &GreenNode, kind: SyntaxKind) -> Option<&GreenNode> {
    child_nodes(node, kind).next()
}

fn child_nodes(node: &GreenNode, kind: SyntaxKind) -> impl Iterator<Item = &GreenNode> {
    node.children()
        .iter()
        .filter_map(GreenElement::as_node)
        .filter(move |n| n.kind() == kind)
        .map(|n| &**n)
}

/// Text of the first present identifier token directly under `node`.
fn identifier(node: &GreenNode) -> Option<&str> {
    node.children()
        .iter()
        .filter_map(GreenElement::as_token)
        .find(|t| t.kind() == SyntaxKind::IdentifierToken && !t.is_missing())
        .map(|t| t.text())
}

/// The global a target expression assigns into: `x` for `x`, `x.y`,
/// `x[k]`, and nothing for anything rooted elsewhere.
fn base_name(target: &GreenNode) -> Option<&str> {
    let mut node = target;
    loop {
        match node.kind() {
            SyntaxKind::NameExpression => return identifier(node),
            SyntaxKind::MemberAccessExpression | SyntaxKind::IndexExpression => {
                node = node.children().first()?.as_node()?;
            }
            _ => return None,
        }
    }
}
