//! Persistent declaration table.
//!
//! The table keeps the root declarations of every file in a compilation in
//! two parts: an insertion-ordered *older* set and a single *latest* slot for
//! the file being edited. Editing the same file again replaces the latest
//! slot and shares everything else with the previous table, including the
//! merged names already computed for the older set.
//!
//! Tables are values. No operation changes an existing table; readers
//! holding an old table keep a consistent view.

mod lazy;
mod names;

use std::sync::{Arc, OnceLock};

use luma_diagnostic::DiagnosticSink;
use luma_parse::SyntaxTree;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use tracing::debug;

use crate::builder::DeclarationBuilder;

pub use lazy::LazyRootDeclaration;
use names::MergedNames;
pub use names::NameSet;

/// Insertion-ordered, deduplicated older declarations and their merged
/// names. Shared by every table that has the same older set.
#[derive(Default)]
struct OlderSet {
    entries: Vec<LazyRootDeclaration>,
    index: FxHashSet<LazyRootDeclaration>,
    names: OnceLock<Arc<MergedNames>>,
}

impl OlderSet {
    fn from_entries(entries: Vec<LazyRootDeclaration>) -> Self {
        let index = entries.iter().cloned().collect();
        OlderSet {
            entries,
            index,
            names: OnceLock::new(),
        }
    }

    fn without(&self, decl: &LazyRootDeclaration) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|entry| *entry != decl)
            .cloned()
            .collect();
        Self::from_entries(entries)
    }

    fn names(&self) -> &Arc<MergedNames> {
        self.names.get_or_init(|| {
            debug!(roots = self.entries.len(), "merging older declarations");
            let mut names = MergedNames::default();
            for entry in &self.entries {
                names.add(entry.force());
            }
            Arc::new(names)
        })
    }
}

/// Root declarations of a compilation.
///
/// `Clone` is cheap: the older set is shared.
#[derive(Clone, Default)]
pub struct DeclarationTable {
    older: Arc<OlderSet>,
    latest: Option<LazyRootDeclaration>,
    merged: Arc<OnceLock<Arc<MergedNames>>>,
}

impl DeclarationTable {
    /// The table of a compilation without files.
    pub fn empty() -> Self {
        Self::default()
    }

    fn with_parts(older: Arc<OlderSet>, latest: Option<LazyRootDeclaration>) -> Self {
        DeclarationTable {
            older,
            latest,
            merged: Arc::default(),
        }
    }

    /// Add `decl` as the latest declaration. The previous latest one moves
    /// to the end of the older set. Adding a declaration already in the table
    /// returns an equal table.
    #[must_use]
    pub fn add_root_declaration(&self, decl: LazyRootDeclaration) -> Self {
        if self.contains(&decl) {
            return self.clone();
        }
        let Some(previous) = &self.latest else {
            return Self::with_parts(Arc::clone(&self.older), Some(decl));
        };
        debug!(older = self.older.entries.len(), "promoting latest declaration");
        let mut entries = self.older.entries.clone();
        entries.push(previous.clone());
        Self::with_parts(Arc::new(OlderSet::from_entries(entries)), Some(decl))
    }

    /// Replace only the latest slot. The older set, and its merged names,
    /// are shared with `self` unless `decl` was in it; then it moves out of
    /// the older set into the latest slot.
    #[must_use]
    pub fn with_latest_root_declaration(&self, decl: LazyRootDeclaration) -> Self {
        if !self.older.index.contains(&decl) {
            return Self::with_parts(Arc::clone(&self.older), Some(decl));
        }
        Self::with_parts(Arc::new(self.older.without(&decl)), Some(decl))
    }

    /// Table without `decl`. Removing the latest declaration keeps the older
    /// set shared; removing an older one rebuilds it.
    #[must_use]
    pub fn remove_root_declaration(&self, decl: &LazyRootDeclaration) -> Self {
        if self.latest.as_ref() == Some(decl) {
            return Self::with_parts(Arc::clone(&self.older), None);
        }
        if !self.older.index.contains(decl) {
            return self.clone();
        }
        Self::with_parts(Arc::new(self.older.without(decl)), self.latest.clone())
    }

    pub fn contains(&self, decl: &LazyRootDeclaration) -> bool {
        self.latest.as_ref() == Some(decl) || self.older.index.contains(decl)
    }

    /// Older declarations in insertion order, then the latest one.
    pub fn root_declarations(&self) -> impl Iterator<Item = &LazyRootDeclaration> {
        self.older.entries.iter().chain(&self.latest)
    }

    pub fn latest(&self) -> Option<&LazyRootDeclaration> {
        self.latest.as_ref()
    }

    pub fn len(&self) -> usize {
        self.older.entries.len() + usize::from(self.latest.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of every module, script and submission declaration.
    pub fn merged_type_names(&self) -> &NameSet {
        &self.merged().types
    }

    /// Names of every named namespace.
    pub fn merged_namespace_names(&self) -> &NameSet {
        &self.merged().namespaces
    }

    /// Global names assigned by any file.
    pub fn merged_member_names(&self) -> &NameSet {
        &self.merged().members
    }

    /// Append the diagnostics of every root declaration to `sink`, older
    /// declarations first. Forces lazy declarations.
    pub fn report_diagnostics(&self, sink: &mut impl DiagnosticSink) {
        for decl in self.root_declarations() {
            decl.force().module().report_diagnostics(sink);
        }
    }

    /// Merged names of the whole table, computed once per table. The older
    /// part is computed once per older set.
    fn merged(&self) -> &Arc<MergedNames> {
        self.merged.get_or_init(|| {
            let older = self.older.names();
            match &self.latest {
                None => Arc::clone(older),
                Some(latest) => {
                    let mut names = MergedNames::clone(older);
                    names.add(latest.force());
                    Arc::new(names)
                }
            }
        })
    }

    /// Build the declarations of `trees` in parallel and collect them in
    /// input order; the last one becomes the latest declaration.
    pub fn from_trees(builder: &DeclarationBuilder, trees: &[(SyntaxTree, &str)]) -> Self {
        let mut roots: Vec<LazyRootDeclaration> = trees
            .par_iter()
            .map(|(tree, root_name)| {
                LazyRootDeclaration::ready(builder.build_for_tree(tree, root_name, false))
            })
            .collect();
        debug!(roots = roots.len(), "declaration table built from trees");
        let latest = roots.pop();
        Self::with_parts(Arc::new(OlderSet::from_entries(roots)), latest)
    }
}

impl std::fmt::Debug for DeclarationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeclarationTable")
            .field("older", &self.older.entries.len())
            .field("latest", &self.latest.is_some())
            .finish()
    }
}
