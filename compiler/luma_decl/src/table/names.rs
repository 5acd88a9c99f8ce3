//! Name sets merged across root declarations.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::declaration::RootDeclaration;

/// Deduplicated names in first-seen order.
#[derive(Clone, Debug, Default)]
pub struct NameSet {
    order: Vec<Arc<str>>,
    index: FxHashSet<Arc<str>>,
}

impl NameSet {
    fn insert(&mut self, name: &str) {
        if !self.index.contains(name) {
            let name: Arc<str> = name.into();
            self.index.insert(Arc::clone(&name));
            self.order.push(name);
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|name| &**name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl PartialEq for NameSet {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for NameSet {}

/// Type, namespace and member names of a set of root declarations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct MergedNames {
    pub(crate) types: NameSet,
    pub(crate) namespaces: NameSet,
    pub(crate) members: NameSet,
}

impl MergedNames {
    pub(crate) fn add(&mut self, root: &RootDeclaration) {
        for name in root.type_names() {
            self.types.insert(name);
        }
        for name in root.namespace_names() {
            self.namespaces.insert(name);
        }
        for name in root.module().member_names() {
            self.members.insert(name);
        }
    }
}
