//! Root declarations computed on first use.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use crate::declaration::RootDeclaration;

type Init = Box<dyn FnOnce() -> Arc<RootDeclaration> + Send>;

/// A root declaration that is built the first time it is needed.
///
/// Equality and hashing are by identity: two handles are equal when one is a
/// clone of the other, whatever the declarations they produce.
#[derive(Clone)]
pub struct LazyRootDeclaration(Arc<LazyLock<Arc<RootDeclaration>, Init>>);

impl LazyRootDeclaration {
    pub fn new(init: impl FnOnce() -> Arc<RootDeclaration> + Send + 'static) -> Self {
        LazyRootDeclaration(Arc::new(LazyLock::new(Box::new(init))))
    }

    /// A handle around an already built declaration.
    pub fn ready(root: Arc<RootDeclaration>) -> Self {
        Self::new(move || root)
    }

    /// The declaration, building it on the first call.
    #[inline]
    pub fn force(&self) -> &Arc<RootDeclaration> {
        LazyLock::force(&self.0)
    }
}

impl PartialEq for LazyRootDeclaration {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for LazyRootDeclaration {}

impl Hash for LazyRootDeclaration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Debug for LazyRootDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LazyRootDeclaration({:p})", Arc::as_ptr(&self.0))
    }
}
