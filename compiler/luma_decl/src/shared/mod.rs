//! The current declaration table of a session.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::table::DeclarationTable;

/// Publishes declaration tables to concurrent readers.
///
/// Readers take a snapshot and keep using it however long they like; a
/// writer computes the next table from the current one and swaps the
/// pointer. Readers only hold the lock to clone the pointer.
#[derive(Default)]
pub struct SharedDeclarationTable {
    current: RwLock<Arc<DeclarationTable>>,
}

impl SharedDeclarationTable {
    pub fn new(table: DeclarationTable) -> Self {
        SharedDeclarationTable {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// The table as of now.
    pub fn snapshot(&self) -> Arc<DeclarationTable> {
        Arc::clone(&*self.current.read())
    }

    /// Replace the table with `f(current)` and return the new table.
    ///
    /// Writers are serialized, so no update is lost.
    pub fn update(
        &self,
        f: impl FnOnce(&DeclarationTable) -> DeclarationTable,
    ) -> Arc<DeclarationTable> {
        let mut current = self.current.write();
        let next = Arc::new(f(&current));
        *current = Arc::clone(&next);
        next
    }
}

impl fmt::Debug for SharedDeclarationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedDeclarationTable")
            .field(&*self.current.read())
            .finish()
    }
}
