use std::sync::{Arc, PoisonError, RwLock};

use crate::table::BasisTable;

/// Shared slot holding the current basis table.
///
/// Readers take cheap snapshots; a rebuild constructs a complete new table
/// and swaps it in, so no reader ever observes a partially built table.
#[derive(Debug)]
pub struct SharedBasis {
    current: RwLock<Arc<BasisTable>>,
}

impl SharedBasis {
    /// Wraps an initial table.
    pub fn new(table: BasisTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// Returns a snapshot of the current table.
    pub fn load(&self) -> Arc<BasisTable> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Installs a freshly built table and returns the previous one.
    pub fn replace(&self, table: BasisTable) -> Arc<BasisTable> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(table))
    }
}
