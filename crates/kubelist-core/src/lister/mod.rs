// ── Listers ──
//
// Capability traits plus the generic store-backed implementations.
// Integrators extend listers by adding traits over these capabilities
// (see `crate::expansion`), never by changing the core types.

mod cache;
mod generic;

use std::sync::Arc;

use kubelist_store::Indexer;

use crate::error::ListerError;
use crate::labels::Selector;
use crate::model::{Resource, Restore};

pub use cache::{list_all, list_all_by_namespace};
pub use generic::{Lister, NamespaceLister};

/// Enumerate a kind across all namespaces and narrow to one namespace.
pub trait ResourceLister<K: Resource> {
    type Namespaced: NamespacedLister<K>;

    fn list(&self, selector: &Selector) -> Result<Vec<Arc<K>>, ListerError>;

    fn scoped(&self, namespace: &str) -> Self::Namespaced;
}

/// Enumerate and fetch a kind within one namespace.
pub trait NamespacedLister<K: Resource> {
    fn list(&self, selector: &Selector) -> Result<Vec<Arc<K>>, ListerError>;

    fn get(&self, name: &str) -> Result<Arc<K>, ListerError>;
}

// ── Restore listers ──────────────────────────────────────────────────

pub type RestoreLister<'a, S> = Lister<'a, Restore, S>;
pub type RestoreNamespaceLister<'a, S> = NamespaceLister<'a, Restore, S>;

/// Build a [`RestoreLister`] over `indexer`.
pub fn restore_lister<S: Indexer + ?Sized>(indexer: &S) -> RestoreLister<'_, S> {
    Lister::new(indexer)
}

impl<'a, S: Indexer + ?Sized> Lister<'a, Restore, S> {
    /// Restores in `namespace`.
    pub fn restores(&self, namespace: impl Into<String>) -> RestoreNamespaceLister<'a, S> {
        self.scoped(namespace)
    }
}
