// ── Read-only store contract ──
//
// The only surface listers depend on. Implementations own population,
// refresh, and their own synchronization policy.

use std::sync::Arc;

use crate::error::StoreError;
use crate::meta::DynObject;

/// Read access to a kind-agnostic object store.
///
/// Implementations must be safe for concurrent reads if listers are to be
/// shared across threads. Enumeration order is unspecified.
pub trait Indexer {
    /// Every object currently in the store.
    fn list(&self) -> Result<Vec<DynObject>, StoreError>;

    /// Objects indexed under `namespace`. The empty namespace holds
    /// cluster-scoped objects.
    fn by_namespace(&self, namespace: &str) -> Result<Vec<DynObject>, StoreError>;

    /// Look up a single entry. `Ok(None)` means the key is absent.
    fn get_by_key(&self, key: &str) -> Result<Option<DynObject>, StoreError>;
}

impl<I: Indexer + ?Sized> Indexer for Arc<I> {
    fn list(&self) -> Result<Vec<DynObject>, StoreError> {
        (**self).list()
    }

    fn by_namespace(&self, namespace: &str) -> Result<Vec<DynObject>, StoreError> {
        (**self).by_namespace(namespace)
    }

    fn get_by_key(&self, key: &str) -> Result<Option<DynObject>, StoreError> {
        (**self).get_by_key(key)
    }
}
