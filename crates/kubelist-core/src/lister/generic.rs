// ── Typed listers ──
//
// Stateless views over a borrowed store. They hold no locks and can be
// created per query and dropped immediately.

use std::marker::PhantomData;
use std::sync::Arc;

use kubelist_store::{Indexer, name_of, namespace_of, namespaced_key};
use tracing::trace;

use super::cache::{downcast_object, list_all, list_all_by_namespace};
use super::{NamespacedLister, ResourceLister};
use crate::error::ListerError;
use crate::labels::Selector;
use crate::model::Resource;

/// Lists objects of kind `K` across all namespaces.
pub struct Lister<'a, K, S: ?Sized> {
    indexer: &'a S,
    _kind: PhantomData<fn() -> K>,
}

impl<'a, K: Resource, S: Indexer + ?Sized> Lister<'a, K, S> {
    pub fn new(indexer: &'a S) -> Self {
        Self {
            indexer,
            _kind: PhantomData,
        }
    }

    /// Every `K` in the store whose labels match `selector`.
    pub fn list(&self, selector: &Selector) -> Result<Vec<Arc<K>>, ListerError> {
        let mut ret: Vec<Arc<K>> = Vec::new();
        list_all(self.indexer, selector, |obj| ret.push(obj))?;
        trace!(kind = %K::kind(&()), %selector, count = ret.len(), "listed all namespaces");
        Ok(ret)
    }

    /// A lister restricted to `namespace`. The empty namespace holds
    /// cluster-scoped objects.
    pub fn scoped(&self, namespace: impl Into<String>) -> NamespaceLister<'a, K, S> {
        NamespaceLister {
            indexer: self.indexer,
            namespace: namespace.into(),
            _kind: PhantomData,
        }
    }
}

impl<K, S: ?Sized> Clone for Lister<'_, K, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, S: ?Sized> Copy for Lister<'_, K, S> {}

/// Lists and gets objects of kind `K` within one namespace.
pub struct NamespaceLister<'a, K, S: ?Sized> {
    indexer: &'a S,
    namespace: String,
    _kind: PhantomData<fn() -> K>,
}

impl<K: Resource, S: Indexer + ?Sized> NamespaceLister<'_, K, S> {
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Every `K` in this namespace whose labels match `selector`.
    pub fn list(&self, selector: &Selector) -> Result<Vec<Arc<K>>, ListerError> {
        let mut ret: Vec<Arc<K>> = Vec::new();
        list_all_by_namespace(self.indexer, &self.namespace, selector, |obj| ret.push(obj))?;
        trace!(
            kind = %K::kind(&()),
            namespace = %self.namespace,
            %selector,
            count = ret.len(),
            "listed namespace"
        );
        Ok(ret)
    }

    /// The `K` named `name` in this namespace.
    ///
    /// Fails with [`ListerError::NotFound`] if no `K` with that name lives
    /// in this namespace, and with [`ListerError::UnexpectedType`] if the
    /// entry is some other kind.
    ///
    /// In the empty namespace the key is the bare name, so a name holding a
    /// `/` would address another namespace's key. The stored object's own
    /// namespace and name must therefore match the request.
    pub fn get(&self, name: &str) -> Result<Arc<K>, ListerError> {
        let key = namespaced_key(&self.namespace, name);
        let not_found = || ListerError::NotFound {
            resource: K::group_resource(),
            name: name.to_owned(),
        };
        let Some(obj) = self.indexer.get_by_key(&key)? else {
            trace!(kind = %K::kind(&()), %key, "not found");
            return Err(not_found());
        };
        let typed: Arc<K> = downcast_object(obj)?;
        let meta = typed.meta();
        if namespace_of(meta) != self.namespace || name_of(meta) != name {
            trace!(
                kind = %K::kind(&()),
                %key,
                found_namespace = namespace_of(meta),
                found_name = name_of(meta),
                "key resolved outside the requested namespace"
            );
            return Err(not_found());
        }
        Ok(typed)
    }
}

impl<K, S: ?Sized> Clone for NamespaceLister<'_, K, S> {
    fn clone(&self) -> Self {
        Self {
            indexer: self.indexer,
            namespace: self.namespace.clone(),
            _kind: PhantomData,
        }
    }
}

// ── Capability impls ─────────────────────────────────────────────────

impl<'a, K: Resource, S: Indexer + ?Sized> ResourceLister<K> for Lister<'a, K, S> {
    type Namespaced = NamespaceLister<'a, K, S>;

    fn list(&self, selector: &Selector) -> Result<Vec<Arc<K>>, ListerError> {
        Lister::list(self, selector)
    }

    fn scoped(&self, namespace: &str) -> Self::Namespaced {
        Lister::scoped(self, namespace)
    }
}

impl<K: Resource, S: Indexer + ?Sized> NamespacedLister<K> for NamespaceLister<'_, K, S> {
    fn list(&self, selector: &Selector) -> Result<Vec<Arc<K>>, ListerError> {
        NamespaceLister::list(self, selector)
    }

    fn get(&self, name: &str) -> Result<Arc<K>, ListerError> {
        NamespaceLister::get(self, name)
    }
}
