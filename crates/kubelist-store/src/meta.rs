// ── Object metadata and type erasure ──
//
// Every store entry is a `kube::Resource` carrying the standard k8s
// `ObjectMeta`. The store itself only ever sees `DynObject`; typed
// consumers downcast back to their concrete kind.

use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::StoreError;

pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// Label mapping attached to an object.
pub type Labels = BTreeMap<String, String>;

/// Metadata for `name` in `namespace`. An empty namespace leaves the
/// object cluster-scoped.
pub fn object_meta(namespace: &str, name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_owned()),
        namespace: (!namespace.is_empty()).then(|| namespace.to_owned()),
        ..ObjectMeta::default()
    }
}

/// The object's namespace, or `""` for cluster-scoped objects.
pub fn namespace_of(meta: &ObjectMeta) -> &str {
    meta.namespace.as_deref().unwrap_or_default()
}

/// The object's name, or `""` if unset.
pub fn name_of(meta: &ObjectMeta) -> &str {
    meta.name.as_deref().unwrap_or_default()
}

// ── Store keys ──────────────────────────────────────────────────────

/// Derive the store key for an object: `namespace/name`, or bare `name`
/// for cluster-scoped objects.
pub fn object_key(meta: &ObjectMeta) -> String {
    namespaced_key(namespace_of(meta), name_of(meta))
}

/// Derive a store key from its parts.
pub fn namespaced_key(namespace: &str, name: &str) -> String {
    if namespace.is_empty() {
        name.to_owned()
    } else {
        format!("{namespace}/{name}")
    }
}

/// Split a store key back into `(namespace, name)`.
///
/// A key without a separator is cluster-scoped and yields an empty namespace.
pub fn split_key(key: &str) -> Result<(&str, &str), StoreError> {
    let mut parts = key.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) => Ok(("", name)),
        (Some(namespace), Some(name), None) => Ok((namespace, name)),
        _ => Err(StoreError::InvalidKey { key: key.to_owned() }),
    }
}

// ── Type erasure ────────────────────────────────────────────────────

/// A type-erased store entry.
///
/// Blanket-implemented for every `kube::Resource`, so callers never
/// implement this by hand.
pub trait Object: Send + Sync + 'static {
    fn object_meta(&self) -> &ObjectMeta;

    /// Concrete Rust type name, for diagnostics.
    fn type_name(&self) -> &'static str;

    /// Convert into `Any` so the caller can downcast to the concrete type.
    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T> Object for T
where
    T: kube::Resource + Send + Sync + 'static,
{
    fn object_meta(&self) -> &ObjectMeta {
        self.meta()
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// Shared handle to an untyped store entry.
pub type DynObject = Arc<dyn Object>;
