// ── Filter-after-fetch enumeration ──
//
// The store yields raw candidates; typing and label selection happen here.
// Every call is O(n) in the candidates the store returns for the scope.

use std::sync::Arc;

use kube::ResourceExt;
use kubelist_store::{DynObject, Indexer, object_key};
use tracing::warn;

use crate::error::ListerError;
use crate::labels::{Selector, SelectorExt};
use crate::model::Resource;

/// Recover the concrete kind from a store entry.
///
/// The single place where untyped store values become typed resources.
pub(crate) fn downcast_object<K: Resource>(obj: DynObject) -> Result<Arc<K>, ListerError> {
    Arc::clone(&obj)
        .into_any()
        .downcast::<K>()
        .map_err(|_| {
            let key = object_key(obj.object_meta());
            let expected = std::any::type_name::<K>();
            let found = obj.type_name();
            warn!(%key, expected, found, "store entry has unexpected type");
            ListerError::UnexpectedType {
                key,
                expected,
                found,
            }
        })
}

fn select_into<K: Resource>(
    objects: Vec<DynObject>,
    selector: &Selector,
    mut f: impl FnMut(Arc<K>),
) -> Result<(), ListerError> {
    let select_all = selector.selects_all();
    for obj in objects {
        let typed = downcast_object::<K>(obj)?;
        if select_all || selector.matches(typed.labels()) {
            f(typed);
        }
    }
    Ok(())
}

/// Call `f` with every object of kind `K` in the store whose labels match
/// `selector`.
pub fn list_all<K, S>(
    indexer: &S,
    selector: &Selector,
    f: impl FnMut(Arc<K>),
) -> Result<(), ListerError>
where
    K: Resource,
    S: Indexer + ?Sized,
{
    select_into(indexer.list()?, selector, f)
}

/// Like [`list_all`], restricted to objects indexed under `namespace`.
pub fn list_all_by_namespace<K, S>(
    indexer: &S,
    namespace: &str,
    selector: &Selector,
    f: impl FnMut(Arc<K>),
) -> Result<(), ListerError>
where
    K: Resource,
    S: Indexer + ?Sized,
{
    select_into(indexer.by_namespace(namespace)?, selector, f)
}
