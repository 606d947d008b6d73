// ── Lister error types ──
//
// Three failure kinds, distinguishable by variant: the store failed, the
// requested object does not exist, or the store holds a value of the
// wrong type under a key this lister owns.

use kubelist_store::StoreError;
use thiserror::Error;

use crate::model::GroupResource;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListerError {
    /// Opaque failure from the underlying store, passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{resource} {name:?} not found")]
    NotFound {
        resource: GroupResource,
        name: String,
    },

    /// Integration fault: the entry under `key` is not the expected kind.
    #[error("unexpected object type under key {key:?}: expected {expected}, found {found}")]
    UnexpectedType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ListerError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_store_error(&self) -> bool {
        matches!(self, Self::Store(_))
    }

    pub fn is_unexpected_type(&self) -> bool {
        matches!(self, Self::UnexpectedType { .. })
    }
}
