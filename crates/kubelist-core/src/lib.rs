//! Typed, read-only listers over a kubelist object store.
//!
//! The store ([`kubelist_store::Indexer`]) knows nothing about kinds. This
//! crate layers a type-safe query facade on top of it:
//!
//! - **[`Lister`]** — Enumerates one kind across all namespaces, filtered by
//!   a label [`Selector`], and narrows to a [`NamespaceLister`] with
//!   [`scoped()`](Lister::scoped).
//!
//! - **[`NamespaceLister`]** — Enumerates within one namespace and fetches a
//!   single object by name, distinguishing "not found" from store failures.
//!
//! - **Labels** ([`labels`]) — kube's [`Selector`] / [`Expression`] types,
//!   plus a parser for the `env=prod,tier in (web,api),!canary` syntax.
//!
//! - **Domain model** ([`model`]) — The [`Resource`] bound (any
//!   `kube::Resource` without dynamic type info) and the [`Restore`] kind.
//!
//! Listers borrow the store, never mutate it, and never block. Enumeration
//! is filter-after-fetch: O(n) in the candidates the store yields.

pub mod error;
pub mod expansion;
pub mod labels;
pub mod lister;
pub mod model;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::ListerError;
pub use expansion::{RestoreFilter, RestoreListerExt, RestoreNamespaceListerExt};
pub use labels::{Expression, Labels, Selector, SelectorError, SelectorExt};
pub use lister::{
    Lister, NamespaceLister, NamespacedLister, ResourceLister, RestoreLister,
    RestoreNamespaceLister, list_all, list_all_by_namespace, restore_lister,
};
pub use model::{
    GroupResource, LocalObjectReference, Resource, Restore, RestorePhase, RestoreSpec,
    RestoreStatus,
};

// Store types every caller needs alongside the listers.
pub use kubelist_store::{Indexer, MemoryStore, ObjectMeta, StoreError, object_meta};
