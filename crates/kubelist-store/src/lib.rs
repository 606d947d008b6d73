//! Kind-agnostic object store consumed by the kubelist typed listers.
//!
//! This crate defines the contract between a local object mirror and the
//! code that queries it:
//!
//! - **[`Indexer`]** — Read-only store interface: enumerate everything,
//!   enumerate one namespace, or fetch a single entry by key. Listers only
//!   ever talk to this trait.
//!
//! - **[`Object`] / [`DynObject`]** — Type-erased store entries. Any
//!   `kube::Resource` can be stored, built-in kinds and custom resources
//!   alike; typed consumers recover the concrete type with a downcast.
//!
//! - **[`MemoryStore`]** — Snapshot-consistent in-memory implementation with
//!   a by-namespace index and version notifications. Populated by whatever
//!   synchronization process owns the mirror.

pub mod error;
pub mod indexer;
pub mod memory;
pub mod meta;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::StoreError;
pub use indexer::Indexer;
pub use memory::MemoryStore;
pub use meta::{
    DynObject, Labels, Object, ObjectMeta, name_of, namespace_of, namespaced_key, object_key,
    object_meta, split_key,
};
