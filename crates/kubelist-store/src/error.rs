// ── Store error types ──
//
// Failures raised by an `Indexer` implementation. Listers propagate these
// verbatim; they never retry or reinterpret them.

use thiserror::Error;

/// Error raised by the underlying object store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("object store unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("index '{index}' failed: {reason}")]
    Index { index: String, reason: String },

    #[error("unexpected key format: {key:?}")]
    InvalidKey { key: String },
}
