// ── Domain model ──
//
// Typed resource kinds served by the listers.

mod resource;
mod restore;

pub use resource::{GroupResource, Resource};
pub use restore::{LocalObjectReference, Restore, RestorePhase, RestoreSpec, RestoreStatus};
