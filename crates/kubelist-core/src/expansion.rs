// ── Restore lister extensions ──
//
// Domain queries layered on the lister capability traits. Blanket impls
// make them available on any lister, including integrator-supplied ones.

use std::sync::Arc;

use crate::error::ListerError;
use crate::labels::{Selector, everything};
use crate::lister::{NamespacedLister, ResourceLister};
use crate::model::{Restore, RestorePhase};

/// Field-level conditions on a Restore, applied after label selection.
///
/// Unset fields place no constraint. A set cluster or backup never matches
/// a restore that does not name one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreFilter {
    pub phase: Option<RestorePhase>,
    pub cluster: Option<String>,
    pub backup: Option<String>,
}

impl RestoreFilter {
    pub fn phase(phase: RestorePhase) -> Self {
        Self {
            phase: Some(phase),
            ..Self::default()
        }
    }

    pub fn cluster(cluster: impl Into<String>) -> Self {
        Self {
            cluster: Some(cluster.into()),
            ..Self::default()
        }
    }

    pub fn backup(backup: impl Into<String>) -> Self {
        Self {
            backup: Some(backup.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.phase.is_none() && self.cluster.is_none() && self.backup.is_none()
    }

    pub fn matches(&self, restore: &Restore) -> bool {
        self.phase.is_none_or(|p| restore.status.phase == p)
            && self
                .cluster
                .as_deref()
                .is_none_or(|c| restore.cluster_name() == Some(c))
            && self
                .backup
                .as_deref()
                .is_none_or(|b| restore.backup_name() == Some(b))
    }

    fn retain(&self, mut restores: Vec<Arc<Restore>>) -> Vec<Arc<Restore>> {
        if !self.is_empty() {
            restores.retain(|r| self.matches(r));
        }
        restores
    }
}

pub trait RestoreListerExt: ResourceLister<Restore> {
    /// Restores in every namespace matching both `selector` and `filter`.
    fn list_filtered(
        &self,
        selector: &Selector,
        filter: &RestoreFilter,
    ) -> Result<Vec<Arc<Restore>>, ListerError> {
        Ok(filter.retain(self.list(selector)?))
    }

    /// Restores matching `selector` that are currently in `phase`.
    fn list_by_phase(
        &self,
        selector: &Selector,
        phase: RestorePhase,
    ) -> Result<Vec<Arc<Restore>>, ListerError> {
        self.list_filtered(selector, &RestoreFilter::phase(phase))
    }
}

impl<T: ResourceLister<Restore> + ?Sized> RestoreListerExt for T {}

pub trait RestoreNamespaceListerExt: NamespacedLister<Restore> {
    /// Restores in this namespace matching both `selector` and `filter`.
    fn list_filtered(
        &self,
        selector: &Selector,
        filter: &RestoreFilter,
    ) -> Result<Vec<Arc<Restore>>, ListerError> {
        Ok(filter.retain(self.list(selector)?))
    }

    /// Restores targeting the named cluster.
    fn list_for_cluster(&self, cluster: &str) -> Result<Vec<Arc<Restore>>, ListerError> {
        self.list_filtered(&everything(), &RestoreFilter::cluster(cluster))
    }

    /// Restores reading from the named backup.
    fn list_for_backup(&self, backup: &str) -> Result<Vec<Arc<Restore>>, ListerError> {
        self.list_filtered(&everything(), &RestoreFilter::backup(backup))
    }
}

impl<T: NamespacedLister<Restore> + ?Sized> RestoreNamespaceListerExt for T {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::labels::parse;
    use crate::lister::restore_lister;
    use kubelist_store::{MemoryStore, object_meta};

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.add(
            Restore::new(object_meta("db", "r1"))
                .with_labels([("env", "prod")])
                .with_cluster("alpha")
                .with_backup("nightly")
                .with_phase(RestorePhase::Complete),
        );
        store.add(
            Restore::new(object_meta("db", "r2"))
                .with_cluster("beta")
                .with_backup("nightly")
                .with_phase(RestorePhase::Started),
        );
        store.add(
            Restore::new(object_meta("ops", "r3"))
                .with_labels([("env", "prod")])
                .with_cluster("alpha")
                .with_phase(RestorePhase::Complete),
        );
        store
    }

    fn names(restores: &[Arc<Restore>]) -> Vec<&str> {
        let mut names: Vec<&str> = restores.iter().map(|r| r.name()).collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn list_by_phase_spans_namespaces() {
        let store = seeded();
        let lister = restore_lister(&store);
        let done = lister
            .list_by_phase(&everything(), RestorePhase::Complete)
            .unwrap();
        assert_eq!(names(&done), ["r1", "r3"]);
    }

    #[test]
    fn cluster_and_backup_queries_stay_in_namespace() {
        let store = seeded();
        let db = restore_lister(&store).restores("db");

        assert_eq!(names(&db.list_for_cluster("alpha").unwrap()), ["r1"]);
        assert_eq!(names(&db.list_for_backup("nightly").unwrap()), ["r1", "r2"]);
        assert!(db.list_for_cluster("gamma").unwrap().is_empty());
    }

    #[test]
    fn filters_combine_with_selectors() {
        let store = seeded();
        let lister = restore_lister(&store);
        let filter = RestoreFilter {
            cluster: Some("alpha".into()),
            ..RestoreFilter::phase(RestorePhase::Complete)
        };

        let everywhere = lister.list_filtered(&parse("env=prod").unwrap(), &filter).unwrap();
        assert_eq!(names(&everywhere), ["r1", "r3"]);

        let db = lister
            .restores("db")
            .list_filtered(&everything(), &filter)
            .unwrap();
        assert_eq!(names(&db), ["r1"]);
    }

    #[test]
    fn unset_filter_matches_everything() {
        let filter = RestoreFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&Restore::new(object_meta("db", "bare"))));
        assert!(!RestoreFilter::backup("nightly").matches(&Restore::new(object_meta("db", "bare"))));
    }
}
