// ── In-memory object store ──
//
// Snapshot-consistent storage with a by-namespace index and push-based
// version notification via a `watch` channel. Readers load one immutable
// snapshot per call; writers publish a new snapshot with `rcu`.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arc_swap::ArcSwap;
use tokio::sync::watch;
use tracing::debug;

use crate::error::StoreError;
use crate::indexer::Indexer;
use crate::meta::{DynObject, namespace_of, object_key};

/// One published view of the store. Never mutated after publication.
#[derive(Clone, Default)]
struct StoreState {
    /// Primary storage: store key -> object.
    objects: HashMap<String, DynObject>,
    /// Secondary index: namespace -> keys. Empty namespaces are dropped.
    namespaces: HashMap<String, BTreeSet<String>>,
}

impl StoreState {
    fn insert(&mut self, obj: DynObject) {
        let meta = obj.object_meta();
        let key = object_key(meta);
        self.namespaces
            .entry(namespace_of(meta).to_owned())
            .or_default()
            .insert(key.clone());
        self.objects.insert(key, obj);
    }

    fn remove(&mut self, key: &str) {
        let Some(obj) = self.objects.remove(key) else {
            return;
        };
        let namespace = namespace_of(obj.object_meta());
        if let Some(keys) = self.namespaces.get_mut(namespace) {
            keys.remove(key);
            if keys.is_empty() {
                self.namespaces.remove(namespace);
            }
        }
    }
}

/// An in-memory [`Indexer`] owned by a synchronization process.
///
/// Every read observes a single point-in-time snapshot: an enumeration
/// never sees a write that lands mid-scan. Writes are serialized through
/// read-copy-update, so each mutation costs O(n) in the store size.
pub struct MemoryStore {
    state: ArcSwap<StoreState>,
    synced: AtomicBool,
    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        Self {
            state: ArcSwap::from_pointee(StoreState::default()),
            synced: AtomicBool::new(false),
            version,
        }
    }

    /// Insert or update an object. Returns `true` if the key was new.
    pub fn add<T: kube::Resource + Send + Sync + 'static>(&self, obj: T) -> bool {
        self.insert(Arc::new(obj))
    }

    /// Alias for [`add`](Self::add); the store does not distinguish the two.
    pub fn update<T: kube::Resource + Send + Sync + 'static>(&self, obj: T) -> bool {
        self.add(obj)
    }

    /// Insert or update an already type-erased object.
    pub fn insert(&self, obj: DynObject) -> bool {
        let key = object_key(obj.object_meta());
        let previous = self.apply(|state| state.insert(Arc::clone(&obj)));
        let is_new = !previous.objects.contains_key(&key);
        debug!(%key, is_new, "store upsert");
        is_new
    }

    /// Remove an object by key. Returns the removed object if it existed.
    pub fn delete(&self, key: &str) -> Option<DynObject> {
        if !self.state.load().objects.contains_key(key) {
            return None;
        }
        let previous = self.apply(|state| state.remove(key));
        let removed = previous.objects.get(key).cloned();
        debug!(%key, removed = removed.is_some(), "store delete");
        removed
    }

    /// Atomically swap the entire contents for `objects`.
    ///
    /// Readers see either the old set or the new one, never a mix and
    /// never an empty gap. Marks the store as synced.
    pub fn replace(&self, objects: impl IntoIterator<Item = DynObject>) {
        let mut next = StoreState::default();
        for obj in objects {
            next.insert(obj);
        }
        let count = next.objects.len();
        self.state.store(Arc::new(next));
        self.synced.store(true, Ordering::Release);
        self.bump_version();
        debug!(count, "store replaced");
    }

    /// Whether an initial full [`replace`](Self::replace) has completed.
    pub fn has_synced(&self) -> bool {
        self.synced.load(Ordering::Acquire)
    }

    pub fn len(&self) -> usize {
        self.state.load().objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.load().objects.is_empty()
    }

    /// All current store keys.
    pub fn keys(&self) -> Vec<String> {
        self.state.load().objects.keys().cloned().collect()
    }

    /// Namespaces that currently hold at least one object.
    pub fn namespaces(&self) -> Vec<String> {
        self.state.load().namespaces.keys().cloned().collect()
    }

    /// Current mutation counter.
    pub fn version(&self) -> u64 {
        *self.version.borrow()
    }

    /// Subscribe to the mutation counter.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.version.subscribe()
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Publish a modified copy of the current state and return the state
    /// it replaced.
    fn apply(&self, f: impl Fn(&mut StoreState)) -> Arc<StoreState> {
        let previous = self.state.rcu(|current| {
            let mut next = StoreState::clone(current);
            f(&mut next);
            next
        });
        self.bump_version();
        previous
    }

    fn bump_version(&self) {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.version.send_modify(|v| *v += 1);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Indexer for MemoryStore {
    fn list(&self) -> Result<Vec<DynObject>, StoreError> {
        Ok(self.state.load().objects.values().cloned().collect())
    }

    fn by_namespace(&self, namespace: &str) -> Result<Vec<DynObject>, StoreError> {
        let state = self.state.load();
        let Some(keys) = state.namespaces.get(namespace) else {
            return Ok(Vec::new());
        };
        Ok(keys
            .iter()
            .filter_map(|key| state.objects.get(key).cloned())
            .collect())
    }

    fn get_by_key(&self, key: &str) -> Result<Option<DynObject>, StoreError> {
        Ok(self.state.load().objects.get(key).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::meta::{name_of, object_meta};
    use k8s_openapi::api::core::v1::ConfigMap;
    use pretty_assertions::assert_eq;

    fn widget(namespace: &str, name: &str) -> ConfigMap {
        ConfigMap {
            metadata: object_meta(namespace, name),
            ..ConfigMap::default()
        }
    }

    fn sorted_names(objects: &[DynObject]) -> Vec<String> {
        let mut names: Vec<String> = objects
            .iter()
            .map(|o| name_of(o.object_meta()).to_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn add_returns_true_for_new_key() {
        let store = MemoryStore::new();
        assert!(store.add(widget("a", "w1")));
        assert!(!store.add(widget("a", "w1")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn get_by_key_uses_namespaced_key() {
        let store = MemoryStore::new();
        store.add(widget("a", "w1"));
        store.add(widget("", "global"));

        assert!(store.get_by_key("a/w1").unwrap().is_some());
        assert!(store.get_by_key("global").unwrap().is_some());
        assert!(store.get_by_key("w1").unwrap().is_none());
    }

    #[test]
    fn by_namespace_only_returns_that_partition() {
        let store = MemoryStore::new();
        store.add(widget("a", "w1"));
        store.add(widget("a", "w2"));
        store.add(widget("b", "w3"));
        store.add(widget("", "w4"));

        assert_eq!(sorted_names(&store.by_namespace("a").unwrap()), ["w1", "w2"]);
        assert_eq!(sorted_names(&store.by_namespace("").unwrap()), ["w4"]);
        assert!(store.by_namespace("missing").unwrap().is_empty());
        assert_eq!(store.list().unwrap().len(), 4);
    }

    #[test]
    fn update_replaces_the_stored_object() {
        let store = MemoryStore::new();
        store.add(widget("a", "w1"));

        let mut changed = widget("a", "w1");
        changed.data = Some([("mode".to_owned(), "fast".to_owned())].into());
        assert!(!store.update(changed));
        assert_eq!(store.len(), 1);
        assert_eq!(store.version(), 2);

        let stored = store.get_by_key("a/w1").unwrap().unwrap();
        let cm = stored.into_any().downcast::<ConfigMap>().ok().unwrap();
        assert_eq!(cm.data.as_ref().unwrap().get("mode").unwrap(), "fast");

        // An update for an unseen key behaves like an add.
        assert!(store.update(widget("b", "w2")));
        assert_eq!(store.namespaces().len(), 2);
    }

    #[test]
    fn delete_cleans_up_namespace_index() {
        let store = MemoryStore::new();
        store.add(widget("a", "w1"));

        let removed = store.delete("a/w1").unwrap();
        assert_eq!(name_of(removed.object_meta()), "w1");
        assert!(store.is_empty());
        assert!(store.namespaces().is_empty());
        assert!(store.by_namespace("a").unwrap().is_empty());
        assert!(store.delete("a/w1").is_none());
    }

    #[test]
    fn replace_prunes_and_marks_synced() {
        let store = MemoryStore::new();
        store.add(widget("a", "stale"));
        assert!(!store.has_synced());

        store.replace([
            Arc::new(widget("b", "w1")) as DynObject,
            Arc::new(widget("b", "w2")) as DynObject,
        ]);

        assert!(store.has_synced());
        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, ["b/w1", "b/w2"]);
        assert_eq!(store.namespaces(), ["b"]);
    }

    #[test]
    fn mutations_bump_version() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe();
        assert_eq!(store.version(), 0);

        store.add(widget("a", "w1"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);

        // Deleting an absent key is not a mutation.
        store.delete("a/nope");
        assert!(!rx.has_changed().unwrap());

        store.delete("a/w1");
        assert_eq!(store.version(), 2);
    }

    #[test]
    fn earlier_reads_are_unaffected_by_later_writes() {
        let store = MemoryStore::new();
        store.add(widget("a", "w1"));
        let before = store.by_namespace("a").unwrap();

        store.add(widget("a", "w2"));
        store.delete("a/w1");

        assert_eq!(sorted_names(&before), ["w1"]);
        assert_eq!(sorted_names(&store.by_namespace("a").unwrap()), ["w2"]);
    }

    #[test]
    fn concurrent_replace_is_never_observed_half_applied() {
        let store = MemoryStore::new();
        let small: Vec<DynObject> = (0..10)
            .map(|i| Arc::new(widget("x", &format!("w{i}"))) as DynObject)
            .collect();
        let large: Vec<DynObject> = (0..20)
            .map(|i| Arc::new(widget("y", &format!("w{i}"))) as DynObject)
            .collect();
        store.replace(small.clone());

        std::thread::scope(|s| {
            s.spawn(|| {
                for round in 0..200 {
                    if round % 2 == 0 {
                        store.replace(large.clone());
                    } else {
                        store.replace(small.clone());
                    }
                }
            });
            s.spawn(|| {
                for _ in 0..500 {
                    let len = store.list().unwrap().len();
                    assert!(len == 10 || len == 20, "observed torn snapshot of {len}");
                }
            });
        });
    }
}
