// ── Restore domain type ──
//
// A request to restore a MySQL cluster from a named backup.

use chrono::{DateTime, Utc};
use k8s_openapi::{Metadata, NamespaceResourceScope, Resource};
use kubelist_store::{Labels, ObjectMeta, name_of, namespace_of, object_key};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Lifecycle phase of a restore.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum RestorePhase {
    /// Not yet observed by the operator.
    #[default]
    #[serde(rename = "")]
    #[strum(to_string = "Unknown", serialize = "")]
    Unknown,
    Pending,
    Scheduled,
    Started,
    Complete,
    Failed,
}

/// Reference to another object in the same namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalObjectReference {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreSpec {
    /// Cluster to restore into.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<LocalObjectReference>,
    /// Backup to restore from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup: Option<LocalObjectReference>,
    /// Cluster member chosen to run the restore, once scheduled.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scheduled_member: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreStatus {
    #[serde(default)]
    pub phase: RestorePhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_started: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_completed: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restore {
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_kind")]
    pub kind: String,
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: RestoreSpec,
    #[serde(default)]
    pub status: RestoreStatus,
}

fn default_api_version() -> String {
    Restore::API_VERSION.to_owned()
}

fn default_kind() -> String {
    Restore::KIND.to_owned()
}

impl Restore {
    pub fn new(metadata: ObjectMeta) -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            metadata,
            spec: RestoreSpec::default(),
            status: RestoreStatus::default(),
        }
    }

    /// Add labels, replacing any existing values for the same keys.
    pub fn with_labels<K, V>(mut self, labels: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.metadata
            .labels
            .get_or_insert_with(Labels::new)
            .extend(labels.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_cluster(mut self, name: impl Into<String>) -> Self {
        self.spec.cluster = Some(LocalObjectReference { name: name.into() });
        self
    }

    pub fn with_backup(mut self, name: impl Into<String>) -> Self {
        self.spec.backup = Some(LocalObjectReference { name: name.into() });
        self
    }

    pub fn with_phase(mut self, phase: RestorePhase) -> Self {
        self.status.phase = phase;
        self
    }

    pub fn name(&self) -> &str {
        name_of(&self.metadata)
    }

    pub fn namespace(&self) -> &str {
        namespace_of(&self.metadata)
    }

    /// The store key this restore is indexed under.
    pub fn key(&self) -> String {
        object_key(&self.metadata)
    }

    pub fn cluster_name(&self) -> Option<&str> {
        self.spec.cluster.as_ref().map(|r| r.name.as_str())
    }

    pub fn backup_name(&self) -> Option<&str> {
        self.spec.backup.as_ref().map(|r| r.name.as_str())
    }
}

impl Resource for Restore {
    const API_VERSION: &'static str = "mysql.oracle.com/v1alpha1";
    const GROUP: &'static str = "mysql.oracle.com";
    const KIND: &'static str = "Restore";
    const VERSION: &'static str = "v1alpha1";
    const URL_PATH_SEGMENT: &'static str = "restores";
    type Scope = NamespaceResourceScope;
}

impl Metadata for Restore {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}
