// ── Resource kinds ──
//
// Static identity of a typed resource. Group, version, and kind come from
// `kube::Resource`; this adds the resource name used in diagnostics.

use std::fmt;

/// API group plus resource name, e.g. `restore.mysql.oracle.com`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupResource {
    pub group: String,
    pub resource: String,
}

impl GroupResource {
    pub fn new(group: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            resource: resource.into(),
        }
    }
}

impl fmt::Display for GroupResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.resource)
        } else {
            write!(f, "{}.{}", self.resource, self.group)
        }
    }
}

/// A statically typed kind that listers can project out of the store.
///
/// Implemented for every `kube::Resource` without dynamic type information,
/// which covers the k8s-openapi built-ins and any kind implementing
/// `k8s_openapi::Resource` + `k8s_openapi::Metadata`.
pub trait Resource: kube::Resource<DynamicType = ()> + Send + Sync + 'static {
    /// Group plus the lower-case singular kind.
    fn group_resource() -> GroupResource {
        GroupResource::new(Self::group(&()), Self::kind(&()).to_ascii_lowercase())
    }
}

impl<K> Resource for K where K: kube::Resource<DynamicType = ()> + Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::Pod;

    #[test]
    fn group_resource_display() {
        assert_eq!(
            GroupResource::new("mysql.oracle.com", "restore").to_string(),
            "restore.mysql.oracle.com"
        );
        assert_eq!(Pod::group_resource().to_string(), "pod");
    }
}
