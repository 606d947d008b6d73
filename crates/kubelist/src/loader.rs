//! Manifest loading: fill a `MemoryStore` from YAML / JSON files.
//!
//! Each file may hold several `---` separated documents. A document is a
//! single object, a `kind: List` wrapper with `items`, or a bare sequence.
//! Objects of other kinds are skipped with a warning.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use serde_yaml::Value;
use tracing::{debug, info, warn};

use k8s_openapi::Resource as _;
use kubelist_core::{MemoryStore, Restore};
use kubelist_store::DynObject;

use crate::error::CliError;

/// Read every source and atomically replace the store contents with the
/// Restores they hold.
pub fn load_store(sources: &[PathBuf]) -> Result<MemoryStore, CliError> {
    let mut restores = Vec::new();
    for path in sources {
        let text = std::fs::read_to_string(path).map_err(|e| CliError::Manifest {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        let parsed = parse_manifest(&text, path)?;
        debug!(path = %path.display(), count = parsed.len(), "loaded manifest");
        restores.extend(parsed);
    }

    let store = MemoryStore::new();
    store.replace(restores.into_iter().map(|r| Arc::new(r) as DynObject));
    info!(objects = store.len(), namespaces = store.namespaces().len(), "mirror ready");
    Ok(store)
}

/// Parse one manifest file's text into Restores.
pub fn parse_manifest(text: &str, path: &Path) -> Result<Vec<Restore>, CliError> {
    let mut out = Vec::new();
    for document in serde_yaml::Deserializer::from_str(text) {
        let value = Value::deserialize(document).map_err(|e| manifest_err(path, &e))?;
        collect(value, path, &mut out)?;
    }
    Ok(out)
}

fn collect(value: Value, path: &Path, out: &mut Vec<Restore>) -> Result<(), CliError> {
    match value {
        Value::Null => Ok(()),
        Value::Sequence(items) => {
            for item in items {
                collect(item, path, out)?;
            }
            Ok(())
        }
        Value::Mapping(ref map) => {
            let kind = map.get("kind").and_then(Value::as_str).unwrap_or_default();
            if kind == "List" || kind == format!("{}List", Restore::KIND) {
                let items = map.get("items").cloned().unwrap_or(Value::Null);
                return collect(items, path, out);
            }
            if kind != Restore::KIND {
                warn!(path = %path.display(), kind, "skipping object of unsupported kind");
                return Ok(());
            }
            let restore: Restore =
                serde_yaml::from_value(value).map_err(|e| manifest_err(path, &e))?;
            if restore.api_version != Restore::API_VERSION {
                warn!(
                    path = %path.display(),
                    name = restore.name(),
                    api_version = %restore.api_version,
                    "unexpected apiVersion for Restore"
                );
            }
            if restore.name().is_empty() {
                return Err(CliError::Manifest {
                    path: path.to_owned(),
                    reason: "Restore without metadata.name".into(),
                });
            }
            out.push(restore);
            Ok(())
        }
        other => Err(CliError::Manifest {
            path: path.to_owned(),
            reason: format!("expected an object or list, found {}", value_kind(&other)),
        }),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

fn manifest_err(path: &Path, err: &serde_yaml::Error) -> CliError {
    CliError::Manifest {
        path: path.to_owned(),
        reason: err.to_string(),
    }
}
