//! Restore command handlers.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tabled::Tabled;
use tracing::debug;

use kubelist_core::labels::parse;
use kubelist_core::{
    MemoryStore, Restore, RestoreFilter, RestoreListerExt, RestoreNamespaceListerExt,
    RestorePhase, restore_lister,
};

use crate::cli::{GlobalOpts, RestoresArgs, RestoresCommand, RestoresListArgs};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RestoreRow {
    #[tabled(rename = "Namespace")]
    namespace: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Cluster")]
    cluster: String,
    #[tabled(rename = "Backup")]
    backup: String,
    #[tabled(rename = "Phase")]
    phase: String,
    #[tabled(rename = "Completed")]
    completed: String,
}

impl RestoreRow {
    fn new(r: &Restore, color: bool) -> Self {
        Self {
            namespace: r.namespace().to_owned(),
            name: r.name().to_owned(),
            cluster: r.cluster_name().unwrap_or("-").to_owned(),
            backup: r.backup_name().unwrap_or("-").to_owned(),
            phase: output::paint_phase(r.status.phase, color),
            completed: fmt_time(r.status.time_completed),
        }
    }
}

fn fmt_time(time: Option<DateTime<Utc>>) -> String {
    time.map_or_else(|| "-".into(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string())
}

fn detail(r: &Restore, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name:        {}", r.name());
    let _ = writeln!(out, "Namespace:   {}", r.namespace());
    let labels = match r.metadata.labels.as_ref() {
        None => "<none>".to_owned(),
        Some(labels) if labels.is_empty() => "<none>".to_owned(),
        Some(labels) => labels
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(","),
    };
    let _ = writeln!(out, "Labels:      {labels}");
    let _ = writeln!(out, "Cluster:     {}", r.cluster_name().unwrap_or("-"));
    let _ = writeln!(out, "Backup:      {}", r.backup_name().unwrap_or("-"));
    if !r.spec.scheduled_member.is_empty() {
        let _ = writeln!(out, "Member:      {}", r.spec.scheduled_member);
    }
    let _ = writeln!(out, "Phase:       {}", output::paint_phase(r.status.phase, color));
    let _ = writeln!(out, "Started:     {}", fmt_time(r.status.time_started));
    let _ = write!(out, "Completed:   {}", fmt_time(r.status.time_completed));
    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    store: &MemoryStore,
    args: RestoresArgs,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let color = output::should_color(global.color);

    match args.command {
        RestoresCommand::List(list) => {
            let restores = list_restores(store, &list, resolved, global.all_namespaces)?;
            let all = global.all_namespaces;
            let out = output::render_list(
                resolved.output,
                &restores,
                |r| RestoreRow::new(r, color),
                |r| {
                    if all {
                        r.key()
                    } else {
                        r.name().to_owned()
                    }
                },
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        RestoresCommand::Get { name } => {
            if global.all_namespaces {
                return Err(CliError::Validation {
                    field: "all-namespaces".into(),
                    reason: "a restore cannot be fetched by name across all namespaces".into(),
                });
            }
            let namespace = &resolved.namespace;
            let restore = restore_lister(store)
                .restores(namespace)
                .get(&name)
                .map_err(|e| CliError::from_lister(e, namespace))?;
            let out = output::render_single(
                resolved.output,
                &restore,
                |r| detail(r, color),
                |r| r.name().to_owned(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

/// Run a filtered list query, sorted by namespace then name.
fn list_restores(
    store: &MemoryStore,
    args: &RestoresListArgs,
    resolved: &Resolved,
    all_namespaces: bool,
) -> Result<Vec<Arc<Restore>>, CliError> {
    let selector = parse(&args.selector).map_err(|source| CliError::InvalidSelector {
            selector: args.selector.clone(),
            source,
        })?;
    let phase = args
        .phase
        .as_deref()
        .map(str::parse::<RestorePhase>)
        .transpose()
        .map_err(|_| CliError::Validation {
            field: "phase".into(),
            reason: format!(
                "expected one of Pending, Scheduled, Started, Complete, Failed, Unknown; got '{}'",
                args.phase.as_deref().unwrap_or_default()
            ),
        })?;

    let filter = RestoreFilter {
        phase,
        cluster: args.cluster.clone(),
        backup: args.backup.clone(),
    };

    debug!(profile = %resolved.profile, %selector, ?filter, all_namespaces, "listing restores");
    let lister = restore_lister(store);
    let mut restores = if all_namespaces {
        lister.list_filtered(&selector, &filter)?
    } else {
        lister
            .restores(&resolved.namespace)
            .list_filtered(&selector, &filter)?
    };
    restores.sort_by(|a, b| (a.namespace(), a.name()).cmp(&(b.namespace(), b.name())));
    Ok(restores)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use kubelist_core::object_meta;

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.add(
            Restore::new(object_meta("db", "r2"))
                .with_labels([("env", "prod")])
                .with_cluster("alpha")
                .with_phase(RestorePhase::Complete),
        );
        store.add(
            Restore::new(object_meta("db", "r1"))
                .with_labels([("env", "dev")])
                .with_cluster("beta")
                .with_backup("nightly"),
        );
        store.add(
            Restore::new(object_meta("ops", "r3"))
                .with_labels([("env", "prod")])
                .with_phase(RestorePhase::Complete),
        );
        store
    }

    fn resolved(namespace: &str) -> Resolved {
        Resolved {
            profile: "default".into(),
            sources: Vec::new(),
            namespace: namespace.into(),
            output: OutputFormat::Plain,
        }
    }

    fn args(selector: &str) -> RestoresListArgs {
        RestoresListArgs {
            selector: selector.into(),
            phase: None,
            cluster: None,
            backup: None,
        }
    }

    fn names(restores: &[Arc<Restore>]) -> Vec<String> {
        restores.iter().map(|r| r.key()).collect()
    }

    #[test]
    fn namespace_listing_is_sorted() {
        let got = list_restores(&store(), &args(""), &resolved("db"), false).unwrap();
        assert_eq!(names(&got), ["db/r1", "db/r2"]);
    }

    #[test]
    fn all_namespaces_with_selector_and_phase() {
        let mut a = args("env=prod");
        a.phase = Some("complete".into());
        let got = list_restores(&store(), &a, &resolved("db"), true).unwrap();
        assert_eq!(names(&got), ["db/r2", "ops/r3"]);
    }

    #[test]
    fn field_filters_narrow_results() {
        let mut a = args("");
        a.cluster = Some("beta".into());
        a.backup = Some("nightly".into());
        let got = list_restores(&store(), &a, &resolved("db"), false).unwrap();
        assert_eq!(names(&got), ["db/r1"]);
    }

    #[test]
    fn bad_selector_and_phase_are_rejected() {
        let err = list_restores(&store(), &args("env in"), &resolved("db"), false).unwrap_err();
        assert!(matches!(err, CliError::InvalidSelector { .. }));

        let mut a = args("");
        a.phase = Some("Sleeping".into());
        let err = list_restores(&store(), &a, &resolved("db"), false).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "phase"));
    }

    #[test]
    fn detail_view_shows_spec_and_status() {
        let r = Restore::new(object_meta("db", "r1"))
            .with_cluster("alpha")
            .with_phase(RestorePhase::Failed);
        let text = detail(&r, false);
        assert!(text.contains("Cluster:     alpha"));
        assert!(text.contains("Labels:      <none>"));
        assert!(text.contains("Phase:       Failed"));
        assert!(text.ends_with("Completed:   -"));
    }
}
