//! CLI configuration — thin wrapper around `kubelist_config` shared types.
//!
//! Adds CLI-specific resolution that respects `GlobalOpts` flag overrides
//! (--file, --namespace, --output, --profile).

use std::path::PathBuf;

use clap::ValueEnum;
use tracing::debug;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use kubelist_config::{Config, Profile, config_path, load_config_from, save_config_to};

/// Everything a query command needs, resolved from flags, env, and config.
#[derive(Debug)]
pub struct Resolved {
    pub profile: String,
    pub sources: Vec<PathBuf>,
    pub namespace: String,
    pub output: OutputFormat,
}

// ── CLI-specific helpers ────────────────────────────────────────────

/// The config file in effect: `--config` / `KUBELIST_CONFIG`, else the
/// platform default.
pub fn effective_path(global: &GlobalOpts) -> PathBuf {
    global.config.clone().unwrap_or_else(config_path)
}

/// Load the config file in effect.
pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(load_config_from(&effective_path(global))?)
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Output format: flag > env > config default.
pub fn resolve_output(global: &GlobalOpts, config: &Config) -> Result<OutputFormat, CliError> {
    if let Some(format) = global.output {
        return Ok(format);
    }
    OutputFormat::from_str(&config.defaults.output, true).map_err(|reason| CliError::Validation {
        field: "defaults.output".into(),
        reason,
    })
}

/// Resolve sources, namespace, and output for a query command.
///
/// `-f` replaces the profile's sources. An explicitly requested profile
/// must exist; the implicit default profile may be absent when `-f` is given.
pub fn resolve(global: &GlobalOpts, config: &Config) -> Result<Resolved, CliError> {
    let profile_name = active_profile_name(global, config);
    let profile = match config.profile(&profile_name) {
        Ok(p) => Some(p),
        Err(err) if global.profile.is_some() => return Err(err.into()),
        Err(_) => None,
    };

    let sources = if global.files.is_empty() {
        profile.map(|p| p.sources.clone()).unwrap_or_default()
    } else {
        global.files.clone()
    };
    if sources.is_empty() {
        return Err(CliError::NoSources {
            profile: profile_name,
            path: effective_path(global).display().to_string(),
        });
    }

    let namespace = global
        .namespace
        .clone()
        .unwrap_or_else(|| config.namespace_for(profile).to_owned());
    let output = resolve_output(global, config)?;

    debug!(
        profile = %profile_name,
        sources = sources.len(),
        namespace = %namespace,
        "resolved query settings"
    );

    Ok(Resolved {
        profile: profile_name,
        sources,
        namespace,
        output,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["kubelist"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["config", "path"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with_profile() -> Config {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                sources: vec![PathBuf::from("mirror.yaml")],
                namespace: Some("db".into()),
            },
        );
        cfg
    }

    #[test]
    fn profile_supplies_sources_and_namespace() {
        let resolved = resolve(&global(&[]), &config_with_profile()).unwrap();
        assert_eq!(resolved.profile, "default");
        assert_eq!(resolved.sources, [PathBuf::from("mirror.yaml")]);
        assert_eq!(resolved.namespace, "db");
        assert_eq!(resolved.output, OutputFormat::Table);
    }

    #[test]
    fn flags_override_profile() {
        let g = global(&["-f", "a.yaml", "-f", "b.json", "-n", "ops", "-o", "yaml"]);
        let resolved = resolve(&g, &config_with_profile()).unwrap();
        assert_eq!(
            resolved.sources,
            [PathBuf::from("a.yaml"), PathBuf::from("b.json")]
        );
        assert_eq!(resolved.namespace, "ops");
        assert_eq!(resolved.output, OutputFormat::Yaml);
    }

    #[test]
    fn files_work_without_any_profile() {
        let resolved = resolve(&global(&["-f", "a.yaml"]), &Config::default()).unwrap();
        assert_eq!(resolved.namespace, "default");
    }

    #[test]
    fn missing_sources_is_an_error() {
        let err = resolve(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoSources { ref profile, .. } if profile == "default"));
    }

    #[test]
    fn explicit_unknown_profile_is_an_error() {
        let err = resolve(&global(&["-p", "prod", "-f", "a.yaml"]), &config_with_profile())
            .unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { ref name, .. } if name == "prod"));
    }
}
