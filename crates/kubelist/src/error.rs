//! CLI error types with miette diagnostics.
//!
//! Maps `ListerError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use kubelist_config::ConfigError;
use kubelist_core::{ListerError, SelectorError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found in namespace '{namespace}'")]
    #[diagnostic(
        code(kubelist::not_found),
        help("Run: kubelist restores list -n {namespace} to see available restores")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        namespace: String,
    },

    // ── Store ────────────────────────────────────────────────────────

    #[error("Object store failed: {0}")]
    #[diagnostic(code(kubelist::store))]
    Store(#[source] ListerError),

    #[error("Object under key '{key}' is a {found}, expected {expected}")]
    #[diagnostic(
        code(kubelist::unexpected_type),
        help("The mirror holds a different kind under this key; check the loaded manifests.")
    )]
    UnexpectedType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    // ── Sources ──────────────────────────────────────────────────────

    #[error("No manifest sources configured for profile '{profile}'")]
    #[diagnostic(
        code(kubelist::no_sources),
        help(
            "Pass manifests with -f FILE, or list them under\n\
             [profiles.{profile}] sources = [...] in {path}"
        )
    )]
    NoSources { profile: String, path: String },

    #[error("Failed to load manifest {}: {reason}", .path.display())]
    #[diagnostic(code(kubelist::manifest))]
    Manifest { path: PathBuf, reason: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid label selector '{selector}'")]
    #[diagnostic(
        code(kubelist::selector),
        help("Selectors look like: env=prod,tier in (db,cache),!canary")
    )]
    InvalidSelector {
        selector: String,
        #[source]
        source: SelectorError,
    },

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(kubelist::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(kubelist::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create a config with: kubelist config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(kubelist::config))]
    Config(#[source] ConfigError),

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::InvalidSelector { .. }
            | Self::Validation { .. }
            | Self::ProfileNotFound { .. }
            | Self::NoSources { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Translate a lister failure, attaching the namespace a `get` ran in.
    pub fn from_lister(err: ListerError, namespace: &str) -> Self {
        match err {
            ListerError::NotFound { resource, name } => Self::NotFound {
                resource_type: resource.to_string(),
                identifier: name,
                namespace: namespace.to_owned(),
            },
            ListerError::UnexpectedType {
                key,
                expected,
                found,
            } => Self::UnexpectedType {
                key,
                expected,
                found,
            },
            err @ ListerError::Store(_) => Self::Store(err),
        }
    }
}

// ── ListerError / ConfigError → CliError mapping ─────────────────────

impl From<ListerError> for CliError {
    fn from(err: ListerError) -> Self {
        Self::from_lister(err, "")
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name, available } => {
                Self::ProfileNotFound { name, available }
            }
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config(other),
        }
    }
}
