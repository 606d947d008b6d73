//! Clap derive structures for the `kubelist` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// kubelist -- kubectl-style queries over a local mirror of Restore objects
#[derive(Debug, Parser)]
#[command(
    name = "kubelist",
    version,
    about = "Query Restore objects in a local mirror",
    long_about = "Loads Restore manifests (YAML or JSON) into an in-memory store and\n\
        answers list/get queries through typed, namespace-aware listers with\n\
        Kubernetes label selector support.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Mirror profile to use
    #[arg(long, short = 'p', env = "KUBELIST_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "KUBELIST_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Manifest file to load (repeatable; overrides profile sources)
    #[arg(long = "file", short = 'f', value_name = "FILE", global = true)]
    pub files: Vec<PathBuf>,

    /// Namespace to query
    #[arg(long, short = 'n', env = "KUBELIST_NAMESPACE", global = true)]
    pub namespace: Option<String>,

    /// Query across all namespaces (ignores --namespace)
    #[arg(long, short = 'A', global = true)]
    pub all_namespaces: bool,

    /// Output format (defaults to the configured output)
    #[arg(long, short = 'o', env = "KUBELIST_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Query MySQL cluster restores
    #[command(alias = "restore", alias = "rs")]
    Restores(RestoresArgs),

    /// Manage the CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RESTORES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RestoresArgs {
    #[command(subcommand)]
    pub command: RestoresCommand,
}

#[derive(Debug, Subcommand)]
pub enum RestoresCommand {
    /// List restores in a namespace (or all namespaces with -A)
    #[command(alias = "ls")]
    List(RestoresListArgs),

    /// Show a single restore by name
    Get {
        /// Restore name
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct RestoresListArgs {
    /// Label selector (e.g. "env=prod,tier in (db,cache),!canary")
    #[arg(long, short = 'l', default_value = "")]
    pub selector: String,

    /// Only restores in this phase (Pending, Scheduled, Started, Complete, Failed, Unknown)
    #[arg(long)]
    pub phase: Option<String>,

    /// Only restores targeting this cluster
    #[arg(long)]
    pub cluster: Option<String>,

    /// Only restores reading from this backup
    #[arg(long)]
    pub backup: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Write a starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
