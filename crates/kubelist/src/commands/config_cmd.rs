//! Config subcommand handlers.

use std::path::PathBuf;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

/// Starter config written by `config init`.
fn starter_config() -> Config {
    let mut cfg = Config::default();
    cfg.profiles.insert(
        "default".into(),
        Profile {
            sources: vec![PathBuf::from("restores.yaml")],
            namespace: None,
        },
    );
    cfg
}

fn render_toml(cfg: &Config) -> Result<String, CliError> {
    toml::to_string_pretty(cfg).map_err(|e| CliError::Validation {
        field: "config".into(),
        reason: format!("failed to serialize config: {e}"),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::effective_path(global);

    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let mut out = format!("# {}\n", path.display());
            out.push_str(&render_toml(&cfg)?);
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&path.display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::Validation {
                    field: "config".into(),
                    reason: format!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    ),
                });
            }
            config::save_config_to(&starter_config(), &path)?;
            if !global.quiet {
                eprintln!("✓ Wrote {}", path.display());
            }
            Ok(())
        }
    }
}
