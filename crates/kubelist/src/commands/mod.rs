//! Command dispatch: bridges CLI args -> typed listers -> output formatting.

pub mod config_cmd;
pub mod restores;

use kubelist_core::MemoryStore;

use crate::cli::{Command, GlobalOpts};
use crate::config::Resolved;
use crate::error::CliError;

/// Dispatch a store-bound command to the appropriate handler.
pub fn dispatch(
    cmd: Command,
    store: &MemoryStore,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Restores(args) => restores::handle(store, args, resolved, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
