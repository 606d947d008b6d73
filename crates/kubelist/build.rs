//! Renders `kubelist.1` and one page per subcommand into `$OUT_DIR/man`.

use std::io;
use std::path::PathBuf;

use clap::CommandFactory;

// Only clap and clap_complete are reachable from here; cli.rs must not
// import anything else from the crate.
#[path = "src/cli.rs"]
mod cli;

fn main() -> io::Result<()> {
    println!("cargo::rerun-if-changed=src/cli.rs");

    let Some(out_dir) = std::env::var_os("OUT_DIR") else {
        return Ok(());
    };
    let man_dir = PathBuf::from(out_dir).join("man");
    std::fs::create_dir_all(&man_dir)?;

    // Subcommand pages are named `kubelist-restores-list.1` and so on.
    clap_mangen::generate_to(cli::Cli::command(), &man_dir)
}
