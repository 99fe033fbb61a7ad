// src/bin/spycon.rs

use anyhow::Result;
use clap::Parser;
use colored::*;
use spycon::{
    cli::{Cli, console::Console, handlers},
    core::paths,
    state::Session,
};
use std::io;

/// The main entry point of `spycon`.
/// Sets up logging, parses arguments, runs the console and handles fatal errors in one place.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        // Only startup failures (working directory, settings, aliases) and a broken
        // terminal end up here; command failures are handled inside the loop.
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let root = paths::resolve_workdir(cli.workdir.as_deref())?;
    log::info!("Working directory: {}", root.display());

    let session = Session::load(root)?;
    let mut console = Console::new(session, &handlers::builtin_commands());
    console.run(io::stdin().lock())
}
