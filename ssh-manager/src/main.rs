//! `SSH Manager` - Terminal interface for an encrypted SSH connection registry
//!
//! Without flags, opens the full-screen browser. `--show-config` prints the
//! decrypted registry with passwords masked.

mod cli;
mod commands;
mod error;
mod tui;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = commands::dispatch(&cli);

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(e.exit_code());
    }
}
