//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::Parser;
use ssh_manager_core::config::CONFIG_DIR_ENV;

/// Encrypted SSH connection manager with a terminal UI
#[derive(Debug, Parser)]
#[command(name = "ssh-manager")]
#[command(author, version, about = "Encrypted SSH connection manager")]
pub struct Cli {
    /// Path to the configuration directory
    #[arg(short, long, env = CONFIG_DIR_ENV)]
    pub config_dir: Option<PathBuf>,

    /// Print the decrypted registry (passwords masked) and exit
    #[arg(long)]
    pub show_config: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress warnings and error messages; failures still set the exit status
    #[arg(short, long)]
    pub quiet: bool,
}
