//! Command handler modules for the CLI.

mod browse;
mod show_config;

use ssh_manager_core::config::{ConfigPaths, Settings};
use ssh_manager_core::tracing::{LOG_FILTER_ENV, TracingConfig, TracingLevel, init_tracing};

use crate::cli::Cli;
use crate::error::CliError;

/// Resolve the config directory, start logging, and run the selected mode.
pub fn dispatch(cli: &Cli) -> Result<(), CliError> {
    let paths = ConfigPaths::resolve(cli.config_dir.as_deref())?;
    paths.ensure_dir()?;
    let settings = Settings::load(&paths.settings_file())?;

    init_logging(cli, &paths, &settings);

    if cli.show_config {
        show_config::cmd_show_config(&paths)
    } else {
        browse::cmd_browse(&paths, &settings)
    }
}

/// Log to `<config_dir>/ssh-manager.log`; the terminal belongs to the UI.
///
/// `RUST_LOG`, when set, replaces the level derived from settings and flags.
fn init_logging(cli: &Cli, paths: &ConfigPaths, settings: &Settings) {
    let base = settings.log_level.parse().unwrap_or_default();
    let level = if cli.quiet {
        TracingLevel::Error
    } else {
        TracingLevel::raised(base, cli.verbose)
    };

    let config = TracingConfig::new(paths.log_file())
        .with_level(level)
        .with_filter(std::env::var(LOG_FILTER_ENV).ok());

    if let Err(e) = init_tracing(&config) {
        if !cli.quiet {
            eprintln!("Warning: logging disabled: {e}");
        }
    }
}
