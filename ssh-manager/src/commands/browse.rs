//! Interactive browser command.

use ssh_manager_core::RegistryService;
use ssh_manager_core::config::{ConfigPaths, Settings};

use crate::error::CliError;
use crate::tui;

/// Browse command handler
///
/// The registry is opened before the terminal is touched so key and
/// decryption failures are reported on a normal screen.
pub fn cmd_browse(paths: &ConfigPaths, settings: &Settings) -> Result<(), CliError> {
    let mut service = RegistryService::open(paths)?;
    tui::run(&mut service, settings)
}
