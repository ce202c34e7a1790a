//! Event loop

use crossterm::event::{self, Event};
use ssh_manager_core::RegistryService;
use ssh_manager_core::config::Settings;
use ssh_manager_core::navigation::{Navigator, Outcome};

use super::keymap::map_key;
use super::render;
use super::terminal::TerminalGuard;
use crate::error::CliError;

/// Runs the UI until the user quits
///
/// One key is handled at a time; a launch blocks the loop until the client
/// exits.
pub fn run(service: &mut RegistryService, settings: &Settings) -> Result<(), CliError> {
    let mut guard =
        TerminalGuard::acquire().map_err(|e| CliError::Terminal(format!("Failed to start UI: {e}")))?;
    let mut navigator = Navigator::new();

    loop {
        let snapshot = navigator.snapshot(service);
        guard
            .terminal()
            .draw(|frame| render::draw(frame, &snapshot))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(nav_event) = map_key(navigator.mode_kind(), key) else {
            continue;
        };

        match navigator.handle(service, nav_event) {
            Outcome::Continue => {}
            Outcome::Quit => break,
            Outcome::Launch(request) => {
                let command = request.command(settings);
                tracing::debug!(kind = %request.kind, profile = %request.profile.name, "Suspending UI for client");
                let result = guard.suspend(|| command.run())?;
                if let Err(ref e) = result {
                    tracing::error!(error = %e, "Client launch failed");
                }
                navigator.finish_launch(&request, result);
            }
        }
    }

    tracing::info!("UI closed");
    Ok(())
}
