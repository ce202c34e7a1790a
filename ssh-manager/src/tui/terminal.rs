//! Raw-mode terminal ownership

use std::io::{self, Stdout};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Terminal type drawn by the UI
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Holds the terminal in raw mode on the alternate screen
///
/// Dropping the guard restores the normal screen, including on panic
/// unwinding or early return.
pub struct TerminalGuard {
    terminal: Tui,
    active: bool,
}

impl TerminalGuard {
    /// Enters raw mode and the alternate screen
    pub fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            disable_raw_mode().ok();
            return Err(e);
        }
        let mut guard = Self {
            terminal: Terminal::new(CrosstermBackend::new(stdout))?,
            active: true,
        };
        guard.terminal.hide_cursor()?;
        guard.terminal.clear()?;
        Ok(guard)
    }

    /// The underlying ratatui terminal
    pub fn terminal(&mut self) -> &mut Tui {
        &mut self.terminal
    }

    /// Hands the real terminal to `f`, then takes it back
    ///
    /// Used around the external SSH/SFTP client, which needs cooked mode and
    /// the primary screen.
    pub fn suspend<T>(&mut self, f: impl FnOnce() -> T) -> io::Result<T> {
        self.leave()?;
        let output = f();
        self.enter()?;
        Ok(output)
    }

    fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }

    fn enter(&mut self) -> io::Result<()> {
        if self.active {
            return Ok(());
        }
        execute!(self.terminal.backend_mut(), EnterAlternateScreen)?;
        enable_raw_mode()?;
        self.active = true;
        self.terminal.hide_cursor()?;
        self.terminal.clear()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = self.leave() {
            tracing::warn!(error = %e, "Failed to restore terminal");
        }
    }
}
