//! Key bindings per mode

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ssh_manager_core::navigation::{ModeKind, NavEvent};

/// Translates a key press into a navigation event for `mode`
///
/// Browse: arrows, Enter, `a`dd, `e`dit, `d`elete, `c`onnect, `s`ftp, `q`uit.
/// Edit: arrows or Tab to move, Enter saves, Esc cancels, Ctrl+T reveals the
/// password. Confirm: `y` deletes, `n` or Esc cancels. Ctrl+C quits from
/// browse and cancels elsewhere.
pub fn map_key(mode: ModeKind, key: KeyEvent) -> Option<NavEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(match mode {
            ModeKind::Browse => NavEvent::Quit,
            ModeKind::Edit | ModeKind::ConfirmDelete => NavEvent::Cancel,
        });
    }

    match mode {
        ModeKind::Browse => map_browse(key),
        ModeKind::Edit => map_edit(key, ctrl),
        ModeKind::ConfirmDelete => map_confirm(key),
    }
}

fn map_browse(key: KeyEvent) -> Option<NavEvent> {
    let event = match key.code {
        KeyCode::Up => NavEvent::MoveUp,
        KeyCode::Down => NavEvent::MoveDown,
        KeyCode::Enter => NavEvent::Activate,
        KeyCode::Char('a') => NavEvent::StartCreate,
        KeyCode::Char('e') => NavEvent::StartEdit,
        KeyCode::Char('d') => NavEvent::StartDelete,
        KeyCode::Char('c') => NavEvent::Connect,
        KeyCode::Char('s') => NavEvent::ConnectSftp,
        KeyCode::Char('q') => NavEvent::Quit,
        _ => return None,
    };
    Some(event)
}

fn map_edit(key: KeyEvent, ctrl: bool) -> Option<NavEvent> {
    let event = match key.code {
        KeyCode::Char('t') if ctrl => NavEvent::ToggleSecretVisibility,
        KeyCode::Up | KeyCode::BackTab => NavEvent::MoveUp,
        KeyCode::Down | KeyCode::Tab => NavEvent::MoveDown,
        KeyCode::Enter => NavEvent::Submit,
        KeyCode::Esc => NavEvent::Cancel,
        KeyCode::Backspace => NavEvent::Backspace,
        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            NavEvent::AppendChar(c)
        }
        _ => return None,
    };
    Some(event)
}

fn map_confirm(key: KeyEvent) -> Option<NavEvent> {
    let event = match key.code {
        KeyCode::Char('y' | 'Y') => NavEvent::Confirm,
        KeyCode::Char('n' | 'N') => NavEvent::Deny,
        KeyCode::Esc => NavEvent::Cancel,
        _ => return None,
    };
    Some(event)
}
