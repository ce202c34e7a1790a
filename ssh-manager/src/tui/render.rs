//! Snapshot rendering

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ssh_manager_core::navigation::{EditField, FieldView, ItemKind, ModeView, Snapshot};

const APP_TITLE: &str = "SSH Manager";
const BROWSE_HELP: &str = "↑↓: Navigate | c: Connect | s: SFTP | a: Add | e: Edit | d: Delete | q: Quit";
const EDIT_HELP: &str = "Enter: Save | Esc: Cancel | ↑↓: Navigate";
const CONFIRM_HELP: &str = "y: Delete | n/Esc: Cancel";
const EMPTY_HINT: &str = "No items found. Press 'a' to add a connection.";
const PASSWORD_HINT: &str = "Press Ctrl+T to toggle password visibility";

fn text_style() -> Style {
    Style::default().fg(Color::White)
}

fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn help_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Draws one frame for `snapshot`
pub fn draw(frame: &mut Frame, snapshot: &Snapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let (title, help) = match snapshot.mode {
        ModeView::Browse => (browse_title(&snapshot.path), BROWSE_HELP),
        ModeView::Edit { title, .. } => (title.to_string(), EDIT_HELP),
        ModeView::ConfirmDelete { .. } => (browse_title(&snapshot.path), CONFIRM_HELP),
    };

    frame.render_widget(
        Paragraph::new(title)
            .style(text_style().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        chunks[0],
    );

    match snapshot.mode {
        ModeView::Browse => draw_list(frame, chunks[1], snapshot),
        ModeView::Edit {
            ref fields,
            cursor,
            ..
        } => draw_form(frame, chunks[1], fields, cursor),
        ModeView::ConfirmDelete { ref name, ref host } => {
            let prompt = match host {
                Some(host) => format!("Delete connection '{name}' ({host})? [y/N]"),
                None => format!("Delete connection '{name}'? [y/N]"),
            };
            frame.render_widget(Paragraph::new(prompt).style(text_style()), chunks[1]);
        }
    }

    if let Some(ref message) = snapshot.message {
        frame.render_widget(Paragraph::new(message.as_str()).style(text_style()), chunks[2]);
    }
    frame.render_widget(Paragraph::new(help).style(help_style()), chunks[3]);
}

fn browse_title(path: &str) -> String {
    if path.is_empty() {
        APP_TITLE.to_string()
    } else {
        format!("{APP_TITLE} - {path}")
    }
}

fn draw_list(frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
    if snapshot.items.is_empty() {
        frame.render_widget(Paragraph::new(EMPTY_HINT).style(text_style()), area);
        return;
    }

    let items: Vec<ListItem> = snapshot
        .items
        .iter()
        .map(|item| {
            let text = match item.kind {
                ItemKind::Group { .. } => format!("[{}]", item.label),
                ItemKind::Up | ItemKind::Profile(_) => item.label.clone(),
            };
            ListItem::new(text)
        })
        .collect();

    let list = List::new(items)
        .style(text_style())
        .highlight_style(selected_style())
        .highlight_symbol("> ");
    let mut state = ListState::default().with_selected(Some(snapshot.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_form(frame: &mut Frame, area: Rect, fields: &[FieldView], cursor: usize) {
    let mut lines = Vec::with_capacity(fields.len() * 2);
    for (index, field) in fields.iter().enumerate() {
        let focused = index == cursor;
        let value_style = if focused { selected_style() } else { text_style() };
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", field.label), text_style()),
            Span::styled(field.value.clone(), value_style),
        ]));
        if focused && field.field == EditField::Password {
            lines.push(Line::from(Span::styled(PASSWORD_HINT, help_style())));
        } else {
            lines.push(Line::default());
        }
    }
    frame.render_widget(Paragraph::new(lines), area);
}
