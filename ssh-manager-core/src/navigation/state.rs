//! The navigator state machine

use crate::connection::{RegistryService, tree};
use crate::error::LaunchError;
use crate::launch::{LaunchKind, LaunchOutcome, LaunchRequest, launch_error_message};
use crate::models::ConnectionProfile;

use super::display::{DisplayItem, FieldView, ItemKind, ModeView, Snapshot, build_items};
use super::event::NavEvent;
use super::form::{EditBuffer, EditField};

/// Number of handled events a status message survives
pub const MESSAGE_TTL: u8 = 3;

/// Whether an edit creates a profile or changes an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOrigin {
    /// Creating a new profile
    New,
    /// Editing the profile with this name
    Existing(String),
}

/// Coarse mode, for input mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    /// Browsing
    Browse,
    /// Editing a form
    Edit,
    /// Confirming a deletion
    ConfirmDelete,
}

/// What the driver should do after an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Redraw and wait for the next event
    Continue,
    /// Suspend the UI, run the client, then call [`Navigator::finish_launch`]
    Launch(LaunchRequest),
    /// Leave the loop
    Quit,
}

#[derive(Debug)]
struct EditSession {
    origin: EditOrigin,
    buffer: EditBuffer,
    cursor: usize,
    show_password: bool,
}

impl EditSession {
    fn new(origin: EditOrigin, buffer: EditBuffer) -> Self {
        Self {
            origin,
            buffer,
            cursor: 0,
            show_password: false,
        }
    }

    fn field(&self) -> EditField {
        EditField::from_index(self.cursor).unwrap_or(EditField::Name)
    }
}

#[derive(Debug)]
enum Mode {
    Browse,
    Edit(EditSession),
    ConfirmDelete { target: String },
}

#[derive(Debug)]
struct Message {
    text: String,
    remaining: u8,
}

/// Browse/edit/confirm state machine
///
/// Starts in browse mode at the root with the first row selected.
#[derive(Debug)]
pub struct Navigator {
    path: Vec<String>,
    selected: usize,
    mode: Mode,
    message: Option<Message>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Creates a navigator at the root
    pub fn new() -> Self {
        Self {
            path: Vec::new(),
            selected: 0,
            mode: Mode::Browse,
            message: None,
        }
    }

    /// Current group path, `""` at the root
    pub fn path(&self) -> String {
        tree::join_path(&self.path)
    }

    /// Selected row in the browse list
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Coarse current mode
    pub fn mode_kind(&self) -> ModeKind {
        match self.mode {
            Mode::Browse => ModeKind::Browse,
            Mode::Edit(_) => ModeKind::Edit,
            Mode::ConfirmDelete { .. } => ModeKind::ConfirmDelete,
        }
    }

    /// Current status message
    pub fn message(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    /// Processes one event
    ///
    /// Registry errors never escape: they become status messages and the
    /// registry keeps its previous contents. While the form is open its
    /// message stays until the next submit or cancel.
    pub fn handle(&mut self, service: &mut RegistryService, event: NavEvent) -> Outcome {
        if !matches!(self.mode, Mode::Edit(_)) {
            self.age_message();
        }

        match self.mode {
            Mode::Browse => self.handle_browse(service, event),
            Mode::Edit(_) => {
                self.handle_edit(service, event);
                Outcome::Continue
            }
            Mode::ConfirmDelete { .. } => {
                self.handle_confirm(service, event);
                Outcome::Continue
            }
        }
    }

    /// Reports the result of a launch requested through [`Outcome::Launch`]
    pub fn finish_launch(&mut self, request: &LaunchRequest, result: Result<i32, LaunchError>) {
        let text = match result {
            Ok(code) => LaunchOutcome::from_exit_code(code).message(request.kind),
            Err(ref error) => launch_error_message(error, request.profile.has_password()),
        };
        self.set_message(text);
    }

    /// Builds the render view
    pub fn snapshot(&self, service: &RegistryService) -> Snapshot {
        let path = self.path();
        let items = build_items(service, &path);
        let selected = self.selected.min(items.len().saturating_sub(1));

        let mode = match self.mode {
            Mode::Browse => ModeView::Browse,
            Mode::Edit(ref session) => ModeView::Edit {
                title: match session.origin {
                    EditOrigin::New => "Add New Connection",
                    EditOrigin::Existing(_) => "Edit Connection",
                },
                fields: EditField::ALL
                    .iter()
                    .map(|&field| FieldView {
                        field,
                        label: field.label(),
                        value: field_display(session, field),
                    })
                    .collect(),
                cursor: session.cursor,
                show_password: session.show_password,
            },
            Mode::ConfirmDelete { ref target } => ModeView::ConfirmDelete {
                name: target.clone(),
                host: service.find(target).map(|p| p.host.clone()),
            },
        };

        Snapshot {
            path,
            items,
            selected,
            mode,
            message: self.message().map(str::to_string),
        }
    }

    // ========== Browse ==========

    fn handle_browse(&mut self, service: &RegistryService, event: NavEvent) -> Outcome {
        let items = build_items(service, &self.path());
        self.selected = self.selected.min(items.len().saturating_sub(1));

        match event {
            NavEvent::MoveUp => self.selected = self.selected.saturating_sub(1),
            NavEvent::MoveDown => {
                if self.selected + 1 < items.len() {
                    self.selected += 1;
                }
            }
            NavEvent::Activate => match items.get(self.selected).map(|i| &i.kind) {
                Some(ItemKind::Up) => {
                    self.path.pop();
                    self.selected = 0;
                }
                Some(ItemKind::Group { path }) => {
                    self.path = tree::split_path(path)
                        .into_iter()
                        .map(str::to_string)
                        .collect();
                    self.selected = 0;
                }
                Some(ItemKind::Profile(profile)) => self.start_edit(profile),
                None => {}
            },
            NavEvent::StartCreate => {
                let buffer = EditBuffer::new_in_group(&self.path());
                self.mode = Mode::Edit(EditSession::new(EditOrigin::New, buffer));
                self.message = None;
            }
            NavEvent::StartEdit => {
                if let Some(profile) = selected_profile(&items, self.selected) {
                    self.start_edit(profile);
                }
            }
            NavEvent::StartDelete => {
                if let Some(profile) = selected_profile(&items, self.selected) {
                    self.mode = Mode::ConfirmDelete {
                        target: profile.name.clone(),
                    };
                }
            }
            NavEvent::Connect | NavEvent::ConnectSftp => {
                if let Some(profile) = selected_profile(&items, self.selected) {
                    let kind = if event == NavEvent::Connect {
                        self.set_message(format!("Connecting to {}...", profile.host));
                        LaunchKind::Ssh
                    } else {
                        self.set_message(format!("Starting SFTP session with {}...", profile.host));
                        LaunchKind::Sftp
                    };
                    return Outcome::Launch(LaunchRequest::new(kind, profile.clone()));
                }
            }
            NavEvent::Quit => return Outcome::Quit,
            _ => {}
        }
        Outcome::Continue
    }

    fn start_edit(&mut self, profile: &ConnectionProfile) {
        let session = EditSession::new(
            EditOrigin::Existing(profile.name.clone()),
            EditBuffer::from_profile(profile),
        );
        self.mode = Mode::Edit(session);
        self.message = None;
    }

    // ========== Edit ==========

    fn handle_edit(&mut self, service: &mut RegistryService, event: NavEvent) {
        let Mode::Edit(ref mut session) = self.mode else {
            return;
        };

        match event {
            NavEvent::MoveUp => session.cursor = session.cursor.saturating_sub(1),
            NavEvent::MoveDown => {
                if session.cursor + 1 < EditField::ALL.len() {
                    session.cursor += 1;
                }
            }
            NavEvent::AppendChar(c) if !c.is_control() => {
                let field = session.field();
                session.buffer.push(field, c);
            }
            NavEvent::Backspace => {
                let field = session.field();
                session.buffer.pop(field);
            }
            NavEvent::ToggleSecretVisibility => {
                if session.field() == EditField::Password {
                    session.show_password = !session.show_password;
                }
            }
            NavEvent::Cancel => {
                self.mode = Mode::Browse;
                self.message = None;
            }
            NavEvent::Submit => self.submit(service),
            _ => {}
        }
    }

    fn submit(&mut self, service: &mut RegistryService) {
        let Mode::Edit(ref session) = self.mode else {
            return;
        };

        let profile = match session.buffer.to_profile() {
            Ok(profile) => profile,
            Err(e) => {
                self.set_message(format!("Error: {e}"));
                return;
            }
        };

        let name = profile.name.clone();
        let (result, verb) = match session.origin {
            EditOrigin::New => (service.add_or_replace(profile), "Added"),
            EditOrigin::Existing(ref original) => (service.replace(original, profile), "Updated"),
        };

        match result {
            Ok(()) => {
                self.mode = Mode::Browse;
                self.set_message(format!("{verb} connection: {name}"));
                self.settle(service);
            }
            Err(e) => {
                tracing::warn!(error = %e, profile = %name, "Save failed");
                self.set_message(format!("Error: {e}"));
            }
        }
    }

    // ========== Confirm ==========

    fn handle_confirm(&mut self, service: &mut RegistryService, event: NavEvent) {
        let Mode::ConfirmDelete { ref target } = self.mode else {
            return;
        };

        match event {
            NavEvent::Confirm => {
                let target = target.clone();
                self.mode = Mode::Browse;
                match service.remove(&target) {
                    Ok(_) => self.set_message(format!("Deleted connection: {target}")),
                    Err(e) => {
                        tracing::warn!(error = %e, profile = %target, "Delete failed");
                        self.set_message(format!("Error: {e}"));
                    }
                }
                self.settle(service);
            }
            NavEvent::Deny | NavEvent::Cancel => {
                self.mode = Mode::Browse;
                self.set_message("Deletion cancelled".to_string());
            }
            _ => {}
        }
    }

    // ========== Helpers ==========

    /// Prunes the path to the nearest live group and clamps the selection
    fn settle(&mut self, service: &RegistryService) {
        let mut pruned = false;
        while !service.group_exists(&self.path()) {
            self.path.pop();
            pruned = true;
        }
        if pruned {
            self.selected = 0;
        }
        let count = build_items(service, &self.path()).len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    fn set_message(&mut self, text: String) {
        self.message = Some(Message {
            text,
            remaining: MESSAGE_TTL,
        });
    }

    fn age_message(&mut self) {
        if let Some(ref mut message) = self.message {
            message.remaining = message.remaining.saturating_sub(1);
            if message.remaining == 0 {
                self.message = None;
            }
        }
    }
}

fn selected_profile(items: &[DisplayItem], selected: usize) -> Option<&ConnectionProfile> {
    items.get(selected).and_then(DisplayItem::profile)
}

fn field_display(session: &EditSession, field: EditField) -> String {
    let value = session.buffer.value(field);
    if field == EditField::Password && !session.show_password {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    }
}
