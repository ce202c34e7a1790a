//! Render-ready view of the navigator
//!
//! Renderers consume [`Snapshot`]s only; nothing here borrows the registry.

use crate::connection::{RegistryService, tree};
use crate::models::ConnectionProfile;

use super::form::EditField;

/// Label of the item leading back to the parent group
pub const UP_LABEL: &str = "..";

/// What a list row stands for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKind {
    /// Back to the parent group
    Up,
    /// A child group
    Group {
        /// Full group path
        path: String,
    },
    /// A profile in the current group
    Profile(ConnectionProfile),
}

/// One row of the browse list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Text shown to the user
    pub label: String,
    /// Backing data
    pub kind: ItemKind,
}

impl DisplayItem {
    /// The backing profile, if this row is one
    pub fn profile(&self) -> Option<&ConnectionProfile> {
        match self.kind {
            ItemKind::Profile(ref profile) => Some(profile),
            _ => None,
        }
    }
}

/// Builds the browse list for `path`
///
/// `..` first when below the root, then child groups by path as
/// `"<leaf> (<count>)"`, then profiles by name as `"<name> (<host>)"`.
pub fn build_items(service: &RegistryService, path: &str) -> Vec<DisplayItem> {
    let mut items = Vec::new();

    if !path.is_empty() {
        items.push(DisplayItem {
            label: UP_LABEL.to_string(),
            kind: ItemKind::Up,
        });
    }

    for group in service.child_groups(path) {
        items.push(DisplayItem {
            label: format!("{} ({})", tree::leaf_name(&group), service.item_count(&group)),
            kind: ItemKind::Group { path: group },
        });
    }

    let mut profiles = service.profiles_in(path);
    profiles.sort_by(|a, b| a.name.cmp(&b.name));
    items.extend(profiles.into_iter().map(|profile| DisplayItem {
        label: format!("{} ({})", profile.name, profile.host),
        kind: ItemKind::Profile(profile.clone()),
    }));

    items
}

/// One row of the edit form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Which field
    pub field: EditField,
    /// Form label
    pub label: &'static str,
    /// Displayed value; the password is masked unless revealed
    pub value: String,
}

/// Mode-specific part of a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeView {
    /// Browsing the list
    Browse,
    /// Editing a profile
    Edit {
        /// Form title
        title: &'static str,
        /// Fields in display order
        fields: Vec<FieldView>,
        /// Index of the focused field
        cursor: usize,
        /// Whether the password is shown in clear
        show_password: bool,
    },
    /// Waiting for delete confirmation
    ConfirmDelete {
        /// Profile name
        name: String,
        /// Profile host, when the profile still exists
        host: Option<String>,
    },
}

/// Everything a renderer needs after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Current group path, `""` at the root
    pub path: String,
    /// Browse list for `path`
    pub items: Vec<DisplayItem>,
    /// Selected row
    pub selected: usize,
    /// Mode view
    pub mode: ModeView,
    /// Transient status message
    pub message: Option<String>,
}

impl Snapshot {
    /// The selected row
    pub fn selected_item(&self) -> Option<&DisplayItem> {
        self.items.get(self.selected)
    }
}
