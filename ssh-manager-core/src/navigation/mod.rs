//! Browse/edit/confirm state machine
//!
//! The [`Navigator`] consumes abstract [`NavEvent`]s, mutates the registry
//! through [`crate::connection::RegistryService`], and exposes a
//! [`Snapshot`] for rendering. It knows nothing about terminals or keys.

mod display;
mod event;
mod form;
mod state;

pub use display::{DisplayItem, FieldView, ItemKind, ModeView, Snapshot, build_items};
pub use event::NavEvent;
pub use form::{EditBuffer, EditField};
pub use state::{EditOrigin, MESSAGE_TTL, ModeKind, Navigator, Outcome};
