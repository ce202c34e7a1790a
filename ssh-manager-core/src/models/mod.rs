//! Core data structures
//!
//! The registry stores a flat list of [`ConnectionProfile`]s; groups are
//! derived from their `group` paths (see [`crate::connection::tree`]).

mod profile;

pub use profile::{ConnectionProfile, DEFAULT_SSH_PORT};
