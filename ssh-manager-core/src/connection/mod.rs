//! Connection registry
//!
//! [`RegistryService`] is the CRUD API over profiles with persistence through
//! [`crate::storage::RegistryStore`]. The [`tree`] module derives the group
//! hierarchy from profile group paths.

mod registry;
pub mod tree;

pub use registry::RegistryService;
