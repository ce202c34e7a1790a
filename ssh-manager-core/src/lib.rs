//! `SSH Manager` Core Library
//!
//! This crate provides the core functionality for the `ssh-manager` terminal
//! application: an encrypted registry of SSH connection profiles organised in
//! a slash-delimited group hierarchy, plus the navigation state machine that
//! drives the UI.
//!
//! # Crate Structure
//!
//! - [`models`] - Connection profile data structure
//! - [`storage`] - Key file and AES-256-GCM encrypted registry file
//! - [`connection`] - Registry CRUD service and derived group tree
//! - [`navigation`] - Browse/edit/confirm state machine and render snapshots
//! - [`launch`] - SSH/SFTP command assembly and execution
//! - [`config`] - Config directory resolution and user settings
//! - [`tracing`] - Structured logging setup

// Enable missing_docs warning for public API documentation
#![warn(missing_docs)]

pub mod config;
pub mod connection;
pub mod error;
pub mod launch;
pub mod models;
pub mod navigation;
pub mod storage;
pub mod tracing;

pub use config::{ConfigPaths, Settings};
pub use connection::RegistryService;
pub use error::{
    ConfigError, ConfigResult, KeyError, KeyResult, LaunchError, Result, SshManagerError,
    StoreError, StoreResult, ValidationError,
};
pub use launch::{LaunchCommand, LaunchKind, LaunchOutcome, LaunchRequest};
pub use models::{ConnectionProfile, DEFAULT_SSH_PORT};
pub use navigation::{
    DisplayItem, EditField, EditOrigin, ItemKind, ModeKind, ModeView, NavEvent, Navigator,
    Outcome, Snapshot,
};
pub use storage::{EncryptionKey, KeyStore, RegistryStore};
pub use tracing::{LOG_FILTER_ENV, TracingConfig, TracingError, TracingLevel, init_tracing};
