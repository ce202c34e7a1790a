//! Error types for `ssh-manager-core`
//!
//! Each layer owns a `thiserror` enum; [`SshManagerError`] wraps them for
//! callers that only need to report a failure.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the key store
#[derive(Debug, Error)]
pub enum KeyError {
    /// The key file exists but could not be read
    #[error("Failed to read key file {}: {source}", path.display())]
    Read {
        /// Key file location
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The key file could not be created or written
    #[error("Failed to write key file {}: {source}", path.display())]
    Write {
        /// Key file location
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The key file does not contain a valid key
    #[error("Key file {} is invalid: {reason}", path.display())]
    Invalid {
        /// Key file location
        path: PathBuf,
        /// What was wrong with the contents
        reason: String,
    },

    /// The system random number generator failed
    #[error("Failed to generate encryption key")]
    Generate,
}

/// Result type for key store operations
pub type KeyResult<T> = std::result::Result<T, KeyError>;

/// Errors raised by the encrypted registry store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Authentication failed: wrong key, or the blob was tampered with or truncated
    #[error("Failed to decrypt registry: {0}")]
    Decryption(String),

    /// Decryption succeeded but the plaintext is not a valid profile list
    #[error("Registry contents are malformed: {0}")]
    Format(String),

    /// The registry file exists but could not be read
    #[error("Failed to read registry: {0}")]
    Read(String),

    /// Writing the registry failed; the previous file is left in place
    #[error("Failed to persist registry: {0}")]
    Persistence(String),

    /// The profile list could not be serialized or encrypted
    #[error("Failed to serialize registry: {0}")]
    Serialize(String),
}

/// Result type for registry store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A user-entered field failed validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid {field}: {reason}")]
pub struct ValidationError {
    /// Name of the offending field
    pub field: String,
    /// Human-readable reason
    pub reason: String,
}

impl ValidationError {
    /// Creates a validation error for `field`
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while launching the external client
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LaunchError {
    /// The program could not be started (missing binary, permissions)
    #[error("Failed to launch {program}: {message}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// OS error text
        message: String,
    },

    /// The process was terminated by a signal and has no exit code
    #[error("{program} was terminated by a signal")]
    Signaled {
        /// Program that was terminated
        program: String,
    },
}

/// Errors raised while resolving paths or reading settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home directory could be determined for the default config location
    #[error("Could not determine home directory")]
    NoHomeDir,

    /// The config directory could not be created
    #[error("Failed to create config directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The settings file could not be read
    #[error("Failed to read settings: {0}")]
    Read(String),

    /// The settings file is not valid TOML for [`crate::config::Settings`]
    #[error("Failed to parse settings: {0}")]
    Parse(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Umbrella error for the crate
#[derive(Debug, Error)]
pub enum SshManagerError {
    /// Key store error
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Registry store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// External process error
    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// Result type for crate-level operations
pub type Result<T> = std::result::Result<T, SshManagerError>;
