//! CLI error types and exit codes.

use ssh_manager_core::error::{ConfigError, SshManagerError, StoreError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, key file, terminal, or I/O failures
    pub const GENERAL_ERROR: i32 = 1;
    /// The registry exists but could not be decrypted or parsed
    pub const REGISTRY_ERROR: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key file error
    #[error("Key error: {0}")]
    Key(String),

    /// Registry could not be decrypted or parsed
    #[error("{0}")]
    Registry(String),

    /// Registry could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Terminal setup or drawing failed
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SshManagerError> for CliError {
    fn from(err: SshManagerError) -> Self {
        match err {
            SshManagerError::Key(e) => Self::Key(e.to_string()),
            SshManagerError::Store(e @ (StoreError::Decryption(_) | StoreError::Format(_))) => {
                Self::Registry(e.to_string())
            }
            SshManagerError::Store(e) => Self::Storage(e.to_string()),
            SshManagerError::Config(e) => Self::Config(e.to_string()),
            SshManagerError::Validation(e) => Self::Config(e.to_string()),
            SshManagerError::Launch(e) => Self::Terminal(e.to_string()),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, key file, storage, terminal, IO)
    /// - 2: Registry could not be decrypted or parsed
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Registry(_) => exit_codes::REGISTRY_ERROR,
            Self::Config(_) | Self::Key(_) | Self::Storage(_) | Self::Terminal(_) | Self::Io(_) => {
                exit_codes::GENERAL_ERROR
            }
        }
    }
}
