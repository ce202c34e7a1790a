//! User settings stored in `settings.toml`

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Launcher and logging preferences
///
/// Every field has a default, so a partial or missing file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// SSH client executable
    pub ssh_program: String,
    /// SFTP client executable
    pub sftp_program: String,
    /// Helper that feeds the password from `SSHPASS`
    pub password_helper: String,
    /// When false, `-o StrictHostKeyChecking=no` is passed to the client
    pub strict_host_key_checking: bool,
    /// Default log level (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ssh_program: "ssh".to_string(),
            sftp_program: "sftp".to_string(),
            password_helper: "sshpass".to_string(),
            strict_host_key_checking: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Parses settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on invalid TOML or field types.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads settings from `path`; a missing file yields defaults
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] or [`ConfigError::Parse`].
    pub fn load(path: &Path) -> ConfigResult<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                let settings = Self::from_toml(&content)?;
                tracing::debug!(path = %path.display(), "Settings loaded");
                Ok(settings)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Read(e.to_string())),
        }
    }
}
