//! Config directory layout

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "SSH_MANAGER_CONFIG_DIR";
/// Default directory name under the home directory
pub const DEFAULT_DIR_NAME: &str = ".ssh-manager";
/// Key file name
pub const KEY_FILE_NAME: &str = ".key";
/// Encrypted registry file name
pub const REGISTRY_FILE_NAME: &str = "config.json";
/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "settings.toml";
/// Log file name
pub const LOG_FILE_NAME: &str = "ssh-manager.log";

/// Files under the config directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    dir: PathBuf,
}

impl ConfigPaths {
    /// Uses an explicit config directory
    pub fn with_config_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolves the config directory
    ///
    /// Order: `explicit`, then `$SSH_MANAGER_CONFIG_DIR`, then
    /// `~/.ssh-manager`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoHomeDir`] when falling back to the default
    /// and no home directory is known.
    pub fn resolve(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(dir) = explicit {
            return Ok(Self::with_config_dir(dir));
        }
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_config_dir(dir));
        }
        dirs::home_dir()
            .map(|home| Self::with_config_dir(home.join(DEFAULT_DIR_NAME)))
            .ok_or(ConfigError::NoHomeDir)
    }

    /// The config directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Key file path
    pub fn key_file(&self) -> PathBuf {
        self.dir.join(KEY_FILE_NAME)
    }

    /// Encrypted registry path
    pub fn registry_file(&self) -> PathBuf {
        self.dir.join(REGISTRY_FILE_NAME)
    }

    /// Settings file path
    pub fn settings_file(&self) -> PathBuf {
        self.dir.join(SETTINGS_FILE_NAME)
    }

    /// Log file path
    pub fn log_file(&self) -> PathBuf {
        self.dir.join(LOG_FILE_NAME)
    }

    /// Creates the config directory with owner-only permissions
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::CreateDir`] if the directory cannot be created.
    pub fn ensure_dir(&self) -> ConfigResult<()> {
        crate::storage::ensure_private_dir(&self.dir).map_err(|source| ConfigError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }
}
