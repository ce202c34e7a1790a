//! Configuration management
//!
//! [`ConfigPaths`] resolves where the key, registry, settings and log files
//! live; [`Settings`] holds user preferences loaded from `settings.toml`.

mod paths;
mod settings;

pub use paths::{
    CONFIG_DIR_ENV, ConfigPaths, DEFAULT_DIR_NAME, KEY_FILE_NAME, LOG_FILE_NAME,
    REGISTRY_FILE_NAME, SETTINGS_FILE_NAME,
};
pub use settings::Settings;
