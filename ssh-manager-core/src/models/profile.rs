//! Connection profile model

use std::fmt;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::connection::tree;
use crate::error::ValidationError;

/// Port used when a profile does not specify one
pub const DEFAULT_SSH_PORT: u16 = 22;

const fn default_port() -> u16 {
    DEFAULT_SSH_PORT
}

/// A named remote target
///
/// `name` is the primary key of the registry. `password` and `key_path` are
/// both optional; when neither is set the external client prompts on its own.
#[derive(Clone, Serialize, Deserialize)]
pub struct ConnectionProfile {
    /// Unique name across the whole registry
    pub name: String,
    /// Remote host name or address
    pub host: String,
    /// Remote port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Login user
    pub username: String,
    /// Inline password, delivered to the client through the password helper
    #[serde(default, with = "secret_serde")]
    pub password: Option<SecretString>,
    /// Identity file passed as `-i`
    #[serde(default)]
    pub key_path: Option<String>,
    /// `/`-delimited group path; `None` places the profile at the root
    #[serde(default)]
    pub group: Option<String>,
}

impl ConnectionProfile {
    /// Creates a profile on the default port with no credentials or group
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        username: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port: DEFAULT_SSH_PORT,
            username: username.into(),
            password: None,
            key_path: None,
            group: None,
        }
    }

    /// Sets the port
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the inline password
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Sets the identity file path
    #[must_use]
    pub fn with_key_path(mut self, key_path: impl Into<String>) -> Self {
        self.key_path = Some(key_path.into());
        self
    }

    /// Sets the group path
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Group path, or `""` for ungrouped profiles
    pub fn group_path(&self) -> &str {
        self.group.as_deref().unwrap_or("")
    }

    /// Group path split into segments
    pub fn group_parts(&self) -> Vec<&str> {
        tree::split_path(self.group_path())
    }

    /// Whether an inline password is stored
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// `username@host` target string
    pub fn target(&self) -> String {
        format!("{}@{}", self.username, self.host)
    }

    /// Checks the profile invariants
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }
        if self.host.trim().is_empty() {
            return Err(ValidationError::new("host", "must not be empty"));
        }
        if self.port == 0 {
            return Err(ValidationError::new("port", "must be between 1 and 65535"));
        }
        if self.username.trim().is_empty() {
            return Err(ValidationError::new("username", "must not be empty"));
        }
        if let Some(ref group) = self.group {
            tree::validate_group_path(group)?;
        }
        Ok(())
    }
}

impl PartialEq for ConnectionProfile {
    fn eq(&self, other: &Self) -> bool {
        let password_eq = match (&self.password, &other.password) {
            (Some(a), Some(b)) => a.expose_secret() == b.expose_secret(),
            (None, None) => true,
            _ => false,
        };
        self.name == other.name
            && self.host == other.host
            && self.port == other.port
            && self.username == other.username
            && password_eq
            && self.key_path == other.key_path
            && self.group == other.group
    }
}

impl Eq for ConnectionProfile {}

impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("key_path", &self.key_path)
            .field("group", &self.group)
            .finish()
    }
}

/// Serializes `Option<SecretString>` as a plain optional string
///
/// The registry blob is encrypted as a whole, so the password is written in
/// the clear inside the plaintext.
mod secret_serde {
    use secrecy::{ExposeSecret, SecretString};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<SecretString>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value
            .as_ref()
            .map(|secret| secret.expose_secret())
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<SecretString>, D::Error> {
        Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
    }
}
