//! Edit form buffer and its conversion to a profile

use std::fmt;

use secrecy::ExposeSecret;
use zeroize::Zeroizing;

use crate::error::ValidationError;
use crate::models::{ConnectionProfile, DEFAULT_SSH_PORT};

/// Editable fields in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    /// Profile name
    Name,
    /// Remote host
    Host,
    /// TCP port
    Port,
    /// Login user
    Username,
    /// Optional password
    Password,
    /// Optional identity file
    KeyPath,
    /// Optional group path
    Group,
}

impl EditField {
    /// All fields, top to bottom
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Host,
        Self::Port,
        Self::Username,
        Self::Password,
        Self::KeyPath,
        Self::Group,
    ];

    /// Field at `index`, if any
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Form label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Host => "Host",
            Self::Port => "Port",
            Self::Username => "Username",
            Self::Password => "Password",
            Self::KeyPath => "Key Path",
            Self::Group => "Group",
        }
    }
}

/// Raw text of every field while editing
///
/// Values are kept exactly as typed; trimming and parsing happen in
/// [`EditBuffer::to_profile`].
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    name: String,
    host: String,
    port: String,
    username: String,
    password: Zeroizing<String>,
    key_path: String,
    group: String,
}

impl EditBuffer {
    /// Empty buffer pre-filled with the group being browsed
    pub fn new_in_group(group: &str) -> Self {
        Self {
            group: group.to_string(),
            ..Self::default()
        }
    }

    /// Buffer pre-filled from an existing profile
    pub fn from_profile(profile: &ConnectionProfile) -> Self {
        Self {
            name: profile.name.clone(),
            host: profile.host.clone(),
            port: profile.port.to_string(),
            username: profile.username.clone(),
            password: Zeroizing::new(
                profile
                    .password
                    .as_ref()
                    .map(|p| p.expose_secret().to_string())
                    .unwrap_or_default(),
            ),
            key_path: profile.key_path.clone().unwrap_or_default(),
            group: profile.group.clone().unwrap_or_default(),
        }
    }

    /// Current text of `field`
    pub fn value(&self, field: EditField) -> &str {
        match field {
            EditField::Name => &self.name,
            EditField::Host => &self.host,
            EditField::Port => &self.port,
            EditField::Username => &self.username,
            EditField::Password => &self.password,
            EditField::KeyPath => &self.key_path,
            EditField::Group => &self.group,
        }
    }

    fn value_mut(&mut self, field: EditField) -> &mut String {
        match field {
            EditField::Name => &mut self.name,
            EditField::Host => &mut self.host,
            EditField::Port => &mut self.port,
            EditField::Username => &mut self.username,
            EditField::Password => &mut self.password,
            EditField::KeyPath => &mut self.key_path,
            EditField::Group => &mut self.group,
        }
    }

    /// Appends `c` to `field`
    pub fn push(&mut self, field: EditField, c: char) {
        self.value_mut(field).push(c);
    }

    /// Removes the last character of `field`
    pub fn pop(&mut self, field: EditField) {
        self.value_mut(field).pop();
    }

    /// Replaces the text of `field`
    pub fn set(&mut self, field: EditField, value: &str) {
        let slot = self.value_mut(field);
        slot.clear();
        slot.push_str(value);
    }

    /// Validates the buffer and builds a profile
    ///
    /// `name`, `host`, `username`, `key_path` and `group` are trimmed. An
    /// empty port means 22; empty optional fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn to_profile(&self) -> Result<ConnectionProfile, ValidationError> {
        let port = parse_port(&self.port)?;

        let mut profile =
            ConnectionProfile::new(self.name.trim(), self.host.trim(), self.username.trim())
                .with_port(port);
        if !self.password.is_empty() {
            profile = profile.with_password(self.password.as_str());
        }
        let key_path = self.key_path.trim();
        if !key_path.is_empty() {
            profile = profile.with_key_path(key_path);
        }
        let group = self.group.trim();
        if !group.is_empty() {
            profile = profile.with_group(group);
        }

        profile.validate()?;
        Ok(profile)
    }
}

fn parse_port(raw: &str) -> Result<u16, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_SSH_PORT);
    }
    match raw.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ValidationError::new(
            "port",
            format!("'{raw}' is not a number between 1 and 65535"),
        )),
    }
}

impl fmt::Debug for EditBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditBuffer")
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("key_path", &self.key_path)
            .field("group", &self.group)
            .finish()
    }
}
