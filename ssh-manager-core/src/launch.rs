//! External SSH/SFTP client launching
//!
//! Builds the command line for a profile and runs it synchronously with the
//! caller's terminal. The password, when present, travels only through the
//! `SSHPASS` environment variable of the child and never appears in `args`.

use std::fmt;
use std::process::Command;

use secrecy::{ExposeSecret, SecretString};

use crate::config::Settings;
use crate::error::LaunchError;
use crate::models::{ConnectionProfile, DEFAULT_SSH_PORT};
use crate::tracing::span_names;

/// Environment variable read by `sshpass -e`
pub const PASSWORD_ENV: &str = "SSHPASS";

/// Exit status `sshpass` reports for a rejected password
pub const AUTH_FAILED_EXIT_CODE: i32 = 6;

/// Which client to launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchKind {
    /// Interactive shell
    Ssh,
    /// File transfer session
    Sftp,
}

impl LaunchKind {
    /// Flag used to pass a non-default port
    #[must_use]
    pub const fn port_flag(self) -> &'static str {
        match self {
            Self::Ssh => "-p",
            Self::Sftp => "-P",
        }
    }

    /// Prefix for user-facing result messages
    const fn label(self) -> &'static str {
        match self {
            Self::Ssh => "Connection",
            Self::Sftp => "SFTP connection",
        }
    }
}

impl fmt::Display for LaunchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ssh => write!(f, "ssh"),
            Self::Sftp => write!(f, "sftp"),
        }
    }
}

/// A request to connect to a profile, emitted by the navigator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    /// Client to launch
    pub kind: LaunchKind,
    /// Profile to connect to
    pub profile: ConnectionProfile,
}

impl LaunchRequest {
    /// Creates a launch request
    pub fn new(kind: LaunchKind, profile: ConnectionProfile) -> Self {
        Self { kind, profile }
    }

    /// Builds the command for this request
    pub fn command(&self, settings: &Settings) -> LaunchCommand {
        LaunchCommand::build(self.kind, &self.profile, settings)
    }
}

/// A fully assembled client invocation
pub struct LaunchCommand {
    program: String,
    args: Vec<String>,
    password: Option<SecretString>,
}

impl LaunchCommand {
    /// Assembles the invocation for `profile`
    ///
    /// Port flag only for non-default ports, `-i` with `~` expanded, then the
    /// `user@host` target. A password wraps the whole command in
    /// `<password_helper> -e`.
    pub fn build(kind: LaunchKind, profile: &ConnectionProfile, settings: &Settings) -> Self {
        let client = match kind {
            LaunchKind::Ssh => settings.ssh_program.clone(),
            LaunchKind::Sftp => settings.sftp_program.clone(),
        };

        let mut client_args = Vec::new();
        if !settings.strict_host_key_checking {
            client_args.push("-o".to_string());
            client_args.push("StrictHostKeyChecking=no".to_string());
        }
        if profile.port != DEFAULT_SSH_PORT {
            client_args.push(kind.port_flag().to_string());
            client_args.push(profile.port.to_string());
        }
        if let Some(ref key_path) = profile.key_path {
            client_args.push("-i".to_string());
            client_args.push(shellexpand::tilde(key_path).into_owned());
        }
        client_args.push(profile.target());

        match profile.password {
            Some(ref password) => {
                let mut args = vec!["-e".to_string(), client];
                args.extend(client_args);
                Self {
                    program: settings.password_helper.clone(),
                    args,
                    password: Some(password.clone()),
                }
            }
            None => Self {
                program: client,
                args: client_args,
                password: None,
            },
        }
    }

    /// Program to execute
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether the password helper is in use
    pub fn uses_password(&self) -> bool {
        self.password.is_some()
    }

    /// Command line suitable for logs; contains no secrets
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    /// Runs the command to completion with inherited stdio
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Spawn`] if the program cannot be started and
    /// [`LaunchError::Signaled`] if it exits without a status code.
    pub fn run(&self) -> Result<i32, LaunchError> {
        let span = tracing::info_span!(span_names::CONNECTION_ESTABLISH, program = %self.program);
        let _guard = span.enter();
        tracing::info!(command = %self.display_line(), "Launching client");

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref password) = self.password {
            cmd.env(PASSWORD_ENV, password.expose_secret());
        }

        let status = cmd.status().map_err(|e| {
            tracing::error!(error = %e, "Client failed to start");
            LaunchError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            }
        })?;

        let code = status.code().ok_or_else(|| LaunchError::Signaled {
            program: self.program.clone(),
        })?;
        tracing::info!(exit_code = code, "Client exited");
        Ok(code)
    }
}

impl fmt::Debug for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LaunchCommand")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Interpretation of a client exit status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Exit status 0
    Closed,
    /// Exit status 6, reported by the password helper
    AuthFailed,
    /// Any other exit status
    Failed(i32),
}

impl LaunchOutcome {
    /// Classifies an exit code
    #[must_use]
    pub const fn from_exit_code(code: i32) -> Self {
        match code {
            0 => Self::Closed,
            AUTH_FAILED_EXIT_CODE => Self::AuthFailed,
            other => Self::Failed(other),
        }
    }

    /// User-facing message for this outcome
    pub fn message(self, kind: LaunchKind) -> String {
        match self {
            Self::Closed => format!("{} closed", kind.label()),
            Self::AuthFailed => "Authentication failed - check username and password".to_string(),
            Self::Failed(code) => format!("{} failed with exit code {code}", kind.label()),
        }
    }
}

/// Message shown when the client could not be launched at all
///
/// With a password the spawned program is the password helper, so a spawn
/// failure names it.
pub fn launch_error_message(error: &LaunchError, used_password: bool) -> String {
    match error {
        LaunchError::Spawn { program, .. } if used_password => {
            format!("{error} (is {program} installed?)")
        }
        _ => error.to_string(),
    }
}
