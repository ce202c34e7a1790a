//! Logging setup
//!
//! The terminal UI owns stdout and stderr, so events are appended to a log
//! file under the config directory. Profiles are identified by name only;
//! passwords never reach a span or an event.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable whose directives replace the level-based filter
pub const LOG_FILTER_ENV: &str = EnvFilter::DEFAULT_ENV;

/// Logging setup failures
#[derive(Debug, Error)]
pub enum TracingError {
    /// The filter directives did not parse
    #[error("invalid log filter '{filter}': {message}")]
    InvalidFilter {
        /// Directives as given
        filter: String,
        /// Parser message
        message: String,
    },

    /// The log file could not be opened for appending
    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        /// Log file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A global subscriber is already installed
    #[error("logging already initialized: {0}")]
    Install(String),
}

/// Result type for logging setup
pub type TracingResult<T> = Result<T, TracingError>;

/// Verbosity of the crate's own targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TracingLevel {
    /// Failures only
    Error,
    /// Failures and recoverable oddities
    Warn,
    /// Registry changes and launches
    #[default]
    Info,
    /// Store internals
    Debug,
    /// Everything
    Trace,
}

impl TracingLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Raises the level by `steps` (each `-v` on the command line)
    #[must_use]
    pub const fn raised(self, steps: u8) -> Self {
        let mut level = self;
        let mut remaining = steps;
        while remaining > 0 {
            level = match level {
                Self::Error => Self::Warn,
                Self::Warn => Self::Info,
                Self::Info => Self::Debug,
                Self::Debug | Self::Trace => Self::Trace,
            };
            remaining -= 1;
        }
        level
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where and how much to log
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level applied to the `ssh_manager` and `ssh_manager_core` targets
    pub level: TracingLevel,
    /// File the events are appended to
    pub log_file: PathBuf,
    /// `EnvFilter` directives that take precedence over `level`
    pub filter: Option<String>,
}

impl TracingConfig {
    /// Logs at the default level to `log_file`
    #[must_use]
    pub fn new(log_file: impl Into<PathBuf>) -> Self {
        Self {
            level: TracingLevel::default(),
            log_file: log_file.into(),
            filter: None,
        }
    }

    /// Sets the level for the crate's targets
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Uses explicit filter directives; blank input keeps the level filter
    #[must_use]
    pub fn with_filter(mut self, directives: Option<String>) -> Self {
        self.filter = directives.filter(|d| !d.trim().is_empty());
        self
    }

    fn directives(&self) -> String {
        self.filter.clone().unwrap_or_else(|| {
            format!(
                "ssh_manager={level},ssh_manager_core={level}",
                level = self.level
            )
        })
    }

    fn env_filter(&self) -> TracingResult<EnvFilter> {
        let directives = self.directives();
        EnvFilter::try_new(&directives).map_err(|e| TracingError::InvalidFilter {
            filter: directives,
            message: e.to_string(),
        })
    }
}

/// Installs the global subscriber
///
/// # Errors
///
/// Returns an error if the filter does not parse, the log file cannot be
/// opened, or a subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    let filter = config.env_filter()?;

    let mut options = OpenOptions::new();
    options.create(true).append(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let file = options
        .open(&config.log_file)
        .map_err(|source| TracingError::LogFile {
            path: config.log_file.clone(),
            source,
        })?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|e| TracingError::Install(e.to_string()))?;

    tracing::info!(filter = %config.directives(), "Logging initialized");
    Ok(())
}

/// Standard span names
pub mod span_names {
    /// Connection establishment span
    pub const CONNECTION_ESTABLISH: &str = "connection.establish";
    /// Registry load span
    pub const CONFIG_LOAD: &str = "config.load";
    /// Registry save span
    pub const CONFIG_SAVE: &str = "config.save";
}
