//! # Logging Infrastructure
//!
//! Structured logging with `tracing` for the `txforge` binary.
//!
//! The library crates only emit events; this module installs the subscriber.
//! Events go to stderr so command output on stdout stays machine-readable.
//! A daily-rotated file can be added on top.
//!
//! ## Quick Start
//!
//! ```no_run
//! use txforge::logging::{init_logging, LogConfig};
//!
//! let _guard = init_logging(&LogConfig::default()).expect("logging init");
//! tracing::info!("ready");
//! ```
//!
//! ## From the configuration file
//!
//! ```
//! use txforge::logging::{LogConfig, LogFormat, LogLevel};
//! use txforge_core::Config;
//!
//! let mut config = Config::default();
//! config.logging.format = "json".to_string();
//!
//! // `-vv` on the command line wins over the file's level.
//! let log_config = LogConfig::from_config(&config.logging, 2).unwrap();
//! assert_eq!(log_config.level, LogLevel::Debug);
//! assert_eq!(log_config.format, LogFormat::Json);
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use tracing::{Level, Subscriber};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};
use txforge_core::config::LoggingConfig;
use txforge_core::config_loader::expand_path;

/// File name of the daily-rotated log, inside [`LogConfig::directory`].
pub const LOG_FILE_NAME: &str = "txforge.log";

/// Error type for logging initialization failures.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Failed to create the log directory.
    #[error("Failed to create log directory: {0}")]
    DirectoryCreation(String),
    /// Failed to initialize the subscriber.
    #[error("Failed to initialize logging: {0}")]
    SubscriberInit(String),
    /// Invalid configuration.
    #[error("Invalid log configuration: {0}")]
    InvalidConfig(String),
}

/// Minimum severity of logged events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// trace and above
    Trace,
    /// debug and above
    Debug,
    /// info and above
    #[default]
    Info,
    /// warn and above
    Warn,
    /// error only
    Error,
}

impl LogLevel {
    /// Convert to tracing Level.
    #[must_use]
    pub const fn as_tracing_level(self) -> Level {
        match self {
            Self::Trace => Level::TRACE,
            Self::Debug => Level::DEBUG,
            Self::Info => Level::INFO,
            Self::Warn => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }

    /// Get the string representation for env filter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(LogError::InvalidConfig(format!("unknown level '{other}'"))),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
    /// Single-line output.
    Compact,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(LogError::InvalidConfig(format!("unknown format '{other}'"))),
        }
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    /// Minimum level. Defaults to [`LogLevel::Info`].
    pub level: LogLevel,

    /// Output format. Defaults to [`LogFormat::Pretty`].
    pub format: LogFormat,

    /// Directory for [`LOG_FILE_NAME`], rotated daily. Created if missing.
    pub directory: Option<PathBuf>,
}

impl LogConfig {
    /// Build from the `[logging]` section of the configuration file.
    ///
    /// A non-zero `verbosity` (the count of `-v` flags) overrides the file's
    /// level through [`verbosity_to_level`].
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidConfig`] for an unknown level or format,
    /// or a log directory whose `~` cannot be expanded.
    pub fn from_config(logging: &LoggingConfig, verbosity: u8) -> Result<Self, LogError> {
        let level = if verbosity > 0 {
            verbosity_to_level(verbosity)
        } else {
            logging.level.parse()?
        };
        let directory = logging
            .file
            .as_deref()
            .map(expand_path)
            .transpose()
            .map_err(|e| LogError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            level,
            format: logging.format.parse()?,
            directory,
        })
    }
}

/// Guard that flushes the log file on drop.
///
/// Keep it alive for the lifetime of the program.
pub struct LogGuard {
    guard: Option<WorkerGuard>,
}

impl LogGuard {
    const fn new(guard: Option<WorkerGuard>) -> Self {
        Self { guard }
    }
}

impl std::fmt::Debug for LogGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogGuard")
            .field("has_file_guard", &self.guard.is_some())
            .finish()
    }
}

/// Initialize the global subscriber.
///
/// `RUST_LOG`, when set, takes precedence over [`LogConfig::level`].
///
/// # Errors
///
/// Returns [`LogError`] if the log directory cannot be created or a
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<LogGuard, LogError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.level.as_str()))
        .map_err(|e| LogError::InvalidConfig(e.to_string()))?;

    let (file_writer, guard) = match config.directory {
        Some(ref dir) => {
            std::fs::create_dir_all(dir)
                .map_err(|e| LogError::DirectoryCreation(format!("{}: {e}", dir.display())))?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer(config.format))
        .with(file_writer.map(|writer| file_layer(config.format, writer)))
        .try_init()
        .map_err(|e| LogError::SubscriberInit(e.to_string()))?;

    Ok(LogGuard::new(guard))
}

fn stderr_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
    match format {
        LogFormat::Pretty => layer.pretty().boxed(),
        LogFormat::Json => layer.json().with_current_span(true).boxed(),
        LogFormat::Compact => layer.compact().boxed(),
    }
}

fn file_layer<S>(format: LogFormat, writer: NonBlocking) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    match format {
        LogFormat::Json => layer.json().boxed(),
        LogFormat::Pretty | LogFormat::Compact => layer.boxed(),
    }
}

/// Generate a new correlation ID: 32 lowercase hex characters.
///
/// IDs tag the builder requests the CLI submits, so that the events of one
/// command can be grepped out of a shared log.
///
/// ```
/// use txforge::logging::new_correlation_id;
///
/// let id = new_correlation_id();
/// assert_eq!(id.len(), 32);
/// assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn new_correlation_id() -> String {
    use std::fmt::Write;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_nanos());
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    let mixed = timestamp.wrapping_add(u128::from(counter));

    // PCG-style scramble; uniqueness comes from the counter, not from here
    #[allow(clippy::cast_possible_truncation)]
    let random_part = {
        let mut state = mixed;
        let mut result = [0u8; 8];
        for byte in &mut result {
            state = state.wrapping_mul(6_364_136_223_846_793_005);
            state = state.wrapping_add(1_442_695_040_888_963_407);
            *byte = (state >> 56) as u8;
        }
        result
    };

    #[allow(clippy::cast_possible_truncation)]
    let timestamp_bytes = (mixed as u64).to_be_bytes();

    timestamp_bytes
        .iter()
        .chain(random_part.iter())
        .fold(String::with_capacity(32), |mut hex, byte| {
            let _ = write!(hex, "{byte:02x}");
            hex
        })
}

/// Convert the count of `-v` flags to a [`LogLevel`].
///
/// | Verbosity | Level |
/// |-----------|-------|
/// | 0         | Warn  |
/// | 1         | Info  |
/// | 2         | Debug |
/// | 3+        | Trace |
#[must_use]
pub const fn verbosity_to_level(verbosity: u8) -> LogLevel {
    match verbosity {
        0 => LogLevel::Warn,
        1 => LogLevel::Info,
        2 => LogLevel::Debug,
        _ => LogLevel::Trace,
    }
}
