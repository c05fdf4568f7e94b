//! # Logger
//!
//! Global `tracing` subscriber setup for the contest binaries: a compact console layer, an
//! optional daily-rotated log directory written through a non-blocking worker, JSON output for
//! production log shipping, and `RUST_LOG`-style filtering.
//!
//! ## Example
//!
//! ```rust
//! # use contest_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("contest")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const DEFAULT_MAX_FILES: usize = 10;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    directory: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            directory: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl private::Sealed for NoName {}
impl private::Sealed for WithName {}

/// A builder for configuring and initializing the global tracing subscriber.
///
/// A name is required before [`LoggerBuilder::init`] becomes available; it prefixes rolling
/// log files (e.g. `contest-server.2026-10-19.log`).
#[derive(Debug)]
#[must_use = "The builder must be configured before it can be used to initialize the logger."]
pub struct LoggerBuilder<N: private::Sealed = NoName> {
    config: LoggerConfig,
    name: N,
}

impl LoggerBuilder<NoName> {
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { config: self.config, name: WithName(name.into()) }
    }
}

impl<N: private::Sealed> LoggerBuilder<N> {
    /// Minimum level emitted when neither `RUST_LOG` nor [`Self::env_filter`] says otherwise.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Programmatic filter directives (e.g., `contest_server=debug,tower_http=info`).
    ///
    /// Invalid directives make [`LoggerBuilder::init`] fail.
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Emit JSON records instead of the human-readable format.
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.json = enabled;
        self
    }

    /// Also write rolling log files into `directory`.
    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.config.directory = Some(directory.into());
        self
    }

    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }
}

impl LoggerBuilder<WithName> {
    /// Installs the global subscriber.
    ///
    /// The returned [`Logger`] owns the file writer guard; keep it alive until shutdown so
    /// buffered records are flushed.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, a bad
    ///   filter, or when every output is disabled.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] when the log directory is unusable.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let LoggerBuilder { config, name: WithName(name) } = self;
        validate(&config, &name)?;

        let filter = build_env_filter(&config)?;
        let mut layers: Vec<BoxedLayer> = Vec::new();

        if config.console {
            let console = layer().with_ansi(!config.json);
            layers.push(if config.json { console.json().boxed() } else { console.compact().boxed() });
        }

        let guard = match &config.directory {
            Some(directory) => {
                let (file_layer, guard) = file_layer(&config, directory, &name)?;
                layers.push(file_layer);
                Some(guard)
            }
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging output enabled. Enable the console or a log directory.".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;

        Ok(Logger { guard })
    }
}

/// A handle to the initialized logging system.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName }
    }

    /// Returns the file writer guard, if file logging is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

/// Parses a level name such as `"debug"` or `"WARN"`.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for unknown names.
pub fn parse_level(raw: &str) -> Result<LevelFilter, LoggerError> {
    raw.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid log level '{raw}': {e}").into(),
        context: None,
    })
}

fn file_layer(
    config: &LoggerConfig,
    directory: &Path,
    name: &str,
) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
    fs::create_dir_all(directory)
        .context(format!("Failed to create log directory {}", directory.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(config.rotation.clone())
        .filename_prefix(name)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(config.max_files)
        .build(directory)?;

    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file = layer().with_writer(writer).with_ansi(false);
    let boxed = if config.json { file.json().boxed() } else { file.boxed() };

    Ok((boxed, guard))
}

fn validate(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: None,
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_initial_state() {
        let builder = Logger::builder().name("contest-test").env_filter("contest=debug");
        assert!(builder.config.console);
        assert!(!builder.config.json);
        assert_eq!(builder.config.level, LevelFilter::INFO);
        assert_eq!(builder.config.env_filter.as_deref(), Some("contest=debug"));
        assert!(builder.config.directory.is_none());
    }

    #[test]
    fn builder_configuration_is_recorded() {
        let builder = Logger::builder()
            .name("contest-test")
            .directory("logs")
            .max_files(5)
            .json(true)
            .level(LevelFilter::DEBUG);

        assert_eq!(builder.config.level, LevelFilter::DEBUG);
        assert_eq!(builder.config.max_files, 5);
        assert!(builder.config.json);
        assert_eq!(builder.config.directory.as_deref(), Some(std::path::Path::new("logs")));
    }

    #[test]
    fn rejects_empty_name_and_zero_files() {
        let err = Logger::builder().name("  ").init().expect_err("empty name");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let err = Logger::builder().name("x").max_files(0).init().expect_err("zero files");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn rejects_when_no_output_enabled() {
        let err = Logger::builder().name("x").console(false).init().expect_err("no layers");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn rejects_invalid_filter() {
        let err = Logger::builder().name("x").env_filter("contest=notalevel").init().expect_err("bad filter");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn parses_level_names() {
        assert_eq!(parse_level("debug").ok(), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level(" WARN ").ok(), Some(LevelFilter::WARN));
        assert!(parse_level("loud").is_err());
    }
}
