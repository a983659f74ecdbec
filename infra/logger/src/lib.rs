//! # Logger
//!
//! Console and file logging for cookiebox binaries.
//!
//! * Console output goes to **stderr**, keeping stdout free for command results.
//! * File output rolls over by [`Rotation`] and keeps at most `max_files` files, written
//!   through a non-blocking worker.
//! * `RUST_LOG` refines the configured level; [`LoggerBuilder::env_filter`] sets a
//!   programmatic default instead (e.g. `"cbox_cookie=debug,info"`).
//!
//! ## Example
//!
//! ```rust
//! # use cbox_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("cbox")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use cbox_domain::config::{LogRotation, LoggingConfig};
use private::Sealed;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Rolling log files written by a background worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutput {
    dir: PathBuf,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl FileOutput {
    /// Daily files in `dir`, seven kept, plain text. The directory is created on init.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), rotation: Rotation::DAILY, max_files: DEFAULT_MAX_FILES, json: false }
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// JSON lines instead of text.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    fn layer(&self, name: &str) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
        if self.max_files == 0 {
            return Err(LoggerError::InvalidConfiguration {
                message: "max_files must be greater than zero".into(),
                context: None,
            });
        }
        fs::create_dir_all(&self.dir).map_err(|e| LoggerError::Internal {
            message: e.to_string().into(),
            context: Some(format!("Failed to create path: {}", self.dir.display()).into()),
        })?;

        let appender = RollingFileAppender::builder()
            .rotation(self.rotation.clone())
            .filename_prefix(name)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(self.max_files)
            .build(&self.dir)?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = layer().with_writer(writer).with_ansi(false);
        let layer = if self.json { layer.json().boxed() } else { layer.boxed() };
        Ok((layer, guard))
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// Builder for the global tracing subscriber; a name is required before [`init`](LoggerBuilder::init).
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    name: N,
    console: bool,
    level: LevelFilter,
    filter: Option<String>,
    file: Option<FileOutput>,
}

impl LoggerBuilder<NoName> {
    /// Sets the name used as the log file prefix.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder {
            name: WithName(name.into()),
            console: self.console,
            level: self.level,
            filter: self.filter,
            file: self.file,
        }
    }
}

impl LoggerBuilder<WithName> {
    /// Minimum level emitted when no filter directive matches.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Explicit filter directives (e.g. `cbox_cookie=debug,info`), used instead of `RUST_LOG`.
    #[must_use]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Compact output on stderr.
    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.console = enabled;
        self
    }

    #[must_use]
    pub fn file(mut self, output: FileOutput) -> Self {
        self.file = Some(output);
        self
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive: it owns the worker that flushes file output.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, a bad filter, `max_files == 0`
    ///   or when neither console nor file output is enabled.
    /// * [`LoggerError::Appender`] / [`LoggerError::Internal`] when the log directory or file
    ///   cannot be created.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already set.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let name = self.name.0;
        if name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }
        if !self.console && self.file.is_none() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging output enabled. Enable console or file output.".into(),
                context: None,
            });
        }

        let filter = env_filter(self.level, self.filter.as_deref())?;

        let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);
        if self.console {
            layers.push(layer().compact().with_writer(io::stderr).boxed());
        }
        let guard = match &self.file {
            Some(output) => {
                let (file_layer, guard) = output.layer(&name)?;
                layers.push(file_layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(layers).with(filter).try_init()?;

        Ok(Logger { guard })
    }
}

/// Handle to the installed subscriber; dropping it flushes and stops the file worker.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Console on, `INFO`, no files.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { name: NoName, console: true, level: LevelFilter::INFO, filter: None, file: None }
    }

    /// Installs the global subscriber described by the `[logging]` configuration section.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for an unknown level, plus everything
    /// [`LoggerBuilder::init`] returns.
    pub fn from_config(config: &LoggingConfig) -> Result<Self, LoggerError> {
        let mut builder = Self::builder()
            .name(config.name.clone())
            .console(config.console)
            .level(parse_level(&config.level)?);
        if let Some(filter) = &config.filter {
            builder = builder.env_filter(filter.clone());
        }
        if let Some(dir) = &config.path {
            builder = builder.file(
                FileOutput::new(dir.clone())
                    .rotation(rotation(config.rotation))
                    .max_files(config.max_files)
                    .json(config.json),
            );
        }
        builder.init()
    }

    /// The file worker guard, present when file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

/// Parses `trace`, `debug`, `info`, `warn`, `error` or `off`, case-insensitively.
///
/// # Errors
/// [`LoggerError::InvalidConfiguration`] for anything else.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(level.trim()).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{level}': {e}").into(),
        context: None,
    })
}

const fn rotation(rotation: LogRotation) -> Rotation {
    match rotation {
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    }
}

fn env_filter(level: LevelFilter, directives: Option<&str>) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(level.into());
    match directives {
        Some(directives) => builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid env filter '{directives}': {e}").into(),
            context: None,
        }),
        None => Ok(builder.from_env_lossy()),
    }
}
