//! # Logger
//!
//! Console logging for hosts that run module verification or scoped module tests.
//! The library crates only emit `tracing` events; this crate installs the subscriber that prints
//! them, with environment-based filtering and compact or JSON output.
//!
//! * Use [`LoggerBuilder::env_filter`] to set module-directed filters
//!   (e.g., `"modulith_model=debug,modulith_test=info"`), in addition to `RUST_LOG`.
//! * Use [`LoggerBuilder::test_writer`] inside test harnesses so output is captured per test.
//! * Use [`LoggerBuilder::span_timings`] to report how long `verify` runs took.
//!
//! ## Example
//!
//! ```rust
//! # use modulith_logger::{Logger, LevelFilter};
//!
//! let _logger = Logger::builder()
//!     .name("architecture-checks")
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use private::Sealed;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Output encoding of console events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug)]
pub struct LoggerConfig {
    level: LevelFilter,
    format: LogFormat,
    ansi: bool,
    test_writer: bool,
    span_timings: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::INFO,
            format: LogFormat::Compact,
            ansi: true,
            test_writer: false,
            span_timings: false,
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
impl Sealed for NoName {}
impl Sealed for WithName {}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    config: LoggerConfig,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the name reported when the logger starts.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { name: WithName(name.into()), config: self.config }
    }
}

impl LoggerBuilder<WithName> {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Adds an explicit env filter (e.g., `modulith_model=debug`).
    ///
    /// `RUST_LOG` is only consulted when no explicit filter is set.
    /// Invalid filters will cause [`LoggerBuilder::init`] to return an error.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Emits one JSON object per event instead of the compact text format.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self) -> Self {
        self.config.format = LogFormat::Json;
        self
    }

    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn ansi(mut self, enabled: bool) -> Self {
        self.config.ansi = enabled;
        self
    }

    /// Writes through the test harness so output is captured per test.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn test_writer(mut self, enabled: bool) -> Self {
        self.config.test_writer = enabled;
        self
    }

    /// Logs the duration of instrumented spans when they close.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn span_timings(mut self, enabled: bool) -> Self {
        self.config.span_timings = enabled;
        self
    }

    /// Consumes the builder and initializes the global tracing subscriber.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set.
    /// Returns [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate_name(&self.name.0)?;

        let env_filter = build_env_filter(&self.config)?;
        let span_events =
            if self.config.span_timings { FmtSpan::CLOSE } else { FmtSpan::NONE };

        let console = layer().with_ansi(self.config.ansi).with_span_events(span_events);
        let console = match (self.config.format, self.config.test_writer) {
            (LogFormat::Compact, false) => console.compact().boxed(),
            (LogFormat::Compact, true) => console.compact().with_test_writer().boxed(),
            (LogFormat::Json, false) => console.json().boxed(),
            (LogFormat::Json, true) => console.json().with_test_writer().boxed(),
        };

        tracing_subscriber::registry().with(env_filter).with(console).try_init()?;
        tracing::debug!(logger = %self.name.0, format = ?self.config.format, "Logger initialized");

        Ok(Logger { name: self.name.0, format: self.config.format })
    }
}

/// A handle to the initialized logging system.
#[must_use = "The handle reports what was installed; keep it for the duration of the run."]
#[derive(Debug)]
pub struct Logger {
    name: String,
    format: LogFormat,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`] to configure the global tracing subscriber.
    pub fn builder() -> LoggerBuilder<NoName> {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn format(&self) -> LogFormat {
        self.format
    }
}

fn validate_name(name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
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
