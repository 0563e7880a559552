//! Tracing and logging setup
//!
//! Console output is always on. With a log directory configured, two daily
//! rolling files are added: `bright_city.log` with everything passing the
//! filter and `errors.log` with warnings and errors only.

use std::path::PathBuf;

use tracing::Level;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LoggingConfig;

const MAIN_LOG_FILE: &str = "bright_city.log";
const ERROR_LOG_FILE: &str = "errors.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Fallback filter when `RUST_LOG` is unset (e.g. "info", "site_web=debug")
    pub filter: String,
    /// Enable JSON output format on the console
    pub json: bool,
    /// Include span events (new, close)
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
    /// Write rolling log files into this directory
    pub log_dir: Option<PathBuf>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: Level::INFO.to_string(),
            json: false,
            span_events: false,
            file_line: true,
            log_dir: None,
        }
    }
}

impl TracingConfig {
    /// Create a development configuration with debug logging
    #[must_use]
    pub fn development() -> Self {
        Self {
            filter: Level::DEBUG.to_string(),
            json: false,
            span_events: true,
            file_line: true,
            log_dir: None,
        }
    }

    /// Create a production configuration with JSON logging
    #[must_use]
    pub fn production() -> Self {
        Self {
            filter: Level::INFO.to_string(),
            json: true,
            span_events: false,
            file_line: false,
            log_dir: None,
        }
    }

    /// Derive from `LOG_LEVEL`, `LOG_TO_FILE` and `LOG_DIR`
    #[must_use]
    pub fn from_logging(logging: &LoggingConfig, production: bool) -> Self {
        let base = if production {
            Self::production()
        } else {
            Self::default()
        };
        Self {
            filter: logging.level.to_lowercase(),
            log_dir: logging.to_file.then(|| PathBuf::from(&logging.dir)),
            ..base
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.filter))
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Keeps the background file writers alive; drop it only at shutdown
#[derive(Debug, Default)]
#[must_use = "dropping the guards stops file logging"]
pub struct LogGuards {
    _guards: Vec<WorkerGuard>,
}

/// Try to initialize tracing with custom configuration
///
/// Returns an error instead of panicking when a subscriber is already set.
pub fn try_init_tracing_with_config(config: TracingConfig) -> Result<LogGuards, TracingError> {
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(3);
    let mut guards = Vec::new();

    let console = fmt::layer()
        .with_file(config.file_line)
        .with_line_number(config.file_line)
        .with_span_events(config.span_events());
    let console = if config.json {
        console.json().with_filter(config.env_filter()).boxed()
    } else {
        console.with_filter(config.env_filter()).boxed()
    };
    layers.push(console);

    if let Some(dir) = &config.log_dir {
        std::fs::create_dir_all(dir).map_err(|e| TracingError::LogDir(dir.clone(), e))?;

        let (main_writer, main_guard) =
            tracing_appender::non_blocking(rolling::daily(dir, MAIN_LOG_FILE));
        layers.push(
            fmt::layer()
                .with_writer(main_writer)
                .with_ansi(false)
                .with_filter(config.env_filter())
                .boxed(),
        );
        guards.push(main_guard);

        let (error_writer, error_guard) =
            tracing_appender::non_blocking(rolling::daily(dir, ERROR_LOG_FILE));
        layers.push(
            fmt::layer()
                .with_writer(error_writer)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_filter(LevelFilter::WARN)
                .boxed(),
        );
        guards.push(error_guard);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)?;

    Ok(LogGuards { _guards: guards })
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,

    #[error("Cannot create log directory {0}: {1}")]
    LogDir(PathBuf, #[source] std::io::Error),
}
