//! Logging initialization built on `tracing`.
//!
//! Call [`init_logging`] once at startup; later calls are no-ops. Level and
//! format can be set programmatically or through the `TORUS_LOG_LEVEL`,
//! `TORUS_LOG_FORMAT`, and `TORUS_LOG_DIR` environment variables.

use std::env;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Output format for log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Single-line output
    #[default]
    Compact,
    /// Multi-line human-readable output
    Pretty,
    /// Newline-delimited JSON
    Json,
}

impl LogFormat {
    fn from_env() -> Option<Self> {
        match env::var("TORUS_LOG_FORMAT").ok()?.to_lowercase().as_str() {
            "compact" => Some(LogFormat::Compact),
            "pretty" => Some(LogFormat::Pretty),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `torus_rs=debug`
    pub level: String,
    pub format: LogFormat,
    /// When set, also write daily-rotated log files into this directory
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: env::var("TORUS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::from_env().unwrap_or_default(),
            log_dir: env::var("TORUS_LOG_DIR").ok().map(PathBuf::from),
        }
    }
}

/// Initialize the global tracing subscriber. Subsequent calls are no-ops.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_new(&config.level)
            .unwrap_or_else(|_| EnvFilter::new("info"));

        if let Some(dir) = &config.log_dir {
            let appender = tracing_appender::rolling::daily(dir, "torus.log");
            let builder = fmt()
                .with_env_filter(filter)
                .with_writer(appender)
                .with_ansi(false);
            match config.format {
                LogFormat::Compact => builder.compact().init(),
                LogFormat::Pretty => builder.pretty().init(),
                LogFormat::Json => builder.json().init(),
            }
        } else {
            let builder = fmt().with_env_filter(filter);
            match config.format {
                LogFormat::Compact => builder.compact().init(),
                LogFormat::Pretty => builder.pretty().init(),
                LogFormat::Json => builder.json().init(),
            }
        }

        INITIALIZED.store(true, Ordering::SeqCst);
    });
}

/// Initialize logging with environment-driven defaults.
pub fn init_default_logging() {
    init_logging(LoggingConfig::default());
}

/// Whether the global subscriber has been installed by this crate.
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::SeqCst)
}
