//! Logging setup for the solver.
//!
//! Diagnostics go to stderr through `tracing`; results go to stdout.
//!
//! # Environment Variables
//!
//! - `QUEENS_LOG` - Log filter (overrides RUST_LOG)
//! - `QUEENS_LOG_FORMAT` - Output format: pretty, compact, json
//! - `RUST_LOG` - Standard Rust log filter (fallback)

use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable multi-field format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
    /// JSON lines
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "full" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            _ => Err(format!(
                "Unknown log format: '{}'. Valid options: pretty, compact, json",
                s
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Base log level (default: WARN, so a plain run prints only results)
    pub level: Level,
    /// Output format; `None` defers to `QUEENS_LOG_FORMAT`, then pretty
    pub format: Option<LogFormat>,
    /// Custom filter string (overrides level if set)
    pub filter: Option<String>,
    /// Show thread names; useful for telling workers apart
    pub show_thread_names: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: None,
            filter: None,
            show_thread_names: true,
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Map a `-v` count to a level: 0 = warn, 1 = info, 2 = debug, 3+ = trace.
    pub fn with_verbosity(self, verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        self.with_level(level)
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_filter(mut self, filter: String) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Apply environment variable overrides.
    ///
    /// A filter or format already set (e.g. from the CLI) wins over
    /// `QUEENS_LOG`, `RUST_LOG` and `QUEENS_LOG_FORMAT`.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.filter.is_none() {
            self.filter = lookup("QUEENS_LOG").or_else(|| lookup("RUST_LOG"));
        }

        if self.format.is_none() {
            self.format = lookup("QUEENS_LOG_FORMAT").and_then(|f| f.parse().ok());
        }

        self
    }

    fn build_filter(&self) -> EnvFilter {
        let default = || EnvFilter::new(self.level.to_string().to_lowercase());
        match self.filter {
            Some(ref filter) => EnvFilter::try_new(filter).unwrap_or_else(|_| {
                eprintln!("Warning: Invalid log filter '{}', using default", filter);
                default()
            }),
            None => default(),
        }
    }
}

/// Install the global tracing subscriber.
///
/// Call once at startup; later calls are silently ignored.
pub fn init(config: LogConfig) {
    let filter = config.build_filter();

    let result = match config.format.unwrap_or_default() {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_thread_names(config.show_thread_names)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_thread_names(config.show_thread_names)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .with_thread_names(config.show_thread_names)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(layer)
                .try_init()
        }
    };

    // Already initialised
    let _ = result;
}
