//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! Libraries only emit through `tracing` macros; the subscriber is
//! initialized exactly once here, at CLI startup.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level filter applied when `use_env_filter` is false.
    pub level_filter: LevelFilter,
    /// Defer to `RUST_LOG` when no explicit verbosity was requested.
    pub use_env_filter: bool,
    /// Whether to use ANSI colors on stderr.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::INFO,
            use_env_filter: true,
            with_ansi: true,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// # Panics
///
/// Panics if called more than once in the same process.
pub fn init_logging(config: &LogConfig) {
    let filter = if config.use_env_filter {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| default_filter(config.level_filter))
    } else {
        default_filter(config.level_filter)
    };

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(config.with_ansi)
        .without_time();

    tracing_subscriber::registry().with(filter).with(layer).init();
}

/// Our crates at the requested level, external crates capped at warn.
fn default_filter(level: LevelFilter) -> EnvFilter {
    let level = level.to_string().to_lowercase();
    EnvFilter::new(format!(
        "warn,ops2fhir_cli={level},ops2fhir_client={level},ops2fhir_generate={level},\
         ops2fhir_ingest={level},ops2fhir_model={level}",
    ))
}
