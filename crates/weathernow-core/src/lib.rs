pub mod config;
pub mod error;

pub use config::{ApiConfig, Config, LoggingConfig, SearchConfig, ValidationResult};
pub use error::{NetworkError, ReqwestErrorExt, WeatherError};

use anyhow::Result;

/// Initialize logging.
///
/// `RUST_LOG` takes precedence; otherwise `default_level` (usually the
/// configured `logging.level`) is used. Output goes to stderr so the
/// terminal view on stdout is not interleaved with log lines.
pub fn init(default_level: &str) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("WeatherNow core initialized");
    Ok(())
}
