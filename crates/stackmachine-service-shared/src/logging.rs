//! Structured logging setup for the stack machine service.
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: `json` (default) or `text` (`pretty` is accepted as an alias)
//! - `RUST_LOG`: Log level filter (default: `info`)
//! - `SERVICE_NAME`: Name recorded on the startup event (default: `stackmachine`)
//!
//! # Example
//!
//! ```no_run
//! use stackmachine_service_shared::logging::{init_logging, LoggingConfig};
//!
//! let config = LoggingConfig::from_env();
//! init_logging(&config);
//! ```

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Service name used when `SERVICE_NAME` is not set.
pub const DEFAULT_SERVICE_NAME: &str = "stackmachine";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event (production).
    #[default]
    Json,
    /// Multi-line human-readable output (development).
    Text,
}

impl FromStr for LogFormat {
    type Err = Infallible;

    /// Unknown values fall back to JSON so a typo never silences logs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => LogFormat::Text,
            _ => LogFormat::Json,
        })
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Filter directive used when `RUST_LOG` is absent or invalid.
    pub level: String,
    pub service: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            level: "info".to_string(),
            service: DEFAULT_SERVICE_NAME.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Read `LOG_FORMAT`, `RUST_LOG` and `SERVICE_NAME`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let format = std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.format);
        let level = std::env::var("RUST_LOG").unwrap_or(defaults.level);
        let service = std::env::var("SERVICE_NAME")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.service);

        Self {
            format,
            level,
            service,
        }
    }

    /// Override the service name.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }
}

/// Install the global tracing subscriber.
///
/// Call once at startup. A second call leaves the first subscriber in place
/// and returns `false`.
///
/// JSON output looks like:
///
/// ```json
/// {"timestamp":"2026-10-18T10:00:00Z","level":"INFO","fields":{"message":"request completed","status":200},"target":"stackmachine_service_shared::middleware"}
/// ```
pub fn init_logging(config: &LoggingConfig) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Text => registry.with(fmt::layer().pretty()).try_init().is_ok(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .try_init()
            .is_ok(),
    };

    if installed {
        tracing::info!(
            service = %config.service,
            format = ?config.format,
            "logging initialized"
        );
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parses_case_insensitively() {
        assert_eq!("json".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("JSON".parse::<LogFormat>(), Ok(LogFormat::Json));
        assert_eq!("text".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert_eq!(" Pretty ".parse::<LogFormat>(), Ok(LogFormat::Text));
        assert_eq!("yaml".parse::<LogFormat>(), Ok(LogFormat::Json));
    }

    #[test]
    fn default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "info");
        assert_eq!(config.service, DEFAULT_SERVICE_NAME);
    }

    #[test]
    fn with_service_overrides_name() {
        let config = LoggingConfig::default().with_service("rpn");
        assert_eq!(config.service, "rpn");
    }
}
