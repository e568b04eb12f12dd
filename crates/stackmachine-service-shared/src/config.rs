//! Service configuration read from the environment.
//!
//! - `SERVICE_PORT`: HTTP port (default: 8080)
//! - `MAX_COMMAND_BYTES`: longest accepted command in bytes (default: 65536)
//! - `SERVICE_NAME`: name reported by health probes (default: `stackmachine`)
//! - `METRICS_ENABLED`, `METRICS_PATH`: see [`MetricsConfig`]
//!
//! Unparseable values fall back to their defaults with a warning.

use std::net::SocketAddr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::logging::DEFAULT_SERVICE_NAME;
use crate::metrics::MetricsConfig;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_COMMAND_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub port: u16,
    pub max_command_bytes: usize,
    pub service_name: String,
    pub metrics: MetricsConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            max_command_bytes: DEFAULT_MAX_COMMAND_BYTES,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            port: env_or("SERVICE_PORT", defaults.port),
            max_command_bytes: env_or("MAX_COMMAND_BYTES", defaults.max_command_bytes),
            service_name: std::env::var("SERVICE_NAME")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.service_name),
            metrics: MetricsConfig::from_env(),
        }
    }

    /// Address to bind: all interfaces on the configured port.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default = %default, "ignoring unparseable setting");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_command_bytes, 65_536);
        assert_eq!(config.service_name, "stackmachine");
        assert!(config.metrics.enabled);
    }

    #[test]
    fn bind_addr_uses_port() {
        let config = ServiceConfig {
            port: 9999,
            ..ServiceConfig::default()
        };
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:9999");
    }

    #[test]
    fn env_or_falls_back_on_missing_or_invalid() {
        assert_eq!(env_or("STACKMACHINE_TEST_UNSET_KEY", 7u16), 7);
    }
}
