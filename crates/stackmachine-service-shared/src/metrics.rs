//! Prometheus metrics for the stack machine service.
//!
//! - [`MetricsConfig`]: whether metrics are collected and where they are served
//! - [`init_metrics`]: install the Prometheus recorder
//! - [`metrics_handler`]: axum handler rendering the exposition text
//! - evaluation helpers recording business metrics
//!
//! ```no_run
//! use stackmachine_service_shared::metrics::{init_metrics, metrics_handler, MetricsConfig};
//! use axum::{routing::get, Router};
//!
//! let config = MetricsConfig::default();
//! init_metrics(&config).expect("failed to initialize metrics");
//!
//! let app: Router = Router::new().route(config.route_path(), get(metrics_handler));
//! ```

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::warn;

use stackmachine_lib::{Error as LibError, Value};

use crate::health::{HEALTH_LIVE_PATH, HEALTH_READY_PATH};
use crate::request::COMMAND_PATH;

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Outcome label recorded for successful evaluations.
pub const OUTCOME_OK: &str = "ok";

pub const DEFAULT_METRICS_PATH: &str = "/metrics";

/// Paths served by other routes; the metrics route may not take them over.
pub const RESERVED_PATHS: [&str; 3] = [COMMAND_PATH, HEALTH_LIVE_PATH, HEALTH_READY_PATH];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route serving the exposition text, e.g. `/metrics`.
    pub path: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_METRICS_PATH.to_string(),
        }
    }
}

impl MetricsConfig {
    /// Read `METRICS_ENABLED` (anything but `false` enables) and `METRICS_PATH`.
    pub fn from_env() -> Self {
        let enabled = std::env::var("METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        let path = match std::env::var("METRICS_PATH") {
            Ok(raw) => usable_path(raw.trim()).to_string(),
            Err(_) => DEFAULT_METRICS_PATH.to_string(),
        };

        Self { enabled, path }
    }

    /// Path to mount the metrics route on.
    ///
    /// Falls back to [`DEFAULT_METRICS_PATH`] with a warning when `path` is
    /// not an absolute literal path or belongs to another route.
    pub fn route_path(&self) -> &str {
        usable_path(&self.path)
    }
}

fn usable_path(path: &str) -> &str {
    let literal = path.starts_with('/') && !path.contains(['{', '}', '*']);
    if literal && !RESERVED_PATHS.contains(&path) {
        path
    } else {
        warn!(
            key = "METRICS_PATH",
            value = %path,
            default = DEFAULT_METRICS_PATH,
            "ignoring unusable metrics path"
        );
        DEFAULT_METRICS_PATH
    }
}

/// Install the Prometheus recorder.
///
/// # Errors
///
/// Fails when metrics are disabled, when a recorder is already installed, or
/// when the exporter cannot be built.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;

    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// The installed Prometheus handle, if [`init_metrics`] succeeded.
pub fn prometheus_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

/// Axum handler returning Prometheus exposition text.
pub async fn metrics_handler() -> String {
    prometheus_handle()
        .map(|h| h.render())
        .unwrap_or_else(|| "# Metrics not initialized\n".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsError {
    Disabled,
    AlreadyInitialized,
    InstallFailed(String),
}

impl std::fmt::Display for MetricsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricsError::Disabled => write!(f, "metrics are disabled"),
            MetricsError::AlreadyInitialized => write!(f, "metrics recorder already initialized"),
            MetricsError::InstallFailed(e) => {
                write!(f, "failed to install metrics recorder: {}", e)
            }
        }
    }
}

impl std::error::Error for MetricsError {}

// =============================================================================
// Evaluation metrics
// =============================================================================

/// Label for an evaluation outcome: [`OUTCOME_OK`] or the error kind.
pub fn outcome_label(outcome: &Result<Value, LibError>) -> &'static str {
    match outcome {
        Ok(_) => OUTCOME_OK,
        Err(err) => err.kind().as_str(),
    }
}

/// Increment `stackmachine_evaluations_total{outcome}`.
pub fn record_evaluation(outcome: &Result<Value, LibError>) {
    metrics::counter!(
        "stackmachine_evaluations_total",
        "outcome" => outcome_label(outcome)
    )
    .increment(1);
}

/// Record the number of tokens in an evaluated command.
pub fn record_command_tokens(tokens: usize) {
    metrics::histogram!("stackmachine_command_tokens").record(tokens as f64);
}

/// Increment `stackmachine_requests_rejected_total{reason}` for requests that
/// never reached the evaluator.
pub fn record_request_rejected(reason: &'static str) {
    metrics::counter!(
        "stackmachine_requests_rejected_total",
        "reason" => reason
    )
    .increment(1);
}
