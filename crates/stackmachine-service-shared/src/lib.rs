//! Shared infrastructure for the stack machine HTTP service.
//!
//! - [`AppState`] / [`ServiceConfig`]: environment-driven configuration
//! - [`CommandRequest`] / [`CommandResponse`]: the JSON envelope
//! - [`ProblemDetails`]: RFC 9457 bodies for refused requests
//! - [`health`]: liveness and readiness probes
//! - [`metrics`]: Prometheus metrics
//! - [`logging`]: structured logging setup
//! - [`middleware`]: request IDs, request span, HTTP metrics
//!
//! # Architecture
//!
//! All evaluation logic lives in `stackmachine-lib`. This crate is HTTP glue
//! only:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Decode {"command": "..."}                                │
//! │  - Validate against ServiceConfig                           │
//! │  - Call stackmachine_lib::evaluate                          │
//! │  - Encode {"result": n, "error": "..."}                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Enable the `test-utils` feature to use [`test_utils`] from other crates.

#![deny(warnings)]

pub mod config;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::ServiceConfig;
pub use health::{
    health_live, health_ready, HealthStatus, HEALTH_LIVE_PATH, HEALTH_READY_PATH,
};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_command_tokens, record_evaluation,
    record_request_rejected, MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, RequestId, RequestLayer, X_REQUEST_ID};
pub use problem::{
    ProblemDetails, PROBLEM_COMMAND_TOO_LONG, PROBLEM_MALFORMED_BODY, PROBLEM_METHOD_NOT_ALLOWED,
};
pub use request::{CommandRequest, Validate, COMMAND_PATH};
pub use response::CommandResponse;
pub use state::AppState;
