//! Health check handlers for liveness and readiness probes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use stackmachine_lib::evaluate;

use crate::AppState;

pub const HEALTH_LIVE_PATH: &str = "/health/live";
pub const HEALTH_READY_PATH: &str = "/health/ready";

/// Command evaluated by the readiness probe, and the answer it must produce.
pub const CANARY_COMMAND: &str = "5 6 + 2 *";
pub const CANARY_RESULT: u16 = 22;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `ok`, or `not_ready: <reason>`.
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthStatus {
    pub fn ok(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
        }
    }

    pub fn not_ready(service: &str, version: &str, reason: &str) -> Self {
        Self {
            status: format!("not_ready: {}", reason),
            service: service.to_string(),
            version: version.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// `GET /health/live`: 200 whenever the process can answer.
///
/// ```text
/// {"status":"ok","service":"stackmachine","version":"0.1.0"}
/// ```
pub async fn health_live(State(state): State<AppState>) -> impl IntoResponse {
    let status = HealthStatus::ok(&state.config().service_name, env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// `GET /health/ready`: 200 when the canary command evaluates correctly,
/// 503 otherwise.
pub async fn health_ready(State(state): State<AppState>) -> Response {
    let service = &state.config().service_name;
    let version = env!("CARGO_PKG_VERSION");

    match evaluate(CANARY_COMMAND) {
        Ok(value) if value.get() == CANARY_RESULT => {
            (StatusCode::OK, Json(HealthStatus::ok(service, version))).into_response()
        }
        other => {
            tracing::error!(outcome = ?other, "readiness canary failed");
            let status = HealthStatus::not_ready(service, version, "canary evaluation failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(status)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_status() {
        let status = HealthStatus::ok("stackmachine", "1.0.0");
        assert!(status.is_ok());
        assert_eq!(status.service, "stackmachine");
        assert_eq!(status.version, "1.0.0");
    }

    #[test]
    fn not_ready_status() {
        let status = HealthStatus::not_ready("stackmachine", "1.0.0", "broken");
        assert!(!status.is_ok());
        assert!(status.status.starts_with("not_ready:"));
        assert!(status.status.contains("broken"));
    }

    #[test]
    fn canary_holds() {
        assert_eq!(evaluate(CANARY_COMMAND).unwrap().get(), CANARY_RESULT);
    }

    #[tokio::test]
    async fn ready_handler_reports_ok() {
        let response = health_ready(State(AppState::default())).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
