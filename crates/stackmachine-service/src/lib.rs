//! Stack machine HTTP service.
//!
//! # Endpoints
//!
//! - `POST /stackmachine` - Evaluate `{"command": "..."}`
//! - `GET /metrics` - Prometheus metrics endpoint (path set by `METRICS_PATH`)
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//!
//! Evaluation failures are not HTTP errors: every evaluated command answers
//! 200 with `{"result": n, "error": "..."}`. Requests that never reach the
//! evaluator (wrong method, unreadable body, over-long command) get an
//! RFC 9457 problem body.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use stackmachine_lib::evaluate;
use stackmachine_service_shared::{
    AppState, CommandRequest, CommandResponse, HEALTH_LIVE_PATH, HEALTH_READY_PATH,
    ProblemDetails, RequestLayer, Validate, extract_or_generate_request_id, health_live,
    health_ready, metrics_handler, record_command_tokens, record_evaluation,
    record_request_rejected,
};

pub use stackmachine_service_shared::COMMAND_PATH;

/// HTTP response: an evaluation envelope or an RFC 9457 refusal.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum EvaluateResponse {
    Evaluated(CommandResponse),
    Rejected(ProblemDetails),
}

impl IntoResponse for EvaluateResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            EvaluateResponse::Evaluated(body) => (StatusCode::OK, Json(body)).into_response(),
            EvaluateResponse::Rejected(problem) => problem.into_response(),
        }
    }
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    let metrics = state.config().metrics.clone();

    let mut app = Router::new()
        .route(
            COMMAND_PATH,
            post(evaluate_handler).fallback(method_not_allowed),
        )
        .route(HEALTH_LIVE_PATH, get(health_live))
        .route(HEALTH_READY_PATH, get(health_ready));

    // Never mounted over the command or health routes.
    if metrics.enabled {
        app = app.route(metrics.route_path(), get(metrics_handler));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(RequestLayer)
        .with_state(state)
}

/// Handle `POST /stackmachine`.
///
/// The body is read as JSON whatever its declared content type.
pub async fn evaluate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> EvaluateResponse {
    let request_id = extract_or_generate_request_id(&headers);

    let request = match CommandRequest::from_body(&body, request_id.as_str()) {
        Ok(request) => request,
        Err(problem) => {
            record_request_rejected("malformed_body");
            return EvaluateResponse::Rejected(*problem);
        }
    };

    if let Err(problem) = request.validate(state.config(), request_id.as_str()) {
        record_request_rejected("command_too_long");
        return EvaluateResponse::Rejected(*problem);
    }

    let tokens = request.token_count();
    debug!(tokens, "evaluating command");

    let outcome = evaluate(&request.command);
    record_evaluation(&outcome);
    record_command_tokens(tokens);

    match &outcome {
        Ok(value) => info!(result = %value, "command evaluated"),
        Err(err) => info!(kind = %err.kind(), error = %err, "command failed"),
    }

    EvaluateResponse::Evaluated(CommandResponse::from(outcome))
}

/// Any method other than POST on the command route.
async fn method_not_allowed(method: Method, headers: HeaderMap) -> impl IntoResponse {
    let request_id = extract_or_generate_request_id(&headers);
    record_request_rejected("method_not_allowed");

    (
        [(header::ALLOW, "POST")],
        ProblemDetails::method_not_allowed(method.as_str(), &["POST"], request_id.as_str()),
    )
}
