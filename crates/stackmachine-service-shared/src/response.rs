//! The `{"result","error"}` envelope returned by `POST /stackmachine`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use stackmachine_lib::{Error as LibError, Value};

/// Evaluation outcome as sent to HTTP callers.
///
/// Exactly one of the fields is meaningful: on success `error` is empty, on
/// failure `result` is zero and `error` carries the message.
///
/// ```
/// use stackmachine_lib::evaluate;
/// use stackmachine_service_shared::CommandResponse;
///
/// let ok = CommandResponse::from(evaluate("5 6 + 2 *"));
/// assert_eq!(ok.result, 22);
/// assert!(ok.error.is_empty());
///
/// let failed = CommandResponse::from(evaluate("5 2 -"));
/// assert_eq!(failed.result, 0);
/// assert!(!failed.error.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub result: u32,
    pub error: String,
}

impl CommandResponse {
    pub fn success(value: Value) -> Self {
        Self {
            result: value.into(),
            error: String::new(),
        }
    }

    pub fn failure(error: &LibError) -> Self {
        Self {
            result: 0,
            error: error.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_empty()
    }
}

impl From<Result<Value, LibError>> for CommandResponse {
    fn from(outcome: Result<Value, LibError>) -> Self {
        match outcome {
            Ok(value) => Self::success(value),
            Err(err) => Self::failure(&err),
        }
    }
}

/// Always `200 OK`: evaluation errors are part of the envelope.
impl IntoResponse for CommandResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
