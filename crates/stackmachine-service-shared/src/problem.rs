//! RFC 9457 Problem Details for requests the service refuses.
//!
//! Evaluation failures are not problems: they are reported inside the normal
//! `{"result","error"}` envelope. Problems cover transport-level refusals such
//! as a wrong method or an unreadable body.
//! See: <https://www.rfc-editor.org/rfc/rfc9457.html>

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Problem type URI for an empty body or one that is not a command object.
pub const PROBLEM_MALFORMED_BODY: &str = "/problems/malformed-body";

/// Problem type URI for a command longer than `MAX_COMMAND_BYTES`.
pub const PROBLEM_COMMAND_TOO_LONG: &str = "/problems/command-too-long";

/// Problem type URI for methods other than the ones a route accepts.
pub const PROBLEM_METHOD_NOT_ALLOWED: &str = "/problems/method-not-allowed";

/// RFC 9457 Problem Details response body.
///
/// ```
/// use stackmachine_service_shared::{ProblemDetails, PROBLEM_MALFORMED_BODY};
/// use axum::http::StatusCode;
///
/// let problem = ProblemDetails::new(
///     PROBLEM_MALFORMED_BODY,
///     "Malformed Request Body",
///     StatusCode::BAD_REQUEST,
/// )
/// .with_detail("request body is not valid JSON")
/// .with_request_id("req-12345");
///
/// assert_eq!(problem.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    /// URI reference identifying the problem type (relative).
    #[serde(rename = "type")]
    pub type_uri: String,

    /// Short, human-readable summary of the problem.
    pub title: String,

    pub status: u16,

    /// Explanation specific to this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// Request identifier of this occurrence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(type_uri: impl Into<String>, title: impl Into<String>, status: StatusCode) -> Self {
        Self {
            type_uri: type_uri.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.instance = Some(request_id.into());
        self
    }

    /// 400 for a body that cannot be decoded into a command request.
    pub fn malformed_body(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_MALFORMED_BODY,
            "Malformed Request Body",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(detail)
        .with_request_id(request_id)
    }

    /// 400 for a command of `length` bytes when at most `limit` are accepted.
    pub fn command_too_long(length: usize, limit: usize, request_id: impl Into<String>) -> Self {
        Self::new(
            PROBLEM_COMMAND_TOO_LONG,
            "Command Too Long",
            StatusCode::BAD_REQUEST,
        )
        .with_detail(format!(
            "The 'command' field is {} bytes long; the limit is {}",
            length, limit
        ))
        .with_request_id(request_id)
    }

    /// 405 Method Not Allowed naming the rejected method and the accepted ones.
    pub fn method_not_allowed(
        method: &str,
        allowed: &[&str],
        request_id: impl Into<String>,
    ) -> Self {
        Self::new(
            PROBLEM_METHOD_NOT_ALLOWED,
            "Method Not Allowed",
            StatusCode::METHOD_NOT_ALLOWED,
        )
        .with_detail(format!(
            "Method {} is not allowed; use {}",
            method,
            allowed.join(", ")
        ))
        .with_request_id(request_id)
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.title,
            self.detail.as_deref().unwrap_or("")
        )
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut response = (status, Json(&self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}
