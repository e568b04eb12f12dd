//! Request body types and validation.

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::ServiceConfig;
use crate::ProblemDetails;

/// Route accepting commands.
pub const COMMAND_PATH: &str = "/stackmachine";

/// Validation of a decoded request against the service configuration.
pub trait Validate {
    /// Returns a boxed `ProblemDetails` (with `instance` set to `request_id`)
    /// when the request must be refused.
    fn validate(&self, config: &ServiceConfig, request_id: &str) -> Result<(), Box<ProblemDetails>>;
}

/// Body of `POST /stackmachine`.
///
/// A missing or `null` `command` field is the empty command, which the
/// evaluator reports as an empty stack.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub command: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl CommandRequest {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Decode a request body.
    ///
    /// The body is read as JSON regardless of the declared content type.
    pub fn from_body(body: &[u8], request_id: &str) -> Result<Self, Box<ProblemDetails>> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(Box::new(ProblemDetails::malformed_body(
                "Request body is empty; expected {\"command\": \"...\"}",
                request_id,
            )));
        }

        serde_json::from_slice(body).map_err(|e| {
            Box::new(ProblemDetails::malformed_body(
                format!("Request body is not a valid command object: {}", e),
                request_id,
            ))
        })
    }

    /// Number of whitespace-separated tokens in the command.
    pub fn token_count(&self) -> usize {
        self.command.split_whitespace().count()
    }
}

impl Validate for CommandRequest {
    fn validate(&self, config: &ServiceConfig, request_id: &str) -> Result<(), Box<ProblemDetails>> {
        if self.command.len() > config.max_command_bytes {
            return Err(Box::new(ProblemDetails::command_too_long(
                self.command.len(),
                config.max_command_bytes,
                request_id,
            )));
        }
        Ok(())
    }
}
