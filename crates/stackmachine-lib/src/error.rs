use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::token::Operator;
use crate::value::MAX_VALUE;

/// Convenient result alias for the stack machine library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level evaluation error.
///
/// Every variant is a normal, reportable outcome of evaluating untrusted
/// input. The first error raised aborts the evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Raised for a token that is neither a literal nor a known keyword.
    #[error("invalid command '{token}' at token {position}")]
    InvalidCommand { token: String, position: usize },

    /// Raised when an operator needs more values than the stack holds.
    #[error(
        "stack underflow: {operator} needs {required} value{} but the stack holds {available}",
        plural(.required)
    )]
    StackUnderflow {
        operator: Operator,
        required: usize,
        available: usize,
    },

    /// Raised when `SUM` runs on an empty stack or nothing is left at the end.
    #[error("empty stack{}", describe_empty(.operator))]
    EmptyStack { operator: Option<Operator> },

    /// Raised when a literal or computed value exceeds the upper bound.
    #[error("overflow: {expression} exceeds the maximum value {max}", max = MAX_VALUE)]
    Overflow { expression: String },

    /// Raised when a subtraction would produce a value below zero.
    #[error("negative result: {minuend} - {subtrahend} is below 0")]
    NegativeResult { minuend: u16, subtrahend: u16 },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidCommand { .. } => ErrorKind::InvalidCommand,
            Error::StackUnderflow { .. } => ErrorKind::StackUnderflow,
            Error::EmptyStack { .. } => ErrorKind::EmptyStack,
            Error::Overflow { .. } => ErrorKind::Overflow,
            Error::NegativeResult { .. } => ErrorKind::NegativeResult,
        }
    }
}

/// Error classification without the per-occurrence details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidCommand,
    StackUnderflow,
    EmptyStack,
    Overflow,
    NegativeResult,
}

impl ErrorKind {
    /// Stable snake_case label, suitable for metrics and machine-readable output.
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidCommand => "invalid_command",
            ErrorKind::StackUnderflow => "stack_underflow",
            ErrorKind::EmptyStack => "empty_stack",
            ErrorKind::Overflow => "overflow",
            ErrorKind::NegativeResult => "negative_result",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn plural(count: &usize) -> &'static str {
    if *count == 1 {
        ""
    } else {
        "s"
    }
}

fn describe_empty(operator: &Option<Operator>) -> String {
    match operator {
        Some(operator) => format!(": {} has nothing to operate on", operator),
        None => ": no result left at end of input".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_token() {
        let err = Error::InvalidCommand {
            token: "DOGBANANA".to_string(),
            position: 1,
        };
        assert_eq!(err.to_string(), "invalid command 'DOGBANANA' at token 1");
    }

    #[test]
    fn underflow_message_pluralizes() {
        let err = Error::StackUnderflow {
            operator: Operator::Add,
            required: 2,
            available: 1,
        };
        assert_eq!(
            err.to_string(),
            "stack underflow: + needs 2 values but the stack holds 1"
        );

        let err = Error::StackUnderflow {
            operator: Operator::Dup,
            required: 1,
            available: 0,
        };
        assert_eq!(
            err.to_string(),
            "stack underflow: DUP needs 1 value but the stack holds 0"
        );
    }

    #[test]
    fn empty_stack_messages() {
        let sum = Error::EmptyStack {
            operator: Some(Operator::Sum),
        };
        assert!(sum.to_string().contains("SUM"));

        let end = Error::EmptyStack { operator: None };
        assert!(end.to_string().contains("end of input"));
    }

    #[test]
    fn overflow_message_mentions_bound() {
        let err = Error::Overflow {
            expression: "50001".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "overflow: 50001 exceeds the maximum value 50000"
        );
    }

    #[test]
    fn kind_labels_are_stable() {
        let err = Error::NegativeResult {
            minuend: 2,
            subtrahend: 5,
        };
        assert_eq!(err.kind(), ErrorKind::NegativeResult);
        assert_eq!(err.kind().as_str(), "negative_result");
        assert_eq!(ErrorKind::StackUnderflow.to_string(), "stack_underflow");
        assert_eq!(
            serde_json::to_string(&ErrorKind::InvalidCommand).unwrap(),
            "\"invalid_command\""
        );
    }
}
