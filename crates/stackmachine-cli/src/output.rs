//! Output formatting for evaluation results and traces.

use std::fmt::Write as _;

use clap::ValueEnum;
use serde::Serialize;

use stackmachine_lib::{lexemes, Error as LibError, Machine, Result as LibResult, Value};

use crate::terminal::ColorPalette;

/// How `eval` prints its outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The bare result number.
    #[default]
    Text,
    /// `{"result": n, "error": "..."}`, as returned by the HTTP service.
    Json,
}

/// Outcome envelope shared with the HTTP service's wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope {
    pub result: u32,
    pub error: String,
}

impl From<&LibResult<Value>> for Envelope {
    fn from(outcome: &LibResult<Value>) -> Self {
        match outcome {
            Ok(value) => Self {
                result: (*value).into(),
                error: String::new(),
            },
            Err(err) => Self {
                result: 0,
                error: err.to_string(),
            },
        }
    }
}

/// Render the outcome for stdout.
///
/// Text format prints nothing for a failure; the message goes to stderr
/// through [`render_error`].
pub fn render_outcome(outcome: &LibResult<Value>, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Text => outcome.as_ref().ok().map(Value::to_string),
        OutputFormat::Json => serde_json::to_string(&Envelope::from(outcome)).ok(),
    }
}

/// Render an evaluation error for stderr.
pub fn render_error(err: &LibError, palette: &ColorPalette) -> String {
    format!("{}error:{} {}", palette.red, palette.reset, err)
}

/// The stack after one token was executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// 1-based token position.
    pub position: usize,
    pub word: String,
    /// Stack contents after the token, bottom first.
    pub stack: Vec<Value>,
}

/// Evaluate `command` one token at a time, recording the stack after every
/// token that succeeded.
pub fn trace(command: &str) -> (Vec<TraceStep>, LibResult<Value>) {
    let mut machine = Machine::new();
    let mut steps = Vec::new();

    for lexeme in lexemes(command) {
        if let Err(err) = lexeme.token.and_then(|token| machine.execute(token)) {
            return (steps, Err(err));
        }
        steps.push(TraceStep {
            position: lexeme.position,
            word: lexeme.text.to_string(),
            stack: machine.stack().to_vec(),
        });
    }

    (steps, machine.finish())
}

/// Format a stack as `[a b c]`, bottom first.
pub fn format_stack(stack: &[Value]) -> String {
    let mut out = String::from("[");
    for (i, value) in stack.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{}", value);
    }
    out.push(']');
    out
}

/// Format one trace line: position, token, resulting stack.
pub fn format_trace_step(step: &TraceStep, palette: &ColorPalette) -> String {
    format!(
        "{gray}{:>4}{reset}  {:<8} {}",
        step.position,
        step.word,
        format_stack(&step.stack),
        gray = palette.gray,
        reset = palette.reset
    )
}
