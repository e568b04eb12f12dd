//! Stack machine library entry points.
//!
//! This crate evaluates Reverse-Polish-Notation commands over a single stack
//! of integers bounded to `[0, 50000]`. Higher-level consumers (the HTTP
//! service and the CLI) should only depend on the items exported here instead
//! of reimplementing the evaluation rules.
//!
//! Supported tokens: non-negative integer literals, `+`, `-`, `*`, `DUP`,
//! `SUM` and `CLEAR`. Evaluation holds no process-wide state; every call to
//! [`evaluate`] works on a fresh stack and is safe to run in parallel.

#![deny(warnings)]

pub mod error;
pub mod eval;
pub mod machine;
pub mod token;
pub mod value;

pub use error::{Error, ErrorKind, Result};
pub use eval::evaluate;
pub use machine::Machine;
pub use token::{lexemes, tokenize, Lexeme, Lexemes, Operator, Token, Tokens};
pub use value::{Value, MAX_VALUE, MIN_VALUE};
