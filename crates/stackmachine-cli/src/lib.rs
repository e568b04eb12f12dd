//! Stack machine CLI library.
//!
//! Output formatting and terminal styling for the `stackmachine-cli` binary.

pub mod output;
pub mod terminal;
