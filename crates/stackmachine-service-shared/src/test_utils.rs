//! Test fixtures for handler tests.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::ServiceConfig;
use crate::state::AppState;

/// State with default configuration.
pub fn test_state() -> AppState {
    AppState::default()
}

/// State whose command length limit is `max_command_bytes`.
pub fn test_state_with_limit(max_command_bytes: usize) -> AppState {
    AppState::new(ServiceConfig {
        max_command_bytes,
        ..ServiceConfig::default()
    })
}

/// State serving metrics on `path`.
pub fn test_state_with_metrics_path(path: &str) -> AppState {
    let mut config = ServiceConfig::default();
    config.metrics.path = path.to_string();
    AppState::new(config)
}

/// A request ID unique within the test process.
pub fn test_request_id() -> String {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    format!("test-{}", NEXT.fetch_add(1, Ordering::Relaxed))
}

/// Commands from the service acceptance suite with their expected results.
pub mod fixture_commands {
    pub const NORMAL_SUM: (&str, u32) = ("3 4 3 5 5 1 1 1 SUM", 23);
    pub const SUM_AFTER_CLEAR: (&str, u32) = ("3 4 3 5 CLEAR 5 1 1 1 SUM", 8);
    pub const MIXED: (&str, u32) = ("5 9 DUP + + 43 - 3 *", 60);
    pub const AT_LIMIT: (&str, u32) = ("25000 DUP +", 50_000);

    pub const INVALID: &str = "DOGBANANA";
    pub const NEGATIVE: &str = "5 2 -";
    pub const OVERFLOW: &str = "50000 1 +";
}
