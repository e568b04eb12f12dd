//! Application state shared by the axum handlers.

use std::sync::Arc;

use crate::config::ServiceConfig;

/// Shared state for all handlers.
///
/// Holds read-only configuration only; evaluations never share a stack.
/// Cheap to clone (an `Arc` internally).
///
/// ```
/// use axum::{extract::State, routing::post, Router};
/// use stackmachine_service_shared::{AppState, ServiceConfig};
///
/// async fn handler(State(state): State<AppState>) -> String {
///     state.config().service_name.clone()
/// }
///
/// let app: Router = Router::new()
///     .route("/name", post(handler))
///     .with_state(AppState::new(ServiceConfig::default()));
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        Self {
            inner: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.inner
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ServiceConfig::default())
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_name", &self.inner.service_name)
            .field("max_command_bytes", &self.inner.max_command_bytes)
            .finish()
    }
}
