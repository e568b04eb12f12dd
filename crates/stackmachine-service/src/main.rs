//! Stack machine HTTP service binary.
//!
//! # Configuration
//!
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `MAX_COMMAND_BYTES` - Longest accepted command (default: 65536)
//! - `METRICS_ENABLED` / `METRICS_PATH` - Prometheus endpoint (default: on, `/metrics`)

use tracing::{info, warn};

use stackmachine_service::router;
use stackmachine_service_shared::{
    AppState, LoggingConfig, ServiceConfig, init_logging, init_metrics,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Reads LOG_FORMAT, RUST_LOG and SERVICE_NAME
    init_logging(&LoggingConfig::from_env());

    let config = ServiceConfig::from_env();

    if config.metrics.enabled {
        if let Err(e) = init_metrics(&config.metrics) {
            warn!(error = %e, "failed to initialize metrics, continuing without metrics");
        }
    }

    let addr = config.bind_addr();
    info!(
        port = config.port,
        max_command_bytes = config.max_command_bytes,
        metrics = config.metrics.enabled,
        "starting stack machine service"
    );

    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "listening on");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
