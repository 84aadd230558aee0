use anyhow::Result;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use rust_metrics_lab::simulator::ResourceSimulator;
use rust_metrics_lab::{server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("rust-metrics-lab {} starting", env!("CARGO_PKG_VERSION"));

    // ── 1. Build shared state ────────────────────────────────────
    let state = Arc::new(AppState::new()?);

    // ── 2. Start the USE-metric simulator ────────────────────────
    // Independent periodic task; lives for the whole process.
    let simulator = ResourceSimulator::new(state.metrics.clone());
    tokio::spawn(async move {
        simulator.run().await;
    });

    // ── 3. Build Axum router ─────────────────────────────────────
    let app = server::create_router(state);

    // ── 4. Bind & serve ──────────────────────────────────────────
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".to_owned());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("serving on http://{addr}");
    info!("exposition endpoint at http://{addr}/metrics");

    axum::serve(listener, app).await?;

    Ok(())
}
