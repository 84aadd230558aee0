//! Traffic generator — keeps the service's metrics moving.
//!
//! Issues the fixed request cycle against `BASE_URL` (default
//! `http://localhost:8000`) until the process is killed. Individual
//! request failures are swallowed; progress is logged once per cycle.

use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::prelude::*;

use rust_metrics_lab::traffic;

#[tokio::main]
async fn main() -> Result<()> {
    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let base_url = std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_owned());
    info!(%base_url, "traffic generator starting");

    // Client defaults are fine here: a hung call just stalls the cycle.
    let client = reqwest::Client::new();
    traffic::run(&client, &base_url).await;

    Ok(())
}
