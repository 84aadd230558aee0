use std::sync::Arc;

pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod sampler;
pub mod server;
pub mod simulator;
pub mod traffic;

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Prometheus instrument table — handlers record, `/metrics` renders.
    pub metrics: Arc<metrics::AppMetrics>,

    /// Single source of randomness for handler-side draws (seedable in tests).
    pub sampler: sampler::Sampler,
}

impl AppState {
    /// State for production use: entropy-seeded sampler.
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            metrics: Arc::new(metrics::AppMetrics::new()?),
            sampler: sampler::Sampler::new(),
        })
    }

    /// State with a fixed sampler seed, for reproducible tests.
    pub fn seeded(seed: u64) -> anyhow::Result<Self> {
        Ok(Self {
            metrics: Arc::new(metrics::AppMetrics::new()?),
            sampler: sampler::Sampler::seeded(seed),
        })
    }
}
