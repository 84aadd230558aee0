use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;

use crate::metrics::AppMetrics;

// ─── Simulated fleet ─────────────────────────────────────────────

pub const SERVERS: &[&str] = &["web-1", "web-2", "api-1"];
pub const REGIONS: &[&str] = &["us-east", "us-west", "eu-central"];
pub const QUEUES: &[&str] = &["order-queue", "notification-queue", "payment-queue"];
pub const PRIORITIES: &[&str] = &["high", "medium", "low"];

/// Seconds between refreshes.
const REFRESH_INTERVAL: Duration = Duration::from_secs(5);

/// Background task that keeps the USE gauges moving.
///
/// Runs on its own timer, fully decoupled from request handling; each
/// refresh only touches atomic gauge state, so it can never block a
/// handler.
pub struct ResourceSimulator {
    metrics: Arc<AppMetrics>,
    interval: Duration,
}

impl ResourceSimulator {
    pub fn new(metrics: Arc<AppMetrics>) -> Self {
        Self {
            metrics,
            interval: REFRESH_INTERVAL,
        }
    }

    /// Periodic loop; spawned at boot and never cancelled.
    pub async fn run(self) {
        tracing::info!(interval_secs = self.interval.as_secs(), "resource simulator started");
        let mut rng = StdRng::from_entropy();
        let mut tick = tokio::time::interval(self.interval);
        loop {
            tick.tick().await;
            self.refresh(&mut rng);
        }
    }

    /// One full sweep over the simulated fleet.
    fn refresh(&self, rng: &mut StdRng) {
        for &server in SERVERS {
            for &region in REGIONS {
                self.metrics
                    .cpu_utilization_percent
                    .with_label_values(&[server, region])
                    .set(rng.gen_range(20.0..95.0));
                self.metrics
                    .memory_utilization_bytes
                    .with_label_values(&[server, region])
                    .set(rng.gen_range(100_000_000.0..8_000_000_000.0));
                self.metrics
                    .active_connections
                    .with_label_values(&[server, region])
                    .set(rng.gen_range(0..=1000));
            }
        }

        for &queue in QUEUES {
            for &priority in PRIORITIES {
                self.metrics
                    .queue_depth
                    .with_label_values(&[queue, priority])
                    .set(rng.gen_range(0..=500));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_populates_every_series_within_bounds() {
        let metrics = Arc::new(AppMetrics::new().expect("registry construction"));
        let simulator = ResourceSimulator::new(metrics.clone());
        let mut rng = StdRng::seed_from_u64(71);

        simulator.refresh(&mut rng);

        for &server in SERVERS {
            for &region in REGIONS {
                let cpu = metrics
                    .cpu_utilization_percent
                    .with_label_values(&[server, region])
                    .get();
                assert!((20.0..95.0).contains(&cpu));

                let mem = metrics
                    .memory_utilization_bytes
                    .with_label_values(&[server, region])
                    .get();
                assert!((100_000_000.0..8_000_000_000.0).contains(&mem));

                let conns = metrics
                    .active_connections
                    .with_label_values(&[server, region])
                    .get();
                assert!((0..=1000).contains(&conns));
            }
        }

        for &queue in QUEUES {
            for &priority in PRIORITIES {
                let depth = metrics
                    .queue_depth
                    .with_label_values(&[queue, priority])
                    .get();
                assert!((0..=500).contains(&depth));
            }
        }
    }

    #[test]
    fn repeated_refreshes_overwrite_rather_than_accumulate() {
        let metrics = Arc::new(AppMetrics::new().expect("registry construction"));
        let simulator = ResourceSimulator::new(metrics.clone());
        let mut rng = StdRng::seed_from_u64(72);

        for _ in 0..10 {
            simulator.refresh(&mut rng);
        }
        let cpu = metrics
            .cpu_utilization_percent
            .with_label_values(&["web-1", "us-east"])
            .get();
        assert!((20.0..95.0).contains(&cpu));
    }
}
