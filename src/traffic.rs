use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reqwest::{Client, Method};
use std::time::Duration;

// ─── Cycle policy ────────────────────────────────────────────────
// One cycle = the fixed call mix below, in order. Only the parameters
// (regions, the odd v3 call) are randomized.

pub const REGIONS: &[&str] = &["us-east", "us-west", "eu-central"];
pub const USER_IDS: &[u64] = &[1, 2, 3, 4, 5];

const PRODUCT_CALLS: usize = 5;
const ORDER_CALLS: usize = 10;
const API_ROUNDS: usize = 3;
/// Chance that a round of API calls also hits v3.
const V3_PROBABILITY: f64 = 0.2;
const SLOW_CALLS: usize = 1;
const ERROR_CALLS: usize = 2;

/// One request the generator plans to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRequest {
    pub method: Method,
    pub path: &'static str,
    /// Overrides `path` when the target needs a per-request value.
    pub rendered_path: Option<String>,
    /// `X-Region` header, when the endpoint cares.
    pub region: Option<&'static str>,
}

impl PlannedRequest {
    fn get(path: &'static str) -> Self {
        Self {
            method: Method::GET,
            path,
            rendered_path: None,
            region: None,
        }
    }

    fn post(path: &'static str) -> Self {
        Self {
            method: Method::POST,
            path,
            rendered_path: None,
            region: None,
        }
    }

    fn with_region(mut self, region: &'static str) -> Self {
        self.region = Some(region);
        self
    }

    /// Path to actually request.
    pub fn target(&self) -> &str {
        self.rendered_path.as_deref().unwrap_or(self.path)
    }
}

/// Outcome of one executed cycle.
#[derive(Debug, Default, Clone, Copy)]
pub struct CycleStats {
    pub delivered: usize,
    pub failed: usize,
}

fn pick_region(rng: &mut StdRng) -> &'static str {
    REGIONS[rng.gen_range(0..REGIONS.len())]
}

/// Build the request list for one cycle. Pure given the RNG, so a fixed
/// seed reproduces the exact plan.
pub fn plan_cycle(rng: &mut StdRng) -> Vec<PlannedRequest> {
    let mut plan = Vec::with_capacity(32);

    // 1. Health check
    plan.push(PlannedRequest::get("/"));

    // 2. Product browsing, randomized region per call
    for _ in 0..PRODUCT_CALLS {
        plan.push(PlannedRequest::get("/products").with_region(pick_region(rng)));
    }

    // 3. Orders, randomized region per call
    for _ in 0..ORDER_CALLS {
        plan.push(PlannedRequest::post("/orders").with_region(pick_region(rng)));
    }

    // 4. One login per known user
    for id in USER_IDS {
        let mut req = PlannedRequest::post("/users/:id/login");
        req.rendered_path = Some(format!("/users/{id}/login"));
        plan.push(req);
    }

    // 5. API rounds; v3 only occasionally, so its series has gaps
    for _ in 0..API_ROUNDS {
        plan.push(PlannedRequest::get("/api/v1/data"));
        plan.push(PlannedRequest::get("/api/v2/data"));
        if rng.gen_bool(V3_PROBABILITY) {
            plan.push(PlannedRequest::get("/api/v3/data"));
        }
    }

    // 6. Latency outlier
    for _ in 0..SLOW_CALLS {
        plan.push(PlannedRequest::get("/slow"));
    }

    // 7. Guaranteed errors
    for _ in 0..ERROR_CALLS {
        plan.push(PlannedRequest::get("/error"));
    }

    plan
}

/// Execute a planned cycle sequentially. Failures of any kind — transport
/// errors and non-2xx responses alike — are counted and swallowed; the
/// generator never halts on a bad call.
pub async fn run_cycle(client: &Client, base_url: &str, plan: &[PlannedRequest]) -> CycleStats {
    let mut stats = CycleStats::default();

    for req in plan {
        let url = format!("{base_url}{}", req.target());
        let mut builder = client.request(req.method.clone(), &url);
        if let Some(region) = req.region {
            builder = builder.header("X-Region", region);
        }

        match builder.send().await {
            Ok(response) if response.status().is_success() => stats.delivered += 1,
            Ok(response) => {
                tracing::debug!(%url, status = %response.status(), "non-success response");
                stats.failed += 1;
            }
            Err(err) => {
                tracing::debug!(%url, error = %err, "request failed");
                stats.failed += 1;
            }
        }
    }

    stats
}

/// Generator main loop: plan, execute, log, sleep 1–3 s, repeat forever.
pub async fn run(client: &Client, base_url: &str) {
    let mut rng = StdRng::from_entropy();
    let mut cycle: u64 = 0;

    loop {
        cycle += 1;
        let plan = plan_cycle(&mut rng);
        let stats = run_cycle(client, base_url, &plan).await;
        tracing::info!(
            cycle,
            requests = plan.len(),
            delivered = stats.delivered,
            failed = stats.failed,
            "traffic cycle complete"
        );

        let pause = Duration::from_secs_f64(rng.gen_range(1.0..3.0));
        tokio::time::sleep(pause).await;
    }
}
