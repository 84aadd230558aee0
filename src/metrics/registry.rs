use prometheus::{
    CounterVec, GaugeVec, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry,
    TextEncoder,
};
use std::sync::Arc;

/// Latency buckets shared by the duration histogram and its summary twin.
const DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Every instrument the service exposes, registered on one owned registry.
///
/// Label key sets are fixed for the process lifetime; only label values vary
/// per observation. Nothing is ever unregistered.
#[derive(Clone)]
pub struct AppMetrics {
    registry: Arc<Registry>,

    // ── RED (request path) ──────────────────────────────────
    /// Total HTTP requests by method, endpoint and response status
    pub http_requests_total: IntCounterVec,
    /// Request duration histogram
    pub http_request_duration_seconds: HistogramVec,
    /// Companion family for quantile queries (see DESIGN.md on Summary)
    pub http_request_duration_summary_seconds: HistogramVec,
    /// HTTP errors by type
    pub http_errors_total: IntCounterVec,

    // ── USE (resource simulator) ────────────────────────────
    /// Simulated CPU utilization percentage per server/region
    pub cpu_utilization_percent: GaugeVec,
    /// Simulated memory utilization in bytes
    pub memory_utilization_bytes: GaugeVec,
    /// Simulated active connection count (saturation)
    pub active_connections: IntGaugeVec,
    /// Simulated queue depth per queue/priority (saturation)
    pub queue_depth: IntGaugeVec,

    // ── Business ────────────────────────────────────────────
    /// Orders by outcome status and region
    pub orders_total: IntCounterVec,
    /// Accumulated order value across category/payment/region/status
    pub order_value_total: CounterVec,
    /// Product views by category and region
    pub products_viewed_total: IntCounterVec,
    /// API calls by version (v3 is rarely hit — useful for gap examples)
    pub api_calls_total: IntCounterVec,
    /// Unix timestamp of the most recent order
    pub last_order_timestamp_seconds: GaugeVec,
    /// Unix timestamp of the most recent login per user tier
    pub last_user_login_timestamp_seconds: GaugeVec,
}

impl AppMetrics {
    /// Create and register the full instrument table.
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let http_requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests"),
            &["method", "endpoint", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "endpoint"],
        )?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        let http_request_duration_summary_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_summary_seconds",
                "HTTP request duration summary",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "endpoint"],
        )?;
        registry.register(Box::new(http_request_duration_summary_seconds.clone()))?;

        let http_errors_total = IntCounterVec::new(
            Opts::new("http_errors_total", "Total HTTP errors"),
            &["method", "endpoint", "error_type"],
        )?;
        registry.register(Box::new(http_errors_total.clone()))?;

        let cpu_utilization_percent = GaugeVec::new(
            Opts::new("cpu_utilization_percent", "CPU utilization percentage"),
            &["server", "region"],
        )?;
        registry.register(Box::new(cpu_utilization_percent.clone()))?;

        let memory_utilization_bytes = GaugeVec::new(
            Opts::new("memory_utilization_bytes", "Memory utilization in bytes"),
            &["server", "region"],
        )?;
        registry.register(Box::new(memory_utilization_bytes.clone()))?;

        let active_connections = IntGaugeVec::new(
            Opts::new("active_connections", "Number of active connections"),
            &["server", "region"],
        )?;
        registry.register(Box::new(active_connections.clone()))?;

        let queue_depth = IntGaugeVec::new(
            Opts::new("queue_depth", "Queue depth"),
            &["queue_name", "priority"],
        )?;
        registry.register(Box::new(queue_depth.clone()))?;

        let orders_total = IntCounterVec::new(
            Opts::new("orders_total", "Total number of orders"),
            &["status", "region"],
        )?;
        registry.register(Box::new(orders_total.clone()))?;

        let order_value_total = CounterVec::new(
            Opts::new("order_value_total", "Total order value"),
            &["product_category", "payment_method", "region", "status"],
        )?;
        registry.register(Box::new(order_value_total.clone()))?;

        let products_viewed_total = IntCounterVec::new(
            Opts::new("products_viewed_total", "Total products viewed"),
            &["category", "region"],
        )?;
        registry.register(Box::new(products_viewed_total.clone()))?;

        let api_calls_total = IntCounterVec::new(
            Opts::new("api_calls_total", "Total API calls"),
            &["api_version", "endpoint"],
        )?;
        registry.register(Box::new(api_calls_total.clone()))?;

        let last_order_timestamp_seconds = GaugeVec::new(
            Opts::new(
                "last_order_timestamp_seconds",
                "Unix timestamp of the last order",
            ),
            &["order_type", "region"],
        )?;
        registry.register(Box::new(last_order_timestamp_seconds.clone()))?;

        let last_user_login_timestamp_seconds = GaugeVec::new(
            Opts::new(
                "last_user_login_timestamp_seconds",
                "Unix timestamp of the last user login",
            ),
            &["user_tier"],
        )?;
        registry.register(Box::new(last_user_login_timestamp_seconds.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            http_requests_total,
            http_request_duration_seconds,
            http_request_duration_summary_seconds,
            http_errors_total,
            cpu_utilization_percent,
            memory_utilization_bytes,
            active_connections,
            queue_depth,
            orders_total,
            order_value_total,
            products_viewed_total,
            api_calls_total,
            last_order_timestamp_seconds,
            last_user_login_timestamp_seconds,
        })
    }

    /// Render all metrics in Prometheus text exposition format.
    pub fn render(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder
            .encode_to_string(&metric_families)
            .unwrap_or_default()
    }

    /// One RED observation: request counter plus both duration families.
    pub fn observe_request(&self, method: &str, endpoint: &str, status: &str, seconds: f64) {
        self.http_requests_total
            .with_label_values(&[method, endpoint, status])
            .inc();
        self.http_request_duration_seconds
            .with_label_values(&[method, endpoint])
            .observe(seconds);
        self.http_request_duration_summary_seconds
            .with_label_values(&[method, endpoint])
            .observe(seconds);
    }

    /// Count one HTTP error by type.
    pub fn inc_http_error(&self, method: &str, endpoint: &str, error_type: &str) {
        self.http_errors_total
            .with_label_values(&[method, endpoint, error_type])
            .inc();
    }

    /// Count one product view.
    pub fn record_product_view(&self, category: &str, region: &str) {
        self.products_viewed_total
            .with_label_values(&[category, region])
            .inc();
    }

    /// Count one order outcome.
    pub fn record_order(&self, status: &str, region: &str) {
        self.orders_total.with_label_values(&[status, region]).inc();
    }

    /// Accumulate a completed order's value.
    pub fn add_order_value(
        &self,
        product_category: &str,
        payment_method: &str,
        region: &str,
        status: &str,
        amount: f64,
    ) {
        self.order_value_total
            .with_label_values(&[product_category, payment_method, region, status])
            .inc_by(amount);
    }

    /// Stamp the last-order gauge.
    pub fn mark_order(&self, order_type: &str, region: &str, unix_seconds: f64) {
        self.last_order_timestamp_seconds
            .with_label_values(&[order_type, region])
            .set(unix_seconds);
    }

    /// Stamp the last-login gauge for a tier.
    pub fn mark_login(&self, user_tier: &str, unix_seconds: f64) {
        self.last_user_login_timestamp_seconds
            .with_label_values(&[user_tier])
            .set(unix_seconds);
    }

    /// Count one versioned API call.
    pub fn inc_api_call(&self, api_version: &str) {
        self.api_calls_total
            .with_label_values(&[api_version, "/data"])
            .inc();
    }
}
