pub mod exposition;
pub mod registry;

pub use registry::AppMetrics;

/// Current wall-clock time as fractional unix seconds.
/// Used for the `last_*_timestamp_seconds` gauges.
pub fn wall_clock_seconds() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64 / 1000.0
}
