use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::sampler::ERROR_TYPES;
use crate::AppState;

use super::AppError;

// ─── GET /slow ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct SlowResponse {
    pub message: &'static str,
}

/// Deliberately slow: 1–3 s of artificial latency lands requests in the
/// upper duration buckets.
pub async fn slow(State(state): State<Arc<AppState>>) -> Json<SlowResponse> {
    tokio::time::sleep(state.sampler.delay(1.0..3.0)).await;
    Json(SlowResponse {
        message: "Slow response completed",
    })
}

// ─── GET /error ──────────────────────────────────────────────────

/// Always fails with a drawn error type, so error-rate queries have
/// something to chew on. The middleware records the 500.
pub async fn fail(State(state): State<Arc<AppState>>) -> Result<(), AppError> {
    let error_type = state.sampler.pick(ERROR_TYPES);
    state.metrics.inc_http_error("GET", "/error", error_type);
    Err(AppError::Internal(error_type.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn seeded_state(seed: u64) -> Arc<AppState> {
        Arc::new(AppState::seeded(seed).expect("state"))
    }

    #[tokio::test]
    async fn fail_counts_exactly_one_error_and_responds_5xx() {
        let state = seeded_state(51);
        let err = fail(State(state.clone())).await.expect_err("always fails");

        let total: u64 = ERROR_TYPES
            .iter()
            .map(|t| {
                state
                    .metrics
                    .http_errors_total
                    .with_label_values(&["GET", "/error", t])
                    .get()
            })
            .sum();
        assert_eq!(total, 1);

        let response = err.into_response();
        assert!(!response.status().is_success());
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_finishes_and_stays_in_bounds() {
        let state = seeded_state(52);
        let started = tokio::time::Instant::now();
        let Json(body) = slow(State(state)).await;
        let elapsed = started.elapsed();

        assert_eq!(body.message, "Slow response completed");
        assert!(elapsed >= std::time::Duration::from_secs(1));
        assert!(elapsed < std::time::Duration::from_secs(3));
    }
}
