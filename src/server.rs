use axum::{
    middleware as axum_mw,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::handlers;
use crate::metrics::exposition;
use crate::middleware::timing;
use crate::AppState;

/// Builds the full Axum `Router` with all routes and middleware.
///
/// The timing layer wraps the whole router, so every request — scrapes of
/// `/metrics` and unmatched 404s included — lands in the RED metrics.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ── Health / root ───────────────────────────────────────
        .route("/", get(handlers::health::index))
        // ── Shop endpoints ──────────────────────────────────────
        .route("/products", get(handlers::products::list_products))
        .route("/orders", post(handlers::orders::create_order))
        .route("/users/:id/login", post(handlers::users::login))
        // ── Versioned API ───────────────────────────────────────
        .route("/api/v1/data", get(handlers::api::v1_data))
        .route("/api/v2/data", get(handlers::api::v2_data))
        .route("/api/v3/data", get(handlers::api::v3_data))
        // ── Latency / failure injection ─────────────────────────
        .route("/slow", get(handlers::faults::slow))
        .route("/error", get(handlers::faults::fail))
        // ── Exposition ──────────────────────────────────────────
        .route("/metrics", get(exposition::serve_metrics))
        // ── Provide shared state to all routes above ────────────
        .with_state(state.clone())
        // ── Global middleware (applied bottom-up) ───────────────
        .layer(axum_mw::from_fn_with_state(state, timing::track_requests))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_router() -> (Arc<AppState>, Router) {
        let state = Arc::new(AppState::seeded(61).expect("state"));
        let router = create_router(state.clone());
        (state, router)
    }

    fn requests_for(state: &AppState, method: &str, endpoint: &str, status: &str) -> u64 {
        state
            .metrics
            .http_requests_total
            .with_label_values(&[method, endpoint, status])
            .get()
    }

    #[tokio::test]
    async fn health_request_records_red_triplet() {
        let (state, router) = test_router();
        let response = router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        assert_eq!(requests_for(&state, "GET", "/", "200"), 1);
        assert_eq!(
            state
                .metrics
                .http_request_duration_seconds
                .with_label_values(&["GET", "/"])
                .get_sample_count(),
            1
        );
        assert_eq!(
            state
                .metrics
                .http_request_duration_summary_seconds
                .with_label_values(&["GET", "/"])
                .get_sample_count(),
            1
        );
    }

    #[tokio::test]
    async fn error_endpoint_records_its_real_status() {
        let (state, router) = test_router();
        let response = router
            .oneshot(Request::get("/error").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(requests_for(&state, "GET", "/error", "500"), 1);
    }

    #[tokio::test]
    async fn unknown_path_records_under_generic_label() {
        let (state, router) = test_router();
        let response = router
            .oneshot(Request::get("/no/such/route").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(requests_for(&state, "GET", "unknown", "404"), 1);
    }

    #[tokio::test]
    async fn malformed_login_id_is_rejected_with_red_only() {
        let (state, router) = test_router();
        let response = router
            .oneshot(
                Request::post("/users/not-a-number/login")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(requests_for(&state, "POST", "/users/login", "400"), 1);

        // No business observation happened.
        let rendered = state.metrics.render();
        assert!(!rendered.contains("last_user_login_timestamp_seconds{"));
    }

    #[tokio::test]
    async fn metrics_endpoint_serves_exposition_and_is_itself_observed() {
        let (state, router) = test_router();

        let first = router
            .clone()
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);

        let second = router
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(second.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();

        // The first scrape is visible in the second one.
        let line = body
            .lines()
            .find(|l| l.starts_with("http_requests_total{") && l.contains(r#"endpoint="/metrics""#))
            .expect("self-observation series rendered");
        assert!(line.ends_with(" 1"));
        assert_eq!(requests_for(&state, "GET", "/metrics", "200"), 2);
    }
}
