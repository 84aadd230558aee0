use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::metrics::wall_clock_seconds;
use crate::AppState;

use super::{region_from_headers, AppError};

/// Order status labels on `orders_total` / `order_value_total`.
pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAILED: &str = "failed";

// ─── Domain types ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub status: &'static str,
    pub order_type: &'static str,
}

// ─── POST /orders ────────────────────────────────────────────────

/// Simulated order processing. Every call increments `orders_total` exactly
/// once: `failed` on the injected validation path (400), `success` on 201.
/// A successful order also accumulates its value and stamps the last-order
/// timestamp gauge.
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    tokio::time::sleep(state.sampler.delay(0.05..1.0)).await;

    let region = region_from_headers(&headers);

    if state.sampler.order_fails() {
        state
            .metrics
            .inc_http_error("POST", "/orders", "validation_error");
        state.metrics.record_order(STATUS_FAILED, &region);
        return Err(AppError::BadRequest("Validation failed".into()));
    }

    let draw = state.sampler.order_draw();
    let now = wall_clock_seconds();

    state.metrics.mark_order(draw.order_type, &region, now);
    state.metrics.record_order(STATUS_SUCCESS, &region);
    state.metrics.add_order_value(
        draw.product_category,
        draw.payment_method,
        &region,
        STATUS_SUCCESS,
        draw.amount,
    );

    let order_id = format!("ord_{}", &uuid::Uuid::new_v4().to_string()[..8]);

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            order_id,
            status: STATUS_SUCCESS,
            order_type: draw.order_type,
        }),
    ))
}
