use axum::{extract::State, http::HeaderMap, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::sampler::PRODUCT_CATEGORIES;
use crate::AppState;

use super::region_from_headers;

// ─── Domain types ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

// ─── GET /products ───────────────────────────────────────────────

/// Simulates a catalog lookup with variable latency, then counts the view
/// under a drawn category and the caller's region.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Json<ProductsResponse> {
    tokio::time::sleep(state.sampler.delay(0.01..0.5)).await;

    let category = state.sampler.pick(PRODUCT_CATEGORIES);
    let region = region_from_headers(&headers);

    state.metrics.record_product_view(category, &region);

    Json(ProductsResponse {
        products: vec![
            Product {
                id: 1,
                name: "Product 1".into(),
                category,
            },
            Product {
                id: 2,
                name: "Product 2".into(),
                category,
            },
        ],
    })
}
