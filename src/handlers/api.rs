use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

// ─── GET /api/v{1,2,3}/data ──────────────────────────────────────
// Three fixed routes rather than a catch-all: only these versions exist,
// and v3 traffic is deliberately sparse (gap/fill query examples).

#[derive(Debug, Clone, Serialize)]
pub struct ApiDataResponse {
    pub data: String,
}

fn data_response(state: &AppState, version: &str) -> Json<ApiDataResponse> {
    state.metrics.inc_api_call(version);
    Json(ApiDataResponse {
        data: format!("{version} response"),
    })
}

pub async fn v1_data(State(state): State<Arc<AppState>>) -> Json<ApiDataResponse> {
    data_response(&state, "v1")
}

pub async fn v2_data(State(state): State<Arc<AppState>>) -> Json<ApiDataResponse> {
    data_response(&state, "v2")
}

pub async fn v3_data(State(state): State<Arc<AppState>>) -> Json<ApiDataResponse> {
    data_response(&state, "v3")
}
