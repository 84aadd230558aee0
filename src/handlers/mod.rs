pub mod api;
pub mod faults;
pub mod health;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::sampler::DEFAULT_REGION;

// ─── Unified error type ──────────────────────────────────────────

#[derive(Debug)]
pub enum AppError {
    /// Client-side problem; responds 400.
    BadRequest(String),
    /// Server-side failure (including the injected one); responds 500.
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error":  message,
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

// ─── Shared helpers ──────────────────────────────────────────────

/// Region label from the `X-Region` header, falling back to the default.
pub fn region_from_headers(headers: &HeaderMap) -> String {
    headers
        .get("x-region")
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_REGION)
        .to_owned()
}
