use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;

use crate::AppState;

/// Records the RED triplet for every request that reaches the router:
///
///   http_requests_total{method,endpoint,status}
///   http_request_duration_seconds{method,endpoint}
///   http_request_duration_summary_seconds{method,endpoint}
///
/// `status` is the code actually returned, so `/error` shows up as 500 and a
/// rejected login as 400. Requests that match no route are recorded under
/// the `unknown` endpoint label.
pub async fn track_requests(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().as_str().to_owned();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|m| endpoint_label(m.as_str()).to_owned())
        .unwrap_or_else(|| "unknown".to_owned());

    let start = Instant::now();
    let response = next.run(req).await;
    let elapsed = start.elapsed().as_secs_f64();

    let status = response.status().as_u16().to_string();
    state
        .metrics
        .observe_request(&method, &endpoint, &status, elapsed);

    tracing::debug!(%method, %endpoint, %status, elapsed_secs = elapsed, "request");

    response
}

/// Collapse a matched route template into the endpoint label the metrics use.
/// Path parameters never appear in label values (unbounded cardinality).
fn endpoint_label(template: &str) -> &str {
    match template {
        "/users/:id/login" => "/users/login",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_template_collapses_to_static_label() {
        assert_eq!(endpoint_label("/users/:id/login"), "/users/login");
    }

    #[test]
    fn other_templates_pass_through() {
        assert_eq!(endpoint_label("/products"), "/products");
        assert_eq!(endpoint_label("/api/v2/data"), "/api/v2/data");
        assert_eq!(endpoint_label("/"), "/");
    }
}
