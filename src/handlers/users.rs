use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::metrics::wall_clock_seconds;
use crate::AppState;

// ─── Domain types ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user_id: u64,
    pub tier: &'static str,
    pub logged_in: bool,
}

/// Tier is a pure function of the id, so the same user always lands on the
/// same `user_tier` series.
pub fn user_tier(user_id: u64) -> &'static str {
    match user_id % 3 {
        0 => "free",
        1 => "premium",
        _ => "enterprise",
    }
}

// ─── POST /users/:id/login ───────────────────────────────────────

/// Stamps the per-tier last-login gauge. A non-integer id never reaches
/// this handler: the `Path<u64>` extractor rejects it with 400 and only the
/// RED triplet records that attempt.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<u64>,
) -> Json<LoginResponse> {
    tokio::time::sleep(state.sampler.delay(0.02..0.3)).await;

    let tier = user_tier(user_id);
    state.metrics.mark_login(tier, wall_clock_seconds());

    Json(LoginResponse {
        user_id,
        tier,
        logged_in: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_derivation_is_total_and_stable() {
        assert_eq!(user_tier(3), "free");
        assert_eq!(user_tier(1), "premium");
        assert_eq!(user_tier(2), "enterprise");
        assert_eq!(user_tier(4), user_tier(1));
    }

    #[tokio::test(start_paused = true)]
    async fn login_stamps_the_tier_gauge() {
        let state = Arc::new(AppState::seeded(31).expect("state"));
        let before = wall_clock_seconds();
        let Json(body) = login(State(state.clone()), Path(4)).await;
        let after = wall_clock_seconds();

        assert!(body.logged_in);
        assert_eq!(body.tier, "premium");

        let stamp = state
            .metrics
            .last_user_login_timestamp_seconds
            .with_label_values(&["premium"])
            .get();
        assert!(stamp >= before - 0.001 && stamp <= after + 0.001);
    }
}
