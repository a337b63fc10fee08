// SPDX-License-Identifier: MIT

//! Statistics proxy routes.

use crate::error::{AppError, Result};
use crate::services::github::GithubStatsResponse;
use crate::services::leetcode::LeetCodeStatsResponse;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/github", get(get_github_stats))
        .route("/api/leetcode", get(get_leetcode_stats))
}

/// Aggregated GitHub profile statistics.
///
/// Requires GITHUB_TOKEN; the GraphQL contributions query rejects
/// unauthenticated callers, so the check happens before any fetch.
async fn get_github_stats(State(state): State<Arc<AppState>>) -> Result<Json<GithubStatsResponse>> {
    let token = state
        .config
        .github_token
        .as_deref()
        .ok_or(AppError::Config("GITHUB_TOKEN"))?;

    let stats = state
        .github
        .stats(&state.config.github_username, token)
        .await?;

    Ok(Json(stats))
}

/// Aggregated LeetCode statistics including streak metrics.
async fn get_leetcode_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LeetCodeStatsResponse>> {
    let stats = state.leetcode.stats(&state.config.leetcode_username).await?;

    Ok(Json(stats))
}
