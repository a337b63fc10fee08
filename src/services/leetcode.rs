// SPDX-License-Identifier: MIT

//! LeetCode statistics proxy.
//!
//! Fetches the upstream stats payload, validates its success marker, and
//! reshapes it (plus the derived streak aggregates) into the front-end
//! contract. Everything is re-fetched and re-derived per request; there
//! is deliberately no caching layer.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{StreakResult, SubmissionCalendar};
use crate::time_utils::format_day;

/// LeetCode stats API client.
#[derive(Clone)]
pub struct LeetCodeClient {
    http: reqwest::Client,
    base_url: String,
}

impl LeetCodeClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: "https://leetcode-stats-api.herokuapp.com".to_string(),
        }
    }

    /// Override the upstream endpoint (tests).
    pub fn with_base_url(base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base.to_string(),
        }
    }

    /// Fetch the raw stats payload for a user.
    pub async fn fetch_stats(&self, username: &str) -> Result<LeetCodeUpstream, AppError> {
        let url = format!("{}/{}", self.base_url, username);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("LeetCode request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "LeetCode HTTP {}: {}",
                status, body
            )));
        }

        let payload: LeetCodeUpstream = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("LeetCode JSON parse error: {}", e)))?;

        // The upstream reports errors with HTTP 200 and a status field.
        if payload.status != "success" {
            return Err(AppError::Upstream(format!(
                "LeetCode reported failure: {}",
                payload.message.as_deref().unwrap_or("no message")
            )));
        }

        Ok(payload)
    }
}

impl Default for LeetCodeClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw upstream payload. Fields default so a sparse payload still parses;
/// the status marker is validated before any of them are trusted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeUpstream {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_solved: u64,
    #[serde(default)]
    pub total_questions: u64,
    #[serde(default)]
    pub easy_solved: u64,
    #[serde(default)]
    pub total_easy: u64,
    #[serde(default)]
    pub medium_solved: u64,
    #[serde(default)]
    pub total_medium: u64,
    #[serde(default)]
    pub hard_solved: u64,
    #[serde(default)]
    pub total_hard: u64,
    #[serde(default)]
    pub acceptance_rate: f64,
    #[serde(default)]
    pub ranking: u64,
    #[serde(default)]
    pub contest_rank: Option<u64>,
    #[serde(default)]
    pub submission_calendar: SubmissionCalendar,
}

/// Aggregated LeetCode statistics (front-end contract).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeStatsResponse {
    pub total_solved: u64,
    pub total_questions: u64,
    pub easy_solved: u64,
    pub easy_total: u64,
    pub medium_solved: u64,
    pub medium_total: u64,
    pub hard_solved: u64,
    pub hard_total: u64,
    pub streak: u32,
    pub max_streak: u32,
    pub total_days: u32,
    pub last_solved: Option<String>,
    pub contest_rank: Option<u64>,
    pub global_rank: u64,
    pub acceptance_rate: f64,
    pub completion_rate: f64,
    pub total_submissions: u64,
}

/// High-level LeetCode statistics service.
#[derive(Clone)]
pub struct LeetCodeService {
    client: LeetCodeClient,
}

impl LeetCodeService {
    pub fn new() -> Self {
        Self {
            client: LeetCodeClient::new(),
        }
    }

    pub fn with_client(client: LeetCodeClient) -> Self {
        Self { client }
    }

    /// Fetch upstream stats and derive the full response.
    pub async fn stats(&self, username: &str) -> Result<LeetCodeStatsResponse, AppError> {
        let upstream = self.client.fetch_stats(username).await?;
        Ok(build_response(upstream))
    }
}

impl Default for LeetCodeService {
    fn default() -> Self {
        Self::new()
    }
}

/// Reshape the upstream payload and streak aggregates into the contract.
fn build_response(upstream: LeetCodeUpstream) -> LeetCodeStatsResponse {
    let streaks = StreakResult::from_calendar(&upstream.submission_calendar);

    let completion_rate = if upstream.total_questions > 0 {
        let rate = upstream.total_solved as f64 / upstream.total_questions as f64 * 100.0;
        (rate * 10.0).round() / 10.0
    } else {
        0.0
    };

    LeetCodeStatsResponse {
        total_solved: upstream.total_solved,
        total_questions: upstream.total_questions,
        easy_solved: upstream.easy_solved,
        easy_total: upstream.total_easy,
        medium_solved: upstream.medium_solved,
        medium_total: upstream.total_medium,
        hard_solved: upstream.hard_solved,
        hard_total: upstream.total_hard,
        streak: streaks.current_streak,
        max_streak: streaks.max_streak,
        total_days: streaks.total_active_days,
        last_solved: streaks.last_active_day.and_then(format_day),
        contest_rank: upstream.contest_rank,
        global_rank: upstream.ranking,
        acceptance_rate: upstream.acceptance_rate,
        completion_rate,
        total_submissions: streaks.total_submissions,
    }
}
