// SPDX-License-Identifier: MIT

//! GitHub API client and statistics aggregation.
//!
//! Handles:
//! - Repository listing (REST)
//! - Per-repository language byte breakdowns (REST, bounded fan-out)
//! - Contribution totals (GraphQL)
//! - Recent public activity (REST)

use std::collections::HashMap;

use futures_util::{stream, StreamExt};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Cap on simultaneous per-repository language requests.
const MAX_CONCURRENT_LANGUAGE_FETCHES: usize = 8;

/// Languages kept in the aggregated breakdown.
const TOP_LANGUAGES: usize = 5;

const RECENT_EVENTS: usize = 10;

/// GitHub API client.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    graphql_url: String,
}

impl GithubClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: "https://api.github.com".to_string(),
            graphql_url: "https://api.github.com/graphql".to_string(),
        }
    }

    /// Override the API endpoints (tests).
    pub fn with_base_url(base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: base.to_string(),
            graphql_url: format!("{}/graphql", base),
        }
    }

    /// List the user's repositories (most recently pushed first).
    pub async fn list_repos(&self, username: &str, token: &str) -> Result<Vec<Repo>, AppError> {
        let url = format!(
            "{}/users/{}/repos?per_page=100&sort=pushed",
            self.api_base, username
        );
        self.get_json(&url, token).await
    }

    /// Byte counts per language for one repository.
    pub async fn repo_languages(
        &self,
        username: &str,
        repo: &str,
        token: &str,
    ) -> Result<HashMap<String, u64>, AppError> {
        let url = format!("{}/repos/{}/{}/languages", self.api_base, username, repo);
        self.get_json(&url, token).await
    }

    /// Recent public events for the user.
    pub async fn recent_events(
        &self,
        username: &str,
        token: &str,
    ) -> Result<Vec<Event>, AppError> {
        let url = format!(
            "{}/users/{}/events/public?per_page={}",
            self.api_base, username, RECENT_EVENTS
        );
        self.get_json(&url, token).await
    }

    /// Total contributions over the last year, via the GraphQL API.
    pub async fn total_contributions(
        &self,
        username: &str,
        token: &str,
    ) -> Result<u64, AppError> {
        let query = "query($login: String!) { user(login: $login) { \
                     contributionsCollection { contributionCalendar { totalContributions } } } }";
        let body = serde_json::json!({
            "query": query,
            "variables": { "login": username },
        });

        let response = self
            .http
            .post(&self.graphql_url)
            .bearer_auth(token)
            .header(reqwest::header::USER_AGENT, "folio-api")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GitHub GraphQL request failed: {}", e)))?;

        let graphql: GraphqlEnvelope = Self::check_response_json(response).await?;

        if let Some(errors) = graphql.errors {
            let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
            return Err(AppError::Upstream(format!(
                "GitHub GraphQL errors: {}",
                messages.join("; ")
            )));
        }

        graphql
            .data
            .and_then(|d| d.user)
            .map(|u| {
                u.contributions_collection
                    .contribution_calendar
                    .total_contributions
            })
            .ok_or_else(|| AppError::Upstream("GitHub GraphQL returned no user".to_string()))
    }

    /// Generic authenticated GET with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(reqwest::header::USER_AGENT, "folio-api")
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GitHub request failed: {}", e)))?;

        Self::check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 403 {
                tracing::warn!("GitHub rate limit or permission error (403)");
            }

            return Err(AppError::Upstream(format!("GitHub HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("GitHub JSON parse error: {}", e)))
    }
}

impl Default for GithubClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Repository summary from the REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub name: String,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
}

/// Public event from the REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: EventRepo,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

#[derive(Deserialize)]
struct GraphqlEnvelope {
    data: Option<GraphqlData>,
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Deserialize)]
struct GraphqlData {
    user: Option<GraphqlUser>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphqlUser {
    contributions_collection: ContributionsCollection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: ContributionCalendar,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionCalendar {
    total_contributions: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// GithubService - aggregation over the raw API calls
// ─────────────────────────────────────────────────────────────────────────────

/// Aggregated GitHub profile statistics (front-end contract).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GithubStatsResponse {
    pub total_repos: u64,
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_contributions: u64,
    pub languages: Vec<LanguageShare>,
    pub recent_activity: Vec<ActivityItem>,
}

/// One language's share of the aggregated byte totals.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LanguageShare {
    pub name: String,
    pub percentage: f64,
    pub color: &'static str,
}

/// One recent-activity entry.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: String,
    pub created_at: String,
}

/// High-level GitHub statistics service.
#[derive(Clone)]
pub struct GithubService {
    client: GithubClient,
}

impl GithubService {
    pub fn new() -> Self {
        Self {
            client: GithubClient::new(),
        }
    }

    pub fn with_client(client: GithubClient) -> Self {
        Self { client }
    }

    /// Fetch and aggregate the full statistics response.
    ///
    /// Language byte counts are fetched with one request per non-fork
    /// repository, capped at [`MAX_CONCURRENT_LANGUAGE_FETCHES`] in
    /// flight. Completion order does not matter: the merge is a plain
    /// additive fold. Any single upstream failure fails the whole
    /// request; no partial results are returned.
    pub async fn stats(&self, username: &str, token: &str) -> Result<GithubStatsResponse, AppError> {
        let repos = self.client.list_repos(username, token).await?;

        let own_repos: Vec<&Repo> = repos.iter().filter(|r| !r.fork).collect();
        let total_stars: u64 = own_repos.iter().map(|r| r.stargazers_count).sum();
        let total_forks: u64 = own_repos.iter().map(|r| r.forks_count).sum();

        let repo_names: Vec<String> = own_repos.iter().map(|r| r.name.clone()).collect();
        let language_results: Vec<Result<HashMap<String, u64>, AppError>> =
            stream::iter(repo_names)
                .map(|name| {
                    let client = self.client.clone();
                    let username = username.to_string();
                    let token = token.to_string();
                    async move { client.repo_languages(&username, &name, &token).await }
                })
                .buffer_unordered(MAX_CONCURRENT_LANGUAGE_FETCHES)
                .collect()
                .await;

        let mut byte_totals: HashMap<String, u64> = HashMap::new();
        for result in language_results {
            for (language, bytes) in result? {
                *byte_totals.entry(language).or_insert(0) += bytes;
            }
        }

        let total_contributions = self.client.total_contributions(username, token).await?;
        let events = self.client.recent_events(username, token).await?;

        tracing::debug!(
            username,
            repos = repos.len(),
            languages = byte_totals.len(),
            "GitHub stats aggregated"
        );

        Ok(GithubStatsResponse {
            total_repos: repos.len() as u64,
            total_stars,
            total_forks,
            total_contributions,
            languages: aggregate_language_shares(byte_totals),
            recent_activity: events
                .into_iter()
                .map(|e| ActivityItem {
                    kind: e.kind,
                    repo: e.repo.name,
                    created_at: e.created_at,
                })
                .collect(),
        })
    }
}

impl Default for GithubService {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert aggregated byte counts into percentage shares.
///
/// Sorted by share descending, top 5 kept. An empty input (no
/// repositories, or only empty ones) yields an empty list rather than a
/// division by zero.
pub fn aggregate_language_shares(byte_totals: HashMap<String, u64>) -> Vec<LanguageShare> {
    let total: u64 = byte_totals.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut entries: Vec<(String, u64)> = byte_totals.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(TOP_LANGUAGES);

    entries
        .into_iter()
        .map(|(name, bytes)| {
            let percentage = (bytes as f64 / total as f64) * 100.0;
            let color = language_color(&name);
            LanguageShare {
                name,
                percentage: (percentage * 10.0).round() / 10.0,
                color,
            }
        })
        .collect()
}

/// Display color for a language, matching the front end's palette.
fn language_color(name: &str) -> &'static str {
    match name {
        "Rust" => "#dea584",
        "TypeScript" => "#3178c6",
        "JavaScript" => "#f1e05a",
        "Python" => "#3572a5",
        "Go" => "#00add8",
        "Java" => "#b07219",
        "C" => "#555555",
        "C++" => "#f34b7d",
        "C#" => "#178600",
        "HTML" => "#e34c26",
        "CSS" => "#563d7c",
        "Shell" => "#89e051",
        "Ruby" => "#701516",
        "Swift" => "#f05138",
        "Kotlin" => "#a97bff",
        _ => "#8b8b8b",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_byte_totals_yield_no_shares() {
        assert!(aggregate_language_shares(HashMap::new()).is_empty());

        // Present but zero-byte languages must not divide by zero either.
        let zeroes = HashMap::from([("Rust".to_string(), 0u64)]);
        assert!(aggregate_language_shares(zeroes).is_empty());
    }

    #[test]
    fn test_shares_sorted_descending() {
        let totals = HashMap::from([
            ("Rust".to_string(), 750u64),
            ("TypeScript".to_string(), 200),
            ("Shell".to_string(), 50),
        ]);

        let shares = aggregate_language_shares(totals);

        assert_eq!(shares.len(), 3);
        assert_eq!(shares[0].name, "Rust");
        assert_eq!(shares[0].percentage, 75.0);
        assert_eq!(shares[1].name, "TypeScript");
        assert_eq!(shares[1].percentage, 20.0);
        assert_eq!(shares[2].name, "Shell");
        assert_eq!(shares[2].percentage, 5.0);
    }

    #[test]
    fn test_only_top_five_languages_kept() {
        let totals: HashMap<String, u64> = (0..8)
            .map(|i| (format!("Lang{}", i), 100 + i as u64))
            .collect();

        let shares = aggregate_language_shares(totals);

        assert_eq!(shares.len(), 5);
        // Largest byte count first
        assert_eq!(shares[0].name, "Lang7");
    }

    #[test]
    fn test_percentage_rounded_to_one_decimal() {
        let totals = HashMap::from([
            ("Rust".to_string(), 1u64),
            ("Go".to_string(), 2),
        ]);

        let shares = aggregate_language_shares(totals);

        assert_eq!(shares[0].percentage, 66.7);
        assert_eq!(shares[1].percentage, 33.3);
    }

    #[test]
    fn test_language_color_fallback() {
        assert_eq!(language_color("Rust"), "#dea584");
        assert_eq!(language_color("Befunge"), "#8b8b8b");
    }
}
