// SPDX-License-Identifier: MIT

use folio_api::config::Config;
use folio_api::db::TestimonialStore;
use folio_api::routes::create_router;
use folio_api::services::{GithubService, LeetCodeService, MailerService};
use folio_api::AppState;
use std::sync::Arc;

/// Create a test app with an in-memory store and default config.
///
/// Upstream clients point at their real endpoints, but no test here may
/// reach the network: validation and configuration checks run first, so
/// a test that would hit an upstream is a test bug.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default())
}

/// Create a test app with a custom config.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config,
        store: TestimonialStore::in_memory(),
        github: GithubService::new(),
        leetcode: LeetCodeService::new(),
        mailer: MailerService::new(),
    });

    (create_router(state.clone()), state)
}

/// Read a JSON response body.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse body as JSON")
}
