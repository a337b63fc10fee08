// SPDX-License-Identifier: MIT

//! Folio-API Server
//!
//! Backend for a personal portfolio site: statistics proxy endpoints,
//! contact/testimonial email relays, and a testimonial store.

use folio_api::{
    config::Config,
    db::TestimonialStore,
    services::{GithubService, LeetCodeService, MailerService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Folio-API");

    // Open the testimonial store
    let store = match &config.testimonials_path {
        Some(path) => TestimonialStore::open(path)
            .await
            .expect("Failed to open testimonial store"),
        None => {
            tracing::warn!("TESTIMONIALS_PATH not set, testimonials are in-memory only");
            TestimonialStore::in_memory()
        }
    };

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        github: GithubService::new(),
        leetcode: LeetCodeService::new(),
        mailer: MailerService::new(),
    });

    // Build router
    let app = folio_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("folio_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
