// SPDX-License-Identifier: MIT

//! Folio-API: backend for a personal portfolio site.
//!
//! This crate provides the statistics proxy endpoints (GitHub, LeetCode),
//! the contact/testimonial email relays, and the testimonial store.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::TestimonialStore;
use services::{GithubService, LeetCodeService, MailerService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: TestimonialStore,
    pub github: GithubService,
    pub leetcode: LeetCodeService,
    pub mailer: MailerService,
}
