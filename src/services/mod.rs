// SPDX-License-Identifier: MIT

//! Services module - upstream API clients and aggregation logic.

pub mod github;
pub mod leetcode;
pub mod mailer;

pub use github::GithubService;
pub use leetcode::LeetCodeService;
pub use mailer::MailerService;
