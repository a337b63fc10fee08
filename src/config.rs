//! Application configuration loaded from environment variables.
//!
//! Secrets (API tokens, email key) are optional at load time. Handlers
//! check for them before making any network call so a missing secret
//! surfaces as a configuration error response, not a failed startup.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// GitHub account whose stats are aggregated
    pub github_username: String,
    /// LeetCode account whose stats are aggregated
    pub leetcode_username: String,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Path for the testimonial JSON snapshot (None = in-memory only)
    pub testimonials_path: Option<String>,

    // --- Secrets (checked per-request) ---
    /// GitHub bearer token (GraphQL contributions require one)
    pub github_token: Option<String>,
    /// Email provider API key
    pub resend_api_key: Option<String>,
    /// Administrator notification address for relayed forms
    pub contact_email: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            github_username: env::var("GITHUB_USERNAME")
                .map_err(|_| ConfigError::Missing("GITHUB_USERNAME"))?,
            leetcode_username: env::var("LEETCODE_USERNAME")
                .map_err(|_| ConfigError::Missing("LEETCODE_USERNAME"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            testimonials_path: env::var("TESTIMONIALS_PATH").ok(),

            // Secrets - absence is reported when an endpoint needs them
            github_token: env::var("GITHUB_TOKEN")
                .ok()
                .map(|v| v.trim().to_string()),
            resend_api_key: env::var("RESEND_API_KEY")
                .ok()
                .map(|v| v.trim().to_string()),
            contact_email: env::var("CONTACT_EMAIL")
                .ok()
                .map(|v| v.trim().to_string()),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            github_username: "octocat".to_string(),
            leetcode_username: "octocat".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            testimonials_path: None,
            github_token: Some("test_github_token".to_string()),
            resend_api_key: None,
            contact_email: Some("admin@example.com".to_string()),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("GITHUB_USERNAME", "someone");
        env::set_var("LEETCODE_USERNAME", "someone");
        env::remove_var("PORT");
        env::remove_var("RESEND_API_KEY");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.github_username, "someone");
        assert_eq!(config.port, 8080);
        assert!(config.resend_api_key.is_none());
    }
}
