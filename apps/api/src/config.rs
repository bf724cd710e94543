use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    /// Base URL of the external advisor service (quiz + roadmap generation).
    pub advisor_url: String,
    /// Fixed external mentorship site the support step links out to.
    pub mentorship_url: String,
    pub port: u16,
    pub rust_log: String,
}

const DEFAULT_MENTORSHIP_URL: &str = "https://schoolhouse.world";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            advisor_url: require_env("ADVISOR_URL")?,
            mentorship_url: std::env::var("MENTORSHIP_URL")
                .unwrap_or_else(|_| DEFAULT_MENTORSHIP_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
