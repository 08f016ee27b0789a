use anyhow::{Context, Result};

/// Application configuration loaded once at startup from environment
/// variables. All provider credentials are optional; with none configured
/// every request takes the local fallback path.
#[derive(Debug, Clone)]
pub struct Config {
    pub perplexity_api_key: Option<String>,
    pub claude_api_key: Option<String>,
    pub grok_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            perplexity_api_key: optional_env("PERPLEXITY_API_KEY"),
            claude_api_key: optional_env("CLAUDE_API_KEY"),
            grok_api_key: optional_env("GROK_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Reads an optional variable; empty values count as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
