use std::time::Duration;

use anyhow::{Context, Result};

use crate::orchestrator::prompts::{DEFAULT_MAX_AGENTS, DEFAULT_TIMEOUT_MS};

/// Application configuration loaded from environment variables.
/// Everything has a default; malformed numeric values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Base URL of the orchestration service. `None` → offline, every panel falls back.
    pub orchestrator_url: Option<String>,
    pub orchestrator_api_key: Option<String>,
    pub orchestrator_timeout: Duration,
    pub orchestrator_max_agents: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            orchestrator_url: optional_env("ORCHESTRATOR_URL"),
            orchestrator_api_key: optional_env("ORCHESTRATOR_API_KEY"),
            orchestrator_timeout: Duration::from_millis(
                parse_env("ORCHESTRATOR_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)
                    .context("ORCHESTRATOR_TIMEOUT_MS must be a number of milliseconds")?,
            ),
            orchestrator_max_agents: parse_env("ORCHESTRATOR_MAX_AGENTS", DEFAULT_MAX_AGENTS)
                .context("ORCHESTRATOR_MAX_AGENTS must be a positive integer")?,
        })
    }
}

/// Unset or blank → `None`.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("invalid value '{raw}' for {key}")),
        None => Ok(default),
    }
}
