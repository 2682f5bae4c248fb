use anyhow::{Context, Result};
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the generation/billing service, without a trailing slash.
    pub api_url: String,
    /// Interface the page server binds. Loopback by default: the pages act
    /// with the operator's stored token.
    pub http_host: String,
    pub http_port: u16,
    /// JSON file backing the persistent store (session token).
    pub token_file: String,

    pub log_level: String,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            api_url: normalize_api_url(&env_or("API_URL", DEFAULT_API_URL))?,
            http_host: env_or("HTTP_HOST", "127.0.0.1"),
            http_port: env_or("HTTP_PORT", "3000")
                .parse()
                .context("invalid HTTP_PORT")?,
            token_file: env_or("TOKEN_FILE", "session.json"),

            log_level: env_or("LOG_LEVEL", "info"),
            log_json: env_or("LOG_FORMAT", "text").eq_ignore_ascii_case("json"),
        })
    }

    /// Config pointing at an arbitrary service, used by tests and tooling.
    pub fn with_api_url(api_url: &str) -> Result<Self> {
        Ok(Self {
            api_url: normalize_api_url(api_url)?,
            http_host: "127.0.0.1".into(),
            http_port: 3000,
            token_file: "session.json".into(),
            log_level: "info".into(),
            log_json: false,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Paths are appended verbatim, so the base must not end with `/`.
fn normalize_api_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw).with_context(|| format!("invalid API_URL: {raw}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("API_URL must be http or https, got {}", parsed.scheme());
    }
    Ok(raw.trim_end_matches('/').to_string())
}
