use anyhow::{Context, Result};

use crate::matching::aggregate::{MatchConfig, DEFAULT_PARALLEL_THRESHOLD};
use crate::matching::skills::SkillMatchMode;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub anthropic_api_key: String,
    pub port: u16,
    pub rust_log: String,
    /// Exact skill-name comparison instead of substring containment.
    pub match_strict_skills: bool,
    pub match_parallel_threshold: usize,
    pub resume_url_ttl_secs: u64,
    pub max_upload_bytes: usize,
    /// Delivery endpoint for candidate emails; unset disables sending.
    pub email_webhook_url: Option<String>,
    pub email_webhook_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            db_max_connections: optional_env("DB_MAX_CONNECTIONS", 10)?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            port: optional_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            match_strict_skills: optional_env("MATCH_STRICT_SKILLS", false)?,
            match_parallel_threshold: optional_env(
                "MATCH_PARALLEL_THRESHOLD",
                DEFAULT_PARALLEL_THRESHOLD,
            )?,
            resume_url_ttl_secs: optional_env("RESUME_URL_TTL_SECS", 3600)?,
            max_upload_bytes: optional_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            email_webhook_url: non_empty_env("EMAIL_WEBHOOK_URL"),
            email_webhook_token: non_empty_env("EMAIL_WEBHOOK_TOKEN"),
        })
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            skill_mode: if self.match_strict_skills {
                SkillMatchMode::Strict
            } else {
                SkillMatchMode::Loose
            },
            parallel_threshold: self.match_parallel_threshold,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn optional_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
