use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL URL, or `memory://` to run against the in-memory store.
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub rust_log: String,
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
    /// External personality-test scoring API. Optional.
    pub personality_api_url: Option<String>,
    /// Empty means permissive CORS.
    pub cors_origins: Vec<String>,
}

pub const MEMORY_DATABASE_URL: &str = "memory://";

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let bcrypt_cost = optional_env("BCRYPT_COST")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("BCRYPT_COST must be an integer")?
            .unwrap_or(10);
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31, got {bcrypt_cost}");
        }

        let token_ttl_days = optional_env("TOKEN_TTL_DAYS")
            .map(|v| v.parse::<i64>())
            .transpose()
            .context("TOKEN_TTL_DAYS must be an integer")?
            .unwrap_or(7);
        if token_ttl_days <= 0 {
            bail!("TOKEN_TTL_DAYS must be positive, got {token_ttl_days}");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            token_ttl_days,
            bcrypt_cost,
            personality_api_url: optional_env("PERSONALITY_API_URL"),
            cors_origins: optional_env("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        })
    }

    pub fn uses_memory_store(&self) -> bool {
        self.database_url.starts_with(MEMORY_DATABASE_URL)
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
