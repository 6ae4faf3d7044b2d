//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::time::Duration;

use invite_core::Snowflake;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub bot: BotConfig,
    pub engine: EngineConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Identity the engine acts as when granting roles
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    pub user_id: Snowflake,
}

/// Promotion engine tuning
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Upper bound for a single store read or write (milliseconds)
    #[serde(default = "default_store_timeout_ms")]
    pub store_timeout_ms: u64,
    /// Upper bound for the batched role grant (milliseconds)
    #[serde(default = "default_role_grant_timeout_ms")]
    pub role_grant_timeout_ms: u64,
    /// Largest window served by the joins-per-day query
    #[serde(default = "default_join_stats_max_days")]
    pub join_stats_max_days: u32,
}

impl EngineConfig {
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }

    #[must_use]
    pub fn role_grant_timeout(&self) -> Duration {
        Duration::from_millis(self.role_grant_timeout_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: default_store_timeout_ms(),
            role_grant_timeout_ms: default_role_grant_timeout_ms(),
            join_stats_max_days: default_join_stats_max_days(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "invite-ranks".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_store_timeout_ms() -> u64 {
    5000
}

fn default_role_grant_timeout_ms() -> u64 {
    5000
}

fn default_join_stats_max_days() -> u32 {
    60
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &'static str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| optional(key).ok_or(ConfigError::MissingVar(key));

        Ok(Self {
            app: AppSettings {
                name: optional("APP_NAME").unwrap_or_else(default_app_name),
                env: optional("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: optional("API_HOST").unwrap_or_else(default_host),
                port: parse_value("API_PORT", &required("API_PORT")?)?,
            },
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: optional("DATABASE_MAX_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_max_connections),
                min_connections: optional("DATABASE_MIN_CONNECTIONS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_min_connections),
            },
            bot: BotConfig {
                user_id: Snowflake::parse(&required("BOT_USER_ID")?)
                    .map_err(|e| ConfigError::InvalidValue("BOT_USER_ID", e.to_string()))?,
            },
            engine: EngineConfig {
                store_timeout_ms: optional("STORE_TIMEOUT_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_store_timeout_ms),
                role_grant_timeout_ms: optional("ROLE_GRANT_TIMEOUT_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(default_role_grant_timeout_ms),
                join_stats_max_days: match optional("JOIN_STATS_MAX_DAYS") {
                    Some(raw) => parse_join_window(&raw)?,
                    None => default_join_stats_max_days(),
                },
            },
        })
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key, raw.to_string()))
}

fn parse_join_window(raw: &str) -> Result<u32, ConfigError> {
    let days: u32 = parse_value("JOIN_STATS_MAX_DAYS", raw)?;
    if days == 0 {
        return Err(ConfigError::InvalidValue(
            "JOIN_STATS_MAX_DAYS",
            "must be at least 1".to_string(),
        ));
    }
    Ok(days)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const MINIMAL: &[(&str, &str)] = &[
        ("API_PORT", "8080"),
        ("DATABASE_URL", "postgres://localhost/invites"),
        ("BOT_USER_ID", "4242"),
    ];

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::from_lookup(lookup(MINIMAL)).unwrap();
        assert_eq!(config.app.name, "invite-ranks");
        assert_eq!(config.app.env, Environment::Development);
        assert_eq!(config.api.address(), "127.0.0.1:8080");
        assert_eq!(config.database.max_connections, 20);
        assert_eq!(config.bot.user_id, Snowflake::new(4242));
        assert_eq!(config.engine.store_timeout(), Duration::from_secs(5));
        assert_eq!(config.engine.join_stats_max_days, 60);
    }

    #[test]
    fn test_missing_required_var() {
        let err = AppConfig::from_lookup(lookup(&[("API_PORT", "8080")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("DATABASE_URL")));
    }

    #[test]
    fn test_invalid_bot_user_id() {
        let mut pairs = MINIMAL.to_vec();
        pairs.retain(|(k, _)| *k != "BOT_USER_ID");
        pairs.push(("BOT_USER_ID", "not-a-number"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("BOT_USER_ID", _)));
    }

    #[test]
    fn test_invalid_port() {
        let mut pairs = MINIMAL.to_vec();
        pairs[0] = ("API_PORT", "eighty");
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for API_PORT: eighty");
    }

    #[test]
    fn test_engine_overrides() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("STORE_TIMEOUT_MS", "250"));
        pairs.push(("JOIN_STATS_MAX_DAYS", "90"));
        pairs.push(("APP_ENV", "Production"));
        let config = AppConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.engine.store_timeout(), Duration::from_millis(250));
        assert_eq!(config.engine.join_stats_max_days, 90);
        assert!(config.app.env.is_production());
    }

    #[test]
    fn test_zero_join_window_rejected() {
        let mut pairs = MINIMAL.to_vec();
        pairs.push(("JOIN_STATS_MAX_DAYS", "0"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue("JOIN_STATS_MAX_DAYS", _)));

        pairs.pop();
        pairs.push(("JOIN_STATS_MAX_DAYS", "sixty"));
        let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for JOIN_STATS_MAX_DAYS: sixty");
    }
}
