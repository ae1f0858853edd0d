use std::str::FromStr;

use axum::http::HeaderValue;

/// Errors raised while reading configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got '{value}'")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = parse_env("PORT", "3000", "u16")?;

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        for origin in &cors_origins {
            if HeaderValue::from_str(origin).is_err() {
                return Err(ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    expected: "header value",
                    value: origin.clone(),
                });
            }
        }

        let request_timeout_secs = parse_env("REQUEST_TIMEOUT_SECS", "30", "u64")?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
        })
    }
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
}

impl DbConfig {
    /// Load database settings from the environment.
    ///
    /// `DATABASE_URL` wins when set. Otherwise the URL is assembled from the
    /// individual variables:
    ///
    /// | Env Var              | Default              |
    /// |----------------------|----------------------|
    /// | `DB_HOST`            | `localhost`          |
    /// | `DB_PORT`            | `5432`               |
    /// | `DB_USERNAME`        | `flight_user`        |
    /// | `DB_PASSWORD`        | `flight_pass`        |
    /// | `DB_NAME`            | `flight_management`  |
    /// | `DB_MAX_CONNECTIONS` | `20`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => normalize_scheme(url.trim()),
            _ => {
                let host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".into());
                let port: u16 = parse_env("DB_PORT", "5432", "u16")?;
                let user = std::env::var("DB_USERNAME").unwrap_or_else(|_| "flight_user".into());
                let password =
                    std::env::var("DB_PASSWORD").unwrap_or_else(|_| "flight_pass".into());
                let name = std::env::var("DB_NAME").unwrap_or_else(|_| "flight_management".into());
                format!("postgres://{user}:{password}@{host}:{port}/{name}")
            }
        };

        let default_max = flightdesk_db::DEFAULT_MAX_CONNECTIONS.to_string();
        let max_connections = parse_env("DB_MAX_CONNECTIONS", &default_max, "u32")?;

        Ok(Self {
            url,
            max_connections,
        })
    }
}

/// Accept `postgresql://` URLs by rewriting them to the `postgres://` scheme.
pub fn normalize_scheme(url: &str) -> String {
    match url.strip_prefix("postgresql:") {
        Some(rest) => format!("postgres:{rest}"),
        None => url.to_string(),
    }
}

fn parse_env<T: FromStr>(
    key: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        })
}
