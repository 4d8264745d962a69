//! Application configuration loaded from environment variables, once at
//! startup.

use std::env;

use minigram_infra::{DatabaseConfig, JwtConfig};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub joke_api_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(20),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(2),
        };

        let secret = env::var("JWT_SECRET").unwrap_or_else(|_| JwtConfig::default().secret);
        if secret == JwtConfig::default().secret {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }
        let jwt = JwtConfig {
            secret,
            expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24),
            issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| JwtConfig::default().issuer),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            jwt,
            joke_api_key: env::var("API_NINJAS_KEY").ok().filter(|k| !k.is_empty()),
        })
    }
}
