use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Postgres connection string. `None` selects the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
    pub query_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_lifetime_secs: u64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

/// Upper bound on `JWT_LIFETIME` (one year).
pub const MAX_JWT_LIFETIME_SECS: u64 = 365 * 24 * 3600;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("token lifetime must be greater than zero")]
    ZeroLifetime,

    #[error("token lifetime of {0}s exceeds the one-year maximum")]
    LifetimeTooLong(u64),

    #[error("invalid duration '{0}' (expected e.g. 3600, 45m, 12h, 30d)")]
    InvalidDuration(String),

    #[error("DATABASE_URL is required in production")]
    MissingDatabase,
}

impl DatabaseConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }
}

impl SecurityConfig {
    pub fn jwt_lifetime(&self) -> Duration {
        Duration::from_secs(self.jwt_lifetime_secs)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v).filter(|s| !s.trim().is_empty());
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT_SECS") {
            self.database.connect_timeout_secs = v.parse().unwrap_or(self.database.connect_timeout_secs);
        }
        if let Ok(v) = env::var("DATABASE_QUERY_TIMEOUT_MS") {
            self.database.query_timeout_ms = v.parse().unwrap_or(self.database.query_timeout_ms);
        }

        // Security overrides
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("JWT_LIFETIME") {
            match parse_duration_secs(&v) {
                Ok(secs) => self.security.jwt_lifetime_secs = secs,
                Err(e) => tracing::warn!("Ignoring JWT_LIFETIME: {}", e),
            }
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }

        self
    }

    /// Checks the settings the server cannot start without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingSecret);
        }
        if self.security.jwt_lifetime_secs == 0 {
            return Err(ConfigError::ZeroLifetime);
        }
        if self.security.jwt_lifetime_secs > MAX_JWT_LIFETIME_SECS {
            return Err(ConfigError::LifetimeTooLong(self.security.jwt_lifetime_secs));
        }
        if self.environment == Environment::Production && self.database.url.is_none() {
            return Err(ConfigError::MissingDatabase);
        }
        Ok(())
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connect_timeout_secs: 30,
                query_timeout_ms: 10_000,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_lifetime_secs: 30 * 24 * 3600, // 30 days
                enable_cors: true,
                cors_origins: vec![],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connect_timeout_secs: 10,
                query_timeout_ms: 5_000,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_lifetime_secs: 24 * 3600,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connect_timeout_secs: 5,
                query_timeout_ms: 3_000,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_lifetime_secs: 24 * 3600,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

/// Parses `3600`, `45s`, `45m`, `12h` or `30d` into seconds.
pub fn parse_duration_secs(raw: &str) -> Result<u64, ConfigError> {
    let raw = raw.trim();
    let invalid = || ConfigError::InvalidDuration(raw.to_string());

    let (digits, unit) = match raw.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
        Some((i, _)) => raw.split_at(i),
        None => (raw, ""),
    };
    let value: u64 = digits.parse().map_err(|_| invalid())?;
    let multiplier = match unit {
        "" | "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 24 * 3600,
        _ => return Err(invalid()),
    };
    value.checked_mul(multiplier).ok_or_else(invalid)
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(config.database.url.is_none());
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.security.jwt_lifetime_secs, 30 * 24 * 3600);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.database.max_connections, 50);
        assert!(config.database.query_timeout_ms < AppConfig::development().database.query_timeout_ms);
    }

    #[test]
    fn validate_requires_secret() {
        let mut config = AppConfig::development();
        assert_eq!(config.validate(), Err(ConfigError::MissingSecret));

        config.security.jwt_secret = "s3cret".to_string();
        assert_eq!(config.validate(), Ok(()));

        config.security.jwt_lifetime_secs = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroLifetime));
    }

    #[test]
    fn validate_caps_token_lifetime() {
        let mut config = AppConfig::development();
        config.security.jwt_secret = "s3cret".to_string();

        config.security.jwt_lifetime_secs = MAX_JWT_LIFETIME_SECS;
        assert_eq!(config.validate(), Ok(()));

        let huge = parse_duration_secs("11574074074d").unwrap();
        config.security.jwt_lifetime_secs = huge;
        assert_eq!(config.validate(), Err(ConfigError::LifetimeTooLong(huge)));
    }

    #[test]
    fn production_refuses_memory_store() {
        let mut config = AppConfig::production();
        config.security.jwt_secret = "s3cret".to_string();
        assert_eq!(config.validate(), Err(ConfigError::MissingDatabase));

        config.database.url = Some("postgres://localhost/jobs".to_string());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn parses_durations() {
        assert_eq!(parse_duration_secs("3600"), Ok(3600));
        assert_eq!(parse_duration_secs("45m"), Ok(2700));
        assert_eq!(parse_duration_secs("12h"), Ok(43_200));
        assert_eq!(parse_duration_secs("30d"), Ok(2_592_000));
        assert!(parse_duration_secs("").is_err());
        assert!(parse_duration_secs("10w").is_err());
        assert!(parse_duration_secs("h").is_err());
    }
}
