use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub clock: ClockConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub min_password_len: usize,
    pub enable_cors: bool,
}

/// Clock used by the dashboard's "today" queries. All date math is UTC;
/// `FITHUB_TODAY` pins the date so the aggregation is testable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    pub today_override: Option<NaiveDate>,
}

impl ClockConfig {
    pub fn today(&self) -> NaiveDate {
        self.today_override
            .unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_MIN_PASSWORD_LEN") {
            self.security.min_password_len = v.parse().unwrap_or(self.security.min_password_len);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }

        // Clock override for deterministic dashboard dates in tests
        if let Ok(v) = env::var("FITHUB_TODAY") {
            self.clock.today_override = NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok();
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                max_connections: 5,
                connection_timeout: 30,
            },
            security: SecurityConfig {
                jwt_secret: "dev-secret-change-me".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                min_password_len: 5,
                enable_cors: true,
            },
            clock: ClockConfig { today_override: None },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                // Must come from SECURITY_JWT_SECRET; token issuance fails while empty
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                min_password_len: 5,
                enable_cors: true,
            },
            clock: ClockConfig { today_override: None },
        }
    }
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
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.security.min_password_len, 5);
        assert!(!config.security.jwt_secret.is_empty());
        assert!(config.clock.today_override.is_none());
    }

    #[test]
    fn production_requires_explicit_secret() {
        let config = AppConfig::production();
        assert!(config.security.jwt_secret.is_empty());
        assert_eq!(config.security.jwt_expiry_hours, 24);
    }

    #[test]
    fn fixed_clock_reports_pinned_date() {
        let clock = ClockConfig {
            today_override: NaiveDate::from_ymd_opt(2025, 11, 4),
        };
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 11, 4).unwrap());
    }
}
