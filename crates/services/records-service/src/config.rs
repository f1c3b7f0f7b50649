//! Records service configuration.

use std::env;

use common::{AppError, AppResult, DatabaseConfig, JwtConfig};
use domain::MIN_JWT_SECRET_LENGTH;

/// Records service configuration.
#[derive(Debug, Clone, Default)]
pub struct RecordsServiceConfig {
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    /// Replacement name for the residents table
    pub residents_table: Option<String>,
}

impl RecordsServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = DatabaseConfig::default();

        Self {
            database: DatabaseConfig {
                url: env::var("RECORDS_SERVICE_DATABASE_URL")
                    .or_else(|_| env::var("DATABASE_URL"))
                    .unwrap_or(defaults.url),
                max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(defaults.max_connections),
                min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(defaults.min_connections),
            },
            jwt: JwtConfig {
                secret: env::var("JWT_SECRET").unwrap_or_default(),
            },
            residents_table: env::var("RESIDENTS_TABLE")
                .ok()
                .filter(|name| !name.trim().is_empty()),
        }
    }

    /// Check settings that have no safe default.
    pub fn validate(&self) -> AppResult<()> {
        if self.jwt.secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::validation(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }
        self.validate_tables()
    }

    /// Check table-name overrides (all that schema commands need).
    pub fn validate_tables(&self) -> AppResult<()> {
        if let Some(name) = &self.residents_table {
            let valid = name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid {
                return Err(AppError::validation(format!(
                    "RESIDENTS_TABLE is not a valid table name: {}",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str, table: Option<&str>) -> RecordsServiceConfig {
        RecordsServiceConfig {
            jwt: JwtConfig {
                secret: secret.to_string(),
            },
            residents_table: table.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(config("short", None).validate().is_err());
        assert!(config(&"k".repeat(32), None).validate().is_ok());
    }

    #[test]
    fn test_table_override_must_be_identifier() {
        let secret = "k".repeat(32);
        assert!(config(&secret, Some("facility_residents")).validate().is_ok());
        assert!(config(&secret, Some("residents; DROP")).validate().is_err());
    }
}
