//! Shared setup for database-backed tests.

#![allow(dead_code)]

use common::{DatabaseConfig, JwtConfig};
use records_service_lib::infra::Database;
use records_service_lib::repository::FieldMap;
use records_service_lib::service::Services;
use sea_orm::DatabaseConnection;
use serde_json::Value;

pub const SECRET: &str = "integration-test-secret-key-32-chars!";

/// Fresh in-memory database with all migrations applied.
///
/// A single pooled connection keeps every query on the same in-memory file.
pub async fn setup_db() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    let db = Database::connect(&config)
        .await
        .expect("in-memory database should start");
    db.get_connection()
}

pub async fn setup_services() -> Services {
    let db = setup_db().await;
    Services::from_connection(
        db,
        JwtConfig {
            secret: SECRET.to_string(),
        },
    )
}

pub fn fields(value: Value) -> FieldMap {
    value.as_object().cloned().expect("test fields must be an object")
}
