//! Records Service Library
//!
//! Data-access layer for a residential facility: residents, the services
//! offered to them, the transactions that record service delivery, and the
//! staff accounts that log in to record them.

pub mod config;
pub mod infra;
pub mod repository;
pub mod service;

use tracing::info;

use common::AppError;
use domain::{RegisterUser, User};

use crate::config::RecordsServiceConfig;
use crate::infra::Database;
use crate::repository::entities::resident;
use crate::service::Services;

/// Connect, apply pending migrations and build the service container.
pub async fn connect(config: RecordsServiceConfig) -> Result<Services, Box<dyn std::error::Error>> {
    config.validate()?;
    apply_table_override(&config)?;

    let db = Database::connect(&config.database).await?;
    db.ping().await?;

    Ok(Services::from_connection(db.get_connection(), config.jwt))
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = RecordsServiceConfig::from_env();
    config.validate_tables()?;
    apply_table_override(&config)?;

    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Create a staff account from the command line.
pub async fn register_user(input: RegisterUser) -> Result<User, Box<dyn std::error::Error>> {
    let services = connect(RecordsServiceConfig::from_env()).await?;
    let user = services.auth.register_user(input).await?;
    info!(user_id = %user.user_id, role = %user.role, "Registered user");
    Ok(user)
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

fn apply_table_override(config: &RecordsServiceConfig) -> Result<(), AppError> {
    let Some(name) = &config.residents_table else {
        return Ok(());
    };

    if !resident::set_table_name(name.as_str()) {
        return Err(AppError::internal(format!(
            "Residents table already set to {}",
            resident::table_name()
        )));
    }
    info!(table = %name, "Using residents table override");
    Ok(())
}
