//! Records Service - schema management and account setup.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain::RegisterUser;
use records_service_lib::MigrateAction;

#[derive(Parser)]
#[command(name = "records-service")]
#[command(about = "Residential facility records service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
    /// Create a staff account
    RegisterUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        firstname: String,
        #[arg(long)]
        lastname: String,
        #[arg(long, default_value = "staff")]
        role: String,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Migrate { action } => {
            let migrate_action = match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            };
            records_service_lib::run_migrations(migrate_action).await?;
        }
        Commands::RegisterUser {
            username,
            password,
            firstname,
            lastname,
            role,
        } => {
            let user = records_service_lib::register_user(RegisterUser {
                username: Some(username),
                password: Some(password),
                firstname: Some(firstname),
                lastname: Some(lastname),
                role: Some(role),
            })
            .await?;
            println!("{} {}", user.id, user.user_id);
        }
    }

    Ok(())
}
