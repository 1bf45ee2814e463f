//! CLI command definitions and dispatch.

pub mod check;
pub mod migrate;
pub mod reserve;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use ticketd_core::config::AppConfig;
use ticketd_core::result::AppResult;
use ticketd_database::DatabasePool;
use ticketd_lock::LockManagerDispatch;

/// ticketd seat reservation engine
#[derive(Debug, Parser)]
#[command(name = "ticketd", version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Environment overlay loaded from config/<env>
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run pending database migrations
    Migrate,
    /// Probe the database and lock backend
    Check,
    /// Reserve one seat for one session
    Reserve(reserve::ReserveArgs),
}

impl Cli {
    /// Execute the selected command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<ExitCode> {
        match &self.command {
            Commands::Migrate => migrate::execute(config).await,
            Commands::Check => check::execute(config).await,
            Commands::Reserve(args) => reserve::execute(args, config).await,
        }
    }
}

/// Connect to PostgreSQL.
pub async fn connect_database(config: &AppConfig) -> AppResult<DatabasePool> {
    DatabasePool::connect(&config.database).await
}

/// Build the configured lock backend.
pub async fn connect_locks(config: &AppConfig) -> AppResult<Arc<LockManagerDispatch>> {
    Ok(Arc::new(LockManagerDispatch::from_config(&config.lock).await?))
}
