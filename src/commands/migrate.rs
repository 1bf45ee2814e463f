//! `ticketd migrate`

use std::process::ExitCode;

use tracing::info;

use ticketd_core::config::AppConfig;
use ticketd_core::result::AppResult;
use ticketd_database::migration::run_migrations;

use crate::output;

/// Apply every pending migration.
pub async fn execute(config: &AppConfig) -> AppResult<ExitCode> {
    let db = super::connect_database(config).await?;
    run_migrations(db.pool()).await?;
    db.close().await;

    info!("Migrations applied");
    output::print_json(&serde_json::json!({ "migrated": true }));
    Ok(ExitCode::SUCCESS)
}
