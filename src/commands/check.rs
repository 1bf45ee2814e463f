//! `ticketd check`

use std::process::ExitCode;
use std::sync::Arc;

use ticketd_core::config::AppConfig;
use ticketd_core::result::AppResult;
use ticketd_core::traits::HealthCheck;
use ticketd_service::ReadinessService;

use crate::output;

/// Print the readiness report. Exits 1 when any component is unhealthy.
pub async fn execute(config: &AppConfig) -> AppResult<ExitCode> {
    let db = super::connect_database(config).await?;
    let locks = super::connect_locks(config).await?;

    let readiness = ReadinessService::new(vec![
        Arc::new(db.clone()) as Arc<dyn HealthCheck>,
        locks as Arc<dyn HealthCheck>,
    ]);
    let report = readiness.check().await;
    db.close().await;

    output::print_json(&report);
    Ok(if report.ready {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
