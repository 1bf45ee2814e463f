//! `ticketd reserve`

use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;

use ticketd_core::config::AppConfig;
use ticketd_core::result::AppResult;
use ticketd_core::traits::SystemClock;
use ticketd_database::{ConcertRepository, PgTransactionFactory, ZoneRepository};
use ticketd_service::{ReservationService, ReserveSeatRequest};

use crate::output;

/// Arguments for the reserve command
#[derive(Debug, Args)]
pub struct ReserveArgs {
    /// Concert id
    #[arg(long)]
    pub concert_id: String,
    /// Zone id
    #[arg(long)]
    pub zone_id: String,
    /// Seat id
    #[arg(long)]
    pub seat_id: String,
    /// Session id; owns the hold
    #[arg(long)]
    pub session_id: String,
}

/// Reserve one seat and print the reservation.
pub async fn execute(args: &ReserveArgs, config: &AppConfig) -> AppResult<ExitCode> {
    let db = super::connect_database(config).await?;
    let locks = super::connect_locks(config).await?;
    let pool = db.pool().clone();

    let service = ReservationService::new(
        &config.reservation,
        Arc::new(ConcertRepository::new(pool.clone())),
        Arc::new(ZoneRepository::new(pool.clone())),
        Arc::new(PgTransactionFactory::new(pool)),
        locks,
        Arc::new(SystemClock),
    );

    let request = ReserveSeatRequest::new(
        args.concert_id.as_str(),
        args.zone_id.as_str(),
        args.seat_id.as_str(),
        args.session_id.as_str(),
    );
    let result = service.reserve_seat(&request).await;
    db.close().await;

    let reservation = result?;
    output::print_json(&reservation);
    Ok(ExitCode::SUCCESS)
}
