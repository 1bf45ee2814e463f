//! # ticketd-database
//!
//! PostgreSQL connection management, migrations, the store contracts the
//! reservation flow runs against, and their sqlx implementations.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod transaction;

pub use connection::DatabasePool;
pub use repositories::{ConcertRepository, ZoneRepository};
pub use store::{
    ConcertStore, ReservationStore, SeatStore, Transaction, TransactionFactory, ZoneStore,
};
pub use transaction::{PgTransaction, PgTransactionFactory};
