//! Store contracts the reservation flow runs against.
//!
//! Concert and zone lookups are read-only and pool-bound. Seat and
//! reservation writes are only reachable through a [`Transaction`], so
//! every mutation of one reservation attempt shares a single handle and
//! commits or rolls back as a unit.

use async_trait::async_trait;
use uuid::Uuid;

use ticketd_core::result::AppResult;
use ticketd_entity::{
    Concert, NewReservation, Reservation, ReservationFilter, Seat, UpdateReservation, UpdateSeat,
    Zone,
};

/// Read-only concert lookup.
#[async_trait]
pub trait ConcertStore: Send + Sync + 'static {
    /// Load a concert, failing `NotFound` if absent.
    async fn find_one(&self, id: Uuid) -> AppResult<Concert>;
}

/// Read-only zone lookup.
#[async_trait]
pub trait ZoneStore: Send + Sync + 'static {
    /// Load a zone, failing `NotFound` if absent.
    async fn find_one(&self, id: Uuid) -> AppResult<Zone>;
}

/// Seat access bound to an open transaction.
#[async_trait]
pub trait SeatStore: Send {
    /// Read one seat and hold an exclusive row lock on it until the
    /// enclosing transaction ends. Fails `NotFound` if absent.
    async fn find_with_lock(&mut self, id: Uuid) -> AppResult<Seat>;

    /// Apply the set fields of `update`. Fails `InvalidArgument` when no
    /// field is set and `NotFound` when the row is gone.
    async fn update(&mut self, update: &UpdateSeat) -> AppResult<Seat>;
}

/// Reservation access bound to an open transaction.
#[async_trait]
pub trait ReservationStore: Send {
    /// Reservations matching every set filter field, most recent first.
    async fn find_all(&mut self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>>;

    /// Insert a reservation and return the stored row.
    async fn create(&mut self, reservation: &NewReservation) -> AppResult<Reservation>;

    /// Apply the set fields of `update`. Fails `InvalidArgument` when no
    /// field is set and `NotFound` when the row is gone.
    async fn update(&mut self, update: &UpdateReservation) -> AppResult<Reservation>;
}

/// An open database transaction.
///
/// [`Transaction::seats`] and [`Transaction::reservations`] bind the
/// stores to this transaction. Dropping without commit rolls back.
#[async_trait]
pub trait Transaction: Send {
    /// Seat store bound to this transaction.
    fn seats(&mut self) -> &mut dyn SeatStore;

    /// Reservation store bound to this transaction.
    fn reservations(&mut self) -> &mut dyn ReservationStore;

    /// Make every write durable.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discard every write.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Opens transactions.
#[async_trait]
pub trait TransactionFactory: Send + Sync + 'static {
    /// Begin a new transaction.
    async fn begin(&self) -> AppResult<Box<dyn Transaction>>;
}
