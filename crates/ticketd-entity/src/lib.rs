//! # ticketd-entity
//!
//! Domain entity models for ticketd. Every struct in this crate represents
//! a database table row or an input to one of the stores. Row entities
//! derive `sqlx::FromRow`; status enums map to PostgreSQL enum types.
//!
//! State predicates take the instant to compare against explicitly so the
//! reservation flow can evaluate every check against one request time.

pub mod concert;
pub mod reservation;
pub mod seat;
pub mod zone;

pub use concert::Concert;
pub use reservation::{
    NewReservation, Reservation, ReservationFilter, ReservationStatus, UpdateReservation,
};
pub use seat::{Seat, SeatStatus, UpdateSeat};
pub use zone::Zone;
