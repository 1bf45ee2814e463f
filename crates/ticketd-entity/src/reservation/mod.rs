//! Reservation domain entities.

pub mod model;
pub mod status;

pub use model::{NewReservation, Reservation, ReservationFilter, UpdateReservation};
pub use status::ReservationStatus;
