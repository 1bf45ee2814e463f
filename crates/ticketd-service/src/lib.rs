//! # ticketd-service
//!
//! Use cases for ticketd. [`ReservationService`] runs the reserve-seat
//! flow across the lock manager and the stores; [`ReadinessService`]
//! reports whether the backends answer.
//!
//! Services take their collaborators as `Arc<dyn Trait>` at construction
//! time.

pub mod health;
pub mod reservation;

pub use health::{ComponentHealth, ReadinessReport, ReadinessService};
pub use reservation::{ReservationService, ReserveSeatRequest, SeatLockGuard, SeatTarget};
