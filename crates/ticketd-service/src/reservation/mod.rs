//! Seat reservation use case.

pub mod guard;
pub mod request;
pub mod service;

pub use guard::SeatLockGuard;
pub use request::{ReserveSeatRequest, SeatTarget};
pub use service::ReservationService;
