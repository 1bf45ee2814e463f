//! Seat domain entities.

pub mod model;
pub mod status;

pub use model::{Seat, UpdateSeat};
pub use status::SeatStatus;
