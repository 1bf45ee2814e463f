//! Core traits defined in `ticketd-core` and implemented by other crates.

pub mod clock;
pub mod health;
pub mod lock;

pub use clock::{Clock, SystemClock};
pub use health::HealthCheck;
pub use lock::{LockError, LockLease, SeatLockManager};
