//! sqlx store implementations.

pub mod concert;
pub mod reservation;
pub mod seat;
pub mod zone;

pub use concert::ConcertRepository;
pub use zone::ZoneRepository;
