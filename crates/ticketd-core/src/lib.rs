//! # ticketd-core
//!
//! Core crate for ticketd. Contains the unified error system, configuration
//! schemas, and the traits that the storage, lock and service crates meet at:
//! the distributed seat lock, the clock, and readiness probes.
//!
//! This crate has **no** internal dependencies on other ticketd crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::{AppError, ErrorCode, ErrorKind};
pub use result::AppResult;
