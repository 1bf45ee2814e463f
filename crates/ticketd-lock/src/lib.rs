//! # ticketd-lock
//!
//! [`SeatLockManager`](ticketd_core::traits::SeatLockManager) backends:
//!
//! - **redis**: a key per seat holding the owner token, with a `PX` expiry,
//!   checked and set by Lua scripts so every process sees one owner
//! - **memory**: the same contract inside one process, for single-node
//!   runs and tests
//!
//! The backend is selected at runtime from `[lock]` configuration through
//! [`LockManagerDispatch`].

pub mod dispatch;
pub mod keys;
pub mod memory;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use dispatch::LockManagerDispatch;
pub use keys::seat_lock_key;
pub use memory::MemoryLockManager;
#[cfg(feature = "redis-backend")]
pub use redis::{RedisClient, RedisLockManager};
