//! Redis-backed seat lock manager.

pub mod client;
pub mod manager;

pub use client::RedisClient;
pub use manager::RedisLockManager;
