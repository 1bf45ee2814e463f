//! Readiness reporting.

pub mod service;

pub use service::{ComponentHealth, ReadinessReport, ReadinessService};
