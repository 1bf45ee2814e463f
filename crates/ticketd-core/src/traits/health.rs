//! Readiness probe trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// A backend that can report whether it is reachable.
#[async_trait]
pub trait HealthCheck: Send + Sync + 'static {
    /// Short component name used in readiness reports.
    fn component(&self) -> &'static str;

    /// Check that the backend is reachable and answering.
    async fn health_check(&self) -> AppResult<bool>;
}
