//! Aggregates backend probes into one readiness report.

use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::warn;

use ticketd_core::traits::HealthCheck;

/// Health of one backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component name, e.g. `database`.
    pub name: String,
    /// Whether the probe succeeded.
    pub healthy: bool,
    /// Probe error, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Readiness of the whole service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessReport {
    /// True when every component is healthy.
    pub ready: bool,
    /// Per-component results, in probe order.
    pub components: Vec<ComponentHealth>,
}

/// Runs every registered probe.
#[derive(Clone, Default)]
pub struct ReadinessService {
    probes: Vec<Arc<dyn HealthCheck>>,
}

impl std::fmt::Debug for ReadinessService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.probes.iter().map(|p| p.component()).collect();
        f.debug_struct("ReadinessService")
            .field("probes", &names)
            .finish()
    }
}

impl ReadinessService {
    /// Creates a readiness service over `probes`.
    pub fn new(probes: Vec<Arc<dyn HealthCheck>>) -> Self {
        Self { probes }
    }

    /// Add a probe.
    pub fn with_probe(mut self, probe: Arc<dyn HealthCheck>) -> Self {
        self.probes.push(probe);
        self
    }

    /// Run all probes concurrently. A failing probe marks its component
    /// unhealthy; it never fails the call.
    pub async fn check(&self) -> ReadinessReport {
        let results = join_all(self.probes.iter().map(|probe| async move {
            let name = probe.component().to_string();
            match probe.health_check().await {
                Ok(healthy) => ComponentHealth {
                    name,
                    healthy,
                    error: None,
                },
                Err(e) => {
                    warn!(component = %name, error = %e, "Readiness probe failed");
                    ComponentHealth {
                        name,
                        healthy: false,
                        error: Some(e.to_string()),
                    }
                }
            }
        }))
        .await;

        ReadinessReport {
            ready: results.iter().all(|c| c.healthy),
            components: results,
        }
    }
}
