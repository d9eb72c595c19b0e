//! Container runtime abstraction
//!
//! Provides a trait for the read-only probes environment status needs, so
//! status reconciliation can run against Podman, Docker or a test double.

use crate::error::LabResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Observed state of a project container
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerState {
    /// A container with the requested name exists
    pub exists: bool,
    /// The container is currently running
    pub running: bool,
}

impl ContainerState {
    /// No container with the requested name
    pub fn missing() -> Self {
        Self::default()
    }

    /// A container that exists but is not running
    pub fn stopped() -> Self {
        Self {
            exists: true,
            running: false,
        }
    }

    /// A running container
    pub fn running() -> Self {
        Self {
            exists: true,
            running: true,
        }
    }
}

/// Abstract container runtime interface
///
/// Probe methods distinguish "absent" (`Ok(false)` / `exists == false`) from
/// "could not determine" (`Err`), and callers must not conflate the two.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Check if the runtime is available on this system
    async fn is_available(&self) -> LabResult<bool>;

    /// Check if an image with this name exists locally
    async fn image_exists(&self, image: &str) -> LabResult<bool>;

    /// Look up a container by name
    async fn container_state(&self, name: &str) -> LabResult<ContainerState>;

    /// Get the human-readable runtime name for display
    fn runtime_name(&self) -> &'static str;
}
