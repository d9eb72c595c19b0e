//! Environment status reconciliation
//!
//! Job records and runtime probes change independently and are only
//! eventually consistent with each other. The functions here fold one
//! snapshot of each into a single status with fixed precedence:
//! active build job > existing image > failed build job > nothing.

use crate::cache::CacheKey;
use crate::error::LabResult;
use crate::orchestration::{ContainerRuntime, ContainerState};
use crate::status::jobs::{JobRecord, JobSource, JobStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// Status of a LabBook's image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImageStatus {
    /// The image has not been built locally yet
    DoesNotExist,
    /// The image is being built
    BuildInProgress,
    /// The image has been built
    Exists,
    /// The image has been built but its definition changed since.
    /// Not produced yet: there is no definition-change signal to detect it.
    Stale,
    /// The last build failed and no image exists
    BuildFailed,
}

/// Status of a LabBook's container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerStatus {
    NotRunning,
    /// Not produced yet: the runtime probe has no starting state to report
    Starting,
    Running,
}

impl fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImageStatus::DoesNotExist => "DOES_NOT_EXIST",
            ImageStatus::BuildInProgress => "BUILD_IN_PROGRESS",
            ImageStatus::Exists => "EXISTS",
            ImageStatus::Stale => "STALE",
            ImageStatus::BuildFailed => "BUILD_FAILED",
        };
        f.write_str(s)
    }
}

impl fmt::Display for ContainerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContainerStatus::NotRunning => "NOT_RUNNING",
            ContainerStatus::Starting => "STARTING",
            ContainerStatus::Running => "RUNNING",
        };
        f.write_str(s)
    }
}

/// Image and container status of one LabBook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentStatus {
    pub image_status: ImageStatus,
    pub container_status: ContainerStatus,
}

/// Derive the image status from build jobs and the image probe
///
/// `label` only identifies the LabBook in diagnostics.
pub fn image_status(label: &str, jobs: &[JobRecord], image_exists: bool) -> ImageStatus {
    let mut status = if image_exists {
        ImageStatus::Exists
    } else {
        ImageStatus::DoesNotExist
    };

    let builds = || jobs.iter().filter(|job| job.is_image_build());

    if builds().any(|job| job.status == JobStatus::Failed) {
        if status == ImageStatus::Exists {
            // A failed build left over from before the current image
            warn!("Got failed build_image for {}, but image exists", label);
        } else {
            info!("Image status for {} is BUILD_FAILED", label);
            status = ImageStatus::BuildFailed;
        }
    }

    if builds().any(JobRecord::is_active) {
        if status == ImageStatus::Exists {
            warn!("Got started/queued build_image for {}, but image exists", label);
        }
        info!("Image status for {} is BUILD_IN_PROGRESS", label);
        status = ImageStatus::BuildInProgress;
    }

    status
}

/// Derive the container status from the container probe
pub fn container_status(state: ContainerState) -> ContainerStatus {
    if state.exists && state.running {
        ContainerStatus::Running
    } else {
        ContainerStatus::NotRunning
    }
}

/// Gathers job records and runtime probes for one LabBook and reconciles them
pub struct StatusReconciler<'a> {
    jobs: &'a dyn JobSource,
    runtime: &'a dyn ContainerRuntime,
}

impl<'a> StatusReconciler<'a> {
    pub fn new(jobs: &'a dyn JobSource, runtime: &'a dyn ContainerRuntime) -> Self {
        Self { jobs, runtime }
    }

    /// Compute the environment status of the LabBook identified by `key`
    ///
    /// Job source and probe failures are returned as errors; they never
    /// degrade into `DOES_NOT_EXIST` or `NOT_RUNNING`.
    pub async fn reconcile(&self, key: &CacheKey) -> LabResult<EnvironmentStatus> {
        let correlation_key = key.correlation_key();

        let jobs = self.jobs.jobs_for_project(&correlation_key).await?;
        let image_exists = self.runtime.image_exists(&correlation_key).await?;
        let container = self.runtime.container_state(&correlation_key).await?;

        Ok(EnvironmentStatus {
            image_status: image_status(&correlation_key, &jobs, image_exists),
            container_status: container_status(container),
        })
    }
}
