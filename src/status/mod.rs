//! Derived environment status
//!
//! Image and container status are never stored; they are recomputed on every
//! query from the dispatcher's job records and a live runtime probe.

pub mod jobs;
mod reconcile;

pub use jobs::{FileJobSource, JobRecord, JobSource, JobStatus, BUILD_IMAGE_METHOD};
pub use reconcile::{
    container_status, image_status, ContainerStatus, EnvironmentStatus, ImageStatus,
    StatusReconciler,
};
