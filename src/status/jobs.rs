//! Background job records produced by the external dispatcher

use crate::error::{LabError, LabResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// `method` tag of image build jobs
pub const BUILD_IMAGE_METHOD: &str = "build_image";

/// Metadata key holding the job's method tag
pub const METHOD_KEY: &str = "method";

/// Metadata key holding the LabBook correlation key
pub const LABBOOK_KEY: &str = "labbook";

/// Lifecycle state of a background job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Started,
    Finished,
    Failed,
}

/// Snapshot of one background job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Dispatcher job key
    pub key: String,

    pub status: JobStatus,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl JobRecord {
    /// Create a record for `method` correlated with `labbook`
    pub fn new(key: impl Into<String>, status: JobStatus, method: &str, labbook: &str) -> Self {
        let mut metadata = HashMap::new();
        metadata.insert(METHOD_KEY.to_string(), method.to_string());
        metadata.insert(LABBOOK_KEY.to_string(), labbook.to_string());
        Self {
            key: key.into(),
            status,
            metadata,
        }
    }

    /// The job's method tag
    pub fn method(&self) -> Option<&str> {
        self.metadata.get(METHOD_KEY).map(String::as_str)
    }

    /// The correlation key of the LabBook the job belongs to
    pub fn labbook(&self) -> Option<&str> {
        self.metadata.get(LABBOOK_KEY).map(String::as_str)
    }

    /// Whether this is an image build job
    pub fn is_image_build(&self) -> bool {
        self.method() == Some(BUILD_IMAGE_METHOD)
    }

    /// Whether the job is queued or running
    pub fn is_active(&self) -> bool {
        matches!(self.status, JobStatus::Queued | JobStatus::Started)
    }
}

/// Query interface of the job dispatcher
#[async_trait]
pub trait JobSource: Send + Sync {
    /// All known jobs correlated with `correlation_key`
    async fn jobs_for_project(&self, correlation_key: &str) -> LabResult<Vec<JobRecord>>;
}

/// Job source reading a JSON array of records from a file
///
/// A missing file means no jobs have been dispatched. A file that cannot be
/// read or parsed is reported as an unavailable job source.
pub struct FileJobSource {
    path: PathBuf,
}

impl FileJobSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> LabResult<Vec<JobRecord>> {
        if !self.path.exists() {
            debug!("No job records at {}", self.path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            LabError::JobSourceUnavailable(format!("reading {}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            LabError::JobSourceUnavailable(format!("parsing {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl JobSource for FileJobSource {
    async fn jobs_for_project(&self, correlation_key: &str) -> LabResult<Vec<JobRecord>> {
        let jobs: Vec<JobRecord> = self
            .read_all()
            .await?
            .into_iter()
            .filter(|job| job.labbook() == Some(correlation_key))
            .collect();

        for job in &jobs {
            debug!(
                "Current job for {}: status {:?}, metadata {:?}",
                correlation_key, job.status, job.metadata
            );
        }
        Ok(jobs)
    }
}
