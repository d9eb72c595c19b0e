//! Filesystem loader for LabBooks

use crate::cache::{CacheKey, ObjectLoader};
use crate::error::{LabError, LabResult};
use crate::labbook::{labbook_dir, metadata_path, LabBook, Metadata, METADATA_DIR};
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Maximum LabBook name length
const MAX_NAME_LEN: usize = 100;

/// Loads LabBooks from `<working_dir>/<username>/<owner>/labbooks/<name>`
#[derive(Debug, Clone)]
pub struct FsLabBookLoader {
    working_dir: PathBuf,
}

impl FsLabBookLoader {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Create a new LabBook on disk and return it
    pub async fn create(
        &self,
        username: &str,
        owner: &str,
        name: &str,
        description: &str,
    ) -> LabResult<LabBook> {
        validate_name(name)?;
        validate_name(owner)?;

        let root = labbook_dir(&self.working_dir, username, owner, name);
        if root.exists() {
            return Err(LabError::LabBookExists(format!("{}/{}", owner, name)));
        }

        fs::create_dir_all(root.join(METADATA_DIR))
            .await
            .map_err(|e| LabError::io(format!("creating {}", root.display()), e))?;

        let metadata = Metadata {
            name: name.to_string(),
            description: description.to_string(),
            created_on: Utc::now(),
        };
        let path = metadata_path(&root);
        fs::write(&path, serde_json::to_string_pretty(&metadata)?)
            .await
            .map_err(|e| LabError::io(format!("writing {}", path.display()), e))?;

        info!("Created LabBook {}/{} at {}", owner, name, root.display());
        Ok(LabBook {
            owner: owner.to_string(),
            name: name.to_string(),
            description: metadata.description,
            created_on: metadata.created_on,
            root,
        })
    }
}

#[async_trait]
impl ObjectLoader for FsLabBookLoader {
    type Object = LabBook;

    async fn load(&self, key: &CacheKey) -> LabResult<LabBook> {
        let root = labbook_dir(&self.working_dir, key.username(), key.owner(), key.name());
        debug!("Loading LabBook {} from {}", key, root.display());

        if !root.is_dir() {
            return Err(LabError::LabBookNotFound(format!(
                "{}/{}",
                key.owner(),
                key.name()
            )));
        }

        let metadata = read_metadata(&root).await?;
        if metadata.name != key.name() {
            return Err(LabError::CorruptState {
                path: root,
                reason: format!(
                    "metadata names LabBook `{}`, expected `{}`",
                    metadata.name,
                    key.name()
                ),
            });
        }

        Ok(LabBook {
            owner: key.owner().to_string(),
            name: metadata.name,
            description: metadata.description,
            created_on: metadata.created_on,
            root,
        })
    }
}

/// Read and parse the metadata file of the LabBook rooted at `root`
pub(crate) async fn read_metadata(root: &Path) -> LabResult<Metadata> {
    let path = metadata_path(root);
    let content = fs::read_to_string(&path)
        .await
        .map_err(|e| LabError::CorruptState {
            path: root.to_path_buf(),
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;

    serde_json::from_str(&content).map_err(|e| LabError::CorruptState {
        path: root.to_path_buf(),
        reason: format!("cannot parse {}: {}", path.display(), e),
    })
}

/// Names become path components and parts of image names
fn validate_name(name: &str) -> LabResult<()> {
    let invalid = |reason: &str| {
        Err(LabError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.is_empty() {
        return invalid("name is empty");
    }
    if name.len() > MAX_NAME_LEN {
        return invalid("name is too long");
    }
    if name.starts_with('-') || name.starts_with('.') {
        return invalid("name must start with a letter or digit");
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return invalid("only letters, digits, `-` and `_` are allowed");
    }
    Ok(())
}
