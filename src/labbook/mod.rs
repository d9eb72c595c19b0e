//! LabBook backing objects and their on-disk location
//!
//! Only the minimal metadata needed to identify, describe and order a
//! LabBook is read here; Git state and environment definitions belong to
//! the external repository library.

mod listing;
mod loader;

pub use listing::{list_local, sort_summaries, LabBookSummary};
pub use loader::FsLabBookLoader;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory inside a LabBook holding its metadata
pub const METADATA_DIR: &str = ".labbook";

/// Metadata file name inside [`METADATA_DIR`]
pub const METADATA_FILE: &str = "metadata.json";

/// A loaded LabBook
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabBook {
    pub owner: String,
    pub name: String,
    pub description: String,
    pub created_on: DateTime<Utc>,
    /// Root directory of the LabBook repository
    pub root: PathBuf,
}

impl LabBook {
    /// Node id used by resolvers
    pub fn node_id(&self) -> String {
        format!("{}&{}", self.owner, self.name)
    }
}

/// Contents of the metadata file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Metadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub created_on: DateTime<Utc>,
}

/// `<working_dir>/<username>/<owner>/labbooks`
pub(crate) fn owner_dir(working_dir: &Path, username: &str, owner: &str) -> PathBuf {
    working_dir.join(username).join(owner).join("labbooks")
}

/// `<working_dir>/<username>/<owner>/labbooks/<name>`
pub(crate) fn labbook_dir(working_dir: &Path, username: &str, owner: &str, name: &str) -> PathBuf {
    owner_dir(working_dir, username, owner).join(name)
}

pub(crate) fn metadata_path(root: &Path) -> PathBuf {
    root.join(METADATA_DIR).join(METADATA_FILE)
}
