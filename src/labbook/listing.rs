//! Enumerating and ordering the LabBooks available locally

use crate::error::{LabError, LabResult};
use crate::labbook::loader::read_metadata;
use crate::labbook::owner_dir;
use crate::paging::{OrderBy, SortDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

/// Listing entry for one local LabBook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabBookSummary {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub description: String,
    pub created_on: DateTime<Utc>,
    pub modified_on: DateTime<Utc>,
}

/// List every LabBook of every owner visible to `username`
///
/// Entries whose metadata cannot be read are skipped with a warning so one
/// broken LabBook does not hide the others.
pub async fn list_local(working_dir: &Path, username: &str) -> LabResult<Vec<LabBookSummary>> {
    let user_dir = working_dir.join(username);
    if !user_dir.is_dir() {
        debug!("No LabBooks for {} under {}", username, working_dir.display());
        return Ok(Vec::new());
    }

    let mut summaries = Vec::new();
    for owner in read_dir_names(&user_dir).await? {
        let labbooks = owner_dir(working_dir, username, &owner);
        if !labbooks.is_dir() {
            continue;
        }

        for name in read_dir_names(&labbooks).await? {
            let root = labbooks.join(&name);
            let metadata = match read_metadata(&root).await {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("Skipping {}/{}: {}", owner, name, e);
                    continue;
                }
            };

            let modified_on = fs::metadata(&root)
                .await
                .and_then(|m| m.modified())
                .map(DateTime::<Utc>::from)
                .unwrap_or(metadata.created_on);

            summaries.push(LabBookSummary {
                id: format!("{}&{}", owner, metadata.name),
                owner: owner.clone(),
                name: metadata.name,
                description: metadata.description,
                created_on: metadata.created_on,
                modified_on,
            });
        }
    }

    debug!("Found {} local LabBooks for {}", summaries.len(), username);
    Ok(summaries)
}

/// Order summaries in place
///
/// Ties are broken by owner then name so the order is total and cursors
/// stay stable between identical listings.
pub fn sort_summaries(items: &mut [LabBookSummary], order_by: OrderBy, sort: SortDirection) {
    items.sort_by(|a, b| {
        let primary = match order_by {
            OrderBy::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            OrderBy::CreatedOn => a.created_on.cmp(&b.created_on),
            OrderBy::ModifiedOn => a.modified_on.cmp(&b.modified_on),
        };
        primary
            .then_with(|| a.owner.cmp(&b.owner))
            .then_with(|| a.name.cmp(&b.name))
    });

    if sort.is_descending() {
        items.reverse();
    }
}

/// Names of the subdirectories of `dir`, skipping hidden entries
async fn read_dir_names(dir: &Path) -> LabResult<Vec<String>> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| LabError::io(format!("reading directory {}", dir.display()), e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| LabError::io(format!("reading entry in {}", dir.display()), e))?
    {
        let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
        let name = entry.file_name().to_string_lossy().to_string();
        if is_dir && !name.starts_with('.') {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labbook::FsLabBookLoader;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn summary(owner: &str, name: &str, created_day: u32) -> LabBookSummary {
        let created_on = Utc.with_ymd_and_hms(2018, 4, created_day, 12, 0, 0).unwrap();
        LabBookSummary {
            id: format!("{}&{}", owner, name),
            owner: owner.to_string(),
            name: name.to_string(),
            description: String::new(),
            created_on,
            modified_on: created_on,
        }
    }

    fn names(items: &[LabBookSummary]) -> Vec<&str> {
        items.iter().map(|s| s.name.as_str()).collect()
    }

    #[tokio::test]
    async fn lists_all_owners() {
        let temp = TempDir::new().unwrap();
        let loader = FsLabBookLoader::new(temp.path());
        loader.create("alice", "alice", "one", "").await.unwrap();
        loader.create("alice", "bob", "two", "").await.unwrap();
        loader.create("carol", "carol", "three", "").await.unwrap();

        let mut found = list_local(temp.path(), "alice").await.unwrap();
        sort_summaries(&mut found, OrderBy::Name, SortDirection::Asc);

        assert_eq!(names(&found), vec!["one", "two"]);
        assert_eq!(found[1].owner, "bob");
        assert_eq!(found[1].id, "bob&two");
    }

    #[tokio::test]
    async fn unknown_user_has_no_labbooks() {
        let temp = TempDir::new().unwrap();
        assert!(list_local(temp.path(), "nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn broken_entries_are_skipped() {
        let temp = TempDir::new().unwrap();
        let loader = FsLabBookLoader::new(temp.path());
        loader.create("alice", "alice", "good", "").await.unwrap();
        std::fs::create_dir_all(owner_dir(temp.path(), "alice", "alice").join("bad")).unwrap();

        let found = list_local(temp.path(), "alice").await.unwrap();
        assert_eq!(names(&found), vec!["good"]);
    }

    #[test]
    fn sort_by_name_is_case_insensitive() {
        let mut items = vec![
            summary("a", "beta", 1),
            summary("a", "Alpha", 2),
            summary("a", "gamma", 3),
        ];
        sort_summaries(&mut items, OrderBy::Name, SortDirection::Asc);
        assert_eq!(names(&items), vec!["Alpha", "beta", "gamma"]);

        sort_summaries(&mut items, OrderBy::Name, SortDirection::Desc);
        assert_eq!(names(&items), vec!["gamma", "beta", "Alpha"]);
    }

    #[test]
    fn sort_by_creation_date() {
        let mut items = vec![
            summary("a", "late", 20),
            summary("a", "early", 1),
            summary("a", "middle", 10),
        ];
        sort_summaries(&mut items, OrderBy::CreatedOn, SortDirection::Desc);
        assert_eq!(names(&items), vec!["late", "middle", "early"]);
    }
}
