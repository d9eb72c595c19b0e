//! GitLab project API client
//!
//! `ureq` is blocking, so every call runs on the blocking thread pool.

use crate::config::schema::RemoteConfig;
use crate::error::{LabError, LabResult};
use crate::paging::{PageRequest, PageSource};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// A LabBook published on a remote server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLabBook {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub description: String,
    pub created_on: String,
    pub modified_on: String,
}

/// Project record as returned by the API
#[derive(Debug, Deserialize)]
struct ProjectRecord {
    name: String,
    #[serde(default)]
    description: Option<String>,
    created_at: String,
    last_activity_at: String,
    namespace: NamespaceRecord,
}

#[derive(Debug, Deserialize)]
struct NamespaceRecord {
    full_path: String,
}

impl From<ProjectRecord> for RemoteLabBook {
    fn from(record: ProjectRecord) -> Self {
        Self {
            id: format!("{}&{}", record.namespace.full_path, record.name),
            owner: record.namespace.full_path,
            name: record.name,
            description: record.description.unwrap_or_default(),
            created_on: record.created_at,
            modified_on: record.last_activity_at,
        }
    }
}

/// Client for one remote server, authenticated with a bearer token
#[derive(Clone)]
pub struct GitLabClient {
    api_url: String,
    index_url: Option<String>,
    token: String,
    timeout: Duration,
}

impl GitLabClient {
    /// Create a client for `remote`
    ///
    /// The token is supplied by the caller's session; an empty token is
    /// rejected before any request is made.
    pub fn new(remote: &RemoteConfig, token: impl Into<String>) -> LabResult<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(LabError::MissingToken(
                "Cannot access remote LabBooks.".to_string(),
            ));
        }
        Ok(Self {
            api_url: remote.api_url.trim_end_matches('/').to_string(),
            index_url: remote
                .index_url
                .as_deref()
                .map(|url| url.trim_end_matches('/').to_string()),
            token,
            timeout: Duration::from_secs(remote.timeout_secs),
        })
    }

    /// URL of the project listing for one page
    fn projects_url(&self, request: &PageRequest) -> String {
        format!(
            "{}/projects?page={}&per_page={}&order_by={}&sort={}",
            self.api_url,
            request.page,
            request.per_page,
            request.order_by.remote_param(),
            request.sort.as_str()
        )
    }

    /// URL of a single project
    fn project_url(&self, owner: &str, name: &str) -> String {
        format!("{}/projects/{}", self.api_url, project_path(owner, name))
    }

    /// URL of a project's search index entry, if an index is configured
    fn index_entry_url(&self, owner: &str, name: &str) -> Option<String> {
        self.index_url
            .as_ref()
            .map(|base| format!("{}/read/index/{}", base, project_path(owner, name)))
    }

    fn agent(&self) -> ureq::Agent {
        ureq::Agent::config_builder()
            .timeout_global(Some(self.timeout))
            .build()
            .into()
    }

    /// Fetch one page of projects
    pub async fn list_projects(&self, request: &PageRequest) -> LabResult<Vec<RemoteLabBook>> {
        let url = self.projects_url(request);
        let client = self.clone();
        debug!("GET {}", url);

        let records: Vec<ProjectRecord> =
            run_blocking(move || client.get_json(&url)).await?;
        Ok(records.into_iter().map(RemoteLabBook::from).collect())
    }

    /// Whether `owner/name` exists on the remote
    pub async fn project_exists(&self, owner: &str, name: &str) -> LabResult<bool> {
        let url = self.project_url(owner, name);
        let client = self.clone();
        debug!("GET {}", url);

        run_blocking(move || {
            let response = client
                .agent()
                .get(&url)
                .header("Authorization", &client.bearer())
                .call();
            match response {
                Ok(_) => Ok(true),
                Err(ureq::Error::StatusCode(404)) => Ok(false),
                Err(e) => Err(map_error(&url, e)),
            }
        })
        .await
    }

    /// Delete `owner/name` from the remote
    ///
    /// Deleting a project that no longer exists is a conflict, whether it
    /// was gone before the call or disappeared between lookup and delete.
    pub async fn delete_project(&self, owner: &str, name: &str) -> LabResult<()> {
        let path = format!("{}/{}", owner, name);
        if !self.project_exists(owner, name).await? {
            return Err(LabError::RemoteGone(path));
        }

        let url = self.project_url(owner, name);
        let client = self.clone();
        debug!("DELETE {}", url);

        run_blocking(move || {
            match client
                .agent()
                .delete(&url)
                .header("Authorization", &client.bearer())
                .call()
            {
                Ok(_) => Ok(()),
                Err(ureq::Error::StatusCode(404)) => Err(LabError::RemoteGone(path)),
                Err(e) => Err(map_error(&url, e)),
            }
        })
        .await?;

        info!("Deleted {}/{} from {}", owner, name, self.api_url);
        self.remove_from_index(owner, name).await;
        Ok(())
    }

    /// Drop `owner/name` from the search index
    ///
    /// The project is already deleted at this point, so a failure is only
    /// logged.
    async fn remove_from_index(&self, owner: &str, name: &str) {
        let Some(url) = self.index_entry_url(owner, name) else {
            return;
        };
        let client = self.clone();
        debug!("DELETE {}", url);

        let result = run_blocking(move || {
            client
                .agent()
                .delete(&url)
                .header("Authorization", &client.bearer())
                .call()
                .map(|_| ())
                .map_err(|e| map_error(&url, e))
        })
        .await;

        if let Err(e) = result {
            warn!(
                "Failed to remove {}/{} from the search index: {}",
                owner, name, e
            );
        }
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> LabResult<T> {
        let mut response = self
            .agent()
            .get(url)
            .header("Authorization", &self.bearer())
            .call()
            .map_err(|e| map_error(url, e))?;

        response
            .body_mut()
            .read_json::<T>()
            .map_err(|e| LabError::RemoteUnavailable(format!("decoding {}: {}", url, e)))
    }
}

#[async_trait]
impl PageSource for GitLabClient {
    type Item = RemoteLabBook;

    async fn fetch_page(&self, request: &PageRequest) -> LabResult<Vec<RemoteLabBook>> {
        self.list_projects(request).await
    }
}

/// `owner/name` as a single encoded path segment
fn project_path(owner: &str, name: &str) -> String {
    format!("{}%2F{}", encode_segment(owner), encode_segment(name))
}

/// Percent-encode everything but unreserved characters
fn encode_segment(part: &str) -> String {
    let mut encoded = String::with_capacity(part.len());
    for byte in part.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(char::from(byte))
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

fn map_error(url: &str, error: ureq::Error) -> LabError {
    match error {
        ureq::Error::StatusCode(404) => LabError::RemoteNotFound(url.to_string()),
        ureq::Error::StatusCode(status) => LabError::RemoteStatus {
            url: url.to_string(),
            status,
        },
        other => LabError::RemoteUnavailable(format!("{}: {}", url, other)),
    }
}

async fn run_blocking<T, F>(f: F) -> LabResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> LabResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| LabError::Internal(format!("remote request task failed: {}", e)))?
}
