//! Error types for labbook-resolve
//!
//! All modules use `LabResult<T>` as their return type. Every variant maps
//! onto one of the coarse [`ErrorKind`]s that resolvers surface to clients.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for labbook-resolve operations
pub type LabResult<T> = Result<T, LabError>;

/// Coarse classification of an error, as seen by API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The backing object or remote resource is absent
    NotFound,
    /// Bad pagination, ordering or input arguments
    Validation,
    /// A runtime probe, job source or remote API could not be reached
    UpstreamUnavailable,
    /// The operation conflicts with the current state of a resource
    Conflict,
    /// Anything else (local IO, corrupt state, serialization)
    Internal,
}

/// All errors that can occur in labbook-resolve
#[derive(Error, Debug)]
pub enum LabError {
    // Lookup errors
    #[error("LabBook not found: {0}")]
    LabBookNotFound(String),

    #[error("Remote LabBook not found: {0}")]
    RemoteNotFound(String),

    #[error("LabBook at {path} is in a corrupt state: {reason}")]
    CorruptState { path: PathBuf, reason: String },

    // Validation errors
    #[error("Invalid pagination arguments: {0}")]
    InvalidPaging(String),

    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),

    #[error("Unsupported order_by value: {0}. Use `name`, `created_on`, `modified_on`")]
    UnsupportedOrderBy(String),

    #[error("Unsupported sort value: {0}. Use `asc`, `desc`")]
    UnsupportedSort(String),

    #[error("Invalid LabBook name: {name}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Authorization token not provided. {0}")]
    MissingToken(String),

    // Upstream errors
    #[error("Container runtime probe failed: {command}, stderr: {stderr}")]
    ProbeFailed { command: String, stderr: String },

    #[error("Remote API unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Remote API returned status {status} for {url}")]
    RemoteStatus { url: String, status: u16 },

    #[error("Job source unavailable: {0}")]
    JobSourceUnavailable(String),

    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Conflict errors
    #[error("LabBook already exists: {0}")]
    LabBookExists(String),

    #[error("Remote LabBook {0} no longer exists")]
    RemoteGone(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Remote not configured: {0}")]
    RemoteNotConfigured(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A failure recorded by a request cache and handed out again
    #[error(transparent)]
    Cached(Arc<LabError>),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LabError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a probe failure from a command and its stderr
    pub fn probe_failed(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::ProbeFailed {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LabBookNotFound(_) | Self::RemoteNotFound(_) => ErrorKind::NotFound,

            Self::InvalidPaging(_)
            | Self::InvalidCursor(_)
            | Self::UnsupportedOrderBy(_)
            | Self::UnsupportedSort(_)
            | Self::InvalidName { .. }
            | Self::MissingToken(_) => ErrorKind::Validation,

            Self::ProbeFailed { .. }
            | Self::RemoteUnavailable(_)
            | Self::RemoteStatus { .. }
            | Self::JobSourceUnavailable(_)
            | Self::CommandFailed { .. } => ErrorKind::UpstreamUnavailable,

            Self::LabBookExists(_) | Self::RemoteGone(_) => ErrorKind::Conflict,

            Self::Cached(inner) => inner.kind(),

            Self::CorruptState { .. }
            | Self::ConfigInvalid { .. }
            | Self::ConfigDirCreate { .. }
            | Self::RemoteNotConfigured(_)
            | Self::Io { .. }
            | Self::Json(_)
            | Self::TomlParse(_)
            | Self::TomlSerialize(_)
            | Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingToken(_) => Some("Pass --token or set LBR_TOKEN"),
            Self::CommandFailed { .. } => {
                Some("Check that the configured container runtime is installed")
            }
            Self::RemoteNotConfigured(_) => Some("Add a [remote.remotes.<name>] section to the config"),
            Self::RemoteGone(_) => Some("Run: lbr remote list"),
            Self::Cached(inner) => inner.hint(),
            _ => None,
        }
    }
}
