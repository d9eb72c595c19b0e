//! Remote LabBook servers

mod gitlab;

pub use gitlab::{GitLabClient, RemoteLabBook};
