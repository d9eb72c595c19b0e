//! labbook-resolve - resolver support for LabBook APIs
//!
//! Request-scoped object caching, cursor pagination over local and remote
//! listings, and reconciliation of environment status from background jobs
//! and container runtime probes.

pub mod cache;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod labbook;
pub mod orchestration;
pub mod paging;
pub mod remote;
pub mod resolve;
pub mod status;
pub mod ui;

pub use error::{ErrorKind, LabError, LabResult};
