//! Orchestration module for container runtimes
//!
//! Provides read-only probes of local images and containers:
//! - Podman (default)
//! - Docker

mod cli_runtime;
mod factory;
mod runtime;

pub use cli_runtime::CliRuntime;
pub use factory::{create_runtime, create_runtime_for};
pub use runtime::{ContainerRuntime, ContainerState};
