//! Runtime factory for creating the configured container runtime

use crate::config::schema::RuntimeBackend;
use crate::config::Config;
use crate::orchestration::cli_runtime::CliRuntime;
use crate::orchestration::runtime::ContainerRuntime;

/// Create the container runtime selected by `[runtime] backend`
pub fn create_runtime(config: &Config) -> Box<dyn ContainerRuntime> {
    create_runtime_for(config.runtime.backend)
}

/// Create a container runtime for an explicit backend
pub fn create_runtime_for(backend: RuntimeBackend) -> Box<dyn ContainerRuntime> {
    match backend {
        RuntimeBackend::Podman => Box::new(CliRuntime::podman()),
        RuntimeBackend::Docker => Box::new(CliRuntime::docker()),
    }
}
