//! Container runtime backed by the `podman` or `docker` CLI
//!
//! Both CLIs share the `inspect` subcommands used here, so one
//! implementation serves either binary.

use crate::error::{LabError, LabResult};
use crate::orchestration::runtime::{ContainerRuntime, ContainerState};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Container runtime that shells out to a Docker-compatible CLI
pub struct CliRuntime {
    binary: String,
    name: &'static str,
}

impl CliRuntime {
    /// Runtime using `podman`
    pub fn podman() -> Self {
        Self {
            binary: "podman".to_string(),
            name: "Podman",
        }
    }

    /// Runtime using `docker`
    pub fn docker() -> Self {
        Self {
            binary: "docker".to_string(),
            name: "Docker",
        }
    }

    /// Runtime using an arbitrary Docker-compatible binary
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            name: "Custom",
        }
    }

    /// Execute a CLI command and return the output
    async fn exec(&self, args: &[&str]) -> LabResult<std::process::Output> {
        debug!("Executing: {} {:?}", self.binary, args);

        Command::new(&self.binary)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| LabError::command_failed(format!("{} {:?}", self.binary, args), e))
    }
}

impl Default for CliRuntime {
    fn default() -> Self {
        Self::podman()
    }
}

/// Whether stderr reports that the inspected object does not exist
fn reports_missing(stderr: &str) -> bool {
    let stderr = stderr.to_lowercase();
    stderr.contains("no such image")
        || stderr.contains("no such container")
        || stderr.contains("no such object")
        || stderr.contains("image not known")
}

/// Interpret `image inspect` output
fn image_probe(command: &str, success: bool, stderr: &str) -> LabResult<bool> {
    if success {
        Ok(true)
    } else if reports_missing(stderr) {
        Ok(false)
    } else {
        Err(LabError::probe_failed(command, stderr.trim()))
    }
}

/// Interpret `container inspect --format {{.State.Status}}` output
fn container_probe(
    command: &str,
    success: bool,
    stdout: &str,
    stderr: &str,
) -> LabResult<ContainerState> {
    if success {
        Ok(ContainerState {
            exists: true,
            running: stdout.trim() == "running",
        })
    } else if reports_missing(stderr) {
        Ok(ContainerState::missing())
    } else {
        Err(LabError::probe_failed(command, stderr.trim()))
    }
}

#[async_trait]
impl ContainerRuntime for CliRuntime {
    async fn is_available(&self) -> LabResult<bool> {
        match self.exec(&["--version"]).await {
            Ok(output) => Ok(output.status.success()),
            Err(LabError::CommandFailed { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn image_exists(&self, image: &str) -> LabResult<bool> {
        let output = self
            .exec(&["image", "inspect", "--format", "{{.Id}}", image])
            .await?;
        image_probe(
            &format!("{} image inspect {}", self.binary, image),
            output.status.success(),
            &String::from_utf8_lossy(&output.stderr),
        )
    }

    async fn container_state(&self, name: &str) -> LabResult<ContainerState> {
        let output = self
            .exec(&["container", "inspect", "--format", "{{.State.Status}}", name])
            .await?;
        container_probe(
            &format!("{} container inspect {}", self.binary, name),
            output.status.success(),
            &String::from_utf8_lossy(&output.stdout),
            &String::from_utf8_lossy(&output.stderr),
        )
    }

    fn runtime_name(&self) -> &'static str {
        self.name
    }
}
