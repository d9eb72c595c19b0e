//! Environment command - image and container status of a LabBook

use crate::cli::{EnvironmentArgs, OutputFormat};
use crate::config::Config;
use crate::context::RequestContext;
use crate::error::LabResult;
use crate::labbook::FsLabBookLoader;
use crate::orchestration::create_runtime;
use crate::resolve;
use crate::status::{ContainerStatus, FileJobSource, ImageStatus, StatusReconciler};
use crate::ui::{self, UiContext};
use std::sync::Arc;
use tracing::debug;

/// Execute the environment command
pub async fn execute(args: EnvironmentArgs, config: &Config, username: &str) -> LabResult<()> {
    let loader = Arc::new(FsLabBookLoader::new(&config.storage.working_dir));
    let request = RequestContext::new(username, loader);

    let jobs = FileJobSource::new(config.jobs_path());
    let runtime = create_runtime(config);
    debug!(
        "Probing {} with job records from {}",
        runtime.runtime_name(),
        jobs.path().display()
    );

    let reconciler = StatusReconciler::new(&jobs, runtime.as_ref());
    let status = resolve::environment(&request, &args.owner, &args.name, &reconciler).await?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Plain => println!("{} {}", status.image_status, status.container_status),
        OutputFormat::Table => {
            let ctx = UiContext::detect();
            ui::intro(&ctx, &format!("Environment of {}/{}", args.owner, args.name));
            ui::key_value_status(
                &ctx,
                "Image",
                &status.image_status.to_string(),
                status.image_status == ImageStatus::Exists,
            );
            ui::key_value_status(
                &ctx,
                "Container",
                &status.container_status.to_string(),
                status.container_status == ContainerStatus::Running,
            );
        }
    }

    Ok(())
}
