//! Mutations that create or delete LabBooks

use crate::context::RequestContext;
use crate::error::LabResult;
use crate::labbook::{FsLabBookLoader, LabBook};
use crate::remote::GitLabClient;
use std::sync::Arc;
use tracing::{info, Instrument};

/// Create `owner/name` and register it with the request cache
///
/// Fields resolved later in the same request read the new LabBook from the
/// cache and never go back to storage for it.
pub async fn create_labbook(
    ctx: &RequestContext<FsLabBookLoader>,
    loader: &FsLabBookLoader,
    owner: &str,
    name: &str,
    description: &str,
) -> LabResult<Arc<LabBook>> {
    let labbook = loader
        .create(ctx.username(), owner, name, description)
        .instrument(ctx.span())
        .await?;
    ctx.prime(labbook);
    ctx.labbook(owner, name).await
}

/// Delete `owner/name` from the remote server
///
/// Without `confirm` nothing is sent and `false` is returned.
pub async fn delete_remote_labbook(
    client: &GitLabClient,
    owner: &str,
    name: &str,
    confirm: bool,
) -> LabResult<bool> {
    if !confirm {
        info!("Dry run: would delete remote LabBook {}/{}", owner, name);
        return Ok(false);
    }

    client.delete_project(owner, name).await?;
    Ok(true)
}
