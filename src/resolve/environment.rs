//! Environment status field of a LabBook

use crate::cache::ObjectLoader;
use crate::context::RequestContext;
use crate::error::LabResult;
use crate::labbook::LabBook;
use crate::status::{EnvironmentStatus, StatusReconciler};
use tracing::{debug, Instrument};

/// Image and container status of `owner/name`
///
/// The LabBook is resolved through the request cache first, so a missing
/// LabBook is reported as not found instead of as a status.
pub async fn environment<L>(
    ctx: &RequestContext<L>,
    owner: &str,
    name: &str,
    reconciler: &StatusReconciler<'_>,
) -> LabResult<EnvironmentStatus>
where
    L: ObjectLoader<Object = LabBook>,
{
    load_and_reconcile(ctx, owner, name, reconciler)
        .instrument(ctx.span())
        .await
}

async fn load_and_reconcile<L>(
    ctx: &RequestContext<L>,
    owner: &str,
    name: &str,
    reconciler: &StatusReconciler<'_>,
) -> LabResult<EnvironmentStatus>
where
    L: ObjectLoader<Object = LabBook>,
{
    let labbook = ctx.labbook(owner, name).await?;
    let key = ctx.key(&labbook.owner, &labbook.name);

    let status = reconciler.reconcile(&key).await?;
    debug!(
        "Environment of {}: image {}, container {}",
        labbook.node_id(),
        status.image_status,
        status.container_status
    );
    Ok(status)
}
