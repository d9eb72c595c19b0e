//! Connection fields listing LabBooks

use crate::error::LabResult;
use crate::labbook::{list_local, sort_summaries, LabBookSummary};
use crate::paging::{self, Connection, ConnectionArgs, OrderBy, PageSource, SortDirection};
use crate::remote::RemoteLabBook;
use std::path::Path;
use tracing::debug;

/// Local LabBooks visible to `username`, ordered and paginated
///
/// Ordering and paging arguments are checked before the working directory
/// is read.
pub async fn local_labbooks(
    working_dir: &Path,
    username: &str,
    order_by: &str,
    sort: &str,
    args: &ConnectionArgs,
) -> LabResult<Connection<LabBookSummary>> {
    let order_by: OrderBy = order_by.parse()?;
    let sort: SortDirection = sort.parse()?;
    paging::local::validate(args)?;

    let mut summaries = list_local(working_dir, username).await?;
    sort_summaries(&mut summaries, order_by, sort);
    debug!(
        "Paginating {} local LabBooks by {} {}",
        summaries.len(),
        order_by,
        sort
    );

    paging::local::paginate(summaries, args)
}

/// One page of LabBooks from a remote server
pub async fn remote_labbooks<S>(
    source: &S,
    order_by: &str,
    sort: &str,
    args: &ConnectionArgs,
    default_page_size: usize,
) -> LabResult<Connection<RemoteLabBook>>
where
    S: PageSource<Item = RemoteLabBook> + ?Sized,
{
    let order_by: OrderBy = order_by.parse()?;
    let sort: SortDirection = sort.parse()?;

    paging::remote::paginate(source, args, order_by, sort, default_page_size).await
}
