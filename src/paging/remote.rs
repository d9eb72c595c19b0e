//! Paging over a backend that serves one numbered page at a time
//!
//! The backend has no random access and reports no totals, so cursors
//! carry page numbers and `hasNextPage` is inferred from a full page.

use crate::error::{LabError, LabResult};
use crate::paging::connection::{Connection, ConnectionArgs, Edge};
use crate::paging::cursor::{Cursor, CursorKind};
use crate::paging::order::{OrderBy, SortDirection};
use async_trait::async_trait;
use tracing::debug;

/// Page size used when neither `first` nor `last` is given
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// One request to a paginated backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page number
    pub page: usize,
    /// Number of items per page
    pub per_page: usize,
    pub order_by: OrderBy,
    pub sort: SortDirection,
}

impl PageRequest {
    /// Translate connection arguments into a page request
    ///
    /// `before` takes precedence over `after`; `first` over `last`.
    pub fn from_args(
        args: &ConnectionArgs,
        order_by: OrderBy,
        sort: SortDirection,
        default_page_size: usize,
    ) -> LabResult<Self> {
        let page = if let Some(before) = &args.before {
            before.decode(CursorKind::Page)?.saturating_sub(1)
        } else if let Some(after) = &args.after {
            after.decode(CursorKind::Page)?.saturating_add(1)
        } else {
            0
        };

        let per_page = args.first.or(args.last).unwrap_or(default_page_size);
        if per_page == 0 {
            return Err(LabError::InvalidPaging(
                "page size must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            page,
            per_page,
            order_by,
            sort,
        })
    }
}

/// Backend serving numbered pages
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Item type of a page
    type Item: Send;

    /// Fetch exactly one page
    async fn fetch_page(&self, request: &PageRequest) -> LabResult<Vec<Self::Item>>;
}

/// Resolve one connection against `source` with a single fetch
pub async fn paginate<S: PageSource + ?Sized>(
    source: &S,
    args: &ConnectionArgs,
    order_by: OrderBy,
    sort: SortDirection,
    default_page_size: usize,
) -> LabResult<Connection<S::Item>> {
    let request = PageRequest::from_args(args, order_by, sort, default_page_size)?;
    debug!(
        "Fetching remote page {} (per_page={}, order_by={}, sort={})",
        request.page, request.per_page, request.order_by, request.sort
    );

    let items = source.fetch_page(&request).await?;
    let has_next_page = items.len() == request.per_page;
    let has_previous_page = request.page > 0;

    // Every edge of a page shares the page cursor
    let cursor = Cursor::page(request.page);
    let edges = items
        .into_iter()
        .map(|node| Edge {
            node,
            cursor: cursor.clone(),
        })
        .collect();

    Ok(Connection::new(edges, has_previous_page, has_next_page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serves pages out of a fixed list and records every request
    struct RecordingSource {
        items: Vec<u32>,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl RecordingSource {
        fn new(count: u32) -> Self {
            Self {
                items: (0..count).collect(),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requests(&self) -> Vec<PageRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for RecordingSource {
        type Item = u32;

        async fn fetch_page(&self, request: &PageRequest) -> LabResult<Vec<u32>> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self
                .items
                .iter()
                .copied()
                .skip(request.page * request.per_page)
                .take(request.per_page)
                .collect())
        }
    }

    async fn run(source: &RecordingSource, args: ConnectionArgs) -> Connection<u32> {
        paginate(
            source,
            &args,
            OrderBy::Name,
            SortDirection::Asc,
            DEFAULT_PAGE_SIZE,
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn after_cursor_requests_next_page() {
        let source = RecordingSource::new(5);

        let first = run(&source, ConnectionArgs::first(2)).await;
        assert_eq!(first.nodes().copied().collect::<Vec<_>>(), vec![0, 1]);
        assert!(first.page_info.has_next_page);
        assert!(!first.page_info.has_previous_page);

        let cursor = first.page_info.end_cursor.clone().unwrap();
        let second = run(&source, ConnectionArgs::first(2).after(cursor)).await;
        assert_eq!(second.nodes().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert!(second.page_info.has_previous_page);

        let requests = source.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!((requests[0].page, requests[0].per_page), (0, 2));
        assert_eq!((requests[1].page, requests[1].per_page), (1, 2));
    }

    #[tokio::test]
    async fn short_page_means_no_next_page() {
        let source = RecordingSource::new(5);
        let args = ConnectionArgs::first(2).after(Cursor::page(1));
        let conn = run(&source, args).await;

        assert_eq!(conn.nodes().copied().collect::<Vec<_>>(), vec![4]);
        assert!(!conn.page_info.has_next_page);
        assert!(conn.page_info.has_previous_page);
    }

    #[tokio::test]
    async fn edges_share_the_page_cursor() {
        let source = RecordingSource::new(5);
        let conn = run(&source, ConnectionArgs::first(3)).await;

        assert!(conn.edges.iter().all(|e| e.cursor == Cursor::page(0)));
        assert_eq!(conn.page_info.start_cursor, conn.page_info.end_cursor);
    }

    #[tokio::test]
    async fn before_cursor_requests_previous_page() {
        let source = RecordingSource::new(50);
        run(&source, ConnectionArgs::last(5).before(Cursor::page(3))).await;
        run(&source, ConnectionArgs::last(5).before(Cursor::page(0))).await;

        let pages: Vec<_> = source.requests().iter().map(|r| (r.page, r.per_page)).collect();
        assert_eq!(pages, vec![(2, 5), (0, 5)]);
    }

    #[tokio::test]
    async fn default_page_size_applies() {
        let source = RecordingSource::new(50);
        let conn = run(&source, ConnectionArgs::default()).await;

        assert_eq!(conn.len(), DEFAULT_PAGE_SIZE);
        assert_eq!(source.requests()[0].per_page, DEFAULT_PAGE_SIZE);
    }

    #[tokio::test]
    async fn empty_page_has_no_cursors() {
        let source = RecordingSource::new(0);
        let conn = run(&source, ConnectionArgs::first(2)).await;

        assert!(conn.is_empty());
        assert!(!conn.page_info.has_next_page);
        assert_eq!(conn.page_info.end_cursor, None);
    }

    #[tokio::test]
    async fn invalid_arguments_fail_before_fetching() {
        let source = RecordingSource::new(5);

        let zero = paginate(
            &source,
            &ConnectionArgs::first(0),
            OrderBy::Name,
            SortDirection::Asc,
            DEFAULT_PAGE_SIZE,
        )
        .await;
        assert!(matches!(zero, Err(LabError::InvalidPaging(_))));

        let local_cursor = paginate(
            &source,
            &ConnectionArgs::first(2).after(Cursor::offset(1)),
            OrderBy::Name,
            SortDirection::Asc,
            DEFAULT_PAGE_SIZE,
        )
        .await;
        assert!(matches!(local_cursor, Err(LabError::InvalidCursor(_))));

        assert!(source.requests().is_empty());
    }
}
