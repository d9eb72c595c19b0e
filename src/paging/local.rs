//! Paging over a fully materialized, ordered sequence
//!
//! Cursors encode each item's index in the sequence as it was when the
//! cursor was issued. If the underlying list changes between requests a
//! cursor may point at a different item; that is accepted.

use crate::error::{LabError, LabResult};
use crate::paging::connection::{Connection, ConnectionArgs, Edge};
use crate::paging::cursor::{Cursor, CursorKind};

/// Slice `items` according to `args`
///
/// The window is `(after, before)`, exclusive on both ends and defaulting
/// to the whole sequence. `first` takes from the front of the window and
/// `last` from the back; passing both is rejected.
pub fn paginate<T>(items: Vec<T>, args: &ConnectionArgs) -> LabResult<Connection<T>> {
    let (after, before) = validate(args)?;

    if items.is_empty() {
        return Ok(Connection::empty());
    }

    let total = items.len();
    let window_start = after.map_or(0, |a| a.saturating_add(1)).min(total);
    let window_end = before.map_or(total, |b| b.min(total)).max(window_start);

    let (slice_start, slice_end) = match (args.first, args.last) {
        (Some(first), _) => (window_start, window_start.saturating_add(first).min(window_end)),
        (_, Some(last)) => (window_end.saturating_sub(last).max(window_start), window_end),
        (None, None) => (window_start, window_end),
    };

    let has_previous_page = slice_start > window_start;
    let has_next_page = slice_end < window_end;

    let edges = items
        .into_iter()
        .enumerate()
        .skip(slice_start)
        .take(slice_end - slice_start)
        .map(|(index, node)| Edge {
            node,
            cursor: Cursor::offset(index),
        })
        .collect();

    Ok(Connection::new(edges, has_previous_page, has_next_page))
}

/// Check `args` without touching any data
///
/// Returns the decoded `after` and `before` offsets.
pub fn validate(args: &ConnectionArgs) -> LabResult<(Option<usize>, Option<usize>)> {
    if args.first.is_some() && args.last.is_some() {
        return Err(LabError::InvalidPaging(
            "`first` and `last` cannot be combined".to_string(),
        ));
    }
    if args.first == Some(0) || args.last == Some(0) {
        return Err(LabError::InvalidPaging(
            "page size must be greater than zero".to_string(),
        ));
    }

    Ok((decode(args.after.as_ref())?, decode(args.before.as_ref())?))
}

fn decode(cursor: Option<&Cursor>) -> LabResult<Option<usize>> {
    cursor.map(|c| c.decode(CursorKind::Offset)).transpose()
}
