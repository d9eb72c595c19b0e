//! Cursor-based pagination
//!
//! One paging contract ([`Connection`], [`Edge`], [`PageInfo`]) served by two
//! backends:
//! - [`local`]: an in-memory ordered sequence, cursors are item offsets
//! - [`remote`]: a numbered-page API, cursors are page numbers
//!
//! Cursors are tagged with their kind, so cursors from one backend are
//! rejected by the other.

mod connection;
mod cursor;
pub mod local;
mod order;
pub mod remote;

pub use connection::{Connection, ConnectionArgs, Edge, PageInfo};
pub use cursor::{Cursor, CursorKind};
pub use order::{OrderBy, SortDirection};
pub use remote::{PageRequest, PageSource, DEFAULT_PAGE_SIZE};
