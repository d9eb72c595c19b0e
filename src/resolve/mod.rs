//! Resolver functions backing the API fields
//!
//! Each function validates its arguments, then calls into the cache, paging
//! and status layers. Results are plain data ready to be serialized.

mod environment;
mod listing;
mod mutation;

pub use environment::environment;
pub use listing::{local_labbooks, remote_labbooks};
pub use mutation::{create_labbook, delete_remote_labbook};
