//! Request-scoped object caching
//!
//! Resolvers for one request frequently need the same LabBook from many
//! independent fields. A [`RequestCache`] guarantees the backing object is
//! loaded at most once per request, and lets mutations register an object
//! they already hold so later fields never re-read it from storage.
//!
//! | Lookup | Effect |
//! |--------|--------|
//! | first `load` | loader invoked, future stored |
//! | `load` while pending | same in-flight future returned |
//! | `load` after failure | same failure returned, loader not retried |
//! | `prime` | entry replaced with a resolved value |

mod key;
mod loader;
mod request;

pub use key::CacheKey;
pub use loader::ObjectLoader;
pub use request::RequestCache;
