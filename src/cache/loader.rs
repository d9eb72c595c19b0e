//! Loader abstraction injected into request caches

use crate::cache::key::CacheKey;
use crate::error::LabResult;
use async_trait::async_trait;

/// Source of backing objects for a [`RequestCache`](crate::cache::RequestCache)
///
/// Implementations may perform blocking Git or filesystem reads. They are
/// treated as a black box that either yields the object or fails with a
/// not-found or corrupt-state error.
#[async_trait]
pub trait ObjectLoader: Send + Sync + 'static {
    /// The object produced for a key
    type Object: Send + Sync + 'static;

    /// Load the object identified by `key`
    async fn load(&self, key: &CacheKey) -> LabResult<Self::Object>;
}
