//! Per-request state shared by every resolver of one inbound request

use crate::cache::{CacheKey, ObjectLoader, RequestCache};
use crate::error::LabResult;
use crate::labbook::LabBook;
use std::sync::Arc;
use tracing::{debug, info_span, Span};
use uuid::Uuid;

/// Acting user, request id and object cache of one request
///
/// Build one per inbound request and drop it when the response is sent;
/// nothing it caches outlives the request.
pub struct RequestContext<L: ObjectLoader<Object = LabBook>> {
    request_id: Uuid,
    username: String,
    cache: RequestCache<L>,
    span: Span,
}

impl<L: ObjectLoader<Object = LabBook>> RequestContext<L> {
    pub fn new(username: impl Into<String>, loader: Arc<L>) -> Self {
        let request_id = Uuid::new_v4();
        let username = username.into();
        let span = info_span!("request", id = %request_id, user = %username);
        debug!(parent: &span, "Request context created");

        Self {
            request_id,
            username,
            cache: RequestCache::new(loader),
            span,
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Span that resolver work for this request should run in
    pub fn span(&self) -> Span {
        self.span.clone()
    }

    /// Cache key for `owner/name` as seen by the acting user
    pub fn key(&self, owner: &str, name: &str) -> CacheKey {
        CacheKey::new(self.username.as_str(), owner, name)
    }

    /// Load `owner/name` through the request cache
    pub async fn labbook(&self, owner: &str, name: &str) -> LabResult<Arc<LabBook>> {
        self.cache.load(&self.key(owner, name)).await
    }

    /// Register a LabBook this request already holds
    pub fn prime(&self, labbook: LabBook) {
        let key = self.key(&labbook.owner, &labbook.name);
        self.cache.prime(key, labbook);
    }

    pub fn cache(&self) -> &RequestCache<L> {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labbook::FsLabBookLoader;
    use tempfile::TempDir;

    #[tokio::test]
    async fn contexts_do_not_share_caches() {
        let temp = TempDir::new().unwrap();
        let loader = Arc::new(FsLabBookLoader::new(temp.path()));
        loader.create("alice", "alice", "demo", "").await.unwrap();

        let first = RequestContext::new("alice", Arc::clone(&loader));
        let second = RequestContext::new("alice", Arc::clone(&loader));
        assert_ne!(first.request_id(), second.request_id());

        first.labbook("alice", "demo").await.unwrap();
        assert!(first.cache().contains(&first.key("alice", "demo")));
        assert!(second.cache().is_empty());
    }

    #[tokio::test]
    async fn keys_use_the_acting_user() {
        let temp = TempDir::new().unwrap();
        let ctx = RequestContext::new("bob", Arc::new(FsLabBookLoader::new(temp.path())));

        let key = ctx.key("alice", "demo");
        assert_eq!(key.username(), "bob");
        assert_eq!(key.correlation_key(), "bob-alice-demo");
    }
}
