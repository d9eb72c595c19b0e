//! Composite identity of a backing object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one LabBook as seen by one acting user
///
/// Equality and hashing are structural, so two keys built from the same
/// parts always address the same cache entry regardless of the characters
/// the parts contain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CacheKey {
    username: String,
    owner: String,
    name: String,
}

impl CacheKey {
    /// Create a key for `owner/name` loaded on behalf of `username`
    pub fn new(
        username: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// The acting user
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The owner namespace
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The LabBook name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier used to associate background jobs, images and containers
    /// with this LabBook
    ///
    /// Parts are joined with `-`. Inside a part `_` is written as `__` and
    /// `-` as `_-`, so every bare `-` is a separator and distinct keys never
    /// share a correlation key.
    pub fn correlation_key(&self) -> String {
        format!(
            "{}-{}-{}",
            escape_part(&self.username),
            escape_part(&self.owner),
            escape_part(&self.name)
        )
    }
}

fn escape_part(part: &str) -> String {
    let mut escaped = String::with_capacity(part.len());
    for ch in part.chars() {
        if ch == '_' || ch == '-' {
            escaped.push('_');
        }
        escaped.push(ch);
    }
    escaped
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}&{}&{}", self.username, self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn correlation_key_format() {
        let key = CacheKey::new("alice", "bob", "demo");
        assert_eq!(key.correlation_key(), "alice-bob-demo");
        assert_eq!(key.to_string(), "alice&bob&demo");
    }

    #[test]
    fn separator_characters_do_not_collide() {
        // Both render to "a-b-c-d" when joined naively
        let first = CacheKey::new("a-b", "c", "d");
        let second = CacheKey::new("a", "b-c", "d");
        assert_ne!(first, second);

        let set: HashSet<_> = [first, second].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn hyphenated_names_keep_distinct_correlation_keys() {
        let keys = [
            CacheKey::new("alice", "a-b", "c"),
            CacheKey::new("alice", "a", "b-c"),
            CacheKey::new("alice-a", "b", "c"),
            CacheKey::new("alice", "a_", "-b"),
            CacheKey::new("alice", "a_-", "b"),
            CacheKey::new("alice", "a", "_-b"),
        ];

        let rendered: HashSet<_> = keys.iter().map(CacheKey::correlation_key).collect();
        assert_eq!(rendered.len(), keys.len());
        assert_eq!(keys[0].correlation_key(), "alice-a_-b-c");
        assert_eq!(keys[1].correlation_key(), "alice-a-b_-c");
    }

    #[test]
    fn underscores_are_escaped() {
        let key = CacheKey::new("alice", "my_team", "demo");
        assert_eq!(key.correlation_key(), "alice-my__team-demo");
    }
}
