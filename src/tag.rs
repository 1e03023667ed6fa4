//! Tags and the cached tag registry.
//!
//! Tag identity is the server-assigned id; the registry never enforces name
//! uniqueness locally (the remote store may, in which case creation fails
//! with a conflict and the cache is left untouched).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::remote::{Remote, TagDraft};

/// A named, colored label assignable to many tasks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub color: String,
}

/// Observable state of the last tag fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

/// Cached view of the remote tag collection.
pub struct TagRegistry {
    tags: Vec<Tag>,
    state: FetchState,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self {
            tags: Vec::new(),
            state: FetchState::Idle,
        }
    }

    /// Cached tags in server order (plus locally created ones, appended).
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn get(&self, id: i64) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.id == id)
    }

    /// Replaces the cache from a fresh remote fetch. On failure the previous
    /// cache is kept and the failure message is recorded.
    pub async fn refresh(&mut self, remote: &dyn Remote) -> Result<()> {
        self.state = FetchState::Loading;
        match remote.list_tags().await {
            Ok(tags) => {
                self.tags = tags;
                self.state = FetchState::Loaded;
                Ok(())
            }
            Err(err) => {
                self.state = FetchState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Creates a tag on the remote store and appends it to the cache.
    ///
    /// Fails with `Error::Validation` before any remote call when the trimmed
    /// name is empty. On a remote failure the cache is unchanged; the caller
    /// must not assume the tag exists.
    pub async fn create(&mut self, remote: &dyn Remote, name: &str, color: &str) -> Result<Tag> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("tag name is required".to_string()));
        }

        let draft = TagDraft {
            name: name.to_string(),
            color: color.to_string(),
        };
        let tag = remote.create_tag(&draft).await?;
        self.insert(tag.clone());
        Ok(tag)
    }

    /// Appends a tag to the cache, replacing any entry with the same id.
    pub fn insert(&mut self, tag: Tag) {
        if let Some(existing) = self.tags.iter_mut().find(|t| t.id == tag.id) {
            *existing = tag;
        } else {
            self.tags.push(tag);
        }
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: i64, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
            color: "#6366F1".to_string(),
        }
    }

    #[test]
    fn insert_deduplicates_by_id() {
        let mut registry = TagRegistry::new();
        registry.insert(tag(1, "Bug"));
        registry.insert(tag(2, "Feature"));
        registry.insert(tag(1, "Defect"));

        assert_eq!(registry.tags().len(), 2);
        assert_eq!(registry.get(1).unwrap().name, "Defect");
        assert_eq!(registry.tags()[1].name, "Feature");
    }

    #[test]
    fn starts_idle_and_empty() {
        let registry = TagRegistry::new();
        assert_eq!(*registry.state(), FetchState::Idle);
        assert!(registry.tags().is_empty());
    }
}
