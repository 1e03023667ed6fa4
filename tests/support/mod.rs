//! Shared test fixtures: an in-memory fake remote with failure injection.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Mutex;

use kb::error::{Error, Result};
use kb::remote::{ItemPatch, Remote, TagDraft};
use kb::tag::Tag;
use kb::task::{Column, Task, TaskDraft};

/// In-memory stand-in for the REST item store. Individual operations can be
/// made to fail; call counters let tests assert which remote calls happened.
#[derive(Default)]
pub struct FakeRemote {
    pub items: Mutex<Vec<Task>>,
    pub tags: Mutex<Vec<Tag>>,
    next_id: AtomicU64,
    pub fail_create: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
    pub fail_list: AtomicBool,
    pub fail_create_tag: AtomicBool,
    pub healthy: AtomicBool,
    pub update_calls: AtomicU64,
    pub create_calls: AtomicU64,
    pub delete_calls: AtomicU64,
}

impl FakeRemote {
    pub fn new() -> Arc<Self> {
        let remote = Self {
            next_id: AtomicU64::new(100),
            healthy: AtomicBool::new(true),
            ..Self::default()
        };
        Arc::new(remote)
    }

    pub async fn seed_task(&self, id: i64, name: &str, column: Column) {
        self.items.lock().await.push(sample_task(id, name, column));
    }

    pub async fn seed_tag(&self, id: i64, name: &str) {
        self.tags.lock().await.push(Tag {
            id,
            name: name.to_string(),
            color: "#6366F1".to_string(),
        });
    }

    fn next_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) as i64
    }
}

pub fn sample_task(id: i64, name: &str, column: Column) -> Task {
    Task {
        id,
        name: name.to_string(),
        description: String::new(),
        tags: Vec::new(),
        column,
        due_date: None,
        created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        updated_at: None,
    }
}

#[async_trait]
impl Remote for FakeRemote {
    async fn list_items(&self) -> Result<Vec<Task>> {
        if self.fail_list.load(Ordering::Relaxed) {
            return Err(Error::Remote("list failed".to_string()));
        }
        Ok(self.items.lock().await.clone())
    }

    async fn create_item(&self, draft: &TaskDraft) -> Result<Task> {
        self.create_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_create.load(Ordering::Relaxed) {
            return Err(Error::Remote("create failed".to_string()));
        }
        let mut tags = Vec::new();
        for tag_id in &draft.tag_ids {
            if let Some(tag) = self
                .tags
                .lock()
                .await
                .iter()
                .find(|tag| tag.id == *tag_id)
            {
                tags.push(tag.clone());
            }
        }
        let task = Task {
            id: self.next_id(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            tags,
            column: Column::Todo,
            due_date: draft.due_date,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.items.lock().await.push(task.clone());
        Ok(task)
    }

    async fn update_item(&self, id: i64, patch: &ItemPatch) -> Result<Task> {
        self.update_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_update.load(Ordering::Relaxed) {
            return Err(Error::Remote("update failed".to_string()));
        }
        let mut items = self.items.lock().await;
        let task = items
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::NotFound(format!("item {}", id)))?;
        if let Some(name) = &patch.name {
            task.name = name.clone();
        }
        if let Some(description) = &patch.description {
            task.description = description.clone();
        }
        if let Some(column) = patch.column {
            task.column = column;
        }
        if patch.due_date.is_some() {
            task.due_date = patch.due_date;
        }
        task.updated_at = Some(Utc::now());
        Ok(task.clone())
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_delete.load(Ordering::Relaxed) {
            return Err(Error::Remote("delete failed".to_string()));
        }
        let mut items = self.items.lock().await;
        let before = items.len();
        items.retain(|task| task.id != id);
        if items.len() == before {
            return Err(Error::NotFound(format!("item {}", id)));
        }
        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.lock().await.clone())
    }

    async fn create_tag(&self, draft: &TagDraft) -> Result<Tag> {
        if self.fail_create_tag.load(Ordering::Relaxed) {
            return Err(Error::Conflict("tag name already exists".to_string()));
        }
        let tag = Tag {
            id: self.next_id(),
            name: draft.name.clone(),
            color: draft.color.clone(),
        };
        self.tags.lock().await.push(tag.clone());
        Ok(tag)
    }

    async fn health(&self) -> bool {
        self.healthy.load(Ordering::Relaxed)
    }
}
