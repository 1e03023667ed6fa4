//! Remote item store client.
//!
//! The board talks to a REST-style JSON API: `/items` and `/tags` CRUD plus a
//! lightweight `/health` probe. `Remote` keeps the transport behind a trait so
//! the store and controller can be driven by a fake in tests.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::tag::Tag;
use crate::task::{Column, Task, TaskDraft};

/// Partial update for an item. Only present fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<Column>,
}

impl ItemPatch {
    /// Column-only patch, used by drag-and-drop moves.
    pub fn column(column: Column) -> Self {
        Self {
            column: Some(column),
            ..Self::default()
        }
    }
}

impl From<&TaskDraft> for ItemPatch {
    fn from(draft: &TaskDraft) -> Self {
        Self {
            name: Some(draft.name.clone()),
            description: Some(draft.description.clone()),
            tag_ids: Some(draft.tag_ids.clone()),
            due_date: draft.due_date,
            column: None,
        }
    }
}

/// Creation payload for a tag.
#[derive(Debug, Clone, Serialize)]
pub struct TagDraft {
    pub name: String,
    pub color: String,
}

/// The remote item store collaborator.
#[async_trait]
pub trait Remote: Send + Sync {
    async fn list_items(&self) -> Result<Vec<Task>>;
    async fn create_item(&self, draft: &TaskDraft) -> Result<Task>;
    async fn update_item(&self, id: i64, patch: &ItemPatch) -> Result<Task>;
    async fn delete_item(&self, id: i64) -> Result<()>;
    async fn list_tags(&self) -> Result<Vec<Tag>>;
    async fn create_tag(&self, draft: &TagDraft) -> Result<Tag>;

    /// Liveness probe. Transport failures map to `false`, never to an error.
    async fn health(&self) -> bool;
}

/// HTTP implementation of [`Remote`] backed by reqwest.
pub struct HttpRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRemote {
    /// Builds a client with a per-request timeout. `base_url` is the API
    /// root, e.g. `http://localhost:8000`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Maps non-2xx responses onto the error taxonomy: 404 is `NotFound`, 409 is
/// `Conflict`, anything else non-2xx is `Remote` with the response body.
async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let detail = response.text().await.unwrap_or_default();
    let message = if detail.is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, detail)
    };

    match status {
        reqwest::StatusCode::NOT_FOUND => Err(Error::NotFound(message)),
        reqwest::StatusCode::CONFLICT => Err(Error::Conflict(message)),
        _ => Err(Error::Remote(message)),
    }
}

#[async_trait]
impl Remote for HttpRemote {
    async fn list_items(&self) -> Result<Vec<Task>> {
        let response = self.client.get(self.url("/items")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create_item(&self, draft: &TaskDraft) -> Result<Task> {
        let response = self
            .client
            .post(self.url("/items"))
            .json(draft)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn update_item(&self, id: i64, patch: &ItemPatch) -> Result<Task> {
        let response = self
            .client
            .patch(self.url(&format!("/items/{}", id)))
            .json(patch)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn delete_item(&self, id: i64) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/items/{}", id)))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>> {
        let response = self.client.get(self.url("/tags")).send().await?;
        Ok(check(response).await?.json().await?)
    }

    async fn create_tag(&self, draft: &TagDraft) -> Result<Tag> {
        let response = self
            .client
            .post(self.url("/tags"))
            .json(draft)
            .send()
            .await?;
        Ok(check(response).await?.json().await?)
    }

    async fn health(&self) -> bool {
        match self.client.get(self.url("/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
