//! Canvas update client.
//!
//! After the webhook has been acknowledged, the recomputed blocks are
//! pushed to the platform out-of-band through this trait. The memory
//! implementation records what would have been published so tests can
//! observe the background path.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;

use crate::canvas::Block;
use crate::error::{NavError, NavResult};

/// Pushes rendered blocks to the external platform.
#[async_trait]
pub trait CanvasClient: Send + Sync {
    async fn publish_blocks(&self, canvas_id: &str, blocks: &[Block]) -> NavResult<()>;
}

/// HTTP client against the platform's canvas API.
pub struct HttpCanvasClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl HttpCanvasClient {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_token: api_token.into(),
        }
    }
}

#[async_trait]
impl CanvasClient for HttpCanvasClient {
    async fn publish_blocks(&self, canvas_id: &str, blocks: &[Block]) -> NavResult<()> {
        let url = format!("{}/canvases/{canvas_id}", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.api_token)
            .json(&json!({ "blocks": blocks }))
            .send()
            .await
            .map_err(|e| NavError::Transient(format!("canvas update failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(NavError::NotFound(canvas_id.to_string()))
        } else {
            Err(NavError::Transient(format!("canvas update returned {status}")))
        }
    }
}

/// Recording client for tests and dry runs.
#[derive(Default)]
pub struct MemoryCanvasClient {
    published: Mutex<Vec<(String, Vec<Block>)>>,
}

impl MemoryCanvasClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// All publishes in order.
    pub fn published(&self) -> Vec<(String, Vec<Block>)> {
        self.published.lock().clone()
    }

    /// The most recent blocks published to a canvas.
    pub fn last_for(&self, canvas_id: &str) -> Option<Vec<Block>> {
        self.published
            .lock()
            .iter()
            .rev()
            .find(|(id, _)| id == canvas_id)
            .map(|(_, blocks)| blocks.clone())
    }
}

#[async_trait]
impl CanvasClient for MemoryCanvasClient {
    async fn publish_blocks(&self, canvas_id: &str, blocks: &[Block]) -> NavResult<()> {
        self.published
            .lock()
            .push((canvas_id.to_string(), blocks.to_vec()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_client_records_last_write() {
        let client = MemoryCanvasClient::new();
        let first = vec![Block::markdown("m", "one")];
        let second = vec![Block::markdown("m", "two")];
        client.publish_blocks("cnv_1", &first).await.unwrap();
        client.publish_blocks("cnv_1", &second).await.unwrap();
        assert_eq!(client.published().len(), 2);
        assert_eq!(client.last_for("cnv_1").unwrap(), second);
        assert!(client.last_for("cnv_2").is_none());
    }
}
