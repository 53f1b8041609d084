//! Webhook delivery context and envelope types.

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::WebhookError;

/// Event kind sent when a canvas is first opened.
pub const KIND_CANVAS_INITIALIZED: &str = "canvas.initialized";
/// Event kind sent when a canvas button is clicked.
pub const KIND_CANVAS_INTERACTION: &str = "canvas.interaction";

/// The deserialized webhook body.
///
/// `button_id` is only present on interactions; `entry_id` is the
/// platform's idea of which entry the canvas belongs to and is used
/// as a recovery hint when the button identifier is unparseable.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEnvelope {
    pub kind: String,
    pub canvas_id: String,
    #[serde(default)]
    pub entry_id: Option<String>,
    #[serde(default)]
    pub button_id: Option<String>,
}

/// Per-delivery context.
#[derive(Debug, Clone)]
pub struct WebhookContext {
    pub request_id: String,
    pub received_at: DateTime<Utc>,
    pub envelope: WebhookEnvelope,
}

impl WebhookContext {
    pub fn new(envelope: WebhookEnvelope) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            received_at: Utc::now(),
            envelope,
        }
    }
}

/// Parses a webhook body into an envelope.
pub fn parse_envelope(body: &[u8]) -> Result<WebhookEnvelope, WebhookError> {
    serde_json::from_slice(body).map_err(|e| WebhookError::BadBody(e.to_string()))
}

/// Returns a header value as a string, if present and valid UTF-8.
pub fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
