//! Request routing for the webhook service.

use axum::{
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum::extract::State;
use bytes::Bytes;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::{verify_signature, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::client::CanvasClient;
use crate::config::Config;
use crate::context::{
    header, parse_envelope, WebhookContext, KIND_CANVAS_INITIALIZED, KIND_CANVAS_INTERACTION,
};
use crate::error::WebhookError;
use crate::manager::NavigationManager;

/// Application state shared between handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub manager: Arc<NavigationManager>,
    pub canvas: Arc<dyn CanvasClient>,
}

/// Creates the main router for the webhook service.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/webhook", post(webhook_handler))
        .with_state(state)
}

async fn health_handler() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

/// Receives a signed webhook delivery, acknowledges it immediately,
/// and hands rendering off to a detached background task. The ack
/// never waits on content fetches or the canvas update.
async fn webhook_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Err(e) = authenticate(&state.config, &headers, &body) {
        return e.into_response();
    }

    let envelope = match parse_envelope(&body) {
        Ok(envelope) => envelope,
        Err(e) => return e.into_response(),
    };
    let ctx = WebhookContext::new(envelope);

    info!(
        request_id = %ctx.request_id,
        kind = %ctx.envelope.kind,
        canvas_id = %ctx.envelope.canvas_id,
        "webhook received"
    );

    match ctx.envelope.kind.as_str() {
        KIND_CANVAS_INITIALIZED | KIND_CANVAS_INTERACTION => spawn_canvas_update(state, ctx),
        other => debug!(kind = other, "ignoring unhandled event kind"),
    }

    Json(json!({ "ok": true })).into_response()
}

/// Verifies the delivery signature.
fn authenticate(config: &Config, headers: &HeaderMap, body: &[u8]) -> Result<(), WebhookError> {
    let signature = header(headers, SIGNATURE_HEADER).ok_or(WebhookError::SignatureInvalid)?;
    let timestamp = header(headers, TIMESTAMP_HEADER).ok_or(WebhookError::SignatureInvalid)?;
    verify_signature(&config.signing_secret, timestamp, body, signature)
}

/// Fires the one-shot background job that recomputes blocks and
/// pushes them to the platform. No join point: errors are logged and
/// never reach the synchronous response. Overlapping updates for the
/// same canvas resolve last-write-wins at the platform; each update
/// is computed fully from its own identifier.
fn spawn_canvas_update(state: AppState, ctx: WebhookContext) {
    tokio::spawn(async move {
        let envelope = &ctx.envelope;

        let blocks = match envelope.kind.as_str() {
            KIND_CANVAS_INITIALIZED => {
                let Some(entry_id) = envelope.entry_id.as_deref() else {
                    warn!(request_id = %ctx.request_id, "initialized event without entry id");
                    return;
                };
                state.manager.initial_canvas(entry_id).await
            }
            _ => {
                let Some(button_id) = envelope.button_id.as_deref() else {
                    warn!(request_id = %ctx.request_id, "interaction event without button id");
                    return;
                };
                state
                    .manager
                    .handle_interaction(button_id, envelope.entry_id.as_deref())
                    .await
            }
        };

        if let Err(e) = state
            .canvas
            .publish_blocks(&envelope.canvas_id, &blocks)
            .await
        {
            warn!(
                request_id = %ctx.request_id,
                canvas_id = %envelope.canvas_id,
                error = %e,
                "canvas update failed"
            );
        }
    });
}
