//! Error types for the navigation core and the webhook surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors produced by the navigation core.
///
/// Three families share this enum. Malformed-identifier variants come
/// out of the button parsers and are never surfaced to the platform:
/// they degrade to the unknown-action rendering. `InvalidPageState`
/// marks a structurally valid but out-of-range state and is resolved
/// by clamping. `NotFound`/`Transient` are collaborator failures and
/// are the only ones that reach the user, as rendered blocks.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("invalid page state: {0}")]
    InvalidPageState(String),

    #[error("invalid pagination suffix: {0:?}")]
    InvalidSuffix(String),

    #[error("malformed identifier: {0:?}")]
    MalformedIdentifier(String),

    #[error("no recognized subject in identifier: {0:?}")]
    NoSubjectFound(String),

    #[error("not a linked identifier: {0:?}")]
    InvalidLinkedIdentifier(String),

    #[error("missing page marker in identifier: {0:?}")]
    MissingPageMarker(String),

    #[error("missing size marker in identifier: {0:?}")]
    MissingSizeMarker(String),

    #[error("invalid page number: {0:?}")]
    InvalidPageNumber(String),

    #[error("invalid page size: {0:?}")]
    InvalidSizeNumber(String),

    #[error("package not found: {0}")]
    NotFound(String),

    #[error("transient failure: {0}")]
    Transient(String),
}

impl NavError {
    /// True for identifiers the parsers could not make sense of.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            NavError::MalformedIdentifier(_)
                | NavError::NoSubjectFound(_)
                | NavError::InvalidLinkedIdentifier(_)
                | NavError::MissingPageMarker(_)
                | NavError::MissingSizeMarker(_)
                | NavError::InvalidPageNumber(_)
                | NavError::InvalidSizeNumber(_)
                | NavError::InvalidSuffix(_)
        )
    }
}

/// Result type alias for navigation operations.
pub type NavResult<T> = Result<T, NavError>;

/// Errors for the inbound webhook surface.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("missing or invalid signature")]
    SignatureInvalid,

    #[error("signature timestamp outside the accepted window")]
    SignatureExpired,

    #[error("malformed webhook body: {0}")]
    BadBody(String),
}

impl WebhookError {
    fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::SignatureInvalid | WebhookError::SignatureExpired => {
                StatusCode::UNAUTHORIZED
            }
            WebhookError::BadBody(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "ok": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}
