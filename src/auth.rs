//! Webhook signature verification.
//!
//! The platform signs every delivery with HMAC-SHA256 over
//! `{timestamp}.{body}` using the shared signing secret, base64
//! encoded. The timestamp must be within the freshness window to stop
//! replays of captured deliveries.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::WebhookError;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the base64 signature.
pub const SIGNATURE_HEADER: &str = "x-relay-signature";
/// Header carrying the unix-seconds timestamp that was signed.
pub const TIMESTAMP_HEADER: &str = "x-relay-timestamp";

/// Accepted clock skew in seconds.
const MAX_SKEW_SECONDS: i64 = 300;

/// Computes the base64 signature for a delivery. Used by the verifier
/// and by test clients signing requests.
pub fn sign(secret: &str, timestamp: &str, body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    BASE64.encode(mac.finalize().into_bytes())
}

/// Verifies a delivery's signature and timestamp freshness.
pub fn verify_signature(
    secret: &str,
    timestamp: &str,
    body: &[u8],
    provided: &str,
) -> Result<(), WebhookError> {
    let signed_at: i64 = timestamp
        .parse()
        .map_err(|_| WebhookError::SignatureInvalid)?;
    if (Utc::now().timestamp() - signed_at).abs() > MAX_SKEW_SECONDS {
        return Err(WebhookError::SignatureExpired);
    }

    let decoded = BASE64
        .decode(provided)
        .map_err(|_| WebhookError::SignatureInvalid)?;

    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    mac.verify_slice(&decoded)
        .map_err(|_| WebhookError::SignatureInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_signature_round_trip() {
        let secret = "dev-secret";
        let timestamp = Utc::now().timestamp().to_string();
        let body = br#"{"kind":"canvas.interaction"}"#;
        let signature = sign(secret, &timestamp, body);
        assert!(verify_signature(secret, &timestamp, body, &signature).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let timestamp = Utc::now().timestamp().to_string();
        let body = b"{}";
        let signature = sign("other-secret", &timestamp, body);
        assert!(matches!(
            verify_signature("dev-secret", &timestamp, body, &signature),
            Err(WebhookError::SignatureInvalid)
        ));
    }

    #[test]
    fn test_tampered_body_rejected() {
        let secret = "dev-secret";
        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(secret, &timestamp, b"{}");
        assert!(verify_signature(secret, &timestamp, b"{ }", &signature).is_err());
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let secret = "dev-secret";
        let timestamp = (Utc::now().timestamp() - 3600).to_string();
        let body = b"{}";
        let signature = sign(secret, &timestamp, body);
        assert!(matches!(
            verify_signature(secret, &timestamp, body, &signature),
            Err(WebhookError::SignatureExpired)
        ));
    }
}
