//! Payment intent secrets and webhook signature verification.
//!
//! The payment gateway is stubbed: an intent is just a random client secret
//! bound to an order amount. Webhook deliveries are authenticated with an
//! HMAC-SHA256 signature over the raw request body, sent either hex or
//! base64 encoded.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use rand::Rng;
use serde::Deserialize;
use sha2::Sha256;

use crate::types::DbId;

type HmacSha256 = Hmac<Sha256>;

/// Event type that marks an order as paid.
pub const EVENT_PAYMENT_SUCCEEDED: &str = "payment.succeeded";

/// Random suffix length for generated client secrets.
const CLIENT_SECRET_RANDOM_LEN: usize = 24;

// ---------------------------------------------------------------------------
// Client secrets
// ---------------------------------------------------------------------------

/// Generate a client secret of the form `pi_<order>_secret_<random>`.
pub fn generate_client_secret(order_id: DbId) -> String {
    let random: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(CLIENT_SECRET_RANDOM_LEN)
        .map(char::from)
        .collect();
    format!("pi_{}_secret_{random}", order_id.simple())
}

// ---------------------------------------------------------------------------
// Webhook signatures
// ---------------------------------------------------------------------------

/// Compute the hex HMAC-SHA256 of `payload` under `secret`.
pub fn sign_payload_hex(secret: &str, payload: &[u8]) -> String {
    let tag = compute_tag(secret, payload);
    tag.iter().map(|b| format!("{b:02x}")).collect()
}

/// Compute the base64 HMAC-SHA256 of `payload` under `secret`.
pub fn sign_payload_base64(secret: &str, payload: &[u8]) -> String {
    BASE64.encode(compute_tag(secret, payload))
}

fn compute_tag(secret: &str, payload: &[u8]) -> Vec<u8> {
    let mut mac = new_mac(secret);
    mac.update(payload);
    mac.finalize().into_bytes().to_vec()
}

fn new_mac(secret: &str) -> HmacSha256 {
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length")
}

/// Verify a webhook signature header against the raw body.
///
/// The header may carry an optional `sha256=` prefix; the digest is accepted
/// as lowercase/uppercase hex or standard base64. Comparison is constant time.
pub fn verify_webhook_signature(secret: &str, payload: &[u8], signature: &str) -> bool {
    let signature = signature.trim();
    let signature = signature.strip_prefix("sha256=").unwrap_or(signature);

    let Some(expected) = decode_signature(signature) else {
        return false;
    };

    let mut mac = new_mac(secret);
    mac.update(payload);
    mac.verify_slice(&expected).is_ok()
}

/// Decode a 32-byte digest from hex or base64.
fn decode_signature(signature: &str) -> Option<Vec<u8>> {
    if signature.len() == 64 {
        if let Some(bytes) = decode_hex(signature) {
            return Some(bytes);
        }
    }
    BASE64.decode(signature).ok().filter(|b| b.len() == 32)
}

fn decode_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(s.get(i..i + 2)?, 16).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Webhook events
// ---------------------------------------------------------------------------

/// A webhook delivery body.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: WebhookEventData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEventData {
    pub order_id: Option<DbId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";
    const BODY: &[u8] = br#"{"type":"payment.succeeded","data":{"order_id":"0190a0f4-8a8e-7c3a-9b7e-1234567890ab"}}"#;

    #[test]
    fn hex_signature_verifies() {
        let sig = sign_payload_hex(SECRET, BODY);
        assert_eq!(sig.len(), 64);
        assert!(verify_webhook_signature(SECRET, BODY, &sig));
        assert!(verify_webhook_signature(SECRET, BODY, &sig.to_uppercase()));
        assert!(verify_webhook_signature(SECRET, BODY, &format!("sha256={sig}")));
    }

    #[test]
    fn base64_signature_verifies() {
        let sig = sign_payload_base64(SECRET, BODY);
        assert!(verify_webhook_signature(SECRET, BODY, &sig));
    }

    #[test]
    fn wrong_secret_or_body_fails() {
        let sig = sign_payload_hex(SECRET, BODY);
        assert!(!verify_webhook_signature("other", BODY, &sig));
        assert!(!verify_webhook_signature(SECRET, b"{}", &sig));
    }

    #[test]
    fn garbage_signature_fails() {
        assert!(!verify_webhook_signature(SECRET, BODY, ""));
        assert!(!verify_webhook_signature(SECRET, BODY, "not-a-signature"));
        assert!(!verify_webhook_signature(SECRET, BODY, &"zz".repeat(32)));
    }

    #[test]
    fn client_secret_shape() {
        let id = uuid::Uuid::now_v7();
        let secret = generate_client_secret(id);
        assert!(secret.starts_with(&format!("pi_{}_secret_", id.simple())));
        assert_ne!(secret, generate_client_secret(id));
    }

    #[test]
    fn event_parses() {
        let event: WebhookEvent = serde_json::from_slice(BODY).unwrap();
        assert_eq!(event.event_type, EVENT_PAYMENT_SUCCEEDED);
        assert!(event.data.order_id.is_some());

        let bare: WebhookEvent = serde_json::from_str(r#"{"type":"ping"}"#).unwrap();
        assert!(bare.data.order_id.is_none());
    }
}
