use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::signature::SlackRequestHeaders;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

/// The signature header value slack would send for the specified secret,
/// timestamp, and raw request body.
pub fn slack_signature(signing_secret: &str, timestamp: i64, raw_body: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(signing_secret.as_bytes()).unwrap();
    mac.update(format!("v0:{}:", timestamp).as_bytes());
    mac.update(raw_body);
    format!("v0={}", hex::encode(mac.finalize().into_bytes()))
}

/// Headers for a request body correctly signed just now with the specified
/// secret.
pub fn signed_headers(signing_secret: &str, raw_body: &[u8]) -> SlackRequestHeaders {
    let timestamp = Utc::now().timestamp();
    SlackRequestHeaders::new(
        Some(timestamp.to_string()),
        Some(slack_signature(signing_secret, timestamp, raw_body)),
    )
}
