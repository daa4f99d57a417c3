use crate::invoice::deserialize_status;

use tm_core::PaymentStatus;

use serde::Deserialize;

/// Header carrying the shared secret on gateway webhooks.
pub const CALLBACK_TOKEN_HEADER: &str = "x-callback-token";

/// Webhook body sent when an invoice changes state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InvoiceCallback {
    pub id: String,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(deserialize_with = "deserialize_status", default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub paid_amount: Option<i64>,
}

/// Compare the received token with the configured one without
/// short-circuiting on the first differing byte.
pub fn verify_callback_token(expected: &str, provided: &str) -> bool {
    let (a, b) = (expected.as_bytes(), provided.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
