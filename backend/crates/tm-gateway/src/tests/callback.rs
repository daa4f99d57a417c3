use crate::{InvoiceCallback, verify_callback_token};

use tm_core::PaymentStatus;

#[test]
fn given_matching_token_when_verified_then_true() {
    assert!(verify_callback_token("s3cret-token", "s3cret-token"));
}

#[test]
fn given_wrong_or_truncated_token_when_verified_then_false() {
    assert!(!verify_callback_token("s3cret-token", "s3cret-tokeN"));
    assert!(!verify_callback_token("s3cret-token", "s3cret"));
    assert!(!verify_callback_token("s3cret-token", ""));
}

#[test]
fn given_settled_callback_when_parsed_then_paid() {
    let callback: InvoiceCallback = serde_json::from_str(
        r#"{"id":"inv-1","external_id":"DES-ID-2507-0001-termin-1-2","status":"SETTLED","paid_amount":60000000}"#,
    )
    .unwrap();

    assert_eq!(callback.status, PaymentStatus::Paid);
    assert_eq!(callback.paid_amount, Some(60_000_000));
}

#[test]
fn given_callback_without_status_when_parsed_then_pending() {
    let callback: InvoiceCallback = serde_json::from_str(r#"{"id":"inv-2"}"#).unwrap();

    assert_eq!(callback.status, PaymentStatus::Pending);
    assert_eq!(callback.external_id, None);
}
