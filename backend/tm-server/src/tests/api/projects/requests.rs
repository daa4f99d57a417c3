use crate::{
    ApiError, ModerationRequest, ProgressRequest, SubmitProposalRequest, is_owner_decision,
};

use tm_core::ModerationStatus;

use serde_json::json;

#[test]
fn test_moderation_decision_is_parsed_leniently() {
    let request = ModerationRequest {
        moderation_status: "Revision Required".to_string(),
    };

    assert_eq!(request.decision().unwrap(), ModerationStatus::RevisionRequired);
}

#[test]
fn test_unknown_moderation_decision_is_rejected() {
    let request = ModerationRequest {
        moderation_status: "shelved".to_string(),
    };

    assert!(matches!(
        request.decision(),
        Err(ApiError::Validation { .. })
    ));
}

#[test]
fn test_owner_decisions_are_draft_and_pending() {
    assert!(is_owner_decision(ModerationStatus::Draft));
    assert!(is_owner_decision(ModerationStatus::Pending));
    assert!(!is_owner_decision(ModerationStatus::Approved));
    assert!(!is_owner_decision(ModerationStatus::Rejected));
}

#[test]
fn test_progress_out_of_byte_range_is_rejected() {
    let request = ProgressRequest { progress: 300 };

    assert!(matches!(request.percent(), Err(ApiError::Validation { .. })));
    assert_eq!(ProgressRequest { progress: 55 }.percent().unwrap(), 55);
}

#[test]
fn test_bid_amount_is_found_under_legacy_names() {
    let request: SubmitProposalRequest = serde_json::from_value(json!({
        "vendor_name": "PT Bangun",
        "totalAmount": 0,
        "price": "Rp 12.500.000",
    }))
    .unwrap();

    assert_eq!(request.vendor_name.as_deref(), Some("PT Bangun"));
    assert_eq!(request.bid_amount().unwrap(), 12_500_000);
}

#[test]
fn test_missing_bid_amount_points_at_total_amount() {
    let request: SubmitProposalRequest =
        serde_json::from_value(json!({ "note": "call me" })).unwrap();

    match request.bid_amount() {
        Err(ApiError::Validation { field, .. }) => {
            assert_eq!(field.as_deref(), Some("totalAmount"))
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}
