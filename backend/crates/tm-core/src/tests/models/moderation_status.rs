use crate::{ModerationStatus, ProcurementMethod};

use std::str::FromStr;

#[test]
fn test_moderation_status_as_str() {
    assert_eq!(ModerationStatus::Draft.as_str(), "draft");
    assert_eq!(ModerationStatus::RevisionRequired.as_str(), "revision_required");
}

#[test]
fn test_moderation_status_from_str() {
    assert_eq!(
        ModerationStatus::from_str("approved").unwrap(),
        ModerationStatus::Approved
    );
    assert!(ModerationStatus::from_str("Approved").is_err());
    assert!(ModerationStatus::from_str("garbage").is_err());
}

#[test]
fn test_moderation_status_parse_lenient() {
    assert_eq!(
        ModerationStatus::parse_lenient(" Revision Required "),
        Some(ModerationStatus::RevisionRequired)
    );
    assert_eq!(
        ModerationStatus::parse_lenient("PENDING"),
        Some(ModerationStatus::Pending)
    );
    assert_eq!(ModerationStatus::parse_lenient("archived"), None);
}

#[test]
fn test_procurement_method_parse() {
    assert_eq!(
        ProcurementMethod::from_str("tender").unwrap(),
        ProcurementMethod::Tender
    );
    assert_eq!(
        ProcurementMethod::from_str("Penunjukan Langsung").unwrap(),
        ProcurementMethod::DirectAppointment
    );
    assert!(ProcurementMethod::from_str("auction").is_err());
}
