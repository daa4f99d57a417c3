use crate::CustomId;
use crate::tests::fixtures::at;

use std::str::FromStr;

#[test]
fn given_design_project_when_generating_custom_id_then_matches_format() {
    let id = CustomId::new("Design", "id", at(2025, 7, 14, 9), 1).unwrap();

    assert_eq!(id.to_string(), "DES-ID-2507-0001");
    assert_eq!(id.prefix(), "DES-ID-2507");
    assert_eq!(id.sequence(), 1);
}

#[test]
fn given_formatted_id_when_parsed_then_round_trips() {
    let id = CustomId::from_str("REN-SG-2412-0042").unwrap();

    assert_eq!(id.prefix(), "REN-SG-2412");
    assert_eq!(id.sequence(), 42);
    assert_eq!(id.to_string(), "REN-SG-2412-0042");
}

#[test]
fn given_sequence_beyond_four_digits_when_formatted_then_not_truncated() {
    let id = CustomId::new("Build", "ID", at(2026, 1, 1, 0), 12345).unwrap();

    assert_eq!(id.to_string(), "BUI-ID-2601-12345");
}

#[test]
fn given_malformed_ids_when_parsed_then_rejected() {
    for raw in [
        "DES-ID-2507",
        "des-ID-2507-0001",
        "DES-IDN-2507-0001",
        "DES-ID-2513-0001",
        "DES-ID-2507-01",
        "DES-ID-2507-0000",
        "",
    ] {
        assert!(CustomId::from_str(raw).is_err(), "{raw} should be rejected");
    }
}

#[test]
fn given_short_project_type_when_generating_then_error() {
    assert!(CustomId::new("UI", "ID", at(2025, 1, 1, 0), 1).is_err());
    assert!(CustomId::new("Design", "IDN", at(2025, 1, 1, 0), 1).is_err());
    assert!(CustomId::new("Design", "ID", at(2025, 1, 1, 0), 0).is_err());
}
