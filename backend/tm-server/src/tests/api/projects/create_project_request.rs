use crate::{ApiError, CreateProjectRequest};

use tm_core::ProcurementMethod;

use googletest::prelude::*;

fn request(method: &str, duration: Option<&str>) -> CreateProjectRequest {
    CreateProjectRequest {
        title: "Office fit-out".to_string(),
        project_type: "Design".to_string(),
        procurement_method: method.to_string(),
        tender_duration: duration.map(String::from),
        project_phases: None,
        submit_for_review: false,
    }
}

fn field_of(error: ApiError) -> Option<String> {
    match error {
        ApiError::Validation { field, .. } => field,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_tender_with_duration_is_valid() {
    let method = request("Tender", Some("2 Minggu")).validate().unwrap();

    assert_that!(method, eq(ProcurementMethod::Tender));
}

#[test]
fn test_contract_needs_no_duration() {
    let method = request("Contract", None).validate().unwrap();

    assert_that!(method, eq(ProcurementMethod::Contract));
}

#[test]
fn test_tender_without_duration_is_rejected() {
    let error = request("Tender", Some("  ")).validate().unwrap_err();

    assert_eq!(field_of(error).as_deref(), Some("tender_duration"));
}

#[test]
fn test_tender_with_absurd_duration_is_rejected() {
    for duration in ["999999999 hari", "13 Bulan", "0 Minggu", "secepatnya"] {
        let error = request("Tender", Some(duration)).validate().unwrap_err();

        assert_eq!(field_of(error).as_deref(), Some("tender_duration"), "{duration}");
    }
}

#[test]
fn test_tender_duration_up_to_a_year_is_accepted() {
    for duration in ["1 hari", "366 hari", "52 Minggu", "12 Bulan"] {
        assert!(request("Tender", Some(duration)).validate().is_ok(), "{duration}");
    }
}

#[test]
fn test_blank_title_is_rejected() {
    let mut req = request("Contract", None);
    req.title = "   ".to_string();

    let error = req.validate().unwrap_err();

    assert_eq!(field_of(error).as_deref(), Some("title"));
}

#[test]
fn test_overlong_title_is_rejected() {
    let mut req = request("Contract", None);
    req.title = "x".repeat(201);

    let error = req.validate().unwrap_err();

    assert_eq!(field_of(error).as_deref(), Some("title"));
}

#[test]
fn test_phase_count_is_bounded() {
    let mut req = request("Contract", None);
    req.project_phases = Some(0);
    assert_eq!(field_of(req.validate().unwrap_err()).as_deref(), Some("project_phases"));

    req.project_phases = Some(25);
    assert_eq!(field_of(req.validate().unwrap_err()).as_deref(), Some("project_phases"));

    req.project_phases = Some(24);
    assert!(req.validate().is_ok());
}

#[test]
fn test_unknown_procurement_method_is_rejected() {
    let error = request("Auction", None).validate().unwrap_err();

    assert_eq!(field_of(error).as_deref(), Some("procurement_method"));
}
