use crate::apply_derived_fields;

use tm_core::{
    BidAmount, CustomId, ModerationStatus, ProcurementMethod, Project, Proposal, ProposalStatus,
};

use chrono::{DateTime, TimeZone, Utc};

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap()
}

fn tender() -> Project {
    let created_at = at(1);
    let mut project = Project::new(
        "owner-1".to_string(),
        "Clinic extension".to_string(),
        "Build".to_string(),
        ProcurementMethod::Tender,
        CustomId::new("Build", "ID", created_at, 1).unwrap(),
        created_at,
    );
    project.moderation_status = Some(ModerationStatus::Approved);
    project.status = None;
    project.tender_duration = Some("1 Minggu".to_string());
    project
}

#[test]
fn test_deadline_is_frozen_on_first_resolution() {
    let mut project = tender();

    assert!(apply_derived_fields(&mut project, at(3)));
    assert_eq!(project.tender_deadline, Some(at(8)));

    project.tender_duration = Some("3 Minggu".to_string());
    assert!(!apply_derived_fields(&mut project, at(4)));
    assert_eq!(project.tender_deadline, Some(at(8)));
}

#[test]
fn test_vendor_of_accepted_proposal_is_recorded() {
    let mut project = tender();
    project.tender_deadline = Some(at(8));
    let mut proposal = Proposal::new("vendor-1".to_string(), BidAmount::Fixed(1_000), at(2));
    proposal.status = ProposalStatus::Accepted;
    project.proposals.push(proposal);

    assert!(apply_derived_fields(&mut project, at(9)));
    assert_eq!(project.selected_vendor_id.as_deref(), Some("vendor-1"));
}

#[test]
fn test_nothing_to_write_for_settled_records() {
    let mut project = tender();
    project.procurement_method = Some(ProcurementMethod::Contract);

    assert!(!apply_derived_fields(&mut project, at(3)));
    assert_eq!(project.tender_deadline, None);
}
