use tm_core::{
    BidAmount, CustomId, ModerationStatus, ProcurementMethod, Project, Proposal, ProposalStatus,
};

use chrono::{DateTime, TimeZone, Utc};

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

/// Approved tender owned by `owner_id`, created on `created_at`.
pub fn create_test_project(owner_id: &str, sequence: u32, created_at: DateTime<Utc>) -> Project {
    let custom_id = CustomId::new("Design", "ID", created_at, sequence).unwrap();
    let mut project = Project::new(
        owner_id.to_string(),
        format!("Renovation {sequence}"),
        "Design".to_string(),
        ProcurementMethod::Tender,
        custom_id,
        created_at,
    );
    project.moderation_status = Some(ModerationStatus::Approved);
    project.tender_duration = Some("2 Minggu".to_string());
    project
}

/// Same as [`create_test_project`] with an accepted bid.
pub fn create_awarded_project(owner_id: &str, bid: i64) -> Project {
    let mut project = create_test_project(owner_id, 1, at(2025, 1, 1));
    let mut proposal = Proposal::new("vendor-1".to_string(), BidAmount::Fixed(bid), at(2025, 1, 2));
    proposal.status = ProposalStatus::Accepted;
    project.proposals.push(proposal);
    project.selected_vendor_id = Some("vendor-1".to_string());
    project
}
