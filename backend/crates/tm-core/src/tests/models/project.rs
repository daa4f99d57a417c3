use crate::tests::fixtures::{at, awarded_project, tender_project, tranche};
use crate::{
    BidAmount, Installment, ModerationStatus, PaymentStatus, Proposal, ProposalStatus,
    STATUS_AWARDED, STATUS_DRAFT, STATUS_ON_GOING,
};

#[test]
fn test_project_new_is_draft() {
    let project = tender_project();
    let fresh = crate::Project::new(
        project.owner_id.clone(),
        project.title.clone(),
        project.project_type.clone(),
        crate::ProcurementMethod::Contract,
        project.custom_id.clone(),
        at(2025, 2, 1, 0),
    );

    assert_eq!(fresh.status.as_deref(), Some(STATUS_DRAFT));
    assert_eq!(fresh.moderation_status, Some(ModerationStatus::Draft));
    assert_eq!(fresh.version, 1);
    assert_eq!(fresh.phases(), 3);
    assert!(fresh.payments.is_empty());
}

#[test]
fn test_project_phases_default() {
    let mut project = tender_project();
    project.project_phases = Some(0);
    assert_eq!(project.phases(), 3);

    project.project_phases = Some(5);
    assert_eq!(project.phases(), 5);
}

#[test]
fn given_stored_deadline_when_duration_changes_then_deadline_stays_frozen() {
    let mut project = tender_project();
    assert_eq!(project.tender_deadline(), Some(at(2025, 1, 15, 0)));

    project.tender_deadline = Some(at(2025, 1, 15, 0));
    project.tender_duration = Some("1 Bulan".to_string());

    assert_eq!(project.tender_deadline(), Some(at(2025, 1, 15, 0)));
}

#[test]
fn given_second_acceptance_when_accepting_then_only_one_proposal_accepted() {
    let mut project = tender_project();
    for vendor in ["vendor-a", "vendor-b"] {
        project
            .submit_proposal(
                Proposal::new(vendor.to_string(), BidAmount::Fixed(1_000), at(2025, 1, 2, 0)),
                at(2025, 1, 2, 0),
            )
            .unwrap();
    }

    project.accept_proposal("vendor-a", at(2025, 1, 3, 0)).unwrap();
    project.selected_vendor_id = None;
    project.status = None;
    project.accept_proposal("vendor-b", at(2025, 1, 4, 0)).unwrap();

    let accepted: Vec<_> = project.proposals.iter().filter(|p| p.is_accepted()).collect();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].vendor_id, "vendor-b");
    assert_eq!(project.selected_vendor_id.as_deref(), Some("vendor-b"));
    assert_eq!(project.status.as_deref(), Some(STATUS_AWARDED));
}

#[test]
fn given_unknown_vendor_when_accepting_then_error() {
    let mut project = tender_project();
    assert!(project.accept_proposal("nobody", at(2025, 1, 3, 0)).is_err());
}

#[test]
fn given_unapproved_project_when_submitting_proposal_then_error() {
    let mut project = tender_project();
    project.moderation_status = Some(ModerationStatus::Pending);

    let result = project.submit_proposal(
        Proposal::new("v".to_string(), BidAmount::Fixed(1), at(2025, 1, 2, 0)),
        at(2025, 1, 2, 0),
    );
    assert!(result.is_err());
}

#[test]
fn given_same_vendor_when_resubmitting_then_replaces_bid() {
    let mut project = tender_project();
    let now = at(2025, 1, 2, 0);
    project
        .submit_proposal(Proposal::new("v".to_string(), BidAmount::Fixed(100), now), now)
        .unwrap();
    project
        .submit_proposal(Proposal::new("v".to_string(), BidAmount::Fixed(90), now), now)
        .unwrap();

    assert_eq!(project.proposals.len(), 1);
    assert_eq!(project.proposals[0].bid_amount, BidAmount::Fixed(90));
    assert_eq!(project.proposals[0].status, ProposalStatus::Resubmitted);
}

#[test]
fn test_update_progress_bounds() {
    let mut project = tender_project();
    assert!(project.update_progress(100, at(2025, 3, 1, 0)).is_ok());
    assert_eq!(project.progress, 100);
    assert!(project.update_progress(101, at(2025, 3, 1, 0)).is_err());
    assert_eq!(project.progress, 100);
}

#[test]
fn given_first_invoice_when_marked_paid_then_project_is_settled() {
    let mut project = awarded_project(90_000_000, None);
    let mut first = tranche(Installment::First, PaymentStatus::Pending, 60_000_000);
    first.invoice_id = Some("inv-1".to_string());
    project.payments.push(first);

    let changed = project.mark_invoice_paid("inv-1", at(2025, 1, 6, 0));

    assert_eq!(changed, Some(Installment::First));
    assert!(project.first_payment_completed);
    assert!(project.initial_payment_completed);
    assert_eq!(project.status.as_deref(), Some(STATUS_ON_GOING));
    assert_eq!(project.payments[0].paid_at, Some(at(2025, 1, 6, 0)));

    // Second delivery of the same callback is a no-op.
    assert_eq!(project.mark_invoice_paid("inv-1", at(2025, 1, 7, 0)), None);
    assert_eq!(project.mark_invoice_paid("unknown", at(2025, 1, 7, 0)), None);
}
