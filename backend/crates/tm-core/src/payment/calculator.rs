use crate::{
    BidAmount, CoreError, CoreResult, Installment, PaymentInstruction, PaymentTranche, Project,
    TranchePlan,
};

use std::panic::Location;

use error_location::ErrorLocation;

/// Installment plan for the project's accepted bid.
#[track_caller]
pub fn payment_plan(project: &Project) -> CoreResult<TranchePlan> {
    let proposal = project
        .accepted_proposal()
        .ok_or_else(|| CoreError::NoAcceptedProposal {
            project_id: project.custom_id.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    match proposal.bid_amount {
        BidAmount::Fixed(amount) => Ok(TranchePlan::new(amount, project.phases())),
        BidAmount::Missing => Err(CoreError::AmountNotFound {
            vendor_id: proposal.vendor_id.clone(),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

/// Decide the next payment step. Installments are never skipped: unit `n`
/// is only offered once every earlier unit is paid.
#[track_caller]
pub fn compute_next_payment(project: &Project) -> CoreResult<PaymentInstruction> {
    let plan = payment_plan(project)?;

    let first = project.tranche(&Installment::First);
    let flagged = project.first_payment_flagged();
    let first_settled = flagged || first.is_some_and(PaymentTranche::is_paid);

    if !first_settled {
        return Ok(instruction_for(first, Installment::First, &plan));
    }
    if !flagged {
        return Ok(PaymentInstruction::AlreadySettled);
    }

    for unit in plan.later_units() {
        let installment = Installment::Unit(unit);
        let existing = project.tranche(&installment);
        if existing.is_some_and(PaymentTranche::is_paid) {
            continue;
        }
        return Ok(instruction_for(existing, installment, &plan));
    }

    Ok(PaymentInstruction::AllSettled)
}

fn instruction_for(
    existing: Option<&PaymentTranche>,
    installment: Installment,
    plan: &TranchePlan,
) -> PaymentInstruction {
    if let Some(tranche) = existing {
        if let Some(url) = tranche.reusable_invoice_url() {
            return PaymentInstruction::ReuseExistingInvoice {
                invoice_id: tranche.pollable_invoice_id().map(String::from),
                invoice_url: url.to_string(),
                installment,
            };
        }
        if let Some(invoice_id) = tranche.pollable_invoice_id() {
            return PaymentInstruction::CheckInvoiceStatus {
                invoice_id: invoice_id.to_string(),
                amount: plan.amount_for(&installment),
                installment,
            };
        }
    }

    PaymentInstruction::CreateInvoice {
        amount: plan.amount_for(&installment),
        remaining_amount: plan.remaining_after(&installment),
        installment,
    }
}
