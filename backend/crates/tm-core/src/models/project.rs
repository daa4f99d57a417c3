//! Project record - the canonical shape every read is normalized into.

use crate::{
    CoreError, CoreResult, CustomId, Installment, ModerationStatus, PaymentStatus,
    PaymentTranche, ProcurementMethod, Proposal, ProposalStatus, TenderDuration,
};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const DEFAULT_PROJECT_PHASES: u32 = 3;
pub const MAX_PROGRESS: u8 = 100;

pub const STATUS_DRAFT: &str = "Draft";
pub const STATUS_UNDER_REVIEW: &str = "Under Review";
pub const STATUS_AWARDED: &str = "Awarded";
pub const STATUS_ON_GOING: &str = "On Going";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    /// Assigned once at creation, never changed.
    pub custom_id: CustomId,
    pub owner_id: String,
    pub title: String,
    pub project_type: String,

    /// Coarse lifecycle flag written by owner/admin actions.
    pub status: Option<String>,
    pub moderation_status: Option<ModerationStatus>,
    pub procurement_method: Option<ProcurementMethod>,

    // Tender
    pub tender_duration: Option<String>,
    pub tender_deadline: Option<DateTime<Utc>>,
    pub proposals: Vec<Proposal>,
    pub selected_vendor_id: Option<String>,
    pub negotiation_accepted: bool,
    pub negotiation_active: bool,

    // Payments
    pub project_phases: Option<u32>,
    pub payments: Vec<PaymentTranche>,
    pub initial_payment_completed: bool,
    pub first_payment_completed: bool,

    pub progress: u8,

    /// Optimistic locking version
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new draft project.
    pub fn new(
        owner_id: String,
        title: String,
        project_type: String,
        procurement_method: ProcurementMethod,
        custom_id: CustomId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            custom_id,
            owner_id,
            title,
            project_type,
            status: Some(String::from(STATUS_DRAFT)),
            moderation_status: Some(ModerationStatus::Draft),
            procurement_method: Some(procurement_method),
            tender_duration: None,
            tender_deadline: None,
            proposals: Vec::new(),
            selected_vendor_id: None,
            negotiation_accepted: false,
            negotiation_active: false,
            project_phases: None,
            payments: Vec::new(),
            initial_payment_completed: false,
            first_payment_completed: false,
            progress: 0,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_tender(&self) -> bool {
        self.procurement_method == Some(ProcurementMethod::Tender)
    }

    pub fn accepted_proposal(&self) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.is_accepted())
    }

    /// Explicit flag or any proposal still haggling over price.
    pub fn has_negotiation_signal(&self) -> bool {
        self.negotiation_active || self.proposals.iter().any(Proposal::is_negotiating)
    }

    pub fn has_awarded_vendor(&self) -> bool {
        self.selected_vendor_id.is_some()
            || self.status.as_deref() == Some(STATUS_AWARDED)
            || self.negotiation_accepted
            || self.accepted_proposal().is_some()
    }

    /// Either completion flag marks "Termin 1 & 2" as settled.
    pub fn first_payment_flagged(&self) -> bool {
        self.first_payment_completed || self.initial_payment_completed
    }

    /// Installment count; absent or zero means the default of three.
    pub fn phases(&self) -> u32 {
        self.project_phases
            .filter(|p| *p > 0)
            .unwrap_or(DEFAULT_PROJECT_PHASES)
    }

    pub fn tranche(&self, installment: &Installment) -> Option<&PaymentTranche> {
        self.payments.iter().find(|t| &t.installment == installment)
    }

    pub fn tranche_mut(&mut self, installment: &Installment) -> Option<&mut PaymentTranche> {
        self.payments
            .iter_mut()
            .find(|t| &t.installment == installment)
    }

    pub fn tranche_by_invoice(&self, invoice_id: &str) -> Option<&PaymentTranche> {
        self.payments
            .iter()
            .find(|t| t.invoice_id.as_deref() == Some(invoice_id))
    }

    /// Tender deadline. A stored deadline is frozen and wins; otherwise it is
    /// derived from the creation instant and the duration string.
    pub fn tender_deadline(&self) -> Option<DateTime<Utc>> {
        self.tender_deadline.or_else(|| {
            self.tender_duration
                .as_deref()
                .map(|d| TenderDuration::parse(d).deadline_from(self.created_at))
        })
    }

    // =========================================================================
    // Owner / admin actions
    // =========================================================================

    /// Owner submits the draft for moderation.
    pub fn submit_for_review(&mut self, now: DateTime<Utc>) {
        self.status = Some(String::from(STATUS_UNDER_REVIEW));
        self.moderation_status = Some(ModerationStatus::Pending);
        self.updated_at = now;
    }

    pub fn moderate(&mut self, decision: ModerationStatus, now: DateTime<Utc>) {
        if decision == ModerationStatus::Draft {
            self.status = Some(String::from(STATUS_DRAFT));
        } else if decision == ModerationStatus::Pending {
            self.status = Some(String::from(STATUS_UNDER_REVIEW));
        } else if self.status.as_deref() == Some(STATUS_UNDER_REVIEW)
            || self.status.as_deref() == Some(STATUS_DRAFT)
        {
            self.status = None;
        }
        self.moderation_status = Some(decision);
        self.updated_at = now;
    }

    /// Add a vendor bid, or replace the vendor's previous one as a resubmission.
    #[track_caller]
    pub fn submit_proposal(&mut self, mut proposal: Proposal, now: DateTime<Utc>) -> CoreResult<()> {
        if self.moderation_status != Some(ModerationStatus::Approved) {
            return Err(CoreError::Validation {
                message: String::from("Proposals are only accepted on approved projects"),
                field: Some(String::from("moderation_status")),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.has_awarded_vendor() {
            return Err(CoreError::Validation {
                message: String::from("A vendor has already been awarded"),
                field: None,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        match self
            .proposals
            .iter_mut()
            .find(|p| p.vendor_id == proposal.vendor_id)
        {
            Some(existing) => {
                proposal.status = ProposalStatus::Resubmitted;
                *existing = proposal;
            }
            None => self.proposals.push(proposal),
        }
        self.updated_at = now;
        Ok(())
    }

    /// Award the project to one vendor. Any previously accepted bid is
    /// rejected so at most one proposal is accepted.
    #[track_caller]
    pub fn accept_proposal(&mut self, vendor_id: &str, now: DateTime<Utc>) -> CoreResult<()> {
        if !self.proposals.iter().any(|p| p.vendor_id == vendor_id) {
            return Err(CoreError::Validation {
                message: format!("No proposal from vendor {vendor_id}"),
                field: Some(String::from("vendor_id")),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        for proposal in &mut self.proposals {
            if proposal.vendor_id == vendor_id {
                proposal.status = ProposalStatus::Accepted;
            } else if proposal.is_accepted() {
                proposal.status = ProposalStatus::Rejected;
                proposal.negotiation = None;
            }
        }
        self.selected_vendor_id = Some(vendor_id.to_string());
        self.status = Some(String::from(STATUS_AWARDED));
        self.negotiation_active = false;
        self.updated_at = now;
        Ok(())
    }

    #[track_caller]
    pub fn update_progress(&mut self, progress: u8, now: DateTime<Utc>) -> CoreResult<()> {
        if progress > MAX_PROGRESS {
            return Err(CoreError::Validation {
                message: format!("progress must be 0-{MAX_PROGRESS}, got {progress}"),
                field: Some(String::from("progress")),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        self.progress = progress;
        self.updated_at = now;
        Ok(())
    }

    // =========================================================================
    // Payment bookkeeping
    // =========================================================================

    /// Record the first tranche as settled and move the project to work.
    pub fn settle_first_payment(&mut self, now: DateTime<Utc>) {
        if let Some(tranche) = self.tranche_mut(&Installment::First)
            && !tranche.is_paid()
        {
            tranche.status = PaymentStatus::Paid;
            tranche.paid_at = Some(now);
        }
        self.first_payment_completed = true;
        self.initial_payment_completed = true;
        self.status = Some(String::from(STATUS_ON_GOING));
        self.updated_at = now;
    }

    /// Mark the tranche carrying `invoice_id` as paid. Returns the installment
    /// that changed, or `None` when nothing matched or it was already paid.
    pub fn mark_invoice_paid(&mut self, invoice_id: &str, now: DateTime<Utc>) -> Option<Installment> {
        let tranche = self
            .payments
            .iter_mut()
            .find(|t| t.invoice_id.as_deref() == Some(invoice_id))?;
        if tranche.is_paid() {
            return None;
        }
        tranche.status = PaymentStatus::Paid;
        tranche.paid_at = Some(now);
        let installment = tranche.installment.clone();

        if installment == Installment::First {
            self.settle_first_payment(now);
        } else {
            self.updated_at = now;
        }
        Some(installment)
    }
}
