//! Domain core for the construction tender marketplace: project records,
//! status resolution and installment (termin) payment planning.

pub mod clock;
pub mod document;
pub mod error;
pub mod models;
pub mod payment;
pub mod status;

#[cfg(test)]
mod tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use document::amount_probe::{BID_AMOUNT_FIELDS, probe_bid_amount};
pub use document::project_document::{
    NegotiationDocument, PaymentDocument, ProjectDocument, ProposalDocument,
};
pub use error::{CoreError, Result as CoreResult};
pub use models::bid_amount::BidAmount;
pub use models::custom_id::CustomId;
pub use models::installment::Installment;
pub use models::moderation_status::ModerationStatus;
pub use models::negotiation_status::NegotiationStatus;
pub use models::payment_status::PaymentStatus;
pub use models::payment_tranche::PaymentTranche;
pub use models::procurement_method::ProcurementMethod;
pub use models::project::{
    DEFAULT_PROJECT_PHASES, MAX_PROGRESS, Project, STATUS_AWARDED, STATUS_DRAFT, STATUS_ON_GOING,
    STATUS_UNDER_REVIEW,
};
pub use models::proposal::{Negotiation, Proposal};
pub use models::proposal_status::ProposalStatus;
pub use models::tender_duration::{MAX_TENDER_DAYS, TenderDuration};
pub use payment::calculator::{compute_next_payment, payment_plan};
pub use payment::payment_instruction::PaymentInstruction;
pub use payment::tranche_plan::TranchePlan;
pub use status::phase::Phase;
pub use status::project_action::ProjectAction;
pub use status::resolver::{
    LOCK_WINDOW_HOURS, StatusResolution, hours_until, resolve_status, resolve_status_at,
};
pub use status::status_label::{StatusLabel, action_for};
