//! Persisted project shape.
//!
//! Records written by older clients carry free-text statuses, the bid amount
//! under one of several names, and a single `payment` object instead of the
//! `payments` array. `Project::try_from(ProjectDocument)` is the only place
//! that knows about those variations.

use crate::document::amount_probe::{
    BID_AMOUNT_FIELDS, positive_amount, probe_bid_amount, whole_number,
};
use crate::{
    BidAmount, CoreError, CoreResult, CustomId, Installment, MAX_PROGRESS, ModerationStatus,
    Negotiation, NegotiationStatus, PaymentStatus, PaymentTranche, ProcurementMethod, Project,
    Proposal, ProposalStatus,
};
use crate::models::payment_tranche::DEFAULT_PAYMENT_TYPE;

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub id: Option<String>,
    pub custom_id: Option<String>,
    pub owner_id: Option<String>,
    pub title: Option<String>,
    pub project_type: Option<String>,
    pub status: Option<String>,
    pub moderation_status: Option<String>,
    pub procurement_method: Option<String>,
    pub tender_duration: Option<String>,
    pub tender_deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub proposals: Option<Vec<ProposalDocument>>,
    pub selected_vendor_id: Option<String>,
    pub negotiation_accepted: Option<bool>,
    pub is_negotiating: Option<bool>,
    pub project_phases: Option<Value>,
    pub payments: Option<Vec<PaymentDocument>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentDocument>,
    pub initial_payment_completed: Option<bool>,
    pub first_payment_completed: Option<bool>,
    pub progress: Option<Value>,
    pub version: Option<i32>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalDocument {
    pub vendor_id: Option<String>,
    pub vendor_name: Option<String>,
    pub status: Option<String>,
    pub negotiation: Option<NegotiationDocument>,
    pub submitted_at: Option<DateTime<Utc>>,
    /// Bid amount fields and anything else the client stored.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationDocument {
    pub status: Option<String>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDocument {
    pub title: Option<String>,
    pub payment_type: Option<String>,
    pub status: Option<String>,
    pub invoice_id: Option<String>,
    pub invoice_url: Option<String>,
    pub amount: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Read boundary
// =============================================================================

impl TryFrom<ProjectDocument> for Project {
    type Error = CoreError;

    #[track_caller]
    fn try_from(doc: ProjectDocument) -> CoreResult<Self> {
        let id_raw = required(doc.id, "id")?;
        let id = Uuid::parse_str(&id_raw).map_err(|source| CoreError::Uuid {
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;
        let custom_id = CustomId::from_str(&required(doc.custom_id, "customId")?)?;
        let owner_id = required(doc.owner_id, "ownerId")?;
        let created_at = doc.created_at.ok_or_else(|| missing("createdAt"))?;

        // Legacy single-payment records become a one-element array; the
        // lone payment was always the first tranche.
        let payments = match (doc.payments, doc.payment) {
            (Some(payments), _) => payments
                .into_iter()
                .map(|p| p.into_tranche(None, created_at))
                .collect(),
            (None, Some(legacy)) => vec![legacy.into_tranche(Some(Installment::First), created_at)],
            (None, None) => Vec::new(),
        };

        Ok(Project {
            id,
            custom_id,
            owner_id,
            title: doc.title.unwrap_or_default(),
            project_type: doc.project_type.unwrap_or_default(),
            status: doc.status.filter(|s| !s.trim().is_empty()),
            moderation_status: doc
                .moderation_status
                .as_deref()
                .and_then(ModerationStatus::parse_lenient),
            procurement_method: doc
                .procurement_method
                .as_deref()
                .and_then(ProcurementMethod::parse_lenient),
            tender_duration: doc.tender_duration,
            tender_deadline: doc.tender_deadline,
            proposals: doc
                .proposals
                .unwrap_or_default()
                .into_iter()
                .filter_map(ProposalDocument::into_proposal)
                .collect(),
            selected_vendor_id: doc.selected_vendor_id.filter(|v| !v.is_empty()),
            negotiation_accepted: doc.negotiation_accepted.unwrap_or(false),
            negotiation_active: doc.is_negotiating.unwrap_or(false),
            project_phases: doc
                .project_phases
                .as_ref()
                .and_then(whole_number)
                .and_then(|p| u32::try_from(p).ok())
                .filter(|p| *p > 0),
            payments,
            initial_payment_completed: doc.initial_payment_completed.unwrap_or(false),
            first_payment_completed: doc.first_payment_completed.unwrap_or(false),
            progress: doc
                .progress
                .as_ref()
                .and_then(whole_number)
                .map(|p| p.min(u64::from(MAX_PROGRESS)) as u8)
                .unwrap_or(0),
            version: doc.version.unwrap_or(1),
            updated_at: doc.updated_at.unwrap_or(created_at),
            created_at,
        })
    }
}

impl ProposalDocument {
    /// Bids without a vendor cannot be awarded and are dropped.
    fn into_proposal(self) -> Option<Proposal> {
        let vendor_id = self.vendor_id.filter(|v| !v.trim().is_empty())?;
        Some(Proposal {
            vendor_id,
            vendor_name: self.vendor_name,
            status: self
                .status
                .as_deref()
                .map(ProposalStatus::parse)
                .unwrap_or_default(),
            negotiation: self.negotiation.and_then(|n| {
                n.status.map(|status| Negotiation {
                    status: NegotiationStatus::parse(&status),
                    note: n.note,
                })
            }),
            bid_amount: BidAmount::from(probe_bid_amount(&self.extra)),
            submitted_at: self.submitted_at,
        })
    }
}

impl PaymentDocument {
    fn into_tranche(
        self,
        default_installment: Option<Installment>,
        fallback_created_at: DateTime<Utc>,
    ) -> PaymentTranche {
        let installment = match (self.title.as_deref(), default_installment) {
            (Some(title), _) => Installment::parse(title),
            (None, Some(default)) => default,
            (None, None) => Installment::Other(String::new()),
        };

        PaymentTranche {
            installment,
            payment_type: self
                .payment_type
                .unwrap_or_else(|| String::from(DEFAULT_PAYMENT_TYPE)),
            status: self
                .status
                .as_deref()
                .map(PaymentStatus::parse)
                .unwrap_or_default(),
            invoice_id: self.invoice_id,
            invoice_url: self.invoice_url,
            amount: self.amount.as_ref().and_then(positive_amount).unwrap_or(0),
            created_at: self.created_at.unwrap_or(fallback_created_at),
            paid_at: self.paid_at,
        }
    }
}

// =============================================================================
// Write boundary
// =============================================================================

impl From<&Project> for ProjectDocument {
    fn from(project: &Project) -> Self {
        Self {
            id: Some(project.id.to_string()),
            custom_id: Some(project.custom_id.to_string()),
            owner_id: Some(project.owner_id.clone()),
            title: Some(project.title.clone()),
            project_type: Some(project.project_type.clone()),
            status: project.status.clone(),
            moderation_status: project.moderation_status.map(|m| m.as_str().to_string()),
            procurement_method: project.procurement_method.map(|m| m.as_str().to_string()),
            tender_duration: project.tender_duration.clone(),
            tender_deadline: project.tender_deadline,
            proposals: Some(project.proposals.iter().map(ProposalDocument::from).collect()),
            selected_vendor_id: project.selected_vendor_id.clone(),
            negotiation_accepted: Some(project.negotiation_accepted),
            is_negotiating: Some(project.negotiation_active),
            project_phases: project.project_phases.map(Value::from),
            payments: Some(project.payments.iter().map(PaymentDocument::from).collect()),
            payment: None,
            initial_payment_completed: Some(project.initial_payment_completed),
            first_payment_completed: Some(project.first_payment_completed),
            progress: Some(Value::from(project.progress)),
            version: Some(project.version),
            created_at: Some(project.created_at),
            updated_at: Some(project.updated_at),
        }
    }
}

impl From<&Proposal> for ProposalDocument {
    fn from(proposal: &Proposal) -> Self {
        let mut extra = Map::new();
        if let BidAmount::Fixed(amount) = proposal.bid_amount {
            extra.insert(String::from(BID_AMOUNT_FIELDS[0]), Value::from(amount));
        }

        Self {
            vendor_id: Some(proposal.vendor_id.clone()),
            vendor_name: proposal.vendor_name.clone(),
            status: Some(proposal.status.as_str().to_string()),
            negotiation: proposal.negotiation.as_ref().map(|n| NegotiationDocument {
                status: Some(n.status.as_str().to_string()),
                note: n.note.clone(),
            }),
            submitted_at: proposal.submitted_at,
            extra,
        }
    }
}

impl From<&PaymentTranche> for PaymentDocument {
    fn from(tranche: &PaymentTranche) -> Self {
        Self {
            title: Some(tranche.installment.title()),
            payment_type: Some(tranche.payment_type.clone()),
            status: Some(tranche.status.as_str().to_string()),
            invoice_id: tranche.invoice_id.clone(),
            invoice_url: tranche.invoice_url.clone(),
            amount: Some(Value::from(tranche.amount)),
            created_at: Some(tranche.created_at),
            paid_at: tranche.paid_at,
        }
    }
}

#[track_caller]
fn required(value: Option<String>, field: &str) -> CoreResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing(field))
}

#[track_caller]
fn missing(field: &str) -> CoreError {
    CoreError::Validation {
        message: format!("project document is missing {field}"),
        field: Some(field.to_string()),
        location: ErrorLocation::from(Location::caller()),
    }
}
