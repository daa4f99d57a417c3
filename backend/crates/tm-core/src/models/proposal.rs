use crate::{BidAmount, NegotiationStatus, ProposalStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Negotiation {
    pub status: NegotiationStatus,
    pub note: Option<String>,
}

/// A vendor's bid on a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub vendor_id: String,
    pub vendor_name: Option<String>,
    pub status: ProposalStatus,
    pub negotiation: Option<Negotiation>,
    pub bid_amount: BidAmount,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Proposal {
    pub fn new(vendor_id: String, bid_amount: BidAmount, submitted_at: DateTime<Utc>) -> Self {
        Self {
            vendor_id,
            vendor_name: None,
            status: ProposalStatus::Submitted,
            negotiation: None,
            bid_amount,
            submitted_at: Some(submitted_at),
        }
    }

    /// Accepted outright, or accepted at the end of a negotiation.
    pub fn is_accepted(&self) -> bool {
        self.status == ProposalStatus::Accepted
            || self
                .negotiation
                .as_ref()
                .is_some_and(|n| n.status == NegotiationStatus::Accepted)
    }

    pub fn is_negotiating(&self) -> bool {
        self.status.is_negotiation_signal()
            || self
                .negotiation
                .as_ref()
                .is_some_and(|n| n.status == NegotiationStatus::Pending)
    }
}
