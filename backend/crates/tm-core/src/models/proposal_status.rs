use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Vendor bid state. Free-text values that do not match a known state are
/// kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ProposalStatus {
    #[default]
    Submitted,
    Accepted,
    Rejected,
    Negotiating,
    CounterOffer,
    Resubmitted,
    Negotiated,
    PendingReview,
    Other(String),
}

impl ProposalStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Submitted => "submitted",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Negotiating => "negotiating",
            Self::CounterOffer => "counter_offer",
            Self::Resubmitted => "resubmitted",
            Self::Negotiated => "negotiated",
            Self::PendingReview => "pending_review",
            Self::Other(value) => value,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "" | "submitted" | "pending" => Self::Submitted,
            "accepted" => Self::Accepted,
            "rejected" => Self::Rejected,
            "negotiating" | "negotiate" => Self::Negotiating,
            "counter_offer" => Self::CounterOffer,
            "resubmitted" => Self::Resubmitted,
            "negotiated" => Self::Negotiated,
            "pending_review" => Self::PendingReview,
            _ => Self::Other(value.to_string()),
        }
    }

    /// True for every state that means a price is still being discussed.
    pub fn is_negotiation_signal(&self) -> bool {
        matches!(
            self,
            Self::Negotiating
                | Self::CounterOffer
                | Self::Resubmitted
                | Self::Negotiated
                | Self::PendingReview
        )
    }
}

impl Serialize for ProposalStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProposalStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

impl std::fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
