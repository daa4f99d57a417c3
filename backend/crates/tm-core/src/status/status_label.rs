use crate::{Phase, ProjectAction};

/// Human-facing project status. Exactly one is active for any project at
/// any instant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    InProgress,
    UnderReview,
    RevisionRequired,
    Approved,
    Open,
    Locked,
    Negotiation,
    AwardedPendingPayment,
    Ongoing,
    Completed,
    Failed,
    /// Raw lifecycle flag that maps to none of the above.
    Other(String),
}

impl StatusLabel {
    /// Stable machine code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::UnderReview => "under_review",
            Self::RevisionRequired => "revision_required",
            Self::Approved => "approved",
            Self::Open => "open",
            Self::Locked => "locked",
            Self::Negotiation => "negotiation",
            Self::AwardedPendingPayment => "awarded_pending_payment",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Other(_) => "other",
        }
    }

    pub fn display(&self) -> &str {
        match self {
            Self::InProgress => "In Progress",
            Self::UnderReview => "Under Review",
            Self::RevisionRequired => "Revision Required",
            Self::Approved => "Approved",
            Self::Open => "Open",
            Self::Locked => "Locked",
            Self::Negotiation => "Negotiation",
            Self::AwardedPendingPayment => "Awarded - Pending Payment",
            Self::Ongoing => "On Going",
            Self::Completed => "Completed",
            Self::Failed => "Failed",
            Self::Other(raw) => raw,
        }
    }

    /// Map a raw lifecycle flag onto a known label where one matches.
    pub fn from_raw(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "draft" | "inprogress" => Self::InProgress,
            "underreview" | "pendingreview" | "inreview" => Self::UnderReview,
            "revisionrequired" | "rejected" => Self::RevisionRequired,
            "approved" => Self::Approved,
            "open" => Self::Open,
            "locked" => Self::Locked,
            "negotiation" => Self::Negotiation,
            "awarded" | "awardedpendingpayment" => Self::AwardedPendingPayment,
            "ongoing" => Self::Ongoing,
            "completed" | "selesai" => Self::Completed,
            "failed" => Self::Failed,
            _ => Self::Other(raw.to_string()),
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            Self::InProgress | Self::UnderReview | Self::RevisionRequired | Self::Approved => {
                Phase::Draft
            }
            Self::Open
            | Self::Locked
            | Self::Negotiation
            | Self::AwardedPendingPayment
            | Self::Failed => Phase::Tender,
            Self::Ongoing | Self::Completed => Phase::Bid,
            Self::Other(_) => Phase::Draft,
        }
    }

    pub fn action(&self) -> ProjectAction {
        action_for(self)
    }
}

/// Action affordance offered for a status. Unknown statuses only allow
/// viewing details.
pub fn action_for(label: &StatusLabel) -> ProjectAction {
    match label {
        StatusLabel::InProgress => ProjectAction::EditAndDelete,
        StatusLabel::UnderReview => ProjectAction::WaitForReview,
        StatusLabel::RevisionRequired => ProjectAction::ReviseAndResubmit,
        StatusLabel::Approved => ProjectAction::ViewDetails,
        StatusLabel::Open | StatusLabel::Locked | StatusLabel::Negotiation => {
            ProjectAction::ViewOffers
        }
        StatusLabel::AwardedPendingPayment => ProjectAction::PayInstallment(1),
        StatusLabel::Ongoing => ProjectAction::MonitorProgress,
        StatusLabel::Failed => ProjectAction::Resubmit,
        StatusLabel::Completed => ProjectAction::ViewResult,
        StatusLabel::Other(_) => ProjectAction::ViewDetails,
    }
}

impl std::fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}
