use serde::{Deserialize, Serialize};

/// Dashboard grouping of statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Draft,
    Tender,
    Bid,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Tender => "tender",
            Self::Bid => "bid",
        }
    }
}
