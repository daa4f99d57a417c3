use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// State of the price negotiation attached to a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NegotiationStatus {
    Pending,
    Accepted,
    Rejected,
    Other(String),
}

impl NegotiationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Other(value) => value,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pending" => Self::Pending,
            "accepted" => Self::Accepted,
            "rejected" => Self::Rejected,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl Serialize for NegotiationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NegotiationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}
