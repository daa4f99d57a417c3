use serde::{Deserialize, Serialize};

/// Canonical bid amount, resolved once when a proposal is normalized.
///
/// Amounts are whole units of the local currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum BidAmount {
    Fixed(i64),
    #[default]
    Missing,
}

impl BidAmount {
    pub fn value(&self) -> Option<i64> {
        match self {
            Self::Fixed(value) => Some(*value),
            Self::Missing => None,
        }
    }
}

impl From<Option<i64>> for BidAmount {
    fn from(value: Option<i64>) -> Self {
        match value {
            Some(v) if v > 0 => Self::Fixed(v),
            _ => Self::Missing,
        }
    }
}
