use crate::{CoreError, CoreResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// How the owner intends to pick a vendor. Only `Tender` runs the open
/// bidding sub-lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcurementMethod {
    Tender,
    Contract,
    Negotiation,
    #[serde(rename = "Penunjukan Langsung")]
    DirectAppointment,
}

impl ProcurementMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tender => "Tender",
            Self::Contract => "Contract",
            Self::Negotiation => "Negotiation",
            Self::DirectAppointment => "Penunjukan Langsung",
        }
    }

    pub fn parse_lenient(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "tender" => Some(Self::Tender),
            "contract" | "kontrak" => Some(Self::Contract),
            "negotiation" | "negosiasi" => Some(Self::Negotiation),
            "penunjukan langsung" | "direct appointment" => Some(Self::DirectAppointment),
            _ => None,
        }
    }
}

impl FromStr for ProcurementMethod {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse_lenient(s).ok_or_else(|| CoreError::InvalidProcurementMethod {
            value: s.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

impl std::fmt::Display for ProcurementMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
