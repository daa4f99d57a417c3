use crate::{ApiError, ApiResult};

use tm_core::{BID_AMOUNT_FIELDS, probe_bid_amount};

use serde::Deserialize;
use serde_json::{Map, Value};

/// A vendor bid. The amount may arrive under any of the names older
/// clients used (`totalAmount`, `price`, `bidAmount`, ...), as a number or
/// a formatted string.
#[derive(Debug, Deserialize)]
pub struct SubmitProposalRequest {
    #[serde(default)]
    pub vendor_name: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl SubmitProposalRequest {
    pub fn bid_amount(&self) -> ApiResult<i64> {
        probe_bid_amount(&self.fields).ok_or_else(|| {
            ApiError::validation(
                format!(
                    "A positive bid amount is required in one of: {}",
                    BID_AMOUNT_FIELDS.join(", ")
                ),
                Some(BID_AMOUNT_FIELDS[0]),
            )
        })
    }
}
