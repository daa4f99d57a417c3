use tm_core::PaymentStatus;

use serde::{Deserialize, Deserializer};

/// Amounts are whole units of the configured currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateInvoice {
    /// Our reference, echoed back on callbacks
    pub external_id: String,
    pub amount: i64,
    pub payer_email: Option<String>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub invoice_url: String,
    #[serde(deserialize_with = "deserialize_status", default)]
    pub status: PaymentStatus,
}

pub(crate) fn deserialize_status<'de, D>(deserializer: D) -> Result<PaymentStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().map(PaymentStatus::parse).unwrap_or_default())
}
