use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct NextPaymentRequest {
    /// Prefilled on the gateway's checkout page
    #[serde(default)]
    pub payer_email: Option<String>,
}
