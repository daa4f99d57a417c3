use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CallbackResponse {
    pub received: bool,
    /// True when this callback marked a tranche paid
    pub settled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment: Option<String>,
}

impl CallbackResponse {
    pub fn ignored() -> Self {
        Self {
            received: true,
            settled: false,
            project_id: None,
            installment: None,
        }
    }
}
