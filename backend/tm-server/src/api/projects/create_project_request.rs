use crate::{ApiError, ApiResult};

use tm_core::{MAX_TENDER_DAYS, ProcurementMethod, TenderDuration};

use std::str::FromStr;

use serde::Deserialize;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_PROJECT_PHASES: u32 = 24;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,

    /// Free text; its first three letters prefix the custom id
    /// ("Design" -> `DES-ID-2507-0001`)
    pub project_type: String,

    /// `Tender`, `Contract`, `Negotiation` or `Penunjukan Langsung`
    pub procurement_method: String,

    /// Required for tenders, e.g. "2 Minggu"
    #[serde(default)]
    pub tender_duration: Option<String>,

    /// Installment count, 3 when omitted
    #[serde(default)]
    pub project_phases: Option<u32>,

    /// Skip the draft state and go straight to moderation
    #[serde(default)]
    pub submit_for_review: bool,
}

impl CreateProjectRequest {
    /// Check the request and return the parsed procurement method.
    pub fn validate(&self) -> ApiResult<ProcurementMethod> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ApiError::validation("Title is required", Some("title")));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(ApiError::validation(
                format!("Title must be at most {} characters", MAX_TITLE_LENGTH),
                Some("title"),
            ));
        }

        let method = ProcurementMethod::from_str(&self.procurement_method)?;

        if method == ProcurementMethod::Tender {
            let duration = self.tender_duration.as_deref().map(str::trim).unwrap_or_default();
            if duration.is_empty() {
                return Err(ApiError::validation(
                    "Tender projects need a tender duration",
                    Some("tender_duration"),
                ));
            }
            if !TenderDuration::parse_exact(duration).is_some_and(|d| d.is_within_limit()) {
                return Err(ApiError::validation(
                    format!(
                        "Tender duration must be between 1 and {} days, e.g. \"2 Minggu\", got {}",
                        MAX_TENDER_DAYS, duration
                    ),
                    Some("tender_duration"),
                ));
            }
        }

        if let Some(phases) = self.project_phases
            && !(1..=MAX_PROJECT_PHASES).contains(&phases)
        {
            return Err(ApiError::validation(
                format!("project_phases must be 1-{}, got {}", MAX_PROJECT_PHASES, phases),
                Some("project_phases"),
            ));
        }

        Ok(method)
    }
}
