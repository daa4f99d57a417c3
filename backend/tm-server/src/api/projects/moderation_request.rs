use crate::{ApiError, ApiResult};

use tm_core::ModerationStatus;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ModerationRequest {
    pub moderation_status: String,
}

impl ModerationRequest {
    pub fn decision(&self) -> ApiResult<ModerationStatus> {
        ModerationStatus::parse_lenient(&self.moderation_status).ok_or_else(|| {
            ApiError::validation(
                format!("Unknown moderation status: {}", self.moderation_status),
                Some("moderation_status"),
            )
        })
    }
}

/// Owners move their own project between draft and review; every other
/// decision belongs to moderators.
pub fn is_owner_decision(decision: ModerationStatus) -> bool {
    matches!(decision, ModerationStatus::Draft | ModerationStatus::Pending)
}
