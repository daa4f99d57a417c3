use crate::{ApiError, ApiResult};

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProgressRequest {
    pub progress: u32,
}

impl ProgressRequest {
    pub fn percent(&self) -> ApiResult<u8> {
        u8::try_from(self.progress).map_err(|_| {
            ApiError::validation(
                format!("progress must be 0-100, got {}", self.progress),
                Some("progress"),
            )
        })
    }
}
