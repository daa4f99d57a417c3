use error_location::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Invalid moderation status: {value} {location}")]
    InvalidModerationStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid procurement method: {value} {location}")]
    InvalidProcurementMethod {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid custom id {value}: {reason} {location}")]
    InvalidCustomId {
        value: String,
        reason: String,
        location: ErrorLocation,
    },

    #[error("Project {project_id} has no accepted proposal {location}")]
    NoAcceptedProposal {
        project_id: String,
        location: ErrorLocation,
    },

    #[error("No bid amount found on the proposal from vendor {vendor_id} {location}")]
    AmountNotFound {
        vendor_id: String,
        location: ErrorLocation,
    },

    #[error("UUID parse error: {source} {location}")]
    Uuid {
        source: uuid::Error,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
