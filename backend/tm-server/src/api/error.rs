//! REST API error types
//!
//! Every failure leaves the service as `{"error": {code, message, field}}`
//! with a matching HTTP status.

use tm_core::CoreError;
use tm_db::DbError;
use tm_gateway::GatewayError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g. "NOT_FOUND", "NO_ACCEPTED_PROPOSAL")
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// 404
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// 400
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// 401
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// 403
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// 409
    #[error("Conflict: {message} {location}")]
    Conflict {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// 422: the request is well formed but the project data does not allow
    /// it. Fixing it needs owner or vendor action, so retrying is pointless.
    #[error("Unprocessable: {message} {location}")]
    Unprocessable {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// 502
    #[error("Payment gateway unavailable: {message} {location}")]
    Gateway {
        message: String,
        location: ErrorLocation,
    },

    /// 408
    #[error("Request timed out {location}")]
    Timeout { location: ErrorLocation },

    /// 503
    #[error("Service unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// 500
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(String::from),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Gateway { .. } => StatusCode::BAD_GATEWAY,
            Self::Timeout { .. } => StatusCode::REQUEST_TIMEOUT,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("{}", self);
        }

        let body = match self {
            ApiError::NotFound { message, .. } => ApiErrorBody {
                code: "NOT_FOUND".into(),
                message,
                field: None,
            },
            ApiError::Validation { message, field, .. } => ApiErrorBody {
                code: "VALIDATION_ERROR".into(),
                message,
                field,
            },
            ApiError::Unauthorized { message, .. } => ApiErrorBody {
                code: "UNAUTHORIZED".into(),
                message,
                field: None,
            },
            ApiError::Forbidden { message, .. } => ApiErrorBody {
                code: "FORBIDDEN".into(),
                message,
                field: None,
            },
            ApiError::Conflict { code, message, .. }
            | ApiError::Unprocessable { code, message, .. } => ApiErrorBody {
                code: code.into(),
                message,
                field: None,
            },
            ApiError::Gateway { message, .. } => ApiErrorBody {
                code: "GATEWAY_UNAVAILABLE".into(),
                message,
                field: None,
            },
            ApiError::Timeout { .. } => ApiErrorBody {
                code: "TIMEOUT".into(),
                message: "Request timed out".into(),
                field: None,
            },
            ApiError::Unavailable { message, .. } => ApiErrorBody {
                code: "UNAVAILABLE".into(),
                message,
                field: None,
            },
            ApiError::Internal { message, .. } => ApiErrorBody {
                code: "INTERNAL_ERROR".into(),
                message,
                field: None,
            },
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

impl From<uuid::Error> for ApiError {
    #[track_caller]
    fn from(e: uuid::Error) -> Self {
        ApiError::validation(format!("Invalid UUID format: {}", e), Some("id"))
    }
}

impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            CoreError::Validation { message, field, .. } => ApiError::Validation {
                message,
                field,
                location,
            },
            CoreError::InvalidModerationStatus { value, .. } => ApiError::Validation {
                message: format!("Unknown moderation status: {}", value),
                field: Some("moderation_status".into()),
                location,
            },
            CoreError::InvalidProcurementMethod { value, .. } => ApiError::Validation {
                message: format!("Unknown procurement method: {}", value),
                field: Some("procurement_method".into()),
                location,
            },
            CoreError::InvalidCustomId { value, reason, .. } => ApiError::Validation {
                message: format!("Cannot build project id from {}: {}", value, reason),
                field: Some("project_type".into()),
                location,
            },
            CoreError::NoAcceptedProposal { project_id, .. } => ApiError::Unprocessable {
                code: "NO_ACCEPTED_PROPOSAL",
                message: format!("Project {} has no accepted proposal", project_id),
                location,
            },
            CoreError::AmountNotFound { vendor_id, .. } => ApiError::Unprocessable {
                code: "AMOUNT_NOT_FOUND",
                message: format!("The proposal from vendor {} has no bid amount", vendor_id),
                location,
            },
            CoreError::Uuid { source, .. } => ApiError::Validation {
                message: format!("Invalid UUID format: {}", source),
                field: None,
                location,
            },
        }
    }
}

impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match e {
            DbError::NotFound { id, .. } => ApiError::NotFound {
                message: format!("Project {} not found", id),
                location,
            },
            DbError::WriteConflict { project_id, .. } => ApiError::Conflict {
                code: "WRITE_CONFLICT",
                message: format!(
                    "Project {} is being changed by another request, reload and retry",
                    project_id
                ),
                location,
            },
            DbError::Duplicate { field, value, .. } => ApiError::Conflict {
                code: "DUPLICATE",
                message: format!("A project with {} {} already exists", field, value),
                location,
            },
            DbError::Document { source } => {
                // Stored data, not the request, is broken
                log::error!("Stored project document rejected: {}", source);
                ApiError::Internal {
                    message: "Stored project data is invalid".into(),
                    location,
                }
            }
            other => {
                // Don't expose database details to clients
                log::error!("Database error: {}", other);
                ApiError::Internal {
                    message: "Database operation failed".into(),
                    location,
                }
            }
        }
    }
}

impl From<GatewayError> for ApiError {
    #[track_caller]
    fn from(e: GatewayError) -> Self {
        let message = match &e {
            GatewayError::Api { status, code, .. } => {
                format!("Payment gateway rejected the request ({} {})", status, code)
            }
            GatewayError::Unavailable { message, .. } => message.clone(),
            GatewayError::Http { .. } | GatewayError::Json { .. } => {
                "Payment gateway did not respond, try again".into()
            }
        };
        log::warn!("Gateway error: {}", e);
        ApiError::Gateway {
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
