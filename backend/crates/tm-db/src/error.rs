use tm_core::CoreError;

use error_location::ErrorLocation;

use std::panic::Location;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Project not found: {id} {location}")]
    NotFound { id: String, location: ErrorLocation },

    #[error("Project {project_id} was modified concurrently (expected version {expected_version}) {location}")]
    WriteConflict {
        project_id: Uuid,
        expected_version: i32,
        location: ErrorLocation,
    },

    #[error("Duplicate {field}: {value} {location}")]
    Duplicate {
        field: &'static str,
        value: String,
        location: ErrorLocation,
    },

    #[error("Project document could not be encoded: {source} {location}")]
    Serialization {
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Stored project document is invalid: {source}")]
    Document {
        #[source]
        source: CoreError,
    },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for DbError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for DbError {
    fn from(source: CoreError) -> Self {
        Self::Document { source }
    }
}

impl DbError {
    #[track_caller]
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound {
            id: id.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn is_write_conflict(&self) -> bool {
        matches!(self, Self::WriteConflict { .. })
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
