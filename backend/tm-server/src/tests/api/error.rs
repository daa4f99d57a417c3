use crate::ApiError;

use tm_core::CoreError;
use tm_db::DbError;
use tm_gateway::GatewayError;

use std::panic::Location;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http_body_util::BodyExt;
use serde_json::Value;

async fn body_json(error: ApiError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let (status, json) = body_json(ApiError::not_found("Project DES-ID-2501-0001")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Project DES-ID-2501-0001");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let (status, json) =
        body_json(ApiError::validation("Title is required", Some("title"))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "title");
}

#[tokio::test]
async fn test_conflict_carries_its_code() {
    let (status, json) =
        body_json(ApiError::conflict("PAYMENT_IN_PROGRESS", "retry shortly")).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "PAYMENT_IN_PROGRESS");
}

#[tokio::test]
async fn test_timeout_returns_408() {
    let (status, json) = body_json(ApiError::Timeout {
        location: ErrorLocation::from(Location::caller()),
    })
    .await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(json["error"]["code"], "TIMEOUT");
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let (status, json) = body_json(ApiError::internal("pool closed")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn test_missing_accepted_proposal_is_unprocessable() {
    let error: ApiError = CoreError::NoAcceptedProposal {
        project_id: "DES-ID-2501-0001".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(matches!(
        error,
        ApiError::Unprocessable {
            code: "NO_ACCEPTED_PROPOSAL",
            ..
        }
    ));
}

#[test]
fn test_missing_amount_is_unprocessable() {
    let error: ApiError = CoreError::AmountNotFound {
        vendor_id: "vendor-1".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    assert!(matches!(
        error,
        ApiError::Unprocessable {
            code: "AMOUNT_NOT_FOUND",
            ..
        }
    ));
}

#[test]
fn test_unknown_moderation_status_names_its_field() {
    let error: ApiError = CoreError::InvalidModerationStatus {
        value: "maybe".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    match error {
        ApiError::Validation { field, .. } => {
            assert_eq!(field.as_deref(), Some("moderation_status"))
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_gateway_error_is_bad_gateway() {
    let error: ApiError = GatewayError::unavailable("connection refused").into();

    assert_eq!(error.status(), StatusCode::BAD_GATEWAY);
}

#[test]
fn test_db_not_found_is_404() {
    let error: ApiError = DbError::NotFound {
        id: "DES-ID-2501-0001".into(),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    assert_eq!(error.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_uuid_error_converts_to_validation() {
    let uuid_error = uuid::Uuid::parse_str("not-a-uuid").unwrap_err();
    let error: ApiError = uuid_error.into();

    assert_eq!(error.status(), StatusCode::BAD_REQUEST);
}
