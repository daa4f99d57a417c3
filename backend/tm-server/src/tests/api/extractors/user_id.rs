use crate::{ApiError, USER_ID_HEADER, UserId};

use axum::{body::Body, extract::FromRequestParts, http::Request};

async fn extract(request: Request<Body>) -> Result<UserId, ApiError> {
    let (mut parts, _body) = request.into_parts();
    UserId::from_request_parts(&mut parts, &()).await
}

#[tokio::test]
async fn test_extractor_with_valid_header() {
    let request = Request::builder()
        .header(USER_ID_HEADER, "owner-1")
        .body(Body::empty())
        .unwrap();

    let user = extract(request).await.unwrap();

    assert_eq!(user, UserId("owner-1".to_string()));
}

#[tokio::test]
async fn test_extractor_trims_whitespace() {
    let request = Request::builder()
        .header(USER_ID_HEADER, "  vendor-7 ")
        .body(Body::empty())
        .unwrap();

    let user = extract(request).await.unwrap();

    assert_eq!(user.0, "vendor-7");
}

#[tokio::test]
async fn test_extractor_rejects_missing_header() {
    let request = Request::builder().body(Body::empty()).unwrap();

    let result = extract(request).await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_extractor_rejects_blank_header() {
    let request = Request::builder()
        .header(USER_ID_HEADER, "   ")
        .body(Body::empty())
        .unwrap();

    let result = extract(request).await;

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}
