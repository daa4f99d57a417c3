//! Payment REST API handlers

use crate::{
    ApiError, ApiResult, AppState, NextPaymentRequest, NextPaymentResponse, PaymentFlow, UserId,
    load_project,
};

use axum::{
    Json,
    extract::{Path, State},
};

/// POST /api/v1/projects/{id}/payments/next
///
/// Move the project one step along its installment schedule: hand back an
/// existing invoice, issue a new one, or record a settlement.
pub async fn next_payment(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<NextPaymentRequest>,
) -> ApiResult<Json<NextPaymentResponse>> {
    let project = load_project(&state, &id).await?;
    if project.owner_id != user_id {
        return Err(ApiError::forbidden("Only the project owner can pay installments"));
    }

    let flow = PaymentFlow::new(&state, req.payer_email);
    let outcome = flow.advance(project).await?;

    Ok(Json(NextPaymentResponse::new(outcome, state.clock.now())))
}
