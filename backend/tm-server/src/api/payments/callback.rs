//! Gateway webhook

use crate::{ApiError, ApiResult, AppState, CallbackResponse};

use tm_gateway::{CALLBACK_TOKEN_HEADER, InvoiceCallback, verify_callback_token};

use std::panic::Location;

use axum::{Json, extract::State, http::HeaderMap};
use error_location::ErrorLocation;
use log::{info, warn};

/// POST /api/v1/payments/callback
///
/// Sent by the gateway whenever an invoice changes state. Only paid
/// invoices change anything; unknown invoices are acknowledged so the
/// gateway stops redelivering them.
pub async fn payment_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(callback): Json<InvoiceCallback>,
) -> ApiResult<Json<CallbackResponse>> {
    let Some(expected) = state.config.gateway.callback_token.as_deref() else {
        return Err(ApiError::Unavailable {
            message: "Payment callbacks are not configured".into(),
            location: ErrorLocation::from(Location::caller()),
        });
    };

    let provided = headers
        .get(CALLBACK_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !verify_callback_token(expected, provided) {
        warn!("Rejected payment callback for invoice {}: bad token", callback.id);
        return Err(ApiError::unauthorized("Invalid callback token"));
    }

    if !callback.status.is_paid() {
        info!("Invoice {} reported {}, nothing to record", callback.id, callback.status);
        return Ok(Json(CallbackResponse::ignored()));
    }

    let now = state.clock.now();
    let Some((project, installment)) = state.repo.mark_invoice_paid(&callback.id, now).await?
    else {
        warn!("Payment callback for unknown invoice {}", callback.id);
        return Ok(Json(CallbackResponse::ignored()));
    };

    match &installment {
        Some(installment) => info!(
            "{} paid on {} via callback (invoice {})",
            installment, project.custom_id, callback.id
        ),
        None => info!("Invoice {} was already recorded as paid", callback.id),
    }

    Ok(Json(CallbackResponse {
        received: true,
        settled: installment.is_some(),
        project_id: Some(project.custom_id.to_string()),
        installment: installment.map(|i| i.title()),
    }))
}
