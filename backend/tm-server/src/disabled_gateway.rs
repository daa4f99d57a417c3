use tm_core::PaymentStatus;
use tm_gateway::{CreateInvoice, GatewayError, GatewayResult, Invoice, PaymentGateway};

use async_trait::async_trait;

/// Stand-in used when no gateway secret key is configured. Project
/// endpoints keep working; payment calls fail with `Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGateway;

#[async_trait]
impl PaymentGateway for DisabledGateway {
    async fn create_invoice(&self, request: &CreateInvoice) -> GatewayResult<Invoice> {
        Err(GatewayError::unavailable(format!(
            "cannot issue invoice {}: payment gateway is not configured",
            request.external_id
        )))
    }

    async fn check_status(&self, invoice_id: &str) -> GatewayResult<PaymentStatus> {
        Err(GatewayError::unavailable(format!(
            "cannot check invoice {invoice_id}: payment gateway is not configured"
        )))
    }
}
