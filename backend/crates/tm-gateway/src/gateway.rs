use crate::{CreateInvoice, GatewayResult, Invoice};

use tm_core::PaymentStatus;

use async_trait::async_trait;

/// Invoice issuing and status lookup. The HTTP client is the production
/// implementation; the server holds it as `Arc<dyn PaymentGateway>`.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Not idempotent: every successful call issues a new invoice.
    async fn create_invoice(&self, request: &CreateInvoice) -> GatewayResult<Invoice>;

    async fn check_status(&self, invoice_id: &str) -> GatewayResult<PaymentStatus>;
}
