//! Payment gateway access: the [`PaymentGateway`] seam, its HTTP
//! implementation and retry handling for transient failures.

pub(crate) mod callback;
pub(crate) mod client;
pub(crate) mod gateway;
pub(crate) mod invoice;
pub(crate) mod retry;

#[cfg(test)]
mod tests;

pub use callback::{CALLBACK_TOKEN_HEADER, InvoiceCallback, verify_callback_token};
pub use client::{GatewayClient, GatewayError, GatewayResult};
pub use gateway::PaymentGateway;
pub use invoice::{CreateInvoice, Invoice};
pub use retry::{IsRetryable, with_retry};
