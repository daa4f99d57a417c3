use crate::{CreateInvoice, GatewayError, GatewayResult, Invoice, PaymentGateway, with_retry};

use tm_config::{GatewayConfig, RetryConfig};
use tm_core::PaymentStatus;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

const INVOICES_PATH: &str = "/v2/invoices";

/// HTTP client for the invoice API. Authenticates with the secret key as
/// the basic-auth user name and an empty password.
pub struct GatewayClient {
    base_url: String,
    secret_key: String,
    config: GatewayConfig,
    retry: RetryConfig,
    client: ReqwestClient,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig, retry: &RetryConfig) -> GatewayResult<Self> {
        let secret_key = config
            .secret_key
            .clone()
            .ok_or_else(|| GatewayError::unavailable("gateway.secret_key is not configured"))?;

        let client = ReqwestClient::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            secret_key,
            config: config.clone(),
            retry: retry.clone(),
            client,
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .basic_auth(&self.secret_key, Some(""))
    }

    /// Send and decode. Non-2xx bodies are read as `{error_code, message}`.
    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> GatewayResult<T> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let parsed: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let code = parsed
                .get("error_code")
                .and_then(Value::as_str)
                .unwrap_or("UNKNOWN");
            let message = parsed
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or(status.canonical_reason().unwrap_or("Unknown error"));
            return Err(GatewayError::api(status.as_u16(), code, message));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Serialize)]
struct CreateInvoiceBody<'a> {
    external_id: &'a str,
    amount: i64,
    description: &'a str,
    currency: &'a str,
    invoice_duration: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    payer_email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    success_redirect_url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure_redirect_url: Option<&'a str>,
}

#[derive(serde::Deserialize)]
struct StatusBody {
    status: String,
}

#[async_trait]
impl PaymentGateway for GatewayClient {
    async fn create_invoice(&self, request: &CreateInvoice) -> GatewayResult<Invoice> {
        let body = CreateInvoiceBody {
            external_id: &request.external_id,
            amount: request.amount,
            description: &request.description,
            currency: &self.config.currency,
            invoice_duration: self.config.invoice_duration_secs,
            payer_email: request.payer_email.as_deref(),
            success_redirect_url: self.config.success_redirect_url.as_deref(),
            failure_redirect_url: self.config.failure_redirect_url.as_deref(),
        };

        // Single attempt: a retried POST could issue a second invoice.
        let invoice: Invoice = self
            .execute(self.request(Method::POST, INVOICES_PATH).json(&body))
            .await?;
        debug!(
            "Issued invoice {} for {} ({})",
            invoice.id, request.external_id, request.amount
        );
        Ok(invoice)
    }

    async fn check_status(&self, invoice_id: &str) -> GatewayResult<PaymentStatus> {
        let path = format!("{}/{}", INVOICES_PATH, invoice_id);
        let body: StatusBody = with_retry(&self.retry, "check invoice status", || {
            self.execute(self.request(Method::GET, &path))
        })
        .await?;

        Ok(PaymentStatus::parse(&body.status))
    }
}
