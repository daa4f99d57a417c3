use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_CURRENCY, DEFAULT_GATEWAY_BASE_URL,
    DEFAULT_GATEWAY_TIMEOUT_SECS, DEFAULT_INVOICE_DURATION_SECS, MAX_GATEWAY_TIMEOUT_SECS,
};

use std::time::Duration;

use serde::Deserialize;

/// Payment gateway connection. `secret_key` and `callback_token` are
/// secrets and never logged.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub secret_key: Option<String>,
    /// Shared token the gateway echoes in `x-callback-token` on webhooks
    pub callback_token: Option<String>,
    pub timeout_secs: u64,
    pub invoice_duration_secs: u64,
    pub currency: String,
    pub success_redirect_url: Option<String>,
    pub failure_redirect_url: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_GATEWAY_BASE_URL),
            secret_key: None,
            callback_token: None,
            timeout_secs: DEFAULT_GATEWAY_TIMEOUT_SECS,
            invoice_duration_secs: DEFAULT_INVOICE_DURATION_SECS,
            currency: String::from(DEFAULT_CURRENCY),
            success_redirect_url: None,
            failure_redirect_url: None,
        }
    }
}

impl GatewayConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::gateway(format!(
                "gateway.base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 || self.timeout_secs > MAX_GATEWAY_TIMEOUT_SECS {
            return Err(ConfigError::gateway(format!(
                "gateway.timeout_secs must be 1-{}, got {}",
                MAX_GATEWAY_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        if self.invoice_duration_secs == 0 {
            return Err(ConfigError::gateway("gateway.invoice_duration_secs must be > 0"));
        }

        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::gateway(format!(
                "gateway.currency must be a 3-letter ISO code, got '{}'",
                self.currency
            )));
        }

        for (name, value) in [
            ("gateway.secret_key", &self.secret_key),
            ("gateway.callback_token", &self.callback_token),
        ] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(ConfigError::gateway(format!("{name} cannot be blank")));
            }
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }
}
