use crate::{Installment, PaymentStatus};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAYMENT_TYPE: &str = "termin";

/// One invoice-backed installment of the contract price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTranche {
    pub installment: Installment,
    pub payment_type: String,
    pub status: PaymentStatus,
    pub invoice_id: Option<String>,
    pub invoice_url: Option<String>,
    pub amount: i64,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl PaymentTranche {
    /// A tranche reserved before its invoice exists.
    pub fn reserved(installment: Installment, amount: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            installment,
            payment_type: String::from(DEFAULT_PAYMENT_TYPE),
            status: PaymentStatus::Pending,
            invoice_id: None,
            invoice_url: None,
            amount,
            created_at,
            paid_at: None,
        }
    }

    pub fn is_paid(&self) -> bool {
        self.status.is_paid()
    }

    /// Stored invoice link, ignoring blanks.
    pub fn reusable_invoice_url(&self) -> Option<&str> {
        self.invoice_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    pub fn pollable_invoice_id(&self) -> Option<&str> {
        self.invoice_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}
