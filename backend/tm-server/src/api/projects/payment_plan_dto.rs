use tm_core::{PaymentInstruction, TranchePlan};

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PaymentPlanDto {
    pub bid_amount: i64,
    pub phases: u32,
    pub termin_amount: i64,
    pub first_payment_amount: i64,
    pub remaining_amount: i64,
}

impl From<TranchePlan> for PaymentPlanDto {
    fn from(plan: TranchePlan) -> Self {
        Self {
            bid_amount: plan.bid_amount(),
            phases: plan.phases(),
            termin_amount: plan.termin_amount(),
            first_payment_amount: plan.first_payment_amount(),
            remaining_amount: plan.remaining_amount(),
        }
    }
}

/// Next payment step, flattened for clients.
#[derive(Debug, Clone, Serialize)]
pub struct NextPaymentDto {
    /// `create_invoice`, `reuse_existing_invoice`, `check_invoice_status`,
    /// `already_settled` or `all_settled`
    pub kind: &'static str,
    pub installment: Option<String>,
    pub installment_number: Option<u32>,
    pub amount: Option<i64>,
    pub remaining_amount: Option<i64>,
    pub invoice_id: Option<String>,
    pub invoice_url: Option<String>,
}

impl NextPaymentDto {
    fn settled(kind: &'static str) -> Self {
        Self {
            kind,
            installment: None,
            installment_number: None,
            amount: None,
            remaining_amount: None,
            invoice_id: None,
            invoice_url: None,
        }
    }
}

impl From<PaymentInstruction> for NextPaymentDto {
    fn from(instruction: PaymentInstruction) -> Self {
        match instruction {
            PaymentInstruction::AlreadySettled => Self::settled("already_settled"),
            PaymentInstruction::AllSettled => Self::settled("all_settled"),
            PaymentInstruction::ReuseExistingInvoice {
                installment,
                invoice_id,
                invoice_url,
            } => Self {
                kind: "reuse_existing_invoice",
                installment: Some(installment.title()),
                installment_number: installment.number(),
                amount: None,
                remaining_amount: None,
                invoice_id,
                invoice_url: Some(invoice_url),
            },
            PaymentInstruction::CheckInvoiceStatus {
                installment,
                invoice_id,
                amount,
            } => Self {
                kind: "check_invoice_status",
                installment: Some(installment.title()),
                installment_number: installment.number(),
                amount: Some(amount),
                remaining_amount: None,
                invoice_id: Some(invoice_id),
                invoice_url: None,
            },
            PaymentInstruction::CreateInvoice {
                installment,
                amount,
                remaining_amount,
            } => Self {
                kind: "create_invoice",
                installment: Some(installment.title()),
                installment_number: installment.number(),
                amount: Some(amount),
                remaining_amount: Some(remaining_amount),
                invoice_id: None,
                invoice_url: None,
            },
        }
    }
}
