use crate::{PaymentOutcome, ProjectDto};

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct NextPaymentResponse {
    /// `invoice_created`, `invoice_reused`, `settled` or `all_settled`
    pub outcome: &'static str,
    pub installment: Option<String>,
    pub installment_number: Option<u32>,
    pub amount: Option<i64>,
    pub remaining_amount: Option<i64>,
    pub invoice_id: Option<String>,
    /// Where to send the payer
    pub invoice_url: Option<String>,
    pub project: ProjectDto,
}

impl NextPaymentResponse {
    pub fn new(outcome: PaymentOutcome, now: DateTime<Utc>) -> Self {
        match outcome {
            PaymentOutcome::InvoiceCreated {
                project,
                installment,
                invoice_id,
                invoice_url,
                amount,
                remaining_amount,
            } => Self {
                outcome: "invoice_created",
                installment: Some(installment.title()),
                installment_number: installment.number(),
                amount: Some(amount),
                remaining_amount: Some(remaining_amount),
                invoice_id: Some(invoice_id),
                invoice_url: Some(invoice_url),
                project: ProjectDto::from_project(project, now),
            },
            PaymentOutcome::InvoiceReused {
                project,
                installment,
                invoice_id,
                invoice_url,
                amount,
            } => Self {
                outcome: "invoice_reused",
                installment: Some(installment.title()),
                installment_number: installment.number(),
                amount: Some(amount),
                remaining_amount: None,
                invoice_id,
                invoice_url: Some(invoice_url),
                project: ProjectDto::from_project(project, now),
            },
            PaymentOutcome::Settled {
                project,
                installment,
            } => Self {
                outcome: "settled",
                installment: Some(installment.title()),
                installment_number: installment.number(),
                amount: None,
                remaining_amount: None,
                invoice_id: None,
                invoice_url: None,
                project: ProjectDto::from_project(project, now),
            },
            PaymentOutcome::AllSettled { project } => Self {
                outcome: "all_settled",
                installment: None,
                installment_number: None,
                amount: None,
                remaining_amount: None,
                invoice_id: None,
                invoice_url: None,
                project: ProjectDto::from_project(project, now),
            },
        }
    }
}
