//! Collecting the next installment for a project.
//!
//! `compute_next_payment` decides what should happen; this module does it
//! against the store and the gateway:
//!
//! - a stored invoice link is always reused, never replaced
//! - an invoice id without a link is polled first; if the gateway says paid
//!   the tranche is settled, otherwise (or if the gateway cannot answer) a
//!   new invoice is issued
//! - a new invoice is only requested after the tranche slot has been
//!   reserved with a versioned write, so two concurrent requests cannot both
//!   issue one
//! - a first tranche that is paid on record but not flagged on the project
//!   gets its flags written back and the project moves to "On Going"

use crate::{ApiError, ApiResult, AppState};

use tm_core::{
    Installment, PaymentInstruction, PaymentTranche, Project, compute_next_payment, payment_plan,
};
use tm_db::TrancheReservation;
use tm_gateway::CreateInvoice;

use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use uuid::Uuid;

#[derive(Debug)]
pub enum PaymentOutcome {
    InvoiceCreated {
        project: Project,
        installment: Installment,
        invoice_id: String,
        invoice_url: String,
        amount: i64,
        remaining_amount: i64,
    },
    InvoiceReused {
        project: Project,
        installment: Installment,
        invoice_id: Option<String>,
        invoice_url: String,
        amount: i64,
    },
    Settled {
        project: Project,
        installment: Installment,
    },
    AllSettled {
        project: Project,
    },
}

/// Outcome of trying to take over a tranche slot for a new invoice.
enum TrancheClaim {
    Claimed(Project),
    Reuse(Project, PaymentTranche),
    Paid(Project, Installment),
    /// Another request reserved the slot and is still talking to the gateway.
    Busy,
}

pub struct PaymentFlow<'a> {
    state: &'a AppState,
    payer_email: Option<String>,
    now: DateTime<Utc>,
}

impl<'a> PaymentFlow<'a> {
    pub fn new(state: &'a AppState, payer_email: Option<String>) -> Self {
        Self {
            state,
            payer_email: payer_email.filter(|e| !e.trim().is_empty()),
            now: state.clock.now(),
        }
    }

    pub async fn advance(&self, project: Project) -> ApiResult<PaymentOutcome> {
        match compute_next_payment(&project)? {
            PaymentInstruction::AlreadySettled => self.settle_first_payment(project.id).await,
            PaymentInstruction::AllSettled => Ok(PaymentOutcome::AllSettled { project }),
            PaymentInstruction::ReuseExistingInvoice {
                installment,
                invoice_id,
                invoice_url,
            } => {
                let amount = project.tranche(&installment).map_or(0, |t| t.amount);
                Ok(PaymentOutcome::InvoiceReused {
                    project,
                    installment,
                    invoice_id,
                    invoice_url,
                    amount,
                })
            }
            PaymentInstruction::CheckInvoiceStatus {
                installment,
                invoice_id,
                amount,
            } => {
                match self.state.gateway.check_status(&invoice_id).await {
                    Ok(status) if status.is_paid() => {
                        return self.settle_invoice(&invoice_id, installment).await;
                    }
                    Ok(status) => info!(
                        "Invoice {} for {} on {} is {}, issuing a new one",
                        invoice_id, installment, project.custom_id, status
                    ),
                    Err(e) => warn!(
                        "Could not check invoice {} on {}, issuing a new one: {}",
                        invoice_id, project.custom_id, e
                    ),
                }
                let remaining_amount = payment_plan(&project)?.remaining_after(&installment);
                self.issue_invoice(project, installment, amount, remaining_amount)
                    .await
            }
            PaymentInstruction::CreateInvoice {
                installment,
                amount,
                remaining_amount,
            } => {
                self.issue_invoice(project, installment, amount, remaining_amount)
                    .await
            }
        }
    }

    async fn settle_first_payment(&self, project_id: Uuid) -> ApiResult<PaymentOutcome> {
        let now = self.now;
        let (project, _) = self
            .state
            .repo
            .modify(project_id, |p| -> ApiResult<()> {
                p.settle_first_payment(now);
                Ok(())
            })
            .await?;

        info!("{} settled on {}, project is on going", Installment::First, project.custom_id);
        Ok(PaymentOutcome::Settled {
            project,
            installment: Installment::First,
        })
    }

    async fn settle_invoice(
        &self,
        invoice_id: &str,
        installment: Installment,
    ) -> ApiResult<PaymentOutcome> {
        let (project, _) = self
            .state
            .repo
            .mark_invoice_paid(invoice_id, self.now)
            .await?
            .ok_or_else(|| {
                ApiError::not_found(format!("Invoice {} is not attached to a project", invoice_id))
            })?;

        info!("{} paid on {} (invoice {})", installment, project.custom_id, invoice_id);
        Ok(PaymentOutcome::Settled {
            project,
            installment,
        })
    }

    async fn issue_invoice(
        &self,
        project: Project,
        installment: Installment,
        amount: i64,
        remaining_amount: i64,
    ) -> ApiResult<PaymentOutcome> {
        let project = match self.claim_tranche(project.id, &installment, amount).await? {
            TrancheClaim::Claimed(project) => project,
            TrancheClaim::Reuse(project, tranche) => {
                return Ok(PaymentOutcome::InvoiceReused {
                    invoice_id: tranche.pollable_invoice_id().map(String::from),
                    invoice_url: tranche.reusable_invoice_url().unwrap_or_default().to_string(),
                    amount: tranche.amount,
                    project,
                    installment,
                });
            }
            TrancheClaim::Paid(project, installment) => {
                return Ok(PaymentOutcome::Settled {
                    project,
                    installment,
                });
            }
            TrancheClaim::Busy => {
                return Err(ApiError::conflict(
                    "PAYMENT_IN_PROGRESS",
                    format!("An invoice for {} is already being created, retry shortly", installment),
                ));
            }
        };

        let request = CreateInvoice {
            external_id: external_id(&project, &installment, self.now),
            amount,
            payer_email: self.payer_email.clone(),
            description: format!("{} - {}", project.title, installment),
        };

        let invoice = match self.state.gateway.create_invoice(&request).await {
            Ok(invoice) => invoice,
            Err(e) => {
                self.release_claim(project.id, &installment).await;
                return Err(e.into());
            }
        };

        let project = self
            .state
            .repo
            .attach_invoice(
                project.id,
                &installment,
                &invoice.id,
                &invoice.invoice_url,
                self.now,
            )
            .await?;

        info!(
            "Invoice {} issued for {} on {} ({})",
            invoice.id, installment, project.custom_id, amount
        );
        Ok(PaymentOutcome::InvoiceCreated {
            project,
            installment,
            invoice_id: invoice.id,
            invoice_url: invoice.invoice_url,
            amount,
            remaining_amount,
        })
    }

    /// Reserve the slot, or take over a slot whose invoice is unpaid and has
    /// no link, or whose reservation outlived the gateway timeout.
    async fn claim_tranche(
        &self,
        project_id: Uuid,
        installment: &Installment,
        amount: i64,
    ) -> ApiResult<TrancheClaim> {
        let (project, tranche) = match self
            .state
            .repo
            .reserve_tranche(project_id, installment, amount, self.now)
            .await?
        {
            TrancheReservation::Reserved { project, .. } => {
                return Ok(TrancheClaim::Claimed(project));
            }
            TrancheReservation::Existing { project, tranche } => (project, tranche),
        };

        if tranche.is_paid() {
            return Ok(TrancheClaim::Paid(project, tranche.installment));
        }
        if tranche.reusable_invoice_url().is_some() {
            return Ok(TrancheClaim::Reuse(project, tranche));
        }

        let abandoned = tranche.pollable_invoice_id().is_some()
            || self.now - tranche.created_at >= self.reservation_timeout();
        if !abandoned {
            return Ok(TrancheClaim::Busy);
        }

        let now = self.now;
        let (project, taken) = self
            .state
            .repo
            .modify(project_id, |p| -> ApiResult<bool> {
                let Some(current) = p.tranche_mut(installment) else {
                    return Ok(false);
                };
                if *current != tranche {
                    return Ok(false);
                }
                *current = PaymentTranche::reserved(installment.clone(), amount, now);
                p.updated_at = now;
                Ok(true)
            })
            .await?;

        Ok(if taken {
            TrancheClaim::Claimed(project)
        } else {
            TrancheClaim::Busy
        })
    }

    /// Drop our bare reservation after the gateway refused to issue an
    /// invoice, so the next attempt is not reported as busy.
    async fn release_claim(&self, project_id: Uuid, installment: &Installment) {
        let claimed_at = self.now;
        let released = self
            .state
            .repo
            .modify(project_id, |p| -> ApiResult<()> {
                p.payments.retain(|t| {
                    !(t.installment == *installment
                        && t.invoice_id.is_none()
                        && !t.is_paid()
                        && t.created_at == claimed_at)
                });
                Ok(())
            })
            .await;

        if let Err(e) = released {
            warn!(
                "Could not release the {} reservation on project {}: {}",
                installment, project_id, e
            );
        }
    }

    fn reservation_timeout(&self) -> Duration {
        let secs = self.state.config.gateway.timeout_secs.saturating_mul(2);
        Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX / 1000))
    }
}

/// Our reference on the gateway: custom id, installment and issue time, so
/// a replacement invoice never reuses an old reference.
fn external_id(project: &Project, installment: &Installment, now: DateTime<Utc>) -> String {
    let unit = match installment {
        Installment::First => String::from("T1-2"),
        Installment::Unit(n) => format!("T{n}"),
        Installment::Other(title) => title.replace(char::is_whitespace, ""),
    };
    format!("{}-{}-{}", project.custom_id, unit, now.timestamp())
}
