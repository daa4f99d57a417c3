use crate::{NextPaymentDto, PaymentPlanDto};

use tm_core::{
    PaymentTranche, Phase, Project, ProjectAction, Proposal, StatusResolution, compute_next_payment,
    hours_until, payment_plan, resolve_status_at,
};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Project as the dashboards see it: stored fields plus the resolved status
/// and the next payment step.
#[derive(Debug, Serialize)]
pub struct ProjectDto {
    pub id: String,
    pub custom_id: String,
    pub owner_id: String,
    pub title: String,
    pub project_type: String,
    /// Raw lifecycle flag as stored
    pub raw_status: Option<String>,
    pub moderation_status: Option<String>,
    pub procurement_method: Option<String>,
    pub tender_duration: Option<String>,
    pub tender_deadline: Option<i64>,
    pub hours_to_deadline: Option<f64>,
    pub selected_vendor_id: Option<String>,
    pub project_phases: u32,
    pub progress: u8,
    pub first_payment_completed: bool,
    pub proposals: Vec<ProposalDto>,
    pub payments: Vec<PaymentDto>,
    pub status: StatusDto,
    pub payment_plan: Option<PaymentPlanDto>,
    pub next_payment: Option<NextPaymentDto>,
    pub version: i32,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Serialize)]
pub struct StatusDto {
    pub code: &'static str,
    pub label: String,
    pub phase: Phase,
    pub action: ProjectAction,
}

#[derive(Debug, Serialize)]
pub struct ProposalDto {
    pub vendor_id: String,
    pub vendor_name: Option<String>,
    pub status: String,
    pub negotiation_status: Option<String>,
    pub bid_amount: Option<i64>,
    pub submitted_at: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PaymentDto {
    pub title: String,
    pub installment_number: Option<u32>,
    pub payment_type: String,
    pub status: String,
    pub invoice_id: Option<String>,
    pub invoice_url: Option<String>,
    pub amount: i64,
    pub created_at: i64,
    pub paid_at: Option<i64>,
}

impl ProjectDto {
    /// Resolve status and payment state at `now`. Payment fields are empty
    /// until a proposal with a usable bid is accepted.
    pub fn from_project(project: Project, now: DateTime<Utc>) -> Self {
        let resolution = resolve_status_at(&project, now);
        let plan = payment_plan(&project).ok();
        let next_payment = plan
            .and_then(|_| compute_next_payment(&project).ok())
            .map(NextPaymentDto::from);

        Self::assemble(project, resolution, plan.map(PaymentPlanDto::from), next_payment, now)
    }

    fn assemble(
        project: Project,
        resolution: StatusResolution,
        payment_plan: Option<PaymentPlanDto>,
        next_payment: Option<NextPaymentDto>,
        now: DateTime<Utc>,
    ) -> Self {
        let project_phases = project.phases();
        let first_payment_completed = project.first_payment_flagged();
        let selected_vendor_id = project
            .selected_vendor_id
            .or(resolution.derived_selected_vendor_id);

        Self {
            id: project.id.to_string(),
            custom_id: project.custom_id.to_string(),
            owner_id: project.owner_id,
            title: project.title,
            project_type: project.project_type,
            raw_status: project.status,
            moderation_status: project.moderation_status.map(|m| m.as_str().to_string()),
            procurement_method: project.procurement_method.map(|m| m.as_str().to_string()),
            tender_duration: project.tender_duration,
            tender_deadline: resolution.tender_deadline.map(|d| d.timestamp()),
            hours_to_deadline: resolution.tender_deadline.map(|d| hours_until(d, now)),
            selected_vendor_id,
            project_phases,
            progress: project.progress,
            first_payment_completed,
            proposals: project.proposals.iter().map(ProposalDto::from).collect(),
            payments: project.payments.iter().map(PaymentDto::from).collect(),
            status: StatusDto {
                code: resolution.label.code(),
                label: resolution.label.display().to_string(),
                phase: resolution.phase,
                action: resolution.action,
            },
            payment_plan,
            next_payment,
            version: project.version,
            created_at: project.created_at.timestamp(),
            updated_at: project.updated_at.timestamp(),
        }
    }
}

impl From<&Proposal> for ProposalDto {
    fn from(p: &Proposal) -> Self {
        Self {
            vendor_id: p.vendor_id.clone(),
            vendor_name: p.vendor_name.clone(),
            status: p.status.as_str().to_string(),
            negotiation_status: p.negotiation.as_ref().map(|n| n.status.as_str().to_string()),
            bid_amount: p.bid_amount.value(),
            submitted_at: p.submitted_at.map(|t| t.timestamp()),
        }
    }
}

impl From<&PaymentTranche> for PaymentDto {
    fn from(t: &PaymentTranche) -> Self {
        Self {
            title: t.installment.title(),
            installment_number: t.installment.number(),
            payment_type: t.payment_type.clone(),
            status: t.status.as_str().to_string(),
            invoice_id: t.invoice_id.clone(),
            invoice_url: t.invoice_url.clone(),
            amount: t.amount,
            created_at: t.created_at.timestamp(),
            paid_at: t.paid_at.map(|t| t.timestamp()),
        }
    }
}
