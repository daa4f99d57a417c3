//! Project status resolution.
//!
//! Rules run in a fixed priority order and the first one that produces a
//! label wins. The final rule always produces one, so resolution is total.
//! Nothing here mutates the project: values the old dashboard used to write
//! back as a side effect (the awarded vendor, the tender deadline) are
//! returned in [`StatusResolution`] for the caller to persist.

use crate::{
    Clock, MAX_PROGRESS, ModerationStatus, Phase, Project, ProjectAction, STATUS_DRAFT,
    StatusLabel,
};

use chrono::{DateTime, Utc};

/// Hours before the deadline during which a tender stops taking new bids.
pub const LOCK_WINDOW_HOURS: f64 = 24.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusResolution {
    pub label: StatusLabel,
    pub phase: Phase,
    pub action: ProjectAction,
    /// Vendor of the accepted proposal when `selected_vendor_id` is not yet set.
    pub derived_selected_vendor_id: Option<String>,
    /// Deadline used for the tender rules, if the project has one.
    pub tender_deadline: Option<DateTime<Utc>>,
}

impl StatusResolution {
    /// True when the caller has derived fields to write back.
    pub fn has_write_back(&self, project: &Project) -> bool {
        self.derived_selected_vendor_id.is_some()
            || (project.is_tender()
                && project.tender_deadline.is_none()
                && self.tender_deadline.is_some())
    }
}

struct StatusContext<'a> {
    project: &'a Project,
    deadline: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
}

type Rule = fn(&StatusContext<'_>) -> Option<StatusLabel>;

const PRIORITY: [Rule; 6] = [
    draft_rule,
    review_rule,
    revision_rule,
    approved_direct_rule,
    tender_rule,
    fallback_rule,
];

pub fn resolve_status(project: &Project, clock: &dyn Clock) -> StatusResolution {
    resolve_status_at(project, clock.now())
}

pub fn resolve_status_at(project: &Project, now: DateTime<Utc>) -> StatusResolution {
    let ctx = StatusContext {
        project,
        deadline: project.tender_deadline(),
        now,
    };

    let label = PRIORITY
        .iter()
        .find_map(|rule| rule(&ctx))
        .unwrap_or(StatusLabel::InProgress);

    let derived_selected_vendor_id = match project.selected_vendor_id {
        Some(_) => None,
        None => project.accepted_proposal().map(|p| p.vendor_id.clone()),
    };

    StatusResolution {
        phase: label.phase(),
        action: label.action(),
        label,
        derived_selected_vendor_id,
        tender_deadline: if project.is_tender() { ctx.deadline } else { None },
    }
}

/// Signed hours from `now` until `deadline`.
pub fn hours_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (deadline - now).num_seconds() as f64 / 3600.0
}

fn draft_rule(ctx: &StatusContext<'_>) -> Option<StatusLabel> {
    let p = ctx.project;
    (p.status.as_deref() == Some(STATUS_DRAFT)
        || p.moderation_status == Some(ModerationStatus::Draft))
    .then_some(StatusLabel::InProgress)
}

fn review_rule(ctx: &StatusContext<'_>) -> Option<StatusLabel> {
    let p = ctx.project;
    let raw_review = p.status.as_deref().is_some_and(|s| {
        let s = s.to_lowercase();
        s.contains("review") || s == "pending"
    });
    (p.moderation_status == Some(ModerationStatus::Pending) || raw_review)
        .then_some(StatusLabel::UnderReview)
}

fn revision_rule(ctx: &StatusContext<'_>) -> Option<StatusLabel> {
    matches!(
        ctx.project.moderation_status,
        Some(ModerationStatus::Rejected | ModerationStatus::RevisionRequired)
    )
    .then_some(StatusLabel::RevisionRequired)
}

fn approved_direct_rule(ctx: &StatusContext<'_>) -> Option<StatusLabel> {
    let p = ctx.project;
    (p.moderation_status == Some(ModerationStatus::Approved) && !p.is_tender())
        .then_some(StatusLabel::Approved)
}

fn tender_rule(ctx: &StatusContext<'_>) -> Option<StatusLabel> {
    let p = ctx.project;
    if p.moderation_status != Some(ModerationStatus::Approved) || !p.is_tender() {
        return None;
    }

    if p.has_awarded_vendor() {
        let label = if !p.first_payment_flagged() {
            StatusLabel::AwardedPendingPayment
        } else if p.progress >= MAX_PROGRESS {
            StatusLabel::Completed
        } else {
            StatusLabel::Ongoing
        };
        return Some(label);
    }

    if p.has_negotiation_signal() && !p.negotiation_accepted {
        return Some(StatusLabel::Negotiation);
    }

    let label = match ctx.deadline.map(|d| hours_until(d, ctx.now)) {
        Some(hours) if hours <= 0.0 => StatusLabel::Failed,
        Some(hours) if hours <= LOCK_WINDOW_HOURS => StatusLabel::Locked,
        _ => StatusLabel::Open,
    };
    Some(label)
}

fn fallback_rule(ctx: &StatusContext<'_>) -> Option<StatusLabel> {
    Some(
        ctx.project
            .status
            .as_deref()
            .map(StatusLabel::from_raw)
            .unwrap_or(StatusLabel::InProgress),
    )
}
