//! Persisting what status resolution derives.
//!
//! Resolution itself never mutates a project. Two of its outputs are facts
//! worth keeping: the vendor of an accepted proposal when
//! `selected_vendor_id` was never set, and the tender deadline, which is
//! frozen the first time it is computed so a later edit of the duration
//! does not move it.

use crate::{ApiResult, AppState};

use tm_core::{Project, resolve_status_at};

use chrono::{DateTime, Utc};
use log::debug;

/// Copy derived fields onto `project`. Returns true if anything changed.
pub fn apply_derived_fields(project: &mut Project, now: DateTime<Utc>) -> bool {
    let resolution = resolve_status_at(project, now);
    if !resolution.has_write_back(project) {
        return false;
    }

    if let Some(vendor_id) = resolution.derived_selected_vendor_id {
        project.selected_vendor_id = Some(vendor_id);
    }
    if project.is_tender() && project.tender_deadline.is_none() {
        project.tender_deadline = resolution.tender_deadline;
    }
    true
}

/// Write derived fields back if the stored record lacks them.
pub async fn persist_derived_fields(
    state: &AppState,
    project: Project,
    now: DateTime<Utc>,
) -> ApiResult<Project> {
    let mut probe = project.clone();
    if !apply_derived_fields(&mut probe, now) {
        return Ok(project);
    }

    let (stored, _) = state
        .repo
        .modify(project.id, |p| -> ApiResult<bool> {
            Ok(apply_derived_fields(p, now))
        })
        .await?;

    debug!(
        "Persisted derived fields for {} (vendor {:?}, deadline {:?})",
        stored.custom_id, stored.selected_vendor_id, stored.tender_deadline
    );
    Ok(stored)
}
