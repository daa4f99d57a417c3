//! Project REST API handlers

use crate::{
    ApiError, ApiResult, AppState, CreateProjectRequest, ModerationRequest, ProgressRequest,
    ProjectDto, ProjectListResponse, ProjectResponse, SubmitProposalRequest, UserId,
    is_owner_decision, persist_derived_fields,
};

use tm_core::{BidAmount, CustomId, Project, Proposal};

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use log::info;
use uuid::Uuid;

// =============================================================================
// Lookup
// =============================================================================

/// Projects are addressed by UUID or by custom id (`DES-ID-2507-0001`).
pub async fn load_project(state: &AppState, id: &str) -> ApiResult<Project> {
    let found = match Uuid::parse_str(id) {
        Ok(uuid) => state.repo.find_by_id(uuid).await?,
        Err(_) => state.repo.find_by_custom_id(id).await?,
    };

    found.ok_or_else(|| ApiError::not_found(format!("Project {} not found", id)))
}

async fn project_id(state: &AppState, id: &str) -> ApiResult<Uuid> {
    match Uuid::parse_str(id) {
        Ok(uuid) => Ok(uuid),
        Err(_) => Ok(load_project(state, id).await?.id),
    }
}

fn respond(project: Project, state: &AppState) -> Json<ProjectResponse> {
    Json(ProjectResponse {
        project: ProjectDto::from_project(project, state.clock.now()),
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /api/v1/projects
///
/// The caller's projects, newest first.
pub async fn list_projects(
    State(state): State<AppState>,
    UserId(owner_id): UserId,
) -> ApiResult<Json<ProjectListResponse>> {
    let now = state.clock.now();
    let projects = state.repo.list_by_owner(&owner_id).await?;

    let mut dtos = Vec::with_capacity(projects.len());
    for project in projects {
        let project = persist_derived_fields(&state, project, now).await?;
        dtos.push(ProjectDto::from_project(project, now));
    }

    Ok(Json(ProjectListResponse { projects: dtos }))
}

/// POST /api/v1/projects
pub async fn create_project(
    State(state): State<AppState>,
    UserId(owner_id): UserId,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let method = req.validate()?;
    let now = state.clock.now();
    let country = &state.config.marketplace.country_code;

    // Reject unusable types before a counter value is spent on them
    CustomId::prefix_for(&req.project_type, country, now)?;
    let custom_id = state
        .repo
        .next_custom_id(&req.project_type, country, now)
        .await?;

    let mut project = Project::new(
        owner_id,
        req.title.trim().to_string(),
        req.project_type.trim().to_string(),
        method,
        custom_id,
        now,
    );
    project.tender_duration = req
        .tender_duration
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    project.project_phases = req.project_phases;
    if req.submit_for_review {
        project.submit_for_review(now);
    }

    state.repo.create(&project).await?;
    info!(
        "Project {} created by {} ({})",
        project.custom_id, project.owner_id, method
    );

    Ok((StatusCode::CREATED, respond(project, &state)))
}

/// GET /api/v1/projects/{id}
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectResponse>> {
    let now = state.clock.now();
    let project = load_project(&state, &id).await?;
    let project = persist_derived_fields(&state, project, now).await?;

    Ok(Json(ProjectResponse {
        project: ProjectDto::from_project(project, now),
    }))
}

/// PUT /api/v1/projects/{id}/moderation
pub async fn moderate_project(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<ModerationRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let decision = req.decision()?;
    let project_id = project_id(&state, &id).await?;
    let now = state.clock.now();

    let (project, _) = state
        .repo
        .modify(project_id, |p| -> ApiResult<()> {
            let is_owner = p.owner_id == user_id;
            if is_owner != is_owner_decision(decision) {
                return Err(ApiError::forbidden(if is_owner {
                    format!("Owners cannot set moderation status {}", decision)
                } else {
                    format!("Only the owner can move the project to {}", decision)
                }));
            }
            p.moderate(decision, now);
            Ok(())
        })
        .await?;

    info!(
        "Project {} moderation set to {} by {}",
        project.custom_id, decision, user_id
    );
    Ok(respond(project, &state))
}

/// POST /api/v1/projects/{id}/proposals
///
/// The caller bids as a vendor. A second bid from the same vendor replaces
/// the first as a resubmission.
pub async fn submit_proposal(
    State(state): State<AppState>,
    UserId(vendor_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<SubmitProposalRequest>,
) -> ApiResult<(StatusCode, Json<ProjectResponse>)> {
    let amount = req.bid_amount()?;
    let project_id = project_id(&state, &id).await?;
    let now = state.clock.now();

    let (project, _) = state
        .repo
        .modify(project_id, |p| -> ApiResult<()> {
            if p.owner_id == vendor_id {
                return Err(ApiError::forbidden("Owners cannot bid on their own project"));
            }
            let mut proposal = Proposal::new(vendor_id.clone(), BidAmount::Fixed(amount), now);
            proposal.vendor_name = req.vendor_name.clone();
            p.submit_proposal(proposal, now)?;
            Ok(())
        })
        .await?;

    info!(
        "Vendor {} bid {} on project {}",
        vendor_id, amount, project.custom_id
    );
    Ok((StatusCode::CREATED, respond(project, &state)))
}

/// POST /api/v1/projects/{id}/proposals/{vendor_id}/accept
pub async fn accept_proposal(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path((id, vendor_id)): Path<(String, String)>,
) -> ApiResult<Json<ProjectResponse>> {
    let project_id = project_id(&state, &id).await?;
    let now = state.clock.now();

    let (project, _) = state
        .repo
        .modify(project_id, |p| -> ApiResult<()> {
            if p.owner_id != user_id {
                return Err(ApiError::forbidden("Only the owner can accept a proposal"));
            }
            p.accept_proposal(&vendor_id, now)?;
            Ok(())
        })
        .await?;

    info!("Project {} awarded to {}", project.custom_id, vendor_id);
    Ok(respond(project, &state))
}

/// PUT /api/v1/projects/{id}/progress
///
/// Reported by the owner or the awarded vendor.
pub async fn update_progress(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(id): Path<String>,
    Json(req): Json<ProgressRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let progress = req.percent()?;
    let project_id = project_id(&state, &id).await?;
    let now = state.clock.now();

    let (project, _) = state
        .repo
        .modify(project_id, |p| -> ApiResult<()> {
            let awarded = p.selected_vendor_id.as_deref() == Some(user_id.as_str());
            if p.owner_id != user_id && !awarded {
                return Err(ApiError::forbidden(
                    "Only the owner or the awarded vendor can report progress",
                ));
            }
            p.update_progress(progress, now)?;
            Ok(())
        })
        .await?;

    Ok(respond(project, &state))
}
