pub mod api;
pub mod disabled_gateway;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    error::ApiError,
    error::Result as ApiResult,
    extractors::user_id::{USER_ID_HEADER, UserId},
    payments::{
        callback::payment_callback,
        callback_response::CallbackResponse,
        next_payment_request::NextPaymentRequest,
        next_payment_response::NextPaymentResponse,
        payment_flow::{PaymentFlow, PaymentOutcome},
        payments::next_payment,
    },
    projects::{
        create_project_request::CreateProjectRequest,
        moderation_request::{ModerationRequest, is_owner_decision},
        payment_plan_dto::{NextPaymentDto, PaymentPlanDto},
        progress_request::ProgressRequest,
        project_dto::{PaymentDto, ProjectDto, ProposalDto, StatusDto},
        project_list_response::ProjectListResponse,
        project_response::ProjectResponse,
        project_stream::{PROJECTS_EVENT, stream_projects},
        projects::{
            accept_proposal, create_project, get_project, list_projects, load_project,
            moderate_project, submit_proposal, update_progress,
        },
        status_write_back::{apply_derived_fields, persist_derived_fields},
        submit_proposal_request::SubmitProposalRequest,
    },
};
pub use disabled_gateway::DisabledGateway;
pub use error::{Result as ServerResult, ServerError};
pub use state::AppState;

pub use crate::routes::build_router;
