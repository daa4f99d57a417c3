pub mod create_project_request;
pub mod moderation_request;
pub mod payment_plan_dto;
pub mod progress_request;
pub mod project_dto;
pub mod project_list_response;
pub mod project_response;
pub mod project_stream;
pub mod projects;
pub mod status_write_back;
pub mod submit_proposal_request;
