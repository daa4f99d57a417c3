mod create_project_request;
mod payment_plan_dto;
mod requests;
mod status_write_back;
