pub mod phase;
pub mod project_action;
pub mod resolver;
pub mod status_label;
