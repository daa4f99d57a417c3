pub mod amount_probe;
pub mod project_document;
