pub mod error;
pub mod extractors;
pub mod payments;
pub mod projects;
