mod error;
mod extractors;
mod projects;
