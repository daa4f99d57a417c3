pub mod owner_subscription;
pub mod project_feed;
