pub mod connection;
pub mod error;
pub mod feed;
pub mod repositories;

pub use connection::database::{open_pool, run_migrations};
pub use error::{DbError, Result};
pub use feed::owner_subscription::OwnerSubscription;
pub use feed::project_feed::{DEFAULT_FEED_CAPACITY, ProjectChange, ProjectFeed};
pub use repositories::project_repository::{
    DEFAULT_WRITE_RETRY_ATTEMPTS, ProjectRepository, TrancheReservation,
};
