use tm_config::Config;
use tm_core::Clock;
use tm_db::ProjectRepository;
use tm_gateway::PaymentGateway;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub repo: ProjectRepository,
    pub gateway: Arc<dyn PaymentGateway>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        pool: SqlitePool,
        repo: ProjectRepository,
        gateway: Arc<dyn PaymentGateway>,
        clock: Arc<dyn Clock>,
        config: Config,
    ) -> Self {
        Self {
            pool,
            repo,
            gateway,
            clock,
            config: Arc::new(config),
        }
    }
}
