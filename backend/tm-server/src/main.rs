use tm_config::Config;
use tm_core::SystemClock;
use tm_db::{ProjectFeed, ProjectRepository, open_pool};
use tm_gateway::{GatewayClient, PaymentGateway};
use tm_server::{AppState, DisabledGateway, build_router, logger};

use std::error::Error;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // .env is optional, for development
    let _ = dotenvy::dotenv();

    let config = Config::load()?;
    config.validate()?;

    // Logger before anything else logs
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting tm-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    info!("Opening database: {}", database_path.display());
    let pool = open_pool(&database_path, config.database.max_connections).await?;

    let repo = ProjectRepository::with_feed(
        pool.clone(),
        ProjectFeed::new(config.marketplace.feed_capacity),
    )
    .with_write_retry_attempts(config.database.write_retry_attempts);

    let gateway: Arc<dyn PaymentGateway> = if config.gateway.is_configured() {
        Arc::new(GatewayClient::new(&config.gateway, &config.retry)?)
    } else {
        warn!("Payment gateway not configured - payment endpoints will return 502");
        Arc::new(DisabledGateway)
    };

    let bind_addr = config.bind_addr();
    let state = AppState::new(pool, repo, gateway, Arc::new(SystemClock), config);
    let app = build_router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Graceful shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), shutting down"),
        Err(e) => error!("Failed to listen for SIGINT: {}", e),
    }
}
