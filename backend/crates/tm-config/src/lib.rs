mod config;
mod database_config;
mod error;
mod gateway_config;
mod log_level;
mod logging_config;
mod marketplace_config;
mod retry_config;
mod server_config;

#[cfg(test)]
mod tests;

pub use config::{CONFIG_DIR_ENV, Config};
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use gateway_config::GatewayConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use marketplace_config::MarketplaceConfig;
pub use retry_config::RetryConfig;
pub use server_config::ServerConfig;

const DEFAULT_CONFIG_DIR_NAME: &str = ".tm";
const CONFIG_FILE_NAME: &str = "config.toml";

// Server
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;
const DEFAULT_MAX_CONNECTIONS: usize = 1000;
const MIN_MAX_CONNECTIONS: usize = 1;
const MAX_MAX_CONNECTIONS: usize = 100_000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
const DEFAULT_SSE_KEEP_ALIVE_SECS: u64 = 15;

// Database
const DEFAULT_DATABASE_FILENAME: &str = "marketplace.db";
const DEFAULT_DATABASE_POOL_SIZE: u32 = 5;
const MAX_DATABASE_POOL_SIZE: u32 = 64;
const DEFAULT_WRITE_RETRY_ATTEMPTS: u32 = 3;
const MAX_WRITE_RETRY_ATTEMPTS: u32 = 10;

// Gateway
const DEFAULT_GATEWAY_BASE_URL: &str = "https://api.xendit.co";
const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 15;
const MAX_GATEWAY_TIMEOUT_SECS: u64 = 120;
const DEFAULT_INVOICE_DURATION_SECS: u64 = 86_400;
const DEFAULT_CURRENCY: &str = "IDR";

// Marketplace
const DEFAULT_COUNTRY_CODE: &str = "ID";
const DEFAULT_FEED_CAPACITY: usize = 256;
const MIN_FEED_CAPACITY: usize = 16;
const MAX_FEED_CAPACITY: usize = 65_536;

// Logging
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_COLORED: bool = true;
