use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] tm_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] tm_db::DbError),

    #[error("Payment gateway error: {0}")]
    Gateway(#[from] tm_gateway::GatewayError),

    #[error("Logger error: {message}")]
    Logger { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
