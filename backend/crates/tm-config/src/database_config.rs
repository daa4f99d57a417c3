use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DATABASE_FILENAME, DEFAULT_DATABASE_POOL_SIZE,
    DEFAULT_WRITE_RETRY_ATTEMPTS, MAX_DATABASE_POOL_SIZE, MAX_WRITE_RETRY_ATTEMPTS,
};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file, relative to the config directory
    pub path: String,
    pub max_connections: u32,
    /// Re-fetch attempts when an update loses the optimistic version race
    pub write_retry_attempts: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::from(DEFAULT_DATABASE_FILENAME),
            max_connections: DEFAULT_DATABASE_POOL_SIZE,
            write_retry_attempts: DEFAULT_WRITE_RETRY_ATTEMPTS,
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if Path::new(&self.path).is_absolute() || self.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        if self.max_connections == 0 || self.max_connections > MAX_DATABASE_POOL_SIZE {
            return Err(ConfigError::database(format!(
                "database.max_connections must be 1-{}, got {}",
                MAX_DATABASE_POOL_SIZE, self.max_connections
            )));
        }

        if self.write_retry_attempts == 0 || self.write_retry_attempts > MAX_WRITE_RETRY_ATTEMPTS {
            return Err(ConfigError::database(format!(
                "database.write_retry_attempts must be 1-{}, got {}",
                MAX_WRITE_RETRY_ATTEMPTS, self.write_retry_attempts
            )));
        }

        Ok(())
    }
}
