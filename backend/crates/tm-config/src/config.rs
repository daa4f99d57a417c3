use crate::{
    CONFIG_FILE_NAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR_NAME, DatabaseConfig,
    GatewayConfig, LoggingConfig, MarketplaceConfig, RetryConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

/// Overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "TM_CONFIG_DIR";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub gateway: GatewayConfig,
    pub retry: RetryConfig,
    pub logging: LoggingConfig,
    pub marketplace: MarketplaceConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// 1. `TM_CONFIG_DIR`, else `./.tm/`
    /// 2. Create the directory if missing
    /// 3. Read `config.toml` if present, else defaults
    /// 4. Apply `TM_*` environment overrides
    ///
    /// Does not validate; call [`Config::validate`] afterwards.
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// `TM_CONFIG_DIR` > `./.tm/`
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.gateway.validate()?;
        self.retry.validate()?;
        self.marketplace.validate()?;

        if let Some(file) = &self.logging.file
            && (Path::new(file).is_absolute() || file.contains(".."))
        {
            return Err(ConfigError::config(
                "logging.file must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(file) => Ok(Some(Self::config_dir()?.join(file))),
            None => Ok(None),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log the effective configuration. Secrets are reported as set/unset.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (max {} connections, timeout {}s)",
            self.server.host,
            self.server.port,
            self.server.max_connections,
            self.server.request_timeout_secs
        );
        info!(
            "  database: {} (pool {}, write retries {})",
            self.database.path, self.database.max_connections, self.database.write_retry_attempts
        );
        info!(
            "  gateway: {} (secret key {}, callback token {}, timeout {}s, {})",
            self.gateway.base_url,
            if self.gateway.secret_key.is_some() { "set" } else { "unset" },
            if self.gateway.callback_token.is_some() { "set" } else { "unset" },
            self.gateway.timeout_secs,
            self.gateway.currency
        );
        info!(
            "  retry: attempts={}, initial={}ms, max={}s, backoff={}x, jitter={}",
            self.retry.max_attempts,
            self.retry.initial_delay_ms,
            self.retry.max_delay_secs,
            self.retry.backoff_multiplier,
            self.retry.jitter
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  marketplace: country={}, feed capacity={}",
            self.marketplace.country_code, self.marketplace.feed_capacity
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("TM_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("TM_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "TM_SERVER_MAX_CONNECTIONS",
            &mut self.server.max_connections,
        );
        Self::apply_env_parse(
            "TM_SERVER_REQUEST_TIMEOUT_SECS",
            &mut self.server.request_timeout_secs,
        );
        Self::apply_env_parse(
            "TM_SERVER_SSE_KEEP_ALIVE_SECS",
            &mut self.server.sse_keep_alive_secs,
        );

        // Database
        Self::apply_env_string("TM_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "TM_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );
        Self::apply_env_parse(
            "TM_DATABASE_WRITE_RETRY_ATTEMPTS",
            &mut self.database.write_retry_attempts,
        );

        // Gateway
        Self::apply_env_string("TM_GATEWAY_BASE_URL", &mut self.gateway.base_url);
        Self::apply_env_option_string("TM_GATEWAY_SECRET_KEY", &mut self.gateway.secret_key);
        Self::apply_env_option_string(
            "TM_GATEWAY_CALLBACK_TOKEN",
            &mut self.gateway.callback_token,
        );
        Self::apply_env_parse("TM_GATEWAY_TIMEOUT_SECS", &mut self.gateway.timeout_secs);
        Self::apply_env_parse(
            "TM_GATEWAY_INVOICE_DURATION_SECS",
            &mut self.gateway.invoice_duration_secs,
        );
        Self::apply_env_string("TM_GATEWAY_CURRENCY", &mut self.gateway.currency);
        Self::apply_env_option_string(
            "TM_GATEWAY_SUCCESS_REDIRECT_URL",
            &mut self.gateway.success_redirect_url,
        );
        Self::apply_env_option_string(
            "TM_GATEWAY_FAILURE_REDIRECT_URL",
            &mut self.gateway.failure_redirect_url,
        );

        // Retry
        Self::apply_env_parse("TM_RETRY_MAX_ATTEMPTS", &mut self.retry.max_attempts);
        Self::apply_env_parse(
            "TM_RETRY_INITIAL_DELAY_MS",
            &mut self.retry.initial_delay_ms,
        );
        Self::apply_env_parse("TM_RETRY_MAX_DELAY_SECS", &mut self.retry.max_delay_secs);
        Self::apply_env_parse(
            "TM_RETRY_BACKOFF_MULTIPLIER",
            &mut self.retry.backoff_multiplier,
        );
        Self::apply_env_bool("TM_RETRY_JITTER", &mut self.retry.jitter);

        // Logging
        Self::apply_env_parse("TM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("TM_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("TM_LOG_FILE", &mut self.logging.file);

        // Marketplace
        Self::apply_env_string(
            "TM_MARKETPLACE_COUNTRY_CODE",
            &mut self.marketplace.country_code,
        );
        Self::apply_env_parse(
            "TM_MARKETPLACE_FEED_CAPACITY",
            &mut self.marketplace.feed_capacity,
        );
    }

    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Accepts "true" / "1"; anything else is false.
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Unparseable values are ignored.
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
