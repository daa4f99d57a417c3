use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_COUNTRY_CODE, DEFAULT_FEED_CAPACITY,
    MAX_FEED_CAPACITY, MIN_FEED_CAPACITY,
};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    /// Country segment of newly issued custom ids
    pub country_code: String,
    /// Pending change notifications buffered per live subscription
    pub feed_capacity: usize,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            country_code: String::from(DEFAULT_COUNTRY_CODE),
            feed_capacity: DEFAULT_FEED_CAPACITY,
        }
    }
}

impl MarketplaceConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.country_code.len() != 2
            || !self.country_code.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(ConfigError::marketplace(format!(
                "marketplace.country_code must be two upper-case letters, got '{}'",
                self.country_code
            )));
        }

        if self.feed_capacity < MIN_FEED_CAPACITY || self.feed_capacity > MAX_FEED_CAPACITY {
            return Err(ConfigError::marketplace(format!(
                "marketplace.feed_capacity must be {}-{}, got {}",
                MIN_FEED_CAPACITY, MAX_FEED_CAPACITY, self.feed_capacity
            )));
        }

        Ok(())
    }
}
