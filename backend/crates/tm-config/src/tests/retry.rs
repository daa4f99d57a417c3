use crate::{Config, RetryConfig};
use crate::tests::{EnvGuard, setup_config_dir};

use std::time::Duration;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_max_attempts_zero_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _attempts = EnvGuard::set("TM_RETRY_MAX_ATTEMPTS", "0");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_backoff_multiplier_below_min_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _multiplier = EnvGuard::set("TM_RETRY_BACKOFF_MULTIPLIER", "0.5");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_valid_retry_overrides_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _attempts = EnvGuard::set("TM_RETRY_MAX_ATTEMPTS", "5");
    let _delay = EnvGuard::set("TM_RETRY_INITIAL_DELAY_MS", "50");
    let _jitter = EnvGuard::set("TM_RETRY_JITTER", "false");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.validate(), ok(anything()));
    assert_that!(config.retry.max_attempts, eq(5));
    assert_that!(config.retry.jitter, eq(false));
}

#[test]
fn given_doubling_backoff_when_delay_then_grows_and_caps() {
    let config = RetryConfig {
        max_attempts: 5,
        initial_delay_ms: 100,
        max_delay_secs: 1,
        backoff_multiplier: 2.0,
        jitter: false,
    };

    assert_that!(config.backoff_delay(1), eq(Duration::from_millis(100)));
    assert_that!(config.backoff_delay(2), eq(Duration::from_millis(200)));
    assert_that!(config.backoff_delay(4), eq(Duration::from_millis(800)));
    assert_that!(config.backoff_delay(5), eq(Duration::from_secs(1)));
}
