use crate::{Config, GatewayConfig};
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};
use serial_test::serial;

#[test]
fn given_default_gateway_when_validate_then_ok() {
    assert_that!(GatewayConfig::default().validate(), ok(anything()));
}

#[test]
fn given_non_http_base_url_when_validate_then_error() {
    let config = GatewayConfig {
        base_url: String::from("ftp://gateway"),
        ..GatewayConfig::default()
    };

    assert_that!(config.validate(), err(anything()));
}

#[test]
fn given_lowercase_currency_when_validate_then_error() {
    let config = GatewayConfig {
        currency: String::from("idr"),
        ..GatewayConfig::default()
    };

    assert_that!(config.validate(), err(anything()));
}

#[test]
#[serial]
fn given_blank_callback_token_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _token = EnvGuard::set("TM_GATEWAY_CALLBACK_TOKEN", "  ");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_timeout_over_max_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _timeout = EnvGuard::set("TM_GATEWAY_TIMEOUT_SECS", "600");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}
