use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_port_below_1024_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _port = EnvGuard::set("TM_SERVER_PORT", "80");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_port_zero_when_validate_then_ok() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _port = EnvGuard::set("TM_SERVER_PORT", "0");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, ok(anything()));
}

#[test]
#[serial]
fn given_zero_request_timeout_when_validate_then_error() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _timeout = EnvGuard::set("TM_SERVER_REQUEST_TIMEOUT_SECS", "0");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_host_and_port_when_bind_addr_then_joined() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _host = EnvGuard::set("TM_SERVER_HOST", "0.0.0.0");
    let _port = EnvGuard::set("TM_SERVER_PORT", "7777");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.bind_addr().as_str(), eq("0.0.0.0:7777"));
}
