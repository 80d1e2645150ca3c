//! Config defaults and core validation tests for ignite-config.
// crates/ignite-config/tests/config_defaults.rs
// =============================================================================
// Module: Config Defaults and Core Validation Tests
// Description: Validate default behavior and core config invariants.
// Purpose: Ensure minimal config is valid and critical invariants are enforced.
// =============================================================================

use std::time::Duration;

use ignite_config::ExtraEnvEntry;
use ignite_config::IgniteConfig;
use ignite_config::config_toml_example;
use ignite_core::FetchFailurePolicy;

mod common;

type TestResult = Result<(), String>;

#[test]
fn minimal_config_is_valid_with_defaults() -> TestResult {
    let config = common::minimal_config().map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config.repository.branch != "main" || config.repository.build_file != "/Dockerfile" {
        return Err("unexpected repository defaults".to_string());
    }
    if config.database.image != "mongo:6"
        || config.database.port != 27017
        || config.database.auth_source != "admin"
    {
        return Err("unexpected database defaults".to_string());
    }
    let policy = config.settle_policy();
    if policy.initial_delay != Duration::from_secs(10)
        || policy.poll_interval != Duration::from_secs(5)
        || policy.max_polls != 3
    {
        return Err(format!("unexpected settle defaults: {policy:?}"));
    }
    if config.audit.fetch_failure != FetchFailurePolicy::Fail {
        return Err("fetch failures must fail closed by default".to_string());
    }
    Ok(())
}

#[test]
fn example_config_parses_and_validates() -> TestResult {
    let config = IgniteConfig::parse(&config_toml_example()).map_err(|err| err.to_string())?;
    config.validate().map_err(|err| err.to_string())?;
    if config.project.name != "WLF Staging" || config.application.domain != "staging.wlf.com.mx" {
        return Err("example values not loaded".to_string());
    }
    Ok(())
}

#[test]
fn unknown_fields_are_rejected() -> TestResult {
    match common::config_from_toml("[project]\nname = \"x\"\npassword = \"leak\"\n") {
        Err(_) => Ok(()),
        Ok(_) => Err("unknown field accepted".to_string()),
    }
}

#[test]
fn unknown_sections_are_rejected() -> TestResult {
    match common::config_from_toml("[secrets]\npayload = \"leak\"\n") {
        Err(_) => Ok(()),
        Ok(_) => Err("unknown section accepted".to_string()),
    }
}

#[test]
fn zero_database_port_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.database.port = 0;
    common::assert_invalid(config.validate(), "database.port must be greater than zero")
}

#[test]
fn domain_with_scheme_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.application.domain = "https://staging.wlf.com.mx".to_string();
    common::assert_invalid(config.validate(), "application.domain must be a bare host name")
}

#[test]
fn multi_line_values_rejected() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.project.name = "WLF\nStaging".to_string();
    common::assert_invalid(config.validate(), "project.name must be a single line")
}

#[test]
fn public_endpoint_must_be_http() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.storage.public_endpoint = "ftp://media.wlf.com.mx".to_string();
    common::assert_invalid(config.validate(), "storage.public_endpoint must use http or https")
}

#[test]
fn settle_bounds_enforced() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.settle.max_polls = 101;
    common::assert_invalid(config.validate(), "settle.max_polls must not exceed 100")?;
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.settle.initial_delay_secs = 3_601;
    common::assert_invalid(config.validate(), "settle waits must not exceed 3600 seconds")
}

#[test]
fn control_plane_timeout_bounds_enforced() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.control_plane.timeout_ms = 99;
    common::assert_invalid(config.validate(), "control_plane.timeout_ms must be between")?;
    config.control_plane.timeout_ms = 100;
    config.validate().map_err(|err| err.to_string())?;
    config.control_plane.max_response_bytes = 0;
    common::assert_invalid(config.validate(), "control_plane.max_response_bytes")
}

#[test]
fn extra_env_keys_validated() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.env = vec![ExtraEnvEntry {
        key: "1BAD".to_string(),
        value: "x".to_string(),
    }];
    common::assert_invalid(config.validate(), "invalid env key")?;

    config.env = vec![ExtraEnvEntry {
        key: "DATABASE_URI".to_string(),
        value: "x".to_string(),
    }];
    common::assert_invalid(config.validate(), "env key DATABASE_URI is reserved")?;

    let entry = ExtraEnvEntry {
        key: "SITE_NAME".to_string(),
        value: "WLF".to_string(),
    };
    config.env = vec![entry.clone(), entry];
    common::assert_invalid(config.validate(), "duplicate env key SITE_NAME")
}
