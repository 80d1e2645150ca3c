// crates/ignite-config/tests/common/mod.rs
// =============================================================================
// Module: Config Test Helpers
// Description: Shared helpers for config validation tests.
// Purpose: Reduce duplication across integration tests for ignite-config.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::collections::BTreeMap;

use ignite_config::ConfigError;
use ignite_config::IgniteConfig;

/// Parses a TOML string into an `IgniteConfig` for tests.
pub fn config_from_toml(toml_str: &str) -> Result<IgniteConfig, toml::de::Error> {
    toml::from_str(toml_str)
}

/// Returns a minimal config with all defaults applied.
pub fn minimal_config() -> Result<IgniteConfig, toml::de::Error> {
    config_from_toml("")
}

/// Returns a config with every provisioning field set.
pub fn complete_config() -> Result<IgniteConfig, toml::de::Error> {
    config_from_toml(
        r#"
[project]
name = "WLF Staging"
description = "Payload CMS v3 - Staging Environment"

[repository]
repository = "dokploy-payload-zen"

[database]
service_name = "wlf-mongo"
user = "root"
database = "wlf-cms"

[application]
name = "wlf-cms"
domain = "staging.wlf.com.mx"

[storage]
bucket = "wolf-media"
account_id = "acct-1"
public_endpoint = "https://media.wlf.com.mx"
"#,
    )
}

/// Builds an environment map from pairs.
pub fn env_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(key, value)| ((*key).to_string(), (*value).to_string())).collect()
}

/// Returns an environment carrying every required secret.
pub fn secrets_env() -> BTreeMap<String, String> {
    env_map(&[
        ("IGNITE_DATABASE_PASSWORD", "db-pass"),
        ("IGNITE_PAYLOAD_SECRET", "payload-secret"),
        ("IGNITE_CRON_SECRET", "cron-secret"),
        ("IGNITE_PREVIEW_SECRET", "preview-secret"),
        ("IGNITE_R2_ACCESS_KEY_ID", "r2-key"),
        ("IGNITE_R2_SECRET_ACCESS_KEY", "r2-secret"),
    ])
}

/// Checks that a result failed with a message containing `needle`.
pub fn assert_invalid<T>(result: Result<T, ConfigError>, needle: &str) -> Result<(), String> {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error '{message}' did not contain '{needle}'"))
            }
        }
        Ok(_) => Err("expected invalid config".to_string()),
    }
}
