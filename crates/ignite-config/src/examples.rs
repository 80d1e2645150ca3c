// crates/ignite-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic starting point for `ignite config example`.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The example describes a staging deployment of the CMS. Secrets are never
//! part of the file; the comment block lists the variables that carry them.

/// Returns a canonical example `ignite.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"# Secrets are read from the environment only:
#   IGNITE_DATABASE_PASSWORD, IGNITE_PAYLOAD_SECRET, IGNITE_CRON_SECRET,
#   IGNITE_PREVIEW_SECRET, IGNITE_R2_ACCESS_KEY_ID, IGNITE_R2_SECRET_ACCESS_KEY
# Control plane: DOKPLOY_URL, DOKPLOY_TOKEN
# Content store for audits: DATABASE_URI, PAYLOAD_API_KEY

[project]
name = "WLF Staging"
description = "Payload CMS v3 - Staging Environment"

[repository]
repository = "dokploy-payload-zen"
branch = "main"
build_path = "/"
build_file = "/Dockerfile"

[database]
service_name = "wlf-mongo"
user = "root"
image = "mongo:6"
database = "wlf-cms"
port = 27017
auth_source = "admin"

[application]
name = "wlf-cms"
domain = "staging.wlf.com.mx"

[storage]
bucket = "wolf-media"
account_id = "replace-with-account-id"
public_endpoint = "https://media.wlf.com.mx"

[settle]
initial_delay_secs = 10
poll_interval_secs = 5
max_polls = 3

[control_plane]
timeout_ms = 30000
max_response_bytes = 1048576

[audit]
fetch_failure = "fail"
# Leave `collections` unset to audit the built-in catalog.

[logging]
# event_log = "ignite-events.jsonl"
stderr = false

# [[env]]
# key = "PAYLOAD_PUBLIC_SITE_NAME"
# value = "WLF"
"#,
    )
}
