// crates/ignite-config/src/env.rs
// ============================================================================
// Module: Environment Inputs
// Description: Environment variable names, overrides, and secret resolution.
// Purpose: Keep every secret out of the config file and read it from the environment.
// Dependencies: ignite-core, url
// ============================================================================

//! ## Overview
//! Ignite reads three kinds of environment input:
//! - `IGNITE_*` overrides for non-secret config values,
//! - `IGNITE_*` secrets required to build a provisioning configuration,
//! - the control-plane (`DOKPLOY_URL`, `DOKPLOY_TOKEN`) and content-store
//!   (`DATABASE_URI`, `PAYLOAD_API_KEY`) credentials.
//!
//! Lookups go through [`EnvSource`] so tests never touch the process
//! environment. Blank values count as unset.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use ignite_core::SecretString;
use url::Url;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Variable Names
// ============================================================================

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "IGNITE_CONFIG";
/// Control-plane base URL.
pub const DOKPLOY_URL_ENV: &str = "DOKPLOY_URL";
/// Control-plane API token.
pub const DOKPLOY_TOKEN_ENV: &str = "DOKPLOY_TOKEN";
/// Content-store URI read by the auditor.
pub const DATABASE_URI_ENV: &str = "DATABASE_URI";
/// API key for REST content stores.
pub const PAYLOAD_API_KEY_ENV: &str = "PAYLOAD_API_KEY";

/// Database superuser password.
pub const SECRET_DATABASE_PASSWORD: &str = "IGNITE_DATABASE_PASSWORD";
/// CMS signing secret.
pub const SECRET_PAYLOAD: &str = "IGNITE_PAYLOAD_SECRET";
/// Scheduled job secret.
pub const SECRET_CRON: &str = "IGNITE_CRON_SECRET";
/// Draft preview secret.
pub const SECRET_PREVIEW: &str = "IGNITE_PREVIEW_SECRET";
/// Object storage access key identifier.
pub const SECRET_R2_ACCESS_KEY_ID: &str = "IGNITE_R2_ACCESS_KEY_ID";
/// Object storage secret access key.
pub const SECRET_R2_SECRET_ACCESS_KEY: &str = "IGNITE_R2_SECRET_ACCESS_KEY";

/// Secrets required to build a provisioning configuration.
pub const REQUIRED_SECRETS: [&str; 6] = [
    SECRET_DATABASE_PASSWORD,
    SECRET_PAYLOAD,
    SECRET_CRON,
    SECRET_PREVIEW,
    SECRET_R2_ACCESS_KEY_ID,
    SECRET_R2_SECRET_ACCESS_KEY,
];

/// Config value replaced by an override variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Override {
    /// `project.name`.
    ProjectName,
    /// `repository.repository`.
    Repository,
    /// `repository.branch`.
    Branch,
    /// `application.domain`.
    Domain,
    /// `application.name`.
    ApplicationName,
    /// `database.database`.
    DatabaseName,
}

/// Override variables in application order.
pub const OVERRIDES: [(&str, Override); 6] = [
    ("IGNITE_PROJECT_NAME", Override::ProjectName),
    ("IGNITE_REPOSITORY", Override::Repository),
    ("IGNITE_BRANCH", Override::Branch),
    ("IGNITE_DOMAIN", Override::Domain),
    ("IGNITE_APP_NAME", Override::ApplicationName),
    ("IGNITE_DATABASE_NAME", Override::DatabaseName),
];

// ============================================================================
// SECTION: Sources
// ============================================================================

/// Read access to environment variables.
pub trait EnvSource {
    /// Returns the value of `key`, if set.
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Returns a trimmed, non-blank value.
fn non_blank(env: &dyn EnvSource, key: &str) -> Option<String> {
    env.var(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

/// Reads a required secret.
///
/// # Errors
///
/// Returns [`ConfigError::MissingEnv`] when `key` is unset or blank.
pub fn require_secret(env: &dyn EnvSource, key: &str) -> Result<SecretString, ConfigError> {
    non_blank(env, key)
        .map(SecretString::new)
        .ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}

// ============================================================================
// SECTION: Credentials
// ============================================================================

/// Control-plane endpoint and token.
#[derive(Clone)]
pub struct ControlPlaneCredentials {
    /// Control-plane base URL.
    pub url: Url,
    /// API token.
    pub token: SecretString,
}

impl fmt::Debug for ControlPlaneCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlPlaneCredentials")
            .field("url", &self.url.as_str())
            .field("token", &self.token)
            .finish()
    }
}

impl ControlPlaneCredentials {
    /// Reads the control-plane credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when a variable is unset and
    /// [`ConfigError::Invalid`] when the URL is not http(s).
    pub fn from_env(env: &dyn EnvSource) -> Result<Self, ConfigError> {
        let raw = non_blank(env, DOKPLOY_URL_ENV)
            .ok_or_else(|| ConfigError::MissingEnv(DOKPLOY_URL_ENV.to_string()))?;
        let url = Url::parse(&raw)
            .map_err(|err| ConfigError::Invalid(format!("{DOKPLOY_URL_ENV} is not a url: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!("{DOKPLOY_URL_ENV} must use http or https")));
        }
        Ok(Self {
            url,
            token: require_secret(env, DOKPLOY_TOKEN_ENV)?,
        })
    }
}

/// Content-store location and optional API key.
#[derive(Debug, Clone)]
pub struct ContentStoreCredentials {
    /// Content-store URI; may embed credentials.
    pub uri: SecretString,
    /// API key for REST stores.
    pub api_key: Option<SecretString>,
}

impl ContentStoreCredentials {
    /// Reads the content-store credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when `DATABASE_URI` is unset.
    pub fn from_env(env: &dyn EnvSource) -> Result<Self, ConfigError> {
        Ok(Self {
            uri: require_secret(env, DATABASE_URI_ENV)?,
            api_key: non_blank(env, PAYLOAD_API_KEY_ENV).map(SecretString::new),
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
