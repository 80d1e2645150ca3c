// crates/ignite-config/src/config.rs
// ============================================================================
// Module: Ignite Configuration
// Description: Configuration loading and validation for Ignite.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: ignite-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits,
//! then a fixed set of `IGNITE_*` environment variables override individual
//! values. Secrets never live in the file: they are read from the environment
//! only when a provisioning configuration is built.
//! Security posture: config inputs are untrusted and fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use ignite_core::ApplicationSecrets;
use ignite_core::ApplicationSettings;
use ignite_core::DatabaseSettings;
use ignite_core::EnvironmentEntry;
use ignite_core::FetchFailurePolicy;
use ignite_core::FieldSchema;
use ignite_core::ProjectSettings;
use ignite_core::ProvisioningConfig;
use ignite_core::RepositorySettings;
use ignite_core::STANDARD_ENV_KEYS;
use ignite_core::SettlePolicy;
use ignite_core::StorageSettings;
use ignite_core::default_schemas;
use ignite_core::is_valid_env_key;
use serde::Deserialize;
use thiserror::Error;

use crate::env::CONFIG_ENV_VAR;
use crate::env::EnvSource;
use crate::env::OVERRIDES;
use crate::env::Override;
use crate::env::ProcessEnv;
use crate::env::SECRET_CRON;
use crate::env::SECRET_DATABASE_PASSWORD;
use crate::env::SECRET_PAYLOAD;
use crate::env::SECRET_PREVIEW;
use crate::env::SECRET_R2_ACCESS_KEY_ID;
use crate::env::SECRET_R2_SECRET_ACCESS_KEY;
use crate::env::require_secret;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "ignite.toml";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of a name or label value.
const MAX_NAME_LENGTH: usize = 256;
/// Maximum settle wait in seconds.
const MAX_SETTLE_SECS: u64 = 3_600;
/// Maximum number of database status polls.
const MAX_STATUS_POLLS: u32 = 100;
/// Minimum control-plane request timeout in milliseconds.
const MIN_CONTROL_PLANE_TIMEOUT_MS: u64 = 100;
/// Maximum control-plane request timeout in milliseconds.
const MAX_CONTROL_PLANE_TIMEOUT_MS: u64 = 300_000;
/// Maximum control-plane response size in bytes.
const MAX_CONTROL_PLANE_RESPONSE_BYTES: usize = 16 * 1024 * 1024;
/// Maximum number of extra environment entries.
const MAX_EXTRA_ENV: usize = 128;
/// Maximum number of audited collections.
const MAX_COLLECTIONS: usize = 64;
/// Maximum number of field rules per collection.
const MAX_FIELDS_PER_COLLECTION: usize = 256;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Ignite configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IgniteConfig {
    /// Project settings.
    #[serde(default)]
    pub project: ProjectConfig,
    /// Source repository settings.
    #[serde(default)]
    pub repository: RepositoryConfig,
    /// Database service settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Application service settings.
    #[serde(default)]
    pub application: ApplicationConfig,
    /// Object storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Database settle policy.
    #[serde(default)]
    pub settle: SettleConfig,
    /// Control-plane transport limits.
    #[serde(default)]
    pub control_plane: ControlPlaneConfig,
    /// Schema audit settings.
    #[serde(default)]
    pub audit: AuditConfig,
    /// Event logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Extra environment entries appended after the standard ones.
    #[serde(default)]
    pub env: Vec<ExtraEnvEntry>,
}

impl IgniteConfig {
    /// Loads configuration from disk using the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, &ProcessEnv)
    }

    /// Loads configuration from disk, resolving the path and overrides from `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_with_env(path: Option<&Path>, env: &dyn EnvSource) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path, env)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let mut config = Self::parse(content)?;
        config.apply_overrides(env);
        config.validate()?;
        Ok(config)
    }

    /// Parses TOML without applying overrides or validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the content is not a valid config.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Applies `IGNITE_*` overrides; blank values are ignored.
    pub fn apply_overrides(&mut self, env: &dyn EnvSource) {
        for (name, target) in OVERRIDES {
            let Some(value) = env.var(name).filter(|value| !value.trim().is_empty()) else {
                continue;
            };
            let value = value.trim().to_string();
            match target {
                Override::ProjectName => self.project.name = value,
                Override::Repository => self.repository.repository = value,
                Override::Branch => self.repository.branch = value,
                Override::Domain => self.application.domain = value,
                Override::ApplicationName => self.application.name = value,
                Override::DatabaseName => self.database.database = value,
            }
        }
    }

    /// Validates the configuration for internal consistency.
    ///
    /// Provisioning fields may be empty here; they are required only when a
    /// provisioning configuration is built.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.project.validate()?;
        self.repository.validate()?;
        self.database.validate()?;
        self.application.validate()?;
        self.storage.validate()?;
        self.settle.validate()?;
        self.control_plane.validate()?;
        self.audit.validate()?;
        self.logging.validate()?;
        validate_extra_env(&self.env)
    }

    /// Builds the provisioning configuration, reading secrets from `env`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a required setting is empty and
    /// [`ConfigError::MissingEnv`] when a secret is not set.
    pub fn provisioning(&self, env: &dyn EnvSource) -> Result<ProvisioningConfig, ConfigError> {
        require_setting("project.name", &self.project.name)?;
        require_setting("repository.repository", &self.repository.repository)?;
        require_setting("repository.branch", &self.repository.branch)?;
        require_setting("repository.build_file", &self.repository.build_file)?;
        require_setting("database.service_name", &self.database.service_name)?;
        require_setting("database.user", &self.database.user)?;
        require_setting("database.image", &self.database.image)?;
        require_setting("database.database", &self.database.database)?;
        require_setting("application.name", &self.application.name)?;
        require_setting("application.domain", &self.application.domain)?;
        require_setting("storage.bucket", &self.storage.bucket)?;
        require_setting("storage.account_id", &self.storage.account_id)?;
        require_setting("storage.public_endpoint", &self.storage.public_endpoint)?;
        Ok(ProvisioningConfig {
            project: ProjectSettings {
                name: self.project.name.clone(),
                description: self.project.description.clone(),
            },
            repository: RepositorySettings {
                repository: self.repository.repository.clone(),
                branch: self.repository.branch.clone(),
                build_path: self.repository.build_path.clone(),
                build_file: self.repository.build_file.clone(),
            },
            database: DatabaseSettings {
                service_name: self.database.service_name.clone(),
                user: self.database.user.clone(),
                password: require_secret(env, SECRET_DATABASE_PASSWORD)?,
                image: self.database.image.clone(),
                database: self.database.database.clone(),
                port: self.database.port,
                auth_source: self.database.auth_source.clone(),
            },
            application: ApplicationSettings {
                name: self.application.name.clone(),
            },
            domain: self.application.domain.clone(),
            storage: StorageSettings {
                bucket: self.storage.bucket.clone(),
                account_id: self.storage.account_id.clone(),
                access_key_id: require_secret(env, SECRET_R2_ACCESS_KEY_ID)?,
                secret_access_key: require_secret(env, SECRET_R2_SECRET_ACCESS_KEY)?,
                public_endpoint: self.storage.public_endpoint.clone(),
            },
            secrets: ApplicationSecrets {
                payload_secret: require_secret(env, SECRET_PAYLOAD)?,
                cron_secret: require_secret(env, SECRET_CRON)?,
                preview_secret: require_secret(env, SECRET_PREVIEW)?,
            },
            extra_env: self
                .env
                .iter()
                .map(|entry| EnvironmentEntry::plain(entry.key.clone(), entry.value.clone()))
                .collect(),
        })
    }

    /// Returns the settle policy.
    #[must_use]
    pub const fn settle_policy(&self) -> SettlePolicy {
        self.settle.policy()
    }

    /// Returns the configured schemas, or the built-in catalog when none are set.
    #[must_use]
    pub fn schemas(&self) -> Vec<FieldSchema> {
        if self.audit.collections.is_empty() {
            default_schemas()
        } else {
            self.audit.collections.clone()
        }
    }
}

/// Project settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project display name.
    pub name: String,
    /// Project description.
    pub description: String,
}

impl ProjectConfig {
    /// Validates project settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_length("project.name", &self.name)?;
        validate_length("project.description", &self.description)
    }
}

/// Source repository settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepositoryConfig {
    /// Repository name as registered with the control-plane integration.
    pub repository: String,
    /// Branch to build.
    pub branch: String,
    /// Build path inside the repository.
    pub build_path: String,
    /// Build file path.
    pub build_file: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            repository: String::new(),
            branch: "main".to_string(),
            build_path: "/".to_string(),
            build_file: "/Dockerfile".to_string(),
        }
    }
}

impl RepositoryConfig {
    /// Validates repository settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_length("repository.repository", &self.repository)?;
        validate_length("repository.branch", &self.branch)?;
        validate_path_string("repository.build_path", &self.build_path)?;
        validate_path_string("repository.build_file", &self.build_file)
    }
}

/// Database service settings. The password is read from the environment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Requested service name.
    pub service_name: String,
    /// Superuser name.
    pub user: String,
    /// Container image reference.
    pub image: String,
    /// Logical database used in the connection string.
    pub database: String,
    /// Database port.
    pub port: u16,
    /// Authentication database.
    pub auth_source: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            user: String::new(),
            image: "mongo:6".to_string(),
            database: String::new(),
            port: 27017,
            auth_source: "admin".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Validates database settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_length("database.service_name", &self.service_name)?;
        validate_length("database.user", &self.user)?;
        validate_length("database.image", &self.image)?;
        validate_length("database.database", &self.database)?;
        if self.port == 0 {
            return Err(ConfigError::Invalid("database.port must be greater than zero".to_string()));
        }
        if self.auth_source.trim().is_empty() {
            return Err(ConfigError::Invalid("database.auth_source must be non-empty".to_string()));
        }
        validate_length("database.auth_source", &self.auth_source)
    }
}

/// Application service settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApplicationConfig {
    /// Requested application name.
    pub name: String,
    /// Public domain (without scheme).
    pub domain: String,
}

impl ApplicationConfig {
    /// Validates application settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_length("application.name", &self.name)?;
        validate_length("application.domain", &self.domain)?;
        if self.domain.contains("://") || self.domain.contains('/') {
            return Err(ConfigError::Invalid(
                "application.domain must be a bare host name".to_string(),
            ));
        }
        Ok(())
    }
}

/// Object storage settings. Access keys are read from the environment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Bucket name.
    pub bucket: String,
    /// Storage account identifier.
    pub account_id: String,
    /// Public endpoint serving stored media.
    pub public_endpoint: String,
}

impl StorageConfig {
    /// Validates storage settings.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_length("storage.bucket", &self.bucket)?;
        validate_length("storage.account_id", &self.account_id)?;
        validate_length("storage.public_endpoint", &self.public_endpoint)?;
        if !self.public_endpoint.is_empty() {
            let url = url::Url::parse(&self.public_endpoint).map_err(|err| {
                ConfigError::Invalid(format!("storage.public_endpoint is not a url: {err}"))
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(
                    "storage.public_endpoint must use http or https".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Bounded database settle policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettleConfig {
    /// Wait after the deploy call, in seconds.
    pub initial_delay_secs: u64,
    /// Wait between status polls, in seconds.
    pub poll_interval_secs: u64,
    /// Maximum number of status polls.
    pub max_polls: u32,
}

impl Default for SettleConfig {
    fn default() -> Self {
        let policy = SettlePolicy::default();
        Self {
            initial_delay_secs: policy.initial_delay.as_secs(),
            poll_interval_secs: policy.poll_interval.as_secs(),
            max_polls: policy.max_polls,
        }
    }
}

impl SettleConfig {
    /// Returns the runtime policy.
    #[must_use]
    pub const fn policy(&self) -> SettlePolicy {
        SettlePolicy {
            initial_delay: Duration::from_secs(self.initial_delay_secs),
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            max_polls: self.max_polls,
        }
    }

    /// Validates the settle bounds.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_delay_secs > MAX_SETTLE_SECS || self.poll_interval_secs > MAX_SETTLE_SECS {
            return Err(ConfigError::Invalid(format!(
                "settle waits must not exceed {MAX_SETTLE_SECS} seconds"
            )));
        }
        if self.max_polls > MAX_STATUS_POLLS {
            return Err(ConfigError::Invalid(format!(
                "settle.max_polls must not exceed {MAX_STATUS_POLLS}"
            )));
        }
        Ok(())
    }
}

/// Control-plane transport limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlPlaneConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum response size in bytes.
    pub max_response_bytes: usize,
}

impl Default for ControlPlaneConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            max_response_bytes: 1024 * 1024,
        }
    }
}

impl ControlPlaneConfig {
    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validates transport limits.
    fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_CONTROL_PLANE_TIMEOUT_MS..=MAX_CONTROL_PLANE_TIMEOUT_MS).contains(&self.timeout_ms)
        {
            return Err(ConfigError::Invalid(format!(
                "control_plane.timeout_ms must be between {MIN_CONTROL_PLANE_TIMEOUT_MS} and \
                 {MAX_CONTROL_PLANE_TIMEOUT_MS}"
            )));
        }
        if self.max_response_bytes == 0
            || self.max_response_bytes > MAX_CONTROL_PLANE_RESPONSE_BYTES
        {
            return Err(ConfigError::Invalid(format!(
                "control_plane.max_response_bytes must be between 1 and \
                 {MAX_CONTROL_PLANE_RESPONSE_BYTES}"
            )));
        }
        Ok(())
    }
}

/// Schema audit settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    /// Outcome when a collection cannot be read.
    pub fetch_failure: FetchFailurePolicy,
    /// Collections to audit, in order; empty selects the built-in catalog.
    pub collections: Vec<FieldSchema>,
}

impl AuditConfig {
    /// Validates audit schemas.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.collections.len() > MAX_COLLECTIONS {
            return Err(ConfigError::Invalid(format!(
                "audit.collections exceeds {MAX_COLLECTIONS} entries"
            )));
        }
        let mut seen = BTreeSet::new();
        for schema in &self.collections {
            let name = schema.collection.as_str();
            if !seen.insert(name) {
                return Err(ConfigError::Invalid(format!("duplicate audit collection {name}")));
            }
            validate_schema(schema)?;
        }
        Ok(())
    }
}

/// Event logging settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Append-only JSON-lines event log.
    pub event_log: Option<PathBuf>,
    /// Mirror events to stderr as JSON lines.
    pub stderr: bool,
}

impl LoggingConfig {
    /// Validates logging settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.event_log {
            validate_path_string("logging.event_log", &path.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Extra environment entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraEnvEntry {
    /// Variable name.
    pub key: String,
    /// Variable value (single line).
    pub value: String,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
    /// Required environment variable not set.
    #[error("missing environment variable {0}")]
    MissingEnv(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>, env: &dyn EnvSource) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Some(env_path) = env.var(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        if component.as_os_str().len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Rejects overlong or multi-line values.
fn validate_length(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.len() > MAX_NAME_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds {MAX_NAME_LENGTH} bytes")));
    }
    if value.contains(['\n', '\r']) {
        return Err(ConfigError::Invalid(format!("{field} must be a single line")));
    }
    Ok(())
}

/// Requires a non-empty provisioning setting.
fn require_setting(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    Ok(())
}

/// Validates extra environment entries.
fn validate_extra_env(entries: &[ExtraEnvEntry]) -> Result<(), ConfigError> {
    if entries.len() > MAX_EXTRA_ENV {
        return Err(ConfigError::Invalid(format!("env exceeds {MAX_EXTRA_ENV} entries")));
    }
    let mut seen = BTreeSet::new();
    for entry in entries {
        if !is_valid_env_key(&entry.key) {
            return Err(ConfigError::Invalid(format!("invalid env key {:?}", entry.key)));
        }
        if STANDARD_ENV_KEYS.contains(&entry.key.as_str()) {
            return Err(ConfigError::Invalid(format!("env key {} is reserved", entry.key)));
        }
        if !seen.insert(entry.key.as_str()) {
            return Err(ConfigError::Invalid(format!("duplicate env key {}", entry.key)));
        }
        if entry.value.contains(['\n', '\r']) {
            return Err(ConfigError::Invalid(format!(
                "env value for {} must be a single line",
                entry.key
            )));
        }
    }
    Ok(())
}

/// Validates one collection schema.
fn validate_schema(schema: &FieldSchema) -> Result<(), ConfigError> {
    let collection = schema.collection.as_str();
    if schema.fields.is_empty() {
        return Err(ConfigError::Invalid(format!("audit collection {collection} has no fields")));
    }
    if schema.fields.len() > MAX_FIELDS_PER_COLLECTION {
        return Err(ConfigError::Invalid(format!(
            "audit collection {collection} exceeds {MAX_FIELDS_PER_COLLECTION} fields"
        )));
    }
    let mut seen = BTreeSet::new();
    for rule in &schema.fields {
        if rule.segments().any(str::is_empty) {
            return Err(ConfigError::Invalid(format!(
                "audit collection {collection} has an invalid field path {:?}",
                rule.path
            )));
        }
        if !seen.insert(rule.path.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "audit collection {collection} repeats field {}",
                rule.path
            )));
        }
        for constraint in &rule.constraints {
            if !constraint.applies_to(rule.kind) {
                return Err(ConfigError::Invalid(format!(
                    "{collection}.{}: constraint does not apply to {} fields",
                    rule.path, rule.kind
                )));
            }
            if constraint.message().trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "{collection}.{}: constraint message must be non-empty",
                    rule.path
                )));
            }
        }
    }
    Ok(())
}
