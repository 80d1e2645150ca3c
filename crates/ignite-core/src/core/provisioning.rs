// crates/ignite-core/src/core/provisioning.rs
// ============================================================================
// Module: Provisioning Model
// Description: Configuration, accumulated state, and step results for provisioning.
// Purpose: Model the data flowing between provisioning steps.
// Dependencies: serde, thiserror, url
// ============================================================================

//! ## Overview
//! [`ProvisioningConfig`] is the immutable input of a provisioning run.
//! [`ProvisioningState`] accumulates identifiers as steps complete; each later
//! step reads its prerequisites through `require_*` accessors that fail when the
//! producing step has not run. The application environment is composed from
//! the configuration plus the database runtime name, which is the only name
//! accepted by [`database_uri`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::core::control_plane::RemoteApiError;
use crate::core::identifiers::ApplicationId;
use crate::core::identifiers::ApplicationRuntimeName;
use crate::core::identifiers::DatabaseRuntimeName;
use crate::core::identifiers::DatabaseServiceId;
use crate::core::identifiers::EnvironmentId;
use crate::core::identifiers::ProjectId;
use crate::core::secret::REDACTED;
use crate::core::secret::SecretString;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Project settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    /// Project display name.
    pub name: String,
    /// Project description.
    pub description: String,
}

/// Source repository settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySettings {
    /// Repository name as registered with the control plane integration.
    pub repository: String,
    /// Branch to build.
    pub branch: String,
    /// Build path inside the repository.
    pub build_path: String,
    /// Build file used for the container image build.
    pub build_file: String,
}

/// Database service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    /// Requested service name. The deployed name differs.
    pub service_name: String,
    /// Superuser name.
    pub user: String,
    /// Superuser password.
    pub password: SecretString,
    /// Container image reference.
    pub image: String,
    /// Logical database the application connects to.
    pub database: String,
    /// Port exposed by the database service.
    pub port: u16,
    /// Authentication database for the connection string.
    pub auth_source: String,
}

/// Application service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSettings {
    /// Requested application name.
    pub name: String,
}

/// Object storage settings injected into the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageSettings {
    /// Bucket name.
    pub bucket: String,
    /// Storage account identifier.
    pub account_id: String,
    /// Access key identifier.
    pub access_key_id: SecretString,
    /// Secret access key.
    pub secret_access_key: SecretString,
    /// Public endpoint serving stored media.
    pub public_endpoint: String,
}

/// Application secrets injected into the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSecrets {
    /// CMS signing secret.
    pub payload_secret: SecretString,
    /// Secret guarding scheduled job endpoints.
    pub cron_secret: SecretString,
    /// Secret guarding draft preview endpoints.
    pub preview_secret: SecretString,
}

/// Immutable configuration for one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningConfig {
    /// Project settings.
    pub project: ProjectSettings,
    /// Source repository settings.
    pub repository: RepositorySettings,
    /// Database service settings.
    pub database: DatabaseSettings,
    /// Application service settings.
    pub application: ApplicationSettings,
    /// Public domain served by the application.
    pub domain: String,
    /// Object storage settings.
    pub storage: StorageSettings,
    /// Application secrets.
    pub secrets: ApplicationSecrets,
    /// Additional environment entries appended after the standard ones.
    pub extra_env: Vec<EnvironmentEntry>,
}

// ============================================================================
// SECTION: Environment Payload
// ============================================================================

/// Environment variable value, tracked as plain or secret for redaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue {
    /// Value that may be displayed.
    Plain(String),
    /// Value that must never be displayed.
    Secret(SecretString),
}

impl EnvValue {
    /// Returns the raw value.
    #[must_use]
    pub fn expose(&self) -> &str {
        match self {
            Self::Plain(value) => value,
            Self::Secret(secret) => secret.expose(),
        }
    }
}

impl fmt::Display for EnvValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(value) => f.write_str(value),
            Self::Secret(_) => f.write_str(REDACTED),
        }
    }
}

/// Single environment variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentEntry {
    /// Variable name.
    pub key: String,
    /// Variable value.
    pub value: EnvValue,
}

impl EnvironmentEntry {
    /// Creates a displayable entry.
    #[must_use]
    pub fn plain(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: EnvValue::Plain(value.into()),
        }
    }

    /// Creates a redacted entry.
    #[must_use]
    pub fn secret(key: impl Into<String>, value: SecretString) -> Self {
        Self {
            key: key.into(),
            value: EnvValue::Secret(value),
        }
    }
}

/// Ordered environment injected into the application.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvironmentPayload {
    /// Entries in injection order.
    pub entries: Vec<EnvironmentEntry>,
}

impl EnvironmentPayload {
    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&EnvValue> {
        self.entries.iter().find(|entry| entry.key == key).map(|entry| &entry.value)
    }

    /// Renders `KEY=value` lines with secrets exposed, for the control plane only.
    #[must_use]
    pub fn render(&self) -> SecretString {
        let lines: Vec<String> = self
            .entries
            .iter()
            .map(|entry| format!("{}={}", entry.key, entry.value.expose()))
            .collect();
        SecretString::new(lines.join("\n"))
    }

    /// Renders `KEY=value` lines with secrets redacted.
    #[must_use]
    pub fn redacted_lines(&self) -> Vec<String> {
        self.entries.iter().map(|entry| format!("{}={}", entry.key, entry.value)).collect()
    }
}

/// Keys composed by [`compose_environment`] ahead of any extra entries.
pub const STANDARD_ENV_KEYS: [&str; 12] = [
    "DATABASE_URI",
    "PAYLOAD_SECRET",
    "NEXT_PUBLIC_SERVER_URL",
    "CRON_SECRET",
    "PREVIEW_SECRET",
    "R2_BUCKET",
    "R2_ACCOUNT_ID",
    "R2_ACCESS_KEY_ID",
    "R2_SECRET_ACCESS_KEY",
    "R2_PUBLIC_ENDPOINT",
    "NODE_ENV",
    "HOSTNAME",
];

/// Returns true when `key` is a valid environment variable name.
#[must_use]
pub fn is_valid_env_key(key: &str) -> bool {
    let mut bytes = key.bytes();
    let Some(first) = bytes.next() else {
        return false;
    };
    (first.is_ascii_uppercase() || first == b'_')
        && bytes.all(|byte| byte.is_ascii_uppercase() || byte.is_ascii_digit() || byte == b'_')
}

/// Builds the database connection string from the deployed service name.
///
/// The host is always `runtime_name`; the requested service name is not an
/// input. User and password are percent-encoded.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidInput`] when the components do not form a
/// valid connection URL.
pub fn database_uri(
    database: &DatabaseSettings,
    runtime_name: &DatabaseRuntimeName,
) -> Result<SecretString, SequenceError> {
    let base = format!(
        "mongodb://{}:{}/{}",
        runtime_name.as_str(),
        database.port,
        database.database
    );
    let mut url = Url::parse(&base)
        .map_err(|err| SequenceError::InvalidInput(format!("invalid database uri: {err}")))?;
    // The userinfo encode set leaves '%' alone; escape it first.
    url.set_username(&database.user.replace('%', "%25"))
        .map_err(|()| SequenceError::InvalidInput("invalid database user".to_string()))?;
    url.set_password(Some(&database.password.expose().replace('%', "%25")))
        .map_err(|()| SequenceError::InvalidInput("invalid database password".to_string()))?;
    url.query_pairs_mut().append_pair("authSource", &database.auth_source);
    Ok(SecretString::new(String::from(url)))
}

/// Composes the application environment for a provisioned database.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidInput`] when a value spans multiple lines,
/// when an extra key is invalid or repeated, or when the connection string is
/// invalid.
pub fn compose_environment(
    config: &ProvisioningConfig,
    runtime_name: &DatabaseRuntimeName,
) -> Result<EnvironmentPayload, SequenceError> {
    let mut entries = vec![
        EnvironmentEntry::secret("DATABASE_URI", database_uri(&config.database, runtime_name)?),
        EnvironmentEntry::secret("PAYLOAD_SECRET", config.secrets.payload_secret.clone()),
        EnvironmentEntry::plain("NEXT_PUBLIC_SERVER_URL", format!("https://{}", config.domain)),
        EnvironmentEntry::secret("CRON_SECRET", config.secrets.cron_secret.clone()),
        EnvironmentEntry::secret("PREVIEW_SECRET", config.secrets.preview_secret.clone()),
        EnvironmentEntry::plain("R2_BUCKET", config.storage.bucket.clone()),
        EnvironmentEntry::plain("R2_ACCOUNT_ID", config.storage.account_id.clone()),
        EnvironmentEntry::secret("R2_ACCESS_KEY_ID", config.storage.access_key_id.clone()),
        EnvironmentEntry::secret("R2_SECRET_ACCESS_KEY", config.storage.secret_access_key.clone()),
        EnvironmentEntry::plain("R2_PUBLIC_ENDPOINT", config.storage.public_endpoint.clone()),
        EnvironmentEntry::plain("NODE_ENV", "production"),
        EnvironmentEntry::plain("HOSTNAME", "0.0.0.0"),
    ];
    for extra in &config.extra_env {
        if !is_valid_env_key(&extra.key) {
            return Err(SequenceError::InvalidInput(format!(
                "invalid environment key {:?}",
                extra.key
            )));
        }
        if entries.iter().any(|entry| entry.key == extra.key) {
            return Err(SequenceError::InvalidInput(format!(
                "duplicate environment key {}",
                extra.key
            )));
        }
        entries.push(extra.clone());
    }
    for entry in &entries {
        if entry.value.expose().contains(['\n', '\r']) {
            return Err(SequenceError::InvalidInput(format!(
                "environment value for {} must be a single line",
                entry.key
            )));
        }
    }
    Ok(EnvironmentPayload {
        entries,
    })
}

// ============================================================================
// SECTION: Steps
// ============================================================================

/// Ordered provisioning steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Create the project and its environment.
    CreateProject,
    /// Create the database service.
    CreateDatabase,
    /// Deploy the database service and wait for it to settle.
    DeployDatabase,
    /// Create the application service.
    CreateApplication,
    /// Bind the source repository and select the build strategy.
    ConfigureBuild,
    /// Inject the application environment.
    InjectEnvironment,
    /// Trigger the application deployment.
    DeployApplication,
}

impl Step {
    /// All steps in execution order.
    pub const ALL: [Self; 7] = [
        Self::CreateProject,
        Self::CreateDatabase,
        Self::DeployDatabase,
        Self::CreateApplication,
        Self::ConfigureBuild,
        Self::InjectEnvironment,
        Self::DeployApplication,
    ];

    /// Returns the one-based position of the step.
    #[must_use]
    pub const fn number(self) -> usize {
        match self {
            Self::CreateProject => 1,
            Self::CreateDatabase => 2,
            Self::DeployDatabase => 3,
            Self::CreateApplication => 4,
            Self::ConfigureBuild => 5,
            Self::InjectEnvironment => 6,
            Self::DeployApplication => 7,
        }
    }

    /// Returns the stable snake-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateProject => "create_project",
            Self::CreateDatabase => "create_database",
            Self::DeployDatabase => "deploy_database",
            Self::CreateApplication => "create_application",
            Self::ConfigureBuild => "configure_build",
            Self::InjectEnvironment => "inject_environment",
            Self::DeployApplication => "deploy_application",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Step completed; captured outputs in production order.
    Completed {
        /// Captured `(field, value)` outputs.
        outputs: Vec<(String, String)>,
    },
    /// Step failed and the run aborted.
    Failed {
        /// Failure description.
        error: String,
    },
}

/// Result record for one executed step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResult {
    /// Step that ran.
    pub step: Step,
    /// Step outcome.
    pub outcome: StepOutcome,
}

impl StepResult {
    /// Returns true when the step completed.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.outcome, StepOutcome::Completed { .. })
    }
}

// ============================================================================
// SECTION: State
// ============================================================================

/// Prerequisite value read before the step producing it completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing prerequisite {field} (produced by {producer})")]
pub struct MissingPrerequisite {
    /// State field that was empty.
    pub field: &'static str,
    /// Step that produces the field.
    pub producer: Step,
}

/// Identifiers accumulated across a provisioning run.
///
/// # Invariants
/// - A field is set only after the step producing it completed.
/// - Consumers read fields through `require_*`, which fail while unset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProvisioningState {
    /// Project identifier (step 1).
    pub project_id: Option<ProjectId>,
    /// Environment identifier (step 1).
    pub environment_id: Option<EnvironmentId>,
    /// Database service identifier (step 2).
    pub database_id: Option<DatabaseServiceId>,
    /// Database runtime name (step 2).
    pub database_runtime_name: Option<DatabaseRuntimeName>,
    /// Last database status observed after deploy (step 3).
    pub database_status: Option<String>,
    /// Application identifier (step 4).
    pub application_id: Option<ApplicationId>,
    /// Application runtime name (step 4).
    pub application_runtime_name: Option<ApplicationRuntimeName>,
}

/// Returns the field or a missing-prerequisite error.
fn require<'a, T>(
    value: Option<&'a T>,
    field: &'static str,
    producer: Step,
) -> Result<&'a T, MissingPrerequisite> {
    value.ok_or(MissingPrerequisite {
        field,
        producer,
    })
}

impl ProvisioningState {
    /// Returns the environment identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MissingPrerequisite`] until project creation completes.
    pub fn require_environment_id(&self) -> Result<&EnvironmentId, MissingPrerequisite> {
        require(self.environment_id.as_ref(), "environment_id", Step::CreateProject)
    }

    /// Returns the database service identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MissingPrerequisite`] until database creation completes.
    pub fn require_database_id(&self) -> Result<&DatabaseServiceId, MissingPrerequisite> {
        require(self.database_id.as_ref(), "database_id", Step::CreateDatabase)
    }

    /// Returns the database runtime name.
    ///
    /// # Errors
    ///
    /// Returns [`MissingPrerequisite`] until database creation completes.
    pub fn require_database_runtime_name(
        &self,
    ) -> Result<&DatabaseRuntimeName, MissingPrerequisite> {
        require(self.database_runtime_name.as_ref(), "database_runtime_name", Step::CreateDatabase)
    }

    /// Returns the application identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MissingPrerequisite`] until application creation completes.
    pub fn require_application_id(&self) -> Result<&ApplicationId, MissingPrerequisite> {
        require(self.application_id.as_ref(), "application_id", Step::CreateApplication)
    }
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Errors that abort a provisioning run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SequenceError {
    /// Control-plane call failed.
    #[error(transparent)]
    Remote(#[from] RemoteApiError),
    /// A step read state that no completed step produced.
    #[error(transparent)]
    MissingPrerequisite(#[from] MissingPrerequisite),
    /// Configuration values could not be turned into a valid request.
    #[error("invalid provisioning input: {0}")]
    InvalidInput(String),
}

/// Terminal status of a provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProvisioningStatus {
    /// Every step completed.
    Completed,
    /// A step failed; later steps did not run.
    Aborted,
}

/// Final record of a provisioning run.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvisioningOutcome {
    /// Terminal status.
    pub status: ProvisioningStatus,
    /// State accumulated up to the terminal status.
    pub state: ProvisioningState,
    /// Executed steps in order, including the failed one.
    pub steps: Vec<StepResult>,
    /// Non-fatal warnings (e.g. database not ready after settling).
    pub warnings: Vec<String>,
    /// Failure cause when aborted.
    pub failure: Option<SequenceError>,
}

impl ProvisioningOutcome {
    /// Returns true when the run completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == ProvisioningStatus::Completed
    }
}
