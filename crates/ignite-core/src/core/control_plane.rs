// crates/ignite-core/src/core/control_plane.rs
// ============================================================================
// Module: Control-Plane Contract Types
// Description: Request/response records for the remote control plane.
// Purpose: Describe exactly the fields the sequencer sends and consumes.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Each control-plane operation takes a typed request and returns a typed
//! response carrying only the fields Ignite depends on. Responses for the
//! database and application services include the runtime name the remote
//! assigned; callers cannot predict it and must carry it forward.
//!
//! Failures of any kind surface as [`RemoteApiError`], which keeps the HTTP
//! status and the structured error body so operators can diagnose a partially
//! provisioned environment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::identifiers::ApplicationId;
use crate::core::identifiers::ApplicationRuntimeName;
use crate::core::identifiers::DatabaseRuntimeName;
use crate::core::identifiers::DatabaseServiceId;
use crate::core::identifiers::EnvironmentId;
use crate::core::identifiers::ProjectId;
use crate::core::secret::SecretString;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Database status value reported once the service finished deploying.
pub const DATABASE_READY_STATUS: &str = "done";

// ============================================================================
// SECTION: Operations
// ============================================================================

/// Control-plane operations issued by Ignite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Create a project (and its default environment).
    CreateProject,
    /// Create a database service.
    CreateDatabaseService,
    /// Trigger deployment of a database service.
    DeployDatabaseService,
    /// Read the status of a database service.
    DatabaseServiceStatus,
    /// Create an application service.
    CreateApplicationService,
    /// Bind a source repository to an application.
    BindSourceRepository,
    /// Select the application build strategy.
    SetBuildStrategy,
    /// Replace the application environment variables.
    SetEnvironment,
    /// Trigger deployment of an application service.
    DeployApplicationService,
    /// Delete a project and everything in it.
    DeleteProject,
}

impl Operation {
    /// Returns the stable snake-case label for the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateProject => "create_project",
            Self::CreateDatabaseService => "create_database_service",
            Self::DeployDatabaseService => "deploy_database_service",
            Self::DatabaseServiceStatus => "database_service_status",
            Self::CreateApplicationService => "create_application_service",
            Self::BindSourceRepository => "bind_source_repository",
            Self::SetBuildStrategy => "set_build_strategy",
            Self::SetEnvironment => "set_environment",
            Self::DeployApplicationService => "deploy_application_service",
            Self::DeleteProject => "delete_project",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Failure of a control-plane call.
///
/// # Invariants
/// - `status` is set only when the remote produced an HTTP response.
/// - `body` holds the decoded JSON error body when the remote returned one.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{operation} failed{}: {message}", status_suffix(.status.as_ref()))]
pub struct RemoteApiError {
    /// Operation that failed.
    pub operation: Operation,
    /// HTTP status returned by the remote, when one was received.
    pub status: Option<u16>,
    /// Human-readable failure message.
    pub message: String,
    /// Structured error body returned by the remote.
    pub body: Option<Value>,
}

impl RemoteApiError {
    /// Builds an error for a non-success HTTP response.
    #[must_use]
    pub fn status(
        operation: Operation,
        status: u16,
        message: impl Into<String>,
        body: Option<Value>,
    ) -> Self {
        Self {
            operation,
            status: Some(status),
            message: message.into(),
            body,
        }
    }

    /// Builds an error for a failure that produced no HTTP response.
    #[must_use]
    pub fn transport(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            status: None,
            message: message.into(),
            body: None,
        }
    }

    /// Builds an error for a success response that lacked required fields.
    #[must_use]
    pub fn invalid_response(operation: Operation, message: impl Into<String>) -> Self {
        Self {
            operation,
            status: None,
            message: format!("invalid response: {}", message.into()),
            body: None,
        }
    }
}

/// Formats the optional HTTP status for error messages.
fn status_suffix(status: Option<&u16>) -> String {
    status.map(|code| format!(" (http {code})")).unwrap_or_default()
}

// ============================================================================
// SECTION: Requests
// ============================================================================

/// Request to create a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    /// Project display name.
    pub name: String,
    /// Project description.
    pub description: String,
}

/// Request to create a database service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDatabaseRequest {
    /// Parent environment.
    pub environment_id: EnvironmentId,
    /// Requested service name (the remote appends a suffix).
    pub name: String,
    /// Database superuser name.
    pub user: String,
    /// Database superuser password.
    pub password: SecretString,
    /// Container image reference.
    pub image: String,
}

/// Request to create an application service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateApplicationRequest {
    /// Parent environment.
    pub environment_id: EnvironmentId,
    /// Requested application name (the remote appends a suffix).
    pub name: String,
}

/// Request to bind a source repository to an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindSourceRequest {
    /// Target application.
    pub application_id: ApplicationId,
    /// Repository name as known to the control plane integration.
    pub repository: String,
    /// Branch to build.
    pub branch: String,
    /// Build path inside the repository.
    pub build_path: String,
}

/// Build strategy applied to an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStrategy {
    /// Container image built from a build file in the repository.
    ///
    /// Chosen over buildpack auto-detection so that the image-generation step
    /// can run before the web framework build.
    BuildFile {
        /// Path of the build file inside the repository.
        path: String,
    },
}

/// Request to set the application build strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetBuildStrategyRequest {
    /// Target application.
    pub application_id: ApplicationId,
    /// Strategy to apply.
    pub strategy: BuildStrategy,
}

/// Request to replace the application environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetEnvironmentRequest {
    /// Target application.
    pub application_id: ApplicationId,
    /// Rendered `KEY=value` lines. Contains secrets.
    pub env: SecretString,
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Identifiers minted by project creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProject {
    /// New project identifier.
    pub project_id: ProjectId,
    /// Default environment created with the project.
    pub environment_id: EnvironmentId,
}

/// Identifiers minted by database service creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedDatabase {
    /// New database service identifier.
    pub database_id: DatabaseServiceId,
    /// Runtime service name assigned by the remote.
    pub runtime_name: DatabaseRuntimeName,
}

/// Identifiers minted by application service creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedApplication {
    /// New application identifier.
    pub application_id: ApplicationId,
    /// Runtime service name assigned by the remote, when reported.
    pub runtime_name: Option<ApplicationRuntimeName>,
}

/// Observed database service status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStatus {
    /// Raw status value reported by the remote.
    pub status: String,
}

impl DatabaseStatus {
    /// Returns true when the database reports the ready status.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.status == DATABASE_READY_STATUS
    }
}
