// crates/ignite-dokploy/src/wire.rs
// ============================================================================
// Module: Dokploy Wire Types
// Description: JSON bodies exchanged with the Dokploy API.
// Purpose: Map typed control-plane requests onto Dokploy's field names.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Request bodies mirror Dokploy's camelCase procedures. Response types list
//! only the fields Ignite consumes; everything else is ignored. Every field
//! is optional so that a missing identifier is reported as an invalid
//! response rather than a decode failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Requests
// ============================================================================

/// `project.create` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreate<'a> {
    /// Project name.
    pub name: &'a str,
    /// Project description.
    pub description: &'a str,
    /// Project-level shared environment (always empty).
    pub env: &'a str,
}

/// `mongo.create` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoCreate<'a> {
    /// Parent environment.
    pub environment_id: &'a str,
    /// Display name.
    pub name: &'a str,
    /// Requested service name; Dokploy appends a suffix.
    pub app_name: &'a str,
    /// Superuser name.
    pub database_user: &'a str,
    /// Superuser password.
    pub database_password: &'a str,
    /// Container image.
    pub docker_image: &'a str,
}

/// Body addressing a database service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoRef<'a> {
    /// Database service identifier.
    pub mongo_id: &'a str,
}

/// `application.create` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCreate<'a> {
    /// Parent environment.
    pub environment_id: &'a str,
    /// Display name.
    pub name: &'a str,
    /// Requested service name; Dokploy appends a suffix.
    pub app_name: &'a str,
}

/// Body addressing an application.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRef<'a> {
    /// Application identifier.
    pub application_id: &'a str,
}

/// `application.saveGitProdiver` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveGitProvider<'a> {
    /// Application identifier.
    pub application_id: &'a str,
    /// Repository name.
    pub repository: &'a str,
    /// Branch to build.
    pub branch: &'a str,
    /// Build path inside the repository.
    pub build_path: &'a str,
}

/// `application.saveBuildType` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveBuildType<'a> {
    /// Application identifier.
    pub application_id: &'a str,
    /// Dokploy build type label.
    pub build_type: &'a str,
    /// Build file path.
    pub dockerfile: &'a str,
}

/// `application.saveEnvironment` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEnvironment<'a> {
    /// Application identifier.
    pub application_id: &'a str,
    /// Newline-separated `KEY=value` lines.
    pub env: &'a str,
}

/// `project.remove` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRef<'a> {
    /// Project identifier.
    pub project_id: &'a str,
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Returns `value` unless it is absent or blank.
///
/// Dokploy answers some failed creates with empty identifiers instead of an
/// error status.
pub fn filled(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Object carrying a project identifier.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBody {
    /// Project identifier.
    pub project_id: Option<String>,
}

/// Object carrying an environment identifier.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentBody {
    /// Environment identifier.
    pub environment_id: Option<String>,
}

/// `project.create` response.
///
/// Dokploy has returned both a flat project with an `environments` list and
/// a `{ project, environment }` pair; both shapes are accepted.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCreated {
    /// Project identifier (flat shape).
    pub project_id: Option<String>,
    /// Nested project (paired shape).
    pub project: Option<ProjectBody>,
    /// Environments created with the project (flat shape).
    #[serde(default)]
    pub environments: Vec<EnvironmentBody>,
    /// Default environment (paired shape).
    pub environment: Option<EnvironmentBody>,
}

impl ProjectCreated {
    /// Returns the project identifier from whichever shape is present.
    pub fn project_id(&self) -> Option<&str> {
        filled(self.project_id.as_deref()).or_else(|| {
            self.project.as_ref().and_then(|project| filled(project.project_id.as_deref()))
        })
    }

    /// Returns the first environment identifier from whichever shape is present.
    pub fn environment_id(&self) -> Option<&str> {
        self.environments
            .first()
            .and_then(|environment| filled(environment.environment_id.as_deref()))
            .or_else(|| {
                self.environment
                    .as_ref()
                    .and_then(|environment| filled(environment.environment_id.as_deref()))
            })
    }
}

/// `mongo.create` response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoCreated {
    /// Database service identifier.
    pub mongo_id: Option<String>,
    /// Deployed (suffixed) service name.
    pub app_name: Option<String>,
}

/// `mongo.one` response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MongoStatus {
    /// Deployment status label.
    pub application_status: Option<String>,
}

/// `application.create` response.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationCreated {
    /// Application identifier.
    pub application_id: Option<String>,
    /// Deployed (suffixed) service name.
    pub app_name: Option<String>,
}
