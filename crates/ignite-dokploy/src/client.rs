// crates/ignite-dokploy/src/client.rs
// ============================================================================
// Module: Dokploy Client
// Description: Blocking HTTP implementation of the control-plane interface.
// Purpose: Issue Dokploy API calls and map responses onto core types.
// Dependencies: ignite-core, reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! [`DokployClient`] talks to `<base>/api/<procedure>` with an `x-api-key`
//! header. Redirects are never followed and response bodies are read with a
//! byte limit. Any non-success status becomes a [`RemoteApiError`] carrying
//! the status code and the decoded JSON error body.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use ignite_core::ApplicationId;
use ignite_core::ApplicationRuntimeName;
use ignite_core::BindSourceRequest;
use ignite_core::BuildStrategy;
use ignite_core::ControlPlane;
use ignite_core::CreateApplicationRequest;
use ignite_core::CreateDatabaseRequest;
use ignite_core::CreateProjectRequest;
use ignite_core::CreatedApplication;
use ignite_core::CreatedDatabase;
use ignite_core::CreatedProject;
use ignite_core::DatabaseRuntimeName;
use ignite_core::DatabaseServiceId;
use ignite_core::DatabaseStatus;
use ignite_core::EnvironmentId;
use ignite_core::Operation;
use ignite_core::ProjectId;
use ignite_core::RemoteApiError;
use ignite_core::SecretString;
use ignite_core::SetBuildStrategyRequest;
use ignite_core::SetEnvironmentRequest;
use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::blocking::Response;
use reqwest::header::ACCEPT;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::wire;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default response size limit in bytes.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;
/// Header carrying the API token.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Dokploy build type for build-file strategies.
const DOCKERFILE_BUILD_TYPE: &str = "dockerfile";

/// Dokploy client configuration.
#[derive(Debug, Clone)]
pub struct DokployConfig {
    /// Dokploy server URL (without the `/api` suffix).
    pub base_url: String,
    /// API token.
    pub api_key: SecretString,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl DokployConfig {
    /// Creates a configuration with default limits.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            timeout: DEFAULT_TIMEOUT,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
            user_agent: format!("ignite/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Client construction errors.
#[derive(Debug, Error)]
pub enum DokployClientError {
    /// Base URL was not an absolute http(s) URL.
    #[error("invalid dokploy url: {0}")]
    InvalidUrl(String),
    /// HTTP client could not be built.
    #[error("http client build failed: {0}")]
    Client(String),
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Dokploy control-plane client.
#[derive(Debug)]
pub struct DokployClient {
    /// API base (`<base_url>/api`), without a trailing slash.
    api_base: String,
    /// API token.
    api_key: SecretString,
    /// Maximum response size allowed, in bytes.
    max_response_bytes: usize,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl DokployClient {
    /// Builds a client for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DokployClientError`] when the base URL is not http(s) or the
    /// HTTP client cannot be constructed.
    pub fn new(config: DokployConfig) -> Result<Self, DokployClientError> {
        let base = Url::parse(config.base_url.trim())
            .map_err(|err| DokployClientError::InvalidUrl(err.to_string()))?;
        match base.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(DokployClientError::InvalidUrl(format!("unsupported scheme {scheme}")));
            }
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .redirect(Policy::none())
            .build()
            .map_err(|err| DokployClientError::Client(err.to_string()))?;
        Ok(Self {
            api_base: format!("{}/api", base.as_str().trim_end_matches('/')),
            api_key: config.api_key,
            max_response_bytes: config.max_response_bytes,
            client,
        })
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Builds the URL of a procedure.
    fn endpoint(&self, operation: Operation, procedure: &str) -> Result<Url, RemoteApiError> {
        Url::parse(&format!("{}/{procedure}", self.api_base))
            .map_err(|err| RemoteApiError::transport(operation, format!("invalid url: {err}")))
    }

    /// Issues a `POST` with a JSON body and returns the decoded response.
    fn post<B: Serialize>(
        &self,
        operation: Operation,
        procedure: &str,
        body: &B,
    ) -> Result<Value, RemoteApiError> {
        let url = self.endpoint(operation, procedure)?;
        let payload = serde_json::to_vec(body).map_err(|err| {
            RemoteApiError::transport(operation, format!("request encoding failed: {err}"))
        })?;
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        self.send(operation, request)
    }

    /// Issues a `GET` with query parameters and returns the decoded response.
    fn get(
        &self,
        operation: Operation,
        procedure: &str,
        query: &[(&str, &str)],
    ) -> Result<Value, RemoteApiError> {
        let mut url = self.endpoint(operation, procedure)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        self.send(operation, self.client.get(url))
    }

    /// Sends a request and maps the response.
    fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> Result<Value, RemoteApiError> {
        let mut response = request
            .header(API_KEY_HEADER, self.api_key.expose())
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|err| RemoteApiError::transport(operation, err.to_string()))?;
        let status = response.status();
        let bytes = read_response_limited(operation, &mut response, self.max_response_bytes)?;
        let body = decode_body(&bytes);
        if !status.is_success() {
            let message = error_message(body.as_ref())
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "request failed".to_string());
            return Err(RemoteApiError::status(operation, status.as_u16(), message, body));
        }
        Ok(body.unwrap_or(Value::Null))
    }
}

// ============================================================================
// SECTION: Control Plane
// ============================================================================

impl ControlPlane for DokployClient {
    fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<CreatedProject, RemoteApiError> {
        let operation = Operation::CreateProject;
        let body = self.post(operation, "project.create", &wire::ProjectCreate {
            name: &request.name,
            description: &request.description,
            env: "",
        })?;
        let created: wire::ProjectCreated = decode(operation, body)?;
        let project_id = created
            .project_id()
            .ok_or_else(|| RemoteApiError::invalid_response(operation, "missing projectId"))?;
        let environment_id = created
            .environment_id()
            .ok_or_else(|| RemoteApiError::invalid_response(operation, "missing environmentId"))?;
        Ok(CreatedProject {
            project_id: ProjectId::new(project_id),
            environment_id: EnvironmentId::new(environment_id),
        })
    }

    fn create_database_service(
        &self,
        request: &CreateDatabaseRequest,
    ) -> Result<CreatedDatabase, RemoteApiError> {
        let operation = Operation::CreateDatabaseService;
        let body = self.post(operation, "mongo.create", &wire::MongoCreate {
            environment_id: request.environment_id.as_str(),
            name: &request.name,
            app_name: &request.name,
            database_user: &request.user,
            database_password: request.password.expose(),
            docker_image: &request.image,
        })?;
        let created: wire::MongoCreated = decode(operation, body)?;
        let mongo_id = wire::filled(created.mongo_id.as_deref());
        let app_name = wire::filled(created.app_name.as_deref());
        let (Some(mongo_id), Some(app_name)) = (mongo_id, app_name) else {
            return Err(RemoteApiError::invalid_response(operation, "missing mongoId or appName"));
        };
        Ok(CreatedDatabase {
            database_id: DatabaseServiceId::new(mongo_id),
            runtime_name: DatabaseRuntimeName::new(app_name),
        })
    }

    fn deploy_database_service(
        &self,
        database_id: &DatabaseServiceId,
    ) -> Result<(), RemoteApiError> {
        let body = wire::MongoRef {
            mongo_id: database_id.as_str(),
        };
        self.post(Operation::DeployDatabaseService, "mongo.deploy", &body).map(|_| ())
    }

    fn database_service_status(
        &self,
        database_id: &DatabaseServiceId,
    ) -> Result<DatabaseStatus, RemoteApiError> {
        let operation = Operation::DatabaseServiceStatus;
        let body = self.get(operation, "mongo.one", &[("mongoId", database_id.as_str())])?;
        let status: wire::MongoStatus = decode(operation, body)?;
        let status = status.application_status.ok_or_else(|| {
            RemoteApiError::invalid_response(operation, "missing applicationStatus")
        })?;
        Ok(DatabaseStatus {
            status,
        })
    }

    fn create_application_service(
        &self,
        request: &CreateApplicationRequest,
    ) -> Result<CreatedApplication, RemoteApiError> {
        let operation = Operation::CreateApplicationService;
        let body = self.post(operation, "application.create", &wire::ApplicationCreate {
            environment_id: request.environment_id.as_str(),
            name: &request.name,
            app_name: &request.name,
        })?;
        let created: wire::ApplicationCreated = decode(operation, body)?;
        let application_id = wire::filled(created.application_id.as_deref())
            .ok_or_else(|| RemoteApiError::invalid_response(operation, "missing applicationId"))?;
        let runtime_name = wire::filled(created.app_name.as_deref());
        Ok(CreatedApplication {
            application_id: ApplicationId::new(application_id),
            runtime_name: runtime_name.map(ApplicationRuntimeName::new),
        })
    }

    fn bind_source_repository(&self, request: &BindSourceRequest) -> Result<(), RemoteApiError> {
        let body = wire::SaveGitProvider {
            application_id: request.application_id.as_str(),
            repository: &request.repository,
            branch: &request.branch,
            build_path: &request.build_path,
        };
        // Procedure name keeps Dokploy's spelling.
        self.post(Operation::BindSourceRepository, "application.saveGitProdiver", &body).map(|_| ())
    }

    fn set_build_strategy(&self, request: &SetBuildStrategyRequest) -> Result<(), RemoteApiError> {
        let BuildStrategy::BuildFile {
            path,
        } = &request.strategy;
        let body = wire::SaveBuildType {
            application_id: request.application_id.as_str(),
            build_type: DOCKERFILE_BUILD_TYPE,
            dockerfile: path,
        };
        self.post(Operation::SetBuildStrategy, "application.saveBuildType", &body).map(|_| ())
    }

    fn set_environment(&self, request: &SetEnvironmentRequest) -> Result<(), RemoteApiError> {
        let body = wire::SaveEnvironment {
            application_id: request.application_id.as_str(),
            env: request.env.expose(),
        };
        self.post(Operation::SetEnvironment, "application.saveEnvironment", &body).map(|_| ())
    }

    fn deploy_application_service(
        &self,
        application_id: &ApplicationId,
    ) -> Result<(), RemoteApiError> {
        let body = wire::ApplicationRef {
            application_id: application_id.as_str(),
        };
        self.post(Operation::DeployApplicationService, "application.deploy", &body).map(|_| ())
    }

    fn delete_project(&self, project_id: &ProjectId) -> Result<(), RemoteApiError> {
        let body = wire::ProjectRef {
            project_id: project_id.as_str(),
        };
        self.post(Operation::DeleteProject, "project.remove", &body).map(|_| ())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes a success body into a wire response.
fn decode<T: DeserializeOwned>(operation: Operation, body: Value) -> Result<T, RemoteApiError> {
    serde_json::from_value(body)
        .map_err(|err| RemoteApiError::invalid_response(operation, err.to_string()))
}

/// Parses a body as JSON; empty or non-JSON bodies yield `None`.
fn decode_body(bytes: &[u8]) -> Option<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(bytes).ok()
}

/// Extracts a human-readable message from a Dokploy error body.
fn error_message(body: Option<&Value>) -> Option<String> {
    let body = body?;
    body.get("message")
        .and_then(Value::as_str)
        .or_else(|| body.pointer("/error/message").and_then(Value::as_str))
        .or_else(|| body.pointer("/error/json/message").and_then(Value::as_str))
        .map(str::to_string)
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    operation: Operation,
    response: &mut Response,
    max_bytes: usize,
) -> Result<Vec<u8>, RemoteApiError> {
    let max_bytes_u64 = u64::try_from(max_bytes).map_err(|_| {
        RemoteApiError::transport(operation, "response size limit exceeds u64")
    })?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err(RemoteApiError::transport(operation, "response exceeds size limit"));
    }
    let mut buf = Vec::new();
    let mut handle = response.take(max_bytes_u64.saturating_add(1));
    handle
        .read_to_end(&mut buf)
        .map_err(|err| RemoteApiError::transport(operation, format!("read failed: {err}")))?;
    if buf.len() > max_bytes {
        return Err(RemoteApiError::transport(operation, "response exceeds size limit"));
    }
    Ok(buf)
}
