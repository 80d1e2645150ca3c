// crates/ignite-core/tests/common/mod.rs
// ============================================================================
// Module: Ignite Core Test Helpers
// Description: Recording doubles for the control plane, sources, sinks, and sleeper.
// ============================================================================
//! ## Overview
//! Shared fixtures for sequencer and auditor integration tests.

#![allow(dead_code, reason = "Each test binary uses a subset of the helpers.")]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::collections::VecDeque;
use std::time::Duration;

use ignite_core::ApplicationId;
use ignite_core::ApplicationRuntimeName;
use ignite_core::ApplicationSecrets;
use ignite_core::ApplicationSettings;
use ignite_core::AuditEvent;
use ignite_core::BindSourceRequest;
use ignite_core::CollectionFetchError;
use ignite_core::CollectionName;
use ignite_core::ControlPlane;
use ignite_core::CreateApplicationRequest;
use ignite_core::CreateDatabaseRequest;
use ignite_core::CreateProjectRequest;
use ignite_core::CreatedApplication;
use ignite_core::CreatedDatabase;
use ignite_core::CreatedProject;
use ignite_core::DatabaseRuntimeName;
use ignite_core::DatabaseServiceId;
use ignite_core::DatabaseSettings;
use ignite_core::DatabaseStatus;
use ignite_core::Document;
use ignite_core::DocumentSource;
use ignite_core::EnvironmentId;
use ignite_core::EventSink;
use ignite_core::Operation;
use ignite_core::ProjectId;
use ignite_core::ProjectSettings;
use ignite_core::ProvisioningConfig;
use ignite_core::RemoteApiError;
use ignite_core::RepositorySettings;
use ignite_core::SecretString;
use ignite_core::SetBuildStrategyRequest;
use ignite_core::SetEnvironmentRequest;
use ignite_core::Sleeper;
use ignite_core::StepEvent;
use ignite_core::StorageSettings;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Returns a complete provisioning configuration with test secrets.
pub fn sample_config() -> ProvisioningConfig {
    ProvisioningConfig {
        project: ProjectSettings {
            name: "wlf-site".to_string(),
            description: "Content service".to_string(),
        },
        repository: RepositorySettings {
            repository: "wlf-cms".to_string(),
            branch: "main".to_string(),
            build_path: "/".to_string(),
            build_file: "/Dockerfile".to_string(),
        },
        database: DatabaseSettings {
            service_name: "wlf-mongo".to_string(),
            user: "payload".to_string(),
            password: SecretString::new("s3cret"),
            image: "mongo:7".to_string(),
            database: "wlf-cms".to_string(),
            port: 27017,
            auth_source: "admin".to_string(),
        },
        application: ApplicationSettings {
            name: "wlf-cms".to_string(),
        },
        domain: "cms.example.org".to_string(),
        storage: StorageSettings {
            bucket: "media".to_string(),
            account_id: "acct-1".to_string(),
            access_key_id: SecretString::new("AKID"),
            secret_access_key: SecretString::new("SAK"),
            public_endpoint: "https://media.example.org".to_string(),
        },
        secrets: ApplicationSecrets {
            payload_secret: SecretString::new("payload-secret"),
            cron_secret: SecretString::new("cron-secret"),
            preview_secret: SecretString::new("preview-secret"),
        },
        extra_env: Vec::new(),
    }
}

// ============================================================================
// SECTION: Control Plane
// ============================================================================

/// Recorded control-plane call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    CreateProject(String),
    CreateDatabase { environment_id: String, name: String },
    DeployDatabase(String),
    DatabaseStatus(String),
    CreateApplication { environment_id: String, name: String },
    BindSource { application_id: String, repository: String, branch: String },
    SetBuildStrategy { application_id: String },
    SetEnvironment { application_id: String, env: String },
    DeployApplication(String),
    DeleteProject(String),
}

impl Call {
    /// Returns the operation the call corresponds to.
    pub fn operation(&self) -> Operation {
        match self {
            Self::CreateProject(_) => Operation::CreateProject,
            Self::CreateDatabase { .. } => Operation::CreateDatabaseService,
            Self::DeployDatabase(_) => Operation::DeployDatabaseService,
            Self::DatabaseStatus(_) => Operation::DatabaseServiceStatus,
            Self::CreateApplication { .. } => Operation::CreateApplicationService,
            Self::BindSource { .. } => Operation::BindSourceRepository,
            Self::SetBuildStrategy { .. } => Operation::SetBuildStrategy,
            Self::SetEnvironment { .. } => Operation::SetEnvironment,
            Self::DeployApplication(_) => Operation::DeployApplicationService,
            Self::DeleteProject(_) => Operation::DeleteProject,
        }
    }
}

/// Control plane double that records calls and can fail one operation.
pub struct MockControlPlane {
    calls: RefCell<Vec<Call>>,
    fail_on: Option<Operation>,
    statuses: RefCell<VecDeque<String>>,
    database_runtime_name: String,
}

impl MockControlPlane {
    /// Creates a mock that reports the database ready on the first poll.
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail_on: None,
            statuses: RefCell::new(VecDeque::from(vec!["done".to_string()])),
            database_runtime_name: "wlf-mongo-abc123".to_string(),
        }
    }

    /// Fails the given operation with an HTTP 500.
    pub fn failing_on(mut self, operation: Operation) -> Self {
        self.fail_on = Some(operation);
        self
    }

    /// Replaces the sequence of database statuses returned by polls.
    ///
    /// The last status repeats once the sequence is exhausted.
    pub fn with_statuses(self, statuses: &[&str]) -> Self {
        *self.statuses.borrow_mut() = statuses.iter().map(|status| (*status).to_string()).collect();
        self
    }

    /// Returns the recorded calls.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Returns the recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.calls.borrow().iter().map(Call::operation).collect()
    }

    fn record(&self, call: Call) -> Result<(), RemoteApiError> {
        let operation = call.operation();
        self.calls.borrow_mut().push(call);
        if self.fail_on == Some(operation) {
            return Err(RemoteApiError::status(
                operation,
                500,
                "internal error",
                Some(json!({"message": "boom"})),
            ));
        }
        Ok(())
    }
}

impl ControlPlane for MockControlPlane {
    fn create_project(
        &self,
        request: &CreateProjectRequest,
    ) -> Result<CreatedProject, RemoteApiError> {
        self.record(Call::CreateProject(request.name.clone()))?;
        Ok(CreatedProject {
            project_id: ProjectId::new("proj-1"),
            environment_id: EnvironmentId::new("env-1"),
        })
    }

    fn create_database_service(
        &self,
        request: &CreateDatabaseRequest,
    ) -> Result<CreatedDatabase, RemoteApiError> {
        self.record(Call::CreateDatabase {
            environment_id: request.environment_id.to_string(),
            name: request.name.clone(),
        })?;
        Ok(CreatedDatabase {
            database_id: DatabaseServiceId::new("mongo-1"),
            runtime_name: DatabaseRuntimeName::new(self.database_runtime_name.clone()),
        })
    }

    fn deploy_database_service(
        &self,
        database_id: &DatabaseServiceId,
    ) -> Result<(), RemoteApiError> {
        self.record(Call::DeployDatabase(database_id.to_string()))
    }

    fn database_service_status(
        &self,
        database_id: &DatabaseServiceId,
    ) -> Result<DatabaseStatus, RemoteApiError> {
        self.record(Call::DatabaseStatus(database_id.to_string()))?;
        let mut statuses = self.statuses.borrow_mut();
        let status = if statuses.len() > 1 {
            statuses.pop_front().unwrap_or_default()
        } else {
            statuses.front().cloned().unwrap_or_default()
        };
        Ok(DatabaseStatus {
            status,
        })
    }

    fn create_application_service(
        &self,
        request: &CreateApplicationRequest,
    ) -> Result<CreatedApplication, RemoteApiError> {
        self.record(Call::CreateApplication {
            environment_id: request.environment_id.to_string(),
            name: request.name.clone(),
        })?;
        Ok(CreatedApplication {
            application_id: ApplicationId::new("app-1"),
            runtime_name: Some(ApplicationRuntimeName::new("wlf-cms-x1y2")),
        })
    }

    fn bind_source_repository(&self, request: &BindSourceRequest) -> Result<(), RemoteApiError> {
        self.record(Call::BindSource {
            application_id: request.application_id.to_string(),
            repository: request.repository.clone(),
            branch: request.branch.clone(),
        })
    }

    fn set_build_strategy(&self, request: &SetBuildStrategyRequest) -> Result<(), RemoteApiError> {
        self.record(Call::SetBuildStrategy {
            application_id: request.application_id.to_string(),
        })
    }

    fn set_environment(&self, request: &SetEnvironmentRequest) -> Result<(), RemoteApiError> {
        self.record(Call::SetEnvironment {
            application_id: request.application_id.to_string(),
            env: request.env.expose().to_string(),
        })
    }

    fn deploy_application_service(
        &self,
        application_id: &ApplicationId,
    ) -> Result<(), RemoteApiError> {
        self.record(Call::DeployApplication(application_id.to_string()))
    }

    fn delete_project(&self, project_id: &ProjectId) -> Result<(), RemoteApiError> {
        self.record(Call::DeleteProject(project_id.to_string()))
    }
}

// ============================================================================
// SECTION: Sleeper
// ============================================================================

/// Sleeper that records requested waits without blocking.
#[derive(Default)]
pub struct RecordingSleeper {
    waits: RefCell<Vec<Duration>>,
}

impl RecordingSleeper {
    /// Returns the recorded waits.
    pub fn waits(&self) -> Vec<Duration> {
        self.waits.borrow().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.waits.borrow_mut().push(duration);
    }
}

// ============================================================================
// SECTION: Event Sink
// ============================================================================

/// Sink that keeps every event in memory.
#[derive(Default)]
pub struct RecordingSink {
    steps: RefCell<Vec<StepEvent>>,
    audits: RefCell<Vec<AuditEvent>>,
}

impl RecordingSink {
    /// Returns recorded step events.
    pub fn steps(&self) -> Vec<StepEvent> {
        self.steps.borrow().clone()
    }

    /// Returns recorded audit events.
    pub fn audits(&self) -> Vec<AuditEvent> {
        self.audits.borrow().clone()
    }
}

impl EventSink for RecordingSink {
    fn record_step(&self, event: &StepEvent) {
        self.steps.borrow_mut().push(event.clone());
    }

    fn record_audit(&self, event: &AuditEvent) {
        self.audits.borrow_mut().push(event.clone());
    }
}

// ============================================================================
// SECTION: Document Source
// ============================================================================

/// In-memory document source; collections absent from the map fail to fetch.
#[derive(Default)]
pub struct MemorySource {
    collections: BTreeMap<String, Vec<Value>>,
}

impl MemorySource {
    /// Adds a collection with the given raw documents.
    pub fn with(mut self, collection: &str, documents: Vec<Value>) -> Self {
        self.collections.insert(collection.to_string(), documents);
        self
    }
}

impl DocumentSource for MemorySource {
    fn fetch_all(
        &self,
        collection: &CollectionName,
    ) -> Result<Vec<Document>, CollectionFetchError> {
        let Some(bodies) = self.collections.get(collection.as_str()) else {
            return Err(CollectionFetchError::Db(format!("no such table: {collection}")));
        };
        Ok(bodies
            .iter()
            .enumerate()
            .map(|(index, body)| Document::from_body(collection.clone(), index, body.clone()))
            .collect())
    }
}
