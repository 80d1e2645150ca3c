// crates/ignite-core/src/core/mod.rs
// ============================================================================
// Module: Ignite Core Types
// Description: Data model for provisioning runs and schema audits.
// Purpose: Provide the typed records shared by runtimes, adapters, and the CLI.
// Dependencies: serde, serde_json, thiserror, url
// ============================================================================

//! ## Overview
//! Core types describe what flows through a provisioning run (configuration,
//! control-plane requests and responses, accumulated state) and through a
//! schema audit (field schemas, documents, failures, reports). They carry no
//! I/O.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod audit;
pub mod control_plane;
pub mod events;
pub mod identifiers;
pub mod provisioning;
pub mod schema;
pub mod secret;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditFailure;
pub use audit::AuditReport;
pub use audit::CollectionSummary;
pub use audit::Document;
pub use audit::FetchFailurePolicy;
pub use control_plane::BindSourceRequest;
pub use control_plane::BuildStrategy;
pub use control_plane::CreateApplicationRequest;
pub use control_plane::CreateDatabaseRequest;
pub use control_plane::CreateProjectRequest;
pub use control_plane::CreatedApplication;
pub use control_plane::CreatedDatabase;
pub use control_plane::CreatedProject;
pub use control_plane::DATABASE_READY_STATUS;
pub use control_plane::DatabaseStatus;
pub use control_plane::Operation;
pub use control_plane::RemoteApiError;
pub use control_plane::SetBuildStrategyRequest;
pub use control_plane::SetEnvironmentRequest;
pub use events::AuditEvent;
pub use events::AuditEventKind;
pub use events::StepEvent;
pub use events::StepPhase;
pub use identifiers::ApplicationId;
pub use identifiers::ApplicationRuntimeName;
pub use identifiers::CollectionName;
pub use identifiers::CollectionNameError;
pub use identifiers::DatabaseRuntimeName;
pub use identifiers::DatabaseServiceId;
pub use identifiers::DocumentId;
pub use identifiers::EnvironmentId;
pub use identifiers::MAX_COLLECTION_NAME_LENGTH;
pub use identifiers::ProjectId;
pub use provisioning::ApplicationSecrets;
pub use provisioning::ApplicationSettings;
pub use provisioning::DatabaseSettings;
pub use provisioning::EnvValue;
pub use provisioning::EnvironmentEntry;
pub use provisioning::EnvironmentPayload;
pub use provisioning::MissingPrerequisite;
pub use provisioning::ProjectSettings;
pub use provisioning::ProvisioningConfig;
pub use provisioning::ProvisioningOutcome;
pub use provisioning::ProvisioningState;
pub use provisioning::ProvisioningStatus;
pub use provisioning::RepositorySettings;
pub use provisioning::STANDARD_ENV_KEYS;
pub use provisioning::SequenceError;
pub use provisioning::Step;
pub use provisioning::StepOutcome;
pub use provisioning::StepResult;
pub use provisioning::StorageSettings;
pub use provisioning::compose_environment;
pub use provisioning::database_uri;
pub use provisioning::is_valid_env_key;
pub use schema::Constraint;
pub use schema::FieldRule;
pub use schema::FieldSchema;
pub use schema::ValueKind;
pub use schema::default_schemas;
pub use schema::json_schema;
pub use secret::REDACTED;
pub use secret::SecretString;
