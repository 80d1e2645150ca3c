// crates/ignite-core/src/interfaces/mod.rs
// ============================================================================
// Module: Ignite Interfaces
// Description: Backend-agnostic seams for the control plane, content store, events, and time.
// Purpose: Define the contract surfaces used by the sequencer and auditor runtimes.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! Runtimes depend only on these traits. The Dokploy client and the content
//! sources live in their own crates; tests substitute recording doubles.
//! Implementations must report every failure as an error value and never
//! retry on their own.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use thiserror::Error;

use crate::core::audit::Document;
use crate::core::control_plane::BindSourceRequest;
use crate::core::control_plane::CreateApplicationRequest;
use crate::core::control_plane::CreateDatabaseRequest;
use crate::core::control_plane::CreateProjectRequest;
use crate::core::control_plane::CreatedApplication;
use crate::core::control_plane::CreatedDatabase;
use crate::core::control_plane::CreatedProject;
use crate::core::control_plane::DatabaseStatus;
use crate::core::control_plane::RemoteApiError;
use crate::core::control_plane::SetBuildStrategyRequest;
use crate::core::control_plane::SetEnvironmentRequest;
use crate::core::events::AuditEvent;
use crate::core::events::StepEvent;
use crate::core::identifiers::ApplicationId;
use crate::core::identifiers::CollectionName;
use crate::core::identifiers::DatabaseServiceId;
use crate::core::identifiers::ProjectId;

// ============================================================================
// SECTION: Control Plane
// ============================================================================

/// Remote container control plane.
///
/// Each method maps to exactly one remote call.
pub trait ControlPlane {
    /// Creates a project and its default environment.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] when the call fails or the response lacks
    /// the project or environment identifier.
    fn create_project(&self, request: &CreateProjectRequest)
    -> Result<CreatedProject, RemoteApiError>;

    /// Creates a database service.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] when the call fails or the response lacks
    /// the service identifier or runtime name.
    fn create_database_service(
        &self,
        request: &CreateDatabaseRequest,
    ) -> Result<CreatedDatabase, RemoteApiError>;

    /// Triggers deployment of a database service.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] when the call fails.
    fn deploy_database_service(&self, database_id: &DatabaseServiceId)
    -> Result<(), RemoteApiError>;

    /// Reads the status of a database service.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] when the call fails.
    fn database_service_status(
        &self,
        database_id: &DatabaseServiceId,
    ) -> Result<DatabaseStatus, RemoteApiError>;

    /// Creates an application service.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] when the call fails or the response lacks
    /// the application identifier.
    fn create_application_service(
        &self,
        request: &CreateApplicationRequest,
    ) -> Result<CreatedApplication, RemoteApiError>;

    /// Binds a source repository to an application.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] when the call fails.
    fn bind_source_repository(&self, request: &BindSourceRequest) -> Result<(), RemoteApiError>;

    /// Selects the application build strategy.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] when the call fails.
    fn set_build_strategy(&self, request: &SetBuildStrategyRequest) -> Result<(), RemoteApiError>;

    /// Replaces the application environment.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] when the call fails.
    fn set_environment(&self, request: &SetEnvironmentRequest) -> Result<(), RemoteApiError>;

    /// Triggers deployment of an application service.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] when the call fails.
    fn deploy_application_service(
        &self,
        application_id: &ApplicationId,
    ) -> Result<(), RemoteApiError>;

    /// Deletes a project and every service inside it.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteApiError`] when the call fails.
    fn delete_project(&self, project_id: &ProjectId) -> Result<(), RemoteApiError>;
}

// ============================================================================
// SECTION: Document Source
// ============================================================================

/// Collection fetch errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionFetchError {
    /// Local I/O failed.
    #[error("content store io error: {0}")]
    Io(String),
    /// Database query failed.
    #[error("content store query error: {0}")]
    Db(String),
    /// HTTP request failed.
    #[error("content store http error: {0}")]
    Http(String),
    /// Response or row could not be decoded.
    #[error("content store decode error: {0}")]
    Decode(String),
    /// The source returned fewer documents than the collection holds.
    #[error("incomplete collection read: {0}")]
    Incomplete(String),
    /// The collection does not exist in the source.
    #[error("unknown collection: {0}")]
    InvalidCollection(String),
}

/// Read-only source of live content documents.
pub trait DocumentSource {
    /// Returns every document in `collection` in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionFetchError`] when the collection cannot be read in
    /// full.
    fn fetch_all(
        &self,
        collection: &CollectionName,
    ) -> Result<Vec<Document>, CollectionFetchError>;
}

// ============================================================================
// SECTION: Event Sink
// ============================================================================

/// Sink for structured provisioning and audit events.
pub trait EventSink {
    /// Record a provisioning step event.
    fn record_step(&self, _event: &StepEvent) {}

    /// Record a schema audit event.
    fn record_audit(&self, _event: &AuditEvent) {}
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn record_step(&self, event: &StepEvent) {
        (**self).record_step(event);
    }

    fn record_audit(&self, event: &AuditEvent) {
        (**self).record_audit(event);
    }
}

// ============================================================================
// SECTION: Sleeper
// ============================================================================

/// Blocking wait primitive used by the settle policy.
pub trait Sleeper {
    /// Blocks for `duration`.
    fn sleep(&self, duration: Duration);
}

/// Sleeper backed by [`std::thread::sleep`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
