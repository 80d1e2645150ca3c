// crates/ignite-core/src/core/events.rs
// ============================================================================
// Module: Ignite Events
// Description: Structured event payloads emitted by the sequencer and auditor.
// Purpose: Give sinks a stable, redacted record of what happened.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Events are flat JSON records with an `event` label and a millisecond
//! timestamp. They never carry secret values: step outputs hold identifiers
//! and runtime names only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::identifiers::CollectionName;
use crate::core::provisioning::Step;

/// Milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Step Events
// ============================================================================

/// Lifecycle phase of a provisioning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepPhase {
    /// Step is about to issue its first call.
    Started,
    /// Step finished successfully.
    Completed,
    /// Step finished with a non-fatal warning.
    Warning,
    /// Step failed and the run aborted.
    Failed,
}

/// Provisioning step event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Step the event refers to.
    pub step: Step,
    /// One-based step number.
    pub number: usize,
    /// Step phase.
    pub phase: StepPhase,
    /// Captured outputs (completed phase only).
    pub outputs: Vec<(String, String)>,
    /// Warning or error message.
    pub message: Option<String>,
}

impl StepEvent {
    /// Creates a step event with a consistent timestamp.
    #[must_use]
    pub fn new(step: Step, phase: StepPhase) -> Self {
        Self {
            event: "provision_step",
            timestamp_ms: now_ms(),
            step,
            number: step.number(),
            phase,
            outputs: Vec::new(),
            message: None,
        }
    }

    /// Attaches captured outputs.
    #[must_use]
    pub fn with_outputs(mut self, outputs: Vec<(String, String)>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Attaches a message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

// ============================================================================
// SECTION: Audit Events
// ============================================================================

/// Kind of audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventKind {
    /// Collection read and validated.
    CollectionChecked,
    /// Collection could not be read.
    FetchFailed,
    /// Document failed validation.
    DocumentFailed,
}

/// Schema audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Event kind.
    pub kind: AuditEventKind,
    /// Collection the event refers to.
    pub collection: CollectionName,
    /// Document identifier (document events only).
    pub document_id: Option<String>,
    /// Documents checked (collection events only).
    pub checked: Option<usize>,
    /// Documents that failed validation (collection events only).
    pub failed: Option<usize>,
    /// Violations or fetch error detail.
    pub details: Vec<String>,
}

impl AuditEvent {
    /// Creates an audit event with a consistent timestamp.
    #[must_use]
    pub fn new(kind: AuditEventKind, collection: CollectionName) -> Self {
        Self {
            event: "schema_audit",
            timestamp_ms: now_ms(),
            kind,
            collection,
            document_id: None,
            checked: None,
            failed: None,
            details: Vec::new(),
        }
    }

    /// Event for a collection that was read and validated.
    #[must_use]
    pub fn collection_checked(collection: CollectionName, checked: usize, failed: usize) -> Self {
        let mut event = Self::new(AuditEventKind::CollectionChecked, collection);
        event.checked = Some(checked);
        event.failed = Some(failed);
        event
    }

    /// Event for a collection that could not be read.
    #[must_use]
    pub fn fetch_failed(collection: CollectionName, error: String) -> Self {
        let mut event = Self::new(AuditEventKind::FetchFailed, collection);
        event.details = vec![error];
        event
    }

    /// Event for a document that failed validation.
    #[must_use]
    pub fn document_failed(
        collection: CollectionName,
        document_id: String,
        errors: Vec<String>,
    ) -> Self {
        let mut event = Self::new(AuditEventKind::DocumentFailed, collection);
        event.document_id = Some(document_id);
        event.details = errors;
        event
    }
}
