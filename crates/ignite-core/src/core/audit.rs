// crates/ignite-core/src/core/audit.rs
// ============================================================================
// Module: Audit Model
// Description: Documents, failures, and reports produced by the schema auditor.
// Purpose: Carry audit results from the runtime to reporting surfaces.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The auditor turns every fetched [`Document`] into either nothing (it
//! conforms) or exactly one [`AuditFailure`] listing every violation. The
//! [`AuditReport`] is the sole input of the promotion gate: it passes only
//! when no document failed and, under [`FetchFailurePolicy::Fail`], every
//! collection was read.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::identifiers::CollectionName;
use crate::core::identifiers::DocumentId;

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Live content document as read from the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Collection the document belongs to.
    pub collection: CollectionName,
    /// Stable identifier (string form of the `id` field).
    pub id: DocumentId,
    /// Raw document body.
    pub body: Value,
}

impl Document {
    /// Builds a document from a raw body, deriving the id from its `id` field.
    ///
    /// Integer and string ids are both accepted; a body without an id gets
    /// the placeholder `<row N>` built from `index`.
    #[must_use]
    pub fn from_body(collection: CollectionName, index: usize, body: Value) -> Self {
        let id = match body.get("id") {
            Some(Value::String(id)) => DocumentId::new(id.clone()),
            Some(Value::Number(id)) => DocumentId::new(id.to_string()),
            _ => DocumentId::new(format!("<row {index}>")),
        };
        Self {
            collection,
            id,
            body,
        }
    }
}

// ============================================================================
// SECTION: Failures
// ============================================================================

/// One non-conforming document with every violation found.
///
/// # Invariants
/// - `errors` is non-empty and formatted `"<dotted.path>: <message>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditFailure {
    /// Collection the document belongs to.
    pub collection: CollectionName,
    /// Failing document identifier.
    pub document_id: DocumentId,
    /// Violation messages in schema order.
    pub errors: Vec<String>,
}

impl AuditFailure {
    /// Returns the `collection/id` label used in reports.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.collection, self.document_id)
    }
}

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Treatment of collections that could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchFailurePolicy {
    /// An unreadable collection fails the audit.
    #[default]
    Fail,
    /// An unreadable collection is reported but does not fail the audit.
    Warn,
}

impl FetchFailurePolicy {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Warn => "warn",
        }
    }
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Per-collection audit summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    /// Collection audited.
    pub collection: CollectionName,
    /// Documents validated.
    pub checked: usize,
    /// Documents that failed validation.
    pub failed: usize,
    /// Fetch error when the collection could not be read.
    pub fetch_error: Option<String>,
}

/// Result of auditing every configured collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    /// Non-conforming documents in collection order.
    pub failures: Vec<AuditFailure>,
    /// Summaries in collection order.
    pub collections: Vec<CollectionSummary>,
    /// Fetch failure policy in effect.
    pub fetch_failure: FetchFailurePolicy,
}

impl AuditReport {
    /// Returns true when the promotion gate is open.
    #[must_use]
    pub fn passed(&self) -> bool {
        if !self.failures.is_empty() {
            return false;
        }
        match self.fetch_failure {
            FetchFailurePolicy::Fail => self.fetch_errors().next().is_none(),
            FetchFailurePolicy::Warn => true,
        }
    }

    /// Returns the summaries of collections that could not be fetched.
    pub fn fetch_errors(&self) -> impl Iterator<Item = &CollectionSummary> {
        self.collections.iter().filter(|summary| summary.fetch_error.is_some())
    }

    /// Returns the total number of documents validated.
    #[must_use]
    pub fn documents_checked(&self) -> usize {
        self.collections.iter().map(|summary| summary.checked).sum()
    }
}
