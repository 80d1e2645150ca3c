// crates/ignite-core/src/runtime/auditor.rs
// ============================================================================
// Module: Schema Compliance Auditor
// Description: Collection-by-collection validation of live content.
// Purpose: Produce the audit report that gates promotion to production.
// Dependencies: crate::{core, interfaces, runtime::validation}
// ============================================================================

//! ## Overview
//! The auditor walks schemas in order, fetches each collection in full, and
//! validates every document. A fetch failure is recorded on that collection's
//! summary and the walk continues; whether it fails the gate is decided by
//! the [`FetchFailurePolicy`] carried in the report.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::audit::AuditFailure;
use crate::core::audit::AuditReport;
use crate::core::audit::CollectionSummary;
use crate::core::audit::FetchFailurePolicy;
use crate::core::events::AuditEvent;
use crate::core::schema::FieldSchema;
use crate::interfaces::DocumentSource;
use crate::interfaces::EventSink;
use crate::runtime::validation::validate_document;

// ============================================================================
// SECTION: Auditor
// ============================================================================

/// Schema auditor over a document source.
pub struct Auditor<'a> {
    /// Live document source.
    source: &'a dyn DocumentSource,
    /// Event sink.
    sink: &'a dyn EventSink,
    /// Treatment of unreadable collections.
    policy: FetchFailurePolicy,
}

impl<'a> Auditor<'a> {
    /// Creates an auditor.
    #[must_use]
    pub fn new(
        source: &'a dyn DocumentSource,
        sink: &'a dyn EventSink,
        policy: FetchFailurePolicy,
    ) -> Self {
        Self {
            source,
            sink,
            policy,
        }
    }

    /// Audits every schema's collection and returns the report.
    #[must_use]
    pub fn run(&self, schemas: &[FieldSchema]) -> AuditReport {
        let mut failures = Vec::new();
        let mut collections = Vec::with_capacity(schemas.len());
        for schema in schemas {
            let collection = schema.collection.clone();
            let documents = match self.source.fetch_all(&collection) {
                Ok(documents) => documents,
                Err(err) => {
                    let error = err.to_string();
                    self.sink
                        .record_audit(&AuditEvent::fetch_failed(collection.clone(), error.clone()));
                    collections.push(CollectionSummary {
                        collection,
                        checked: 0,
                        failed: 0,
                        fetch_error: Some(error),
                    });
                    continue;
                }
            };
            let mut failed = 0;
            for document in &documents {
                let errors = validate_document(schema, document);
                if errors.is_empty() {
                    continue;
                }
                failed += 1;
                self.sink.record_audit(&AuditEvent::document_failed(
                    collection.clone(),
                    document.id.to_string(),
                    errors.clone(),
                ));
                failures.push(AuditFailure {
                    collection: collection.clone(),
                    document_id: document.id.clone(),
                    errors,
                });
            }
            self.sink.record_audit(&AuditEvent::collection_checked(
                collection.clone(),
                documents.len(),
                failed,
            ));
            collections.push(CollectionSummary {
                collection,
                checked: documents.len(),
                failed,
                fetch_error: None,
            });
        }
        AuditReport {
            failures,
            collections,
            fetch_failure: self.policy,
        }
    }
}
