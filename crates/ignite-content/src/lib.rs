// crates/ignite-content/src/lib.rs
// ============================================================================
// Module: Ignite Content Library
// Description: Document sources for the schema compliance auditor.
// Purpose: Read live CMS collections from MongoDB, SQLite, or the Payload REST API.
// Dependencies: ignite-core, mongodb, reqwest, rusqlite, url
// ============================================================================

//! ## Overview
//! Implementations of [`ignite_core::DocumentSource`]. Each source reads a
//! whole collection in one pass and reports anything short of that as a
//! [`ignite_core::CollectionFetchError`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod http;
pub mod mongo;
pub mod sqlite;
pub mod uri;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use http::PayloadRestConfig;
pub use http::PayloadRestError;
pub use http::PayloadRestSource;
pub use mongo::MongoDocumentSource;
pub use sqlite::SqliteDocumentSource;
pub use uri::ContentStore;
pub use uri::ContentStoreError;
pub use uri::open_source;
