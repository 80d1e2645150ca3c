// crates/ignite-content/src/uri.rs
// ============================================================================
// Module: Content Store Selection
// Description: Maps a content-store URI onto a document source.
// Purpose: Let the auditor reach the store named by `DATABASE_URI`.
// Dependencies: ignite-core, mongodb, url
// ============================================================================

//! ## Overview
//! `mongodb://` and `mongodb+srv://` URIs connect straight to the document
//! database named in the URI path. `sqlite:` and `file:` URIs open a
//! database file directly. `http` and `https` URIs go through the Payload
//! REST API and need an API key. Every other scheme is rejected before any
//! I/O.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;

use ignite_core::CollectionFetchError;
use ignite_core::DocumentSource;
use ignite_core::SecretString;
use thiserror::Error;
use url::Url;

use crate::http::PayloadRestConfig;
use crate::http::PayloadRestError;
use crate::http::PayloadRestSource;
use crate::mongo::MongoDocumentSource;
use crate::sqlite::SqliteDocumentSource;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Parsed content-store location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentStore {
    /// `MongoDB` deployment and content database.
    Mongo {
        /// Full connection URI, credentials included.
        uri: SecretString,
        /// Database named in the URI path.
        database: String,
    },
    /// Local `SQLite` database file.
    Sqlite(PathBuf),
    /// Payload CMS base URL.
    PayloadRest(Url),
}

/// Content-store selection errors.
#[derive(Debug, Error)]
pub enum ContentStoreError {
    /// URI was empty or malformed.
    #[error("invalid content store uri: {0}")]
    InvalidUri(String),
    /// URI scheme has no document source.
    #[error("unsupported content store scheme: {0}")]
    UnsupportedScheme(String),
    /// REST source requested without an API key.
    #[error("content store api key is required for {0}")]
    MissingApiKey(String),
    /// REST client could not be built.
    #[error(transparent)]
    Rest(#[from] PayloadRestError),
    /// Database could not be opened.
    #[error(transparent)]
    Open(#[from] CollectionFetchError),
}

impl ContentStore {
    /// Parses a content-store URI.
    ///
    /// # Errors
    ///
    /// Returns [`ContentStoreError`] for empty, malformed, or unsupported URIs.
    pub fn parse(uri: &str) -> Result<Self, ContentStoreError> {
        let uri = uri.trim();
        for prefix in ["sqlite://", "sqlite:", "file://", "file:"] {
            if let Some(path) = uri.strip_prefix(prefix) {
                let path = path.split('?').next().unwrap_or_default();
                if path.is_empty() {
                    return Err(ContentStoreError::InvalidUri("missing database path".to_string()));
                }
                return Ok(Self::Sqlite(PathBuf::from(path)));
            }
        }
        let url = Url::parse(uri).map_err(|err| ContentStoreError::InvalidUri(err.to_string()))?;
        match url.scheme() {
            "mongodb" | "mongodb+srv" => {
                let database = url.path().trim_start_matches('/');
                if database.is_empty() {
                    return Err(ContentStoreError::InvalidUri("missing database name".to_string()));
                }
                Ok(Self::Mongo {
                    database: database.to_string(),
                    uri: SecretString::new(uri),
                })
            }
            "http" | "https" => Ok(Self::PayloadRest(url)),
            scheme => Err(ContentStoreError::UnsupportedScheme(scheme.to_string())),
        }
    }

    /// Opens the document source for this location.
    ///
    /// # Errors
    ///
    /// Returns [`ContentStoreError`] when the source cannot be opened or a
    /// REST source has no API key.
    pub fn open(
        &self,
        api_key: Option<SecretString>,
    ) -> Result<Box<dyn DocumentSource>, ContentStoreError> {
        match self {
            Self::Mongo {
                uri,
                database,
            } => Ok(Box::new(MongoDocumentSource::connect(uri, database)?)),
            Self::Sqlite(path) => Ok(Box::new(SqliteDocumentSource::open(path)?)),
            Self::PayloadRest(url) => {
                let api_key = api_key
                    .filter(|key| !key.is_blank())
                    .ok_or_else(|| ContentStoreError::MissingApiKey(url.to_string()))?;
                let config = PayloadRestConfig::new(url.as_str(), api_key);
                Ok(Box::new(PayloadRestSource::new(config)?))
            }
        }
    }
}

/// Parses `uri` and opens its document source.
///
/// # Errors
///
/// Returns [`ContentStoreError`] when the URI is unsupported or the source
/// cannot be opened.
pub fn open_source(
    uri: &str,
    api_key: Option<SecretString>,
) -> Result<Box<dyn DocumentSource>, ContentStoreError> {
    ContentStore::parse(uri)?.open(api_key)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
