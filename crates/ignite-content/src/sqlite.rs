// crates/ignite-content/src/sqlite.rs
// ============================================================================
// Module: SQLite Document Source
// Description: Direct read of a Payload SQLite content store.
// Purpose: Fetch whole collections as JSON documents for the auditor.
// Dependencies: ignite-core, rusqlite, serde_json
// ============================================================================

//! ## Overview
//! [`SqliteDocumentSource`] opens the content database read-only and reads a
//! collection with `SELECT * FROM "<collection>"`. Each row becomes a JSON
//! object keyed by column name. The read bypasses every access-control layer
//! of the CMS, so the auditor sees drafts and hidden documents too.
//! Security posture: database contents are untrusted and only decoded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use ignite_core::CollectionFetchError;
use ignite_core::CollectionName;
use ignite_core::Document;
use ignite_core::DocumentSource;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::params;
use rusqlite::types::ValueRef;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default busy timeout while another process holds a write lock.
const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Source
// ============================================================================

/// Read-only `SQLite` content store.
#[derive(Debug)]
pub struct SqliteDocumentSource {
    /// Database file path.
    path: PathBuf,
    /// Open read-only connection.
    connection: Connection,
}

impl SqliteDocumentSource {
    /// Opens an existing content database read-only.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionFetchError::Io`] when the path is unusable and
    /// [`CollectionFetchError::Db`] when `SQLite` refuses the file.
    pub fn open(path: &Path) -> Result<Self, CollectionFetchError> {
        if path.as_os_str().len() > MAX_TOTAL_PATH_LENGTH {
            return Err(CollectionFetchError::Io("content store path too long".to_string()));
        }
        if !path.is_file() {
            return Err(CollectionFetchError::Io(format!(
                "content store not found: {}",
                path.display()
            )));
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(path, flags).map_err(db_error)?;
        connection.busy_timeout(DEFAULT_BUSY_TIMEOUT).map_err(db_error)?;
        Ok(Self {
            path: path.to_path_buf(),
            connection,
        })
    }

    /// Returns the database file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true when a table or view named `collection` exists.
    fn has_table(&self, collection: &CollectionName) -> Result<bool, CollectionFetchError> {
        self.connection
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
                params![collection.as_str()],
                |_| Ok(()),
            )
            .optional()
            .map(|found| found.is_some())
            .map_err(db_error)
    }
}

impl DocumentSource for SqliteDocumentSource {
    fn fetch_all(
        &self,
        collection: &CollectionName,
    ) -> Result<Vec<Document>, CollectionFetchError> {
        if !self.has_table(collection)? {
            return Err(CollectionFetchError::InvalidCollection(collection.as_str().to_string()));
        }
        // Collection names are restricted to [a-z0-9_-], so quoting is enough.
        let sql = format!("SELECT * FROM \"{}\"", collection.as_str());
        let mut statement = self.connection.prepare(&sql).map_err(db_error)?;
        let columns: Vec<String> =
            statement.column_names().into_iter().map(str::to_string).collect();
        let mut rows = statement.query([]).map_err(db_error)?;
        let mut documents = Vec::new();
        while let Some(row) = rows.next().map_err(db_error)? {
            let mut body = Map::with_capacity(columns.len());
            for (index, column) in columns.iter().enumerate() {
                let value = row.get_ref(index).map_err(db_error)?;
                body.insert(column.clone(), column_value(column, value)?);
            }
            documents.push(Document::from_body(
                collection.clone(),
                documents.len(),
                Value::Object(body),
            ));
        }
        Ok(documents)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Maps a `SQLite` failure onto the fetch error.
#[allow(clippy::needless_pass_by_value, reason = "Used as a map_err adapter.")]
fn db_error(err: rusqlite::Error) -> CollectionFetchError {
    CollectionFetchError::Db(err.to_string())
}

/// Converts one column value into JSON.
fn column_value(column: &str, value: ValueRef<'_>) -> Result<Value, CollectionFetchError> {
    match value {
        ValueRef::Null => Ok(Value::Null),
        ValueRef::Integer(number) => Ok(Value::Number(Number::from(number))),
        ValueRef::Real(number) => Number::from_f64(number).map(Value::Number).ok_or_else(|| {
            CollectionFetchError::Decode(format!("column {column} holds a non-finite number"))
        }),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|text| Value::String(text.to_string()))
            .map_err(|_| CollectionFetchError::Decode(format!("column {column} is not utf-8"))),
        ValueRef::Blob(_) => {
            Err(CollectionFetchError::Decode(format!("column {column} holds binary data")))
        }
    }
}
