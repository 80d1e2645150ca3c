// crates/ignite-content/src/mongo.rs
// ============================================================================
// Module: MongoDB Document Source
// Description: Direct read of a Payload MongoDB content store.
// Purpose: Fetch whole collections as JSON documents for the auditor.
// Dependencies: ignite-core, mongodb, serde_json
// ============================================================================

//! ## Overview
//! [`MongoDocumentSource`] connects with the same `mongodb://` or
//! `mongodb+srv://` URI the deployed CMS uses and reads each collection with
//! an unfiltered, unlimited `find({})`. Like the `SQLite` source, the read
//! bypasses every access-control layer of the CMS.
//!
//! BSON is mapped onto the JSON shape the CMS API would expose: `ObjectId`
//! values become their hex string, dates become RFC 3339 strings, and
//! `_id` is surfaced as `id` when the document has no `id` of its own.
//! Security posture: database contents are untrusted and only decoded.

// ============================================================================
// SECTION: Imports
// ============================================================================

use ignite_core::CollectionFetchError;
use ignite_core::CollectionName;
use ignite_core::Document;
use ignite_core::DocumentSource;
use ignite_core::SecretString;
use mongodb::bson;
use mongodb::bson::Bson;
use mongodb::sync::Client;
use mongodb::sync::Database;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;

// ============================================================================
// SECTION: Source
// ============================================================================

/// `MongoDB` content store reached through the driver's blocking API.
#[derive(Debug)]
pub struct MongoDocumentSource {
    /// Content database.
    database: Database,
}

impl MongoDocumentSource {
    /// Builds a client for `uri` and selects `database`.
    ///
    /// No connection is made until the first fetch; `mongodb+srv` URIs are
    /// resolved here.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionFetchError::Db`] when the driver rejects the URI.
    pub fn connect(uri: &SecretString, database: &str) -> Result<Self, CollectionFetchError> {
        let client = Client::with_uri_str(uri.expose()).map_err(db_error)?;
        Ok(Self {
            database: client.database(database),
        })
    }

    /// Returns the content database name.
    #[must_use]
    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Returns true when `collection` exists in the content database.
    fn has_collection(&self, collection: &CollectionName) -> Result<bool, CollectionFetchError> {
        let names = self.database.list_collection_names().run().map_err(db_error)?;
        Ok(names.iter().any(|name| name == collection.as_str()))
    }
}

impl DocumentSource for MongoDocumentSource {
    fn fetch_all(
        &self,
        collection: &CollectionName,
    ) -> Result<Vec<Document>, CollectionFetchError> {
        if !self.has_collection(collection)? {
            return Err(CollectionFetchError::InvalidCollection(collection.as_str().to_string()));
        }
        let cursor = self
            .database
            .collection::<bson::Document>(collection.as_str())
            .find(bson::doc! {})
            .run()
            .map_err(db_error)?;
        let mut documents = Vec::new();
        for raw in cursor {
            let body = document_body(raw.map_err(db_error)?)?;
            documents.push(Document::from_body(collection.clone(), documents.len(), body));
        }
        Ok(documents)
    }
}

// ============================================================================
// SECTION: Conversion
// ============================================================================

/// Maps a driver failure onto the fetch error.
#[allow(clippy::needless_pass_by_value, reason = "Used as a map_err adapter.")]
fn db_error(err: mongodb::error::Error) -> CollectionFetchError {
    CollectionFetchError::Db(err.to_string())
}

/// Converts a stored document into the JSON body the auditor validates.
///
/// # Errors
///
/// Returns [`CollectionFetchError::Decode`] for values JSON cannot carry.
pub fn document_body(document: bson::Document) -> Result<Value, CollectionFetchError> {
    let mut body = Map::with_capacity(document.len());
    for (key, value) in document {
        body.insert(key, bson_value(value)?);
    }
    if !body.contains_key("id")
        && let Some(id) = body.remove("_id")
    {
        body.insert("id".to_string(), id);
    }
    Ok(Value::Object(body))
}

/// Converts one BSON value into JSON.
fn bson_value(value: Bson) -> Result<Value, CollectionFetchError> {
    Ok(match value {
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Boolean(flag) => Value::Bool(flag),
        Bson::String(text) | Bson::Symbol(text) => Value::String(text),
        Bson::Int32(number) => Value::Number(Number::from(number)),
        Bson::Int64(number) => Value::Number(Number::from(number)),
        Bson::Double(number) => Number::from_f64(number).map(Value::Number).ok_or_else(|| {
            CollectionFetchError::Decode("document holds a non-finite number".to_string())
        })?,
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(date) => Value::String(
            date.try_to_rfc3339_string()
                .map_err(|err| CollectionFetchError::Decode(format!("invalid date: {err}")))?,
        ),
        Bson::Array(items) => {
            Value::Array(items.into_iter().map(bson_value).collect::<Result<_, _>>()?)
        }
        Bson::Document(nested) => {
            let mut object = Map::with_capacity(nested.len());
            for (key, value) in nested {
                object.insert(key, bson_value(value)?);
            }
            Value::Object(object)
        }
        other => other.into_relaxed_extjson(),
    })
}

// ============================================================================
// SECTION: Tests
// ============================================================================
