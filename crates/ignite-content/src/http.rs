// crates/ignite-content/src/http.rs
// ============================================================================
// Module: Payload REST Document Source
// Description: Whole-collection reads through the Payload REST API.
// Purpose: Fetch live documents when the content store is behind the CMS.
// Dependencies: ignite-core, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! [`PayloadRestSource`] requests `<base>/api/<collection>` with pagination
//! disabled and depth zero, authenticating with a Payload API key. The
//! response must be Payload's collection envelope. A read that reports more
//! documents than it returned is an incomplete fetch, never a partial pass.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use ignite_core::CollectionFetchError;
use ignite_core::CollectionName;
use ignite_core::Document;
use ignite_core::DocumentSource;
use ignite_core::SecretString;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::ACCEPT;
use reqwest::header::AUTHORIZATION;
use reqwest::redirect::Policy;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default response size limit; a whole collection arrives in one body.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 64 * 1024 * 1024;
/// Users collection slug used in the API-key authorization scheme.
const API_KEY_COLLECTION: &str = "users";

/// Payload REST source configuration.
#[derive(Debug, Clone)]
pub struct PayloadRestConfig {
    /// CMS base URL (without the `/api` suffix).
    pub base_url: String,
    /// API key of a user allowed to read every collection.
    pub api_key: SecretString,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum response size allowed, in bytes.
    pub max_response_bytes: usize,
}

impl PayloadRestConfig {
    /// Creates a configuration with default limits.
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            timeout: DEFAULT_TIMEOUT,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

/// REST source construction errors.
#[derive(Debug, Error)]
pub enum PayloadRestError {
    /// Base URL was not an absolute http(s) URL.
    #[error("invalid content store url: {0}")]
    InvalidUrl(String),
    /// HTTP client could not be built.
    #[error("http client build failed: {0}")]
    Client(String),
}

// ============================================================================
// SECTION: Envelope
// ============================================================================

/// Payload collection listing envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionEnvelope {
    /// Documents in this response.
    docs: Vec<Value>,
    /// Documents in the whole collection.
    total_docs: Option<u64>,
    /// True when another page exists.
    #[serde(default)]
    has_next_page: bool,
}

// ============================================================================
// SECTION: Source
// ============================================================================

/// Payload REST content source.
#[derive(Debug)]
pub struct PayloadRestSource {
    /// API base (`<base_url>/api`), without a trailing slash.
    api_base: String,
    /// API key.
    api_key: SecretString,
    /// Maximum response size allowed, in bytes.
    max_response_bytes: usize,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl PayloadRestSource {
    /// Builds a REST source.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadRestError`] when the base URL is not http(s) or the
    /// HTTP client cannot be constructed.
    pub fn new(config: PayloadRestConfig) -> Result<Self, PayloadRestError> {
        let base = Url::parse(config.base_url.trim())
            .map_err(|err| PayloadRestError::InvalidUrl(err.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(PayloadRestError::InvalidUrl(format!(
                "unsupported scheme {}",
                base.scheme()
            )));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .redirect(Policy::none())
            .build()
            .map_err(|err| PayloadRestError::Client(err.to_string()))?;
        Ok(Self {
            api_base: format!("{}/api", base.as_str().trim_end_matches('/')),
            api_key: config.api_key,
            max_response_bytes: config.max_response_bytes,
            client,
        })
    }

    /// Returns the API base URL.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Builds the single-pass listing URL for a collection.
    fn collection_url(&self, collection: &CollectionName) -> Result<Url, CollectionFetchError> {
        let mut url = Url::parse(&format!("{}/{}", self.api_base, collection.as_str()))
            .map_err(|err| CollectionFetchError::Http(format!("invalid url: {err}")))?;
        url.query_pairs_mut()
            .append_pair("limit", "0")
            .append_pair("pagination", "false")
            .append_pair("depth", "0");
        Ok(url)
    }
}

impl DocumentSource for PayloadRestSource {
    fn fetch_all(
        &self,
        collection: &CollectionName,
    ) -> Result<Vec<Document>, CollectionFetchError> {
        let url = self.collection_url(collection)?;
        let authorization = format!("{API_KEY_COLLECTION} API-Key {}", self.api_key.expose());
        let mut response = self
            .client
            .get(url)
            .header(AUTHORIZATION, authorization)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|err| CollectionFetchError::Http(err.to_string()))?;
        let status = response.status();
        let bytes = read_response_limited(&mut response, self.max_response_bytes)?;
        if status.as_u16() == 404 {
            return Err(CollectionFetchError::InvalidCollection(collection.as_str().to_string()));
        }
        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .as_ref()
                .and_then(error_message)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "request failed".to_string());
            return Err(CollectionFetchError::Http(format!(
                "status {}: {message}",
                status.as_u16()
            )));
        }
        let envelope: CollectionEnvelope = serde_json::from_slice(&bytes)
            .map_err(|err| CollectionFetchError::Decode(err.to_string()))?;
        if envelope.has_next_page {
            return Err(CollectionFetchError::Incomplete(format!(
                "{} reported another page",
                collection.as_str()
            )));
        }
        if let Some(total) = envelope.total_docs {
            let returned = u64::try_from(envelope.docs.len()).unwrap_or(u64::MAX);
            if returned < total {
                return Err(CollectionFetchError::Incomplete(format!(
                    "{} returned {returned} of {total} documents",
                    collection.as_str()
                )));
            }
        }
        Ok(envelope
            .docs
            .into_iter()
            .enumerate()
            .map(|(index, body)| Document::from_body(collection.clone(), index, body))
            .collect())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Extracts the first message of a Payload error body.
fn error_message(body: &Value) -> Option<String> {
    body.pointer("/errors/0/message")
        .or_else(|| body.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(
    response: &mut Response,
    max_bytes: usize,
) -> Result<Vec<u8>, CollectionFetchError> {
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| CollectionFetchError::Http("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err(CollectionFetchError::Http("response exceeds size limit".to_string()));
    }
    let mut buf = Vec::new();
    let mut handle = response.take(max_bytes_u64.saturating_add(1));
    handle
        .read_to_end(&mut buf)
        .map_err(|err| CollectionFetchError::Http(format!("read failed: {err}")))?;
    if buf.len() > max_bytes {
        return Err(CollectionFetchError::Http("response exceeds size limit".to_string()));
    }
    Ok(buf)
}
