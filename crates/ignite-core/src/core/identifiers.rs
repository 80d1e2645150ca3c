// crates/ignite-core/src/core/identifiers.rs
// ============================================================================
// Module: Ignite Identifiers
// Description: Opaque identifiers minted by the control plane and content store.
// Purpose: Keep remote identifiers and runtime names strongly typed.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! Identifiers returned by the control plane are opaque strings. Each kind gets
//! its own wrapper so a database service id can never be passed where an
//! application id is expected. Runtime names are kept apart from the names the
//! operator requested: the control plane appends a uniqueness suffix, and only
//! the runtime form is valid for service-to-service addressing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Opaque Identifiers
// ============================================================================

/// Declares a transparent string identifier with the usual conversions.
macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier from its string form.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

opaque_id!(
    /// Control-plane project identifier.
    ProjectId
);

opaque_id!(
    /// Control-plane environment identifier (scoped to a project).
    EnvironmentId
);

opaque_id!(
    /// Control-plane database service identifier.
    DatabaseServiceId
);

opaque_id!(
    /// Control-plane application service identifier.
    ApplicationId
);

opaque_id!(
    /// Runtime service name assigned to a database service.
    ///
    /// This is the suffixed name the control plane actually deployed, which is
    /// the only hostname other services can reach. Connection strings accept
    /// this type and never the requested name.
    DatabaseRuntimeName
);

opaque_id!(
    /// Runtime service name assigned to an application service.
    ApplicationRuntimeName
);

opaque_id!(
    /// Stable identifier of a content document.
    DocumentId
);

// ============================================================================
// SECTION: Collection Names
// ============================================================================

/// Maximum collection name length.
pub const MAX_COLLECTION_NAME_LENGTH: usize = 64;

/// Collection name validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionNameError {
    /// Collection name was empty.
    #[error("collection name must be non-empty")]
    Empty,
    /// Collection name exceeded the length limit.
    #[error("collection name exceeds {MAX_COLLECTION_NAME_LENGTH} characters")]
    TooLong,
    /// Collection name used characters outside `[a-z0-9_-]`.
    #[error("collection name {0:?} must use only lowercase letters, digits, '-' or '_'")]
    InvalidCharacter(String),
}

/// Content collection slug (for example `pages` or `media`).
///
/// # Invariants
/// - Non-empty, at most [`MAX_COLLECTION_NAME_LENGTH`] bytes, `[a-z0-9_-]` only.
///   Sources may therefore embed the name in a URL path or a quoted SQL
///   identifier without further escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionName(String);

impl CollectionName {
    /// Parses and validates a collection name.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionNameError`] when the name is empty, too long, or
    /// uses characters outside `[a-z0-9_-]`.
    pub fn parse(value: impl Into<String>) -> Result<Self, CollectionNameError> {
        let value = value.into();
        if value.is_empty() {
            return Err(CollectionNameError::Empty);
        }
        if value.len() > MAX_COLLECTION_NAME_LENGTH {
            return Err(CollectionNameError::TooLong);
        }
        let valid = value.bytes().all(|byte| {
            byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-' || byte == b'_'
        });
        if !valid {
            return Err(CollectionNameError::InvalidCharacter(value));
        }
        Ok(Self(value))
    }

    /// Returns the collection name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<String> for CollectionName {
    type Error = CollectionNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<CollectionName> for String {
    fn from(value: CollectionName) -> Self {
        value.0
    }
}
