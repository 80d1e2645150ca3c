// crates/ignite-core/src/core/secret.rs
// ============================================================================
// Module: Ignite Secrets
// Description: Redacting wrapper for secret configuration values.
// Purpose: Keep credentials out of logs, reports, and debug output.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! [`SecretString`] holds credentials loaded from the process environment.
//! Formatting never reveals the value; callers must use
//! [`SecretString::expose`] at the exact point where the secret is sent to the
//! control plane.

use std::fmt;

/// Placeholder rendered instead of secret values.
pub const REDACTED: &str = "<redacted>";

/// Secret string value with redacted formatting.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Wraps a secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the raw secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true when the secret is empty or whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
