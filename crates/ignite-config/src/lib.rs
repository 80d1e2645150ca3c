// crates/ignite-config/src/lib.rs
// ============================================================================
// Module: Ignite Config Library
// Description: Canonical config model, environment inputs, and examples.
// Purpose: Single source of truth for ignite.toml semantics.
// Dependencies: ignite-core, serde, toml, url
// ============================================================================

//! ## Overview
//! `ignite-config` defines the configuration model for provisioning runs and
//! schema audits. Validation is strict and fail-closed; secrets are resolved
//! from the environment only.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod env;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use env::ContentStoreCredentials;
pub use env::ControlPlaneCredentials;
pub use env::EnvSource;
pub use env::ProcessEnv;
pub use env::REQUIRED_SECRETS;
pub use examples::config_toml_example;
