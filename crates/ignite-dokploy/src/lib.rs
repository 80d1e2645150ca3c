// crates/ignite-dokploy/src/lib.rs
// ============================================================================
// Module: Ignite Dokploy Library
// Description: Dokploy implementation of the Ignite control-plane interface.
// Purpose: Expose the blocking Dokploy client and its configuration.
// Dependencies: ignite-core, reqwest
// ============================================================================

//! ## Overview
//! This crate maps each [`ignite_core::ControlPlane`] operation onto one
//! Dokploy API procedure. It performs no retries and no waiting; ordering and
//! settle behavior belong to the sequencer.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod wire;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::API_KEY_HEADER;
pub use client::DEFAULT_MAX_RESPONSE_BYTES;
pub use client::DEFAULT_TIMEOUT;
pub use client::DokployClient;
pub use client::DokployClientError;
pub use client::DokployConfig;
