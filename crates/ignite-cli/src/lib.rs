// crates/ignite-cli/src/lib.rs
// ============================================================================
// Module: Ignite CLI Library
// Description: Shared helpers for the Ignite command-line interface.
// Purpose: Provide the message catalog, report rendering, and progress output.
// Dependencies: ignite-core
// ============================================================================

//! ## Overview
//! The binary entry point (`src/main.rs`) routes all operator-facing output
//! through these helpers so rendering can be tested without a process.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
/// Live progress output for provisioning and audit runs.
pub mod progress;
/// Terminal reports for provisioning and audit runs.
pub mod report;
