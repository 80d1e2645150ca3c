// crates/ignite-core/src/lib.rs
// ============================================================================
// Module: Ignite Core Library
// Description: Public API surface for the Ignite core.
// Purpose: Expose core types, interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Ignite core holds the provisioning sequencer and the schema compliance
//! auditor for a headless CMS deployment. It is backend-agnostic: the control
//! plane and the content store are reached only through the traits in
//! [`interfaces`].

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::CollectionFetchError;
pub use interfaces::ControlPlane;
pub use interfaces::DocumentSource;
pub use interfaces::EventSink;
pub use interfaces::Sleeper;
pub use interfaces::ThreadSleeper;
pub use runtime::Auditor;
pub use runtime::FanoutEventSink;
pub use runtime::FileEventSink;
pub use runtime::NoopEventSink;
pub use runtime::PlannedStep;
pub use runtime::ProvisioningPlan;
pub use runtime::Sequencer;
pub use runtime::SettlePolicy;
pub use runtime::StderrEventSink;
pub use runtime::validate_document;
