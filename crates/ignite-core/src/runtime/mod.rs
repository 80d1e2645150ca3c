// crates/ignite-core/src/runtime/mod.rs
// ============================================================================
// Module: Ignite Runtime
// Description: Provisioning sequencer, schema auditor, and event sinks.
// Purpose: Execute Ignite workflows against the interfaces in `crate::interfaces`.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Both workflows are single-threaded and sequential. Every CLI surface must
//! call into these runtimes so that ordering and gate semantics stay in one
//! place.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod auditor;
pub mod sequencer;
pub mod sinks;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use auditor::Auditor;
pub use sequencer::DEFAULT_INITIAL_SETTLE;
pub use sequencer::DEFAULT_MAX_POLLS;
pub use sequencer::DEFAULT_POLL_INTERVAL;
pub use sequencer::PlannedStep;
pub use sequencer::ProvisioningPlan;
pub use sequencer::Sequencer;
pub use sequencer::SettlePolicy;
pub use sequencer::plan;
pub use sequencer::step_operations;
pub use sinks::FanoutEventSink;
pub use sinks::FileEventSink;
pub use sinks::NoopEventSink;
pub use sinks::StderrEventSink;
pub use validation::REQUIRED_MESSAGE;
pub use validation::validate_document;
