// crates/ignite-cli/src/progress.rs
// ============================================================================
// Module: Console Progress
// Description: Event sink that prints live progress lines.
// Purpose: Show each step and collection as it finishes.
// Dependencies: ignite-core
// ============================================================================

//! ## Overview
//! [`ConsoleProgress`] renders step and audit events through
//! [`crate::report`] and writes them to any [`Write`] target. Write errors
//! are ignored; progress output never aborts a run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Mutex;
use std::sync::PoisonError;

use ignite_core::AuditEvent;
use ignite_core::EventSink;
use ignite_core::StepEvent;

use crate::report::render_audit_event;
use crate::report::render_step_event;

// ============================================================================
// SECTION: Sink
// ============================================================================

/// Event sink writing localized progress lines.
pub struct ConsoleProgress<W> {
    /// Output target.
    out: Mutex<W>,
}

impl<W: Write> ConsoleProgress<W> {
    /// Creates a progress sink writing to `out`.
    pub const fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Returns the output target.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Writes `lines` and flushes.
    fn write_lines<I>(&self, lines: I)
    where
        I: IntoIterator<Item = String>,
    {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        for line in lines {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }
}

impl<W: Write> EventSink for ConsoleProgress<W> {
    fn record_step(&self, event: &StepEvent) {
        self.write_lines(render_step_event(event));
    }

    fn record_audit(&self, event: &AuditEvent) {
        self.write_lines(render_audit_event(event));
    }
}
