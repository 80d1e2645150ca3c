// crates/ignite-core/src/runtime/sinks.rs
// ============================================================================
// Module: Event Sinks
// Description: JSON-line event sinks for provisioning and audit runs.
// Purpose: Emit structured events without a hard logging dependency.
// Dependencies: crate::{core, interfaces}, serde_json
// ============================================================================

//! ## Overview
//! Sinks serialize events as one JSON object per line. Write failures are
//! swallowed: logging must never change the outcome of a run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;

use crate::core::events::AuditEvent;
use crate::core::events::StepEvent;
use crate::interfaces::EventSink;

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {}

/// Sink that writes JSON lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrEventSink;

impl StderrEventSink {
    /// Writes one serialized event.
    fn write<T: Serialize>(event: &T) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

impl EventSink for StderrEventSink {
    fn record_step(&self, event: &StepEvent) {
        Self::write(event);
    }

    fn record_audit(&self, event: &AuditEvent) {
        Self::write(event);
    }
}

/// Sink that appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<File>,
}

impl FileEventSink {
    /// Opens the event log in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Appends one serialized event.
    fn write<T: Serialize>(&self, event: &T) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

impl EventSink for FileEventSink {
    fn record_step(&self, event: &StepEvent) {
        self.write(event);
    }

    fn record_audit(&self, event: &AuditEvent) {
        self.write(event);
    }
}

/// Sink that forwards every event to each inner sink in order.
pub struct FanoutEventSink {
    /// Inner sinks.
    sinks: Vec<Box<dyn EventSink>>,
}

impl FanoutEventSink {
    /// Creates a fan-out over `sinks`.
    #[must_use]
    pub fn new(sinks: Vec<Box<dyn EventSink>>) -> Self {
        Self {
            sinks,
        }
    }
}

impl EventSink for FanoutEventSink {
    fn record_step(&self, event: &StepEvent) {
        for sink in &self.sinks {
            sink.record_step(event);
        }
    }

    fn record_audit(&self, event: &AuditEvent) {
        for sink in &self.sinks {
            sink.record_audit(event);
        }
    }
}
