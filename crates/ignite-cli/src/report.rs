// crates/ignite-cli/src/report.rs
// ============================================================================
// Module: Console Reports
// Description: Renders provisioning and audit results as console lines.
// Purpose: Keep every operator-facing report deterministic and localized.
// Dependencies: ignite-core, serde_json
// ============================================================================

//! ## Overview
//! Rendering is pure: each function returns the lines to print and never
//! writes. Secrets never reach these functions except as redacted
//! environment lines from a [`ProvisioningPlan`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use ignite_core::AuditEvent;
use ignite_core::AuditEventKind;
use ignite_core::AuditReport;
use ignite_core::ProvisioningConfig;
use ignite_core::ProvisioningOutcome;
use ignite_core::ProvisioningPlan;
use ignite_core::ProvisioningState;
use ignite_core::SequenceError;
use ignite_core::Step;
use ignite_core::StepEvent;
use ignite_core::StepOutcome;
use ignite_core::StepPhase;
use ignite_core::StepResult;

use crate::t;

// ============================================================================
// SECTION: Shared
// ============================================================================

/// Placeholder for identifiers a run never produced.
const MISSING: &str = "-";

/// Returns the localized title of a step.
#[must_use]
pub fn step_title(step: Step) -> String {
    match step {
        Step::CreateProject => t!("step.create_project"),
        Step::CreateDatabase => t!("step.create_database"),
        Step::DeployDatabase => t!("step.deploy_database"),
        Step::CreateApplication => t!("step.create_application"),
        Step::ConfigureBuild => t!("step.configure_build"),
        Step::InjectEnvironment => t!("step.inject_environment"),
        Step::DeployApplication => t!("step.deploy_application"),
    }
}

/// Returns a banner block around `title`.
fn banner(title: String) -> Vec<String> {
    vec![t!("rule"), title, t!("rule")]
}

/// Formats an optional identifier.
fn or_missing<T: ToString>(value: Option<&T>) -> String {
    value.map_or_else(|| MISSING.to_string(), ToString::to_string)
}

// ============================================================================
// SECTION: Provisioning
// ============================================================================

/// Renders the provisioning banner.
#[must_use]
pub fn render_provision_banner(project: &str, control_plane: &str) -> Vec<String> {
    let mut lines = banner(t!("provision.banner.title"));
    lines.push(t!("provision.banner.target", project = project));
    lines.push(t!("provision.banner.control_plane", url = control_plane));
    lines
}

/// Renders live progress lines for a step event.
#[must_use]
pub fn render_step_event(event: &StepEvent) -> Vec<String> {
    match event.phase {
        StepPhase::Started => vec![
            String::new(),
            t!(
                "provision.step.started",
                number = event.number,
                total = Step::ALL.len(),
                title = step_title(event.step)
            ),
        ],
        StepPhase::Completed => event
            .outputs
            .iter()
            .map(|(field, value)| t!("provision.step.output", field = field, value = value))
            .collect(),
        StepPhase::Warning => event
            .message
            .iter()
            .map(|message| t!("provision.step.warning", message = message))
            .collect(),
        StepPhase::Failed => event
            .message
            .iter()
            .map(|message| t!("provision.step.failed", message = message))
            .collect(),
    }
}

/// Renders the dry-run plan.
#[must_use]
pub fn render_plan(plan: &ProvisioningPlan) -> Vec<String> {
    let total = plan.steps.len();
    let mut lines = vec![t!("provision.plan.title")];
    for planned in &plan.steps {
        let operations: Vec<&str> =
            planned.operations.iter().map(|operation| operation.as_str()).collect();
        lines.push(t!(
            "provision.plan.step",
            number = planned.step.number(),
            total = total,
            title = step_title(planned.step),
            operations = operations.join(", ")
        ));
    }
    lines.push(String::new());
    lines.push(t!("provision.plan.env"));
    lines.extend(plan.environment.iter().map(|line| t!("provision.plan.env_entry", line = line)));
    lines
}

/// Terminal provisioning report split by output stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutcomeReport {
    /// Summary and warnings.
    pub stdout: Vec<String>,
    /// Abort diagnostics.
    pub stderr: Vec<String>,
}

/// Renders the terminal provisioning report.
///
/// A completed run goes entirely to stdout. An aborted run sends the failure,
/// the state reached, and the teardown hint to stderr.
#[must_use]
pub fn render_outcome(outcome: &ProvisioningOutcome, config: &ProvisioningConfig) -> OutcomeReport {
    let mut report = OutcomeReport::default();
    if outcome.is_completed() {
        report.stdout.push(String::new());
        report.stdout.extend(render_completed(outcome, config));
    } else {
        report.stderr.push(String::new());
        report.stderr.extend(render_aborted(outcome));
    }
    if !outcome.warnings.is_empty() {
        report.stdout.push(String::new());
        report.stdout.push(t!("provision.warnings"));
        report.stdout.extend(
            outcome
                .warnings
                .iter()
                .map(|message| t!("provision.warning.entry", message = message)),
        );
    }
    report
}

/// Renders the identifiers and runtime names held by `state`.
fn render_state(state: &ProvisioningState) -> Vec<String> {
    vec![
        t!("provision.complete.ids"),
        t!("provision.complete.project", id = or_missing(state.project_id.as_ref())),
        t!("provision.complete.environment", id = or_missing(state.environment_id.as_ref())),
        t!("provision.complete.database", id = or_missing(state.database_id.as_ref())),
        t!("provision.complete.application", id = or_missing(state.application_id.as_ref())),
        String::new(),
        t!("provision.complete.names"),
        t!(
            "provision.complete.database_name",
            name = or_missing(state.database_runtime_name.as_ref())
        ),
        t!(
            "provision.complete.application_name",
            name = or_missing(state.application_runtime_name.as_ref())
        ),
    ]
}

/// Renders the summary of a completed run.
fn render_completed(outcome: &ProvisioningOutcome, config: &ProvisioningConfig) -> Vec<String> {
    let mut lines = banner(t!("provision.complete.title"));
    lines.push(String::new());
    lines.extend(render_state(&outcome.state));
    lines.push(String::new());
    lines.push(t!("provision.complete.next"));
    lines.push(t!("provision.complete.next.dns", domain = config.domain));
    lines.push(t!(
        "provision.complete.next.domain",
        app = config.application.name,
        domain = config.domain
    ));
    lines.push(t!("provision.complete.next.https"));
    lines.push(t!("provision.complete.next.logs"));
    lines.push(String::new());
    lines.push(t!("provision.complete.dockerfile"));
    lines.push(t!("provision.complete.dockerfile.importmap"));
    lines.push(t!("provision.complete.dockerfile.clean"));
    lines
}

/// Renders the failure of an aborted run.
fn render_aborted(outcome: &ProvisioningOutcome) -> Vec<String> {
    let failed = outcome
        .steps
        .iter()
        .find(|result| matches!(result.outcome, StepOutcome::Failed { .. }))
        .map(|result| result.step);
    let mut lines = Vec::new();
    if let Some(step) = failed {
        lines.push(t!("provision.aborted.title", number = step.number(), step = step.as_str()));
    }
    if let Some(failure) = &outcome.failure {
        lines.push(t!("provision.aborted.error", error = failure));
        if let SequenceError::Remote(remote) = failure
            && let Some(body) = &remote.body
        {
            let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
            lines.push(t!("provision.aborted.body", body = pretty));
        }
    }
    if outcome.steps.iter().any(StepResult::is_completed) {
        lines.push(String::new());
        lines.push(t!("provision.aborted.state"));
        lines.extend(render_state(&outcome.state));
        lines.push(String::new());
        lines.push(t!("provision.aborted.partial"));
        if let Some(project_id) = &outcome.state.project_id {
            lines.push(t!("provision.aborted.teardown", id = project_id));
        }
    }
    lines
}

// ============================================================================
// SECTION: Audit
// ============================================================================

/// Renders the audit banner.
#[must_use]
pub fn render_audit_banner() -> Vec<String> {
    let mut lines = banner(t!("audit.banner.title"));
    lines.push(String::new());
    lines
}

/// Renders the live progress line for an audit event.
#[must_use]
pub fn render_audit_event(event: &AuditEvent) -> Option<String> {
    match event.kind {
        AuditEventKind::CollectionChecked => Some(t!(
            "audit.collection.checked",
            collection = event.collection,
            checked = event.checked.unwrap_or_default(),
            failed = event.failed.unwrap_or_default()
        )),
        AuditEventKind::FetchFailed => Some(t!(
            "audit.collection.fetch_failed",
            collection = event.collection,
            error = event.details.join("; ")
        )),
        AuditEventKind::DocumentFailed => None,
    }
}

/// Renders the terminal audit report.
#[must_use]
pub fn render_audit_report(report: &AuditReport) -> Vec<String> {
    let unreadable: Vec<_> = report.fetch_errors().collect();
    let mut lines = vec![String::new(), t!("rule")];
    if report.passed() {
        lines.push(t!("audit.passed"));
        lines.push(t!("rule"));
        lines.push(t!(
            "audit.summary",
            documents = report.documents_checked(),
            collections = report.collections.len() - unreadable.len()
        ));
        if !unreadable.is_empty() {
            lines.push(t!("audit.fetch_warned", count = unreadable.len()));
        }
        return lines;
    }
    if report.failures.is_empty() {
        lines.push(t!("audit.failed.unreadable", count = unreadable.len()));
    } else {
        lines.push(t!("audit.failed"));
    }
    lines.push(t!("rule"));
    if !report.failures.is_empty() {
        lines.push(String::new());
        lines.push(t!("audit.failures.header"));
        for failure in &report.failures {
            lines.push(t!("audit.failure.document", label = failure.label()));
            lines.extend(
                failure.errors.iter().map(|error| t!("audit.failure.error", error = error)),
            );
        }
    }
    if !unreadable.is_empty() {
        lines.push(String::new());
        lines.push(t!("audit.unreadable.header"));
        for summary in &unreadable {
            lines.push(t!(
                "audit.unreadable.entry",
                collection = summary.collection,
                error = summary.fetch_error.as_deref().unwrap_or_default()
            ));
        }
    }
    lines.push(String::new());
    lines.push(t!("audit.blocked"));
    lines.push(String::new());
    lines.push(t!("audit.remediation.header"));
    lines.push(t!("audit.remediation.manual"));
    lines.push(t!("audit.remediation.migration"));
    lines.push(t!("audit.remediation.optional"));
    lines
}
