// crates/ignite-cli/tests/report.rs
// ============================================================================
// Module: Console Report Tests
// Description: Rendering of provisioning outcomes, plans, and audit reports.
// Purpose: Ensure operator-facing reports carry the expected lines.
// Dependencies: ignite-cli report module, ignite-config, ignite-core
// ============================================================================

//! ## Overview
//! Builds outcomes and reports by hand and checks the rendered lines.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use ignite_cli::report::render_audit_report;
use ignite_cli::report::render_outcome;
use ignite_cli::report::render_plan;
use ignite_cli::report::render_step_event;
use ignite_config::IgniteConfig;
use ignite_config::REQUIRED_SECRETS;
use ignite_config::config_toml_example;
use ignite_core::ApplicationId;
use ignite_core::ApplicationRuntimeName;
use ignite_core::AuditFailure;
use ignite_core::AuditReport;
use ignite_core::CollectionName;
use ignite_core::CollectionSummary;
use ignite_core::DatabaseRuntimeName;
use ignite_core::DatabaseServiceId;
use ignite_core::DocumentId;
use ignite_core::EnvironmentId;
use ignite_core::FetchFailurePolicy;
use ignite_core::Operation;
use ignite_core::ProjectId;
use ignite_core::ProvisioningConfig;
use ignite_core::ProvisioningOutcome;
use ignite_core::ProvisioningState;
use ignite_core::ProvisioningStatus;
use ignite_core::RemoteApiError;
use ignite_core::SequenceError;
use ignite_core::Step;
use ignite_core::StepEvent;
use ignite_core::StepOutcome;
use ignite_core::StepPhase;
use ignite_core::StepResult;
use ignite_core::runtime::plan;
use serde_json::json;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const SECRET_VALUE: &str = "s3cret-value";

fn provisioning() -> ProvisioningConfig {
    let env: BTreeMap<String, String> = REQUIRED_SECRETS
        .iter()
        .map(|key| ((*key).to_string(), SECRET_VALUE.to_string()))
        .collect();
    IgniteConfig::parse(&config_toml_example()).unwrap().provisioning(&env).unwrap()
}

fn completed(step: Step) -> StepResult {
    StepResult {
        step,
        outcome: StepOutcome::Completed {
            outputs: Vec::new(),
        },
    }
}

fn collection(name: &str) -> CollectionName {
    CollectionName::parse(name).unwrap()
}

fn summary(name: &str, checked: usize, failed: usize, error: Option<&str>) -> CollectionSummary {
    CollectionSummary {
        collection: collection(name),
        checked,
        failed,
        fetch_error: error.map(str::to_string),
    }
}

fn has_line(lines: &[String], expected: &str) -> bool {
    lines.iter().any(|line| line == expected)
}

// ============================================================================
// SECTION: Provisioning
// ============================================================================

#[test]
fn completed_outcome_lists_ids_and_next_steps() {
    let state = ProvisioningState {
        project_id: Some(ProjectId::new("p-1")),
        environment_id: Some(EnvironmentId::new("e-1")),
        database_id: Some(DatabaseServiceId::new("m-1")),
        database_runtime_name: Some(DatabaseRuntimeName::new("wlf-mongo-abc123")),
        database_status: Some("done".to_string()),
        application_id: Some(ApplicationId::new("a-1")),
        application_runtime_name: Some(ApplicationRuntimeName::new("wlf-cms-xyz789")),
    };
    let outcome = ProvisioningOutcome {
        status: ProvisioningStatus::Completed,
        state,
        steps: Step::ALL.into_iter().map(completed).collect(),
        warnings: Vec::new(),
        failure: None,
    };
    let report = render_outcome(&outcome, &provisioning());
    assert!(report.stderr.is_empty());
    let lines = report.stdout;
    assert!(has_line(&lines, "🎉 PROVISIONING COMPLETE"));
    assert!(has_line(&lines, "   Project ID:     p-1"));
    assert!(has_line(&lines, "   Application ID: a-1"));
    assert!(has_line(&lines, "   Database:       wlf-mongo-abc123"));
    assert!(has_line(&lines, "   1. Point DNS for staging.wlf.com.mx to your Dokploy server IP"));
    assert!(has_line(
        &lines,
        "   2. Add domain in Dokploy: wlf-cms -> Domains -> staging.wlf.com.mx"
    ));
    assert!(has_line(&lines, "   RUN pnpm generate:importmap"));
    assert!(!lines.iter().any(|line| line.contains("Warnings")));
}

#[test]
fn completed_outcome_lists_settle_warnings() {
    let outcome = ProvisioningOutcome {
        status: ProvisioningStatus::Completed,
        state: ProvisioningState::default(),
        steps: Step::ALL.into_iter().map(completed).collect(),
        warnings: vec!["database status is \"idle\" after 3 poll(s)".to_string()],
        failure: None,
    };
    let lines = render_outcome(&outcome, &provisioning()).stdout;
    assert!(has_line(&lines, "   Project ID:     -"));
    assert!(has_line(&lines, "⚠️  Warnings:"));
    assert!(has_line(&lines, "   - database status is \"idle\" after 3 poll(s)"));
}

#[test]
fn aborted_outcome_shows_step_error_body_and_teardown() {
    let error = RemoteApiError::status(
        Operation::CreateDatabaseService,
        400,
        "Input validation failed",
        Some(json!({"code": "BAD_REQUEST"})),
    );
    let outcome = ProvisioningOutcome {
        status: ProvisioningStatus::Aborted,
        state: ProvisioningState {
            project_id: Some(ProjectId::new("p-1")),
            environment_id: Some(EnvironmentId::new("e-1")),
            ..ProvisioningState::default()
        },
        steps: vec![completed(Step::CreateProject), StepResult {
            step: Step::CreateDatabase,
            outcome: StepOutcome::Failed {
                error: error.to_string(),
            },
        }],
        warnings: Vec::new(),
        failure: Some(SequenceError::Remote(error)),
    };
    let report = render_outcome(&outcome, &provisioning());
    assert!(report.stdout.is_empty());
    let lines = report.stderr;
    assert!(has_line(&lines, "❌ PROVISIONING ABORTED at step 2 (create_database)"));
    assert!(has_line(
        &lines,
        "Error: create_database_service failed (http 400): Input validation failed"
    ));
    assert!(has_line(&lines, "API Response: {\n  \"code\": \"BAD_REQUEST\"\n}"));
    assert!(has_line(&lines, "State reached before the failure:"));
    assert!(has_line(&lines, "   Project ID:     p-1"));
    assert!(has_line(&lines, "   Environment ID: e-1"));
    assert!(has_line(&lines, "   Database ID:    -"));
    assert!(has_line(&lines, "   Database:       -"));
    assert!(has_line(&lines, "Remove them with: ignite teardown --project-id p-1"));
    assert!(!lines.iter().any(|line| line.contains("PROVISIONING COMPLETE")));
}

#[test]
fn aborted_first_step_has_no_partial_resources() {
    let error = RemoteApiError::transport(Operation::CreateProject, "connection refused");
    let outcome = ProvisioningOutcome {
        status: ProvisioningStatus::Aborted,
        state: ProvisioningState::default(),
        steps: vec![StepResult {
            step: Step::CreateProject,
            outcome: StepOutcome::Failed {
                error: error.to_string(),
            },
        }],
        warnings: Vec::new(),
        failure: Some(SequenceError::Remote(error)),
    };
    let lines = render_outcome(&outcome, &provisioning()).stderr;
    assert!(has_line(&lines, "❌ PROVISIONING ABORTED at step 1 (create_project)"));
    assert!(has_line(&lines, "Error: create_project failed: connection refused"));
    assert!(!lines.iter().any(|line| line.starts_with("API Response")));
    assert!(!lines.iter().any(|line| line.contains("teardown")));
    assert!(!lines.iter().any(|line| line.contains("Project ID")));
}

#[test]
fn plan_lists_operations_and_redacts_secrets() {
    let lines = render_plan(&plan(&provisioning()).unwrap());
    assert!(has_line(&lines, "  [1/7] Creating project: create_project"));
    assert!(has_line(
        &lines,
        "  [3/7] Deploying database service: deploy_database_service, database_service_status"
    ));
    assert!(has_line(&lines, "  NODE_ENV=production"));
    assert!(has_line(&lines, "  NEXT_PUBLIC_SERVER_URL=https://staging.wlf.com.mx"));
    assert!(has_line(&lines, "  PAYLOAD_SECRET=<redacted>"));
    assert!(!lines.iter().any(|line| line.contains(SECRET_VALUE)));
}

#[test]
fn step_events_render_progress_lines() {
    let started = render_step_event(&StepEvent::new(Step::InjectEnvironment, StepPhase::Started));
    assert_eq!(started, vec![
        String::new(),
        "[6/7] Injecting environment variables...".to_string()
    ]);
    let done = render_step_event(
        &StepEvent::new(Step::InjectEnvironment, StepPhase::Completed)
            .with_outputs(vec![("variables".to_string(), "NODE_ENV,HOSTNAME".to_string())]),
    );
    assert_eq!(done, vec!["✅ variables: NODE_ENV,HOSTNAME".to_string()]);
}

// ============================================================================
// SECTION: Audit
// ============================================================================

#[test]
fn failed_audit_lists_documents_and_remediation() {
    let report = AuditReport {
        failures: vec![AuditFailure {
            collection: collection("pages"),
            document_id: DocumentId::new("p2"),
            errors: vec![
                "title: Page title is required".to_string(),
                "slug: Page slug is required".to_string(),
            ],
        }],
        collections: vec![summary("pages", 2, 1, None), summary("posts", 0, 0, None)],
        fetch_failure: FetchFailurePolicy::Fail,
    };
    let lines = render_audit_report(&report);
    assert!(has_line(&lines, " ❌ AUDIT FAILED - Schema mismatches found"));
    assert!(has_line(&lines, "  • pages/p2:"));
    assert!(has_line(&lines, "    - title: Page title is required"));
    assert!(has_line(&lines, "    - slug: Page slug is required"));
    assert!(has_line(&lines, "⚠️  DEPLOYMENT BLOCKED - Fix data before promoting to production"));
    assert!(has_line(&lines, "Remediation Options:"));
    assert!(!lines.iter().any(|line| line == "Unreadable collections:"));
}

#[test]
fn unreadable_collection_fails_under_fail_policy() {
    let report = AuditReport {
        failures: Vec::new(),
        collections: vec![
            summary("media", 0, 0, Some("no such table")),
            summary("pages", 3, 0, None),
        ],
        fetch_failure: FetchFailurePolicy::Fail,
    };
    let lines = render_audit_report(&report);
    assert!(has_line(&lines, " ❌ AUDIT FAILED - 1 collection(s) could not be audited"));
    assert!(has_line(&lines, "  • media: no such table"));
    assert!(!lines.iter().any(|line| line == "Failures:"));
}

#[test]
fn passed_audit_summarizes_and_warns_on_unreadable() {
    let report = AuditReport {
        failures: Vec::new(),
        collections: vec![
            summary("media", 0, 0, Some("no such table")),
            summary("pages", 3, 0, None),
        ],
        fetch_failure: FetchFailurePolicy::Warn,
    };
    let lines = render_audit_report(&report);
    assert!(has_line(&lines, " ✅ AUDIT PASSED - All documents comply with schema"));
    assert!(has_line(&lines, "3 documents checked across 1 collections"));
    assert!(has_line(&lines, "⚠️  1 collection(s) could not be audited (fetch_failure = warn)"));
    assert!(!lines.iter().any(|line| line.contains("BLOCKED")));
}
