// crates/ignite-core/src/runtime/sequencer.rs
// ============================================================================
// Module: Provisioning Sequencer
// Description: Ordered execution of control-plane calls for one environment.
// Purpose: Stand up the database and application services in dependency order.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The sequencer runs [`Step::ALL`] in order against a [`ControlPlane`]. Each
//! step reads only what earlier steps stored in [`ProvisioningState`]. The
//! first error ends the run: the failed step is recorded, no further remote
//! call is issued, and the outcome is [`ProvisioningStatus::Aborted`]. There
//! are no retries and no rollback.
//!
//! After the database deploy call the sequencer applies the [`SettlePolicy`].
//! The status it observes is advisory: a database that never reports ready
//! produces a warning, not a failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Serialize;

use crate::core::control_plane::BindSourceRequest;
use crate::core::control_plane::BuildStrategy;
use crate::core::control_plane::CreateApplicationRequest;
use crate::core::control_plane::CreateDatabaseRequest;
use crate::core::control_plane::CreateProjectRequest;
use crate::core::control_plane::DATABASE_READY_STATUS;
use crate::core::control_plane::Operation;
use crate::core::control_plane::SetBuildStrategyRequest;
use crate::core::control_plane::SetEnvironmentRequest;
use crate::core::events::StepEvent;
use crate::core::events::StepPhase;
use crate::core::identifiers::DatabaseRuntimeName;
use crate::core::identifiers::DatabaseServiceId;
use crate::core::provisioning::ProvisioningConfig;
use crate::core::provisioning::ProvisioningOutcome;
use crate::core::provisioning::ProvisioningState;
use crate::core::provisioning::ProvisioningStatus;
use crate::core::provisioning::SequenceError;
use crate::core::provisioning::Step;
use crate::core::provisioning::StepOutcome;
use crate::core::provisioning::StepResult;
use crate::core::provisioning::compose_environment;
use crate::interfaces::ControlPlane;
use crate::interfaces::EventSink;
use crate::interfaces::Sleeper;

// ============================================================================
// SECTION: Settle Policy
// ============================================================================

/// Default wait after the database deploy call.
pub const DEFAULT_INITIAL_SETTLE: Duration = Duration::from_secs(10);
/// Default wait between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// Default number of status polls.
pub const DEFAULT_MAX_POLLS: u32 = 3;

/// Bounded wait applied after deploying the database service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePolicy {
    /// Wait before the first status poll.
    pub initial_delay: Duration,
    /// Wait between consecutive polls.
    pub poll_interval: Duration,
    /// Maximum number of status polls; zero disables polling.
    pub max_polls: u32,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_INITIAL_SETTLE,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        }
    }
}

// ============================================================================
// SECTION: Plan
// ============================================================================

/// Planned step for a dry run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedStep {
    /// Step to execute.
    pub step: Step,
    /// Remote operations the step issues, in order.
    pub operations: Vec<Operation>,
}

/// Dry-run plan: the ordered steps and the redacted environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisioningPlan {
    /// Steps in execution order.
    pub steps: Vec<PlannedStep>,
    /// `KEY=value` lines with secrets redacted.
    pub environment: Vec<String>,
}

/// Placeholder host used when composing the environment without a database.
const PLAN_RUNTIME_NAME: &str = "pending-database";

/// Returns the operations a step issues, in order.
#[must_use]
pub fn step_operations(step: Step) -> Vec<Operation> {
    match step {
        Step::CreateProject => vec![Operation::CreateProject],
        Step::CreateDatabase => vec![Operation::CreateDatabaseService],
        Step::DeployDatabase => {
            vec![Operation::DeployDatabaseService, Operation::DatabaseServiceStatus]
        }
        Step::CreateApplication => vec![Operation::CreateApplicationService],
        Step::ConfigureBuild => vec![Operation::BindSourceRepository, Operation::SetBuildStrategy],
        Step::InjectEnvironment => vec![Operation::SetEnvironment],
        Step::DeployApplication => vec![Operation::DeployApplicationService],
    }
}

/// Builds the dry-run plan without contacting the control plane.
///
/// # Errors
///
/// Returns [`SequenceError::InvalidInput`] when the environment cannot be
/// composed from `config`.
pub fn plan(config: &ProvisioningConfig) -> Result<ProvisioningPlan, SequenceError> {
    let payload = compose_environment(config, &DatabaseRuntimeName::new(PLAN_RUNTIME_NAME))?;
    Ok(ProvisioningPlan {
        steps: Step::ALL
            .iter()
            .map(|step| PlannedStep {
                step: *step,
                operations: step_operations(*step),
            })
            .collect(),
        environment: payload.redacted_lines(),
    })
}

// ============================================================================
// SECTION: Sequencer
// ============================================================================

/// Captured `(field, value)` outputs of a step.
type Outputs = Vec<(String, String)>;

/// Provisioning sequencer over a control plane.
pub struct Sequencer<'a> {
    /// Remote control plane.
    control_plane: &'a dyn ControlPlane,
    /// Event sink.
    sink: &'a dyn EventSink,
    /// Wait primitive for the settle policy.
    sleeper: &'a dyn Sleeper,
    /// Settle policy applied after the database deploy.
    settle: SettlePolicy,
}

impl<'a> Sequencer<'a> {
    /// Creates a sequencer.
    #[must_use]
    pub fn new(
        control_plane: &'a dyn ControlPlane,
        sink: &'a dyn EventSink,
        sleeper: &'a dyn Sleeper,
        settle: SettlePolicy,
    ) -> Self {
        Self {
            control_plane,
            sink,
            sleeper,
            settle,
        }
    }

    /// Runs every step in order and returns the terminal outcome.
    #[must_use]
    pub fn run(&self, config: &ProvisioningConfig) -> ProvisioningOutcome {
        let mut state = ProvisioningState::default();
        let mut steps = Vec::with_capacity(Step::ALL.len());
        let mut warnings = Vec::new();
        for step in Step::ALL {
            self.sink.record_step(&StepEvent::new(step, StepPhase::Started));
            match self.execute(step, config, &mut state, &mut warnings) {
                Ok(outputs) => {
                    self.sink.record_step(
                        &StepEvent::new(step, StepPhase::Completed).with_outputs(outputs.clone()),
                    );
                    steps.push(StepResult {
                        step,
                        outcome: StepOutcome::Completed {
                            outputs,
                        },
                    });
                }
                Err(err) => {
                    let error = err.to_string();
                    self.sink
                        .record_step(&StepEvent::new(step, StepPhase::Failed).with_message(&error));
                    steps.push(StepResult {
                        step,
                        outcome: StepOutcome::Failed {
                            error,
                        },
                    });
                    return ProvisioningOutcome {
                        status: ProvisioningStatus::Aborted,
                        state,
                        steps,
                        warnings,
                        failure: Some(err),
                    };
                }
            }
        }
        ProvisioningOutcome {
            status: ProvisioningStatus::Completed,
            state,
            steps,
            warnings,
            failure: None,
        }
    }

    /// Executes one step, storing its outputs in `state`.
    fn execute(
        &self,
        step: Step,
        config: &ProvisioningConfig,
        state: &mut ProvisioningState,
        warnings: &mut Vec<String>,
    ) -> Result<Outputs, SequenceError> {
        match step {
            Step::CreateProject => self.create_project(config, state),
            Step::CreateDatabase => self.create_database(config, state),
            Step::DeployDatabase => self.deploy_database(state, warnings),
            Step::CreateApplication => self.create_application(config, state),
            Step::ConfigureBuild => self.configure_build(config, state),
            Step::InjectEnvironment => self.inject_environment(config, state),
            Step::DeployApplication => {
                let application_id = state.require_application_id()?;
                self.control_plane.deploy_application_service(application_id)?;
                Ok(vec![("application_id".to_string(), application_id.to_string())])
            }
        }
    }

    /// Step 1: project and environment.
    fn create_project(
        &self,
        config: &ProvisioningConfig,
        state: &mut ProvisioningState,
    ) -> Result<Outputs, SequenceError> {
        let created = self.control_plane.create_project(&CreateProjectRequest {
            name: config.project.name.clone(),
            description: config.project.description.clone(),
        })?;
        let outputs = vec![
            ("project_id".to_string(), created.project_id.to_string()),
            ("environment_id".to_string(), created.environment_id.to_string()),
        ];
        state.project_id = Some(created.project_id);
        state.environment_id = Some(created.environment_id);
        Ok(outputs)
    }

    /// Step 2: database service.
    fn create_database(
        &self,
        config: &ProvisioningConfig,
        state: &mut ProvisioningState,
    ) -> Result<Outputs, SequenceError> {
        let environment_id = state.require_environment_id()?.clone();
        let created = self.control_plane.create_database_service(&CreateDatabaseRequest {
            environment_id,
            name: config.database.service_name.clone(),
            user: config.database.user.clone(),
            password: config.database.password.clone(),
            image: config.database.image.clone(),
        })?;
        let outputs = vec![
            ("database_id".to_string(), created.database_id.to_string()),
            ("database_runtime_name".to_string(), created.runtime_name.to_string()),
        ];
        state.database_id = Some(created.database_id);
        state.database_runtime_name = Some(created.runtime_name);
        Ok(outputs)
    }

    /// Step 3: database deploy followed by the settle policy.
    fn deploy_database(
        &self,
        state: &mut ProvisioningState,
        warnings: &mut Vec<String>,
    ) -> Result<Outputs, SequenceError> {
        let database_id = state.require_database_id()?.clone();
        self.control_plane.deploy_database_service(&database_id)?;
        let (status, polls) = self.settle(&database_id)?;
        state.database_status.clone_from(&status);
        let ready = status.as_deref() == Some(DATABASE_READY_STATUS);
        if !ready {
            let observed = status.as_deref().unwrap_or("unknown");
            let warning = format!(
                "database status is {observed:?} after {polls} poll(s); continuing without \
                 confirmation"
            );
            self.sink.record_step(
                &StepEvent::new(Step::DeployDatabase, StepPhase::Warning).with_message(&warning),
            );
            warnings.push(warning);
        }
        Ok(vec![("database_status".to_string(), status.unwrap_or_else(|| "unknown".to_string()))])
    }

    /// Waits and polls the database status; returns the last status and poll count.
    fn settle(
        &self,
        database_id: &DatabaseServiceId,
    ) -> Result<(Option<String>, u32), SequenceError> {
        self.sleeper.sleep(self.settle.initial_delay);
        let mut last = None;
        let mut polls = 0;
        while polls < self.settle.max_polls {
            if polls > 0 {
                self.sleeper.sleep(self.settle.poll_interval);
            }
            let status = self.control_plane.database_service_status(database_id)?;
            polls += 1;
            let ready = status.is_ready();
            last = Some(status.status);
            if ready {
                break;
            }
        }
        Ok((last, polls))
    }

    /// Step 4: application service.
    fn create_application(
        &self,
        config: &ProvisioningConfig,
        state: &mut ProvisioningState,
    ) -> Result<Outputs, SequenceError> {
        let environment_id = state.require_environment_id()?.clone();
        let created = self.control_plane.create_application_service(&CreateApplicationRequest {
            environment_id,
            name: config.application.name.clone(),
        })?;
        let mut outputs = vec![("application_id".to_string(), created.application_id.to_string())];
        if let Some(runtime_name) = &created.runtime_name {
            outputs.push(("application_runtime_name".to_string(), runtime_name.to_string()));
        }
        state.application_id = Some(created.application_id);
        state.application_runtime_name = created.runtime_name;
        Ok(outputs)
    }

    /// Step 5: source binding and build strategy.
    fn configure_build(
        &self,
        config: &ProvisioningConfig,
        state: &ProvisioningState,
    ) -> Result<Outputs, SequenceError> {
        let application_id = state.require_application_id()?;
        let repository = &config.repository;
        self.control_plane.bind_source_repository(&BindSourceRequest {
            application_id: application_id.clone(),
            repository: repository.repository.clone(),
            branch: repository.branch.clone(),
            build_path: repository.build_path.clone(),
        })?;
        self.control_plane.set_build_strategy(&SetBuildStrategyRequest {
            application_id: application_id.clone(),
            strategy: BuildStrategy::BuildFile {
                path: repository.build_file.clone(),
            },
        })?;
        Ok(vec![
            ("repository".to_string(), repository.repository.clone()),
            ("branch".to_string(), repository.branch.clone()),
            ("build_file".to_string(), repository.build_file.clone()),
        ])
    }

    /// Step 6: environment composed from the deployed database name.
    fn inject_environment(
        &self,
        config: &ProvisioningConfig,
        state: &ProvisioningState,
    ) -> Result<Outputs, SequenceError> {
        let application_id = state.require_application_id()?;
        let runtime_name = state.require_database_runtime_name()?;
        let payload = compose_environment(config, runtime_name)?;
        self.control_plane.set_environment(&SetEnvironmentRequest {
            application_id: application_id.clone(),
            env: payload.render(),
        })?;
        let keys: Vec<&str> = payload.entries.iter().map(|entry| entry.key.as_str()).collect();
        Ok(vec![("variables".to_string(), keys.join(","))])
    }
}
