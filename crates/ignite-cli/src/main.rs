// crates/ignite-cli/src/main.rs
// ============================================================================
// Module: Ignite CLI Entry Point
// Description: Command dispatcher for provisioning, teardown, and schema audits.
// Purpose: Provide a localized CLI over the Ignite sequencer and auditor.
// Dependencies: clap, ignite-config, ignite-content, ignite-core, ignite-dokploy
// ============================================================================

//! ## Overview
//! `ignite provision` creates the project, database, and application on a
//! Dokploy server in seven ordered steps. `ignite audit run` checks content
//! documents against the configured collection schemas and exits non-zero
//! when promotion must be blocked. Every secret is read from the
//! environment; the config file carries none.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use ignite_cli::i18n::Locale;
use ignite_cli::i18n::set_locale;
use ignite_cli::progress::ConsoleProgress;
use ignite_cli::report::render_audit_banner;
use ignite_cli::report::render_audit_report;
use ignite_cli::report::render_outcome;
use ignite_cli::report::render_plan;
use ignite_cli::report::render_provision_banner;
use ignite_cli::t;
use ignite_config::ContentStoreCredentials;
use ignite_config::ControlPlaneCredentials;
use ignite_config::IgniteConfig;
use ignite_config::LoggingConfig;
use ignite_config::ProcessEnv;
use ignite_config::config_toml_example;
use ignite_content::open_source;
use ignite_core::Auditor;
use ignite_core::ControlPlane;
use ignite_core::EventSink;
use ignite_core::FanoutEventSink;
use ignite_core::FileEventSink;
use ignite_core::ProjectId;
use ignite_core::Sequencer;
use ignite_core::StderrEventSink;
use ignite_core::ThreadSleeper;
use ignite_core::json_schema;
use ignite_core::runtime::plan;
use ignite_dokploy::DokployClient;
use ignite_dokploy::DokployConfig;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "IGNITE_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "ignite", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `IGNITE_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Provision the project, database, and application on Dokploy.
    Provision(ProvisionCommand),
    /// Delete a provisioned project and everything inside it.
    Teardown(TeardownCommand),
    /// Content schema audit utilities.
    Audit {
        /// Selected audit subcommand.
        #[command(subcommand)]
        command: AuditCommand,
    },
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Audit subcommands.
#[derive(Subcommand, Debug)]
enum AuditCommand {
    /// Audit every configured collection and gate promotion on the result.
    Run(ConfigArgs),
    /// Print the JSON Schema of the configured collections.
    Schema(AuditSchemaCommand),
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate an Ignite configuration file.
    Validate(ConfigArgs),
    /// Print an annotated example configuration.
    Example,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Spanish.
    Es,
}

/// Config file selection shared by commands.
#[derive(Args, Debug)]
struct ConfigArgs {
    /// Optional config file path (defaults to ignite.toml or `IGNITE_CONFIG`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for provisioning.
#[derive(Args, Debug)]
struct ProvisionCommand {
    /// Config file selection.
    #[command(flatten)]
    config: ConfigArgs,
    /// Print the planned steps and environment without calling Dokploy.
    #[arg(long, action = ArgAction::SetTrue)]
    dry_run: bool,
}

/// Arguments for teardown.
#[derive(Args, Debug)]
struct TeardownCommand {
    /// Config file selection.
    #[command(flatten)]
    config: ConfigArgs,
    /// Project identifier reported by a previous provisioning run.
    #[arg(long, value_name = "ID")]
    project_id: String,
}

/// Arguments for schema export.
#[derive(Args, Debug)]
struct AuditSchemaCommand {
    /// Config file selection.
    #[command(flatten)]
    config: ConfigArgs,
    /// Restrict output to one collection.
    #[arg(long, value_name = "NAME")]
    collection: Option<String>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Provision(command) => command_provision(&command),
        Commands::Teardown(command) => command_teardown(&command),
        Commands::Audit {
            command,
        } => match command {
            AuditCommand::Run(command) => command_audit_run(&command),
            AuditCommand::Schema(command) => command_audit_schema(&command),
        },
        Commands::Config {
            command,
        } => match command {
            ConfigCommand::Validate(command) => command_config_validate(&command),
            ConfigCommand::Example => command_config_example(),
        },
    }
}

/// Prints top-level help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Provisioning Commands
// ============================================================================

/// Executes `provision`.
fn command_provision(command: &ProvisionCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.config)?;
    if command.dry_run {
        let provisioning = config
            .provisioning(&ProcessEnv)
            .map_err(|err| CliError::new(t!("config.invalid", error = err)))?;
        let planned = plan(&provisioning)
            .map_err(|err| CliError::new(t!("provision.plan.failed", error = err)))?;
        write_lines(render_plan(&planned))?;
        return Ok(ExitCode::SUCCESS);
    }

    let credentials = ControlPlaneCredentials::from_env(&ProcessEnv)
        .map_err(|err| CliError::new(t!("credentials.missing", error = err)))?;
    let provisioning = config
        .provisioning(&ProcessEnv)
        .map_err(|err| CliError::new(t!("config.invalid", error = err)))?;
    let client = control_plane_client(&config, &credentials)?;
    write_lines(render_provision_banner(&provisioning.project.name, credentials.url.as_str()))?;

    let sink = event_sink(&config.logging)?;
    let sequencer = Sequencer::new(&client, &sink, &ThreadSleeper, config.settle_policy());
    let outcome = sequencer.run(&provisioning);
    let report = render_outcome(&outcome, &provisioning);
    write_lines(report.stdout)?;
    write_error_lines(report.stderr)?;
    if outcome.is_completed() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}

/// Executes `teardown`.
fn command_teardown(command: &TeardownCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.config)?;
    let credentials = ControlPlaneCredentials::from_env(&ProcessEnv)
        .map_err(|err| CliError::new(t!("credentials.missing", error = err)))?;
    let client = control_plane_client(&config, &credentials)?;
    let project_id = ProjectId::new(command.project_id.trim());
    client
        .delete_project(&project_id)
        .map_err(|err| CliError::new(t!("teardown.failed", error = err)))?;
    write_stdout_line(&t!("teardown.ok", id = project_id))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Builds the Dokploy client with the configured transport limits.
fn control_plane_client(
    config: &IgniteConfig,
    credentials: &ControlPlaneCredentials,
) -> CliResult<DokployClient> {
    let mut client_config =
        DokployConfig::new(credentials.url.as_str(), credentials.token.clone());
    client_config.timeout = config.control_plane.timeout();
    client_config.max_response_bytes = config.control_plane.max_response_bytes;
    DokployClient::new(client_config)
        .map_err(|err| CliError::new(t!("provision.client_failed", error = err)))
}

// ============================================================================
// SECTION: Audit Commands
// ============================================================================

/// Executes `audit run`.
fn command_audit_run(command: &ConfigArgs) -> CliResult<ExitCode> {
    let config = load_config(command)?;
    let credentials = ContentStoreCredentials::from_env(&ProcessEnv)
        .map_err(|err| CliError::new(t!("credentials.missing", error = err)))?;
    let source = open_source(credentials.uri.expose(), credentials.api_key)
        .map_err(|err| CliError::new(t!("audit.source_failed", error = err)))?;
    write_lines(render_audit_banner())?;

    let sink = event_sink(&config.logging)?;
    let auditor = Auditor::new(source.as_ref(), &sink, config.audit.fetch_failure);
    let report = auditor.run(&config.schemas());
    write_lines(render_audit_report(&report))?;
    if report.passed() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}

/// Executes `audit schema`.
fn command_audit_schema(command: &AuditSchemaCommand) -> CliResult<ExitCode> {
    let config = load_config(&command.config)?;
    let schemas = config.schemas();
    let value = match &command.collection {
        Some(name) => {
            let schema =
                schemas.iter().find(|schema| schema.collection.as_str() == name).ok_or_else(
                    || CliError::new(t!("audit.schema.unknown_collection", collection = name)),
                )?;
            json_schema(schema)
        }
        None => {
            let mut map = Map::new();
            for schema in &schemas {
                map.insert(schema.collection.to_string(), json_schema(schema));
            }
            Value::Object(map)
        }
    };
    let text = serde_json::to_string_pretty(&value)
        .map_err(|err| CliError::new(t!("audit.schema.serialize_failed", error = err)))?;
    write_stdout_line(&text).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Executes `config validate`.
fn command_config_validate(command: &ConfigArgs) -> CliResult<ExitCode> {
    let _config = load_config(command)?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `config example`.
fn command_config_example() -> CliResult<ExitCode> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(config_toml_example().as_bytes())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Loads and validates the config file.
fn load_config(args: &ConfigArgs) -> CliResult<IgniteConfig> {
    IgniteConfig::load(args.config.as_deref())
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Builds the event sink: console progress plus configured log targets.
fn event_sink(logging: &LoggingConfig) -> CliResult<FanoutEventSink> {
    let mut sinks: Vec<Box<dyn EventSink>> =
        vec![Box::new(ConsoleProgress::new(std::io::stdout()))];
    if logging.stderr {
        sinks.push(Box::new(StderrEventSink));
    }
    if let Some(path) = &logging.event_log {
        let sink = FileEventSink::new(path).map_err(|err| {
            CliError::new(t!("event_log.open_failed", path = path.display(), error = err))
        })?;
        sinks.push(Box::new(sink));
    }
    Ok(FanoutEventSink::new(sinks))
}

/// Resolves the output locale from the flag, then the environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Converts CLI language selections into catalog locales.
impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Es => Self::Es,
        }
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes each line to stdout.
fn write_lines(lines: Vec<String>) -> CliResult<()> {
    for line in lines {
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(())
}

/// Writes lines to stderr.
fn write_error_lines(lines: Vec<String>) -> CliResult<()> {
    for line in lines {
        write_stderr_line(&line).map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    Ok(())
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
