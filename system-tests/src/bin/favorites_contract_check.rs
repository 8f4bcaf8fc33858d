// system-tests/src/bin/favorites_contract_check.rs
// ============================================================================
// Module: Favorites Contract Check
// Description: Command-line runner for the favorites contract catalog.
// Purpose: Check a live deployment against the contract outside `cargo test`.
// Dependencies: clap, favorites-client, favorites-contract, tokio, tracing-subscriber
// ============================================================================

//! ## Overview
//! Runs the contract scenarios against a deployment and prints one line per
//! scenario. The process exits non-zero when any scenario fails. Flags take
//! precedence over the `FAVORITES_SYSTEM_TEST_*` environment variables.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use clap::ValueEnum;
use favorites_client::ClientConfig;
use favorites_client::DEFAULT_TIMEOUT;
use favorites_client::ScenarioReport;
use favorites_client::run_catalog;
use favorites_contract::ContractScenario;
use favorites_contract::MessageCheck;
use system_tests::config::SystemTestConfig;
use system_tests::config::SystemTestEnv;
use system_tests::config::parse_base_url;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Checks a favorites deployment against the contract scenarios.
#[derive(Debug, Parser)]
#[command(name = "favorites_contract_check", version)]
struct Cli {
    /// Base URL of the deployment (falls back to `FAVORITES_SYSTEM_TEST_BASE_URL`).
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECONDS")]
    timeout_secs: Option<u64>,
    /// How error messages are compared.
    #[arg(long, value_enum)]
    message_check: Option<MessageCheckArg>,
    /// Scenario to run; repeat to select several. Runs the whole catalog when absent.
    #[arg(long = "scenario", value_name = "NAME")]
    scenarios: Vec<String>,
    /// Writes the JSON report to this path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

/// Message comparison modes accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MessageCheckArg {
    /// Compare error messages verbatim.
    Exact,
    /// Compare status codes only.
    StatusOnly,
}

impl From<MessageCheckArg> for MessageCheck {
    fn from(value: MessageCheckArg) -> Self {
        match value {
            MessageCheckArg::Exact => Self::Exact,
            MessageCheckArg::StatusOnly => Self::StatusOnly,
        }
    }
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(message) => emit_error(&message),
    }
}

/// Resolves settings, runs the selected scenarios, and reports the outcome.
async fn run(cli: Cli) -> Result<ExitCode, String> {
    let env = SystemTestConfig::load()?;
    let base_url = match cli.base_url.as_deref() {
        Some(raw) => parse_base_url("--base-url", raw)?,
        None => env.base_url.clone().ok_or_else(|| {
            format!("--base-url or {} is required", SystemTestEnv::BaseUrl.as_str())
        })?,
    };
    let timeout = match cli.timeout_secs {
        Some(0) => return Err("--timeout-secs must be greater than zero".to_string()),
        Some(secs) => Duration::from_secs(secs),
        None => env.timeout.unwrap_or(DEFAULT_TIMEOUT),
    };
    let check = cli.message_check.map_or(env.message_check, MessageCheck::from);
    let scenarios = select_scenarios(&cli.scenarios)?;

    let config = ClientConfig::new(base_url).map_err(|err| err.to_string())?.with_timeout(timeout);
    let reports = run_catalog(&config, &scenarios, check).await;

    for report in &reports {
        write_report_lines(report).map_err(|err| format!("failed to write stdout: {err}"))?;
    }
    if let Some(path) = cli.report.as_deref() {
        write_json_report(path, &reports)?;
    }
    let failed = reports.iter().filter(|report| !report.passed).count();
    write_stdout_line(&format!("{} passed, {failed} failed", reports.len() - failed))
        .map_err(|err| format!("failed to write stdout: {err}"))?;
    Ok(if failed == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Maps scenario names to the catalog, preserving catalog order when empty.
fn select_scenarios(names: &[String]) -> Result<Vec<ContractScenario>, String> {
    if names.is_empty() {
        return Ok(ContractScenario::ALL.to_vec());
    }
    names.iter().map(|name| name.parse::<ContractScenario>()).collect()
}

/// Prints the verdict line and any failure details for one report.
fn write_report_lines(report: &ScenarioReport) -> std::io::Result<()> {
    let verdict = if report.passed { "PASS" } else { "FAIL" };
    write_stdout_line(&format!("{verdict} {}", report.scenario))?;
    for failure in &report.failures {
        write_stdout_line(&format!("    {failure}"))?;
    }
    Ok(())
}

/// Writes the reports as pretty JSON.
fn write_json_report(path: &Path, reports: &[ScenarioReport]) -> Result<(), String> {
    let bytes = serde_json::to_vec_pretty(reports)
        .map_err(|err| format!("failed to encode report: {err}"))?;
    std::fs::write(path, bytes)
        .map_err(|err| format!("failed to write report {}: {err}", path.display()))
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(&mut stderr, "favorites_contract_check: {message}");
    ExitCode::FAILURE
}
