// system-tests/tests/suites/contract_cli.rs
// ============================================================================
// Module: Contract CLI Tests
// Description: End-to-end runs of the favorites_contract_check binary.
// Purpose: Verify exit codes, stdout lines, and the JSON report file.
// Dependencies: helpers, serde_json, tempfile
// ============================================================================

//! ## Overview
//! The binary is pointed at the resolved target with `--base-url`, so these
//! tests cover the same deployment as the endpoint suites.

use std::error::Error;

use favorites_contract::ContractScenario;
use helpers::artifacts::ReportStatus;
use helpers::artifacts::TestReporter;
use helpers::cli::run_contract_check;
use helpers::harness::resolve_target;
use serde_json::Value;
use tempfile::TempDir;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn cli_reports_passing_catalog() -> Result<(), Box<dyn Error>> {
    let mut reporter = TestReporter::new("cli_reports_passing_catalog")?;
    let target = resolve_target().await?;
    let temp = TempDir::new()?;
    let report_path = temp.path().join("report.json");

    let output = run_contract_check(vec![
        "--base-url".to_string(),
        target.base_url().to_string(),
        "--message-check".to_string(),
        target.message_check().as_str().to_string(),
        "--report".to_string(),
        report_path.display().to_string(),
    ])
    .await?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    reporter.artifacts().write_text("cli_stdout.txt", &stdout)?;
    if !output.status.success() {
        return Err(format!(
            "cli failed: {stdout}\n{}",
            String::from_utf8_lossy(&output.stderr)
        )
        .into());
    }
    let total = ContractScenario::ALL.len();
    if !stdout.contains(&format!("{total} passed, 0 failed")) {
        return Err(format!("missing tally line: {stdout}").into());
    }
    for scenario in ContractScenario::ALL {
        if !stdout.contains(&format!("PASS {scenario}")) {
            return Err(format!("missing PASS line for {scenario}").into());
        }
    }

    let report: Value = serde_json::from_slice(&std::fs::read(&report_path)?)?;
    let entries = report.as_array().ok_or("report is not an array")?;
    if entries.len() != total {
        return Err(format!("report has {} entries", entries.len()).into());
    }
    if !entries.iter().all(|entry| entry.get("passed") == Some(&Value::Bool(true))) {
        return Err("report lists a failed scenario".into());
    }

    reporter.finish(ReportStatus::Pass, vec!["cli passed the full catalog".to_string()])?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_runs_only_selected_scenarios() -> Result<(), Box<dyn Error>> {
    let mut reporter = TestReporter::new("cli_runs_only_selected_scenarios")?;
    let target = resolve_target().await?;

    let output = run_contract_check(vec![
        "--base-url".to_string(),
        target.base_url().to_string(),
        "--scenario".to_string(),
        "wrong_method".to_string(),
        "--scenario".to_string(),
        "invalid_color".to_string(),
    ])
    .await?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    if !output.status.success() {
        return Err(format!("cli failed: {stdout}").into());
    }
    let verdicts: Vec<&str> = stdout
        .lines()
        .filter(|line| line.starts_with("PASS ") || line.starts_with("FAIL "))
        .collect();
    if verdicts != ["PASS wrong_method", "PASS invalid_color"] {
        return Err(format!("unexpected verdict lines: {verdicts:?}").into());
    }

    reporter.finish(ReportStatus::Pass, vec!["cli honored --scenario order".to_string()])?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn cli_rejects_unknown_scenario() -> Result<(), Box<dyn Error>> {
    let mut reporter = TestReporter::new("cli_rejects_unknown_scenario")?;
    let target = resolve_target().await?;

    let output = run_contract_check(vec![
        "--base-url".to_string(),
        target.base_url().to_string(),
        "--scenario".to_string(),
        "delete_everything".to_string(),
    ])
    .await?;
    if output.status.success() {
        return Err("cli accepted an unknown scenario".into());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.contains("unknown scenario: delete_everything") {
        return Err(format!("unexpected stderr: {stderr}").into());
    }

    reporter.finish(ReportStatus::Pass, vec!["unknown scenario failed closed".to_string()])?;
    Ok(())
}
