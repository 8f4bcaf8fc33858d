// crates/favorites-client/src/runner.rs
// ============================================================================
// Module: Scenario Runner
// Description: Executes contract scenarios against a favorites deployment.
// Purpose: Turn scenario steps into requests and collect every mismatch.
// Dependencies: favorites-contract, serde, tracing
// ============================================================================

//! ## Overview
//! Each scenario runs on a fresh [`FavoritesClient`], so sessions never leak
//! between scenarios. Steps are sent once, in order. A status mismatch skips
//! the body checks for that step; every other mismatch is collected so a
//! report lists all of them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use favorites_contract::ContractScenario;
use favorites_contract::Expectation;
use favorites_contract::MessageCheck;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::client::ApiResponse;
use crate::client::ClientConfig;
use crate::client::ClientError;
use crate::client::FavoritesClient;
use crate::client::TranscriptEntry;

/// Keys a created place must carry.
const CREATED_KEYS: [&str; 5] = ["title", "lat", "lon", "color", "created_at"];

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Result of running one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Scenario that ran.
    pub scenario: ContractScenario,
    /// True when no failure was recorded.
    pub passed: bool,
    /// Human-readable mismatches, in the order found.
    pub failures: Vec<String>,
    /// Exchanges sent while running the scenario.
    pub transcript: Vec<TranscriptEntry>,
}

impl ScenarioReport {
    /// Builds a failed report for a scenario that could not run to completion.
    #[must_use]
    pub fn errored(
        scenario: ContractScenario,
        error: &ClientError,
        transcript: Vec<TranscriptEntry>,
    ) -> Self {
        Self {
            scenario,
            passed: false,
            failures: vec![format!("client error: {error}")],
            transcript,
        }
    }
}

// ============================================================================
// SECTION: Evaluation
// ============================================================================

/// Compares one response against its expectation.
///
/// Returns an empty list when the response satisfies the expectation.
#[must_use]
pub fn evaluate_step(
    expectation: &Expectation,
    response: &ApiResponse,
    check: MessageCheck,
) -> Vec<String> {
    let expected_status = expectation.status();
    let actual = response.status.as_u16();
    if actual != expected_status.code() {
        return vec![format!("expected status {expected_status}, got {}", response.status)];
    }
    let mut failures = Vec::new();
    match expectation {
        Expectation::Created(expected) => {
            for key in CREATED_KEYS {
                if !response.has_field(key) {
                    failures.push(format!("response is missing key {key}"));
                }
            }
            match response.place() {
                Ok(place) => failures.extend(expected.mismatches(&place)),
                Err(err) => failures.push(err.to_string()),
            }
        }
        Expectation::Rejected {
            message: Some(message), ..
        } if check == MessageCheck::Exact => match response.error_message() {
            Some(actual) if actual == message.as_str() => {}
            Some(actual) => {
                failures.push(format!("error.message: expected {message}, got {actual}"));
            }
            None => failures.push(format!("error.message missing, expected {message}")),
        },
        Expectation::Rejected { .. } => {}
    }
    failures
}

// ============================================================================
// SECTION: Execution
// ============================================================================

/// Runs one scenario on a fresh client.
///
/// # Errors
///
/// Returns [`ClientError`] when the client cannot be built, login fails, or a
/// request fails at the transport level.
pub async fn run_scenario(
    config: &ClientConfig,
    scenario: ContractScenario,
    check: MessageCheck,
) -> Result<ScenarioReport, ClientError> {
    let client = FavoritesClient::new(config.clone())?;
    let failures = drive(&client, scenario, check).await?;
    let passed = failures.is_empty();
    info!(scenario = scenario.name(), passed, "contract scenario finished");
    Ok(ScenarioReport {
        scenario,
        passed,
        failures,
        transcript: client.transcript(),
    })
}

/// Runs `scenarios` in order, turning client errors into failed reports.
pub async fn run_catalog(
    config: &ClientConfig,
    scenarios: &[ContractScenario],
    check: MessageCheck,
) -> Vec<ScenarioReport> {
    let mut reports = Vec::with_capacity(scenarios.len());
    for scenario in scenarios.iter().copied() {
        let report = match run_scenario(config, scenario, check).await {
            Ok(report) => report,
            Err(err) => {
                info!(scenario = scenario.name(), error = %err, "contract scenario errored");
                ScenarioReport::errored(scenario, &err, Vec::new())
            }
        };
        reports.push(report);
    }
    reports
}

/// Logs in when needed, sends every step, and returns the collected failures.
async fn drive(
    client: &FavoritesClient,
    scenario: ContractScenario,
    check: MessageCheck,
) -> Result<Vec<String>, ClientError> {
    if scenario.requires_session() {
        let session = client.login().await?;
        if !session.cookie_set {
            return Ok(vec!["auth endpoint did not set a session cookie".to_string()]);
        }
    }
    let mut failures = Vec::new();
    let mut sent_colors = Vec::new();
    let mut returned_colors = Vec::new();
    for (index, step) in scenario.steps().iter().enumerate() {
        let response = client.send_favorites(step.method, &step.form).await?;
        let position = index + 1;
        failures.extend(
            evaluate_step(&step.expectation, &response, check)
                .into_iter()
                .map(|failure| format!("step {position}: {failure}")),
        );
        if let Expectation::Created(expected) = &step.expectation
            && let Some(color) = expected.color
        {
            sent_colors.push(Value::from(color.as_str()));
            returned_colors.push(response.body.get("color").cloned().unwrap_or(Value::Null));
        }
    }
    if sent_colors != returned_colors {
        failures.push(format!(
            "returned colors {} differ from submitted {}",
            Value::Array(returned_colors),
            Value::Array(sent_colors)
        ));
    }
    Ok(failures)
}

// ============================================================================
// SECTION: Tests
// ============================================================================
