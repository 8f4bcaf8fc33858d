// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for favorites contract tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: favorites-contract, url
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8, empty values, and malformed values fail
//! closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use favorites_contract::MessageCheck;
use url::Url;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Base URL of the favorites deployment under test.
    BaseUrl,
    /// Optional run root override for artifacts.
    RunRoot,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Message comparison mode (`exact` or `status-only`).
    MessageCheck,
}

impl SystemTestEnv {
    /// Every key, in documentation order.
    pub const ALL: [Self; 4] =
        [Self::BaseUrl, Self::RunRoot, Self::TimeoutSeconds, Self::MessageCheck];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "FAVORITES_SYSTEM_TEST_BASE_URL",
            Self::RunRoot => "FAVORITES_SYSTEM_TEST_RUN_ROOT",
            Self::TimeoutSeconds => "FAVORITES_SYSTEM_TEST_TIMEOUT_SEC",
            Self::MessageCheck => "FAVORITES_SYSTEM_TEST_MESSAGE_CHECK",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// External deployment; `None` means the loopback contract stub is used.
    pub base_url: Option<Url>,
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Optional timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
    /// How error messages are compared.
    pub message_check: MessageCheck,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, a relative URL or a zero timeout).
    pub fn load() -> Result<Self, String> {
        let base_url = read_env_nonempty(SystemTestEnv::BaseUrl.as_str())?
            .map(|value| parse_base_url(SystemTestEnv::BaseUrl.as_str(), &value))
            .transpose()?;
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let message_check = read_env_nonempty(SystemTestEnv::MessageCheck.as_str())?
            .map(|value| {
                value.parse::<MessageCheck>().map_err(|err| {
                    format!("{}: {err}", SystemTestEnv::MessageCheck.as_str())
                })
            })
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            base_url,
            run_root,
            timeout,
            message_check,
        })
    }

    /// Returns `requested`, raised to the configured timeout override when larger.
    #[must_use]
    pub fn effective_timeout(&self, requested: Duration) -> Duration {
        self.timeout.map_or(requested, |floor| requested.max(floor))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses an absolute `http`/`https` base URL.
///
/// # Errors
///
/// Returns an error when the value does not parse or uses another scheme.
pub fn parse_base_url(name: &str, raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw.trim())
        .map_err(|err| format!("{name} must be an absolute http(s) URL: {err}"))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(format!("{name} must be an absolute http(s) URL"));
    }
    Ok(url)
}

/// Parses a positive timeout value from a string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
pub fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of seconds"));
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
