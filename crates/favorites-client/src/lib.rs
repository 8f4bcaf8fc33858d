// crates/favorites-client/src/lib.rs
// ============================================================================
// Module: Favorites Client Library
// Description: HTTP client and scenario runner for the favorites API contract.
// Purpose: Drive the external favorites service and evaluate contract scenarios.
// Dependencies: favorites-contract, reqwest, serde, thiserror, tracing
// ============================================================================

//! ## Overview
//! [`FavoritesClient`] talks to a favorites deployment over HTTP with its own
//! cookie jar, so each client is one session. Every exchange is recorded in a
//! transcript for test artifacts. [`runner`] executes
//! [`favorites_contract::ContractScenario`] steps once each and reports every
//! mismatch.
//!
//! Security posture: server responses are untrusted; bodies are size-capped
//! and session cookie values never appear in logs or transcripts.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod client;
pub mod runner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::AUTH_TOKENS_PATH;
pub use client::ApiResponse;
pub use client::ClientConfig;
pub use client::ClientError;
pub use client::DEFAULT_TIMEOUT;
pub use client::FAVORITES_PATH;
pub use client::FavoritesClient;
pub use client::MAX_RESPONSE_BYTES;
pub use client::REDACTED;
pub use client::SessionInfo;
pub use client::TranscriptEntry;
pub use runner::ScenarioReport;
pub use runner::evaluate_step;
pub use runner::run_catalog;
pub use runner::run_scenario;
