// crates/favorites-contract/src/lib.rs
// ============================================================================
// Module: Favorites Contract Library
// Description: Canonical contract definitions for the favorites API.
// Purpose: Single source of truth for payload shapes, field rules, and scenarios.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The contract library describes the externally observable behavior of the
//! favorites API: the `FavoritePlace` resource, the form fields accepted by
//! `POST /v1/favorites`, the validation rules and their error messages, and
//! the catalog of contract scenarios the harness exercises.
//!
//! This crate performs no I/O. The HTTP client and the loopback contract stub
//! both build on it so that expectations and stub behavior cannot drift.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod fixtures;
pub mod model;
pub mod rules;
pub mod scenarios;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use model::ApiStatus;
pub use model::Color;
pub use model::ErrorBody;
pub use model::ErrorEnvelope;
pub use model::FavoriteForm;
pub use model::FavoritePlace;
pub use model::FormField;
pub use model::UnknownColor;
pub use rules::ContractViolation;
pub use rules::PlaceDraft;
pub use rules::TITLE_MAX_CHARS;
pub use rules::TITLE_MIN_CHARS;
pub use rules::validate_submission;
pub use scenarios::ContractScenario;
pub use scenarios::Expectation;
pub use scenarios::ExpectedPlace;
pub use scenarios::MessageCheck;
pub use scenarios::RequestMethod;
pub use scenarios::ScenarioStep;
