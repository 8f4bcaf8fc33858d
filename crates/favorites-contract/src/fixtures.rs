// crates/favorites-contract/src/fixtures.rs
// ============================================================================
// Module: Contract Fixtures
// Description: Canonical payload values used by contract scenarios.
// Purpose: Keep request fixtures identical across scenarios, tests, and tools.
// Dependencies: none
// ============================================================================

//! Canonical payload values for contract scenarios.

use crate::model::FavoriteForm;
use crate::rules::TITLE_MAX_CHARS;

/// Title of the canonical valid place.
pub const TITLE: &str = "Место123";
/// Title used by payloads that omit or corrupt another field.
pub const OMISSION_TITLE: &str = "Место1";
/// Latitude of the canonical valid place.
pub const LAT: f64 = 55.028_254;
/// Longitude of the canonical valid place.
pub const LON: f64 = 82.918_501;
/// Non-numeric latitude value.
pub const LAT_NOT_A_NUMBER: &str = "где-то тут";
/// Non-numeric longitude value.
pub const LON_NOT_A_NUMBER: &str = "где то там";
/// Color outside the accepted set.
pub const INVALID_COLOR: &str = "REDDDD";

/// Returns the canonical valid payload without a color.
#[must_use]
pub fn valid_form() -> FavoriteForm {
    FavoriteForm::place(TITLE, LAT, LON)
}

/// Returns the payload that missing-field and wrong-type cases start from.
#[must_use]
pub fn omission_base_form() -> FavoriteForm {
    FavoriteForm::place(OMISSION_TITLE, LAT, LON)
}

/// Returns the shortest title the length rule rejects.
#[must_use]
pub fn first_rejected_title() -> String {
    "x".repeat(TITLE_MAX_CHARS + 1)
}

/// Returns the decimal digits of `0..1500` concatenated (4890 characters).
#[must_use]
pub fn overlong_title() -> String {
    (0..1500).map(|index: u32| index.to_string()).collect()
}
