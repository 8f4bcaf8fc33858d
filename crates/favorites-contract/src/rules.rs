// crates/favorites-contract/src/rules.rs
// ============================================================================
// Module: Field Rules
// Description: Validation rules and error messages for the create payload.
// Purpose: Encode which submissions the favorites API accepts and why others fail.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The favorites API rejects a create with `400` and a message in
//! `error.message`. The messages observed from the service are Russian; the
//! [`ContractViolation`] display strings reproduce them verbatim so that
//! expectations and the loopback stub share one catalog.
//!
//! Checks run in a fixed order: required fields (`title`, `lat`, `lon`),
//! then title length, then numeric coordinates, then color.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::model::ApiStatus;
use crate::model::Color;
use crate::model::FavoriteForm;
use crate::model::FormField;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum title length in characters.
pub const TITLE_MIN_CHARS: usize = 1;
/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 998;

/// Fields that must be present on every create.
const REQUIRED_FIELDS: [FormField; 3] = [FormField::Title, FormField::Lat, FormField::Lon];

// ============================================================================
// SECTION: Violations
// ============================================================================

/// Reason a create payload is rejected.
///
/// # Invariants
/// - `Display` yields the exact message the service puts in `error.message`.
/// - Every variant maps to [`ApiStatus::BadRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractViolation {
    /// A mandatory field is absent.
    #[error("Параметр '{0}' является обязательным")]
    MissingField(FormField),
    /// A coordinate is not a finite number.
    #[error("Параметр '{0}' должен быть числом")]
    NotANumber(FormField),
    /// Title is shorter than [`TITLE_MIN_CHARS`].
    #[error("Длина title должна быть больше 1")]
    TitleTooShort,
    /// Title is longer than [`TITLE_MAX_CHARS`].
    #[error("Длина title должна быть меньше 999")]
    TitleTooLong {
        /// Submitted title length in characters.
        chars: usize,
    },
    /// Color is not one of [`Color::ALL`].
    #[error("Цвет должен быть только BLUE, GREEN, RED, YELLOW")]
    InvalidColor(String),
}

impl ContractViolation {
    /// Returns the HTTP status that accompanies the violation.
    #[must_use]
    pub const fn status(&self) -> ApiStatus {
        ApiStatus::BadRequest
    }

    /// Returns the message carried in `error.message`.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

// ============================================================================
// SECTION: Validation
// ============================================================================

/// Accepted create payload with parsed values.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceDraft {
    /// Title as submitted.
    pub title: String,
    /// Parsed latitude.
    pub lat: f64,
    /// Parsed longitude.
    pub lon: f64,
    /// Parsed color, `None` when omitted.
    pub color: Option<Color>,
}

/// Validates a create payload against the favorites field rules.
///
/// # Errors
///
/// Returns the first [`ContractViolation`] found, in rule order.
pub fn validate_submission(form: &FavoriteForm) -> Result<PlaceDraft, ContractViolation> {
    for field in REQUIRED_FIELDS {
        if form.get(field).is_none() {
            return Err(ContractViolation::MissingField(field));
        }
    }
    let title = form.get(FormField::Title).unwrap_or_default();
    let chars = title.chars().count();
    if chars < TITLE_MIN_CHARS {
        return Err(ContractViolation::TitleTooShort);
    }
    if chars > TITLE_MAX_CHARS {
        return Err(ContractViolation::TitleTooLong {
            chars,
        });
    }
    let lat = parse_coordinate(form, FormField::Lat)?;
    let lon = parse_coordinate(form, FormField::Lon)?;
    let color = match form.get(FormField::Color) {
        None => None,
        Some(raw) => Some(
            raw.parse::<Color>().map_err(|err| ContractViolation::InvalidColor(err.0))?,
        ),
    };
    Ok(PlaceDraft {
        title: title.to_string(),
        lat,
        lon,
        color,
    })
}

/// Parses a coordinate field as a finite number.
fn parse_coordinate(form: &FavoriteForm, field: FormField) -> Result<f64, ContractViolation> {
    let raw = form.get(field).ok_or(ContractViolation::MissingField(field))?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ContractViolation::NotANumber(field)),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
