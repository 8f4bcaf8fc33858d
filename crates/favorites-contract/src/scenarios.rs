// crates/favorites-contract/src/scenarios.rs
// ============================================================================
// Module: Contract Scenarios
// Description: Catalog of favorites API contract scenarios.
// Purpose: Describe each scenario as ordered requests with expected outcomes.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A [`ContractScenario`] is a self-contained check: it says whether a
//! session is needed and lists the requests to send with what each one must
//! return. Runners execute the steps once, in order, against a fresh client;
//! nothing is retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::fixtures;
use crate::model::ApiStatus;
use crate::model::Color;
use crate::model::FavoriteForm;
use crate::model::FavoritePlace;
use crate::model::FormField;
use crate::rules::ContractViolation;

// ============================================================================
// SECTION: Request Method
// ============================================================================

/// HTTP verb used by a scenario step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestMethod {
    /// `GET`.
    Get,
    /// `POST`.
    Post,
}

impl RequestMethod {
    /// Returns the verb as sent on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

// ============================================================================
// SECTION: Message Check
// ============================================================================

/// How strictly error messages are compared.
///
/// # Invariants
/// - Status codes are always compared; this only governs `error.message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageCheck {
    /// Compare `error.message` verbatim against the catalog.
    #[default]
    Exact,
    /// Ignore message text and compare status codes only.
    StatusOnly,
}

impl MessageCheck {
    /// Returns the configuration spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::StatusOnly => "status-only",
        }
    }
}

impl FromStr for MessageCheck {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "exact" => Ok(Self::Exact),
            "status-only" => Ok(Self::StatusOnly),
            other => Err(format!("unknown message check: {other} (expected exact or status-only)")),
        }
    }
}

// ============================================================================
// SECTION: Expectations
// ============================================================================

/// Values a successful create must echo back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpectedPlace {
    /// Expected title.
    pub title: String,
    /// Expected latitude.
    pub lat: f64,
    /// Expected longitude.
    pub lon: f64,
    /// Expected color; `None` means the response must carry `null`.
    pub color: Option<Color>,
}

impl ExpectedPlace {
    /// Returns a description of every field that differs from `place`.
    #[must_use]
    #[allow(clippy::float_cmp, reason = "Coordinates must round-trip exactly.")]
    pub fn mismatches(&self, place: &FavoritePlace) -> Vec<String> {
        let mut out = Vec::new();
        if place.title != self.title {
            out.push(format!("title: expected {}, got {}", self.title, place.title));
        }
        if place.lat != self.lat {
            out.push(format!("lat: expected {}, got {}", self.lat, place.lat));
        }
        if place.lon != self.lon {
            out.push(format!("lon: expected {}, got {}", self.lon, place.lon));
        }
        if place.color != self.color {
            out.push(format!(
                "color: expected {}, got {}",
                color_label(self.color),
                color_label(place.color)
            ));
        }
        out
    }
}

/// Renders an optional color the way it appears in JSON.
fn color_label(color: Option<Color>) -> &'static str {
    color.map_or("null", Color::as_str)
}

/// Expected outcome of a single request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expectation {
    /// `200` with a body that echoes the submitted place and has `created_at`.
    Created(ExpectedPlace),
    /// A non-success status, optionally with a catalog message.
    Rejected {
        /// Expected status.
        status: ApiStatus,
        /// Expected `error.message`, when the contract pins it.
        message: Option<String>,
    },
}

impl Expectation {
    /// Returns the expected HTTP status.
    #[must_use]
    pub const fn status(&self) -> ApiStatus {
        match self {
            Self::Created(_) => ApiStatus::Ok,
            Self::Rejected {
                status, ..
            } => *status,
        }
    }

    /// Rejection whose message is pinned to the violation's catalog text.
    fn violation(violation: &ContractViolation) -> Self {
        Self::Rejected {
            status: violation.status(),
            message: Some(violation.message()),
        }
    }

    /// Rejection checked by status alone.
    const fn status_only(status: ApiStatus) -> Self {
        Self::Rejected {
            status,
            message: None,
        }
    }
}

/// One request in a scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioStep {
    /// HTTP verb.
    pub method: RequestMethod,
    /// Form body.
    pub form: FavoriteForm,
    /// Expected outcome.
    pub expectation: Expectation,
}

impl ScenarioStep {
    /// A POST of `form` expecting `expectation`.
    const fn post(form: FavoriteForm, expectation: Expectation) -> Self {
        Self {
            method: RequestMethod::Post,
            form,
            expectation,
        }
    }
}

// ============================================================================
// SECTION: Scenario Catalog
// ============================================================================

/// Contract scenarios for `POST /v1/favorites`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractScenario {
    /// Valid payload without a session is unauthorized.
    NotAuthenticated,
    /// Valid payload with a session creates the place.
    ValidCreate,
    /// GET is not allowed on the favorites endpoint.
    WrongMethod,
    /// `title` omitted.
    MissingTitle,
    /// `lat` omitted.
    MissingLat,
    /// `lon` omitted.
    MissingLon,
    /// Empty title.
    TitleTooShort,
    /// Title longer than the maximum.
    TitleTooLong,
    /// Non-numeric `lat`.
    LatNotANumber,
    /// Non-numeric `lon`.
    LonNotANumber,
    /// Every accepted color, submitted in catalog order.
    ValidColors,
    /// Color outside the accepted set.
    InvalidColor,
}

impl ContractScenario {
    /// Every scenario, in catalog order.
    pub const ALL: [Self; 12] = [
        Self::NotAuthenticated,
        Self::ValidCreate,
        Self::WrongMethod,
        Self::MissingTitle,
        Self::MissingLat,
        Self::MissingLon,
        Self::TitleTooShort,
        Self::TitleTooLong,
        Self::LatNotANumber,
        Self::LonNotANumber,
        Self::ValidColors,
        Self::InvalidColor,
    ];

    /// Returns the stable snake_case scenario name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NotAuthenticated => "not_authenticated",
            Self::ValidCreate => "valid_create",
            Self::WrongMethod => "wrong_method",
            Self::MissingTitle => "missing_title",
            Self::MissingLat => "missing_lat",
            Self::MissingLon => "missing_lon",
            Self::TitleTooShort => "title_too_short",
            Self::TitleTooLong => "title_too_long",
            Self::LatNotANumber => "lat_not_a_number",
            Self::LonNotANumber => "lon_not_a_number",
            Self::ValidColors => "valid_colors",
            Self::InvalidColor => "invalid_color",
        }
    }

    /// Returns true when the runner must log in before the first step.
    #[must_use]
    pub const fn requires_session(self) -> bool {
        !matches!(self, Self::NotAuthenticated)
    }

    /// Returns the ordered requests for this scenario.
    #[must_use]
    pub fn steps(self) -> Vec<ScenarioStep> {
        match self {
            Self::NotAuthenticated => vec![ScenarioStep::post(
                fixtures::valid_form(),
                Expectation::status_only(ApiStatus::Unauthorized),
            )],
            Self::ValidCreate => {
                vec![ScenarioStep::post(fixtures::valid_form(), created(None))]
            }
            Self::WrongMethod => vec![ScenarioStep {
                method: RequestMethod::Get,
                form: fixtures::valid_form(),
                expectation: Expectation::status_only(ApiStatus::MethodNotAllowed),
            }],
            Self::MissingTitle => missing(FormField::Title),
            Self::MissingLat => missing(FormField::Lat),
            Self::MissingLon => missing(FormField::Lon),
            Self::TitleTooShort => vec![ScenarioStep::post(
                fixtures::valid_form().with_title(""),
                Expectation::status_only(ApiStatus::BadRequest),
            )],
            Self::TitleTooLong => [fixtures::first_rejected_title(), fixtures::overlong_title()]
                .into_iter()
                .map(|title| {
                    ScenarioStep::post(
                        fixtures::valid_form().with_title(title),
                        Expectation::status_only(ApiStatus::BadRequest),
                    )
                })
                .collect(),
            Self::LatNotANumber => {
                not_a_number(FormField::Lat, fixtures::LAT_NOT_A_NUMBER)
            }
            Self::LonNotANumber => {
                not_a_number(FormField::Lon, fixtures::LON_NOT_A_NUMBER)
            }
            Self::ValidColors => Color::ALL
                .into_iter()
                .map(|color| {
                    ScenarioStep::post(
                        fixtures::valid_form().with_color(color),
                        created(Some(color)),
                    )
                })
                .collect(),
            Self::InvalidColor => vec![ScenarioStep::post(
                fixtures::valid_form().with_raw(FormField::Color, fixtures::INVALID_COLOR),
                Expectation::status_only(ApiStatus::BadRequest),
            )],
        }
    }
}

impl fmt::Display for ContractScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ContractScenario {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name() == raw)
            .ok_or_else(|| format!("unknown scenario: {raw}"))
    }
}

// ============================================================================
// SECTION: Step Builders
// ============================================================================

/// Expectation for a create of the canonical place with `color`.
fn created(color: Option<Color>) -> Expectation {
    Expectation::Created(ExpectedPlace {
        title: fixtures::TITLE.to_string(),
        lat: fixtures::LAT,
        lon: fixtures::LON,
        color,
    })
}

/// Single POST omitting `field`, expecting the required-field message.
fn missing(field: FormField) -> Vec<ScenarioStep> {
    vec![ScenarioStep::post(
        fixtures::omission_base_form().without(field),
        Expectation::violation(&ContractViolation::MissingField(field)),
    )]
}

/// Single POST with a non-numeric coordinate, expecting the number message.
fn not_a_number(field: FormField, raw: &str) -> Vec<ScenarioStep> {
    vec![ScenarioStep::post(
        fixtures::omission_base_form().with_raw(field, raw),
        Expectation::violation(&ContractViolation::NotANumber(field)),
    )]
}

// ============================================================================
// SECTION: Tests
// ============================================================================
