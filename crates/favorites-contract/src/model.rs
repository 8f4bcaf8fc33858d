// crates/favorites-contract/src/model.rs
// ============================================================================
// Module: Contract Models
// Description: Wire shapes for the favorites API.
// Purpose: Type the resource, error envelope, status taxonomy, and form payload.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Types in this module mirror what travels over the wire. Requests are
//! form-encoded, so [`FavoriteForm`] keeps every field as the raw string that
//! will be sent; that lets scenarios submit non-numeric coordinates or unknown
//! colors without bypassing the type. Responses are JSON and decode into
//! [`FavoritePlace`] or [`ErrorEnvelope`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Status Taxonomy
// ============================================================================

/// HTTP outcomes the favorites contract distinguishes.
///
/// # Invariants
/// - Each variant maps to exactly one HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiStatus {
    /// 200: the place was created.
    Ok,
    /// 400: validation rejected the payload.
    BadRequest,
    /// 401: no valid session cookie.
    Unauthorized,
    /// 405: the endpoint does not accept the HTTP verb.
    MethodNotAllowed,
}

impl ApiStatus {
    /// Returns the numeric HTTP status code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::MethodNotAllowed => 405,
        }
    }

    /// Maps a numeric status code back to a contract status.
    #[must_use]
    pub const fn from_code(code: u16) -> Option<Self> {
        match code {
            200 => Some(Self::Ok),
            400 => Some(Self::BadRequest),
            401 => Some(Self::Unauthorized),
            405 => Some(Self::MethodNotAllowed),
            _ => None,
        }
    }

    /// Returns the canonical reason phrase.
    #[must_use]
    pub const fn reason(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::MethodNotAllowed => "Method Not Allowed",
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

// ============================================================================
// SECTION: Color
// ============================================================================

/// Marker color of a favorite place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Color {
    /// `BLUE`.
    Blue,
    /// `GREEN`.
    Green,
    /// `RED`.
    Red,
    /// `YELLOW`.
    Yellow,
}

impl Color {
    /// Every accepted color, in catalog order.
    pub const ALL: [Self; 4] = [Self::Blue, Self::Green, Self::Red, Self::Yellow];

    /// Returns the wire spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blue => "BLUE",
            Self::Green => "GREEN",
            Self::Red => "RED",
            Self::Yellow => "YELLOW",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a color string is not one of [`Color::ALL`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown color: {0}")]
pub struct UnknownColor(pub String);

impl FromStr for Color {
    type Err = UnknownColor;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == raw)
            .ok_or_else(|| UnknownColor(raw.to_string()))
    }
}

// ============================================================================
// SECTION: Resource Types
// ============================================================================

/// Favorite place as returned by a successful create.
///
/// # Invariants
/// - `color` is `None` when the server returned `null` or omitted the key.
/// - `created_at` is opaque; only its presence is part of the contract.
/// - Fields the contract does not name are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoritePlace {
    /// Place title.
    pub title: String,
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
    /// Optional marker color.
    #[serde(default)]
    pub color: Option<Color>,
    /// Server-assigned creation timestamp.
    pub created_at: Value,
    /// Additional server fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// JSON body returned with a validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error details.
    pub error: ErrorBody,
}

/// Inner error payload of an [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub message: String,
}

impl ErrorEnvelope {
    /// Builds an envelope carrying `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                message: message.into(),
            },
        }
    }
}

// ============================================================================
// SECTION: Form Payload
// ============================================================================

/// Form fields accepted by `POST /v1/favorites`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    /// `title`.
    Title,
    /// `lat`.
    Lat,
    /// `lon`.
    Lon,
    /// `color`.
    Color,
}

impl FormField {
    /// Every field, in wire order.
    pub const ALL: [Self; 4] = [Self::Title, Self::Lat, Self::Lon, Self::Color];

    /// Returns the form key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Lat => "lat",
            Self::Lon => "lon",
            Self::Color => "color",
        }
    }

    /// Looks up a field by its form key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form-encoded create payload.
///
/// # Invariants
/// - Values are stored exactly as they go on the wire.
/// - Absent fields are omitted from the encoded form, never sent empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FavoriteForm {
    /// Raw `title` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    /// Raw `lat` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    lat: Option<String>,
    /// Raw `lon` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    lon: Option<String>,
    /// Raw `color` value.
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

impl FavoriteForm {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a form carrying a complete, typed place.
    #[must_use]
    pub fn place(title: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self::new().with_title(title).with_lat(lat).with_lon(lon)
    }

    /// Rebuilds a form from decoded key/value pairs.
    ///
    /// Unknown keys are ignored. When a key repeats, the first value wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::new();
        for (key, value) in pairs {
            let Some(field) = FormField::from_key(key.as_ref()) else {
                continue;
            };
            let slot = form.slot_mut(field);
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        form
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_raw(FormField::Title, title)
    }

    /// Sets the latitude from a number.
    #[must_use]
    pub fn with_lat(self, lat: f64) -> Self {
        self.with_raw(FormField::Lat, lat.to_string())
    }

    /// Sets the longitude from a number.
    #[must_use]
    pub fn with_lon(self, lon: f64) -> Self {
        self.with_raw(FormField::Lon, lon.to_string())
    }

    /// Sets the color from the enum.
    #[must_use]
    pub fn with_color(self, color: Color) -> Self {
        self.with_raw(FormField::Color, color.as_str())
    }

    /// Sets any field to an arbitrary raw string.
    #[must_use]
    pub fn with_raw(mut self, field: FormField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    /// Removes a field so it is not sent at all.
    #[must_use]
    pub fn without(mut self, field: FormField) -> Self {
        *self.slot_mut(field) = None;
        self
    }

    /// Returns the raw value of a field.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&str> {
        match field {
            FormField::Title => self.title.as_deref(),
            FormField::Lat => self.lat.as_deref(),
            FormField::Lon => self.lon.as_deref(),
            FormField::Color => self.color.as_deref(),
        }
    }

    /// Returns the present fields as ordered key/value pairs for encoding.
    #[must_use]
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        FormField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|value| (field.as_str(), value)))
            .collect()
    }

    /// Returns a mutable handle to the storage for `field`.
    const fn slot_mut(&mut self, field: FormField) -> &mut Option<String> {
        match field {
            FormField::Title => &mut self.title,
            FormField::Lat => &mut self.lat,
            FormField::Lon => &mut self.lon,
            FormField::Color => &mut self.color,
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
