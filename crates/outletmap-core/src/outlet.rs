//! Outlet records as served by the backend and as held for display.
//!
//! The listing endpoint is loose about coordinate types: `latitude` and
//! `longitude` arrive as JSON strings (`"3.1578"`) from some deployments and as
//! numbers from others. [`CoordinateValue`] accepts both and defers parsing to
//! [`Outlet::from_raw`], which rejects anything that is not a finite number.
//!
//! Search results may carry an alternate `coordinate` for an outlet. Its shape
//! is not pinned down by the backend, so [`GeoPoint`] deserializes from either
//! `{"latitude": .., "longitude": ..}` (with `lat`/`lng`/`lon` aliases) or a
//! `[latitude, longitude]` pair.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A JSON value that should hold a decimal degree, as a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateValue {
    Number(f64),
    Text(String),
}

impl CoordinateValue {
    /// Returns the value as a finite `f64`, or `None` if it cannot be parsed.
    #[must_use]
    pub fn to_degrees(&self) -> Option<f64> {
        let value = match self {
            CoordinateValue::Number(n) => *n,
            CoordinateValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl std::fmt::Display for CoordinateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateValue::Number(n) => write!(f, "{n}"),
            CoordinateValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoPointRepr")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum GeoPointRepr {
    Object {
        #[serde(alias = "lat")]
        latitude: CoordinateValue,
        #[serde(alias = "lng", alias = "lon")]
        longitude: CoordinateValue,
    },
    Pair([CoordinateValue; 2]),
}

impl TryFrom<GeoPointRepr> for GeoPoint {
    type Error = String;

    fn try_from(repr: GeoPointRepr) -> Result<Self, Self::Error> {
        let (latitude, longitude) = match repr {
            GeoPointRepr::Object {
                latitude,
                longitude,
            } => (latitude, longitude),
            GeoPointRepr::Pair([latitude, longitude]) => (latitude, longitude),
        };
        let lat = latitude
            .to_degrees()
            .ok_or_else(|| format!("invalid latitude \"{latitude}\""))?;
        let lng = longitude
            .to_degrees()
            .ok_or_else(|| format!("invalid longitude \"{longitude}\""))?;
        Ok(GeoPoint {
            latitude: lat,
            longitude: lng,
        })
    }
}

/// Display variant of an outlet's map marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightState {
    #[default]
    Default,
    /// Within the highlight radius of the most recently clicked outlet.
    Proximity,
    /// Present in the most recent search result set.
    Matched,
}

impl std::fmt::Display for HighlightState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HighlightState::Default => write!(f, "default"),
            HighlightState::Proximity => write!(f, "proximity"),
            HighlightState::Matched => write!(f, "matched"),
        }
    }
}

/// One record from the outlet listing endpoint, before coordinate parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOutlet {
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub operating_hour: String,
    #[serde(default)]
    pub waze: String,
    pub latitude: CoordinateValue,
    pub longitude: CoordinateValue,
}

/// An outlet ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlet {
    pub name: String,
    pub address: String,
    pub operating_hour: String,
    pub waze: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Alternate position supplied by a search result; survives later resets.
    pub coordinate: Option<GeoPoint>,
    pub highlight: HighlightState,
}

impl Outlet {
    /// Parse a raw listing record into a default-highlighted outlet.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidCoordinate`] if either coordinate is not a
    /// finite decimal number.
    pub fn from_raw(raw: RawOutlet) -> Result<Self, CoreError> {
        let latitude = raw
            .latitude
            .to_degrees()
            .ok_or_else(|| CoreError::InvalidCoordinate {
                name: raw.name.clone(),
                field: "latitude",
                value: raw.latitude.to_string(),
            })?;
        let longitude = raw
            .longitude
            .to_degrees()
            .ok_or_else(|| CoreError::InvalidCoordinate {
                name: raw.name.clone(),
                field: "longitude",
                value: raw.longitude.to_string(),
            })?;

        Ok(Self {
            name: raw.name,
            address: raw.address,
            operating_hour: raw.operating_hour,
            waze: raw.waze,
            latitude,
            longitude,
            coordinate: None,
            highlight: HighlightState::Default,
        })
    }

    /// The listed location, used for proximity checks.
    #[must_use]
    pub fn location(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Where the marker is drawn: the search override if one was applied,
    /// otherwise the listed location.
    #[must_use]
    pub fn position(&self) -> GeoPoint {
        self.coordinate.unwrap_or_else(|| self.location())
    }
}
