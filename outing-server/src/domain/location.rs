//! Origin and destination coordinates.

use serde::{Deserialize, Serialize};

use super::DomainError;

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Check that both components are finite and inside their ranges.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(DomainError::InvalidCoordinates("coordinates must be finite"));
        }
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(DomainError::InvalidCoordinates(
                "latitude must be within [-90, 90]",
            ));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(DomainError::InvalidCoordinates(
                "longitude must be within [-180, 180]",
            ));
        }
        Ok(())
    }
}

/// Where the user is starting from.
///
/// A location of exactly `(0, 0)` means the user typed a place name instead
/// of sharing their position: only `label` carries information. Use
/// [`Location::has_known_coordinates`] rather than comparing coordinates
/// directly, so every geographic check branches on the same condition.
///
/// # Examples
///
/// ```
/// use outing_server::domain::Location;
///
/// let typed = Location::from_label("Paris");
/// assert!(!typed.has_known_coordinates());
///
/// let gps = Location::new(12.9716, 77.5946, Some("Koramangala".into()));
/// assert!(gps.has_known_coordinates());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,

    #[serde(rename = "lng", alias = "longitude")]
    pub longitude: f64,

    /// Human-readable name, from reverse geocoding or typed by the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, label: Option<String>) -> Self {
        Self {
            latitude,
            longitude,
            label,
        }
    }

    /// A location known only by name.
    pub fn from_label(label: impl Into<String>) -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            label: Some(label.into()),
        }
    }

    /// False for the `(0, 0)` unknown-coordinates sentinel.
    pub fn has_known_coordinates(&self) -> bool {
        !(self.latitude == 0.0 && self.longitude == 0.0)
    }

    /// Coordinates, or `None` for the unknown-coordinates sentinel.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.has_known_coordinates()
            .then(|| Coordinates::new(self.latitude, self.longitude))
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        Coordinates::new(self.latitude, self.longitude).validate()
    }
}
