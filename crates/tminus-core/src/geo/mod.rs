//! Observer location: coordinates, the resolved location fix and the
//! one-shot network lookup that produces it.

mod locator;

pub use locator::{GeoLocator, DEFAULT_LOOKUP_URL};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Label shown while no lookup has succeeded.
pub const PLACEHOLDER_LABEL: &str = "UNKNOWN SECTOR";

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Fallback used before the lookup completes or when it fails.
    pub const DEFAULT: Coordinates = Coordinates {
        latitude: 20.5937,
        longitude: 78.9629,
    };

    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(ValidationError::InvalidCoordinates {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = ValidationError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Coordinates::new(raw.latitude, raw.longitude)
    }
}

impl Default for Coordinates {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.4}°{} {:.4}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

/// Reachability of the geolocation service as last observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkStatus {
    /// Lookup not finished yet.
    #[default]
    Pending,
    Online,
    Offline,
}

/// Outcome of a geolocation lookup. Always usable: failures carry the
/// default coordinates and the placeholder label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub coordinates: Coordinates,
    pub label: String,
    pub status: NetworkStatus,
}

impl LocationFix {
    pub fn resolved(coordinates: Coordinates, city: &str, country_code: &str) -> Self {
        let label = match (city.trim(), country_code.trim()) {
            ("", "") => PLACEHOLDER_LABEL.to_string(),
            (city, "") => city.to_uppercase(),
            ("", cc) => cc.to_uppercase(),
            (city, cc) => format!("{}, {}", city.to_uppercase(), cc.to_uppercase()),
        };
        Self {
            coordinates,
            label,
            status: NetworkStatus::Online,
        }
    }

    /// Coordinates given by the user. No lookup runs, so the status is
    /// `Offline` and the label is the coordinate pair itself.
    pub fn manual(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            label: coordinates.to_string(),
            status: NetworkStatus::Offline,
        }
    }

    /// The deterministic fallback for a failed lookup.
    pub fn offline() -> Self {
        Self {
            coordinates: Coordinates::DEFAULT,
            label: PLACEHOLDER_LABEL.to_string(),
            status: NetworkStatus::Offline,
        }
    }

    /// State before any lookup has been attempted.
    pub fn pending() -> Self {
        Self {
            coordinates: Coordinates::DEFAULT,
            label: PLACEHOLDER_LABEL.to_string(),
            status: NetworkStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_coordinates() {
        assert!(Coordinates::new(91.0, 0.0).is_err());
        assert!(Coordinates::new(0.0, -180.5).is_err());
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn default_is_the_fallback_pair() {
        let c = Coordinates::default();
        assert_eq!(c.latitude(), 20.5937);
        assert_eq!(c.longitude(), 78.9629);
    }

    #[test]
    fn resolved_label_joins_city_and_country() {
        let fix = LocationFix::resolved(Coordinates::DEFAULT, "Lisbon", "pt");
        assert_eq!(fix.label, "LISBON, PT");
        assert_eq!(fix.status, NetworkStatus::Online);

        let fix = LocationFix::resolved(Coordinates::DEFAULT, " ", "");
        assert_eq!(fix.label, PLACEHOLDER_LABEL);
    }

    #[test]
    fn manual_fix_is_labelled_by_its_coordinates() {
        let sydney = Coordinates::new(-33.8688, 151.2093).unwrap();
        let fix = LocationFix::manual(sydney);
        assert_eq!(fix.label, "33.8688°S 151.2093°E");
        assert_eq!(fix.status, NetworkStatus::Offline);
        assert_eq!(fix.coordinates, sydney);
    }

    #[test]
    fn deserialization_validates_range() {
        let ok: Result<Coordinates, _> =
            serde_json::from_str(r#"{"latitude": 51.5, "longitude": -0.12}"#);
        assert!(ok.is_ok());
        let bad: Result<Coordinates, _> =
            serde_json::from_str(r#"{"latitude": 151.5, "longitude": -0.12}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn display_uses_hemisphere_suffixes() {
        let c = Coordinates::new(-33.8688, -151.2093).unwrap();
        assert_eq!(c.to_string(), "33.8688°S 151.2093°W");
    }
}
