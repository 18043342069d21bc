//! Check-in zone and coordinate models.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude, positive north.
    pub latitude: f64,
    /// Longitude, positive east.
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point, rejecting non-finite or out-of-range coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use attendance_engine::models::GeoPoint;
    ///
    /// assert!(GeoPoint::new(37.7749, -122.4194).is_ok());
    /// assert!(GeoPoint::new(91.0, 0.0).is_err());
    /// assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> EngineResult<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(EngineError::invalid_input(
                "latitude",
                format!("{} is not within [-90, 90]", latitude),
            ));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(EngineError::invalid_input(
                "longitude",
                format!("{} is not within [-180, 180]", longitude),
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// A circular region within which check-in and check-out are permitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckinZone {
    /// Display name, returned on a match.
    pub name: String,
    /// Latitude of the centre.
    pub latitude: f64,
    /// Longitude of the centre.
    pub longitude: f64,
    /// Radius in metres; the boundary itself is inside the zone.
    pub radius_meters: f64,
    /// Inactive zones never match.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CheckinZone {
    /// Returns the zone centre.
    pub fn center(&self) -> GeoPoint {
        GeoPoint {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// The outcome of resolving a coordinate against the check-in zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneResolution {
    /// Whether the point lies within an active zone.
    pub in_zone: bool,
    /// The name of the matched zone.
    pub zone_name: Option<String>,
    /// Distance in metres from the matched zone's centre.
    pub distance_meters: Option<f64>,
}

impl ZoneResolution {
    /// A resolution with no matching zone.
    pub fn outside() -> Self {
        Self {
            in_zone: false,
            zone_name: None,
            distance_meters: None,
        }
    }
}
