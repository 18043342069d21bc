//! Geofence membership for check-in and check-out.
//!
//! Distances are great-circle distances on a spherical Earth, computed with
//! the Haversine formula in `f64` throughout.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{CheckinZone, GeoPoint, ZoneResolution};

/// Mean Earth radius in metres.
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// How a point inside several overlapping zones is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneMatchPolicy {
    /// The first matching zone in input order.
    #[default]
    FirstMatch,
    /// The matching zone whose centre is closest; ties keep input order.
    Nearest,
}

/// Returns the great-circle distance in metres between two points.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::haversine_distance;
/// use attendance_engine::models::GeoPoint;
///
/// let a = GeoPoint::new(37.7749, -122.4194).unwrap();
/// let b = GeoPoint::new(37.7762, -122.4194).unwrap();
///
/// let d = haversine_distance(a, b);
/// assert!((d - 144.6).abs() < 0.5);
/// assert_eq!(haversine_distance(a, a), 0.0);
/// ```
pub fn haversine_distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // rounding can nudge h just past 1 for antipodal points
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_METERS * c
}

/// Resolves a point against the check-in zones, first match wins.
///
/// Inactive zones are skipped. A zone matches when the distance from its
/// centre is at most its radius, so a point on the boundary is inside.
///
/// # Examples
///
/// ```
/// use attendance_engine::calculation::resolve_zone;
/// use attendance_engine::models::{CheckinZone, GeoPoint};
///
/// let zones = vec![CheckinZone {
///     name: "HQ".to_string(),
///     latitude: 37.7749,
///     longitude: -122.4194,
///     radius_meters: 100.0,
///     is_active: true,
/// }];
///
/// let at_centre = resolve_zone(GeoPoint::new(37.7749, -122.4194).unwrap(), &zones);
/// assert!(at_centre.in_zone);
/// assert_eq!(at_centre.zone_name.as_deref(), Some("HQ"));
///
/// let away = resolve_zone(GeoPoint::new(37.7762, -122.4194).unwrap(), &zones);
/// assert!(!away.in_zone);
/// ```
pub fn resolve_zone(point: GeoPoint, zones: &[CheckinZone]) -> ZoneResolution {
    resolve_zone_with(point, zones, ZoneMatchPolicy::FirstMatch)
}

/// Resolves a point against the check-in zones using `policy` for overlaps.
pub fn resolve_zone_with(
    point: GeoPoint,
    zones: &[CheckinZone],
    policy: ZoneMatchPolicy,
) -> ZoneResolution {
    let mut matches = zones
        .iter()
        .filter(|zone| zone.is_active)
        .map(|zone| (zone, haversine_distance(point, zone.center())))
        .filter(|(zone, distance)| *distance <= zone.radius_meters);

    let matched = match policy {
        ZoneMatchPolicy::FirstMatch => matches.next(),
        ZoneMatchPolicy::Nearest => matches.fold(None, |best, candidate| match best {
            Some((_, best_distance)) if best_distance <= candidate.1 => best,
            _ => Some(candidate),
        }),
    };

    match matched {
        Some((zone, distance)) => {
            debug!(
                zone = %zone.name,
                distance_meters = distance,
                "Point resolved to check-in zone"
            );
            ZoneResolution {
                in_zone: true,
                zone_name: Some(zone.name.clone()),
                distance_meters: Some(distance),
            }
        }
        None => ZoneResolution::outside(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint::new(latitude, longitude).unwrap()
    }

    fn zone(name: &str, latitude: f64, longitude: f64, radius_meters: f64) -> CheckinZone {
        CheckinZone {
            name: name.to_string(),
            latitude,
            longitude,
            radius_meters,
            is_active: true,
        }
    }

    #[test]
    fn test_point_at_centre_is_inside() {
        let zones = vec![zone("HQ", 37.7749, -122.4194, 100.0)];
        let result = resolve_zone(point(37.7749, -122.4194), &zones);

        assert!(result.in_zone);
        assert_eq!(result.zone_name.as_deref(), Some("HQ"));
        assert_eq!(result.distance_meters, Some(0.0));
    }

    #[test]
    fn test_point_145m_north_is_outside_100m_zone() {
        let zones = vec![zone("HQ", 37.7749, -122.4194, 100.0)];
        let result = resolve_zone(point(37.7762, -122.4194), &zones);

        assert_eq!(result, ZoneResolution::outside());
    }

    #[test]
    fn test_zero_radius_zone_contains_its_centre() {
        let zones = vec![zone("Kiosk", 51.5007, -0.1246, 0.0)];
        assert!(resolve_zone(point(51.5007, -0.1246), &zones).in_zone);
    }

    #[test]
    fn test_inactive_zones_are_skipped() {
        let mut hq = zone("HQ", 37.7749, -122.4194, 100.0);
        hq.is_active = false;

        let result = resolve_zone(point(37.7749, -122.4194), &[hq]);
        assert!(!result.in_zone);
    }

    #[test]
    fn test_no_zones_is_outside() {
        assert!(!resolve_zone(point(0.0, 0.0), &[]).in_zone);
    }

    #[test]
    fn test_overlapping_zones_first_match_wins() {
        // the point sits at the centre of "Annex" but inside "Campus" too
        let zones = vec![
            zone("Campus", 37.7749, -122.4194, 500.0),
            zone("Annex", 37.7762, -122.4194, 50.0),
        ];
        let p = point(37.7762, -122.4194);

        let first = resolve_zone(p, &zones);
        assert_eq!(first.zone_name.as_deref(), Some("Campus"));

        let nearest = resolve_zone_with(p, &zones, ZoneMatchPolicy::Nearest);
        assert_eq!(nearest.zone_name.as_deref(), Some("Annex"));
        assert_eq!(nearest.distance_meters, Some(0.0));
    }

    #[test]
    fn test_nearest_ties_keep_input_order() {
        let zones = vec![
            zone("North Gate", 10.0, 10.0, 100.0),
            zone("South Gate", 10.0, 10.0, 100.0),
        ];
        let result = resolve_zone_with(point(10.0, 10.0), &zones, ZoneMatchPolicy::Nearest);
        assert_eq!(result.zone_name.as_deref(), Some("North Gate"));
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let a = point(40.7128, -74.0060);
        let b = point(51.5074, -0.1278);

        let ab = haversine_distance(a, b);
        assert!((ab - haversine_distance(b, a)).abs() < 1e-6);
        // New York to London
        assert!((ab - 5_570_000.0).abs() < 10_000.0);
    }

    #[test]
    fn test_haversine_antipodal_points() {
        let d = haversine_distance(point(0.0, 0.0), point(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_METERS).abs() < 1e-3);
    }
}
