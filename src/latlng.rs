// src/latlng.rs

use crate::constants::{EARTH_RADIUS_KM, M_180_PI, M_PI, M_PI_180};
use crate::math::vec3d::{geo_to_vec3d, vec3d_to_geo};
use crate::types::{LatLng, S2Error, Vec3d};

impl LatLng {
  /// Builds a coordinate from degrees, rejecting latitudes outside
  /// `[-90, 90]`, longitudes outside `[-180, 180]` and non-finite values.
  pub fn from_degrees(lat_deg: f64, lng_deg: f64) -> Result<LatLng, S2Error> {
    if !lat_deg.is_finite() || !lng_deg.is_finite() || lat_deg.abs() > 90.0 || lng_deg.abs() > 180.0 {
      return Err(S2Error::LatLngDomain);
    }
    Ok(LatLng {
      lat: degs_to_rads(lat_deg),
      lng: degs_to_rads(lng_deg),
    })
  }

  /// Builds a coordinate from radians without validation.
  #[inline]
  #[must_use]
  pub const fn from_radians(lat: f64, lng: f64) -> LatLng {
    LatLng { lat, lng }
  }

  /// Latitude in degrees.
  #[inline]
  #[must_use]
  pub fn lat_degrees(&self) -> f64 {
    rads_to_degs(self.lat)
  }

  /// Longitude in degrees.
  #[inline]
  #[must_use]
  pub fn lng_degrees(&self) -> f64 {
    rads_to_degs(self.lng)
  }

  /// Whether the coordinate is finite and within the valid ranges.
  #[inline]
  #[must_use]
  pub fn is_valid(&self) -> bool {
    self.lat.is_finite() && self.lng.is_finite() && self.lat.abs() <= M_PI / 2.0 && self.lng.abs() <= M_PI
  }

  /// Unit vector for this coordinate.
  #[inline]
  #[must_use]
  pub fn to_point(&self) -> Vec3d {
    geo_to_vec3d(self)
  }

  /// Coordinate of a direction vector.
  #[inline]
  #[must_use]
  pub fn from_point(p: &Vec3d) -> LatLng {
    vec3d_to_geo(p)
  }
}

/// The great circle distance in radians between two spherical coordinates,
/// using the haversine formula.
pub fn great_circle_distance_rads(a: &LatLng, b: &LatLng) -> f64 {
  let sin_lat_half = ((b.lat - a.lat) * 0.5).sin();
  let sin_lng_half = ((b.lng - a.lng) * 0.5).sin();
  let h = sin_lat_half * sin_lat_half + a.lat.cos() * b.lat.cos() * sin_lng_half * sin_lng_half;
  let h = h.clamp(0.0, 1.0);
  2.0 * h.sqrt().atan2((1.0 - h).sqrt())
}

/// The great circle distance in kilometers between two spherical coordinates.
pub fn great_circle_distance_km(a: &LatLng, b: &LatLng) -> f64 {
  great_circle_distance_rads(a, b) * EARTH_RADIUS_KM
}

/// The great circle distance in meters between two spherical coordinates.
pub fn great_circle_distance_m(a: &LatLng, b: &LatLng) -> f64 {
  great_circle_distance_km(a, b) * 1000.0
}

/// Converts degrees to radians.
pub fn degs_to_rads(degrees: f64) -> f64 {
  degrees * M_PI_180
}

/// Converts radians to degrees.
pub fn rads_to_degs(radians: f64) -> f64 {
  radians * M_180_PI
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::M_PI_2;

  #[test]
  fn test_from_degrees_validation() {
    assert!(LatLng::from_degrees(90.0, 180.0).is_ok());
    assert!(LatLng::from_degrees(-90.0, -180.0).is_ok());
    assert_eq!(LatLng::from_degrees(90.5, 0.0), Err(S2Error::LatLngDomain));
    assert_eq!(LatLng::from_degrees(0.0, -180.01), Err(S2Error::LatLngDomain));
    assert_eq!(LatLng::from_degrees(f64::NAN, 0.0), Err(S2Error::LatLngDomain));
    assert_eq!(LatLng::from_degrees(0.0, f64::INFINITY), Err(S2Error::LatLngDomain));
  }

  #[test]
  fn test_degrees_round_trip() {
    let ll = LatLng::from_degrees(12.5, -45.25).unwrap();
    assert!((ll.lat_degrees() - 12.5).abs() < 1e-12);
    assert!((ll.lng_degrees() + 45.25).abs() < 1e-12);
    assert!(ll.is_valid());
    assert!(!LatLng::from_radians(2.0, 0.0).is_valid());
  }

  #[test]
  fn test_point_round_trip() {
    let ll = LatLng::from_degrees(-33.9, 151.2).unwrap();
    let back = LatLng::from_point(&ll.to_point());
    assert!((back.lat - ll.lat).abs() < 1e-15);
    assert!((back.lng - ll.lng).abs() < 1e-15);
  }

  #[test]
  fn test_great_circle_distance() {
    let a = LatLng::from_degrees(0.0, 0.0).unwrap();
    let b = LatLng::from_degrees(0.0, 90.0).unwrap();
    assert!((great_circle_distance_rads(&a, &b) - M_PI_2).abs() < 1e-15);
    assert!((great_circle_distance_km(&a, &b) - M_PI_2 * EARTH_RADIUS_KM).abs() < 1e-9);
    assert!((great_circle_distance_m(&a, &b) - great_circle_distance_km(&a, &b) * 1000.0).abs() < 1e-6);
    assert_eq!(great_circle_distance_rads(&a, &a), 0.0);
  }
}
