// src/polygon_builder.rs

//! Builds polygons from rings of `[lng, lat]` degree pairs.

use crate::polygon::{Loop, Polygon, ValidationError};
use crate::types::{LatLng, Vec3d};

/// Builds a polygon from a ring of `[longitude, latitude]` pairs in degrees.
///
/// * A closing vertex bit-identical to the first one is dropped.
/// * Non-finite coordinates are dropped; coordinates outside
///   `[-180, 180] x [-90, 90]` are kept as given. Both are reported as
///   [`ValidationError::InvalidCoordinate`].
/// * The vertex order is normalized so that the interior is the smaller
///   side of the ring.
///
/// Building never fails: defects are attached to the returned polygon and
/// logged.
#[must_use]
pub fn build_polygon(ring: &[[f64; 2]]) -> Polygon {
  let mut coords = ring;
  if let [first, .., last] = coords {
    if first[0].to_bits() == last[0].to_bits() && first[1].to_bits() == last[1].to_bits() {
      coords = &coords[..coords.len() - 1];
    }
  }

  let mut input_error = None;
  let mut vertices: Vec<Vec3d> = Vec::with_capacity(coords.len());
  for (index, &[lng, lat]) in coords.iter().enumerate() {
    if !lng.is_finite() || !lat.is_finite() {
      input_error.get_or_insert(ValidationError::InvalidCoordinate { index });
      continue;
    }
    if lng.abs() > 180.0 || lat.abs() > 90.0 {
      input_error.get_or_insert(ValidationError::InvalidCoordinate { index });
    }
    vertices.push(LatLng::from_radians(lat.to_radians(), lng.to_radians()).to_point());
  }

  let polygon = Polygon::with_input_error(Loop::new(vertices), input_error);
  if let Some(err) = polygon.validation_error() {
    tracing::warn!(
      vertices = polygon.outer().num_vertices(),
      error = %err,
      "polygon failed validation, keeping it as is"
    );
  }
  polygon
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_closing_vertex_is_dropped() {
    let open = build_polygon(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
    let closed = build_polygon(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]);
    assert_eq!(open, closed);
    assert_eq!(closed.outer().num_vertices(), 3);
    assert!(closed.is_valid());
  }

  #[test]
  fn test_nearly_closed_ring_keeps_last_vertex() {
    let poly = build_polygon(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1e-9, 0.0]]);
    assert_eq!(poly.outer().num_vertices(), 4);
  }

  #[test]
  fn test_clockwise_ring_is_normalized() {
    let ccw = build_polygon(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]);
    let cw = build_polygon(&[[0.0, 2.0], [2.0, 2.0], [2.0, 0.0], [0.0, 0.0]]);
    let inside = LatLng::from_degrees(1.0, 1.0).unwrap().to_point();
    let outside = LatLng::from_degrees(-45.0, 120.0).unwrap().to_point();
    assert!(ccw.contains_point(&inside) && cw.contains_point(&inside));
    assert!(!ccw.contains_point(&outside) && !cw.contains_point(&outside));
    assert!(cw.area() < 0.01);
  }

  #[test]
  fn test_non_finite_coordinates_are_dropped() {
    let poly = build_polygon(&[[0.0, 0.0], [f64::NAN, 3.0], [1.0, 0.0], [0.0, 1.0]]);
    assert_eq!(poly.outer().num_vertices(), 3);
    assert_eq!(
      poly.validation_error(),
      Some(&ValidationError::InvalidCoordinate { index: 1 })
    );
  }

  #[test]
  fn test_out_of_range_coordinates_are_kept() {
    let poly = build_polygon(&[[179.0, 0.0], [181.0, 0.0], [180.0, 1.0]]);
    assert_eq!(poly.outer().num_vertices(), 3);
    assert_eq!(
      poly.validation_error(),
      Some(&ValidationError::InvalidCoordinate { index: 1 })
    );
  }

  #[test]
  fn test_degenerate_ring_is_flagged() {
    let poly = build_polygon(&[[0.0, 0.0], [1.0, 1.0]]);
    assert_eq!(
      poly.validation_error(),
      Some(&ValidationError::TooFewVertices { count: 2 })
    );
  }
}
