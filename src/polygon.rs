// src/polygon.rs

//! Loops and single-loop polygons on the unit sphere.
//!
//! A loop's interior is the region to the left of every directed edge.
//! Construction normalizes the vertex order so that the interior is the
//! smaller side (area at most `2 * PI`).

use crate::cap::Cap;
use crate::constants::{BOUNDARY_TOLERANCE_RADS, M_2PI, ORIGIN_XYZ, UNIT_LENGTH_TOLERANCE};
use crate::math::predicates::{
  angle_contains_vertex, crossing_sign, distance_to_edge, edge_or_vertex_crossing, turn_angle,
};
use crate::types::{LatLng, S2Error, Vec3d};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;

/// A structural defect found while validating a loop. Defective loops are
/// still usable; containment answers for them are best effort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ValidationError {
  #[error("loop has {count} vertices, at least 3 are required")]
  TooFewVertices { count: usize },
  #[error("vertex {index} is not unit length")]
  NotUnitLength { index: usize },
  #[error("edge {index} is degenerate (its two vertices are identical)")]
  DuplicateAdjacentVertices { index: usize },
  #[error("edge {index} joins antipodal vertices")]
  AntipodalAdjacentVertices { index: usize },
  #[error("vertices {first} and {second} are identical")]
  DuplicateVertex { first: usize, second: usize },
  #[error("edges {first} and {second} cross")]
  EdgesCross { first: usize, second: usize },
  #[error("coordinate {index} is not finite or out of range")]
  InvalidCoordinate { index: usize },
}

/// A closed ring of unit vectors.
///
/// Serialized as its vertices only; deserializing rebuilds the loop with
/// [`Loop::new`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
  feature = "serde",
  derive(Serialize, Deserialize),
  serde(from = "LoopData", into = "LoopData")
)]
pub struct Loop {
  vertices: Vec<Vec3d>,
  /// Whether `ORIGIN_XYZ` is inside the loop.
  origin_inside: bool,
  bound: Cap,
  error: Option<ValidationError>,
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct LoopData {
  vertices: Vec<Vec3d>,
}

#[cfg(feature = "serde")]
impl From<LoopData> for Loop {
  fn from(data: LoopData) -> Loop {
    Loop::new(data.vertices)
  }
}

#[cfg(feature = "serde")]
impl From<Loop> for LoopData {
  fn from(l: Loop) -> LoopData {
    LoopData { vertices: l.vertices }
  }
}

/// The fixed start point of every containment ray.
#[inline]
pub(crate) fn origin() -> Vec3d {
  Vec3d::from_array(ORIGIN_XYZ)
}

impl Loop {
  /// Builds a loop from its vertices, reversing them if needed so that the
  /// interior is the smaller side. The loop is validated but never
  /// rejected; see [`Loop::validation_error`].
  #[must_use]
  pub fn new(mut vertices: Vec<Vec3d>) -> Loop {
    if vertices.len() >= 3 && curvature_of(&vertices) < 0.0 {
      vertices.reverse();
    }
    let error = validate(&vertices).err();
    let mut l = Loop {
      vertices,
      origin_inside: false,
      bound: Cap::full(),
      error,
    };
    l.init_origin_inside();
    l.bound = l.compute_bound();
    l
  }

  fn init_origin_inside(&mut self) {
    if self.vertices.len() < 3 {
      return;
    }
    let (v0, v1, v2) = (self.vertex(0), self.vertex(1), self.vertex(2));
    // Whether vertex 1 is inside follows from the angle it forms with its
    // neighbors; the ray count from the origin must agree with it.
    let v1_inside = v0 != v1 && v2 != v1 && angle_contains_vertex(&v0, &v1, &v2);
    if v1_inside != self.brute_force_contains(&v1) {
      self.origin_inside = true;
    }
  }

  fn compute_bound(&self) -> Cap {
    if self.vertices.len() < 3 || self.error.is_some() {
      return Cap::full();
    }
    let sum = self.vertices.iter().fold(Vec3d::default(), |acc, v| acc + *v);
    if sum.norm2() < 1e-30 {
      return Cap::full();
    }
    let mut cap = Cap::from_point(sum.normalize());
    for v in &self.vertices {
      cap.add_point(v);
    }
    // A cap wider than a hemisphere is no longer convex, so the edges may
    // leave it.
    if cap.chord2() > 2.0 {
      return Cap::full();
    }
    cap.expanded_by_slack()
  }

  #[must_use]
  pub fn vertices(&self) -> &[Vec3d] {
    &self.vertices
  }

  #[must_use]
  pub fn num_vertices(&self) -> usize {
    self.vertices.len()
  }

  /// Vertex `i`, wrapping around the loop.
  ///
  /// # Panics
  ///
  /// Panics if the loop has no vertices.
  #[inline]
  #[must_use]
  pub fn vertex(&self, i: usize) -> Vec3d {
    assert!(!self.vertices.is_empty(), "vertex {i} of a loop without vertices");
    self.vertices[i % self.vertices.len()]
  }

  /// Edge `i`, from vertex `i` to vertex `i + 1`.
  ///
  /// # Panics
  ///
  /// Panics if the loop has no vertices.
  #[inline]
  #[must_use]
  pub fn edge(&self, i: usize) -> (Vec3d, Vec3d) {
    (self.vertex(i), self.vertex(i + 1))
  }

  /// Number of edges (equal to the number of vertices).
  #[must_use]
  pub fn num_edges(&self) -> usize {
    self.vertices.len()
  }

  #[must_use]
  pub fn validation_error(&self) -> Option<&ValidationError> {
    self.error.as_ref()
  }

  #[must_use]
  pub fn is_valid(&self) -> bool {
    self.error.is_none()
  }

  /// Whether the fixed ray origin lies inside the loop.
  #[must_use]
  pub fn origin_inside(&self) -> bool {
    self.origin_inside
  }

  /// A cap containing the loop. Invalid loops get the full cap.
  #[must_use]
  pub fn cap_bound(&self) -> Cap {
    self.bound
  }

  /// Sum of the turning angles at every vertex; positive for loops whose
  /// interior is smaller than a hemisphere.
  #[must_use]
  pub fn curvature(&self) -> f64 {
    curvature_of(&self.vertices)
  }

  /// Area of the interior in steradians.
  #[must_use]
  pub fn area(&self) -> f64 {
    if self.vertices.len() < 3 {
      return 0.0;
    }
    (M_2PI - self.curvature()).clamp(0.0, 2.0 * M_2PI)
  }

  /// Whether `p` is within the boundary tolerance of an edge or equal to a
  /// vertex.
  #[must_use]
  pub fn boundary_contains(&self, p: &Vec3d) -> bool {
    (0..self.num_edges()).any(|i| {
      let (a, b) = self.edge(i);
      a == *p || distance_to_edge(p, &a, &b) <= BOUNDARY_TOLERANCE_RADS
    })
  }

  /// Semi-open containment by counting crossings of every edge along the
  /// ray from the origin to `p`.
  #[must_use]
  pub(crate) fn brute_force_contains(&self, p: &Vec3d) -> bool {
    let o = origin();
    let mut inside = self.origin_inside;
    for i in 0..self.num_edges() {
      let (a, b) = self.edge(i);
      inside ^= edge_or_vertex_crossing(&o, p, &a, &b);
    }
    inside
  }

  /// Closed containment: boundary points are inside.
  #[must_use]
  pub fn contains_point(&self, p: &Vec3d) -> bool {
    if self.vertices.len() < 3 || !self.bound.contains_point(p) {
      return false;
    }
    if self.boundary_contains(p) {
      return true;
    }
    self.brute_force_contains(p)
  }
}

fn curvature_of(vertices: &[Vec3d]) -> f64 {
  let n = vertices.len();
  if n < 3 {
    return M_2PI;
  }
  (0..n)
    .map(|i| turn_angle(&vertices[(i + n - 1) % n], &vertices[i], &vertices[(i + 1) % n]))
    .sum()
}

/// Checks the structural invariants of a loop, reporting the first defect.
fn validate(vertices: &[Vec3d]) -> Result<(), ValidationError> {
  let n = vertices.len();
  if n < 3 {
    return Err(ValidationError::TooFewVertices { count: n });
  }
  for (index, v) in vertices.iter().enumerate() {
    if !v.is_finite() || (v.norm2() - 1.0).abs() > UNIT_LENGTH_TOLERANCE {
      return Err(ValidationError::NotUnitLength { index });
    }
  }
  for index in 0..n {
    let (a, b) = (vertices[index], vertices[(index + 1) % n]);
    if a == b {
      return Err(ValidationError::DuplicateAdjacentVertices { index });
    }
    if a == -b {
      return Err(ValidationError::AntipodalAdjacentVertices { index });
    }
  }
  let mut order: Vec<usize> = (0..n).collect();
  order.sort_by(|&i, &j| vertices[i].lex_cmp(&vertices[j]).then(i.cmp(&j)));
  for w in order.windows(2) {
    if vertices[w[0]].lex_cmp(&vertices[w[1]]) == Ordering::Equal {
      return Err(ValidationError::DuplicateVertex {
        first: w[0].min(w[1]),
        second: w[0].max(w[1]),
      });
    }
  }
  if let Some((first, second)) = find_crossing(vertices) {
    return Err(ValidationError::EdgesCross { first, second });
  }
  Ok(())
}

/// Range of `z` over the geodesic edge `ab`, widened slightly.
fn edge_z_range(a: &Vec3d, b: &Vec3d) -> (f64, f64) {
  const SLACK: f64 = 1e-14;
  let mut lo = a.z.min(b.z);
  let mut hi = a.z.max(b.z);
  let n = a.cross(b);
  // Highest point of the great circle through `a` and `b`.
  let top = Vec3d::new(-n.x * n.z, -n.y * n.z, n.x * n.x + n.y * n.y);
  if top.norm2() > 0.0 {
    let top = top.normalize();
    let on_edge = |m: &Vec3d| a.cross(m).dot(&n) > 0.0 && m.cross(b).dot(&n) > 0.0;
    if on_edge(&top) {
      hi = hi.max(top.z);
    }
    if on_edge(&-top) {
      lo = lo.min(-top.z);
    }
  }
  (lo - SLACK, hi + SLACK)
}

/// First pair of non-adjacent edges that cross, found with a sweep over the
/// edges' `z` ranges.
fn find_crossing(vertices: &[Vec3d]) -> Option<(usize, usize)> {
  let n = vertices.len();
  let mut edges: Vec<(f64, f64, usize)> = (0..n)
    .map(|i| {
      let (lo, hi) = edge_z_range(&vertices[i], &vertices[(i + 1) % n]);
      (lo, hi, i)
    })
    .collect();
  edges.sort_by(|x, y| x.0.total_cmp(&y.0).then(x.2.cmp(&y.2)));
  let adjacent = |i: usize, j: usize| (i + 1) % n == j || (j + 1) % n == i;
  for (k, &(_, hi, i)) in edges.iter().enumerate() {
    for &(lo, _, j) in &edges[k + 1..] {
      if lo > hi {
        break;
      }
      if adjacent(i, j) {
        continue;
      }
      let (a, b) = (vertices[i], vertices[(i + 1) % n]);
      let (c, d) = (vertices[j], vertices[(j + 1) % n]);
      if crossing_sign(&a, &b, &c, &d) > 0 {
        return Some((i.min(j), i.max(j)));
      }
    }
  }
  None
}

/// A polygon with a single outer loop.
///
/// Only the loop and an input coordinate defect are serialized; any other
/// validation result is recomputed when deserializing.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
  feature = "serde",
  derive(Serialize, Deserialize),
  serde(from = "PolygonData", into = "PolygonData")
)]
pub struct Polygon {
  outer: Loop,
  error: Option<ValidationError>,
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct PolygonData {
  outer: Loop,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  input_error: Option<ValidationError>,
}

#[cfg(feature = "serde")]
impl From<PolygonData> for Polygon {
  fn from(data: PolygonData) -> Polygon {
    // Loop validation never reports coordinate defects, so anything else
    // is re-derived from the vertices.
    let input_error = data
      .input_error
      .filter(|e| matches!(e, ValidationError::InvalidCoordinate { .. }));
    Polygon::with_input_error(data.outer, input_error)
  }
}

#[cfg(feature = "serde")]
impl From<Polygon> for PolygonData {
  fn from(polygon: Polygon) -> PolygonData {
    let input_error = polygon
      .error
      .filter(|e| matches!(e, ValidationError::InvalidCoordinate { .. }));
    PolygonData {
      outer: polygon.outer,
      input_error,
    }
  }
}

impl Polygon {
  /// Wraps a loop, inheriting its validation result.
  #[must_use]
  pub fn from_loop(outer: Loop) -> Polygon {
    let error = outer.validation_error().cloned();
    Polygon { outer, error }
  }

  /// Wraps a loop with an input defect found before the loop was built. The
  /// loop's own defect is used when there is none.
  pub(crate) fn with_input_error(outer: Loop, input_error: Option<ValidationError>) -> Polygon {
    let error = input_error.or_else(|| outer.validation_error().cloned());
    Polygon { outer, error }
  }

  #[must_use]
  pub fn outer(&self) -> &Loop {
    &self.outer
  }

  #[must_use]
  pub fn num_edges(&self) -> usize {
    self.outer.num_edges()
  }

  /// Edge `i` of the outer loop.
  ///
  /// # Panics
  ///
  /// Panics if the polygon has no vertices.
  #[must_use]
  pub fn edge(&self, i: usize) -> (Vec3d, Vec3d) {
    self.outer.edge(i)
  }

  #[must_use]
  pub fn validation_error(&self) -> Option<&ValidationError> {
    self.error.as_ref()
  }

  #[must_use]
  pub fn is_valid(&self) -> bool {
    self.error.is_none()
  }

  #[must_use]
  pub fn cap_bound(&self) -> Cap {
    self.outer.cap_bound()
  }

  #[must_use]
  pub fn area(&self) -> f64 {
    self.outer.area()
  }

  /// Closed containment of a unit vector.
  #[must_use]
  pub fn contains_point(&self, p: &Vec3d) -> bool {
    self.outer.contains_point(p)
  }

  /// The outer loop as a ring of `[lng, lat]` degree pairs. The ring is not
  /// closed (the first vertex is not repeated).
  #[must_use]
  pub fn to_lng_lat_rings(&self) -> Vec<Vec<[f64; 2]>> {
    let ring = self
      .outer
      .vertices()
      .iter()
      .map(|v| {
        let ll = LatLng::from_point(v);
        [ll.lng_degrees(), ll.lat_degrees()]
      })
      .collect();
    vec![ring]
  }
}

/// Whether `polygon` contains `ll`, boundary included.
///
/// # Errors
///
/// `S2Error::LatLngDomain` if `ll` is not a valid coordinate.
pub fn contains(polygon: &Polygon, ll: &LatLng) -> Result<bool, S2Error> {
  if !ll.is_valid() {
    return Err(S2Error::LatLngDomain);
  }
  Ok(polygon.contains_point(&ll.to_point()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::constants::M_PI;

  fn pt(lat: f64, lng: f64) -> Vec3d {
    LatLng::from_degrees(lat, lng).unwrap().to_point()
  }

  /// Counter-clockwise square of side `2 * half` degrees around (lat, lng).
  fn square(lat: f64, lng: f64, half: f64) -> Vec<Vec3d> {
    vec![
      pt(lat - half, lng - half),
      pt(lat - half, lng + half),
      pt(lat + half, lng + half),
      pt(lat + half, lng - half),
    ]
  }

  #[test]
  fn test_small_square_contains() {
    let l = Loop::new(square(10.0, 20.0, 1.0));
    assert!(l.is_valid());
    assert!(l.contains_point(&pt(10.0, 20.0)));
    assert!(l.contains_point(&pt(10.9, 19.1)));
    assert!(!l.contains_point(&pt(12.0, 20.0)));
    assert!(!l.contains_point(&pt(-10.0, -160.0)));
    assert!(l.area() > 0.0 && l.area() < 0.01);
  }

  #[test]
  fn test_reversed_input_is_normalized() {
    let ccw = Loop::new(square(-30.0, 100.0, 2.0));
    let mut cw_vertices = square(-30.0, 100.0, 2.0);
    cw_vertices.reverse();
    let cw = Loop::new(cw_vertices);
    assert!(cw.curvature() > 0.0);
    for p in [pt(-30.0, 100.0), pt(-33.0, 100.0), pt(-29.0, 101.5), pt(40.0, -80.0)] {
      assert_eq!(ccw.contains_point(&p), cw.contains_point(&p));
    }
    assert!((ccw.area() - cw.area()).abs() < 1e-12);
  }

  #[test]
  fn test_vertices_and_edges_are_contained() {
    let l = Loop::new(vec![pt(0.0, 0.0), pt(0.0, 3.0), pt(2.0, 4.0), pt(4.0, 1.0)]);
    for v in l.vertices() {
      assert!(l.contains_point(v));
    }
    let (a, b) = l.edge(0);
    let mid = (a + b).normalize();
    assert!(l.contains_point(&mid));
  }

  #[test]
  fn test_loop_around_origin() {
    // A loop around the north pole contains the ray origin.
    let l = Loop::new(vec![pt(80.0, 0.0), pt(80.0, 120.0), pt(80.0, -120.0)]);
    assert!(l.origin_inside());
    assert!(l.contains_point(&pt(90.0, 0.0)));
    assert!(!l.contains_point(&pt(70.0, 0.0)));
  }

  #[test]
  fn test_hemisphere_sized_loop() {
    // Nearly the whole southern hemisphere, wound counter-clockwise as seen
    // from the south.
    let l = Loop::new(vec![pt(-1.0, 0.0), pt(-1.0, -120.0), pt(-1.0, 120.0)]);
    assert!(l.area() < 2.0 * M_PI + 0.1);
    assert!(l.contains_point(&pt(-60.0, 10.0)));
    assert!(!l.contains_point(&pt(60.0, 10.0)));
  }

  #[test]
  fn test_validation_errors() {
    let l = Loop::new(vec![pt(0.0, 0.0), pt(0.0, 1.0)]);
    assert_eq!(l.validation_error(), Some(&ValidationError::TooFewVertices { count: 2 }));
    assert!(!l.contains_point(&pt(0.0, 0.5)));

    let l = Loop::new(vec![pt(0.0, 0.0), pt(0.0, 1.0), pt(0.0, 1.0), pt(1.0, 0.0)]);
    assert!(matches!(
      l.validation_error(),
      Some(ValidationError::DuplicateAdjacentVertices { .. })
    ));

    let l = Loop::new(vec![pt(0.0, 0.0), pt(0.0, 2.0), pt(1.0, 1.0), pt(0.0, 2.0), pt(2.0, 0.0)]);
    assert!(matches!(l.validation_error(), Some(ValidationError::DuplicateVertex { .. })));

    let l = Loop::new(vec![Vec3d::new(2.0, 0.0, 0.0), pt(0.0, 1.0), pt(1.0, 0.0)]);
    assert!(matches!(l.validation_error(), Some(ValidationError::NotUnitLength { .. })));
    assert!(l.cap_bound().is_full());
  }

  #[test]
  fn test_bow_tie_is_flagged() {
    let l = Loop::new(vec![pt(0.0, 0.0), pt(2.0, 2.0), pt(2.0, 0.0), pt(0.0, 2.0)]);
    assert!(matches!(l.validation_error(), Some(ValidationError::EdgesCross { .. })));
    // Still answers queries.
    let _ = l.contains_point(&pt(1.0, 1.5));
  }

  #[test]
  fn test_crossing_found_over_arc_extremum() {
    // Edge 0 runs between two vertices at 40N but peaks near 59N, where the
    // short edge 2 crosses it.
    let vertices = vec![pt(40.0, -60.0), pt(40.0, 60.0), pt(60.0, 1.0), pt(58.0, -1.0)];
    assert_eq!(find_crossing(&vertices), Some((0, 2)));
  }

  #[test]
  fn test_polygon_contains_and_rings() {
    let poly = Polygon::from_loop(Loop::new(square(0.0, 0.0, 0.5)));
    assert!(poly.is_valid());
    assert!(contains(&poly, &LatLng::from_degrees(0.1, 0.1).unwrap()).unwrap());
    assert!(!contains(&poly, &LatLng::from_degrees(0.1, 0.7).unwrap()).unwrap());
    assert_eq!(
      contains(&poly, &LatLng::from_radians(4.0, 0.0)),
      Err(S2Error::LatLngDomain)
    );
    let rings = poly.to_lng_lat_rings();
    assert_eq!(rings.len(), 1);
    assert_eq!(rings[0].len(), 4);
    assert!((rings[0][0][0] + 0.5).abs() < 1e-12, "longitude first");
    assert!((rings[0][0][1] + 0.5).abs() < 1e-12);
  }

  #[test]
  #[should_panic(expected = "loop without vertices")]
  fn test_edge_of_empty_polygon_panics() {
    let polygon = Polygon::from_loop(Loop::new(Vec::new()));
    assert_eq!(polygon.num_edges(), 0);
    let _ = polygon.edge(0);
  }
}
