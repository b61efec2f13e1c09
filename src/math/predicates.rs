// src/math/predicates.rs

//! Orientation and edge-crossing predicates on the unit sphere.
//!
//! `sign` never returns 0 for three distinct points: a fast floating-point
//! test is tried first, then the determinant is evaluated exactly with
//! error-free transformations, and exactly collinear inputs are resolved by
//! symbolic perturbation. All crossing tests are built on top of it, so
//! counting crossings along a ray gives consistent parity.

use crate::constants::MAX_DETERMINANT_ERROR;
use crate::types::Vec3d;
use std::cmp::Ordering;

/// Error-free product: `a * b == hi + lo` exactly.
#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
  let hi = a * b;
  (hi, a.mul_add(b, -hi))
}

/// Error-free sum: `a + b == s + err` exactly.
#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
  let s = a + b;
  let bb = s - a;
  (s, (a - (s - bb)) + (b - bb))
}

/// Sign of an exact sum of doubles, using expansion arithmetic.
fn exact_sign_of_sum(terms: &[f64]) -> i32 {
  let mut expansion: Vec<f64> = Vec::with_capacity(terms.len() + 1);
  for &term in terms {
    let mut q = term;
    let mut grown = Vec::with_capacity(expansion.len() + 1);
    for &e in &expansion {
      let (s, err) = two_sum(q, e);
      if err != 0.0 {
        grown.push(err);
      }
      q = s;
    }
    grown.push(q);
    expansion = grown;
  }
  // Components are non-overlapping and increase in magnitude; the last
  // non-zero one decides the sign.
  match expansion.iter().rev().find(|v| **v != 0.0) {
    Some(v) if *v > 0.0 => 1,
    Some(_) => -1,
    None => 0,
  }
}

/// Pushes the exact expansion of `sign * p * q * r` onto `out`.
fn push_triple_product(out: &mut Vec<f64>, sign: f64, p: f64, q: f64, r: f64) {
  let (hi, lo) = two_prod(p, q);
  let (h1, l1) = two_prod(hi, r);
  let (h2, l2) = two_prod(lo, r);
  out.extend_from_slice(&[sign * h1, sign * l1, sign * h2, sign * l2]);
}

/// Exact sign of `(a x b) . c`.
fn exact_determinant_sign(a: &Vec3d, b: &Vec3d, c: &Vec3d) -> i32 {
  let mut terms = Vec::with_capacity(24);
  push_triple_product(&mut terms, 1.0, a.x, b.y, c.z);
  push_triple_product(&mut terms, -1.0, a.x, b.z, c.y);
  push_triple_product(&mut terms, 1.0, a.y, b.z, c.x);
  push_triple_product(&mut terms, -1.0, a.y, b.x, c.z);
  push_triple_product(&mut terms, 1.0, a.z, b.x, c.y);
  push_triple_product(&mut terms, -1.0, a.z, b.y, c.x);
  exact_sign_of_sum(&terms)
}

/// Exact sign of `p * q - r * s`.
fn exact_minor_sign(p: f64, q: f64, r: f64, s: f64) -> i32 {
  let (h1, l1) = two_prod(p, q);
  let (h2, l2) = two_prod(r, s);
  exact_sign_of_sum(&[h1, l1, -h2, -l2])
}

#[inline]
fn sgn(x: f64) -> i32 {
  match x.partial_cmp(&0.0) {
    Some(Ordering::Greater) => 1,
    Some(Ordering::Less) => -1,
    _ => 0,
  }
}

/// Sign of the determinant after an infinitesimal perturbation of the
/// points. Requires `a < b < c` in lexicographic order and an exactly zero
/// determinant.
fn symbolically_perturbed_sign(a: &Vec3d, b: &Vec3d, c: &Vec3d) -> i32 {
  let checks = [
    exact_minor_sign(b.x, c.y, b.y, c.x),
    exact_minor_sign(b.z, c.x, b.x, c.z),
    exact_minor_sign(b.y, c.z, b.z, c.y),
    exact_minor_sign(c.x, a.y, c.y, a.x),
    sgn(c.x),
    -sgn(c.y),
    exact_minor_sign(c.z, a.x, c.x, a.z),
    sgn(c.z),
    exact_minor_sign(a.x, b.y, a.y, b.x),
    -sgn(b.x),
    sgn(b.y),
    sgn(a.x),
  ];
  checks.into_iter().find(|s| *s != 0).unwrap_or(1)
}

fn expensive_sign(a: &Vec3d, b: &Vec3d, c: &Vec3d) -> i32 {
  if a == b || b == c || c == a {
    return 0;
  }
  let det_sign = exact_determinant_sign(a, b, c);
  if det_sign != 0 {
    return det_sign;
  }

  // Sort the points, keeping track of the permutation parity.
  let mut pts = [a, b, c];
  let mut perm_sign = 1;
  if pts[0].lex_cmp(pts[1]) == Ordering::Greater {
    pts.swap(0, 1);
    perm_sign = -perm_sign;
  }
  if pts[1].lex_cmp(pts[2]) == Ordering::Greater {
    pts.swap(1, 2);
    perm_sign = -perm_sign;
  }
  if pts[0].lex_cmp(pts[1]) == Ordering::Greater {
    pts.swap(0, 1);
    perm_sign = -perm_sign;
  }
  perm_sign * symbolically_perturbed_sign(pts[0], pts[1], pts[2])
}

/// Orientation of three points: `+1` if `a, b, c` are counterclockwise,
/// `-1` if clockwise, and `0` only if two of the points are identical.
#[must_use]
pub fn sign(a: &Vec3d, b: &Vec3d, c: &Vec3d) -> i32 {
  let det = a.cross(b).dot(c);
  if det > MAX_DETERMINANT_ERROR {
    return 1;
  }
  if det < -MAX_DETERMINANT_ERROR {
    return -1;
  }
  expensive_sign(a, b, c)
}

/// Whether the edges `OA`, `OB` and `OC` are encountered in that order while
/// sweeping counterclockwise around `o`. Ties count as ordered when
/// `a == b` or `b == c`.
#[must_use]
pub fn ordered_ccw(a: &Vec3d, b: &Vec3d, c: &Vec3d, o: &Vec3d) -> bool {
  let mut sum = 0;
  if sign(b, o, a) >= 0 {
    sum += 1;
  }
  if sign(c, o, b) >= 0 {
    sum += 1;
  }
  if sign(a, o, c) > 0 {
    sum += 1;
  }
  sum >= 2
}

/// Whether the angle `abc` (interior on the left of `a -> b -> c`) contains
/// its vertex `b`, using a fixed reference direction so that among all the
/// angles sharing `b`, exactly one contains it.
#[must_use]
pub fn angle_contains_vertex(a: &Vec3d, b: &Vec3d, c: &Vec3d) -> bool {
  !ordered_ccw(&b.ortho(), c, a, b)
}

/// Whether edge `AB` crosses edge `CD`.
///
/// Returns `+1` if the edges cross at a point interior to both, `-1` if they
/// do not, and `0` if two vertices from different edges are identical.
#[must_use]
pub fn crossing_sign(a: &Vec3d, b: &Vec3d, c: &Vec3d, d: &Vec3d) -> i32 {
  if a == c || a == d || b == c || b == d {
    return 0;
  }
  if a == b || c == d {
    return -1;
  }
  let acb = -sign(a, b, c);
  let bda = sign(a, b, d);
  if acb != bda {
    return -1;
  }
  let cbd = -sign(c, d, b);
  if cbd != acb {
    return -1;
  }
  let dac = sign(c, d, a);
  if dac != acb {
    return -1;
  }
  1
}

/// Crossing rule for edges that share a vertex: the edges count as crossing
/// when `AB` lies further counterclockwise around the shared vertex than
/// `CD`, measured from a fixed reference direction.
#[must_use]
pub fn vertex_crossing(a: &Vec3d, b: &Vec3d, c: &Vec3d, d: &Vec3d) -> bool {
  if a == b || c == d {
    return false;
  }
  if a == c {
    return b == d || ordered_ccw(&a.ortho(), d, b, a);
  }
  if b == d {
    return ordered_ccw(&b.ortho(), c, a, b);
  }
  if a == d {
    return b == c || ordered_ccw(&a.ortho(), c, b, a);
  }
  if b == c {
    return ordered_ccw(&b.ortho(), d, a, b);
  }
  false
}

/// Like `crossing_sign`, but shared vertices are resolved with
/// `vertex_crossing`. This is the test to use when counting crossings
/// for point containment.
#[must_use]
pub fn edge_or_vertex_crossing(a: &Vec3d, b: &Vec3d, c: &Vec3d, d: &Vec3d) -> bool {
  match crossing_sign(a, b, c, d) {
    s if s < 0 => false,
    0 => vertex_crossing(a, b, c, d),
    _ => true,
  }
}

/// Signed exterior angle at `b` of the path `a -> b -> c`, positive when the
/// path turns left.
#[must_use]
pub fn turn_angle(a: &Vec3d, b: &Vec3d, c: &Vec3d) -> f64 {
  let angle = a.cross(b).angle(&b.cross(c));
  if sign(a, b, c) > 0 {
    angle
  } else {
    -angle
  }
}

/// Angular distance in radians from `x` to the geodesic edge `AB`.
#[must_use]
pub fn distance_to_edge(x: &Vec3d, a: &Vec3d, b: &Vec3d) -> f64 {
  let n = a.cross(b);
  let n2 = n.norm2();
  if n2 > 0.0 && a.cross(x).dot(&n) >= 0.0 && x.cross(b).dot(&n) >= 0.0 {
    let sin_dist = (x.dot(&n) / n2.sqrt()).abs() / x.norm();
    return sin_dist.min(1.0).asin();
  }
  x.angle(a).min(x.angle(b))
}
