// src/math/vec3d.rs

use crate::types::{LatLng, Vec3d};
use std::ops::{Add, Mul, Neg, Sub};

/// Square of a number.
#[inline]
fn square(x: f64) -> f64 {
  x * x
}

impl Vec3d {
  /// Creates a vector from its components.
  #[inline]
  #[must_use]
  pub const fn new(x: f64, y: f64, z: f64) -> Self {
    Self { x, y, z }
  }

  /// Builds a vector from an `[x, y, z]` array.
  #[inline]
  #[must_use]
  pub const fn from_array(v: [f64; 3]) -> Self {
    Self {
      x: v[0],
      y: v[1],
      z: v[2],
    }
  }

  /// Component by axis index (0 = x, 1 = y, 2 = z).
  #[inline]
  #[must_use]
  pub fn get(&self, axis: usize) -> f64 {
    match axis {
      0 => self.x,
      1 => self.y,
      _ => self.z,
    }
  }

  /// Dot product.
  #[inline]
  #[must_use]
  pub fn dot(&self, other: &Vec3d) -> f64 {
    self.x * other.x + self.y * other.y + self.z * other.z
  }

  /// Cross product.
  #[inline]
  #[must_use]
  pub fn cross(&self, other: &Vec3d) -> Vec3d {
    Vec3d {
      x: self.y * other.z - self.z * other.y,
      y: self.z * other.x - self.x * other.z,
      z: self.x * other.y - self.y * other.x,
    }
  }

  /// Squared Euclidean norm.
  #[inline]
  #[must_use]
  pub fn norm2(&self) -> f64 {
    self.dot(self)
  }

  /// Euclidean norm.
  #[inline]
  #[must_use]
  pub fn norm(&self) -> f64 {
    self.norm2().sqrt()
  }

  /// Unit vector in the same direction. The zero vector is returned unchanged.
  #[inline]
  #[must_use]
  pub fn normalize(&self) -> Vec3d {
    let n = self.norm();
    if n == 0.0 {
      return *self;
    }
    *self * (1.0 / n)
  }

  /// Angle between two vectors, in radians, in `[0, PI]`.
  #[inline]
  #[must_use]
  pub fn angle(&self, other: &Vec3d) -> f64 {
    self.cross(other).norm().atan2(self.dot(other))
  }

  /// Index of the component with the largest absolute value.
  #[inline]
  #[must_use]
  pub fn largest_abs_component(&self) -> usize {
    let (ax, ay, az) = (self.x.abs(), self.y.abs(), self.z.abs());
    if ax > ay {
      if ax > az {
        0
      } else {
        2
      }
    } else if ay > az {
      1
    } else {
      2
    }
  }

  /// Whether all components are finite.
  #[inline]
  #[must_use]
  pub fn is_finite(&self) -> bool {
    self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
  }

  /// A unit vector orthogonal to this one. Always returns the same result
  /// for the same input.
  #[must_use]
  pub fn ortho(&self) -> Vec3d {
    let k = match self.largest_abs_component() {
      0 => 2,
      k => k - 1,
    };
    let mut temp = [0.012, 0.0053, 0.00457];
    temp[k] = 1.0;
    self.cross(&Vec3d::from_array(temp)).normalize()
  }

  /// Lexicographic comparison of the components, used to order points
  /// deterministically.
  #[inline]
  #[must_use]
  pub(crate) fn lex_cmp(&self, other: &Vec3d) -> std::cmp::Ordering {
    self
      .x
      .total_cmp(&other.x)
      .then(self.y.total_cmp(&other.y))
      .then(self.z.total_cmp(&other.z))
  }
}

impl Add for Vec3d {
  type Output = Vec3d;

  #[inline]
  fn add(self, rhs: Vec3d) -> Vec3d {
    Vec3d::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
  }
}

impl Sub for Vec3d {
  type Output = Vec3d;

  #[inline]
  fn sub(self, rhs: Vec3d) -> Vec3d {
    Vec3d::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
  }
}

impl Mul<f64> for Vec3d {
  type Output = Vec3d;

  #[inline]
  fn mul(self, rhs: f64) -> Vec3d {
    Vec3d::new(self.x * rhs, self.y * rhs, self.z * rhs)
  }
}

impl Neg for Vec3d {
  type Output = Vec3d;

  #[inline]
  fn neg(self) -> Vec3d {
    Vec3d::new(-self.x, -self.y, -self.z)
  }
}

/// Calculate the square of the Euclidean distance between two 3D coordinates.
#[inline]
#[must_use]
pub(crate) fn point_square_dist(v1: &Vec3d, v2: &Vec3d) -> f64 {
  square(v1.x - v2.x) + square(v1.y - v2.y) + square(v1.z - v2.z)
}

/// Calculate the 3D Cartesian coordinate on a unit sphere from latitude and longitude.
#[inline]
#[must_use]
pub(crate) fn geo_to_vec3d(geo: &LatLng) -> Vec3d {
  let r = geo.lat.cos();
  Vec3d {
    x: geo.lng.cos() * r,
    y: geo.lng.sin() * r,
    z: geo.lat.sin(),
  }
}

/// Latitude and longitude (radians) of a direction vector. The vector does
/// not need to be unit length.
#[inline]
#[must_use]
pub(crate) fn vec3d_to_geo(p: &Vec3d) -> LatLng {
  LatLng {
    lat: p.z.atan2((p.x * p.x + p.y * p.y).sqrt()),
    lng: p.y.atan2(p.x),
  }
}
