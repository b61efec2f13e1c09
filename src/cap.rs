// src/cap.rs

//! Spherical caps: the set of points within a given angle of a center.
//!
//! The radius is stored as the squared chord length between the center and
//! the cap boundary, in `[0, 4]`. A negative value denotes the empty cap.

use crate::constants::{CAP_SLACK_CHORD2, M_PI};
use crate::math::vec3d::point_square_dist;
use crate::types::Vec3d;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Largest squared chord length (antipodal points).
const MAX_CHORD2: f64 = 4.0;

/// A disc on the sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cap {
  center: Vec3d,
  chord2: f64,
}

impl Cap {
  /// Cap with the given unit center and squared chord radius (clamped to
  /// `[0, 4]`).
  #[must_use]
  pub fn from_center_chord2(center: Vec3d, chord2: f64) -> Cap {
    Cap {
      center,
      chord2: chord2.clamp(0.0, MAX_CHORD2),
    }
  }

  /// Cap with the given unit center and angular radius in radians.
  #[must_use]
  pub fn from_center_angle(center: Vec3d, radius_rads: f64) -> Cap {
    let half = 0.5 * radius_rads.clamp(0.0, M_PI);
    let chord = 2.0 * half.sin();
    Self::from_center_chord2(center, chord * chord)
  }

  /// Cap containing a single point.
  #[must_use]
  pub fn from_point(center: Vec3d) -> Cap {
    Self::from_center_chord2(center, 0.0)
  }

  /// Cap containing no points.
  #[must_use]
  pub const fn empty() -> Cap {
    Cap {
      center: Vec3d::new(1.0, 0.0, 0.0),
      chord2: -1.0,
    }
  }

  /// Cap containing the whole sphere.
  #[must_use]
  pub const fn full() -> Cap {
    Cap {
      center: Vec3d::new(1.0, 0.0, 0.0),
      chord2: MAX_CHORD2,
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.chord2 < 0.0
  }

  #[must_use]
  pub fn is_full(&self) -> bool {
    self.chord2 >= MAX_CHORD2
  }

  #[must_use]
  pub fn center(&self) -> Vec3d {
    self.center
  }

  /// Squared chord radius, negative for the empty cap.
  #[must_use]
  pub fn chord2(&self) -> f64 {
    self.chord2
  }

  /// Angular radius in radians, negative for the empty cap.
  #[must_use]
  pub fn radius_rads(&self) -> f64 {
    if self.is_empty() {
      return -1.0;
    }
    2.0 * (0.5 * self.chord2.sqrt()).min(1.0).asin()
  }

  /// Whether `p` is inside the (closed) cap.
  #[inline]
  #[must_use]
  pub fn contains_point(&self, p: &Vec3d) -> bool {
    !self.is_empty() && point_square_dist(&self.center, p) <= self.chord2
  }

  /// Grows the cap, keeping its center, so that it contains `p`. The empty
  /// cap becomes the single point `p`.
  pub fn add_point(&mut self, p: &Vec3d) {
    if self.is_empty() {
      *self = Self::from_point(*p);
    } else {
      self.chord2 = self.chord2.max(point_square_dist(&self.center, p)).min(MAX_CHORD2);
    }
  }

  /// The same cap grown by a small slack so that points rounded onto its
  /// boundary still test as inside.
  #[must_use]
  pub(crate) fn expanded_by_slack(&self) -> Cap {
    if self.is_empty() {
      return *self;
    }
    Self::from_center_chord2(self.center, self.chord2 + CAP_SLACK_CHORD2)
  }

  /// Whether the two caps share at least one point.
  #[must_use]
  pub fn intersects(&self, other: &Cap) -> bool {
    if self.is_empty() || other.is_empty() {
      return false;
    }
    if self.is_full() || other.is_full() {
      return true;
    }
    self.center.angle(&other.center) <= self.radius_rads() + other.radius_rads()
  }

  /// Whether `other` lies entirely within this cap.
  #[must_use]
  pub fn contains_cap(&self, other: &Cap) -> bool {
    if self.is_full() || other.is_empty() {
      return true;
    }
    if self.is_empty() {
      return false;
    }
    self.center.angle(&other.center) + other.radius_rads() <= self.radius_rads()
  }
}
