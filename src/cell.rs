// src/cell.rs

//! A [`CellId`] together with its geometry on the cube face.

use crate::cap::Cap;
use crate::constants::{CAP_SLACK_CHORD2, NUM_CHILDREN, POS_BITS};
use crate::coords::{face_uv_to_xyz, face_xyz_to_uv, ij_to_st_min, st_to_uv};
use crate::math::vec3d::point_square_dist;
use crate::types::{CellId, S2Error, Vec3d};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A cell of the grid with its `(u, v)` bounds.
///
/// The four cell edges are geodesics, so a cell is a convex spherical
/// quadrilateral. Vertex `k` is numbered counter-clockwise starting at the
/// `(u_lo, v_lo)` corner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cell {
  id: CellId,
  face: u8,
  level: u8,
  /// `[u_lo, u_hi]`.
  u: [f64; 2],
  /// `[v_lo, v_hi]`.
  v: [f64; 2],
}

impl Cell {
  /// Geometry of the cell `id`.
  pub fn from_cell_id(id: CellId) -> Result<Cell, S2Error> {
    if !id.is_valid() {
      return Err(S2Error::CellInvalid);
    }
    Ok(Self::from_valid_id(id))
  }

  pub(crate) fn from_valid_id(id: CellId) -> Cell {
    let (face, i_lo, j_lo, size) = id.face_ij_bounds();
    Cell {
      id,
      face,
      level: id.level(),
      u: [st_to_uv(ij_to_st_min(i_lo)), st_to_uv(ij_to_st_min(i_lo + size))],
      v: [st_to_uv(ij_to_st_min(j_lo)), st_to_uv(ij_to_st_min(j_lo + size))],
    }
  }

  /// The six face cells.
  #[must_use]
  pub fn faces() -> [Cell; 6] {
    [0u8, 1, 2, 3, 4, 5].map(|face| Self::from_valid_id(CellId((u64::from(face) << POS_BITS) | CellId::lsb_for_level(0))))
  }

  #[inline]
  #[must_use]
  pub fn id(&self) -> CellId {
    self.id
  }

  #[inline]
  #[must_use]
  pub fn face(&self) -> u8 {
    self.face
  }

  #[inline]
  #[must_use]
  pub fn level(&self) -> u8 {
    self.level
  }

  #[inline]
  #[must_use]
  pub fn is_leaf(&self) -> bool {
    self.id.is_leaf()
  }

  /// `(u_lo, u_hi, v_lo, v_hi)` on the cell's face.
  #[must_use]
  pub fn bound_uv(&self) -> (f64, f64, f64, f64) {
    (self.u[0], self.u[1], self.v[0], self.v[1])
  }

  /// Unit vector of vertex `k` (taken mod 4).
  #[must_use]
  pub fn vertex(&self, k: usize) -> Vec3d {
    self.padded_vertex(k, 0.0)
  }

  /// The four vertices, counter-clockwise.
  #[must_use]
  pub fn vertices(&self) -> [Vec3d; 4] {
    [0, 1, 2, 3].map(|k| self.vertex(k))
  }

  /// Vertex `k` of the cell grown by `padding` in `(u, v)` on every side.
  #[must_use]
  pub(crate) fn padded_vertex(&self, k: usize, padding: f64) -> Vec3d {
    let (u, v) = match k % 4 {
      0 => (self.u[0] - padding, self.v[0] - padding),
      1 => (self.u[1] + padding, self.v[0] - padding),
      2 => (self.u[1] + padding, self.v[1] + padding),
      _ => (self.u[0] - padding, self.v[1] + padding),
    };
    face_uv_to_xyz(self.face, u, v).normalize()
  }

  /// Vertices of the padded cell, counter-clockwise.
  #[must_use]
  pub fn padded_vertices(&self, padding: f64) -> [Vec3d; 4] {
    [0, 1, 2, 3].map(|k| self.padded_vertex(k, padding))
  }

  /// Unit vector at the cell center (the center in `(s, t)` space).
  #[must_use]
  pub fn center(&self) -> Vec3d {
    self.id.to_point()
  }

  /// Whether `p` lies in the closed cell.
  #[must_use]
  pub fn contains_point(&self, p: &Vec3d) -> bool {
    self.contains_point_padded(p, 0.0)
  }

  /// Whether `p` lies in the closed cell grown by `padding` in `(u, v)`.
  #[must_use]
  pub(crate) fn contains_point_padded(&self, p: &Vec3d, padding: f64) -> bool {
    match face_xyz_to_uv(self.face, p) {
      Some((u, v)) => {
        u >= self.u[0] - padding && u <= self.u[1] + padding && v >= self.v[0] - padding && v <= self.v[1] + padding
      }
      None => false,
    }
  }

  /// The four children in Hilbert order.
  pub fn children(&self) -> Result<[Cell; NUM_CHILDREN], S2Error> {
    Ok(self.id.children()?.map(Self::from_valid_id))
  }

  /// A cap containing the cell.
  #[must_use]
  pub fn cap_bound(&self) -> Cap {
    let center = self.center();
    let chord2 = self
      .vertices()
      .iter()
      .map(|v| point_square_dist(&center, v))
      .fold(0.0, f64::max);
    Cap::from_center_chord2(center, chord2 + CAP_SLACK_CHORD2)
  }
}
