// src/cell_id/mod.rs

//! Bit-level operations on [`CellId`].

pub mod token;

use crate::constants::{INVERT_MASK, LOOKUP_BITS, MAX_LEVEL, MAX_SIZE, NUM_FACES, POS_BITS, SWAP_MASK};
use crate::coords::hilbert::{LOOKUP_IJ, LOOKUP_POS};
use crate::coords::{face_uv_to_xyz, ij_to_st_min, st_to_ij, st_to_uv, uv_to_st, xyz_to_face_uv};
use crate::math::vec3d::{geo_to_vec3d, vec3d_to_geo};
use crate::types::{CellId, LatLng, S2Error, Vec3d};
use std::fmt;

/// Marker bits of every valid level: one bit at each even position.
const VALID_LSB_MASK: u64 = 0x1555_5555_5555_5555;

const LOOKUP_MASK: u32 = (1 << LOOKUP_BITS) - 1;

impl CellId {
  /// The level-0 cell covering a whole cube face.
  pub fn from_face(face: u8) -> Result<CellId, S2Error> {
    if face >= NUM_FACES {
      return Err(S2Error::Domain);
    }
    Ok(CellId((u64::from(face) << POS_BITS) + Self::lsb_for_level(0)))
  }

  /// Leaf cell at leaf coordinates `(i, j)` on `face`.
  pub(crate) fn from_face_ij(face: u8, i: u32, j: u32) -> CellId {
    let mut n = u64::from(face) << (POS_BITS - 1);
    let mut bits = usize::from(face & SWAP_MASK);
    for k in (0..8).rev() {
      let shift = k * LOOKUP_BITS;
      bits += (((i >> shift) & LOOKUP_MASK) as usize) << (LOOKUP_BITS + 2);
      bits += (((j >> shift) & LOOKUP_MASK) as usize) << 2;
      bits = usize::from(LOOKUP_POS[bits]);
      n |= ((bits >> 2) as u64) << (k * 2 * LOOKUP_BITS);
      bits &= usize::from(SWAP_MASK | INVERT_MASK);
    }
    CellId(n * 2 + 1)
  }

  /// Leaf cell containing the direction `p` (need not be unit length).
  #[must_use]
  pub fn from_point(p: &Vec3d) -> CellId {
    let (face, u, v) = xyz_to_face_uv(p);
    Self::from_face_ij(face, st_to_ij(uv_to_st(u)), st_to_ij(uv_to_st(v)))
  }

  /// Leaf cell containing `ll`.
  #[must_use]
  pub fn from_lat_lng(ll: &LatLng) -> CellId {
    Self::from_point(&geo_to_vec3d(ll))
  }

  /// Face, leaf `(i, j)` and Hilbert orientation of the cell. For non-leaf
  /// cells `(i, j)` is a leaf position near the cell center.
  pub(crate) fn to_face_ij_orientation(self) -> (u8, u32, u32, u8) {
    let face = self.face();
    let mut orientation = usize::from(face & SWAP_MASK);
    let mut i: u32 = 0;
    let mut j: u32 = 0;
    // The topmost step only carries the 2 levels that do not fill a whole
    // lookup step.
    let mut nbits = u32::from(MAX_LEVEL) - 7 * LOOKUP_BITS;
    for k in (0..8).rev() {
      let pos = (self.0 >> (k * 2 * LOOKUP_BITS + 1)) & ((1u64 << (2 * nbits)) - 1);
      orientation += (pos as usize) << 2;
      orientation = usize::from(LOOKUP_IJ[orientation]);
      i += ((orientation >> (LOOKUP_BITS + 2)) as u32) << (k * LOOKUP_BITS);
      j += (((orientation >> 2) as u32) & LOOKUP_MASK) << (k * LOOKUP_BITS);
      orientation &= usize::from(SWAP_MASK | INVERT_MASK);
      nbits = LOOKUP_BITS;
    }
    // Cells at odd levels below the lookup granularity end one swap short.
    if self.lsb() & 0x1111_1111_1111_1110 != 0 {
      orientation ^= usize::from(SWAP_MASK);
    }
    (face, i, j, orientation as u8)
  }

  /// Raw 64-bit value.
  #[inline]
  #[must_use]
  pub const fn id(self) -> u64 {
    self.0
  }

  /// Cube face of the cell, `0..=5` for valid ids.
  #[inline]
  #[must_use]
  pub const fn face(self) -> u8 {
    (self.0 >> POS_BITS) as u8
  }

  /// Lowest set bit (the marker bit).
  #[inline]
  #[must_use]
  pub const fn lsb(self) -> u64 {
    self.0 & self.0.wrapping_neg()
  }

  /// Marker bit of cells at `level`.
  #[inline]
  #[must_use]
  pub const fn lsb_for_level(level: u8) -> u64 {
    1 << (2 * (MAX_LEVEL - level) as u32)
  }

  /// Subdivision level, `0` for face cells and `30` for leaves.
  #[inline]
  #[must_use]
  pub fn level(self) -> u8 {
    let steps = (self.0.trailing_zeros() / 2).min(u32::from(MAX_LEVEL));
    MAX_LEVEL - steps as u8
  }

  /// Whether the id encodes a real cell: a face in range and a marker bit at
  /// an even position.
  #[inline]
  #[must_use]
  pub fn is_valid(self) -> bool {
    self.face() < NUM_FACES && (self.lsb() & VALID_LSB_MASK) != 0
  }

  /// Whether the cell is a leaf (level 30).
  #[inline]
  #[must_use]
  pub const fn is_leaf(self) -> bool {
    self.0 & 1 != 0
  }

  /// Whether the cell is a whole cube face (level 0).
  #[inline]
  #[must_use]
  pub const fn is_face(self) -> bool {
    self.0 & (Self::lsb_for_level(0) - 1) == 0
  }

  /// Smallest leaf id contained in this cell.
  #[inline]
  #[must_use]
  pub const fn range_min(self) -> CellId {
    CellId(self.0 - (self.lsb() - 1))
  }

  /// Largest leaf id contained in this cell.
  #[inline]
  #[must_use]
  pub const fn range_max(self) -> CellId {
    CellId(self.0 + (self.lsb() - 1))
  }

  /// Whether `other` is this cell or one of its descendants.
  #[inline]
  #[must_use]
  pub fn contains(self, other: CellId) -> bool {
    other >= self.range_min() && other <= self.range_max()
  }

  /// Whether one of the two cells contains the other.
  #[inline]
  #[must_use]
  pub fn intersects(self, other: CellId) -> bool {
    other.range_min() <= self.range_max() && other.range_max() >= self.range_min()
  }

  /// Ancestor at `level` without checking that `level <= self.level()`.
  #[inline]
  pub(crate) fn parent_unchecked(self, level: u8) -> CellId {
    let new_lsb = Self::lsb_for_level(level);
    CellId((self.0 & new_lsb.wrapping_neg()) | new_lsb)
  }

  /// Immediate parent. Face cells have no parent.
  pub fn parent(self) -> Result<CellId, S2Error> {
    if !self.is_valid() {
      return Err(S2Error::CellInvalid);
    }
    if self.is_face() {
      return Err(S2Error::LevelDomain);
    }
    Ok(self.parent_unchecked(self.level() - 1))
  }

  /// Ancestor at `level`, which must not be finer than the cell itself. The
  /// cell's own level returns the cell.
  pub fn parent_at(self, level: u8) -> Result<CellId, S2Error> {
    if !self.is_valid() {
      return Err(S2Error::CellInvalid);
    }
    if level > self.level() {
      return Err(S2Error::LevelDomain);
    }
    Ok(self.parent_unchecked(level))
  }

  /// Child at Hilbert position `k` in `0..4`, unchecked.
  #[inline]
  pub(crate) fn child_unchecked(self, k: u8) -> CellId {
    let step = self.lsb() >> 2;
    CellId(self.0 - 3 * step + 2 * u64::from(k) * step)
  }

  /// Child at Hilbert position `k` in `0..4`.
  pub fn child(self, k: u8) -> Result<CellId, S2Error> {
    if !self.is_valid() {
      return Err(S2Error::CellInvalid);
    }
    if self.is_leaf() {
      return Err(S2Error::LevelDomain);
    }
    if k > 3 {
      return Err(S2Error::Domain);
    }
    Ok(self.child_unchecked(k))
  }

  /// The four children in Hilbert order.
  pub fn children(self) -> Result<[CellId; 4], S2Error> {
    if !self.is_valid() {
      return Err(S2Error::CellInvalid);
    }
    if self.is_leaf() {
      return Err(S2Error::LevelDomain);
    }
    Ok(self.children_unchecked())
  }

  #[inline]
  pub(crate) fn children_unchecked(self) -> [CellId; 4] {
    [0, 1, 2, 3].map(|k| self.child_unchecked(k))
  }

  /// Position (`0..4`) of this cell's level-`level` ancestor within its own
  /// parent. `level` must be in `1..=self.level()`.
  pub fn child_position(self, level: u8) -> Result<u8, S2Error> {
    if !self.is_valid() {
      return Err(S2Error::CellInvalid);
    }
    if level == 0 || level > self.level() {
      return Err(S2Error::LevelDomain);
    }
    Ok(self.child_position_unchecked(level))
  }

  #[inline]
  pub(crate) fn child_position_unchecked(self, level: u8) -> u8 {
    ((self.0 >> (2 * u32::from(MAX_LEVEL - level) + 1)) & 3) as u8
  }

  /// Leaf `(i, j)` bounds of the cell on its face: `(face, i_lo, j_lo, size)`.
  pub(crate) fn face_ij_bounds(self) -> (u8, u32, u32, u32) {
    let (face, i, j, _) = self.to_face_ij_orientation();
    let size = MAX_SIZE >> self.level();
    let mask = !(size - 1);
    (face, i & mask, j & mask, size)
  }

  /// `(u, v)` of the cell center on its face.
  pub(crate) fn center_uv(self) -> (u8, f64, f64) {
    let (face, i_lo, j_lo, size) = self.face_ij_bounds();
    let s = 0.5 * (ij_to_st_min(i_lo) + ij_to_st_min(i_lo + size));
    let t = 0.5 * (ij_to_st_min(j_lo) + ij_to_st_min(j_lo + size));
    (face, st_to_uv(s), st_to_uv(t))
  }

  /// Unit vector at the cell center.
  #[must_use]
  pub fn to_point(self) -> Vec3d {
    let (face, u, v) = self.center_uv();
    face_uv_to_xyz(face, u, v).normalize()
  }

  /// Latitude/longitude of the cell center.
  #[must_use]
  pub fn to_lat_lng(self) -> LatLng {
    vec3d_to_geo(&self.to_point())
  }
}

impl fmt::Display for CellId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.token())
  }
}
