// src/coords/face_uv.rs

use crate::constants::MAX_SIZE;
use crate::types::Vec3d;

/// Face whose axis has the largest absolute component of `p`. Faces 0..=2
/// are the positive x, y and z axes; faces 3..=5 the negative ones.
#[inline]
#[must_use]
pub fn xyz_to_face(p: &Vec3d) -> u8 {
  let axis = p.largest_abs_component();
  if p.get(axis) < 0.0 {
    axis as u8 + 3
  } else {
    axis as u8
  }
}

/// Projects `p` onto `face`. The caller guarantees that `p` lies in the
/// hemisphere centered on that face's axis.
#[inline]
#[must_use]
pub fn valid_face_xyz_to_uv(face: u8, p: &Vec3d) -> (f64, f64) {
  match face {
    0 => (p.y / p.x, p.z / p.x),
    1 => (-p.x / p.y, p.z / p.y),
    2 => (-p.x / p.z, -p.y / p.z),
    3 => (p.z / p.x, p.y / p.x),
    4 => (p.z / p.y, -p.x / p.y),
    _ => (-p.y / p.z, -p.x / p.z),
  }
}

/// Face and `(u, v)` of `p` on that face.
#[inline]
#[must_use]
pub fn xyz_to_face_uv(p: &Vec3d) -> (u8, f64, f64) {
  let face = xyz_to_face(p);
  let (u, v) = valid_face_xyz_to_uv(face, p);
  (face, u, v)
}

/// Projects `p` onto `face`, or `None` if `p` is not in the open hemisphere
/// facing that face. The returned `(u, v)` may lie outside `[-1, 1]`.
#[must_use]
pub fn face_xyz_to_uv(face: u8, p: &Vec3d) -> Option<(f64, f64)> {
  let positive = if face < 3 {
    p.get(face as usize) > 0.0
  } else {
    p.get(face as usize - 3) < 0.0
  };
  positive.then(|| valid_face_xyz_to_uv(face, p))
}

/// Direction vector (not unit length) for `(u, v)` on `face`.
#[inline]
#[must_use]
pub fn face_uv_to_xyz(face: u8, u: f64, v: f64) -> Vec3d {
  match face {
    0 => Vec3d::new(1.0, u, v),
    1 => Vec3d::new(-u, 1.0, v),
    2 => Vec3d::new(-u, -v, 1.0),
    3 => Vec3d::new(-1.0, -v, -u),
    4 => Vec3d::new(v, -1.0, -u),
    _ => Vec3d::new(v, u, -1.0),
  }
}

/// Quadratic `s -> u` transform.
#[inline]
#[must_use]
pub fn st_to_uv(s: f64) -> f64 {
  if s >= 0.5 {
    (1.0 / 3.0) * (4.0 * s * s - 1.0)
  } else {
    (1.0 / 3.0) * (1.0 - 4.0 * (1.0 - s) * (1.0 - s))
  }
}

/// Inverse of [`st_to_uv`].
#[inline]
#[must_use]
pub fn uv_to_st(u: f64) -> f64 {
  if u >= 0.0 {
    0.5 * (1.0 + 3.0 * u).sqrt()
  } else {
    1.0 - 0.5 * (1.0 - 3.0 * u).sqrt()
  }
}

/// Leaf-level integer coordinate containing `s`, clamped to the face.
#[inline]
#[must_use]
pub fn st_to_ij(s: f64) -> u32 {
  let scaled = (f64::from(MAX_SIZE) * s).floor();
  scaled.clamp(0.0, f64::from(MAX_SIZE - 1)) as u32
}

/// Lower `s` boundary of the leaf column `i`. Also valid for `i == MAX_SIZE`.
#[inline]
#[must_use]
pub fn ij_to_st_min(i: u32) -> f64 {
  f64::from(i) / f64::from(MAX_SIZE)
}
