// src/coords/mod.rs

//! Cube-face coordinate systems.
//!
//! A point on the sphere is addressed, from coarse to fine, as:
//!
//! * `(face, u, v)`: gnomonic projection onto one of the six cube faces,
//!   `u, v` in `[-1, 1]`.
//! * `(face, s, t)`: `u, v` passed through a quadratic transform that evens
//!   out cell areas, `s, t` in `[0, 1]`.
//! * `(face, i, j)`: `s, t` scaled to integers in `[0, 2^30)`.
//! * Hilbert-curve position, which is what a `CellId` stores.

pub mod face_uv;
pub mod hilbert;

pub use face_uv::{
  face_uv_to_xyz, face_xyz_to_uv, ij_to_st_min, st_to_ij, st_to_uv, uv_to_st, valid_face_xyz_to_uv, xyz_to_face,
  xyz_to_face_uv,
};
