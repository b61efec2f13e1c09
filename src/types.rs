//! Core data structures.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use serde_repr::{Deserialize_repr, Serialize_repr};
use thiserror::Error;

/// Identifies a cell of the hierarchical grid.
///
/// The 64 bits hold the cube face (3 bits), two bits of Hilbert-curve child
/// position for every level below the face, and a trailing `1` marker bit.
/// Everything below the marker is zero. Numeric order is Hilbert order, and
/// every descendant of a cell lies in `[range_min, range_max]` of that cell.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellId(pub u64);

/// Invalid cell id, often used to signify an error or missing data.
pub const CELL_NONE: CellId = CellId(0);

/// Latitude/longitude coordinates in radians.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLng {
  /// Latitude in radians.
  pub lat: f64,
  /// Longitude in radians.
  pub lng: f64,
}

/// 3D floating-point vector. Points on the sphere are unit-length `Vec3d`s.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vec3d {
  /// X component.
  pub x: f64,
  /// Y component.
  pub y: f64,
  /// Z component.
  pub z: f64,
}

/// How a cell relates to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CellRelation {
  /// The cell and the region do not intersect.
  Disjoint,
  /// The cell and the region intersect, but the cell is not contained.
  Intersects,
  /// The cell is entirely inside the region.
  Contains,
}

/// Error codes returned by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[repr(u32)]
#[cfg_attr(feature = "serde", derive(Serialize_repr, Deserialize_repr))]
pub enum S2Error {
  /// The operation failed but a more specific error is not available.
  #[error("operation failed")]
  Failed = 1,
  /// Argument was outside of acceptable range.
  #[error("argument out of range")]
  Domain = 2,
  /// Latitude or longitude arguments were outside of acceptable range.
  #[error("latitude/longitude out of range")]
  LatLngDomain = 3,
  /// Level argument was outside of acceptable range.
  #[error("cell level out of range")]
  LevelDomain = 4,
  /// `CellId` argument was not valid.
  #[error("invalid cell id")]
  CellInvalid = 5,
  /// A cell token could not be parsed.
  #[error("invalid cell token")]
  TokenInvalid = 6,
  /// Options argument was not valid.
  #[error("invalid options")]
  OptionInvalid = 7,
}

impl TryFrom<u32> for S2Error {
  type Error = S2Error;

  fn try_from(value: u32) -> Result<Self, Self::Error> {
    match value {
      1 => Ok(S2Error::Failed),
      2 => Ok(S2Error::Domain),
      3 => Ok(S2Error::LatLngDomain),
      4 => Ok(S2Error::LevelDomain),
      5 => Ok(S2Error::CellInvalid),
      6 => Ok(S2Error::TokenInvalid),
      7 => Ok(S2Error::OptionInvalid),
      _ => Err(S2Error::Domain),
    }
  }
}
