// src/indexing/to_cell.rs

use crate::constants::MAX_LEVEL;
use crate::indexing::from_cell::cell_corners_degrees;
use crate::types::{CellId, LatLng, S2Error};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The cell containing a point at a given level.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointCover {
  pub cell: CellId,
  /// Path token of `cell`.
  pub token: String,
  /// Corners as `[lat, lng]` degrees, counter-clockwise.
  pub corners: [[f64; 2]; 4],
}

/// Cell containing `ll` at `level`.
///
/// # Errors
///
/// `S2Error::LatLngDomain` for non-finite or out-of-range coordinates,
/// `S2Error::LevelDomain` for `level > 30`.
pub fn cell_for_point(ll: &LatLng, level: u8) -> Result<CellId, S2Error> {
  if !ll.is_valid() {
    return Err(S2Error::LatLngDomain);
  }
  if level > MAX_LEVEL {
    return Err(S2Error::LevelDomain);
  }
  Ok(CellId::from_lat_lng(ll).parent_unchecked(level))
}

/// Cell, token and corners of the level-`level` cell containing `ll`.
pub fn cover_point(ll: &LatLng, level: u8) -> Result<PointCover, S2Error> {
  let cell = cell_for_point(ll, level)?;
  Ok(PointCover {
    cell,
    token: cell.token(),
    corners: cell_corners_degrees(cell)?,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cell::Cell;

  #[test]
  fn test_monotonic_with_level() {
    let ll = LatLng::from_degrees(-23.5, 133.9).unwrap();
    for level in 1..=MAX_LEVEL {
      let fine = cell_for_point(&ll, level).unwrap();
      let coarse = cell_for_point(&ll, level - 1).unwrap();
      assert_eq!(fine.parent().unwrap(), coarse);
    }
  }

  #[test]
  fn test_cell_contains_point() {
    let ll = LatLng::from_degrees(64.1, -21.9).unwrap();
    for level in [0, 8, 16, 24] {
      let cell = Cell::from_cell_id(cell_for_point(&ll, level).unwrap()).unwrap();
      assert!(cell.contains_point(&ll.to_point()));
    }
  }

  #[test]
  fn test_errors() {
    let ll = LatLng::from_degrees(0.0, 0.0).unwrap();
    assert_eq!(cell_for_point(&ll, 31), Err(S2Error::LevelDomain));
    let bad = LatLng::from_radians(f64::NAN, 0.0);
    assert_eq!(cell_for_point(&bad, 5), Err(S2Error::LatLngDomain));
    assert_eq!(cover_point(&bad, 5), Err(S2Error::LatLngDomain));
  }

  #[test]
  fn test_cover_point() {
    let ll = LatLng::from_degrees(35.68, 139.69).unwrap();
    let cover = cover_point(&ll, 12).unwrap();
    assert_eq!(cover.cell.level(), 12);
    assert_eq!(cover.token.len(), 13);
    assert_eq!(CellId::from_token(&cover.token).unwrap(), cover.cell);
    // Level-12 cells are a few kilometers across.
    for corner in &cover.corners {
      assert!((corner[0] - 35.68).abs() < 0.05, "corner {corner:?}");
      assert!((corner[1] - 139.69).abs() < 0.05, "corner {corner:?}");
    }
  }
}
