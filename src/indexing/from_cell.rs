// src/indexing/from_cell.rs

use crate::cell::Cell;
use crate::types::{CellId, LatLng, S2Error};

/// Center of the cell.
pub fn cell_center(cell: CellId) -> Result<LatLng, S2Error> {
  if !cell.is_valid() {
    return Err(S2Error::CellInvalid);
  }
  Ok(cell.to_lat_lng())
}

/// The four corners of the cell, counter-clockwise.
pub fn cell_vertices(cell: CellId) -> Result<[LatLng; 4], S2Error> {
  let cell = Cell::from_cell_id(cell)?;
  Ok(cell.vertices().map(|v| LatLng::from_point(&v)))
}

/// The four corners of the cell as `[lat, lng]` pairs in degrees,
/// counter-clockwise.
pub fn cell_corners_degrees(cell: CellId) -> Result<[[f64; 2]; 4], S2Error> {
  Ok(cell_vertices(cell)?.map(|ll| [ll.lat_degrees(), ll.lng_degrees()]))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::latlng::great_circle_distance_rads;

  #[test]
  fn test_center_and_vertices() {
    let id = CellId::from_lat_lng(&LatLng::from_degrees(40.7, -74.0).unwrap()).parent_at(10).unwrap();
    let center = cell_center(id).unwrap();
    let corners = cell_vertices(id).unwrap();
    // Level-10 cells are roughly 10 km across.
    for corner in &corners {
      let d = great_circle_distance_rads(&center, corner);
      assert!(d > 1e-4 && d < 3e-3, "corner distance {d}");
    }
    let degrees = cell_corners_degrees(id).unwrap();
    assert!((degrees[0][0] - corners[0].lat_degrees()).abs() < 1e-12);
    assert!((degrees[0][1] - corners[0].lng_degrees()).abs() < 1e-12);
  }

  #[test]
  fn test_invalid_cell() {
    assert_eq!(cell_center(CellId(0)), Err(S2Error::CellInvalid));
    assert_eq!(cell_vertices(CellId(0)), Err(S2Error::CellInvalid));
  }
}
