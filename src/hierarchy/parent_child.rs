// src/hierarchy/parent_child.rs

use crate::constants::MAX_LEVEL;
use crate::types::{CellId, S2Error};

/// First descendant of `cell` at `level`, in Hilbert order. `level` must not
/// be coarser than the cell.
#[inline]
fn child_begin_at(cell: CellId, level: u8) -> CellId {
  CellId(cell.0 - cell.lsb() + CellId::lsb_for_level(level))
}

fn check_child_level(cell: CellId, child_level: u8) -> Result<(), S2Error> {
  if !cell.is_valid() {
    return Err(S2Error::CellInvalid);
  }
  if child_level < cell.level() || child_level > MAX_LEVEL {
    return Err(S2Error::LevelDomain);
  }
  Ok(())
}

/// Produces the ancestor of `cell` at `parent_level`.
pub fn cell_to_parent(cell: CellId, parent_level: u8) -> Result<CellId, S2Error> {
  cell.parent_at(parent_level)
}

/// Number of descendants of `cell` at `child_level`.
pub fn cell_to_children_size(cell: CellId, child_level: u8) -> Result<u64, S2Error> {
  check_child_level(cell, child_level)?;
  Ok(1u64 << (2 * u32::from(child_level - cell.level())))
}

/// All descendants of `cell` at `child_level`, in Hilbert order. A cell is
/// its own only descendant at its own level.
pub fn cell_to_children(cell: CellId, child_level: u8) -> Result<Vec<CellId>, S2Error> {
  let count = cell_to_children_size(cell, child_level)?;
  let step = 2 * CellId::lsb_for_level(child_level);
  let first = child_begin_at(cell, child_level);
  Ok((0..count).map(|k| CellId(first.0 + k * step)).collect())
}

/// Descendant of `cell` at `child_level` that touches the cell's center:
/// the one containing the leaf just above and right of the center.
pub fn cell_to_center_child(cell: CellId, child_level: u8) -> Result<CellId, S2Error> {
  check_child_level(cell, child_level)?;
  let (face, i_lo, j_lo, size) = cell.face_ij_bounds();
  let leaf = CellId::from_face_ij(face, i_lo + size / 2, j_lo + size / 2);
  Ok(leaf.parent_unchecked(child_level))
}

/// Hilbert-order position of `child` among the descendants of its ancestor
/// at `parent_level`.
pub fn cell_to_child_pos(child: CellId, parent_level: u8) -> Result<u64, S2Error> {
  let parent = child.parent_at(parent_level)?;
  let step = 2 * child.lsb();
  Ok((child.0 - child_begin_at(parent, child.level()).0) / step)
}

/// Inverse of [`cell_to_child_pos`]: the descendant of `parent` at
/// `child_level` with Hilbert position `child_pos`.
pub fn child_pos_to_cell(child_pos: u64, parent: CellId, child_level: u8) -> Result<CellId, S2Error> {
  let count = cell_to_children_size(parent, child_level)?;
  if child_pos >= count {
    return Err(S2Error::Domain);
  }
  let step = 2 * CellId::lsb_for_level(child_level);
  Ok(CellId(child_begin_at(parent, child_level).0 + child_pos * step))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::LatLng;

  fn sample(level: u8) -> CellId {
    CellId::from_lat_lng(&LatLng { lat: -0.4, lng: 0.9 }).parent_at(level).unwrap()
  }

  #[test]
  fn test_children_at_level() {
    let cell = sample(10);
    let kids = cell_to_children(cell, 12).unwrap();
    assert_eq!(kids.len(), 16);
    assert_eq!(cell_to_children_size(cell, 12).unwrap(), 16);
    assert!(kids.iter().all(|k| k.level() == 12 && cell.contains(*k)));
    assert!(kids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(kids[0].range_min(), cell.range_min());
    assert_eq!(kids[15].range_max(), cell.range_max());
    assert_eq!(cell_to_children(cell, 10).unwrap(), vec![cell]);
    assert_eq!(cell_to_children(cell, 9), Err(S2Error::LevelDomain));
    assert_eq!(cell_to_children(cell, 31), Err(S2Error::LevelDomain));
  }

  #[test]
  fn test_child_pos_round_trip() {
    let cell = sample(6);
    for (pos, kid) in cell_to_children(cell, 9).unwrap().into_iter().enumerate() {
      assert_eq!(cell_to_child_pos(kid, 6).unwrap(), pos as u64);
      assert_eq!(child_pos_to_cell(pos as u64, cell, 9).unwrap(), kid);
    }
    assert_eq!(child_pos_to_cell(64, cell, 9), Err(S2Error::Domain));
  }

  #[test]
  fn test_center_child() {
    let cell = sample(4);
    for level in 4..=MAX_LEVEL {
      let child = cell_to_center_child(cell, level).unwrap();
      assert_eq!(child.level(), level);
      assert!(cell.contains(child));
    }
  }

  #[test]
  fn test_parent() {
    let cell = sample(20);
    assert_eq!(cell_to_parent(cell, 20).unwrap(), cell);
    assert_eq!(cell_to_parent(cell, 3).unwrap(), sample(3));
    assert_eq!(cell_to_parent(cell, 21), Err(S2Error::LevelDomain));
  }
}
