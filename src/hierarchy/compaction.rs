// src/hierarchy/compaction.rs

use crate::constants::MAX_LEVEL;
use crate::hierarchy::parent_child::cell_to_children_size;
use crate::types::{CellId, S2Error};

/// Whether the four cells are the complete set of children of one parent.
/// Expects distinct cells in increasing order.
fn is_full_quad(cells: &[CellId]) -> bool {
  let [a, b, c, d] = cells else {
    return false;
  };
  if d.is_face() {
    return false;
  }
  let level = d.level();
  if a.level() != level || b.level() != level || c.level() != level {
    return false;
  }
  let parent = d.parent_unchecked(level - 1);
  [a, b, c].iter().all(|x| x.parent_unchecked(level - 1) == parent)
}

/// Normalizes `cells` in place: sorts them, drops duplicates and cells
/// contained in another cell, and replaces complete groups of four siblings
/// by their parent as long as the parent level is at least
/// `min_merge_level`. Invalid ids must already have been filtered out.
pub(crate) fn normalize_cells(cells: &mut Vec<CellId>, min_merge_level: u8) {
  cells.sort_unstable();
  let mut out: Vec<CellId> = Vec::with_capacity(cells.len());
  for &cell in cells.iter() {
    if out.last().is_some_and(|last| last.contains(cell)) {
      continue;
    }
    while out.last().is_some_and(|last| cell.contains(*last)) {
      out.pop();
    }
    let mut cell = cell;
    while out.len() >= 3 && cell.level() > min_merge_level {
      let n = out.len();
      let quad = [out[n - 3], out[n - 2], out[n - 1], cell];
      if !is_full_quad(&quad) {
        break;
      }
      out.truncate(n - 3);
      cell = cell.parent_unchecked(cell.level() - 1);
    }
    out.push(cell);
  }
  *cells = out;
}

/// Compacts a set of cells: the smallest set of cells covering exactly the
/// same area, sorted in Hilbert order.
pub fn compact_cells(cells: &[CellId]) -> Result<Vec<CellId>, S2Error> {
  if cells.iter().any(|c| !c.is_valid()) {
    return Err(S2Error::CellInvalid);
  }
  let mut out = cells.to_vec();
  normalize_cells(&mut out, 0);
  Ok(out)
}

/// Number of cells [`uncompact_cells`] produces.
pub fn uncompact_cells_size(cells: &[CellId], level: u8) -> Result<u64, S2Error> {
  if level > MAX_LEVEL {
    return Err(S2Error::LevelDomain);
  }
  cells.iter().try_fold(0u64, |acc, &cell| {
    let n = cell_to_children_size(cell, level)?;
    Ok(acc.saturating_add(n))
  })
}

/// Expands every cell to its descendants at `level`. Every input cell must
/// be at `level` or coarser.
pub fn uncompact_cells(cells: &[CellId], level: u8) -> Result<Vec<CellId>, S2Error> {
  let total = uncompact_cells_size(cells, level)?;
  let mut out = Vec::with_capacity(usize::try_from(total).map_err(|_| S2Error::Domain)?);
  let step = 2 * CellId::lsb_for_level(level);
  for &cell in cells {
    let first = cell.range_min().0 - 1 + CellId::lsb_for_level(level);
    let count = cell_to_children_size(cell, level)?;
    out.extend((0..count).map(|k| CellId(first + k * step)));
  }
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::LatLng;

  fn sample(level: u8) -> CellId {
    CellId::from_lat_lng(&LatLng { lat: 0.1, lng: 0.2 }).parent_at(level).unwrap()
  }

  #[test]
  fn test_compact_full_quads() {
    let parent = sample(8);
    let grandkids = uncompact_cells(&[parent], 10).unwrap();
    assert_eq!(grandkids.len(), 16);
    assert_eq!(compact_cells(&grandkids).unwrap(), vec![parent]);
  }

  #[test]
  fn test_compact_removes_contained_and_duplicates() {
    let parent = sample(5);
    let inner = sample(12);
    let other = parent.children().unwrap();
    let input = vec![inner, parent, parent, other[2]];
    assert_eq!(compact_cells(&input).unwrap(), vec![parent]);
  }

  #[test]
  fn test_partial_quad_is_kept() {
    let kids = sample(7).children().unwrap();
    let input = vec![kids[3], kids[0], kids[1]];
    assert_eq!(compact_cells(&input).unwrap(), vec![kids[0], kids[1], kids[3]]);
  }

  #[test]
  fn test_min_merge_level() {
    let parent = sample(3);
    let mut cells = parent.children().unwrap().to_vec();
    normalize_cells(&mut cells, 4);
    assert_eq!(cells.len(), 4, "parent at level 3 is below the merge floor");
    normalize_cells(&mut cells, 3);
    assert_eq!(cells, vec![parent]);
  }

  #[test]
  fn test_uncompact_errors() {
    let cell = sample(9);
    assert_eq!(uncompact_cells(&[cell], 8), Err(S2Error::LevelDomain));
    assert_eq!(uncompact_cells(&[CellId(0)], 8), Err(S2Error::CellInvalid));
    assert_eq!(uncompact_cells_size(&[cell, sample(10)], 10).unwrap(), 5);
  }
}
