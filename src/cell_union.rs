// src/cell_union.rs

use crate::hierarchy::compaction::normalize_cells;
use crate::types::{CellId, S2Error, Vec3d};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A normalized set of cells: sorted, no cell contains another, and no four
/// siblings appear together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellUnion {
  cells: Vec<CellId>,
}

impl CellUnion {
  /// Normalizes `cells` into a union. Invalid ids are rejected.
  pub fn from_cells(cells: Vec<CellId>) -> Result<CellUnion, S2Error> {
    if cells.iter().any(|c| !c.is_valid()) {
      return Err(S2Error::CellInvalid);
    }
    Ok(Self::normalized(cells, 0))
  }

  /// Normalizes valid `cells`, merging sibling groups only into parents at
  /// `min_merge_level` or finer.
  pub(crate) fn normalized(mut cells: Vec<CellId>, min_merge_level: u8) -> CellUnion {
    normalize_cells(&mut cells, min_merge_level);
    CellUnion { cells }
  }

  #[must_use]
  pub fn cells(&self) -> &[CellId] {
    &self.cells
  }

  #[must_use]
  pub fn into_cells(self) -> Vec<CellId> {
    self.cells
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.cells.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  /// Whether some cell of the union contains `id`.
  #[must_use]
  pub fn contains_cell(&self, id: CellId) -> bool {
    // The only candidate is the last cell starting at or before `id`.
    let i = self.cells.partition_point(|c| c.range_min() <= id);
    i > 0 && self.cells[i - 1].contains(id)
  }

  /// Whether some cell of the union intersects `id`.
  #[must_use]
  pub fn intersects_cell(&self, id: CellId) -> bool {
    let i = self.cells.partition_point(|c| c.range_max() < id.range_min());
    i < self.cells.len() && self.cells[i].range_min() <= id.range_max()
  }

  /// Whether `p` lies in one of the cells.
  #[must_use]
  pub fn contains_point(&self, p: &Vec3d) -> bool {
    self.contains_cell(CellId::from_point(p))
  }

  /// Number of leaf cells covered.
  #[must_use]
  pub fn leaf_cells_covered(&self) -> u64 {
    self.cells.iter().map(|c| c.lsb()).sum()
  }
}

impl<'a> IntoIterator for &'a CellUnion {
  type Item = &'a CellId;
  type IntoIter = std::slice::Iter<'a, CellId>;

  fn into_iter(self) -> Self::IntoIter {
    self.cells.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::LatLng;

  fn leaf() -> CellId {
    CellId::from_lat_lng(&LatLng { lat: 0.5, lng: -0.5 })
  }

  #[test]
  fn test_normalization() {
    let parent = leaf().parent_at(10).unwrap();
    let mut cells = parent.children().unwrap().to_vec();
    cells.push(leaf().parent_at(15).unwrap());
    let union = CellUnion::from_cells(cells).unwrap();
    assert_eq!(union.cells(), &[parent]);
  }

  #[test]
  fn test_rejects_invalid() {
    assert_eq!(CellUnion::from_cells(vec![CellId(0)]), Err(S2Error::CellInvalid));
  }

  #[test]
  fn test_contains_and_intersects() {
    let a = leaf().parent_at(12).unwrap();
    let far = CellId::from_lat_lng(&LatLng { lat: -1.0, lng: 2.0 }).parent_at(12).unwrap();
    let union = CellUnion::from_cells(vec![a, far]).unwrap();
    assert!(union.contains_cell(leaf()));
    assert!(union.contains_cell(a));
    assert!(!union.contains_cell(a.parent().unwrap()));
    assert!(union.intersects_cell(a.parent().unwrap()));
    assert!(union.intersects_cell(leaf()));
    assert!(union.contains_point(&leaf().to_point()));
    let elsewhere = CellId::from_lat_lng(&LatLng { lat: 1.2, lng: 0.3 });
    assert!(!union.contains_cell(elsewhere));
    assert!(!union.intersects_cell(elsewhere.parent_at(12).unwrap()));
  }

  #[test]
  fn test_leaf_cells_covered() {
    let a = leaf().parent_at(29).unwrap();
    let union = CellUnion::from_cells(vec![a, leaf().parent_at(30).unwrap()]).unwrap();
    assert_eq!(union.leaf_cells_covered(), 4);
    assert_eq!((&union).into_iter().count(), 1);
  }
}
