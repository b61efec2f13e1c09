// src/regions/coverer.rs

//! Approximates a region by a bounded number of cells.
//!
//! Cells are refined level by level from the six faces: disjoint cells are
//! dropped, contained cells (and cells at `max_level`) are kept, the rest
//! are split. The result is then coarsened until it fits in `max_cells`,
//! merging the deepest sibling groups first. The covering is always a
//! superset of the region.

use crate::cell::Cell;
use crate::cell_union::CellUnion;
use crate::config::CovererOptions;
use crate::constants::REFINE_FACTOR;
use crate::hierarchy::compaction::normalize_cells;
use crate::hierarchy::parent_child::cell_to_children;
use crate::indexing::from_cell::cell_corners_degrees;
use crate::polygon::Polygon;
use crate::regions::region::Region;
use crate::types::{CellId, CellRelation, S2Error};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Computes coverings for a fixed set of options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionCoverer {
  options: CovererOptions,
}

impl RegionCoverer {
  /// Creates a coverer after validating `options`.
  pub fn new(options: CovererOptions) -> Result<RegionCoverer, S2Error> {
    options.validate()?;
    Ok(RegionCoverer { options })
  }

  #[must_use]
  pub fn options(&self) -> &CovererOptions {
    &self.options
  }

  /// Covers `region` with cells whose levels lie in
  /// `[min_level, max_level]`. The result has at most `max_cells` cells
  /// unless the region needs more than that at `min_level`, in which case
  /// the `min_level` covering is returned and a warning is logged.
  pub fn covering<R: Region + ?Sized>(&self, region: &R) -> CellUnion {
    let mut cells = self.refine(region);
    normalize_cells(&mut cells, self.options.min_level);
    self.coarsen(&mut cells);
    tracing::debug!(
      cells = cells.len(),
      min_level = self.options.min_level,
      max_level = self.options.max_level,
      max_cells = self.options.max_cells,
      "covering computed"
    );
    CellUnion::normalized(cells, self.options.min_level)
  }

  /// Level-by-level refinement. Returns the accepted cells, unsorted.
  fn refine<R: Region + ?Sized>(&self, region: &R) -> Vec<CellId> {
    let CovererOptions {
      min_level,
      max_level,
      max_cells,
    } = self.options;
    let bound = region.cap_bound();
    let classify = |cell: &Cell| {
      if bound.intersects(&cell.cap_bound()) {
        region.relation(cell)
      } else {
        CellRelation::Disjoint
      }
    };

    let mut accepted: Vec<CellId> = Vec::new();
    let mut frontier: Vec<(Cell, CellRelation)> = Cell::faces()
      .into_iter()
      .map(|face| (face, classify(&face)))
      .filter(|(_, rel)| *rel != CellRelation::Disjoint)
      .collect();

    while !frontier.is_empty() {
      let mut split: Vec<CellId> = Vec::new();
      let mut next: Vec<(Cell, CellRelation)> = Vec::new();
      for (cell, rel) in frontier {
        let level = cell.level();
        if rel == CellRelation::Contains && level < min_level {
          // Contained cells are expanded straight down to the floor.
          accepted.extend(cell_to_children(cell.id(), min_level).unwrap_or_default());
          continue;
        }
        if level >= min_level && (rel == CellRelation::Contains || level >= max_level) {
          accepted.push(cell.id());
          continue;
        }
        split.push(cell.id());
        for child in cell.children().into_iter().flatten() {
          let child_rel = classify(&child);
          if child_rel != CellRelation::Disjoint {
            next.push((child, child_rel));
          }
        }
      }

      let next_level = split.first().map_or(min_level, |id| id.level() + 1);
      if next_level > min_level && accepted.len() + next.len() > REFINE_FACTOR * max_cells {
        // Splitting further would only be undone by coarsening.
        accepted.extend(split);
        break;
      }
      frontier = next;
    }
    accepted
  }

  /// Merges cells until at most `max_cells` remain or nothing above
  /// `min_level` is left to merge. `cells` must be normalized.
  fn coarsen(&self, cells: &mut Vec<CellId>) {
    let CovererOptions {
      min_level, max_cells, ..
    } = self.options;
    while cells.len() > max_cells {
      match best_merge(cells, min_level) {
        Some(parent) => {
          cells.retain(|c| !parent.contains(*c));
          cells.push(parent);
        }
        None => {
          // Every group is a single cell: lift the deepest ones.
          let Some(deepest) = cells.iter().map(|c| c.level()).max().filter(|&l| l > min_level) else {
            tracing::warn!(
              cells = cells.len(),
              max_cells,
              min_level,
              "region needs more than max_cells cells at min_level, returning the min_level covering"
            );
            return;
          };
          for c in cells.iter_mut() {
            if c.level() == deepest {
              *c = c.parent_unchecked(deepest - 1);
            }
          }
        }
      }
      normalize_cells(cells, min_level);
    }
  }
}

/// Parent whose merge removes cells, preferring the deepest parent, then the
/// largest gain, then the smallest id. `cells` must be sorted.
fn best_merge(cells: &[CellId], min_level: u8) -> Option<CellId> {
  let mut best: Option<(u8, usize, CellId)> = None;
  for &cell in cells {
    let level = cell.level();
    if level <= min_level {
      continue;
    }
    let parent = cell.parent_unchecked(level - 1);
    let start = cells.partition_point(|c| *c < parent.range_min());
    let end = cells.partition_point(|c| *c <= parent.range_max());
    let gain = end - start - 1;
    if gain == 0 {
      continue;
    }
    let better = match best {
      None => true,
      Some((best_level, best_gain, best_parent)) => {
        (parent.level(), gain, std::cmp::Reverse(parent)) > (best_level, best_gain, std::cmp::Reverse(best_parent))
      }
    };
    if better {
      best = Some((parent.level(), gain, parent));
    }
  }
  best.map(|(_, _, parent)| parent)
}

/// One cell of a [`Covering`], ready for display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CoveredCell {
  pub cell: CellId,
  /// Path token of `cell`.
  pub token: String,
  /// Corners as `[lat, lng]` degrees, counter-clockwise.
  pub corners: [[f64; 2]; 4],
}

/// A covering together with the token and corners of every cell.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Covering {
  pub union: CellUnion,
  pub cells: Vec<CoveredCell>,
}

impl Covering {
  /// Tokens of the cells, in Hilbert order.
  #[must_use]
  pub fn tokens(&self) -> Vec<String> {
    self.cells.iter().map(|c| c.token.clone()).collect()
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.cells.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }
}

/// Covers `polygon` and describes every resulting cell.
///
/// # Errors
///
/// `S2Error::LevelDomain` or `S2Error::OptionInvalid` for invalid options.
pub fn cover_polygon(polygon: &Polygon, options: CovererOptions) -> Result<Covering, S2Error> {
  let union = RegionCoverer::new(options)?.covering(polygon);
  let cells = union
    .cells()
    .iter()
    .map(|&cell| {
      Ok(CoveredCell {
        cell,
        token: cell.token(),
        corners: cell_corners_degrees(cell)?,
      })
    })
    .collect::<Result<Vec<_>, S2Error>>()?;
  Ok(Covering { union, cells })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cap::Cap;
  use crate::polygon_builder::build_polygon;
  use crate::types::LatLng;

  fn square(lng: f64, lat: f64, half: f64) -> Polygon {
    build_polygon(&[
      [lng - half, lat - half],
      [lng + half, lat - half],
      [lng + half, lat + half],
      [lng - half, lat + half],
    ])
  }

  fn assert_levels(union: &CellUnion, min: u8, max: u8) {
    for c in union.cells() {
      assert!(c.level() >= min && c.level() <= max, "cell {c} at level {}", c.level());
    }
  }

  #[test]
  fn test_invalid_options() {
    assert_eq!(RegionCoverer::new(CovererOptions::new(5, 4, 8)), Err(S2Error::LevelDomain));
    assert_eq!(RegionCoverer::new(CovererOptions::new(1, 4, 0)), Err(S2Error::OptionInvalid));
  }

  #[test]
  fn test_budget_and_levels() {
    // Centered on face 0, so the four level-2 cells around the face center
    // always suffice.
    let poly = square(0.0, 0.0, 6.0);
    for max_cells in [4, 5, 8, 20, 100] {
      let coverer = RegionCoverer::new(CovererOptions::new(2, 12, max_cells)).unwrap();
      let union = coverer.covering(&poly);
      assert!(union.len() <= max_cells, "{} cells for budget {max_cells}", union.len());
      assert_levels(&union, 2, 12);
    }
  }

  #[test]
  fn test_covering_contains_region() {
    let poly = square(8.0, 47.0, 1.5);
    let union = RegionCoverer::new(CovererOptions::new(3, 10, 12)).unwrap().covering(&poly);
    for i in 0..=10 {
      for j in 0..=10 {
        let lng = 6.5 + 3.0 * f64::from(i) / 10.0;
        let lat = 45.5 + 3.0 * f64::from(j) / 10.0;
        let p = LatLng::from_degrees(lat, lng).unwrap().to_point();
        if poly.contains_point(&p) {
          assert!(union.contains_point(&p), "({lat}, {lng}) not covered");
        }
      }
    }
  }

  #[test]
  fn test_fixed_level_covering() {
    let poly = square(30.0, -20.0, 0.2);
    let union = RegionCoverer::new(CovererOptions::new(9, 9, 1000)).unwrap().covering(&poly);
    assert!(!union.is_empty());
    assert_levels(&union, 9, 9);
  }

  #[test]
  fn test_budget_conflict_returns_min_level_covering() {
    // A 30-degree square needs more than 2 cells at level 5.
    let poly = square(0.0, 0.0, 15.0);
    let union = RegionCoverer::new(CovererOptions::new(5, 8, 2)).unwrap().covering(&poly);
    assert!(union.len() > 2);
    assert_levels(&union, 5, 5);
  }

  #[test]
  fn test_whole_sphere_cap() {
    let union = RegionCoverer::new(CovererOptions::new(0, 5, 6)).unwrap().covering(&Cap::full());
    assert_eq!(union.len(), 6);
    assert!(union.cells().iter().all(|c| c.is_face()));
  }

  #[test]
  fn test_region_across_faces() {
    // Straddles the corner shared by faces 0, 1 and 2.
    let corner = LatLng::from_degrees(35.26, 45.0).unwrap().to_point();
    let cap = Cap::from_center_angle(corner, 0.05);
    let union = RegionCoverer::new(CovererOptions::new(0, 16, 8)).unwrap().covering(&cap);
    assert!(union.len() <= 8);
    let faces: std::collections::BTreeSet<u8> = union.cells().iter().map(|c| c.face()).collect();
    assert_eq!(faces.len(), 3);
    assert!(union.contains_point(&corner));
  }

  #[test]
  fn test_cover_polygon_output() {
    let poly = square(-0.1, 51.5, 0.3);
    let covering = cover_polygon(&poly, CovererOptions::new(4, 12, 10)).unwrap();
    assert_eq!(covering.len(), covering.union.len());
    assert!(covering.len() <= 10);
    for (cell, token) in covering.cells.iter().zip(covering.tokens()) {
      assert_eq!(CellId::from_token(&token).unwrap(), cell.cell);
      assert_eq!(cell.corners.len(), 4);
    }
  }
}
