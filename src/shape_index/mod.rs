// src/shape_index/mod.rs

//! An immutable index from cells to the polygons that overlap them.
//!
//! Every polygon is clipped against the cell hierarchy on its own (see
//! [`clip`]); the index maps each recorded cell to the clipped shapes that
//! live there. A point query walks the ancestors of the point's leaf cell and
//! resolves each candidate exactly.

pub mod clip;
pub mod query;

use crate::config::IndexOptions;
use crate::polygon::Polygon;
use crate::types::{CellId, S2Error};
use std::collections::BTreeMap;
use std::sync::Arc;

pub use query::ContainsPointQuery;

/// Position of a polygon in the index, in insertion order.
pub type ShapeId = usize;

/// The part of one polygon that overlaps one index cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClippedShape {
  shape_id: ShapeId,
  contains_center: bool,
  edges: Vec<u32>,
}

impl ClippedShape {
  #[must_use]
  pub fn shape_id(&self) -> ShapeId {
    self.shape_id
  }

  /// Whether the center of the index cell is inside the polygon, using the
  /// semi-open crossing rule (boundary points are resolved separately).
  #[must_use]
  pub fn contains_center(&self) -> bool {
    self.contains_center
  }

  /// Ids of the polygon edges that touch the (padded) cell.
  #[must_use]
  pub fn edges(&self) -> &[u32] {
    &self.edges
  }

  /// True when the cell lies entirely inside the polygon.
  #[must_use]
  pub fn is_interior(&self) -> bool {
    self.edges.is_empty() && self.contains_center
  }
}

/// Counters gathered while building a [`ShapeIndex`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexBuildStats {
  pub shapes: usize,
  /// Shapes carrying a validation error. They are indexed anyway.
  pub invalid_shapes: usize,
  pub edges: usize,
  pub index_cells: usize,
}

/// Collects polygons for a [`ShapeIndex`]. The index itself only exists once
/// [`ShapeIndexBuilder::build`] has run.
#[derive(Debug, Clone, Default)]
pub struct ShapeIndexBuilder {
  shapes: Vec<Arc<Polygon>>,
}

impl ShapeIndexBuilder {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a polygon and returns its shape id.
  pub fn add(&mut self, polygon: impl Into<Arc<Polygon>>) -> ShapeId {
    self.shapes.push(polygon.into());
    self.shapes.len() - 1
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.shapes.len()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.shapes.is_empty()
  }

  /// Clips every polygon and assembles the index.
  pub fn build(self, options: IndexOptions) -> Result<ShapeIndex, S2Error> {
    options.validate()?;
    let shapes = self.shapes;

    for (shape_id, polygon) in shapes.iter().enumerate() {
      if let Some(err) = polygon.validation_error() {
        tracing::warn!(shape_id, error = %err, "indexing invalid polygon");
      }
    }

    let clipped = clip_all(&shapes, &options);
    let mut cells: BTreeMap<CellId, Vec<ClippedShape>> = BTreeMap::new();
    let mut level_mask = 0u32;
    // Shapes are merged in id order, so every cell's list is sorted by id.
    for per_shape in clipped {
      for (id, shape) in per_shape {
        level_mask |= 1 << id.level();
        cells.entry(id).or_default().push(shape);
      }
    }

    let stats = IndexBuildStats {
      shapes: shapes.len(),
      invalid_shapes: shapes.iter().filter(|p| !p.is_valid()).count(),
      edges: shapes.iter().map(|p| p.num_edges()).sum(),
      index_cells: cells.len(),
    };
    tracing::info!(
      shapes = stats.shapes,
      invalid_shapes = stats.invalid_shapes,
      edges = stats.edges,
      index_cells = stats.index_cells,
      "shape index built"
    );

    Ok(ShapeIndex {
      shapes,
      cells,
      level_mask,
      options,
      stats,
    })
  }
}

#[cfg(feature = "parallel")]
fn clip_all(shapes: &[Arc<Polygon>], options: &IndexOptions) -> Vec<Vec<(CellId, ClippedShape)>> {
  use rayon::prelude::*;

  shapes
    .par_iter()
    .enumerate()
    .map(|(shape_id, polygon)| clip::clip_polygon(shape_id, polygon, options))
    .collect()
}

#[cfg(not(feature = "parallel"))]
fn clip_all(shapes: &[Arc<Polygon>], options: &IndexOptions) -> Vec<Vec<(CellId, ClippedShape)>> {
  shapes
    .iter()
    .enumerate()
    .map(|(shape_id, polygon)| clip::clip_polygon(shape_id, polygon, options))
    .collect()
}

/// Polygons plus the cells they were clipped into. Immutable once built.
#[derive(Debug, Clone)]
pub struct ShapeIndex {
  shapes: Vec<Arc<Polygon>>,
  cells: BTreeMap<CellId, Vec<ClippedShape>>,
  /// Bit `L` is set when some index cell has level `L`.
  level_mask: u32,
  options: IndexOptions,
  stats: IndexBuildStats,
}

impl ShapeIndex {
  /// Indexes `polygons`, assigning shape ids in iteration order.
  pub fn build<I, P>(polygons: I, options: IndexOptions) -> Result<ShapeIndex, S2Error>
  where
    I: IntoIterator<Item = P>,
    P: Into<Arc<Polygon>>,
  {
    let mut builder = ShapeIndexBuilder::new();
    for polygon in polygons {
      builder.add(polygon);
    }
    builder.build(options)
  }

  #[must_use]
  pub fn shapes(&self) -> &[Arc<Polygon>] {
    &self.shapes
  }

  #[must_use]
  pub fn shape(&self, id: ShapeId) -> Option<&Arc<Polygon>> {
    self.shapes.get(id)
  }

  #[must_use]
  pub fn num_shapes(&self) -> usize {
    self.shapes.len()
  }

  #[must_use]
  pub fn num_cells(&self) -> usize {
    self.cells.len()
  }

  #[must_use]
  pub fn options(&self) -> &IndexOptions {
    &self.options
  }

  #[must_use]
  pub fn stats(&self) -> &IndexBuildStats {
    &self.stats
  }

  /// Index cells in Hilbert order with their clipped shapes.
  pub fn cells(&self) -> impl Iterator<Item = (CellId, &[ClippedShape])> + '_ {
    self.cells.iter().map(|(id, shapes)| (*id, shapes.as_slice()))
  }

  /// Clipped shapes recorded at exactly `id`.
  #[must_use]
  pub fn clipped_shapes(&self, id: CellId) -> &[ClippedShape] {
    self.cells.get(&id).map_or(&[], Vec::as_slice)
  }

  /// Index cells that contain `leaf`, coarsest first.
  pub(crate) fn ancestor_entries(&self, leaf: CellId) -> impl Iterator<Item = (CellId, &[ClippedShape])> + '_ {
    (0..=crate::constants::MAX_LEVEL)
      .filter(move |&level| self.level_mask & (1 << level) != 0)
      .filter_map(move |level| {
        let id = leaf.parent_unchecked(level);
        self.cells.get(&id).map(|shapes| (id, shapes.as_slice()))
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::polygon_builder::build_polygon;

  fn square(lng: f64, lat: f64, half: f64) -> Polygon {
    build_polygon(&[
      [lng - half, lat - half],
      [lng + half, lat - half],
      [lng + half, lat + half],
      [lng - half, lat + half],
    ])
  }

  #[test]
  fn test_builder_assigns_ids_in_order() {
    let mut builder = ShapeIndexBuilder::new();
    assert!(builder.is_empty());
    assert_eq!(builder.add(square(0.0, 0.0, 1.0)), 0);
    assert_eq!(builder.add(Arc::new(square(10.0, 0.0, 1.0))), 1);
    assert_eq!(builder.len(), 2);
    let index = builder.build(IndexOptions::default()).unwrap();
    assert_eq!(index.num_shapes(), 2);
    assert!(index.shape(1).is_some());
    assert!(index.shape(2).is_none());
  }

  #[test]
  fn test_invalid_options_are_rejected() {
    let opts = IndexOptions::default().with_max_edges_per_cell(0);
    assert_eq!(ShapeIndex::build(vec![square(0.0, 0.0, 1.0)], opts).err(), Some(S2Error::OptionInvalid));
    let opts = IndexOptions::default().with_max_level(31);
    assert_eq!(ShapeIndex::build(Vec::<Polygon>::new(), opts).err(), Some(S2Error::LevelDomain));
  }

  #[test]
  fn test_stats() {
    let bowtie = build_polygon(&[[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [0.0, 2.0]]);
    let index = ShapeIndex::build(vec![square(0.0, 0.0, 1.0), bowtie], IndexOptions::default()).unwrap();
    let stats = index.stats();
    assert_eq!(stats.shapes, 2);
    assert_eq!(stats.invalid_shapes, 1);
    assert_eq!(stats.edges, 8);
    assert_eq!(stats.index_cells, index.num_cells());
    assert!(stats.index_cells > 0);
  }

  #[test]
  fn test_cell_lists_sorted_by_shape() {
    let polys: Vec<Polygon> = (0..5).map(|k| square(f64::from(k) * 0.1, 0.0, 2.0)).collect();
    let index = ShapeIndex::build(polys, IndexOptions::default()).unwrap();
    for (_, shapes) in index.cells() {
      assert!(shapes.windows(2).all(|w| w[0].shape_id() < w[1].shape_id()));
    }
  }

  #[test]
  fn test_edge_budget_respected_below_max_level() {
    let ring: Vec<[f64; 2]> = (0..64)
      .map(|k| {
        let a = f64::from(k) / 64.0 * std::f64::consts::TAU;
        [3.0 * a.cos(), 3.0 * a.sin()]
      })
      .collect();
    let opts = IndexOptions::default().with_max_edges_per_cell(4);
    let index = ShapeIndex::build(vec![build_polygon(&ring)], opts).unwrap();
    for (id, shapes) in index.cells() {
      for shape in shapes {
        assert!(shape.edges().len() <= 4 || id.level() == opts.max_level);
      }
    }
  }
}
