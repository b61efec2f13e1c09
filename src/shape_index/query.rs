// src/shape_index/query.rs

use super::{ClippedShape, ShapeId, ShapeIndex};
use crate::constants::BOUNDARY_TOLERANCE_RADS;
use crate::math::predicates::{distance_to_edge, edge_or_vertex_crossing};
use crate::polygon::Polygon;
use crate::types::{CellId, LatLng, S2Error, Vec3d};
use std::sync::Arc;

/// Closed containment of `p` for one clipped shape recorded at `cell`.
fn clipped_contains(index: &ShapeIndex, cell: CellId, clipped: &ClippedShape, p: &Vec3d) -> bool {
  if clipped.is_interior() {
    return true;
  }
  let Some(polygon) = index.shape(clipped.shape_id()) else {
    return false;
  };
  let outer = polygon.outer();
  let on_boundary = clipped.edges().iter().any(|&e| {
    let (a, b) = outer.edge(e as usize);
    a == *p || distance_to_edge(p, &a, &b) <= BOUNDARY_TOLERANCE_RADS
  });
  if on_boundary {
    return true;
  }
  let center = cell.to_point();
  clipped.edges().iter().fold(clipped.contains_center(), |inside, &e| {
    let (a, b) = outer.edge(e as usize);
    inside ^ edge_or_vertex_crossing(&center, p, &a, &b)
  })
}

impl ShapeIndex {
  /// Calls `f` with the id of every shape containing `p`, in id order.
  pub fn for_each_containing_shape_id(&self, p: &Vec3d, mut f: impl FnMut(ShapeId)) {
    let leaf = CellId::from_point(p);
    let mut hits: Vec<ShapeId> = Vec::new();
    for (cell, clipped) in self.ancestor_entries(leaf) {
      hits.extend(clipped.iter().filter(|c| clipped_contains(self, cell, c, p)).map(ClippedShape::shape_id));
    }
    // A shape is recorded on at most one ancestor, but different shapes
    // may sit at different levels.
    hits.sort_unstable();
    hits.into_iter().for_each(&mut f);
  }

  /// Ids of the shapes containing `ll`, ascending.
  ///
  /// # Errors
  ///
  /// `S2Error::LatLngDomain` if `ll` is not a valid coordinate.
  pub fn containing_shape_ids(&self, ll: &LatLng) -> Result<Vec<ShapeId>, S2Error> {
    if !ll.is_valid() {
      return Err(S2Error::LatLngDomain);
    }
    let mut ids = Vec::new();
    self.for_each_containing_shape_id(&ll.to_point(), |id| ids.push(id));
    Ok(ids)
  }

  /// The shapes containing `ll`, in shape id order. Points on a boundary
  /// are contained.
  ///
  /// # Errors
  ///
  /// `S2Error::LatLngDomain` if `ll` is not a valid coordinate.
  pub fn containing_shapes(&self, ll: &LatLng) -> Result<Vec<&Arc<Polygon>>, S2Error> {
    Ok(
      self
        .containing_shape_ids(ll)?
        .into_iter()
        .filter_map(|id| self.shape(id))
        .collect(),
    )
  }
}

/// Repeated point queries against one index.
#[derive(Debug, Clone, Copy)]
pub struct ContainsPointQuery<'a> {
  index: &'a ShapeIndex,
}

impl<'a> ContainsPointQuery<'a> {
  #[must_use]
  pub fn new(index: &'a ShapeIndex) -> Self {
    Self { index }
  }

  #[must_use]
  pub fn index(&self) -> &'a ShapeIndex {
    self.index
  }

  /// Whether any indexed shape contains `p`.
  #[must_use]
  pub fn contains(&self, p: &Vec3d) -> bool {
    let leaf = CellId::from_point(p);
    self
      .index
      .ancestor_entries(leaf)
      .any(|(cell, clipped)| clipped.iter().any(|c| clipped_contains(self.index, cell, c, p)))
  }

  /// Whether the shape with id `shape_id` contains `p`.
  #[must_use]
  pub fn shape_contains(&self, shape_id: ShapeId, p: &Vec3d) -> bool {
    let leaf = CellId::from_point(p);
    self.index.ancestor_entries(leaf).any(|(cell, clipped)| {
      clipped
        .iter()
        .any(|c| c.shape_id() == shape_id && clipped_contains(self.index, cell, c, p))
    })
  }

  #[must_use]
  pub fn containing_shapes(&self, p: &Vec3d) -> Vec<&'a Arc<Polygon>> {
    let mut shapes = Vec::new();
    self.for_each_containing_shape(p, |_, polygon| shapes.push(polygon));
    shapes
  }

  /// Calls `f` with every shape containing `p`, in id order.
  pub fn for_each_containing_shape(&self, p: &Vec3d, mut f: impl FnMut(ShapeId, &'a Arc<Polygon>)) {
    let index = self.index;
    index.for_each_containing_shape_id(p, |id| {
      if let Some(polygon) = index.shape(id) {
        f(id, polygon);
      }
    });
  }
}
