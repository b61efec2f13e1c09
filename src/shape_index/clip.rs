// src/shape_index/clip.rs

//! Recursive clipping of one polygon against the cell hierarchy.

use super::{ClippedShape, ShapeId};
use crate::cell::Cell;
use crate::config::IndexOptions;
use crate::constants::CELL_PADDING_UV;
use crate::math::predicates::{crossing_sign, edge_or_vertex_crossing};
use crate::polygon::{Loop, Polygon};
use crate::types::{CellId, Vec3d};

/// Clips `polygon` into the cells it should be recorded at.
///
/// The returned cells are pairwise disjoint. A cell is recorded when the
/// polygon boundary leaves at most `max_edges_per_cell` edges in it (or the
/// cell is at `max_level`), or when no boundary touches it and its center is
/// inside.
#[must_use]
pub fn clip_polygon(shape_id: ShapeId, polygon: &Polygon, options: &IndexOptions) -> Vec<(CellId, ClippedShape)> {
  let outer = polygon.outer();
  let mut out = Vec::new();
  if outer.num_vertices() < 3 {
    return out;
  }
  let clipper = Clipper {
    shape_id,
    outer,
    options,
  };
  let bound = polygon.cap_bound();
  let all_edges: Vec<u32> = (0..outer.num_edges() as u32).collect();
  for face in Cell::faces() {
    if !bound.intersects(&face.cap_bound()) {
      continue;
    }
    let edges = clipper.edges_touching(&face, &all_edges);
    let contains_center = outer.brute_force_contains(&face.center());
    clipper.clip(face, edges, contains_center, &mut out);
  }
  out
}

struct Clipper<'a> {
  shape_id: ShapeId,
  outer: &'a Loop,
  options: &'a IndexOptions,
}

impl Clipper<'_> {
  fn clip(&self, cell: Cell, edges: Vec<u32>, contains_center: bool, out: &mut Vec<(CellId, ClippedShape)>) {
    if edges.is_empty() {
      if contains_center {
        out.push((cell.id(), self.clipped(contains_center, edges)));
      }
      return;
    }
    if edges.len() <= self.options.max_edges_per_cell || cell.level() >= self.options.max_level {
      out.push((cell.id(), self.clipped(contains_center, edges)));
      return;
    }
    let Ok(children) = cell.children() else {
      out.push((cell.id(), self.clipped(contains_center, edges)));
      return;
    };
    let center = cell.center();
    for child in children {
      let child_center = child.center();
      let child_contains = edges.iter().fold(contains_center, |inside, &e| {
        let (a, b) = self.outer.edge(e as usize);
        inside ^ edge_or_vertex_crossing(&center, &child_center, &a, &b)
      });
      let child_edges = self.edges_touching(&child, &edges);
      self.clip(child, child_edges, child_contains, out);
    }
  }

  /// The subset of `edges` that reaches into the padded `cell`.
  fn edges_touching(&self, cell: &Cell, edges: &[u32]) -> Vec<u32> {
    let corners = cell.padded_vertices(CELL_PADDING_UV);
    edges
      .iter()
      .copied()
      .filter(|&e| {
        let (a, b) = self.outer.edge(e as usize);
        edge_touches_cell(cell, &corners, &a, &b)
      })
      .collect()
  }

  fn clipped(&self, contains_center: bool, edges: Vec<u32>) -> ClippedShape {
    ClippedShape {
      shape_id: self.shape_id,
      contains_center,
      edges,
    }
  }
}

fn edge_touches_cell(cell: &Cell, corners: &[Vec3d; 4], a: &Vec3d, b: &Vec3d) -> bool {
  cell.contains_point_padded(a, CELL_PADDING_UV)
    || cell.contains_point_padded(b, CELL_PADDING_UV)
    || (0..4).any(|k| crossing_sign(a, b, &corners[k], &corners[(k + 1) % 4]) >= 0)
}
