// src/regions/region.rs

use crate::cap::Cap;
use crate::cell::Cell;
use crate::math::predicates::{crossing_sign, distance_to_edge};
use crate::polygon::{Loop, Polygon};
use crate::types::{CellRelation, Vec3d};

/// A set of points on the sphere that can be approximated by cells.
pub trait Region {
  /// A cap containing the region.
  fn cap_bound(&self) -> Cap;

  /// How `cell` relates to the region. `Contains` and `Disjoint` must be
  /// exact; `Intersects` may be returned conservatively.
  fn relation(&self, cell: &Cell) -> CellRelation;

  /// Whether the region contains `p`.
  fn contains_point(&self, p: &Vec3d) -> bool;
}

/// Whether the geodesic edge `ab` can reach into `cap`.
fn edge_may_touch_cap(a: &Vec3d, b: &Vec3d, cap: &Cap) -> bool {
  cap.is_full()
    || cap.contains_point(a)
    || cap.contains_point(b)
    || distance_to_edge(&cap.center(), a, b) <= cap.radius_rads()
}

fn loop_relation(l: &Loop, cell: &Cell) -> CellRelation {
  if l.num_vertices() < 3 {
    return CellRelation::Disjoint;
  }
  let cell_cap = cell.cap_bound();
  if !l.cap_bound().intersects(&cell_cap) {
    return CellRelation::Disjoint;
  }
  let corners = cell.vertices();
  for i in 0..l.num_edges() {
    let (a, b) = l.edge(i);
    if !edge_may_touch_cap(&a, &b, &cell_cap) {
      continue;
    }
    if cell.contains_point(&a) {
      return CellRelation::Intersects;
    }
    for k in 0..4 {
      if crossing_sign(&a, &b, &corners[k], &corners[(k + 1) % 4]) >= 0 {
        return CellRelation::Intersects;
      }
    }
  }
  // The boundary misses the cell entirely, so the cell is either wholly
  // inside or wholly outside.
  if l.contains_point(&cell.center()) {
    CellRelation::Contains
  } else {
    CellRelation::Disjoint
  }
}

impl Region for Loop {
  fn cap_bound(&self) -> Cap {
    Loop::cap_bound(self)
  }

  fn relation(&self, cell: &Cell) -> CellRelation {
    loop_relation(self, cell)
  }

  fn contains_point(&self, p: &Vec3d) -> bool {
    Loop::contains_point(self, p)
  }
}

impl Region for Polygon {
  fn cap_bound(&self) -> Cap {
    Polygon::cap_bound(self)
  }

  fn relation(&self, cell: &Cell) -> CellRelation {
    loop_relation(self.outer(), cell)
  }

  fn contains_point(&self, p: &Vec3d) -> bool {
    Polygon::contains_point(self, p)
  }
}

impl Region for Cell {
  fn cap_bound(&self) -> Cap {
    Cell::cap_bound(self)
  }

  fn relation(&self, cell: &Cell) -> CellRelation {
    if self.id().contains(cell.id()) {
      CellRelation::Contains
    } else if self.id().intersects(cell.id()) {
      CellRelation::Intersects
    } else {
      CellRelation::Disjoint
    }
  }

  fn contains_point(&self, p: &Vec3d) -> bool {
    Cell::contains_point(self, p)
  }
}

impl Region for Cap {
  fn cap_bound(&self) -> Cap {
    *self
  }

  fn relation(&self, cell: &Cell) -> CellRelation {
    if self.is_empty() {
      return CellRelation::Disjoint;
    }
    if self.is_full() {
      return CellRelation::Contains;
    }
    let corners = cell.vertices();
    let inside = corners.iter().filter(|v| self.contains_point(v)).count();
    // Caps up to a hemisphere are convex, so holding every corner means
    // holding the whole cell.
    if inside == 4 && self.chord2() <= 2.0 {
      return CellRelation::Contains;
    }
    if inside > 0 || cell.contains_point(&self.center()) {
      return CellRelation::Intersects;
    }
    let radius = self.radius_rads();
    let touches_edge =
      (0..4).any(|k| distance_to_edge(&self.center(), &corners[k], &corners[(k + 1) % 4]) <= radius);
    if touches_edge {
      CellRelation::Intersects
    } else {
      CellRelation::Disjoint
    }
  }

  fn contains_point(&self, p: &Vec3d) -> bool {
    Cap::contains_point(self, p)
  }
}
