// src/indexing/mod.rs

pub mod from_cell;
pub mod to_cell;

pub use from_cell::{cell_center, cell_corners_degrees, cell_vertices};
pub use to_cell::{cell_for_point, cover_point, PointCover};
