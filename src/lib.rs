#![deny(clippy::all)] // Enforce clippy lints
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)] // Often a matter of taste
#![allow(clippy::missing_errors_doc)] // Error cases are listed on the public entry points
#![allow(clippy::cast_possible_truncation)] // Levels, faces and edge ids are small
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unreadable_literal)] // Bit masks read better unseparated
#![allow(clippy::similar_names)] // Can be common in math-heavy code
#![allow(clippy::many_single_char_names)] // a, b, c, d, p in predicates

//! `xs-s2` is a cube-face quadtree grid on the unit sphere, in the style of
//! Google's S2 library.
//!
//! It covers polygons with a bounded number of cells, indexes many polygons
//! for fast point-in-polygon lookups, and answers containment queries with
//! exact orientation predicates.
//!
//! ```
//! use xs_s2::{build_polygon, cover_polygon, CovererOptions, IndexOptions, LatLng, ShapeIndex};
//!
//! let polygon = build_polygon(&[[2.0, 48.0], [2.1, 48.0], [2.1, 48.1], [2.0, 48.1]]);
//! let covering = cover_polygon(&polygon, CovererOptions::new(4, 12, 8)).unwrap();
//! assert!(covering.len() <= 8);
//!
//! let index = ShapeIndex::build(vec![polygon], IndexOptions::default()).unwrap();
//! let point = LatLng::from_degrees(48.05, 2.05).unwrap();
//! assert_eq!(index.containing_shape_ids(&point).unwrap(), vec![0]);
//! ```

// Declare modules
pub mod cap;
pub mod cell;
pub mod cell_id;
pub mod cell_union;
pub mod config;
pub mod constants;
pub mod coords;
pub mod hierarchy;
pub mod indexing;
pub mod latlng;
pub mod math;
pub mod polygon;
pub mod polygon_builder;
pub mod records;
pub mod regions;
pub mod shape_index;
pub mod types;

// Re-export key public types and functions for easier use
pub use cap::Cap;
pub use cell::Cell;
pub use cell_union::CellUnion;
pub use config::{CovererOptions, IndexOptions};
pub use latlng::{degs_to_rads, great_circle_distance_km, great_circle_distance_m, great_circle_distance_rads, rads_to_degs};
pub use polygon::{contains, Loop, Polygon, ValidationError};
pub use polygon_builder::build_polygon;
pub use records::{load_records, GeometryKind, GeometryRecord, LoadReport, PointRole, RecordPoint};
pub use types::{CellId, CellRelation, LatLng, S2Error, Vec3d, CELL_NONE};

pub use hierarchy::{
  cell_to_center_child, cell_to_child_pos, cell_to_children, cell_to_children_size, cell_to_parent, child_pos_to_cell,
  compact_cells, uncompact_cells, uncompact_cells_size,
};
pub use indexing::{cell_center, cell_corners_degrees, cell_for_point, cell_vertices, cover_point, PointCover};
pub use regions::{cover_polygon, CoveredCell, Covering, Region, RegionCoverer};
pub use shape_index::{ClippedShape, ContainsPointQuery, IndexBuildStats, ShapeId, ShapeIndex, ShapeIndexBuilder};
