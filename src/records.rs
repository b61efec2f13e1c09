// src/records.rs

//! Turns already-parsed geometry records into polygons and reference points.

use crate::polygon::Polygon;
use crate::polygon_builder::build_polygon;
use crate::types::{LatLng, S2Error};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a point record is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PointRole {
  /// A point expected to fall inside some polygon.
  Inner,
  /// A point expected to fall outside every polygon.
  Outer,
  Plain,
}

/// Geometry kinds the loader does not handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GeometryKind {
  MultiPoint,
  LineString,
  MultiLineString,
  MultiPolygon,
  GeometryCollection,
  Other,
}

impl fmt::Display for GeometryKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      GeometryKind::MultiPoint => "MultiPoint",
      GeometryKind::LineString => "LineString",
      GeometryKind::MultiLineString => "MultiLineString",
      GeometryKind::MultiPolygon => "MultiPolygon",
      GeometryKind::GeometryCollection => "GeometryCollection",
      GeometryKind::Other => "Other",
    };
    f.write_str(name)
  }
}

/// One parsed geometry. Coordinates are `[lng, lat]` degrees.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GeometryRecord {
  /// The first ring is the outer boundary; later rings are holes.
  Polygon { rings: Vec<Vec<[f64; 2]>> },
  Point { coord: [f64; 2], role: PointRole },
  Unsupported { kind: GeometryKind },
}

/// A reference point taken from a point record.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RecordPoint {
  /// Position of the record in the input.
  pub record: usize,
  pub latlng: LatLng,
}

/// Everything [`load_records`] produced or left behind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
  pub polygons: Vec<Polygon>,
  pub inner_points: Vec<RecordPoint>,
  pub outer_points: Vec<RecordPoint>,
  pub plain_points: Vec<RecordPoint>,
  /// Hole rings that were ignored, summed over all polygon records.
  pub dropped_rings: usize,
  /// Records that produced nothing, with their position and kind.
  pub skipped: Vec<(usize, GeometryKind)>,
  /// Point records whose coordinate is not a valid lat/lng.
  pub invalid_points: Vec<(usize, S2Error)>,
  /// Polygons carrying a validation error (still included in `polygons`).
  pub invalid_polygons: usize,
}

impl LoadReport {
  /// The first inner point, which is the usual query point.
  #[must_use]
  pub fn first_inner_point(&self) -> Option<LatLng> {
    self.inner_points.first().map(|p| p.latlng)
  }
}

/// Builds polygons from polygon records and sorts point records by role.
///
/// Polygon records without any ring are reported as skipped with kind
/// [`GeometryKind::Other`].
pub fn load_records<I>(records: I) -> LoadReport
where
  I: IntoIterator<Item = GeometryRecord>,
{
  let mut report = LoadReport::default();
  for (index, record) in records.into_iter().enumerate() {
    match record {
      GeometryRecord::Polygon { rings } => {
        let Some((outer, holes)) = rings.split_first() else {
          report.skipped.push((index, GeometryKind::Other));
          continue;
        };
        if !holes.is_empty() {
          tracing::debug!(record = index, holes = holes.len(), "dropping polygon holes");
          report.dropped_rings += holes.len();
        }
        let polygon = build_polygon(outer);
        if !polygon.is_valid() {
          report.invalid_polygons += 1;
        }
        report.polygons.push(polygon);
      }
      GeometryRecord::Point { coord: [lng, lat], role } => {
        let latlng = match LatLng::from_degrees(lat, lng) {
          Ok(latlng) => latlng,
          Err(err) => {
            tracing::warn!(record = index, lat, lng, "point record has an invalid coordinate");
            report.invalid_points.push((index, err));
            continue;
          }
        };
        let point = RecordPoint { record: index, latlng };
        match role {
          PointRole::Inner => report.inner_points.push(point),
          PointRole::Outer => report.outer_points.push(point),
          PointRole::Plain => report.plain_points.push(point),
        }
      }
      GeometryRecord::Unsupported { kind } => {
        tracing::debug!(record = index, %kind, "skipping unsupported geometry");
        report.skipped.push((index, kind));
      }
    }
  }
  tracing::info!(
    polygons = report.polygons.len(),
    invalid_polygons = report.invalid_polygons,
    points = report.inner_points.len() + report.outer_points.len() + report.plain_points.len(),
    skipped = report.skipped.len(),
    "records loaded"
  );
  report
}
