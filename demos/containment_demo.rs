// demos/containment_demo.rs

use xs_s2::{load_records, GeometryKind, GeometryRecord, IndexOptions, PointRole, S2Error, ShapeIndex};

fn main() -> Result<(), S2Error> {
  println!("--- Point Containment Example ---");

  // 1. Records as they would come out of a feature-collection parser
  let records = vec![
    GeometryRecord::Polygon {
      rings: vec![vec![[5.9, 45.8], [10.5, 45.8], [10.5, 47.8], [5.9, 47.8], [5.9, 45.8]]],
    },
    GeometryRecord::Polygon {
      rings: vec![vec![[8.4, 47.3], [8.6, 47.3], [8.6, 47.45], [8.4, 47.45]]],
    },
    GeometryRecord::Polygon {
      rings: vec![vec![[2.2, 48.8], [2.45, 48.8], [2.45, 48.9], [2.2, 48.9]]],
    },
    GeometryRecord::Point {
      coord: [8.54, 47.37],
      role: PointRole::Inner,
    },
    GeometryRecord::Point {
      coord: [-3.7, 40.4],
      role: PointRole::Outer,
    },
    GeometryRecord::Unsupported {
      kind: GeometryKind::MultiPolygon,
    },
  ];

  // 2. Build polygons and sort points by role
  let report = load_records(records);
  println!(
    "Loaded {} polygons ({} invalid), skipped {} records",
    report.polygons.len(),
    report.invalid_polygons,
    report.skipped.len()
  );

  // 3. Index them
  let index = ShapeIndex::build(report.polygons.clone(), IndexOptions::default())?;
  println!("Index holds {} cells", index.num_cells());

  // 4. Query every reference point
  for (label, points) in [("inner", &report.inner_points), ("outer", &report.outer_points)] {
    for point in points {
      let shapes = index.containing_shapes(&point.latlng)?;
      println!(
        "{} point ({:.4}, {:.4}) is inside {} polygon(s)",
        label,
        point.latlng.lat_degrees(),
        point.latlng.lng_degrees(),
        shapes.len()
      );
      for polygon in shapes {
        println!("  ring: {:?}", polygon.to_lng_lat_rings()[0]);
      }
    }
  }

  Ok(())
}
