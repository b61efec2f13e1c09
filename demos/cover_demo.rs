// demos/cover_demo.rs

use xs_s2::{build_polygon, cover_point, cover_polygon, CovererOptions, LatLng, S2Error};

fn main() -> Result<(), S2Error> {
  println!("--- Polygon Covering Example ---");

  // 1. A polygon around central Paris, as [lng, lat] pairs
  let polygon = build_polygon(&[[2.25, 48.82], [2.42, 48.82], [2.42, 48.9], [2.25, 48.9], [2.25, 48.82]]);
  println!("Polygon area: {:.3e} sr", polygon.area());

  // 2. Cover it at a few budgets
  for max_cells in [4, 16, 64] {
    let covering = cover_polygon(&polygon, CovererOptions::new(8, 16, max_cells))?;
    println!("max_cells {}: {} cells", max_cells, covering.len());
    for cell in covering.cells.iter().take(4) {
      println!("  {} (level {}) corners {:?}", cell.token, cell.cell.level(), cell.corners);
    }
  }

  // 3. The cell holding a single point
  let point = LatLng::from_degrees(48.8584, 2.2945)?;
  for level in [5, 10, 15] {
    let cover = cover_point(&point, level)?;
    println!("level {}: {} (hex {})", level, cover.token, cover.cell.hex_token());
  }

  Ok(())
}
