// tests/hierarchy_tests.rs

use xs_s2::*;

fn cell_at(lat: f64, lng: f64, level: u8) -> CellId {
  cell_for_point(&LatLng::from_degrees(lat, lng).unwrap(), level).unwrap()
}

#[test]
fn test_face_cells_have_known_ids() {
  // Face f is 0b fff1 followed by zeros.
  let expected = [
    0x1000000000000000u64,
    0x3000000000000000,
    0x5000000000000000,
    0x7000000000000000,
    0x9000000000000000,
    0xb000000000000000,
  ];
  for (face, &id) in expected.iter().enumerate() {
    let cell = CellId::from_face(face as u8).unwrap();
    assert_eq!(cell, CellId(id));
    assert_eq!(cell.level(), 0);
    assert_eq!(cell.hex_token(), format!("{:x}", id >> 60));
  }
  assert_eq!(CellId::from_face(6), Err(S2Error::Domain));
}

#[test]
fn test_face_children_have_known_ids() {
  let face0 = CellId::from_face(0).unwrap();
  let children = face0.children().unwrap();
  let expected = [0x0400000000000000u64, 0x0c00000000000000, 0x1400000000000000, 0x1c00000000000000];
  assert_eq!(children.map(|c| c.id()), expected);
  assert_eq!(children.map(|c| c.hex_token()), ["04", "0c", "14", "1c"].map(String::from));
}

#[test]
fn test_cell_to_parent() {
  let leaf = cell_at(37.7749, -122.4194, 30);
  for level in 0..30 {
    let parent = cell_to_parent(leaf, level).unwrap();
    assert_eq!(parent.level(), level);
    assert!(parent.contains(leaf));
    assert_eq!(parent, cell_at(37.7749, -122.4194, level));
  }
  assert_eq!(cell_to_parent(leaf, 31), Err(S2Error::LevelDomain));
  let mid = cell_at(37.7749, -122.4194, 10);
  assert_eq!(cell_to_parent(mid, 11), Err(S2Error::LevelDomain));
}

#[test]
fn test_cell_to_children_size() {
  let cell = cell_at(48.85, 2.35, 5);
  assert_eq!(cell_to_children_size(cell, 5), Ok(1));
  assert_eq!(cell_to_children_size(cell, 6), Ok(4));
  assert_eq!(cell_to_children_size(cell, 8), Ok(64));
  assert_eq!(cell_to_children_size(cell, 4), Err(S2Error::LevelDomain));
}

#[test]
fn test_cell_to_children_are_sorted_and_tile_parent() {
  let parent = cell_at(-33.86, 151.2, 7);
  let children = cell_to_children(parent, 9).unwrap();
  assert_eq!(children.len(), 16);
  assert!(children.windows(2).all(|w| w[0] < w[1]));
  assert_eq!(children.first().unwrap().range_min(), parent.range_min());
  assert_eq!(children.last().unwrap().range_max(), parent.range_max());
  for child in &children {
    assert_eq!(cell_to_parent(*child, 7), Ok(parent));
  }
}

#[test]
fn test_cell_to_center_child() {
  let parent = cell_at(10.0, 20.0, 6);
  let center = cell_to_center_child(parent, 12).unwrap();
  assert_eq!(center.level(), 12);
  assert!(parent.contains(center));
  let d = great_circle_distance_rads(&center.to_lat_lng(), &parent.to_lat_lng());
  let child_width = great_circle_distance_rads(&center.to_lat_lng(), &cell_vertices(center).unwrap()[0]);
  assert!(d <= 2.0 * child_width, "center child {d} rad away from parent center");
}

#[test]
fn test_child_pos_round_trip() {
  let parent = cell_at(0.5, 0.5, 3);
  let children = cell_to_children(parent, 5).unwrap();
  for (k, child) in children.iter().enumerate() {
    assert_eq!(cell_to_child_pos(*child, 3), Ok(k as u64));
    assert_eq!(child_pos_to_cell(k as u64, parent, 5), Ok(*child));
  }
  assert_eq!(child_pos_to_cell(16, parent, 5), Err(S2Error::Domain));
}

#[test]
fn test_compact_and_uncompact() {
  let parent = cell_at(52.52, 13.4, 8);
  let mut cells = cell_to_children(parent, 10).unwrap();
  let lone = cell_at(-10.0, -60.0, 10);
  cells.push(lone);

  let compacted = compact_cells(&cells).unwrap();
  assert_eq!(compacted.len(), 2);
  assert!(compacted.contains(&parent) && compacted.contains(&lone));

  assert_eq!(uncompact_cells_size(&compacted, 10), Ok(17));
  let mut expanded = uncompact_cells(&compacted, 10).unwrap();
  expanded.sort();
  cells.sort();
  assert_eq!(expanded, cells);
}

#[test]
fn test_cell_union_normalization() {
  let parent = cell_at(1.0, 1.0, 4);
  let mut cells: Vec<CellId> = parent.children().unwrap().to_vec();
  cells.push(cell_to_center_child(parent, 9).unwrap());
  let union = CellUnion::from_cells(cells).unwrap();
  assert_eq!(union.cells(), &[parent]);
  assert!(union.contains_cell(cell_to_center_child(parent, 20).unwrap()));
  assert_eq!(CellUnion::from_cells(vec![CELL_NONE]), Err(S2Error::CellInvalid));
}
