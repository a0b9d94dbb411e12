use super::*;
use crate::constants::{corner_count, full_mask};

fn direct(dimension: usize, mask: u64) -> Vec<CubeEdge> {
  cube_edges(dimension)
    .into_iter()
    .filter(|edge| edge.crosses(mask))
    .collect()
}

#[test]
fn test_unsupported_dimensions() {
  assert_eq!(
    CaseTable::build(0).unwrap_err(),
    SurfaceNetsError::UnsupportedDimension(0)
  );
  assert_eq!(
    CaseTable::build(7).unwrap_err(),
    SurfaceNetsError::UnsupportedDimension(7)
  );
}

#[test]
fn test_tabulation_threshold() {
  for dimension in 1..=TABLE_MAX_DIMENSION {
    assert!(CaseTable::build(dimension).unwrap().is_tabulated());
  }
  assert!(!CaseTable::build(5).unwrap().is_tabulated());
  assert!(!CaseTable::build(6).unwrap().is_tabulated());
}

#[test]
fn test_empty_and_full_cases() {
  for dimension in 2..=4 {
    let table = CaseTable::build(dimension).unwrap();
    let full = full_mask(dimension);

    assert!(table.is_empty_case(0));
    assert!(table.is_empty_case(full));
    assert_eq!(table.entry(0), None);
    assert_eq!(table.entry(full), None);
    assert_eq!(table.crossings(0).count(), 0);
    assert_eq!(table.crossings(full).count(), 0);

    let values = vec![1.0; corner_count(dimension)];
    let mut offset = vec![-1.0; dimension];
    let placement = VertexPlacement::Centroid;
    let policy = DegenerateEdgePolicy::Center;
    assert_eq!(table.vertex_offset(0, &values, 0.0, placement, policy, &mut offset), None);
    assert_eq!(table.vertex_offset(full, &values, 0.0, placement, policy, &mut offset), None);
    assert!(offset.iter().all(|&o| o == -1.0));
  }
}

#[test]
fn test_every_active_case_has_crossings() {
  for dimension in 2..=4 {
    let table = CaseTable::build(dimension).unwrap();
    for mask in 1..full_mask(dimension) {
      assert!(table.entry(mask).is_some(), "d={} mask={:#x}", dimension, mask);
      assert!(table.crossings(mask).next().is_some());
    }
  }
}

#[test]
fn test_table_matches_direct_enumeration() {
  for dimension in 2..=4 {
    let table = CaseTable::build(dimension).unwrap();
    for mask in 0..=full_mask(dimension) {
      let tabulated: Vec<_> = table.crossings(mask).collect();
      assert_eq!(tabulated, direct(dimension, mask), "d={} mask={:#x}", dimension, mask);
    }
  }
}

#[test]
fn test_untabulated_crossings_match_direct() {
  let table = CaseTable::build(5).unwrap();
  for mask in [1u64, 0xdead_beef, 0x8000_0000, 0x5555_5555, 0xffff_fffe] {
    let crossings: Vec<_> = table.crossings(mask).collect();
    assert_eq!(crossings, direct(5, mask));
  }

  // Full 6-cube mask covers all 64 corners.
  let table = CaseTable::build(6).unwrap();
  assert_eq!(table.crossings(u64::MAX).count(), 0);
  assert_eq!(table.crossings(1).count(), 6);
}

#[test]
fn test_crossings_are_axis_major() {
  let table = CaseTable::build(3).unwrap();
  for mask in 1..255u64 {
    let axes: Vec<u8> = table.crossings(mask).map(|edge| edge.axis).collect();
    assert!(axes.windows(2).all(|w| w[0] <= w[1]));
  }
}

#[test]
fn test_square_diagonal_case() {
  // Corners 0 and 3 above: all four edges cross.
  let table = CaseTable::build(2).unwrap();
  assert_eq!(table.entry(0b1001), Some(0b1111));

  // Corner 1 above: edges [0,1] (X) and [1,3] (Y).
  assert_eq!(table.entry(0b0010), Some(0b1001));
}

#[test]
fn test_vertex_offset_matches_across_paths() {
  // The 4-cube through its table and through direct enumeration agree.
  let table = CaseTable::build(4).unwrap();
  let placement = VertexPlacement::Centroid;
  let policy = DegenerateEdgePolicy::Center;

  for mask in (1..full_mask(4)).step_by(97) {
    let values: Vec<f64> = (0..16)
      .map(|c| if (mask >> c) & 1 == 1 { 1.0 + c as f64 } else { -2.0 - c as f64 })
      .collect();

    let mut tabulated = [0.0; 4];
    table.vertex_offset(mask, &values, 0.0, placement, policy, &mut tabulated);

    let mut enumerated = [0.0; 4];
    compute_offset(direct(4, mask), &values, 0.0, placement, policy, &mut enumerated);

    assert_eq!(tabulated, enumerated);
  }
}
