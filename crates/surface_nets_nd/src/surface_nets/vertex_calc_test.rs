use super::*;
use crate::constants::{configuration_count, corner_count, full_mask};
use crate::edge_table::cube_edges;

/// Deterministic, uneven corner values for a configuration.
fn corner_values(dimension: usize, mask: u64) -> Vec<f64> {
  (0..corner_count(dimension))
    .map(|c| {
      if (mask >> c) & 1 == 1 {
        1.0 + c as f64 * 0.37
      } else {
        -(0.5 + c as f64 * 0.23)
      }
    })
    .collect()
}

fn offset_for(
  dimension: usize,
  values: &[f64],
  placement: VertexPlacement,
  policy: DegenerateEdgePolicy,
) -> (Vec<f64>, u32) {
  let mask = crate::surface_nets::corner_mask::build(values, 0.0);
  let crossings = cube_edges(dimension)
    .into_iter()
    .filter(|edge| edge.crosses(mask));
  let mut offset = vec![0.0; dimension];
  let degenerate = compute_offset(crossings, values, 0.0, placement, policy, &mut offset);
  (offset, degenerate)
}

#[test]
fn test_axis_without_crossings_is_center() {
  for dimension in [2, 3] {
    let edges = cube_edges(dimension);
    for mask in 1..configuration_count(dimension) as u64 {
      if mask == full_mask(dimension) {
        continue;
      }
      let values = corner_values(dimension, mask);

      for placement in [VertexPlacement::Centroid, VertexPlacement::AxisAverage] {
        let (offset, degenerate) =
          offset_for(dimension, &values, placement, DegenerateEdgePolicy::Center);
        assert_eq!(degenerate, 0);

        for axis in 0..dimension {
          let crossed = edges
            .iter()
            .any(|edge| edge.axis as usize == axis && edge.crosses(mask));
          if !crossed {
            assert_eq!(
              offset[axis], CENTER,
              "d={} mask={:#b} axis={} {:?}",
              dimension, mask, axis, placement
            );
          }
        }
      }
    }
  }
}

#[test]
fn test_offsets_inside_cell() {
  for dimension in [2, 3] {
    for mask in 1..full_mask(dimension) {
      let values = corner_values(dimension, mask);
      for placement in [VertexPlacement::Centroid, VertexPlacement::AxisAverage] {
        let (offset, _) = offset_for(dimension, &values, placement, DegenerateEdgePolicy::Center);
        assert!(offset.iter().all(|&o| (0.0..=1.0).contains(&o)));
      }
    }
  }
}

#[test]
fn test_single_corner_cube() {
  // Corner 0 below, every other corner above: three crossings at t = 0.75.
  let values = [-3.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];

  let (centroid, _) = offset_for(
    3,
    &values,
    VertexPlacement::Centroid,
    DegenerateEdgePolicy::Center,
  );
  for o in centroid {
    assert!((o - 0.25).abs() < 1e-15);
  }

  let (average, _) = offset_for(
    3,
    &values,
    VertexPlacement::AxisAverage,
    DegenerateEdgePolicy::Center,
  );
  assert_eq!(average, vec![0.75, 0.75, 0.75]);
}

#[test]
fn test_square_half_split() {
  // Left column below, right column above: two X crossings.
  let values = [-1.0, 1.0, -1.0, 3.0];
  let (offset, _) = offset_for(
    2,
    &values,
    VertexPlacement::AxisAverage,
    DegenerateEdgePolicy::Center,
  );
  assert!((offset[0] - 0.375).abs() < 1e-15);
  assert_eq!(offset[1], CENTER);
}

// Edge [0,1] runs from -inf to +inf; edge [2,3] crosses at 0.25.
const DEGENERATE_SQUARE: [f64; 4] = [f64::NEG_INFINITY, f64::INFINITY, -1.0, 3.0];

#[test]
fn test_degenerate_center() {
  for placement in [VertexPlacement::Centroid, VertexPlacement::AxisAverage] {
    let (offset, degenerate) = offset_for(
      2,
      &DEGENERATE_SQUARE,
      placement,
      DegenerateEdgePolicy::Center,
    );
    assert_eq!(degenerate, 1);
    assert_eq!(offset, vec![0.375, 0.5]);
  }
}

#[test]
fn test_degenerate_skip() {
  for placement in [VertexPlacement::Centroid, VertexPlacement::AxisAverage] {
    let (offset, degenerate) = offset_for(
      2,
      &DEGENERATE_SQUARE,
      placement,
      DegenerateEdgePolicy::Skip,
    );
    assert_eq!(degenerate, 1);
    assert_eq!(offset, vec![0.25, 0.5]);
  }
}

#[test]
fn test_degenerate_skip_only_edge_falls_back_to_center() {
  let values = [f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY];
  let (offset, degenerate) = offset_for(
    2,
    &values,
    VertexPlacement::AxisAverage,
    DegenerateEdgePolicy::Skip,
  );
  assert_eq!(degenerate, 2);
  assert_eq!(offset, vec![0.5, 0.5]);
}

#[test]
fn test_degenerate_propagate() {
  for placement in [VertexPlacement::Centroid, VertexPlacement::AxisAverage] {
    let (offset, degenerate) = offset_for(
      2,
      &DEGENERATE_SQUARE,
      placement,
      DegenerateEdgePolicy::Propagate,
    );
    assert_eq!(degenerate, 1);
    assert!(offset[0].is_nan());
    assert_eq!(offset[1], 0.5);
  }
}

#[test]
fn test_level_shifts_crossing() {
  let values = [0.0, 4.0];
  let edges = cube_edges(1);
  let mut offset = [0.0];
  compute_offset(
    edges,
    &values,
    1.0,
    VertexPlacement::Centroid,
    DegenerateEdgePolicy::Center,
    &mut offset,
  );
  assert_eq!(offset, [0.25]);
}
