//! Vertex offset calculation for surface nets.
//!
//! The offset of a cell vertex is its position relative to the cell's corner
//! 0, in cell units. Each axis is resolved independently from the crossing
//! edges of the cell (see [`VertexPlacement`]). An axis that no crossing edge
//! runs along always lands on exactly 0.5: the crossing set is then mirror
//! symmetric across the cell's midplane on that axis.

use smallvec::SmallVec;

use super::axis::crossing;
use crate::constants::MAX_DIMENSION;
use crate::edge_table::CubeEdge;
use crate::types::{DegenerateEdgePolicy, VertexPlacement};

/// Offset assigned to axes with nothing to average.
pub const CENTER: f64 = 0.5;

/// Compute the vertex offset of one cell into `offset` (one value per axis).
///
/// `values[c]` is the sample at corner `c`; `crossings` are the crossing
/// edges of the cell's configuration. Returns the number of degenerate edges
/// encountered.
pub fn compute_offset<I>(
  crossings: I,
  values: &[f64],
  level: f64,
  placement: VertexPlacement,
  policy: DegenerateEdgePolicy,
  offset: &mut [f64],
) -> u32
where
  I: IntoIterator<Item = CubeEdge>,
{
  let dimension = offset.len();
  let mut sum: SmallVec<[f64; MAX_DIMENSION]> = SmallVec::from_elem(0.0, dimension);
  let mut count: SmallVec<[u32; MAX_DIMENSION]> = SmallVec::from_elem(0, dimension);
  let mut degenerate = 0u32;

  for edge in crossings {
    let axis = edge.axis as usize;
    let low = values[edge.low as usize];
    let high = values[edge.high as usize];

    let t = match crossing(low, high, level) {
      Ok(t) => Some(t),
      Err(_) => {
        degenerate += 1;
        tracing::trace!(low, high, axis, ?policy, "degenerate crossing edge");
        match policy {
          DegenerateEdgePolicy::Center => Some(CENTER),
          DegenerateEdgePolicy::Skip => None,
          DegenerateEdgePolicy::Propagate => Some(f64::NAN),
        }
      }
    };

    if let Some(t) = t {
      sum[axis] += t;
      count[axis] += 1;
    }

    if placement == VertexPlacement::Centroid {
      for k in (0..dimension).filter(|&k| k != axis) {
        sum[k] += edge.side(k) as f64;
        count[k] += 1;
      }
    }
  }

  for ((out, &s), &n) in offset.iter_mut().zip(&sum).zip(&count) {
    *out = if n == 0 { CENTER } else { s / n as f64 };
  }

  degenerate
}

#[cfg(test)]
#[path = "vertex_calc_test.rs"]
mod vertex_calc_test;
