//! Edge enumeration for the d-dimensional unit hypercube.
//!
//! Corner `c` sits at the unit-cube position whose k-th coordinate is bit k
//! of `c`. An edge joins two corners that differ in exactly one bit; that bit
//! is the edge's axis.
//!
//! # Square (d = 2)
//!
//! ```text
//!   2──────3        Corners (binary YX):
//!   │      │          0=(0,0)  1=(1,0)  2=(0,1)  3=(1,1)
//!   │      │
//!   0──────1        Edges (axis-major):
//!                     0: [0,1] X   1: [2,3] X   2: [0,2] Y   3: [1,3] Y
//! ```
//!
//! # Cube (d = 3)
//!
//! ```text
//!       6──────7         X-axis edges: [0,1] [2,3] [4,5] [6,7]
//!      /│     /│         Y-axis edges: [0,2] [1,3] [4,6] [5,7]
//!     4─┼────5 │         Z-axis edges: [0,4] [1,5] [2,6] [3,7]
//!     │ 2────┼─3
//!     │/     │/
//!     0──────1
//! ```
//!
//! Edges are ordered axis-major and, within an axis, by ascending low corner.
//! A configuration mask maps to the set of edges whose endpoints disagree in
//! phase; for `d <= TABLE_MAX_DIMENSION` that set fits in a `u64` edge mask
//! using the same ordering.

use crate::constants::{corner_count, edge_count, TABLE_MAX_DIMENSION};

/// One edge of the unit hypercube.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CubeEdge {
  /// Axis the edge runs along.
  pub axis: u8,
  /// Corner with bit `axis` clear.
  pub low: u8,
  /// Corner with bit `axis` set.
  pub high: u8,
}

impl CubeEdge {
  /// Side (0 or 1) the edge sits on along `axis`.
  ///
  /// Meaningless for the edge's own axis, which it spans.
  #[inline(always)]
  pub fn side(&self, axis: usize) -> u8 {
    (self.low >> axis) & 1
  }

  /// True if the endpoint phases differ under `mask`.
  #[inline(always)]
  pub fn crosses(&self, mask: u64) -> bool {
    ((mask >> self.low) ^ (mask >> self.high)) & 1 == 1
  }
}

/// All edges of the d-cube in axis-major order.
pub fn cube_edges(dimension: usize) -> Vec<CubeEdge> {
  let corners = corner_count(dimension);
  let mut edges = Vec::with_capacity(edge_count(dimension));

  for axis in 0..dimension {
    for low in 0..corners {
      if (low >> axis) & 1 == 1 {
        continue;
      }
      edges.push(CubeEdge {
        axis: axis as u8,
        low: low as u8,
        high: (low | (1 << axis)) as u8,
      });
    }
  }

  edges
}

/// Edge mask for a configuration: bit i is set if `edges[i]` crosses.
///
/// `edges` must come from [`cube_edges`] for a dimension no larger than
/// `TABLE_MAX_DIMENSION`.
pub fn edge_mask(edges: &[CubeEdge], mask: u64) -> u64 {
  debug_assert!(edges.len() <= edge_count(TABLE_MAX_DIMENSION));

  edges
    .iter()
    .enumerate()
    .filter(|(_, edge)| edge.crosses(mask))
    .fold(0u64, |acc, (i, _)| acc | (1 << i))
}

#[cfg(test)]
#[path = "edge_table_test.rs"]
mod edge_table_test;
