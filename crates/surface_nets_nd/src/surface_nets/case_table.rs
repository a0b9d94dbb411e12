//! Per-dimension case tables.
//!
//! A case table maps every configuration mask of the d-cube to the ordered
//! list of edges whose endpoints disagree in phase. Up to
//! [`TABLE_MAX_DIMENSION`] the full mapping is precomputed as one edge mask
//! per configuration (65 536 entries for d = 4). Beyond that the table is
//! too large to enumerate, so the crossing edges are derived from the mask
//! on demand. Both paths yield the same edges in the same order and feed the
//! same vertex evaluation.

use super::corner_mask::is_active;
use super::vertex_calc::compute_offset;
use crate::constants::{configuration_count, MAX_DIMENSION, TABLE_MAX_DIMENSION};
use crate::edge_table::{cube_edges, edge_mask, CubeEdge};
use crate::error::{Result, SurfaceNetsError};
use crate::types::{DegenerateEdgePolicy, VertexPlacement};

/// Crossing-edge lookup for one dimension.
#[derive(Clone, Debug)]
pub struct CaseTable {
  dimension: usize,
  edges: Vec<CubeEdge>,
  entries: Option<Vec<u64>>,
}

impl CaseTable {
  /// Build the table for `dimension`, tabulating every configuration when
  /// the dimension allows it.
  pub fn build(dimension: usize) -> Result<Self> {
    if dimension == 0 || dimension > MAX_DIMENSION {
      return Err(SurfaceNetsError::UnsupportedDimension(dimension));
    }
    Ok(Self::tabulate(dimension))
  }

  /// [`Self::build`] for a dimension already known to be supported.
  pub(crate) fn tabulate(dimension: usize) -> Self {
    let edges = cube_edges(dimension);
    let entries = (dimension <= TABLE_MAX_DIMENSION).then(|| {
      (0..configuration_count(dimension) as u64)
        .map(|mask| {
          if is_active(mask, dimension) {
            edge_mask(&edges, mask)
          } else {
            0
          }
        })
        .collect::<Vec<_>>()
    });

    tracing::debug!(
      dimension,
      edges = edges.len(),
      entries = entries.as_ref().map_or(0, Vec::len),
      "built case table"
    );

    Self {
      dimension,
      edges,
      entries,
    }
  }

  pub fn dimension(&self) -> usize {
    self.dimension
  }

  /// All edges of the d-cube in axis-major order.
  pub fn edges(&self) -> &[CubeEdge] {
    &self.edges
  }

  /// True if every configuration was precomputed.
  pub fn is_tabulated(&self) -> bool {
    self.entries.is_some()
  }

  /// True for the empty and full configurations, which emit nothing.
  #[inline(always)]
  pub fn is_empty_case(&self, mask: u64) -> bool {
    !is_active(mask, self.dimension)
  }

  /// Edge mask of a configuration, `None` for the empty and full ones.
  ///
  /// Only available for tabulated dimensions.
  pub fn entry(&self, mask: u64) -> Option<u64> {
    let entries = self.entries.as_ref()?;
    let bits = *entries.get(mask as usize)?;
    (bits != 0).then_some(bits)
  }

  /// Crossing edges of a configuration in axis-major order.
  #[inline]
  pub fn crossings(&self, mask: u64) -> Crossings<'_> {
    match &self.entries {
      Some(entries) => Crossings::Table {
        edges: &self.edges,
        bits: entries[mask as usize],
      },
      None => Crossings::Direct {
        edges: self.edges.iter(),
        mask,
      },
    }
  }

  /// Evaluate the vertex offset of a configuration into `offset`.
  ///
  /// Returns `None` for the empty and full configurations (leaving `offset`
  /// untouched), otherwise the number of degenerate crossing edges.
  pub fn vertex_offset(
    &self,
    mask: u64,
    values: &[f64],
    level: f64,
    placement: VertexPlacement,
    policy: DegenerateEdgePolicy,
    offset: &mut [f64],
  ) -> Option<u32> {
    if self.is_empty_case(mask) {
      return None;
    }
    Some(compute_offset(
      self.crossings(mask),
      values,
      level,
      placement,
      policy,
      offset,
    ))
  }
}

/// Iterator over the crossing edges of one configuration.
#[derive(Clone, Debug)]
pub enum Crossings<'a> {
  /// Walk the set bits of a precomputed edge mask.
  Table { edges: &'a [CubeEdge], bits: u64 },
  /// Test every edge of the cube against the configuration mask.
  Direct {
    edges: std::slice::Iter<'a, CubeEdge>,
    mask: u64,
  },
}

impl Iterator for Crossings<'_> {
  type Item = CubeEdge;

  #[inline]
  fn next(&mut self) -> Option<CubeEdge> {
    match self {
      Crossings::Table { edges, bits } => {
        if *bits == 0 {
          return None;
        }
        let index = bits.trailing_zeros() as usize;
        *bits &= *bits - 1;
        Some(edges[index])
      }
      Crossings::Direct { edges, mask } => edges.find(|edge| edge.crosses(*mask)).copied(),
    }
  }
}

#[cfg(test)]
#[path = "case_table_test.rs"]
mod case_table_test;
