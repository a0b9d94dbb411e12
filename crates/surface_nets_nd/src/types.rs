//! Core data types for n-dimensional surface nets.

use smallvec::SmallVec;

use crate::constants::DEFAULT_LEVEL;
use crate::field::Axes;

/// How a cell's vertex offset is derived from its crossing edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VertexPlacement {
  /// Centroid of every crossing point in the cell.
  ///
  /// Along axis k, crossings on axis-k edges contribute their interpolated
  /// position and crossings on other edges contribute the side of the cell
  /// they sit on.
  #[default]
  Centroid,

  /// Per-axis average of the interpolated positions of the crossing edges on
  /// that axis only. Axes without crossing edges sit at the cell center.
  AxisAverage,
}

/// What a crossing edge with no finite crossing position contributes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DegenerateEdgePolicy {
  /// Treat the crossing as the edge midpoint.
  #[default]
  Center,

  /// Leave the crossing position out of its axis average. An axis left
  /// with nothing to average sits at 0.5.
  Skip,

  /// Let the non-finite arithmetic through: the edge's axis becomes NaN.
  Propagate,
}

/// Configuration for mesh extraction.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshConfig {
  /// Isovalue. Samples strictly above it are "outside".
  pub level: f64,

  /// Vertex placement rule.
  pub placement: VertexPlacement,

  /// Handling of degenerate crossing edges.
  pub degenerate_policy: DegenerateEdgePolicy,

  /// Split traversal across the rayon pool for large fields.
  pub parallel: bool,
}

impl Default for MeshConfig {
  fn default() -> Self {
    Self {
      level: DEFAULT_LEVEL,
      placement: VertexPlacement::default(),
      degenerate_policy: DegenerateEdgePolicy::default(),
      parallel: true,
    }
  }
}

impl MeshConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_level(mut self, level: f64) -> Self {
    self.level = level;
    self
  }

  pub fn with_placement(mut self, placement: VertexPlacement) -> Self {
    self.placement = placement;
    self
  }

  pub fn with_degenerate_policy(mut self, policy: DegenerateEdgePolicy) -> Self {
    self.degenerate_policy = policy;
    self
  }

  pub fn with_parallel(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }

  /// Level actually used for extraction: non-finite requests fall back to
  /// [`DEFAULT_LEVEL`].
  #[inline]
  pub fn effective_level(&self) -> f64 {
    if self.level.is_finite() {
      self.level
    } else {
      DEFAULT_LEVEL
    }
  }
}

/// Axis-aligned bounding box in d dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Bounds {
  pub min: Axes<f64>,
  pub max: Axes<f64>,
}

impl Bounds {
  /// Create bounds with inverted extents (ready for encapsulation).
  pub fn empty(dimension: usize) -> Self {
    Self {
      min: SmallVec::from_elem(f64::INFINITY, dimension),
      max: SmallVec::from_elem(f64::NEG_INFINITY, dimension),
    }
  }

  /// Expand bounds to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: &[f64]) {
    for ((min, max), &p) in self.min.iter_mut().zip(self.max.iter_mut()).zip(point) {
      *min = min.min(p);
      *max = max.max(p);
    }
  }

  /// Check if bounds are valid (min <= max on all axes).
  ///
  /// Zero-dimensional bounds are never valid.
  pub fn is_valid(&self) -> bool {
    !self.min.is_empty() && self.min.iter().zip(&self.max).all(|(lo, hi)| lo <= hi)
  }

  pub fn dimension(&self) -> usize {
    self.min.len()
  }
}

impl Default for Bounds {
  fn default() -> Self {
    Self::empty(0)
  }
}

/// Counters collected during one extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractionStats {
  /// Cells that produced a vertex.
  pub active_cells: u64,
  /// Crossing grid edges stitched into facets.
  pub facets: u64,
  /// Crossing edges without a finite crossing position.
  pub degenerate_edges: u64,
  /// The compiled case came from the cache.
  pub cache_hit: bool,
  /// Wall time of the whole extraction.
  pub elapsed_us: u64,
}

/// Mesh extraction result.
#[derive(Clone, Debug, Default)]
pub struct MeshOutput {
  /// Number of coordinates per position.
  pub dimension: usize,

  /// Vertex positions, `dimension` values each, in logical axis order.
  pub positions: Vec<f64>,

  /// Cell indices, [`Self::cell_arity`] values per cell.
  pub cells: Vec<u32>,

  /// Bounding box encompassing all vertices.
  pub bounds: Bounds,

  pub stats: ExtractionStats,
}

impl MeshOutput {
  pub fn new(dimension: usize) -> Self {
    Self {
      dimension,
      bounds: Bounds::empty(dimension),
      ..Self::default()
    }
  }

  /// Vertices per cell: a single index for curves on a line, otherwise one
  /// simplex of `dimension` vertices.
  pub fn cell_arity(&self) -> usize {
    self.dimension.max(1)
  }

  pub fn vertex_count(&self) -> usize {
    if self.dimension == 0 {
      0
    } else {
      self.positions.len() / self.dimension
    }
  }

  pub fn cell_count(&self) -> usize {
    self.cells.len() / self.cell_arity()
  }

  /// Returns true if no geometry was generated.
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  /// Coordinates of vertex `index`.
  #[inline]
  pub fn position(&self, index: usize) -> &[f64] {
    let start = index * self.dimension;
    &self.positions[start..start + self.dimension]
  }

  /// Vertex indices of cell `index`.
  #[inline]
  pub fn cell(&self, index: usize) -> &[u32] {
    let arity = self.cell_arity();
    &self.cells[index * arity..(index + 1) * arity]
  }

  pub fn iter_positions(&self) -> impl Iterator<Item = &[f64]> + '_ {
    self.positions.chunks_exact(self.dimension.max(1))
  }

  pub fn iter_cells(&self) -> impl Iterator<Item = &[u32]> + '_ {
    self.cells.chunks_exact(self.cell_arity())
  }

  /// Clear all buffers, preserving capacity.
  pub fn clear(&mut self) {
    self.positions.clear();
    self.cells.clear();
    self.bounds = Bounds::empty(self.dimension);
    self.stats = ExtractionStats::default();
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
