//! Grid traversal and mesh assembly.
//!
//! The assembler walks a field in two passes, each in memory order (fastest
//! axis innermost) and each split into slabs along the slowest axis:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │ PASS 1: Vertices                                              │
//! │   For every cell (2^d corner samples):                        │
//! │     classify corners → configuration mask                     │
//! │     visitor.vertex(origin, values, mask) → maybe one vertex   │
//! │   Slabs merged in order; cell → vertex index grid filled      │
//! └───────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌───────────────────────────────────────────────────────────────┐
//! │ PASS 2: Facets                                                │
//! │   For every grid edge (x, x + e_k) whose endpoints differ     │
//! │   in phase and whose 2^(d-1) surrounding cells exist:         │
//! │     gather the surrounding cells' vertices                    │
//! │     visitor.cell(facet, flag) → oriented simplices            │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Surrounding cell `b` of an edge on axis k has origin
//! `x - Σ (1 - bit_i(b)) e_{j_i}`, where `j_i` is the i-th axis other than k.
//! Slab outputs are concatenated in slab order, so the result does not depend
//! on how many slabs ran or on which threads.

use std::ops::Range;

use rayon::prelude::*;
use smallvec::SmallVec;

use crate::constants::{corner_count, PARALLEL_MIN_CELLS};
use crate::error::{Result, SurfaceNetsError};
use crate::field::{Axes, Sample, ScalarField};
use crate::surface_nets::corner_mask;

/// Marks a cell without a vertex in the index grid.
///
/// Vertex indices are `u32`, so a field may hold at most `u32::MAX` cells;
/// the largest index is then `u32::MAX - 1`.
const NO_VERTEX: u32 = u32::MAX;

/// Geometry accumulated by a [`ContourVisitor`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffers {
  pub positions: Vec<f64>,
  pub cells: Vec<u32>,
  /// Degenerate crossing edges met while placing vertices.
  pub degenerate_edges: u64,
}

/// Callbacks driving contour extraction.
pub trait ContourVisitor: Sync {
  /// Phase of a sample: `true` when it lies above the isolevel.
  fn phase(&self, value: f64) -> bool;

  /// Place the vertex of the cell at `origin`.
  ///
  /// `values[c]` is the sample at corner `c` and `mask` the corner phases.
  /// Appends one point to `out.positions` and returns `true` when the
  /// configuration straddles the level.
  fn vertex(&self, origin: &[usize], values: &[f64], mask: u64, out: &mut MeshBuffers) -> bool;

  /// Append the oriented simplices of one facet to `out.cells`.
  fn cell(&self, facet: &[u32], forward: bool, out: &mut MeshBuffers);
}

/// Orientation flag of the facet dual to a crossing edge on `axis`.
///
/// Facets face from the below-level side towards the above-level side.
#[inline(always)]
pub fn facet_flag(axis: usize, low_phase: bool) -> bool {
  (!low_phase) == (axis % 2 == 0)
}

/// Output of one traversal.
#[derive(Clone, Debug, Default)]
pub struct Assembled {
  pub buffers: MeshBuffers,
  pub active_cells: u64,
  pub facets: u64,
}

/// Walks a field and collects the geometry produced by a visitor.
pub struct MeshAssembler<'f, 'a, T> {
  field: &'f ScalarField<'a, T>,
  order: Axes<u8>,
  parallel: bool,
}

impl<'f, 'a, T: Sample> MeshAssembler<'f, 'a, T> {
  /// `order` lists the axes from fastest to slowest.
  pub fn new(field: &'f ScalarField<'a, T>, order: &[u8]) -> Self {
    debug_assert_eq!(order.len(), field.dimension());
    Self {
      field,
      order: order.iter().copied().collect(),
      parallel: false,
    }
  }

  /// Allow splitting large fields across the rayon pool.
  pub fn parallel(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }

  /// Fails with [`SurfaceNetsError::TooManyCells`] when the cells cannot all
  /// be given `u32` vertex indices.
  pub fn assemble<V: ContourVisitor>(&self, visitor: &V) -> Result<Assembled> {
    let dimension = self.field.dimension();
    let shape = self.field.shape();
    if dimension == 0 || shape.iter().any(|&extent| extent < 2) {
      return Ok(Assembled::default());
    }

    let cell_shape: Axes<usize> = shape.iter().map(|&extent| extent - 1).collect();
    let cell_strides = row_major_strides(&cell_shape);
    let cell_count = cell_shape
      .iter()
      .try_fold(1usize, |count, &extent| count.checked_mul(extent))
      .filter(|&count| count <= NO_VERTEX as usize)
      .ok_or_else(|| {
        let cells = cell_shape
          .iter()
          .fold(1usize, |count, &extent| count.saturating_mul(extent));
        SurfaceNetsError::TooManyCells(cells)
      })?;
    let parallel = self.parallel && cell_count >= PARALLEL_MIN_CELLS;

    let mut assembled = Assembled::default();
    let grid = {
      let _span = tracing::info_span!("surface_nets::vertices", cell_count, parallel).entered();
      self.place_vertices(visitor, &cell_shape, &cell_strides, parallel, &mut assembled)
    };
    {
      let _span = tracing::info_span!("surface_nets::facets", parallel).entered();
      self.stitch_facets(visitor, &grid, &cell_strides, parallel, &mut assembled);
    }

    tracing::debug!(
      active_cells = assembled.active_cells,
      facets = assembled.facets,
      "assembled mesh"
    );
    Ok(assembled)
  }

  /// Pass 1. Returns the cell → vertex index grid.
  fn place_vertices<V: ContourVisitor>(
    &self,
    visitor: &V,
    cell_shape: &[usize],
    cell_strides: &[usize],
    parallel: bool,
    assembled: &mut Assembled,
  ) -> Vec<u32> {
    let dimension = self.field.dimension();
    let outer = self.outer_axis();
    let corner_offsets = self.field.corner_offsets();

    let run = |range: Range<usize>| {
      let mut lo: Axes<usize> = SmallVec::from_elem(0, dimension);
      let mut hi: Axes<usize> = SmallVec::from(cell_shape);
      lo[outer] = range.start;
      hi[outer] = range.end;

      let mut buffers = MeshBuffers::default();
      let mut active: Vec<usize> = Vec::new();
      let mut values: SmallVec<[f64; 64]> = SmallVec::from_elem(0.0, corner_count(dimension));

      for_each_coord(&lo, &hi, &self.order, |origin| {
        let base = self.field.linear_index(origin);
        for (value, &offset) in values.iter_mut().zip(&corner_offsets) {
          *value = self.field.value_at(base + offset);
        }
        let mask = corner_mask::build_by(&values, |value| visitor.phase(value));

        if visitor.vertex(origin, &values, mask, &mut buffers) {
          active.push(linear(origin, cell_strides));
        }
      });

      (buffers, active)
    };

    let slabs = slab_ranges(cell_shape[outer], parallel);
    let results: Vec<(MeshBuffers, Vec<usize>)> = if parallel {
      slabs.into_par_iter().map(run).collect()
    } else {
      slabs.into_iter().map(run).collect()
    };

    let mut grid = vec![NO_VERTEX; cell_strides[0] * cell_shape[0]];
    let out = &mut assembled.buffers;
    for (buffers, active) in results {
      // Bounded by the cell count, which `assemble` checked against NO_VERTEX.
      let base = (out.positions.len() / dimension) as u32;
      for (i, cell) in active.iter().enumerate() {
        let index = base + i as u32;
        debug_assert_ne!(index, NO_VERTEX);
        grid[*cell] = index;
      }
      out.positions.extend_from_slice(&buffers.positions);
      out.degenerate_edges += buffers.degenerate_edges;
      assembled.active_cells += active.len() as u64;
    }

    grid
  }

  /// Pass 2.
  fn stitch_facets<V: ContourVisitor>(
    &self,
    visitor: &V,
    grid: &[u32],
    cell_strides: &[usize],
    parallel: bool,
    assembled: &mut Assembled,
  ) {
    let dimension = self.field.dimension();
    let shape = self.field.shape();
    let strides = self.field.strides();
    let outer = self.outer_axis();
    let facet_size = 1usize << (dimension - 1);

    let run = |range: Range<usize>| {
      let mut lo: Axes<usize> = SmallVec::from_elem(0, dimension);
      let mut hi: Axes<usize> = SmallVec::from(shape);
      lo[outer] = range.start;
      hi[outer] = range.end;

      let mut buffers = MeshBuffers::default();
      let mut facets = 0u64;
      let mut facet: SmallVec<[u32; 32]> = SmallVec::from_elem(0, facet_size);

      for_each_coord(&lo, &hi, &self.order, |x| {
        let index = self.field.linear_index(x);
        let low_phase = visitor.phase(self.field.value_at(index));

        for axis in 0..dimension {
          if x[axis] + 1 >= shape[axis] {
            continue;
          }
          let interior = (0..dimension)
            .filter(|&j| j != axis)
            .all(|j| x[j] >= 1 && x[j] + 2 <= shape[j]);
          if !interior {
            continue;
          }

          let high_phase = visitor.phase(self.field.value_at(index + strides[axis]));
          if low_phase == high_phase {
            continue;
          }

          // Cell with origin x; surrounding cells step back along the
          // non-k axes whose facet bit is clear.
          let base = linear(x, cell_strides);
          let mut complete = true;
          for (b, slot) in facet.iter_mut().enumerate() {
            let mut cell = base;
            for (i, j) in (0..dimension).filter(|&j| j != axis).enumerate() {
              if (b >> i) & 1 == 0 {
                cell -= cell_strides[j];
              }
            }
            *slot = grid[cell];
            complete &= *slot != NO_VERTEX;
          }
          if !complete {
            continue;
          }

          visitor.cell(&facet, facet_flag(axis, low_phase), &mut buffers);
          facets += 1;
        }
      });

      (buffers, facets)
    };

    let slabs = slab_ranges(shape[outer], parallel);
    let results: Vec<(MeshBuffers, u64)> = if parallel {
      slabs.into_par_iter().map(run).collect()
    } else {
      slabs.into_iter().map(run).collect()
    };

    for (buffers, facets) in results {
      assembled.buffers.cells.extend_from_slice(&buffers.cells);
      assembled.facets += facets;
    }
  }

  /// Slowest axis in memory.
  fn outer_axis(&self) -> usize {
    self.order.last().map_or(0, |&axis| axis as usize)
  }
}

/// Strides of a row-major (last axis fastest) layout of `shape`.
fn row_major_strides(shape: &[usize]) -> Axes<usize> {
  let mut strides: Axes<usize> = SmallVec::from_elem(1, shape.len());
  for axis in (0..shape.len().saturating_sub(1)).rev() {
    strides[axis] = strides[axis + 1] * shape[axis + 1];
  }
  strides
}

#[inline(always)]
fn linear(coord: &[usize], strides: &[usize]) -> usize {
  coord.iter().zip(strides).map(|(c, s)| c * s).sum()
}

/// Split `0..extent` into contiguous ranges, one per unit of work.
fn slab_ranges(extent: usize, parallel: bool) -> Vec<Range<usize>> {
  if !parallel || extent <= 1 {
    return vec![0..extent];
  }

  let slabs = extent.min(rayon::current_num_threads() * 4).max(1);
  let size = extent.div_ceil(slabs);
  (0..extent)
    .step_by(size)
    .map(|start| start..(start + size).min(extent))
    .collect()
}

/// Visit every coordinate of the box `lo..hi`, with `order[0]` varying
/// fastest.
fn for_each_coord<F>(lo: &[usize], hi: &[usize], order: &[u8], mut f: F)
where
  F: FnMut(&[usize]),
{
  if lo.iter().zip(hi).any(|(l, h)| l >= h) {
    return;
  }

  let mut coord: Axes<usize> = SmallVec::from_slice(lo);
  'outer: loop {
    f(&coord);
    for &axis in order {
      let axis = axis as usize;
      coord[axis] += 1;
      if coord[axis] < hi[axis] {
        continue 'outer;
      }
      coord[axis] = lo[axis];
    }
    return;
  }
}

#[cfg(test)]
#[path = "traversal_test.rs"]
mod traversal_test;
