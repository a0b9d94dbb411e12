//! n-dimensional surface nets.
//!
//! Surface nets is a dual contouring method: every grid cell whose corners
//! straddle the isolevel receives ONE vertex, placed from the crossings on
//! the cell's edges, and every crossing grid edge is stitched into a facet
//! joining the vertices of the cells around it.
//!
//! ```text
//! Marching cubes:                     Surface nets:
//!   - vertices ON the crossing edges    - one vertex INSIDE each active cell
//!   - facets inside cells               - facets dual to crossing edges
//! ```
//!
//! # Processing Pipeline
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        INPUT                                    │
//! │  field: ScalarField<T>   - d-dimensional strided samples        │
//! │  config: MeshConfig      - level, placement, degenerate policy  │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    DISPATCH                                     │
//! │  d = 0  → empty mesh                                            │
//! │  d = 1  → line scan (one point per sign change)                 │
//! │  d ≥ 2  → resolve (dimension, element, order) in the CaseCache  │
//! │           → case table + facet orientor, built once             │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PASS 1: Vertices                             │
//! │    Build 2^d-bit corner mask (sample > level)                   │
//! │    Skip empty and full configurations                           │
//! │    Look up crossing edges, interpolate, place vertex            │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    PASS 2: Facets                               │
//! │  For each crossing grid edge with all 2^(d-1) cells around it:  │
//! │    Gather the cells' vertices into a (d-1)-cube                 │
//! │    Emit its (d-1)! simplices, wound below → above               │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        OUTPUT                                   │
//! │  positions: Vec<f64>    - d coordinates per vertex              │
//! │  cells: Vec<u32>        - d indices per simplex                 │
//! │  bounds, stats                                                  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Positions are in sample-index units along the logical axes of the field,
//! whatever its memory layout.

pub mod axis;
pub mod case_table;
pub mod corner_mask;
pub mod orientation;
pub mod vertex_calc;

use smallvec::SmallVec;
use web_time::Instant;

use crate::constants::MAX_DIMENSION;
use crate::dispatch::{CaseCache, Signature};
use crate::edge_table::cube_edges;
use crate::error::Result;
use crate::field::{Sample, ScalarField};
use crate::traversal::{ContourVisitor, MeshAssembler, MeshBuffers};
use crate::types::*;

use self::case_table::CaseTable;
use self::orientation::CellOrientor;

/// Surface nets callbacks for one compiled case and configuration.
pub struct SurfaceNetsVisitor<'c> {
  table: &'c CaseTable,
  orientor: &'c CellOrientor,
  level: f64,
  placement: VertexPlacement,
  policy: DegenerateEdgePolicy,
}

impl<'c> SurfaceNetsVisitor<'c> {
  pub fn new(table: &'c CaseTable, orientor: &'c CellOrientor, config: &MeshConfig) -> Self {
    Self {
      table,
      orientor,
      level: config.effective_level(),
      placement: config.placement,
      policy: config.degenerate_policy,
    }
  }
}

impl ContourVisitor for SurfaceNetsVisitor<'_> {
  #[inline(always)]
  fn phase(&self, value: f64) -> bool {
    corner_mask::phase(value, self.level)
  }

  #[inline]
  fn vertex(&self, origin: &[usize], values: &[f64], mask: u64, out: &mut MeshBuffers) -> bool {
    let mut offset: SmallVec<[f64; MAX_DIMENSION]> = SmallVec::from_elem(0.0, origin.len());
    let outcome = self.table.vertex_offset(
      mask,
      values,
      self.level,
      self.placement,
      self.policy,
      &mut offset,
    );
    let Some(degenerate) = outcome else {
      return false;
    };

    out.degenerate_edges += degenerate as u64;
    out
      .positions
      .extend(origin.iter().zip(&offset).map(|(&o, &t)| o as f64 + t));
    true
  }

  #[inline]
  fn cell(&self, facet: &[u32], forward: bool, out: &mut MeshBuffers) {
    self.orientor.emit(facet, forward, &mut out.cells);
  }
}

/// Extract the isosurface of `field` using the process-wide case cache.
pub fn generate<T: Sample>(field: &ScalarField<'_, T>, config: &MeshConfig) -> Result<MeshOutput> {
  generate_with_cache(field, config, CaseCache::global())
}

/// Extract the isosurface of `field`, resolving case tables through `cache`.
///
/// # Errors
///
/// [`crate::SurfaceNetsError::UnsupportedDimension`] when the field has more
/// than [`MAX_DIMENSION`] axes.
#[tracing::instrument(skip_all, name = "surface_nets::generate")]
pub fn generate_with_cache<T: Sample>(
  field: &ScalarField<'_, T>,
  config: &MeshConfig,
  cache: &CaseCache,
) -> Result<MeshOutput> {
  let start = Instant::now();
  let level = config.effective_level();
  if level != config.level {
    tracing::debug!(requested = config.level, level, "non-finite isolevel replaced");
  }

  let dimension = field.dimension();
  let mut output = match dimension {
    0 => MeshOutput::new(0),
    1 => scan_line(field, level, config),
    _ => {
      let signature = Signature::of(field);
      let (case, cache_hit) = cache.resolve_tracked(&signature)?;
      let visitor = SurfaceNetsVisitor::new(&case.table, &case.orientor, config);
      let assembled = MeshAssembler::new(field, &signature.order)
        .parallel(config.parallel)
        .assemble(&visitor)?;

      let mut output = MeshOutput::new(dimension);
      output.positions = assembled.buffers.positions;
      output.cells = assembled.buffers.cells;
      output.stats = ExtractionStats {
        active_cells: assembled.active_cells,
        facets: assembled.facets,
        degenerate_edges: assembled.buffers.degenerate_edges,
        cache_hit,
        elapsed_us: 0,
      };
      output
    }
  };

  if dimension > 0 {
    let mut bounds = Bounds::empty(dimension);
    for position in output.iter_positions() {
      bounds.encapsulate(position);
    }
    output.bounds = bounds;
  }
  output.stats.elapsed_us = start.elapsed().as_micros() as u64;

  if output.stats.degenerate_edges > 0 {
    tracing::debug!(
      degenerate_edges = output.stats.degenerate_edges,
      "degenerate crossing edges resolved by policy"
    );
  }
  tracing::debug!(
    dimension,
    vertices = output.vertex_count(),
    cells = output.cell_count(),
    elapsed_us = output.stats.elapsed_us,
    "extracted isosurface"
  );

  Ok(output)
}

/// One-dimensional fields: one point and one single-index cell per sign
/// change between neighbouring samples.
fn scan_line<T: Sample>(field: &ScalarField<'_, T>, level: f64, config: &MeshConfig) -> MeshOutput {
  let mut output = MeshOutput::new(1);
  let edges = cube_edges(1);
  let mut offset = [0.0];

  for i in 1..field.shape()[0] {
    let values = [field.get(&[i - 1]), field.get(&[i])];
    if corner_mask::phase(values[0], level) == corner_mask::phase(values[1], level) {
      continue;
    }

    output.stats.degenerate_edges += vertex_calc::compute_offset(
      edges.iter().copied(),
      &values,
      level,
      config.placement,
      config.degenerate_policy,
      &mut offset,
    ) as u64;

    let index = output.positions.len() as u32;
    output.positions.push((i - 1) as f64 + offset[0]);
    output.cells.push(index);
  }

  output.stats.active_cells = output.positions.len() as u64;
  output.stats.facets = output.stats.active_cells;
  output
}
