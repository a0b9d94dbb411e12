//! Oriented simplices of a dual facet.
//!
//! A crossing grid edge on axis k is surrounded by `2^(d-1)` cells. Their
//! vertices form the dual facet, a (d-1)-cube whose corner `b` is the cell
//! displaced along the i-th non-k axis when bit i of `b` is set. The facet is
//! cut by the reference triangulation into `(d-1)!` simplices of d vertices
//! each.
//!
//! ```text
//! d = 2: facet = segment [0,1]            → one 2-vertex cell
//! d = 3: facet = quad    [0,1,3] [2,0,3]  → two triangles
//! ```
//!
//! The orientation flag picks between the reference winding and its
//! opposite. The opposite winding reverses each simplex; when the reversal
//! of d vertices is an even permutation (d = 4, 5) the last two vertices are
//! swapped as well so the orientation really flips.

use crate::triangulation::{triangulate_cube, Simplex};

/// Emits the oriented simplices of dual facets for one dimension.
#[derive(Clone, Debug)]
pub struct CellOrientor {
  dimension: usize,
  simplices: Vec<Simplex>,
}

impl CellOrientor {
  pub fn new(dimension: usize) -> Self {
    debug_assert!(dimension >= 1);
    Self {
      dimension,
      simplices: triangulate_cube(dimension.saturating_sub(1)),
    }
  }

  pub fn dimension(&self) -> usize {
    self.dimension
  }

  /// Reference triangulation of the facet, in facet-corner labels.
  pub fn simplices(&self) -> &[Simplex] {
    &self.simplices
  }

  /// Vertex indices per emitted simplex.
  pub fn arity(&self) -> usize {
    self.dimension
  }

  /// Number of indices appended per facet.
  pub fn indices_per_facet(&self) -> usize {
    self.simplices.len() * self.arity()
  }

  /// Append the simplices of one facet to `cells`.
  ///
  /// `facet[b]` is the vertex index at facet corner `b`.
  #[inline]
  pub fn emit(&self, facet: &[u32], forward: bool, cells: &mut Vec<u32>) {
    debug_assert_eq!(facet.len(), 1 << (self.dimension - 1));

    for simplex in &self.simplices {
      let start = cells.len();
      cells.extend(simplex.iter().map(|&corner| facet[corner as usize]));
      if !forward {
        flip(&mut cells[start..]);
      }
    }
  }
}

/// Turn a simplex into its opposite orientation.
#[inline]
fn flip(simplex: &mut [u32]) {
  let n = simplex.len();
  simplex.reverse();
  // Reversal is `n / 2` transpositions.
  if n >= 2 && (n / 2) % 2 == 0 {
    simplex.swap(n - 2, n - 1);
  }
}

#[cfg(test)]
#[path = "orientation_test.rs"]
mod orientation_test;
