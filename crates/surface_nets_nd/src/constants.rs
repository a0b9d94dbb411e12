//! Dimension limits and traversal thresholds.
//!
//! A cell of a d-dimensional grid is a hypercube with `2^d` corners and
//! `d * 2^(d-1)` edges. Its configuration mask holds one phase bit per corner,
//! so the number of distinct configurations is `2^(2^d)`:
//!
//! ```text
//! d   corners   edges   configurations
//! ─   ───────   ─────   ──────────────
//! 1      2        1     4
//! 2      4        4     16
//! 3      8       12     256
//! 4     16       32     65_536
//! 5     32       80     4_294_967_296   (not tabulated)
//! 6     64      192     2^64            (not tabulated)
//! ```

/// Largest supported dimension. The configuration mask of a cell must fit in
/// a `u64`.
pub const MAX_DIMENSION: usize = 6;

/// Largest dimension whose full case table is precomputed. Above this the
/// crossing edges are enumerated from the mask for every cell.
pub const TABLE_MAX_DIMENSION: usize = 4;

/// Cell count below which traversal stays on the calling thread.
pub const PARALLEL_MIN_CELLS: usize = 4096;

/// Isolevel substituted for a non-finite request.
pub const DEFAULT_LEVEL: f64 = 0.0;

/// Number of corners of the d-cube.
#[inline(always)]
pub const fn corner_count(dimension: usize) -> usize {
  1 << dimension
}

/// Number of edges of the d-cube.
#[inline(always)]
pub const fn edge_count(dimension: usize) -> usize {
  if dimension == 0 {
    0
  } else {
    dimension << (dimension - 1)
  }
}

/// Number of corner-phase configurations of the d-cube.
///
/// Only defined for `dimension <= TABLE_MAX_DIMENSION`.
#[inline(always)]
pub const fn configuration_count(dimension: usize) -> usize {
  1 << corner_count(dimension)
}

/// Mask with every corner bit set (the "full" configuration).
#[inline(always)]
pub const fn full_mask(dimension: usize) -> u64 {
  let corners = corner_count(dimension);
  if corners >= 64 {
    u64::MAX
  } else {
    (1u64 << corners) - 1
  }
}

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
