//! Corner configuration masks.
//!
//! The configuration mask of a cell has one bit per corner. Bit `c` is set
//! when the sample at corner `c` lies strictly above the isolevel, so a
//! sample equal to the level counts as below.

use crate::constants::full_mask;

/// Phase of a single sample.
#[inline(always)]
pub fn phase(value: f64, level: f64) -> bool {
  value > level
}

/// Build the configuration mask of a cell from its corner samples.
///
/// `values[c]` is the sample at corner `c`; at most 64 corners.
#[inline]
pub fn build(values: &[f64], level: f64) -> u64 {
  build_by(values, |value| phase(value, level))
}

/// Like [`build`], with the phase decided by `above`.
#[inline]
pub fn build_by<F>(values: &[f64], mut above: F) -> u64
where
  F: FnMut(f64) -> bool,
{
  debug_assert!(values.len() <= 64);

  values
    .iter()
    .enumerate()
    .filter(|&(_, &value)| above(value))
    .fold(0u64, |mask, (corner, _)| mask | (1 << corner))
}

/// True if the configuration straddles the level, i.e. it is neither empty
/// nor full.
#[inline(always)]
pub fn is_active(mask: u64, dimension: usize) -> bool {
  mask != 0 && mask != full_mask(dimension)
}

#[cfg(test)]
#[path = "corner_mask_test.rs"]
mod corner_mask_test;
