//! Crossing position along a single grid edge.

use crate::error::{Result, SurfaceNetsError};

/// Fractional position of the isolevel between two samples.
///
/// Returns `(level - low) / (high - low)` without clamping. A zero
/// denominator or a non-finite quotient (infinite or NaN samples) is reported
/// as [`SurfaceNetsError::DegenerateEdge`].
#[inline]
pub fn crossing(low: f64, high: f64, level: f64) -> Result<f64> {
  let denominator = high - low;
  let t = (level - low) / denominator;
  if denominator == 0.0 || !t.is_finite() {
    return Err(SurfaceNetsError::DegenerateEdge { low, high });
  }
  Ok(t)
}

#[cfg(test)]
#[path = "axis_test.rs"]
mod axis_test;
