//! Error types for surface nets extraction.

use thiserror::Error;

use crate::constants::MAX_DIMENSION;

/// Errors that can occur while building case tables or extracting a mesh.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceNetsError {
  /// No case table can be built for this dimension.
  #[error("Unsupported dimension: {0} (case tables cover 2..={max})", max = MAX_DIMENSION)]
  UnsupportedDimension(usize),

  /// A crossing edge whose endpoint values give no finite crossing position.
  #[error("Degenerate crossing edge: {low} -> {high}")]
  DegenerateEdge { low: f64, high: f64 },

  /// Sample buffer length disagrees with the product of the shape.
  #[error("Shape mismatch: shape addresses {expected} samples, buffer holds {actual}")]
  ShapeMismatch { expected: usize, actual: usize },

  /// Shape and stride slices have different lengths.
  #[error("Stride mismatch: {shape} axes in shape, {strides} strides")]
  StrideMismatch { shape: usize, strides: usize },

  /// The product of the shape does not fit in `usize`.
  #[error("Shape {0:?} overflows the addressable sample count")]
  ShapeOverflow(Vec<usize>),

  /// The field has more cells than `u32` vertex indices can address.
  #[error("Too many cells: {0} exceeds the u32 vertex index range")]
  TooManyCells(usize),

  /// A strided view reaches outside its sample buffer.
  #[error("Out of bounds: view reaches sample {index}, buffer holds {len}")]
  OutOfBounds { index: i128, len: usize },
}

/// Result type for surface nets operations.
pub type Result<T> = std::result::Result<T, SurfaceNetsError>;

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
