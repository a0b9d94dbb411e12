//! Strided n-dimensional views over sampled scalar data.
//!
//! A [`ScalarField`] borrows a flat sample buffer and describes how logical
//! coordinates map into it: one extent and one (possibly negative) stride per
//! axis plus a base offset. Coordinates are always given in logical axis
//! order; the memory layout only shows up in [`ScalarField::order`], which
//! the traversal uses to walk the buffer front to back.

use smallvec::SmallVec;

use crate::constants::{corner_count, MAX_DIMENSION};
use crate::error::{Result, SurfaceNetsError};

/// Per-axis storage that stays inline for every supported dimension.
pub type Axes<T> = SmallVec<[T; MAX_DIMENSION]>;

/// Numeric element type of a sample buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
  F32,
  F64,
  I8,
  I16,
  I32,
  U8,
  U16,
  U32,
}

/// A scalar sample type the extractor can read.
pub trait Sample: Copy + Send + Sync + 'static {
  /// Element kind reported in case-cache signatures.
  const KIND: ElementKind;

  /// Widen to `f64` for interpolation.
  fn to_f64(self) -> f64;
}

macro_rules! impl_sample {
  ($($ty:ty => $kind:ident),* $(,)?) => {
    $(
      impl Sample for $ty {
        const KIND: ElementKind = ElementKind::$kind;

        #[inline(always)]
        fn to_f64(self) -> f64 {
          self as f64
        }
      }
    )*
  };
}

impl_sample!(
  f32 => F32,
  f64 => F64,
  i8 => I8,
  i16 => I16,
  i32 => I32,
  u8 => U8,
  u16 => U16,
  u32 => U32,
);

/// Borrowed n-dimensional view over a sample buffer.
#[derive(Clone, Debug)]
pub struct ScalarField<'a, T> {
  data: &'a [T],
  shape: Axes<usize>,
  strides: Axes<isize>,
  offset: usize,
}

impl<'a, T: Sample> ScalarField<'a, T> {
  /// Row-major (last axis fastest) view over exactly `shape.iter().product()`
  /// samples.
  pub fn new(data: &'a [T], shape: &[usize]) -> Result<Self> {
    let expected = sample_count(shape)?;
    if expected != data.len() {
      return Err(SurfaceNetsError::ShapeMismatch {
        expected,
        actual: data.len(),
      });
    }

    let mut strides: Axes<isize> = SmallVec::from_elem(0, shape.len());
    let mut stride = 1isize;
    for axis in (0..shape.len()).rev() {
      strides[axis] = stride;
      stride *= shape[axis].max(1) as isize;
    }

    Ok(Self {
      data,
      shape: SmallVec::from_slice(shape),
      strides,
      offset: 0,
    })
  }

  /// View with explicit strides (in elements) and base offset.
  ///
  /// Every reachable sample must lie inside `data`.
  pub fn with_strides(
    data: &'a [T],
    shape: &[usize],
    strides: &[isize],
    offset: usize,
  ) -> Result<Self> {
    if shape.len() != strides.len() {
      return Err(SurfaceNetsError::StrideMismatch {
        shape: shape.len(),
        strides: strides.len(),
      });
    }
    sample_count(shape)?;

    if shape.iter().all(|&extent| extent > 0) {
      let mut lowest = offset as i128;
      let mut highest = offset as i128;
      for (&extent, &stride) in shape.iter().zip(strides) {
        let span = (extent as i128 - 1) * stride as i128;
        if span < 0 {
          lowest += span;
        } else {
          highest += span;
        }
      }

      if lowest < 0 {
        return Err(SurfaceNetsError::OutOfBounds {
          index: lowest,
          len: data.len(),
        });
      }
      if highest >= data.len() as i128 {
        return Err(SurfaceNetsError::OutOfBounds {
          index: highest,
          len: data.len(),
        });
      }
    }

    Ok(Self {
      data,
      shape: SmallVec::from_slice(shape),
      strides: SmallVec::from_slice(strides),
      offset,
    })
  }

  /// Number of axes.
  #[inline]
  pub fn dimension(&self) -> usize {
    self.shape.len()
  }

  pub fn shape(&self) -> &[usize] {
    &self.shape
  }

  pub fn strides(&self) -> &[isize] {
    &self.strides
  }

  /// Number of addressable samples.
  pub fn len(&self) -> usize {
    self.shape.iter().product()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn element_kind(&self) -> ElementKind {
    T::KIND
  }

  /// Axes sorted from fastest (smallest absolute stride) to slowest.
  ///
  /// Ties keep the higher axis first, so a row-major view of any shape
  /// reports `[d-1, ..., 1, 0]`.
  pub fn order(&self) -> Axes<u8> {
    let mut order: Axes<u8> = (0..self.dimension() as u8).rev().collect();
    order.sort_by_key(|&axis| self.strides[axis as usize].unsigned_abs());
    order
  }

  /// Buffer index of a logical coordinate.
  #[inline]
  pub fn linear_index(&self, coord: &[usize]) -> isize {
    debug_assert_eq!(coord.len(), self.dimension());
    coord
      .iter()
      .zip(&self.strides)
      .fold(self.offset as isize, |acc, (&c, &stride)| {
        acc + c as isize * stride
      })
  }

  /// Sample at a logical coordinate, widened to `f64`.
  #[inline]
  pub fn get(&self, coord: &[usize]) -> f64 {
    self.value_at(self.linear_index(coord))
  }

  /// Sample at a buffer index produced by [`Self::linear_index`].
  #[inline(always)]
  pub(crate) fn value_at(&self, index: isize) -> f64 {
    self.data[index as usize].to_f64()
  }

  /// Buffer offset of every cell corner relative to the cell's corner 0.
  ///
  /// Corner `c` is displaced by one step along each axis whose bit is set in
  /// `c`.
  pub fn corner_offsets(&self) -> SmallVec<[isize; 8]> {
    (0..corner_count(self.dimension()))
      .map(|corner| {
        self
          .strides
          .iter()
          .enumerate()
          .filter(|(axis, _)| (corner >> axis) & 1 == 1)
          .map(|(_, &stride)| stride)
          .sum()
      })
      .collect()
  }
}

/// Sample `f` over every coordinate of `shape` into a row-major buffer.
///
/// The buffer is laid out for [`ScalarField::new`] with the same shape.
pub fn fill<T, F>(shape: &[usize], mut f: F) -> Vec<T>
where
  F: FnMut(&[usize]) -> T,
{
  let count: usize = shape.iter().product();
  let mut data = Vec::with_capacity(count);
  if count == 0 {
    return data;
  }

  let mut coord: Axes<usize> = SmallVec::from_elem(0, shape.len());
  loop {
    data.push(f(&coord));

    // Advance the last axis fastest, carrying towards axis 0.
    let mut axis = shape.len();
    loop {
      if axis == 0 {
        return data;
      }
      axis -= 1;
      coord[axis] += 1;
      if coord[axis] < shape[axis] {
        break;
      }
      coord[axis] = 0;
    }
  }
}

fn sample_count(shape: &[usize]) -> Result<usize> {
  shape
    .iter()
    .try_fold(1usize, |acc, &extent| acc.checked_mul(extent))
    .ok_or_else(|| SurfaceNetsError::ShapeOverflow(shape.to_vec()))
}

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;
