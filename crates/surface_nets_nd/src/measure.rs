//! Signed volumes of mesh simplices.
//!
//! A facet simplex of a d-dimensional surface has d vertices. Together with
//! a reference point it spans a d-simplex whose signed volume is
//! `det[p_0 - c; ...; p_{d-1} - c] / d!`. The sign is positive when the facet
//! faces away from the reference point, so summing over a closed, outward
//! oriented surface yields the enclosed d-volume.

use glam::{DMat2, DMat3};
use smallvec::SmallVec;

use crate::types::MeshOutput;

/// Determinant of a row-major `n × n` matrix. The buffer is used as scratch
/// space.
pub fn determinant(matrix: &mut [f64], n: usize) -> f64 {
  debug_assert_eq!(matrix.len(), n * n);

  match n {
    0 => 1.0,
    1 => matrix[0],
    2 => DMat2::from_cols_array(&[matrix[0], matrix[1], matrix[2], matrix[3]]).determinant(),
    3 => DMat3::from_cols_array(&[
      matrix[0], matrix[1], matrix[2], matrix[3], matrix[4], matrix[5], matrix[6], matrix[7],
      matrix[8],
    ])
    .determinant(),
    _ => eliminate(matrix, n),
  }
}

/// Gaussian elimination with partial pivoting.
fn eliminate(m: &mut [f64], n: usize) -> f64 {
  let mut det = 1.0;

  for col in 0..n {
    let pivot = (col..n)
      .max_by(|&a, &b| m[a * n + col].abs().total_cmp(&m[b * n + col].abs()))
      .unwrap_or(col);
    if m[pivot * n + col] == 0.0 {
      return 0.0;
    }
    if pivot != col {
      for k in 0..n {
        m.swap(col * n + k, pivot * n + k);
      }
      det = -det;
    }

    let diagonal = m[col * n + col];
    det *= diagonal;
    for row in (col + 1)..n {
      let factor = m[row * n + col] / diagonal;
      if factor == 0.0 {
        continue;
      }
      for k in col..n {
        m[row * n + k] -= factor * m[col * n + k];
      }
    }
  }

  det
}

/// Determinant of the vertices of one simplex relative to `center`.
///
/// `vertices.len()` must equal the dimension of the points.
pub fn signed_determinant(vertices: &[&[f64]], center: &[f64]) -> f64 {
  let n = center.len();
  debug_assert_eq!(vertices.len(), n);

  let mut matrix: SmallVec<[f64; 16]> = SmallVec::with_capacity(n * n);
  for vertex in vertices {
    matrix.extend(vertex.iter().zip(center).map(|(p, c)| p - c));
  }
  determinant(&mut matrix, n)
}

/// Per-cell determinants relative to `center`, in cell order.
///
/// Yields nothing for meshes below two dimensions, whose cells carry no
/// orientation.
pub fn cell_determinants<'m>(
  mesh: &'m MeshOutput,
  center: &'m [f64],
) -> impl Iterator<Item = f64> + 'm {
  let oriented = mesh.dimension >= 2 && mesh.cell_arity() == mesh.dimension;

  mesh
    .iter_cells()
    .filter(move |_| oriented)
    .map(move |cell| {
      let vertices: SmallVec<[&[f64]; 8]> = cell
        .iter()
        .map(|&index| mesh.position(index as usize))
        .collect();
      signed_determinant(&vertices, center)
    })
}

/// Signed d-volume enclosed by an oriented surface, measured from `center`.
pub fn enclosed_measure(mesh: &MeshOutput, center: &[f64]) -> f64 {
  let scale: f64 = (1..=mesh.dimension).map(|k| k as f64).product();
  cell_determinants(mesh, center).sum::<f64>() / scale
}

/// Volume of the d-ball of the given radius.
pub fn ball_volume(dimension: usize, radius: f64) -> f64 {
  match dimension {
    0 => 1.0,
    1 => 2.0 * radius,
    d => ball_volume(d - 2, radius) * 2.0 * std::f64::consts::PI * radius * radius / d as f64,
  }
}

#[cfg(test)]
#[path = "measure_test.rs"]
mod measure_test;
