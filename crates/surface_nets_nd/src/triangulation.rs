//! Reference simplex decomposition of the unit hypercube.
//!
//! The m-cube is split into `m!` simplices, one per permutation of its axes
//! (the Kuhn / Freudenthal triangulation): the simplex for permutation `p`
//! starts at corner 0 and walks to corner `2^m - 1` setting bit `p[0]`, then
//! `p[1]`, and so on. Each simplex's orientation equals the parity of its
//! permutation, so odd simplices swap their first two vertices. Every emitted
//! simplex is then positively oriented in the cube's own coordinates.
//!
//! ```text
//! m = 1:  [0,1]
//!
//! m = 2:  2───3     [0,1,3]
//!         │ ╱ │     [2,0,3]
//!         0───1
//! ```

use smallvec::SmallVec;

use crate::constants::MAX_DIMENSION;

/// Corner labels of one simplex of a triangulated cube.
pub type Simplex = SmallVec<[u8; MAX_DIMENSION]>;

/// Positively oriented triangulation of the `m`-cube into `m!` simplices of
/// `m + 1` corners each.
///
/// The 0-cube is the single point simplex `[0]`.
pub fn triangulate_cube(m: usize) -> Vec<Simplex> {
  let mut permutation: SmallVec<[u8; MAX_DIMENSION]> = (0..m as u8).collect();
  let mut simplices = Vec::new();

  loop {
    let mut simplex: Simplex = SmallVec::with_capacity(m + 1);
    let mut corner = 0u8;
    simplex.push(corner);
    for &axis in &permutation {
      corner |= 1 << axis;
      simplex.push(corner);
    }
    if is_odd(&permutation) {
      simplex.swap(0, 1);
    }
    simplices.push(simplex);

    if !next_permutation(&mut permutation) {
      return simplices;
    }
  }
}

fn is_odd(permutation: &[u8]) -> bool {
  let mut inversions = 0usize;
  for i in 0..permutation.len() {
    for j in (i + 1)..permutation.len() {
      if permutation[i] > permutation[j] {
        inversions += 1;
      }
    }
  }
  inversions % 2 == 1
}

/// Advance to the next lexicographic permutation. Returns false after the
/// last one.
fn next_permutation(items: &mut [u8]) -> bool {
  if items.len() < 2 {
    return false;
  }

  let mut pivot = items.len() - 1;
  while pivot > 0 && items[pivot - 1] >= items[pivot] {
    pivot -= 1;
  }
  if pivot == 0 {
    return false;
  }

  let mut successor = items.len() - 1;
  while items[successor] <= items[pivot - 1] {
    successor -= 1;
  }
  items.swap(pivot - 1, successor);
  items[pivot..].reverse();
  true
}

#[cfg(test)]
#[path = "triangulation_test.rs"]
mod triangulation_test;
