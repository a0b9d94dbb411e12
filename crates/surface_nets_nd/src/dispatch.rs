//! Signature dispatch and the compiled-case cache.
//!
//! A field is meshed with the case table and facet orientor of its
//! dimension. Both are built once per signature `(dimension, element kind,
//! memory order)` and shared through a [`CaseCache`]:
//!
//! ```text
//! resolve(sig) ──► lock map ──► fetch/insert slot ──► unlock
//!                                      │
//!                                      ▼
//!                       slot.get_or_init(build)   (one build per slot,
//!                                      │           other signatures
//!                                      ▼           never wait on it)
//!                             Arc<CompiledCase>
//! ```
//!
//! Entries are immutable and live as long as the cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use web_time::Instant;

use crate::constants::MAX_DIMENSION;
use crate::error::{Result, SurfaceNetsError};
use crate::field::{Axes, ElementKind, Sample, ScalarField};
use crate::surface_nets::case_table::CaseTable;
use crate::surface_nets::orientation::CellOrientor;

/// Cache key of a compiled case.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
  pub dimension: usize,
  pub element: ElementKind,
  /// Axes from fastest to slowest in memory.
  pub order: Axes<u8>,
}

impl Signature {
  pub fn new(dimension: usize, element: ElementKind, order: &[u8]) -> Self {
    Self {
      dimension,
      element,
      order: order.iter().copied().collect(),
    }
  }

  /// Signature of a field view.
  pub fn of<T: Sample>(field: &ScalarField<'_, T>) -> Self {
    Self {
      dimension: field.dimension(),
      element: field.element_kind(),
      order: field.order(),
    }
  }
}

/// Everything needed to mesh fields of one signature.
#[derive(Debug)]
pub struct CompiledCase {
  pub signature: Signature,
  pub table: CaseTable,
  pub orientor: CellOrientor,
  /// Time spent building this entry.
  pub build_us: u64,
}

impl CompiledCase {
  fn build(signature: Signature) -> Self {
    let start = Instant::now();
    let _span = tracing::info_span!("case_cache::build", dimension = signature.dimension).entered();

    let table = CaseTable::tabulate(signature.dimension);
    let orientor = CellOrientor::new(signature.dimension);
    let build_us = start.elapsed().as_micros() as u64;

    tracing::debug!(?signature, build_us, "compiled case");

    Self {
      signature,
      table,
      orientor,
      build_us,
    }
  }
}

/// Counters of cache activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
  /// Entries built.
  pub builds: u64,
  /// Resolves answered by an existing entry.
  pub hits: u64,
}

type Slot = Arc<OnceLock<Arc<CompiledCase>>>;

/// Signature-keyed store of compiled cases.
///
/// Grows without bound and never evicts.
#[derive(Debug, Default)]
pub struct CaseCache {
  entries: Mutex<HashMap<Signature, Slot>>,
  builds: AtomicU64,
  hits: AtomicU64,
}

impl CaseCache {
  pub fn new() -> Self {
    Self::default()
  }

  /// Process-wide cache used by [`crate::surface_nets::generate`].
  pub fn global() -> &'static CaseCache {
    static GLOBAL: OnceLock<CaseCache> = OnceLock::new();
    GLOBAL.get_or_init(CaseCache::new)
  }

  /// Compiled case for `signature`, building it on first use.
  pub fn resolve(&self, signature: &Signature) -> Result<Arc<CompiledCase>> {
    self.resolve_tracked(signature).map(|(case, _)| case)
  }

  /// Like [`Self::resolve`], also reporting whether the entry already
  /// existed.
  pub(crate) fn resolve_tracked(&self, signature: &Signature) -> Result<(Arc<CompiledCase>, bool)> {
    let dimension = signature.dimension;
    if !(2..=MAX_DIMENSION).contains(&dimension) {
      return Err(SurfaceNetsError::UnsupportedDimension(dimension));
    }

    let slot = {
      let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
      Arc::clone(entries.entry(signature.clone()).or_default())
    };

    let mut built = false;
    let case = slot.get_or_init(|| {
      built = true;
      self.builds.fetch_add(1, Ordering::Relaxed);
      Arc::new(CompiledCase::build(signature.clone()))
    });

    if !built {
      self.hits.fetch_add(1, Ordering::Relaxed);
    }
    Ok((Arc::clone(case), !built))
  }

  pub fn stats(&self) -> CacheStats {
    CacheStats {
      builds: self.builds.load(Ordering::Relaxed),
      hits: self.hits.load(Ordering::Relaxed),
    }
  }

  /// Number of signatures seen.
  pub fn len(&self) -> usize {
    self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn contains(&self, signature: &Signature) -> bool {
    self
      .entries
      .lock()
      .unwrap_or_else(|e| e.into_inner())
      .contains_key(signature)
  }
}

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;
