//! surface_nets_nd - Case-table surface nets for n-dimensional scalar fields
//!
//! This crate extracts isosurfaces from sampled scalar fields of any
//! dimension up to six. Every grid cell that straddles the isolevel receives
//! one vertex and every crossing grid edge becomes a facet of oriented
//! simplices: segments in 2-D, triangles in 3-D, tetrahedra in 4-D.
//!
//! # Features
//!
//! - **Strided field views**: any element type in [`ElementKind`], any
//!   memory order, negative strides and offsets
//! - **Case tables**: crossing edges precomputed for every corner
//!   configuration up to four dimensions, enumerated on demand above
//! - **Consistent winding**: facets face from the below-level region to the
//!   above-level region in every dimension
//! - **Shared cache**: compiled cases built once per signature and shared
//!   across threads
//! - **Parallel traversal**: large fields split into slabs on the rayon pool
//!   with output identical to the sequential walk
//!
//! # Example
//!
//! ```
//! use surface_nets_nd::{fill, surface_nets, MeshConfig, ScalarField};
//!
//! // Sphere of radius 6 in a 16³ grid
//! let shape = [16, 16, 16];
//! let data = fill(&shape, |c| {
//!   c.iter().map(|&x| (x as f64 - 8.0).powi(2)).sum::<f64>()
//! });
//! let field = ScalarField::new(&data, &shape).unwrap();
//!
//! let config = MeshConfig::new().with_level(36.0);
//! let mesh = surface_nets::generate(&field, &config).unwrap();
//!
//! println!(
//!   "Generated {} vertices, {} triangles",
//!   mesh.vertex_count(),
//!   mesh.cell_count()
//! );
//! ```

pub mod constants;
pub mod dispatch;
pub mod edge_table;
pub mod error;
pub mod field;
pub mod measure;
pub mod traversal;
pub mod triangulation;
pub mod types;

// Re-export commonly used items
pub use constants::{DEFAULT_LEVEL, MAX_DIMENSION, TABLE_MAX_DIMENSION};
pub use dispatch::{CacheStats, CaseCache, CompiledCase, Signature};
pub use error::{Result, SurfaceNetsError};
pub use field::{fill, ElementKind, Sample, ScalarField};
pub use traversal::{ContourVisitor, MeshAssembler, MeshBuffers};
pub use types::{
  Bounds, DegenerateEdgePolicy, ExtractionStats, MeshConfig, MeshOutput, VertexPlacement,
};

// Surface Nets module
pub mod surface_nets;
