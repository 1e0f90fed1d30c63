//! # hexmesh-rs
//!
//! A library for generating structured hexahedral finite-volume meshes from
//! voxel occupancy grids.
//!
//! This crate provides the core building blocks for turning a 3D solid/fluid
//! mask into a topologically valid mesh for finite-volume flow solvers:
//! - Flat voxel occupancy grid with nearest-neighbor resampling
//! - 6-connected component filtering (discard isolated fluid pockets)
//! - Global vertex generation with exact deduplication
//! - Face generation with owner/neighbour classification
//! - Spatial boundary-patch classification (inlet, outlet, walls)
//!
//! The produced [`HexMesh`] carries the point list, the face list split into
//! internal and boundary ranges, owner/neighbour arrays, and a named
//! boundary-patch table, numbered deterministically so downstream writers
//! and analysis see identical meshes for identical input.
//!
//! # Example
//!
//! ```
//! use hexmesh_rs::{MeshBuilder, MeshOptions, VoxelGrid};
//!
//! // A 2x2x2 fully fluid block.
//! let grid = VoxelGrid::filled(2, 2, 2);
//! let mesh = MeshBuilder::new(&grid, MeshOptions::new(1.0)).build().unwrap();
//!
//! assert_eq!(mesh.n_cells, 8);
//! assert_eq!(mesh.n_points(), 27);
//! assert_eq!(mesh.n_internal_faces, 12);
//! assert_eq!(mesh.n_boundary_faces(), 24);
//! ```

pub mod geometry;
pub mod mesh;
pub mod types;

// Re-export main types for convenience
pub use geometry::{GridError, GridStatistics, Point3, VoxelGrid};
pub use mesh::{
    BoundaryPatch, BuildError, BuildEvent, BuildReport, Cell, CellFields, HexMesh, MeshBuilder,
    MeshOptions, MeshStatistics, filter_cells, find_largest_component,
};
pub use types::{CellRegion, FlowAxis, GridDims, ParseAxisError};
