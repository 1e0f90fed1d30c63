//! Hexahedral mesh construction.
//!
//! Provides the mesh-construction pipeline:
//! - Reference hexahedron topology (corner offsets and face table)
//! - Cell enumeration from an occupancy grid
//! - 6-connected component search and filtering
//! - Vertex generation with global deduplication
//! - Face generation with owner/neighbour classification
//! - Spatial boundary-patch classification

mod boundary;
mod builder;
mod cell;
pub mod connectivity;
mod hex_mesh;
mod report;
pub mod topology;

pub use builder::{BuildError, CellFields, MeshBuilder, MeshOptions};
pub use cell::Cell;
pub use connectivity::{filter_cells, find_largest_component};
pub use hex_mesh::{BoundaryPatch, HexMesh, MeshStatistics};
pub use report::{BuildEvent, BuildReport};
